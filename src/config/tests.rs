// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.svn.program, "svn");
    assert!(config.svn.root.is_none());
    assert!(config.svn.non_interactive);
    assert!(config.svn.trust_server_cert);
    assert!(config.svn.credentials().is_none());
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
[global]
log_level = 4
log_file = "svnq.log"

[svn]
program = "/opt/svn/bin/svn"
root = "/work/wc"
username = "alice"
password = "s3cret"
trust_server_cert = false
"#,
    )
    .expect("valid config");

    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("svnq.log")));
    assert_eq!(config.svn.program, "/opt/svn/bin/svn");
    assert_eq!(config.svn.root, Some(PathBuf::from("/work/wc")));
    assert!(!config.svn.trust_server_cert);
    assert!(config.svn.non_interactive);

    let credentials = config.svn.credentials().expect("credentials");
    assert_eq!(credentials.username(), "alice");
    assert_eq!(credentials.password(), "s3cret");
}

#[test]
fn test_unknown_keys_rejected() {
    assert!(Config::parse("[svn]\nprogramm = \"svn\"\n").is_err());
    assert!(Config::parse("[paths]\nprefix = \"/x\"\n").is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Config::parse("[global]\nlog_level = 7\n").is_err());
}

#[test]
fn test_password_requires_username() {
    let err = Config::parse("[svn]\npassword = \"x\"\n").unwrap_err();
    let config_err = err
        .downcast_ref::<ConfigError>()
        .expect("validation error");
    assert!(matches!(config_err, ConfigError::InvalidValue { key, .. } if key == "password"));
}

#[test]
fn test_svn_config_debug_masks_password() {
    let config = Config::parse("[svn]\nusername = \"alice\"\npassword = \"s3cret\"\n")
        .expect("valid config");

    let debug = format!("{config:?}");
    assert!(!debug.contains("s3cret"), "{debug}");
    assert!(debug.contains(r#"password: "******""#), "{debug}");
    assert!(debug.contains(r#"username: "alice""#), "{debug}");
    assert!(format!("{:?}", Config::default()).contains(r#"password: """#));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = Config::parse("[svn\nroot = 1\n").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().expect("parse error");
    assert!(
        matches!(config_err, ConfigError::ParseError { path, .. } if path == "<string>"),
        "{config_err}"
    );
}

#[test]
fn test_credentials_need_both_parts() {
    let config = Config::parse("[svn]\nusername = \"alice\"\n").expect("valid config");
    assert!(config.svn.credentials().is_none());
}

#[test]
fn test_set_overrides_win() {
    let config = ConfigLoader::new()
        .add_toml_str("[svn]\nroot = \"/from/file\"\n")
        .with_env_prefix("SVNQ")
        .with_env_vars([("SVNQ_SVN__ROOT", "/from/env")])
        .set("svn.root", "/from/cli")
        .expect("valid key")
        .build()
        .expect("valid config");

    assert_eq!(config.svn.root, Some(PathBuf::from("/from/cli")));
}

#[test]
fn test_env_overrides_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[svn]\nusername = \"file\"\n")
        .with_env_prefix("SVNQ")
        .with_env_vars([
            ("SVNQ_SVN__USERNAME", "env"),
            ("SVNQ_SVN__NON_INTERACTIVE", "false"),
            ("SVNQ_GLOBAL__LOG_LEVEL", "5"),
            ("OTHER_SVN__PROGRAM", "ignored"),
        ])
        .build()
        .expect("valid config");

    assert_eq!(config.svn.username, "env");
    assert!(!config.svn.non_interactive);
    assert_eq!(config.global.log_level, LogLevel::TRACE);
    assert_eq!(config.svn.program, "svn");
}

#[test]
fn test_env_multi_word_keys_and_passwords() {
    let config = ConfigLoader::new()
        .with_env_prefix("SVNQ")
        .with_env_vars([
            ("SVNQ_SVN__TRUST_SERVER_CERT", "false"),
            ("SVNQ_GLOBAL__FILE_LOG_LEVEL", "1"),
            ("SVNQ_SVN__USERNAME", "alice"),
            ("SVNQ_SVN__PASSWORD", "s3cret"),
        ])
        .build()
        .expect("valid config");

    assert!(!config.svn.trust_server_cert);
    assert_eq!(config.global.file_log_level, LogLevel::ERROR);
    assert_eq!(config.svn.password, "s3cret");
}

#[test]
fn test_env_unknown_key_rejected() {
    let result = ConfigLoader::new()
        .with_env_prefix("SVNQ")
        .with_env_vars([("SVNQ_SVN__PROGRAMM", "svn")])
        .build();
    assert!(result.is_err());
}

#[test]
fn test_env_ignored_without_prefix() {
    let config = ConfigLoader::new()
        .with_env_vars([("SVNQ_SVN__PROGRAM", "svn2")])
        .build()
        .expect("valid config");
    assert_eq!(config.svn.program, "svn");
}

#[test]
fn test_set_all_parses_assignments() {
    let config = ConfigLoader::new()
        .set_all(["svn.program = svn2", "global.file_log_level=2"])
        .expect("valid assignments")
        .build()
        .expect("valid config");

    assert_eq!(config.svn.program, "svn2");
    assert_eq!(config.global.file_log_level, LogLevel::WARN);
}

#[test]
fn test_set_rejects_bad_keys() {
    assert!(ConfigLoader::new().set("root", "/x").is_err());
    assert!(ConfigLoader::new().set("svn.root.deep", "/x").is_err());
    assert!(ConfigLoader::new().set_all(["svn.root"]).is_err());
}

#[test]
fn test_missing_required_file() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/svnq.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_optional_file_and_loaded_files() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let present = temp.path().join("svnq.toml");
    std::fs::write(&present, "[svn]\nprogram = \"svn-from-file\"\n").expect("write config");

    let loader = ConfigLoader::new()
        .add_toml_file_optional(temp.path().join("missing.toml"))
        .add_toml_file_optional(&present);
    assert_eq!(loader.loaded_files().len(), 1);
    assert!(loader.format_loaded_files()[0].starts_with("1. [optional] "));

    let config = loader.build().expect("valid config");
    assert_eq!(config.svn.program, "svn-from-file");
}

#[test]
fn test_from_file() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("svnq.toml");
    std::fs::write(&path, "[global]\nlog_level = 2\n").expect("write config");

    let config = Config::from_file(&path).expect("valid config");
    assert_eq!(config.global.log_level, LogLevel::WARN);
}

#[test]
fn test_svn_options_root_resolution() {
    let config = Config::parse("[svn]\nroot = \"/cfg/wc\"\n").expect("valid config");

    let options = config.svn_options(None).expect("root from config");
    assert_eq!(options.root(), Path::new("/cfg/wc"));

    let options = config
        .svn_options(Some(Path::new("/cli/wc")))
        .expect("root from override");
    assert_eq!(options.root(), Path::new("/cli/wc"));
}

#[test]
fn test_svn_options_missing_root() {
    let err = Config::default().svn_options(None).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'root' in section '[svn]'"
    );
}

#[test]
fn test_format_options_hides_password() {
    let config = Config::parse(concat!(
        "[global]\nlog_file = \"svnq.log\"\n\n",
        "[svn]\nroot = \"/wc\"\nusername = \"alice\"\npassword = \"s3cret\"\n",
    ))
    .expect("valid config");

    let formatted = config.format_options().join("\n");
    assert!(!formatted.contains("s3cret"));
    insta::assert_snapshot!(formatted, @r"
    global.file_log_level = 5
    global.log_file       = svnq.log
    global.log_level      = 3
    svn.non_interactive   = true
    svn.password          = [hidden]
    svn.program           = svn
    svn.root              = /wc
    svn.trust_server_cert = true
    svn.username          = alice
    ");
}
