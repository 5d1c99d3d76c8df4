// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | svn subcommands
//! ```

use std::process::ExitCode;

use svnq::cli::global::GlobalOptions;
use svnq::cli::{self, Command};
use svnq::cmd::config::{run_inis_command, run_options_command};
use svnq::cmd::svn::{open_client, run_svn_command};
use svnq::config::loader::ConfigLoader;
use svnq::config::types::GlobalConfig;
use svnq::config::{Config, DEFAULT_CONFIG_FILE};
use svnq::logging::LogConfig;
use svnq::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Invalid option: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &loaded_files).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, loaded_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => handle_version_command(cli, config).await,
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(loaded_files);
            Ok(())
        }
        Some(command) => match open_client(config, cli.global.root.as_deref()).await {
            Ok(svn) => run_svn_command(command, &svn, cli.global.json).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the svnq version, and the svn version when a root is known.
async fn handle_version_command(cli: &cli::Cli, config: &Config) -> svnq::error::Result<()> {
    println!("svnq {}", env!("CARGO_PKG_VERSION"));
    if let Ok(svn) = open_client(config, cli.global.root.as_deref()).await {
        println!("svn {}", svn.version().await?);
    }
    Ok(())
}

fn build_config_loader(global: &GlobalOptions) -> svnq::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix("SVNQ")
        .set_all(global.to_config_overrides())
}
