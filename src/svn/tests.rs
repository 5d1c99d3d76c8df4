// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;

use super::{
    ChooseKind, ChooseStep, CliRunner, CommandLine, Credentials, Depth, ProcessRunner, Svn,
    SvnOptions, SvnOutput, plan_choose,
};
use crate::error::{SvnError, SvnResult};
use crate::parse::ActionStatus;

type Responder = Box<dyn Fn(&[String]) -> SvnResult<String> + Send + Sync>;

/// Runner that answers from a script and records every invocation.
struct ScriptedRunner {
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    respond: Responder,
}

impl ScriptedRunner {
    fn new(respond: impl Fn(&[String]) -> SvnResult<String> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().expect("lock").clone()
    }

    /// Recorded argument lists without the fixed trailing flags.
    fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(_, args)| {
                args.iter()
                    .filter(|arg| {
                        !arg.starts_with("--non-interactive") && !arg.starts_with("--trust")
                    })
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        command: &'a CommandLine,
        cwd: &'a Path,
    ) -> BoxFuture<'a, SvnResult<String>> {
        let args = command.args().to_vec();
        self.calls
            .lock()
            .expect("lock")
            .push((cwd.to_path_buf(), args.clone()));
        let result = (self.respond)(&args);
        Box::pin(async move { result })
    }
}

fn options(root: impl Into<PathBuf>) -> SvnOptions {
    SvnOptions::builder().with_root(root.into()).build()
}

fn failure(message: &str) -> SvnError {
    SvnError::ExecutionFailed {
        command: "svn".to_string(),
        message: message.to_string(),
    }
}

// --- CommandLine ---

#[test]
fn test_command_line_appends_fixed_flags() {
    let command = CommandLine::svn(["status"], &options("/wc"));
    assert_eq!(command.program(), "svn");
    assert_eq!(
        command.args(),
        ["status", "--non-interactive", "--trust-server-cert"]
    );
}

#[test]
fn test_command_line_flags_can_be_disabled() {
    let options = SvnOptions::builder()
        .with_root("/wc")
        .with_program("svn1.14")
        .with_non_interactive(false)
        .with_trust_server_cert(false)
        .build();
    let command = CommandLine::svn(["info"], &options);
    insta::assert_snapshot!(command.to_string(), @"svn1.14 info");
}

#[test]
fn test_command_line_redacts_password() {
    let options = SvnOptions::builder()
        .with_root("/wc")
        .with_credentials(Credentials::new("alice", "s3cret"))
        .build();
    let command = CommandLine::svn(["log", "--search=s3cret-fix"], &options);

    assert_eq!(command.args()[command.args().len() - 1], "s3cret");
    insta::assert_snapshot!(
        command.to_string(),
        @"svn log --search=******-fix --non-interactive --trust-server-cert --username alice --password ******"
    );
    let debug = format!("{command:?}");
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("alice"));
}

#[test]
fn test_command_line_quotes_spaced_args() {
    let command = CommandLine::svn(["commit", "-m", "fix the build"], &options("/wc"));
    insta::assert_snapshot!(
        command.to_string(),
        @r#"svn commit -m "fix the build" --non-interactive --trust-server-cert"#
    );
}

#[test]
fn test_credentials_debug_is_redacted() {
    let credentials = Credentials::new("bob", "hunter2");
    insta::assert_snapshot!(
        format!("{credentials:?}"),
        @r#"Credentials { username: "bob", password: "******" }"#
    );
    assert_eq!(credentials.password(), "hunter2");
}

// --- Depth ---

#[test]
fn test_depth_args() {
    assert_eq!(Depth::Empty.to_arg(), "--depth=empty");
    assert_eq!(Depth::Infinity.to_arg(), "--depth=infinity");
    assert_eq!("Immediates".parse::<Depth>(), Ok(Depth::Immediates));
    assert!("deep".parse::<Depth>().is_err());
}

// --- plan_choose ---

#[test]
fn test_plan_choose_single_nested_path() {
    let plan = plan_choose(&["a/b"]);
    assert_eq!(
        plan,
        vec![
            ChooseStep {
                kind: ChooseKind::Info,
                path: String::new(),
            },
            ChooseStep {
                kind: ChooseKind::Checkout { depth: Depth::Empty },
                path: String::new(),
            },
            ChooseStep {
                kind: ChooseKind::Update {
                    depth: Some(Depth::Empty),
                },
                path: "a".to_string(),
            },
            ChooseStep {
                kind: ChooseKind::Update { depth: None },
                path: "a/b".to_string(),
            },
        ]
    );
}

#[test]
fn test_plan_choose_without_sub_paths() {
    let plan = plan_choose::<&str>(&[]);
    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan[1].kind,
        ChooseKind::Checkout {
            depth: Depth::Infinity
        }
    );

    // only empty sub-paths behaves like none
    let plan = plan_choose(&["/", ""]);
    assert_eq!(plan.len(), 2);
}

#[test]
fn test_plan_choose_strips_slashes_and_keeps_order() {
    let plan: Vec<String> = plan_choose(&["/a/b/c/", "", "x"])
        .iter()
        .map(|step| match step.kind {
            ChooseKind::Info => "info".to_string(),
            ChooseKind::Checkout { depth } => format!("checkout {depth}"),
            ChooseKind::Update { depth: Some(depth) } => format!("update {} {depth}", step.path),
            ChooseKind::Update { depth: None } => format!("update {}", step.path),
        })
        .collect();

    assert_eq!(
        plan,
        [
            "info",
            "checkout empty",
            "update a empty",
            "update a/b empty",
            "update a/b/c",
            "update x",
        ]
    );
}

#[test]
fn test_plan_choose_json() {
    let plan = plan_choose(&["a"]);
    insta::assert_snapshot!(
        serde_json::to_string(&plan).unwrap(),
        @r#"[{"kind":"info","path":""},{"kind":"checkout","depth":"empty","path":""},{"kind":"update","depth":null,"path":"a"}]"#
    );
}

// --- Svn client over a scripted runner ---

#[tokio::test]
async fn test_checkout_without_name_targets_root() {
    let runner =
        ScriptedRunner::new(|_| Ok("A    wc/trunk\nChecked out revision 3.\n".to_string()));
    let svn = Svn::with_runner(options("/work/wc"), runner.clone());

    let actions = svn
        .checkout("https://svn.example.com/repo", None, Some(Depth::Empty))
        .await
        .expect("checkout");

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].status, ActionStatus::Added);

    let calls = runner.calls();
    assert_eq!(calls[0].0, PathBuf::from("/work"));
    assert_eq!(
        runner.commands(),
        ["checkout https://svn.example.com/repo wc --depth=empty"]
    );
}

#[tokio::test]
async fn test_checkout_with_name_runs_in_root() {
    let runner = ScriptedRunner::new(|_| Ok(String::new()));
    let svn = Svn::with_runner(options("/work/wc"), runner.clone());

    svn.checkout("https://svn.example.com/repo", Some("copy"), None)
        .await
        .expect("checkout");

    assert_eq!(runner.calls()[0].0, PathBuf::from("/work/wc"));
    assert_eq!(runner.commands(), ["checkout https://svn.example.com/repo copy"]);
}

#[tokio::test]
async fn test_checkout_without_name_needs_root_name() {
    let runner = ScriptedRunner::new(|_| Ok(String::new()));
    let svn = Svn::with_runner(options("/"), runner.clone());

    let err = svn.checkout("https://svn.example.com/repo", None, None).await.unwrap_err();
    assert!(matches!(err, SvnError::InvalidPath { .. }));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_update_accept_policy() {
    let runner = ScriptedRunner::new(|_| Ok("U    a.txt\n".to_string()));
    let svn = Svn::with_runner(options("/wc"), runner.clone());

    svn.update(&[], None, None).await.expect("update");
    svn.update(&["a".to_string()], Some(Depth::Files), Some("theirs-full"))
        .await
        .expect("update");

    assert_eq!(
        runner.commands(),
        [
            "update --accept postpone",
            "update a --depth=files --accept theirs-full",
        ]
    );
}

#[tokio::test]
async fn test_switch_add_commit_cleanup_arguments() {
    let runner = ScriptedRunner::new(|_| Ok(String::new()));
    let svn = Svn::with_runner(options("/wc"), runner.clone());

    svn.switch("https://svn.example.com/repo/branches/b1")
        .await
        .expect("switch");
    svn.add("src/new.c", &["--force".to_string()]).await.expect("add");
    svn.commit(&["src/new.c".to_string()], "add new.c")
        .await
        .expect("commit");
    svn.cleanup(None).await.expect("cleanup");

    assert_eq!(
        runner.commands(),
        [
            "switch https://svn.example.com/repo/branches/b1 /wc --accept postpone",
            "add --force /wc/src/new.c",
            "commit -m add new.c /wc/src/new.c",
            "cleanup",
        ]
    );
    assert!(runner.calls().iter().all(|(cwd, _)| cwd == Path::new("/wc")));
}

#[tokio::test]
async fn test_log_fetches_info_after_log() {
    let log_text = "------------------------------------------------------------------------\n\
                    r5 | alice | 2020-01-02 10:00:00 +0000 (Thu, 02 Jan 2020) | 1 line\n\
                    Changed paths:\n\
                    \x20  M /trunk/src/a.js\n\
                    \x20  M /tags/v1/a.js\n\
                    \n\
                    Fix a.js\n\
                    ------------------------------------------------------------------------\n";
    let runner = ScriptedRunner::new(move |args| match args[0].as_str() {
        "log" => Ok(log_text.to_string()),
        "info" => {
            Ok("URL: https://svn.example.com/repo/trunk\nRelative URL: ^/trunk\n".to_string())
        }
        other => Err(failure(other)),
    });
    let svn = Svn::with_runner(options("/wc"), runner.clone());

    let entries = svn.log(&["-l".to_string(), "1".to_string()]).await.expect("log");

    assert_eq!(runner.commands(), ["log -l 1 -v", "info"]);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].files.len(), 1);
    assert_eq!(entries[0].files[0].path, "/src/a.js");
    assert_eq!(entries[0].changes.len(), 2);
}

#[tokio::test]
async fn test_log_failure_skips_info() {
    let runner = ScriptedRunner::new(|_| Err(failure("E155007: not a working copy")));
    let svn = Svn::with_runner(options("/wc"), runner.clone());

    let err = svn.log(&[]).await.unwrap_err();
    assert_eq!(err.diagnostic(), Some("E155007: not a working copy"));
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_node_kind_and_list() {
    let runner = ScriptedRunner::new(|args| match args[0].as_str() {
        "info" => Ok("Path: trunk\nNode Kind: directory\n".to_string()),
        "list" => Ok("branches/\nREADME\n".to_string()),
        other => Err(failure(other)),
    });
    let svn = Svn::with_runner(options("/wc"), runner.clone());

    let kind = svn.node_kind("https://svn.example.com/repo/trunk").await.expect("kind");
    assert_eq!(kind, "directory");

    let entries = svn.list(Some("^/")).await.expect("list");
    assert_eq!(entries.len(), 2);
    assert_eq!(runner.commands(), ["info https://svn.example.com/repo/trunk", "list ^/"]);
}

#[tokio::test]
async fn test_copy_creates_destination_parent() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let runner = ScriptedRunner::new(|_| Ok("A    deep/dir/file.txt\n".to_string()));
    let svn = Svn::with_runner(options(temp.path()), runner.clone());

    let actions = svn
        .copy(&["file.txt".to_string()], "deep/dir/file.txt", &[])
        .await
        .expect("copy");

    assert_eq!(actions.len(), 1);
    assert!(temp.path().join("deep/dir").is_dir());
    assert!(!temp.path().join("deep/dir/file.txt").exists());
    assert_eq!(runner.commands(), ["copy file.txt deep/dir/file.txt"]);
}

// --- choose ---

#[tokio::test]
async fn test_choose_runs_plan_in_order_and_continues_after_info_failure() {
    let runner = ScriptedRunner::new(|args| match args[0].as_str() {
        "info" => Err(failure("E155007: not a working copy")),
        "checkout" => Ok("Checked out revision 9.\n".to_string()),
        _ => Ok("A    a/b/file.txt\n".to_string()),
    });
    let svn = Svn::with_runner(options("/work/wc"), runner.clone());

    let outcome = svn
        .choose("https://svn.example.com/repo/", &["a/b"])
        .settled()
        .await;

    assert_eq!(
        runner.commands(),
        [
            "info",
            "checkout https://svn.example.com/repo wc --depth=empty",
            "update a --depth=empty --accept postpone",
            "update a/b --accept postpone",
        ]
    );
    assert_eq!(outcome, Ok(SvnOutput::Empty));
}

#[tokio::test]
async fn test_choose_reports_terminal_failure() {
    let runner = ScriptedRunner::new(|args| {
        if args.iter().any(|arg| arg == "a/missing") {
            Err(failure("E170000: URL doesn't exist"))
        } else {
            Ok(String::new())
        }
    });
    let svn = Svn::with_runner(options("/work/wc"), runner.clone());

    let outcome = svn
        .choose("https://svn.example.com/repo", &["a/missing"])
        .settled()
        .await;

    assert_eq!(outcome, Err(failure("E170000: URL doesn't exist")));
    assert_eq!(runner.calls().len(), 4);
}

#[tokio::test]
async fn test_choose_without_sub_paths_checks_out_everything() {
    let runner = ScriptedRunner::new(|_| Ok(String::new()));
    let svn = Svn::with_runner(options("/work/wc"), runner.clone());

    let outcome = svn
        .choose::<&str>("https://svn.example.com/repo", &[])
        .settled()
        .await;

    assert_eq!(outcome, Ok(SvnOutput::Empty));
    assert_eq!(
        runner.commands(),
        ["info", "checkout https://svn.example.com/repo wc --depth=infinity"]
    );
}

#[tokio::test]
async fn test_independent_queues_run_concurrently() {
    let runner = ScriptedRunner::new(|_| Ok(String::new()));
    let first = Svn::with_runner(options("/work/one"), runner.clone());
    let second = Svn::with_runner(options("/work/two"), runner.clone());

    let one = first.choose("https://svn.example.com/one", &["x"]);
    let two = second.choose("https://svn.example.com/two", &["y/z"]);
    let (a, b) = tokio::join!(one.settled(), two.settled());

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(runner.calls().len(), 3 + 4);
}

// --- CliRunner ---

#[tokio::test]
async fn test_cli_runner_missing_cwd() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let missing = temp.path().join("gone");
    let command = CommandLine::svn(["info"], &options(&missing));

    let err = CliRunner::new().run(&command, &missing).await.unwrap_err();
    assert!(matches!(err, SvnError::WorkingDirectoryMissing { .. }));
}

#[tokio::test]
async fn test_cli_runner_missing_program() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let options = SvnOptions::builder()
        .with_root(temp.path())
        .with_program("nonexistent_svn_12345")
        .build();
    let command = CommandLine::svn(["info"], &options);

    let err = CliRunner::new().run(&command, temp.path()).await.unwrap_err();
    assert_eq!(
        err,
        SvnError::NotFound {
            program: "nonexistent_svn_12345".to_string()
        }
    );
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_cli_runner_error_stream_fails_with_redacted_command() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let options = SvnOptions::builder()
        .with_root(temp.path())
        .with_program("/bin/sh")
        .with_credentials(Credentials::new("alice", "s3cret"))
        .build();
    // exit code 0, but text on stderr still counts as failure
    let command = CommandLine::svn(["-c", "echo partial; echo boom 1>&2"], &options);

    let err = CliRunner::new().run(&command, temp.path()).await.unwrap_err();
    match err {
        SvnError::ExecutionFailed { command, message } => {
            assert_eq!(message, "boom");
            assert!(command.contains("******"));
            assert!(!command.contains("s3cret"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_open_creates_root_and_checks_tool() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let root = temp.path().join("wc");
    let options = SvnOptions::builder()
        .with_root(&root)
        .with_program("echo")
        .with_non_interactive(false)
        .with_trust_server_cert(false)
        .build();

    let svn = Svn::open(options).await.expect("echo stands in for svn");
    assert!(root.is_dir());
    assert_eq!(svn.version().await.expect("version"), "--version --quiet");
}

#[tokio::test]
async fn test_open_missing_tool_leaves_root_alone() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let root = temp.path().join("wc");
    let options = SvnOptions::builder()
        .with_root(&root)
        .with_program("nonexistent_svn_12345")
        .build();

    let err = Svn::open(options).await.unwrap_err();
    assert_eq!(
        err,
        SvnError::NotFound {
            program: "nonexistent_svn_12345".to_string()
        }
    );
    assert!(!root.exists());
}
