// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::which("svn")
//!   .args() .cwd() .capture_output()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr concurrently
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
