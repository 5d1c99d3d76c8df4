// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              text / JSON output
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, SVNQ_* env, --set  |
//!              '-------------+-------------'
//!                            v
//!                 svn  (client, choose)
//!                  |         |        |
//!                  v         v        v
//!               queue      parse   ProcessRunner
//!             Deferred,   reports   CommandLine
//!           CommandQueue
//!
//!   +-----------------------------------------+
//!   |  core   process builder/runner (tokio)  |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod parse;
pub mod queue;
pub mod svn;
