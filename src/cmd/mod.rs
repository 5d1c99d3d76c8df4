// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), svn (every svn subcommand)
//!   output: text lines or JSON
//! ```

pub mod config;
pub mod output;
pub mod svn;
