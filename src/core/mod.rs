// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!      core
//!       |
//!       v
//!    process
//!       |
//!   Builder, Output
//!   (tokio::process)
//! ```

pub mod process;
