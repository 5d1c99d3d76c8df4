// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis`.

use crate::config::Config;

/// Prints every option as `key = value`; the password stays hidden.
pub fn run_options_command(config: &Config) {
    config.format_options().iter().for_each(|line| println!("{line}"));
}

/// Prints the configuration sources in load order.
pub fn run_inis_command(sources: &[String]) {
    if sources.is_empty() {
        println!("no configuration files loaded, using defaults");
        return;
    }
    sources.iter().for_each(|line| println!("{line}"));
}
