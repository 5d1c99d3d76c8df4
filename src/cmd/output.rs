// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text and JSON rendering of parsed records.

use serde::Serialize;

use crate::error::Result;
use crate::parse::{Action, InfoRecord, ListEntry, LogEntry, NodeKind, StatusEntry};

/// Prints `value` as pretty JSON or as the lines produced by `text`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn emit<T, F>(value: &T, json: bool, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> Vec<String>,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        for line in text(value) {
            println!("{line}");
        }
    }
    Ok(())
}

#[must_use]
pub fn format_actions(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .map(|action| format!("{:<8} {}", action.status, action.path))
        .collect()
}

/// `key = value` lines, keys aligned.
#[must_use]
pub fn format_info(info: &InfoRecord) -> Vec<String> {
    let width = info.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    info.iter()
        .map(|(key, value)| format!("{key:<width$} = {value}"))
        .collect()
}

#[must_use]
pub fn format_status(entries: &[StatusEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("{}  {}", entry.status, entry.path))
        .collect()
}

#[must_use]
pub fn format_list(entries: &[ListEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry.kind {
            NodeKind::Directory => format!("{}/", entry.name),
            NodeKind::File => entry.name.clone(),
        })
        .collect()
}

/// One header per revision, then its files and indented message.
#[must_use]
pub fn format_log(entries: &[LogEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        let date = entry.date.map_or_else(
            || "?".to_string(),
            |date| date.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        );
        lines.push(format!("r{} | {} | {}", entry.revision, entry.author, date));
        for file in &entry.files {
            lines.push(format!("  {} {}", file.status, file.path));
        }
        if !entry.message.is_empty() {
            lines.push(String::new());
            lines.extend(entry.message.lines().map(|line| format!("    {line}")));
        }
        lines.push(String::new());
    }
    lines
}
