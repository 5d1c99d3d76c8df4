// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `svn log -v` parsing.
//!
//! ```text
//! ------------------------------------------------------------------------
//! r5 | alice | 2020-01-02 10:00:00 +0000 (Thu, 02 Jan 2020) | 1 line    header
//! Changed paths:                                                         skipped
//!    M /trunk/src/a.js                                                   changes
//!                                                                        blank
//! Fix the thing                                                          message
//! ------------------------------------------------------------------------
//! ```
//!
//! The text is split on every `--`, so a separator line yields a run of
//! empty segments which are skipped. Entries whose message contains `--`
//! are split as well.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;

use super::InfoRecord;

/// One changed path of a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedPath {
    pub path: String,
    pub status: char,
}

/// One revision of `svn log -v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Revision number without the leading `r`.
    pub revision: String,
    pub author: String,
    /// `None` when the tool's date text could not be understood.
    pub date: Option<DateTime<FixedOffset>>,
    /// Changes below the working copy, relative to its URL.
    pub files: Vec<ChangedPath>,
    /// Every change, with repository-absolute paths.
    pub changes: Vec<ChangedPath>,
    pub message: String,
    /// Working copy info used to compute `files`.
    pub info: InfoRecord,
}

/// Parses `svn log -v` output into entries, oldest-to-newest as printed.
///
/// `info` must describe the working copy the log was taken from; its
/// `relativeurl` decides which changes end up in [`LogEntry::files`].
#[must_use]
pub fn parse_log(text: &str, info: &InfoRecord) -> Vec<LogEntry> {
    let text = text.replace("\r\n", "\n");
    text.split("--")
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| parse_log_entry(segment, info))
        .collect()
}

/// Parses one log segment. Returns `None` when the segment has no header.
#[must_use]
pub fn parse_log_entry(segment: &str, info: &InfoRecord) -> Option<LogEntry> {
    let lines: Vec<&str> = segment.split('\n').collect();
    let mut i = lines.iter().position(|line| !line.trim().is_empty())?;

    let header: Vec<&str> = lines[i].split('|').map(str::trim).collect();
    let revision = header[0].strip_prefix('r').unwrap_or(header[0]);
    let author = header.get(1).copied().unwrap_or_default();
    let date = header.get(2).and_then(|text| parse_date(text));

    let relative_url = info.relative_url().unwrap_or_default().replacen('^', "", 1);
    let mut files = Vec::new();
    let mut changes = Vec::new();

    // header, then the "Changed paths:" line
    i += 2;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            break;
        }
        i += 1;

        let mut tokens = line.split_whitespace();
        let (Some(status), Some(path)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let Some(status) = status.chars().next() else {
            continue;
        };
        if path.contains(relative_url.as_str()) {
            files.push(ChangedPath {
                path: path.replacen(relative_url.as_str(), "", 1),
                status,
            });
        }
        changes.push(ChangedPath {
            path: path.to_string(),
            status,
        });
    }

    // body sits between the blank line after the changes and the final line
    let start = i + 1;
    let end = lines.len().saturating_sub(1);
    let message = if start < end {
        lines[start..end].join("\n")
    } else {
        String::new()
    };

    Some(LogEntry {
        revision: revision.to_string(),
        author: author.to_string(),
        date,
        files,
        changes,
        message,
        info: info.clone(),
    })
}

/// Parses svn's log date, e.g. `2020-01-02 10:00:00 +0800 (Thu, 02 Jan 2020)`.
///
/// The parenthesised human-readable part is locale dependent and ignored.
/// A date without an offset is taken as UTC.
fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.split_once(" (").map_or(text, |(date, _)| date).trim();
    DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
}
