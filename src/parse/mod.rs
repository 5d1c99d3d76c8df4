// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structured parsing of svn's human-readable reports.
//!
//! ```text
//! add/checkout/update/copy --> parse_actions --> Vec<Action>
//! info                     --> parse_info    --> InfoRecord
//! status                   --> parse_status  --> Vec<StatusEntry>
//! log -v                   --> parse_log     --> Vec<LogEntry>
//!                                 |
//!                                 +--> parse_log_entry (per "--" segment)
//! list                     --> parse_list    --> Vec<ListEntry>
//! ```
//!
//! All parsers are pure and total: unparseable lines are skipped, never
//! reported as errors. `\r\n` line endings are accepted everywhere.

mod log;


pub use log::{ChangedPath, LogEntry, parse_log, parse_log_entry};

use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// One action line: optional indent, status token, whitespace, path token.
static ACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([ADUCGE]|Restored)\s+(\S+)").expect("action line pattern is valid")
});

/// Splits text into lines, accepting both `\n` and `\r\n`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

// --- Actions ---

/// Status letter reported by add/checkout/update/copy/switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    Added,
    Deleted,
    Updated,
    Conflict,
    Merged,
    Exists,
    Restored,
}

impl ActionStatus {
    /// Parses the status token exactly as svn prints it.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Self::Added),
            "D" => Some(Self::Deleted),
            "U" => Some(Self::Updated),
            "C" => Some(Self::Conflict),
            "G" => Some(Self::Merged),
            "E" => Some(Self::Exists),
            "Restored" => Some(Self::Restored),
            _ => None,
        }
    }

    /// The token svn uses for this status.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Added => "A",
            Self::Deleted => "D",
            Self::Updated => "U",
            Self::Conflict => "C",
            Self::Merged => "G",
            Self::Exists => "E",
            Self::Restored => "Restored",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl Serialize for ActionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

/// A single file action reported by the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub status: ActionStatus,
    pub path: String,
}

/// Parses action-report output (add, checkout, update, copy, switch).
///
/// Lines that don't start with a known status token are dropped.
/// Surrounding quotes are stripped from paths (`Restored 'a.txt'`).
#[must_use]
pub fn parse_actions(text: &str) -> Vec<Action> {
    lines(text)
        .filter_map(|line| {
            let caps = ACTION_LINE.captures(line)?;
            let status = ActionStatus::from_token(caps.get(1)?.as_str())?;
            let path = caps.get(2)?.as_str().trim_matches(['\'', '"']);
            if path.is_empty() {
                return None;
            }
            Some(Action {
                status,
                path: path.to_string(),
            })
        })
        .collect()
}

// --- Info ---

/// Key/value block printed by `svn info`.
///
/// Keys are lower-cased with all whitespace removed (`Relative URL` becomes
/// `relativeurl`). When a key repeats, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InfoRecord(BTreeMap<String, String>);

impl InfoRecord {
    /// Returns the value for a normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Inserts a value, normalizing the key the same way the parser does.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(normalize_key(key), value.into());
    }

    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.get("revision")
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.get("url")
    }

    /// Repository-relative URL, e.g. `^/trunk`.
    #[must_use]
    pub fn relative_url(&self) -> Option<&str> {
        self.get("relativeurl")
    }

    /// `file` or `directory` for versioned nodes.
    #[must_use]
    pub fn node_kind(&self) -> Option<&str> {
        self.get("nodekind")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses `svn info` output.
///
/// Every line is split on its first colon. Lines without a colon are skipped.
#[must_use]
pub fn parse_info(text: &str) -> InfoRecord {
    let mut record = InfoRecord::default();
    for line in lines(text) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        record.0.insert(normalize_key(key), value.trim().to_string());
    }
    record
}

// --- Status ---

/// One line of `svn status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Character in column 0 (`M`, `A`, `?`, ...).
    pub status: char,
    pub path: String,
}

/// Parses `svn status` output.
///
/// Lines whose trimmed length is one character or less are dropped.
#[must_use]
pub fn parse_status(text: &str) -> Vec<StatusEntry> {
    lines(text)
        .filter(|line| line.trim().chars().count() > 1)
        .filter_map(|line| {
            let mut chars = line.chars();
            let status = chars.next()?;
            Some(StatusEntry {
                status,
                path: chars.as_str().trim().to_string(),
            })
        })
        .collect()
}

// --- List ---

/// Kind of an entry returned by `svn list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.pad("file"),
            Self::Directory => f.pad("directory"),
        }
    }
}

/// One entry of `svn list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub kind: NodeKind,
}

/// Parses `svn list` output. A trailing `/` marks a directory.
#[must_use]
pub fn parse_list(text: &str) -> Vec<ListEntry> {
    lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_suffix('/') {
            Some(name) => ListEntry {
                name: name.to_string(),
                kind: NodeKind::Directory,
            },
            None => ListEntry {
                name: line.to_string(),
                kind: NodeKind::File,
            },
        })
        .collect()
}
