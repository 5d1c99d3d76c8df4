// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line construction and credential redaction.
//!
//! ```text
//! CommandLine::svn(["update", "a"], &options)
//!   svn update a --non-interactive --trust-server-cert --username U --password P
//!   Display: svn update a --non-interactive --trust-server-cert --username U --password ******
//! ```
//!
//! Formatting is the only way a command line reaches a log, and it always
//! masks the password.

use std::fmt;
use std::path::PathBuf;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Stands in for a password in every printed form.
pub(crate) const MASK: &str = "******";

/// Username and password passed to every invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &MASK)
            .finish()
    }
}

/// Settings shared by every invocation of one client.
#[derive(Debug, Clone, Builder)]
pub struct SvnOptions {
    /// Working copy root; relative targets are joined onto it.
    #[builder(setters(name = with_root), into)]
    root: PathBuf,
    #[builder(setters(name = with_program), into, default = "svn".to_string())]
    program: String,
    #[builder(setters(name = with_credentials))]
    credentials: Option<Credentials>,
    #[builder(setters(name = with_non_interactive), default = true)]
    non_interactive: bool,
    #[builder(setters(name = with_trust_server_cert), default = true)]
    trust_server_cert: bool,
}

impl SvnOptions {
    #[must_use]
    pub const fn root(&self) -> &PathBuf {
        &self.root
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Checkout/update depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// The target only, no children.
    Empty,
    /// The target and its file children.
    Files,
    /// The target and its immediate children, directories left empty.
    Immediates,
    /// Everything below the target.
    Infinity,
}

impl Depth {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Files => "files",
            Self::Immediates => "immediates",
            Self::Infinity => "infinity",
        }
    }

    /// The `--depth=<name>` argument.
    #[must_use]
    pub fn to_arg(self) -> String {
        format!("--depth={}", self.as_str())
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "files" => Ok(Self::Files),
            "immediates" => Ok(Self::Immediates),
            "infinity" => Ok(Self::Infinity),
            other => Err(format!(
                "unknown depth '{other}' (expected empty, files, immediates or infinity)"
            )),
        }
    }
}

/// A fully built command line.
///
/// `Display` and `Debug` print the redacted form.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    secret: Option<String>,
}

impl CommandLine {
    /// Builds an svn command line with the client's fixed flags and
    /// credentials appended after `args`.
    pub fn svn<I, S>(args: I, options: &SvnOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();

        if options.non_interactive {
            args.push("--non-interactive".to_string());
        }
        if options.trust_server_cert {
            args.push("--trust-server-cert".to_string());
        }

        let mut secret = None;
        if let Some(credentials) = &options.credentials {
            args.push("--username".to_string());
            args.push(credentials.username.clone());
            args.push("--password".to_string());
            args.push(credentials.password.clone());
            if !credentials.password.is_empty() {
                secret = Some(credentials.password.clone());
            }
        }

        Self {
            program: options.program.clone(),
            args,
            secret,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Unredacted arguments, for handing to the process layer only.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn redact<'a>(&self, arg: &'a str) -> std::borrow::Cow<'a, str> {
        match self.secret.as_deref() {
            Some(secret) if arg == secret => MASK.into(),
            Some(secret) if arg.contains(secret) => arg.replace(secret, MASK).into(),
            _ => arg.into(),
        }
    }

    /// Redacted arguments.
    #[must_use]
    pub fn redacted_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| self.redact(arg).into_owned())
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = self.redact(arg);
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("program", &self.program)
            .field("args", &self.redacted_args())
            .finish()
    }
}
