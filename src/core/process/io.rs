// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Draining stdout and stderr.
//!
//! Both pipes are read on their own tasks while the child runs, otherwise
//! a full stderr pipe would stall a child that is still writing stdout.
//! Lines are decoded lossily and lose their `\n` / `\r\n` terminator.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

impl ProcessBuilder {
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
    ) -> Result<ProcessOutput, ProcessError> {
        let stdout = Drain::start(child.stdout.take(), self.stdout, name, "stdout");
        let stderr = Drain::start(child.stderr.take(), self.stderr, name, "stderr");

        let status = child.wait().await.map_err(|source| ProcessError::Io {
            command: name.to_string(),
            source,
        })?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            stdout.finish(name).await,
            stderr.finish(name).await,
        ))
    }
}

/// Reader task for one piped stream.
struct Drain(Option<JoinHandle<String>>);

impl Drain {
    fn start<R>(
        stream: Option<R>,
        flags: StreamFlags,
        process: &str,
        stream_name: &'static str,
    ) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let process = process.to_string();
        Self(stream.map(|stream| {
            tokio::spawn(async move { read_lines(stream, flags, &process, stream_name).await })
        }))
    }

    async fn finish(self, process: &str) -> String {
        let Some(handle) = self.0 else {
            return String::new();
        };
        handle.await.unwrap_or_else(|e| {
            warn!(process, error = %e, "output reader task failed");
            String::new()
        })
    }
}

async fn read_lines<R>(stream: R, flags: StreamFlags, process: &str, stream_name: &str) -> String
where
    R: AsyncRead + Unpin,
{
    let keep = flags.contains(StreamFlags::KEEP_IN_STRING);
    let forward = flags.contains(StreamFlags::FORWARD_TO_LOG);

    let mut reader = BufReader::new(stream);
    let mut kept: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\n', '\r']);
                if forward {
                    trace!(process, stream = stream_name, line, "output");
                }
                if keep {
                    kept.push(line.to_string());
                }
            }
            Err(e) => {
                warn!(process, stream = stream_name, error = %e, "stream read failed");
                break;
            }
        }
    }

    kept.join("\n")
}
