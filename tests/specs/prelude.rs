//! Shared helpers for CLI specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment never leaks in
const CLEARED_ENV: &[&str] = &[
    "FLOWISE_BASE_URL",
    "FLOWISE_API_KEY",
    "STATUS_CHECK_INTERVAL",
    "MAX_REFRESH_TIMEOUT",
    "MAX_POLL_FAILURES",
    "DEBUG",
    "RUST_LOG",
];

/// A scratch working directory for one CLI run
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// The dsr binary, run inside this project with a clean environment
    pub fn dsr(&self) -> Cli {
        let mut cmd = Command::cargo_bin("dsr").unwrap();
        cmd.current_dir(self.path());
        for key in CLEARED_ENV {
            cmd.env_remove(key);
        }
        Cli { cmd }
    }

    /// The dsr binary configured against `server`
    pub fn dsr_against(&self, server: &FlowiseStub) -> Cli {
        self.dsr()
            .env("FLOWISE_BASE_URL", &server.base_url)
            .env("FLOWISE_API_KEY", "spec-key")
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Run and expect exit code 0
    pub fn passes(mut self) -> Outcome {
        Outcome(self.cmd.assert().success())
    }

    /// Run and expect a non-zero exit code
    pub fn fails(mut self) -> Outcome {
        Outcome(self.cmd.assert().failure())
    }

    /// Run and expect a specific exit code
    pub fn exits(mut self, code: i32) -> Outcome {
        Outcome(self.cmd.assert().code(code))
    }
}

pub struct Outcome(Assert);

impl Outcome {
    pub fn stdout_has(self, expected: &str) -> Self {
        Outcome(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Outcome(self.0.stdout(predicate::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Outcome(self.0.stderr(predicate::str::contains(expected)))
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }
}

/// A request the stub received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

type Handler = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

/// Minimal stand-in for a Flowise server. Every connection is answered by
/// `handler(method, path)` and closed.
pub struct FlowiseStub {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FlowiseStub {
    pub fn start(handler: impl Fn(&str, &str) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_server = Arc::clone(&seen);
        let handler: Arc<Handler> = Arc::new(handler);

        // Detached: the thread dies with the test process
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let request = read_request(&stream);
                let (status, body) = handler(&request.method, &request.path);
                seen_by_server.lock().unwrap().push(request);

                let mut stream = stream;
                let _ = write!(
                    stream,
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.flush();
            }
        });

        Self { base_url, seen }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn read_request(stream: &std::net::TcpStream) -> Seen {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "authorization" => authorization = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    Seen {
        method,
        path,
        authorization,
    }
}

/// JSON for one store as the Flowise API returns it
pub fn store_json(id: &str, name: &str, status: &str, chunks: u64) -> String {
    format!(
        r#"{{"id":"{}","name":"{}","status":"{}","totalChunks":{},"totalChars":0,"loaders":[]}}"#,
        id, name, status, chunks
    )
}
