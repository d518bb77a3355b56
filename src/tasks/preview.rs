//! Static report preview server
//!
//! Serves the generated HTML report directory over HTTP so it can be viewed
//! in a browser without any external tooling. A blocking accept loop handles
//! one GET request per connection; the process runs until interrupted.
//!
//! Bind address comes from `REPORT_HOST`/`REPORT_PORT`, defaulting to
//! `127.0.0.1:8000`.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

/// Default bind host for the preview server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for the preview server
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable overriding the bind host
pub const HOST_ENV: &str = "REPORT_HOST";

/// Environment variable overriding the bind port
pub const PORT_ENV: &str = "REPORT_PORT";

/// Resolved bind configuration for the preview server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    pub host: String,
    pub port: u16,
}

impl PreviewConfig {
    /// Resolve host and port from the environment, falling back to defaults
    pub fn from_env() -> ExpenseResult<Self> {
        let host = std::env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match std::env::var(PORT_ENV) {
            Ok(raw) => raw.parse().map_err(|_| {
                ExpenseError::Config(format!("Invalid {}: '{}'", PORT_ENV, raw))
            })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Serves files from a report directory over HTTP
#[derive(Debug)]
pub struct PreviewServer {
    listener: TcpListener,
    root: PathBuf,
}

impl PreviewServer {
    /// Bind the listener; port 0 picks an ephemeral port
    pub fn bind(config: &PreviewConfig, root: PathBuf) -> ExpenseResult<Self> {
        if !root.is_dir() {
            return Err(ExpenseError::Report(format!(
                "Report directory not found: {}",
                root.display()
            )));
        }

        let listener = TcpListener::bind((config.host.as_str(), config.port)).map_err(|e| {
            ExpenseError::Server(format!(
                "Failed to bind {}:{}: {}",
                config.host, config.port, e
            ))
        })?;

        Ok(Self { listener, root })
    }

    /// The address the server is actually bound to
    pub fn local_addr(&self) -> ExpenseResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| ExpenseError::Server(format!("Failed to read local address: {}", e)))
    }

    /// Accept and serve connections until the process is interrupted
    pub fn serve_forever(self) -> ExpenseResult<()> {
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    // One bad client must not take the preview down
                    if let Err(e) = handle_connection(stream, &self.root) {
                        eprintln!("preview: connection error: {}", e);
                    }
                }
                Err(e) => eprintln!("preview: accept error: {}", e),
            }
        }
        Ok(())
    }
}

/// Serve a single request on an accepted connection
fn handle_connection(stream: TcpStream, root: &Path) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain headers; responses always close the connection
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let mut stream = reader.into_inner();

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");

    if method != "GET" {
        return respond(
            &mut stream,
            "405 Method Not Allowed",
            "text/plain",
            b"method not allowed",
        );
    }

    match resolve_path(root, target) {
        Some(path) if path.is_file() => {
            let body = fs::read(&path)?;
            respond(&mut stream, "200 OK", content_type(&path), &body)
        }
        _ => respond(&mut stream, "404 Not Found", "text/plain", b"not found"),
    }
}

/// Map a request target to a file under the report root
///
/// `/` maps to `index.html`; any path component that would escape the root
/// is rejected.
fn resolve_path(root: &Path, target: &str) -> Option<PathBuf> {
    // Strip query string
    let path = target.split(['?', '#']).next().unwrap_or("");

    let relative = path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    let candidate = PathBuf::from(relative);
    for component in candidate.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }

    let resolved = root.join(candidate);
    if resolved.is_dir() {
        Some(resolved.join("index.html"))
    } else {
        Some(resolved)
    }
}

/// Guess a content type from the file extension
fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn respond(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    body: &[u8],
) -> std::io::Result<()> {
    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    )?;
    stream.write_all(body)?;
    stream.flush()
}
