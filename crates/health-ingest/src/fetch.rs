//! Best-effort retrieval of the published source files.
//!
//! A failed download is logged and reported, never raised: the pipeline
//! proceeds with whatever local copy exists and fails later at load time
//! if there is none.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!("health-pipeline/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors from a single download attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for a download.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What happened to one requested file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved { path: PathBuf, bytes: u64 },
    Failed { url: String, reason: String },
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Formats a byte count in human-readable form.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// Downloads `url` into `dest`.
///
/// The body is streamed into a sibling `.part` file which replaces `dest`
/// only once complete, so an interrupted transfer leaves any previous copy
/// intact.
pub fn fetch_to_path(url: &str, dest: &Path, options: &FetchOptions) -> Result<u64, FetchError> {
    tracing::info!(url, dest = %dest.display(), "starting download");

    let http_err = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| FetchError::Io { path, source }
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.clone())
        .build()
        .map_err(http_err)?;
    let mut response = client.get(url).send().map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let part = partial_path(dest);
    let written = {
        let file = File::create(&part).map_err(io_err(&part))?;
        let mut writer = BufWriter::new(file);
        let written = match response.copy_to(&mut writer) {
            Ok(written) => written,
            Err(source) => {
                drop(writer);
                let _ = fs::remove_file(&part);
                return Err(http_err(source));
            }
        };
        writer.flush().map_err(io_err(&part))?;
        written
    };
    fs::rename(&part, dest).map_err(io_err(dest))?;

    tracing::info!(
        dest = %dest.display(),
        size = %format_bytes(written),
        "download complete"
    );
    Ok(written)
}

/// Downloads `url` into `dest`, logging instead of failing.
pub fn download_and_save(url: &str, dest: &Path, options: &FetchOptions) -> FetchOutcome {
    match fetch_to_path(url, dest, options) {
        Ok(bytes) => FetchOutcome::Saved {
            path: dest.to_path_buf(),
            bytes,
        },
        Err(err) => {
            tracing::error!(url, error = %err, "download failed; continuing with local copy");
            FetchOutcome::Failed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread;

    use tempfile::TempDir;

    use super::*;

    /// Serves exactly one request with the given status line and body.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/data.csv")
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(52_428_800), "50.0 MB");
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("data/chronic.csv")),
            PathBuf::from("data/chronic.csv.part")
        );
    }

    #[test]
    fn test_fetch_writes_body() {
        let url = serve_once("200 OK", "Year,State\n2010,Alabama\n");
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested").join("source.csv");

        let outcome = download_and_save(&url, &dest, &FetchOptions::default());

        assert!(outcome.is_saved());
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "Year,State\n2010,Alabama\n"
        );
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_copy() {
        let url = serve_once("404 Not Found", "gone");
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("source.csv");
        fs::write(&dest, "old").unwrap();

        let outcome = download_and_save(&url, &dest, &FetchOptions::default());

        match outcome {
            FetchOutcome::Failed { reason, .. } => assert!(reason.contains("404")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn test_unreachable_host_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("source.csv");
        let options = FetchOptions::default().with_timeout(Duration::from_secs(5));

        let outcome = download_and_save(&format!("http://{addr}/x.csv"), &dest, &options);

        assert!(!outcome.is_saved());
        assert!(!dest.exists());
    }
}
