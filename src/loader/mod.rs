//! File loader
//!
//! Turns one input path (local file or http(s) URL) into a [`RecordSet`].
//! Every failure is contained here: [`FileLoader::parse`] reports the failed
//! path and hands back `None`, so a bad file never aborts the batch.
//!
//! A file is accepted when it parses as delimited text with a header row and
//! that header carries an `fname` column. Leading whitespace after each
//! delimiter is dropped.

pub mod source;

use crate::config::LoaderConfig;
use crate::dataset::{RecordSet, FIRST_NAME_COLUMN};
use crate::reporter::Reporter;
use source::{HttpClient, Source};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a single input could not be turned into a record set
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request for {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} line {line}: found {found} fields, header has {expected}")]
    TooManyFields {
        path: String,
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: String, column: String },
}

/// Parses input files into record sets
///
/// One loader is shared by every worker; clones share the HTTP client.
#[derive(Debug, Clone)]
pub struct FileLoader {
    delimiter: u8,
    http: Arc<HttpClient>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            http: Arc::new(HttpClient::default()),
        }
    }
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            // Validated as ASCII before a loader is ever built
            delimiter: config.delimiter as u8,
            http: Arc::new(HttpClient::new(config.timeout_secs.map(Duration::from_secs))),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http = Arc::new(HttpClient::new(timeout));
        self
    }

    /// Per-request HTTP timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.http.timeout()
    }

    /// Parse `path`, returning `None` on any failure
    ///
    /// The failed path is reported at info level; the cause at debug level.
    pub fn parse(&self, path: &str, reporter: &dyn Reporter) -> Option<RecordSet> {
        match self.load(path) {
            Ok(set) => Some(set),
            Err(err) => {
                reporter.info(&format!("File failed: {path}"));
                reporter.debug(&err.to_string());
                None
            }
        }
    }

    /// Parse `path`, returning the reason on failure
    pub fn load(&self, path: &str) -> Result<RecordSet, LoadError> {
        let input = Source::parse(path).open(&self.http)?;
        self.read(path, input)
    }

    /// Parse already opened content; `path` only labels the result
    pub fn read<R: Read>(&self, path: &str, input: R) -> Result<RecordSet, LoadError> {
        let csv_err = |source: csv::Error| LoadError::Csv {
            path: path.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim_start().to_string())
            .collect();

        if !columns.iter().any(|c| c == FIRST_NAME_COLUMN) {
            return Err(LoadError::MissingColumn {
                path: path.to_string(),
                column: FIRST_NAME_COLUMN.to_string(),
            });
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            // Short rows leave their trailing columns empty
            if record.len() > columns.len() {
                return Err(LoadError::TooManyFields {
                    path: path.to_string(),
                    line: record.position().map_or(0, |p| p.line()),
                    found: record.len(),
                    expected: columns.len(),
                });
            }
            rows.push(record.iter().map(|f| f.trim_start().to_string()).collect());
        }

        Ok(RecordSet::new(path, columns, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::MemoryReporter;
    use std::io::Write;
    use std::net::TcpListener;
    use tempfile::TempDir;
    use tracing::Level;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Serve a single HTTP response on a loopback port and return its URL
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}/people.csv")
    }

    fn proxy_configured() -> bool {
        ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]
            .iter()
            .any(|var| std::env::var_os(var).is_some())
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname,lname,age\nAda,Lovelace,36\nAlan,Turing,41\n");

        let set = FileLoader::new().load(&path).unwrap();
        assert_eq!(set.columns(), &["fname", "lname", "age"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.source(), path);
    }

    #[test]
    fn test_load_trims_leading_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname, lname, age\nAda, Lovelace, 36\n");

        let set = FileLoader::new().load(&path).unwrap();
        assert_eq!(set.columns(), &["fname", "lname", "age"]);

        let row = set.rows().next().unwrap();
        assert_eq!(row.get("lname"), Some("Lovelace"));
        assert_eq!(row.get("age"), Some("36"));
    }

    #[test]
    fn test_load_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname,lname,age\n");

        let set = FileLoader::new().load(&path).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_missing_fname_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "first,last,age\nAda,Lovelace,36\n");

        let err = FileLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "fname"));
    }

    #[test]
    fn test_load_short_row_is_padded() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname,lname,age\nAnn,Lee,20\nBob,Ray\nCy,Fox,30\n");

        let set = FileLoader::new().load(&path).unwrap();
        assert_eq!(set.len(), 3);

        let short = set.rows().nth(1).unwrap();
        assert_eq!(short.get("lname"), Some("Ray"));
        assert_eq!(short.get("age"), None);
    }

    #[test]
    fn test_load_long_row_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname,lname,age\nAda,Lovelace,36\nAlan,Turing,41,extra\n");

        let err = FileLoader::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooManyFields { line: 3, found: 4, expected: 3, .. }
        ));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "");

        assert!(FileLoader::new().load(&path).is_err());
    }

    #[test]
    fn test_load_with_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.tsv", "fname\tlname\tage\nAda\tLovelace\t36\n");

        let set = FileLoader::new().with_delimiter(b'\t').load(&path).unwrap();
        assert_eq!(set.rows().next().unwrap().get("age"), Some("36"));

        // Same file with the default delimiter has a single "fname\tlname\tage" column
        assert!(FileLoader::new().load(&path).is_err());
    }

    #[test]
    fn test_parse_reports_failure() {
        let reporter = MemoryReporter::new();
        let result = FileLoader::new().parse("/no/such/file.csv", &reporter);

        assert!(result.is_none());
        assert_eq!(reporter.at_level(Level::INFO), vec!["File failed: /no/such/file.csv"]);
        assert_eq!(reporter.at_level(Level::DEBUG).len(), 1);
    }

    #[test]
    fn test_parse_success_is_silent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.csv", "fname,lname,age\nAda,Lovelace,36\n");
        let reporter = MemoryReporter::new();

        assert!(FileLoader::new().parse(&path, &reporter).is_some());
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_load_over_http() {
        if proxy_configured() {
            return;
        }
        let url = serve_once("200 OK", "fname,lname,age\nGrace,Hopper,85\n");

        let set = FileLoader::new().load(&url).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.rows().next().unwrap().get("fname"), Some("Grace"));
    }

    #[test]
    fn test_http_client_is_shared() {
        if proxy_configured() {
            return;
        }
        let loader = FileLoader::new();
        let clone = loader.clone();
        assert!(!loader.http.is_initialized());

        let first = serve_once("200 OK", "fname,lname,age\nGrace,Hopper,85\n");
        let second = serve_once("200 OK", "fname,lname,age\nAlan,Turing,41\n");
        assert!(loader.load(&first).is_ok());
        assert!(clone.load(&second).is_ok());

        assert!(Arc::ptr_eq(&loader.http, &clone.http));
        assert!(clone.http.is_initialized());
    }

    #[test]
    fn test_load_http_error_status() {
        if proxy_configured() {
            return;
        }
        let url = serve_once("404 Not Found", "missing");

        let err = FileLoader::new().load(&url).unwrap_err();
        assert!(matches!(err, LoadError::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn test_from_config() {
        let config = LoaderConfig {
            delimiter: ';',
            timeout_secs: Some(5),
        };
        let loader = FileLoader::from_config(&config);
        assert_eq!(loader.delimiter, b';');
        assert_eq!(loader.timeout(), Some(Duration::from_secs(5)));
    }
}
