//! Input location detection and opening

use super::LoadError;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Where an input path points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local filesystem path
    Local(PathBuf),
    /// HTTP/HTTPS URL
    Http(String),
}

impl Source {
    /// Classify an input string
    ///
    /// - `http://` or `https://` -> Http
    /// - Everything else -> Local
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            Source::Http(uri.to_string())
        } else {
            Source::Local(PathBuf::from(uri))
        }
    }

    /// Open the source for reading
    ///
    /// HTTP sources are fetched through `http`.
    pub fn open(&self, http: &HttpClient) -> Result<Box<dyn Read + Send>, LoadError> {
        match self {
            Source::Local(path) => {
                let file = File::open(path).map_err(|source| LoadError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Source::Http(url) => http.fetch(url),
        }
    }
}

/// Blocking HTTP client shared by every fetch of a loader
///
/// The client is built on first use, so runs over local files never start
/// one. `timeout` applies per request; `None` waits indefinitely.
#[derive(Debug, Default)]
pub struct HttpClient {
    timeout: Option<Duration>,
    client: Mutex<Option<reqwest::blocking::Client>>,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            client: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// True once the underlying client has been built
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<reqwest::blocking::Client>> {
        match self.client.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, reqwest::Error> {
        let mut slot = self.lock();
        if let Some(ref client) = *slot {
            return Ok(client.clone());
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    fn fetch(&self, url: &str) -> Result<Box<dyn Read + Send>, LoadError> {
        let http_err = |source: reqwest::Error| LoadError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client().map_err(http_err)?.get(url).send().map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(http_err)?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http() {
        assert_eq!(
            Source::parse("https://example.com/people.csv"),
            Source::Http("https://example.com/people.csv".to_string())
        );
        assert_eq!(
            Source::parse("http://localhost:8000/a.csv"),
            Source::Http("http://localhost:8000/a.csv".to_string())
        );
    }

    #[test]
    fn test_parse_local() {
        assert_eq!(Source::parse("data/a.csv"), Source::Local(PathBuf::from("data/a.csv")));
        // Only the scheme prefix decides
        assert_eq!(Source::parse("httpdata.csv"), Source::Local(PathBuf::from("httpdata.csv")));
    }

    #[test]
    fn test_open_missing_local_file() {
        let source = Source::parse("/definitely/not/here.csv");
        let http = HttpClient::default();
        assert!(matches!(source.open(&http), Err(LoadError::Io { .. })));
        // Local sources never build the HTTP client
        assert!(!http.is_initialized());
    }
}
