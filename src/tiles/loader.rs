//! Tile byte fetching.
//!
//! A fetch is a single GET with no retry, timeout or cancellation: a request
//! that never completes simply never resolves.

use async_trait::async_trait;

use crate::{core::constants::USER_AGENT, MapError, Result};

/// Something that can download the encoded bytes of a tile.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    /// Fetch the body at `url`. Non-success statuses are errors; an empty
    /// body is returned as-is and judged by the caller.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Async HTTP fetcher built on a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .pool_max_idle_per_host(16)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the rest of the host
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TileFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        log::debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve a single canned HTTP response on a loopback port.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let header = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status_line,
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(body);
            }
        });
        format!("http://{}/tile/1/0/0", addr)
    }

    #[tokio::test]
    async fn test_http_fetcher_returns_body() {
        let url = serve_once("200 OK", b"\xff\xd8tile");
        let bytes = HttpFetcher::new().unwrap().fetch(&url).await.unwrap();
        assert_eq!(bytes, b"\xff\xd8tile");
    }

    #[tokio::test]
    async fn test_http_fetcher_passes_empty_body_through() {
        let url = serve_once("200 OK", b"");
        let bytes = HttpFetcher::new().unwrap().fetch(&url).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_status() {
        let url = serve_once("404 Not Found", b"");
        let err = HttpFetcher::new().unwrap().fetch(&url).await.unwrap_err();
        match err {
            MapError::HttpStatus { status, url: failed } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
