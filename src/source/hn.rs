//! Hacker News (Algolia) search source.
//!
//! Queries `GET <prefix><url-encoded term>` and reads the `hits` array of the
//! JSON response into [`Article`]s.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Article, ArticleSource, FetchError};

/// Public Algolia endpoint for Hacker News stories.
pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

/// Response envelope; everything except `hits` is ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Article>,
}

/// A Hacker News search source.
pub struct HnSource {
    client: Client,
    /// Everything before the search term, e.g. [`DEFAULT_ENDPOINT`].
    prefix: String,
}

impl HnSource {
    /// Create a new source.
    ///
    /// # Arguments
    ///
    /// * `prefix` — the endpoint the encoded term is appended to.
    /// * `timeout` — per-request timeout handed to the HTTP client.
    pub fn new(prefix: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            prefix: prefix.into(),
        })
    }

    /// Parse a response body into articles.
    ///
    /// Pure function (no I/O) so tests can exercise decoding without the
    /// network.
    pub fn parse_response(body: &str) -> Result<Vec<Article>, FetchError> {
        serde_json::from_str::<SearchResponse>(body)
            .map(|response| response.hits)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ArticleSource for HnSource {
    fn name(&self) -> &str {
        "Hacker News"
    }

    fn query_target(&self, term: &str) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(term))
    }

    async fn fetch(&self, target: &str) -> Result<Vec<Article>, FetchError> {
        debug!(url = target, "requesting search results");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::parse_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"{
        "hits": [
            {"objectID": "1", "url": "https://a.example", "title": "A", "author": "X", "num_comments": 2, "points": 5},
            {"objectID": "2", "url": null, "title": "B", "author": "Y", "num_comments": 1, "points": 9}
        ],
        "nbHits": 2,
        "page": 0
    }"#;

    /// Serve exactly one canned HTTP response on a loopback port and return
    /// the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/api/v1/search?query=")
    }

    fn source(prefix: &str) -> HnSource {
        HnSource::new(prefix, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn parse_response_extracts_hits_in_order() {
        let items = HnSource::parse_response(BODY).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].link, "https://a.example");
        assert_eq!(items[1].id, "2");
        assert_eq!(items[1].link, "", "null url becomes empty link");
        assert_eq!(items[1].points, 9);
    }

    #[test]
    fn parse_response_rejects_missing_hits() {
        let err = HnSource::parse_response(r#"{"nbHits": 0}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn parse_response_rejects_garbage() {
        let err = HnSource::parse_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn query_target_encodes_term() {
        let src = source(DEFAULT_ENDPOINT);
        assert_eq!(
            src.query_target("React"),
            "https://hn.algolia.com/api/v1/search?query=React"
        );
        assert_eq!(
            src.query_target("rust & go"),
            "https://hn.algolia.com/api/v1/search?query=rust%20%26%20go"
        );
        assert_eq!(src.query_target(""), DEFAULT_ENDPOINT);
    }

    #[test]
    fn name_is_stable() {
        assert_eq!(source(DEFAULT_ENDPOINT).name(), "Hacker News");
    }

    #[tokio::test]
    async fn fetch_returns_hits_on_success() {
        let prefix = serve_once("200 OK", BODY).await;
        let src = source(&prefix);

        let items = src.fetch(&src.query_target("React")).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
    }

    #[tokio::test]
    async fn fetch_reports_non_success_status() {
        let prefix = serve_once("503 Service Unavailable", "{}").await;
        let src = source(&prefix);

        let err = src.fetch(&src.query_target("React")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn fetch_reports_decode_failure() {
        let prefix = serve_once("200 OK", "not json").await;
        let src = source(&prefix);

        let err = src.fetch(&src.query_target("React")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_reports_transport_failure() {
        // Bind then drop to get a port nothing is listening on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let src = source(&format!("http://{addr}/?query="));

        let err = src.fetch(&src.query_target("x")).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
