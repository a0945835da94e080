//! Mock article source for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Article, ArticleSource, FetchError};

/// Controllable [`ArticleSource`]:
/// - returns the configured hits
/// - records every target it was asked for
/// - fails while `fail` is set
#[derive(Default)]
pub struct MockSource {
    hits: Mutex<Vec<Article>>,
    requests: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(hits: Vec<Article>) -> Self {
        Self {
            hits: Mutex::new(hits),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn query_target(&self, term: &str) -> String {
        format!("mock://search?query={}", urlencoding::encode(term))
    }

    async fn fetch(&self, target: &str) -> Result<Vec<Article>, FetchError> {
        self.requests.lock().unwrap().push(target.to_string());
        if *self.fail.lock().unwrap() {
            return Err(FetchError::Status(500));
        }
        Ok(self.hits.lock().unwrap().clone())
    }
}

/// Shorthand constructor for tests.
pub fn article(id: &str, title: &str, author: &str, comments: u32, points: i64) -> Article {
    Article {
        id: id.to_string(),
        link: format!("https://example.com/{id}"),
        title: title.to_string(),
        author: author.to_string(),
        num_comments: comments,
        points,
        created_at: None,
    }
}
