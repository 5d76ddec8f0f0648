use async_trait::async_trait;
use equipment_scraper::app::ports::{HttpClientPort, HttpGetResult};
use equipment_scraper::error::{Result, ScraperError};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory fetcher: unknown URLs answer 404.
#[derive(Default)]
pub struct FakeHttp {
    pages: HashMap<String, Vec<u8>>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClientPort for FakeHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(bytes) => Ok(HttpGetResult {
                status: 200,
                bytes: bytes.clone(),
            }),
            None => Err(ScraperError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn og_page(description: &str, image: Option<&str>) -> String {
    let image = image
        .map(|i| format!(r#"<meta property="og:image" content="{i}">"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><meta property="og:description" content="{description}">{image}</head><body></body></html>"#
    )
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
