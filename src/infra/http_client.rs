use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// reqwest-backed fetcher with a per-request deadline and a linear-backoff retry budget.
pub struct ReqwestHttp {
    client: reqwest::Client,
    config: HttpConfig,
}

impl ReqwestHttp {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_once(&self, url: &str) -> Result<HttpGetResult> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await?.to_vec();
        Ok(HttpGetResult {
            status: status.as_u16(),
            bytes,
        })
    }
}

/// Client errors other than 408/429 will not change on retry.
fn is_retryable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Status { status, .. } => {
            *status >= 500 || *status == 408 || *status == 429
        }
        ScraperError::Http(e) => !e.is_builder(),
        _ => false,
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    #[instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok(result) => {
                    debug!(status = result.status, bytes = result.bytes.len(), "fetched");
                    return Ok(result);
                }
                Err(e) if attempt < self.config.retries && is_retryable(&e) => {
                    attempt += 1;
                    warn!("Attempt {} failed: {}; retrying", attempt, e);
                    tokio::time::sleep(self.config.backoff(attempt)).await;
                }
                Err(e) if attempt > 0 => {
                    return Err(ScraperError::Fetch {
                        url: url.to_string(),
                        message: format!("gave up after {} attempts: {}", attempt + 1, e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one response per connection with the given statuses, repeating the
    /// last one. Returns the base URL and a count of requests seen.
    async fn serve(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let n = seen.fetch_add(1, Ordering::SeqCst);
                let status = statuses[n.min(statuses.len() - 1)];
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }
                let body = format!("status {status}");
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}/listing"), hits)
    }

    fn client(retries: u32) -> ReqwestHttp {
        ReqwestHttp::new(HttpConfig {
            timeout_secs: 5,
            retries,
            retry_backoff_ms: 1,
            ..HttpConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn retries_a_server_error_then_succeeds() {
        let (url, hits) = serve(vec![503, 200]).await;
        let result = client(1).get(&url).await.unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(result.bytes, b"status 200");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausted_budget_is_a_fetch_error() {
        let (url, hits) = serve(vec![503]).await;
        let err = client(2).get(&url).await.unwrap_err();
        match err {
            ScraperError::Fetch { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("3 attempts"), "{message}");
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let (url, hits) = serve(vec![404, 200]).await;
        let err = client(2).get(&url).await.unwrap_err();
        assert!(matches!(err, ScraperError::Status { status: 404, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = ScraperError::Status { url: "u".into(), status: 503 };
        assert!(is_retryable(&err));
        let err = ScraperError::Status { url: "u".into(), status: 429 };
        assert!(is_retryable(&err));
    }

    #[test]
    fn not_found_is_final() {
        let err = ScraperError::Status { url: "u".into(), status: 404 };
        assert!(!is_retryable(&err));
    }

    #[test]
    fn builds_with_default_config() {
        assert!(ReqwestHttp::new(HttpConfig::default()).is_ok());
    }
}
