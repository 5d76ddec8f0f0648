use crate::error::Result;
use async_trait::async_trait;

/// Fetch capability used by the batch driver and the image archive.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url`; non-2xx responses are errors.
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
}

/// Receives fractional batch progress in `[0, 1]` after each processed URL.
pub trait Progress {
    fn update(&mut self, fraction: f64);
}

impl<F: FnMut(f64)> Progress for F {
    fn update(&mut self, fraction: f64) {
        self(fraction)
    }
}
