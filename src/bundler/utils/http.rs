//! HTTP utilities for downloading bundler tools.
//!
//! Downloads are buffered whole in memory while a SHA-256 digest is
//! accumulated over the same bytes, so the caller can verify the payload
//! before anything touches disk.

use crate::bundler::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::future::Future;

/// Accumulates a response body and its SHA-256 digest chunk by chunk.
#[derive(Default)]
pub struct DigestBuffer {
    hasher: Sha256,
    body: Vec<u8>,
}

impl DigestBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk into both the digest and the buffer.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.body.extend_from_slice(chunk);
    }

    /// Number of bytes received so far.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Consumes the buffer, returning the body and its lowercase hex digest.
    pub fn finish(self) -> (Vec<u8>, String) {
        (self.body, hex::encode(self.hasher.finalize()))
    }
}

/// Transport used to fetch toolset archives.
///
/// Implementations must fail on transport errors and on any status other
/// than 200, and must not retry.
pub trait Fetch {
    /// Streams the body served at `url` into `sink`.
    fn fetch(&self, url: &str, sink: &mut DigestBuffer) -> impl Future<Output = Result<()>> + Send;
}

/// [`Fetch`] implementation backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default client configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, sink: &mut DigestBuffer) -> impl Future<Output = Result<()>> + Send {
        async move {
            log::debug!("GET {}", url);

            let mut response = self.client.get(url).send().await?;

            let status = response.status();
            if status != reqwest::StatusCode::OK {
                return Err(Error::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            while let Some(chunk) = response.chunk().await? {
                sink.update(&chunk);
            }

            log::debug!("Received {} bytes from {}", sink.len(), url);
            Ok(())
        }
    }
}
