use crate::foundation::error::SvgaResult;

/// Network collaborator: delivers the raw bytes behind a URL.
pub trait ByteFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> SvgaResult<Vec<u8>>;
}

#[cfg(feature = "http")]
pub use client::HttpFetcher;

#[cfg(feature = "http")]
mod client {
    use super::ByteFetcher;
    use crate::foundation::error::{SvgaError, SvgaResult};

    /// Blocking HTTP(S) fetcher. Non-2xx responses are reported as unavailable sources.
    #[derive(Clone, Debug)]
    pub struct HttpFetcher {
        client: reqwest::blocking::Client,
    }

    impl HttpFetcher {
        pub fn new() -> SvgaResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .user_agent(concat!("svga-player/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| SvgaError::unavailable(format!("http client: {e}")))?;
            Ok(Self { client })
        }

        pub fn with_client(client: reqwest::blocking::Client) -> Self {
            Self { client }
        }
    }

    impl ByteFetcher for HttpFetcher {
        #[tracing::instrument(skip(self))]
        fn fetch(&self, url: &str) -> SvgaResult<Vec<u8>> {
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| SvgaError::unavailable(format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SvgaError::unavailable(format!("HTTP status {status}")));
            }

            let bytes = response
                .bytes()
                .map_err(|e| SvgaError::unavailable(format!("read body: {e}")))?;
            tracing::debug!(len = bytes.len(), "fetched");
            Ok(bytes.to_vec())
        }
    }
}
