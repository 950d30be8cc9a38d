use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Source of encoded bytes for remote descriptors.
///
/// Called on a loader thread; implementations may block.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, LoadError> + Send + Sync,
{
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        self(uri)
    }
}

/// Map a non-2xx HTTP status to a load error.
pub fn status_error(uri: &str, status: u16) -> Option<LoadError> {
    if (200..300).contains(&status) {
        None
    } else {
        Some(LoadError::HttpStatus {
            uri: uri.to_string(),
            status,
        })
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use std::io::Read;
    use std::time::Duration;

    use tracing::debug;

    use super::{status_error, Fetcher};
    use crate::config::LoaderConfig;
    use crate::consts::USER_AGENT;
    use crate::error::LoadError;

    /// Plain HTTP(S) GET fetcher.
    pub struct HttpFetcher {
        agent: ureq::Agent,
        max_bytes: u64,
    }

    impl HttpFetcher {
        pub fn new(config: &LoaderConfig) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(USER_AGENT)
                .build();
            Self {
                agent,
                max_bytes: config.max_fetch_bytes,
            }
        }
    }

    impl Fetcher for HttpFetcher {
        fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
            let network = |reason: String| LoadError::NetworkFailure {
                uri: uri.to_string(),
                reason,
            };

            let response = match self.agent.get(uri).call() {
                Ok(r) => r,
                Err(ureq::Error::Status(status, _)) => {
                    return Err(LoadError::HttpStatus {
                        uri: uri.to_string(),
                        status,
                    })
                }
                Err(ureq::Error::Transport(t)) => return Err(network(t.to_string())),
            };

            if let Some(err) = status_error(uri, response.status()) {
                return Err(err);
            }

            let mut body = Vec::new();
            response
                .into_reader()
                .take(self.max_bytes + 1)
                .read_to_end(&mut body)
                .map_err(|e| network(e.to_string()))?;

            if body.len() as u64 > self.max_bytes {
                return Err(network(format!(
                    "response exceeds {} bytes",
                    self.max_bytes
                )));
            }

            debug!(uri, bytes = body.len(), "Fetched remote image");
            Ok(body)
        }
    }
}

/// Fetcher used when HTTP support is compiled out.
#[cfg(not(feature = "http"))]
pub struct OfflineFetcher;

#[cfg(not(feature = "http"))]
impl Fetcher for OfflineFetcher {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        Err(LoadError::NetworkFailure {
            uri: uri.to_string(),
            reason: "HTTP support is disabled".to_string(),
        })
    }
}

/// The fetcher matching the enabled crate features.
pub fn default_fetcher(config: &LoaderConfig) -> Arc<dyn Fetcher> {
    #[cfg(feature = "http")]
    {
        Arc::new(HttpFetcher::new(config))
    }
    #[cfg(not(feature = "http"))]
    {
        let _ = config;
        Arc::new(OfflineFetcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_2xx_ok() {
        assert!(status_error("http://x", 200).is_none());
        assert!(status_error("http://x", 204).is_none());
    }

    #[test]
    fn test_status_error_non_2xx() {
        assert_eq!(
            status_error("http://x/a.png", 404),
            Some(LoadError::HttpStatus {
                uri: "http://x/a.png".into(),
                status: 404
            })
        );
        assert!(status_error("http://x", 301).is_some());
    }
}
