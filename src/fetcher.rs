use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::settings::Settings;

/// Anything that can turn a URL into raw markup.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with optional retry on transient failures.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_retries: u32,
    base_backoff: Duration,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            max_retries: settings.max_retries,
            base_backoff: settings.retry_backoff(),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let http_err = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(http_err)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            let start = Instant::now();
            match self.fetch_once(url).await {
                Ok(body) => {
                    debug!(
                        "Fetched {} ({} bytes in {}ms)",
                        url,
                        body.len(),
                        start.elapsed().as_millis()
                    );
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let backoff = backoff_for(self.base_backoff, attempt);
                    warn!(
                        "{} (attempt {}/{}), backing off {:.1}s",
                        e,
                        attempt + 1,
                        self.max_retries,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn backoff_for(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Minimum spacing between the starts of consecutive requests.
pub struct Pacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until the interval since the previous request has elapsed.
    /// The first call returns immediately.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.interval).await;
        }
        *last = Some(Instant::now());
    }
}

/// Wraps a fetcher so every call goes through a [`Pacer`].
pub struct Paced<F> {
    inner: F,
    pacer: Pacer,
}

impl<F: Fetch> Paced<F> {
    pub fn new(inner: F, interval: Duration) -> Self {
        Self {
            inner,
            pacer: Pacer::new(interval),
        }
    }
}

#[async_trait]
impl<F: Fetch> Fetch for Paced<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pacer.wait().await;
        self.inner.fetch(url).await
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned `(status, body)` per connection, in order. Returns the
    /// base URL and a counter of accepted connections.
    async fn serve(replies: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for (status, body) in replies {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(reply.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });

        (format!("http://{addr}/page.html"), hits)
    }

    fn http_fetcher(max_retries: u32) -> HttpFetcher {
        let settings = Settings {
            max_retries,
            retry_backoff_ms: 10,
            request_timeout_secs: 5,
            ..Settings::default()
        };
        HttpFetcher::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn retries_transient_status_then_succeeds() {
        let (url, hits) = serve(vec![(503, "busy"), (200, "ok")]).await;
        let body = http_fetcher(2).fetch(&url).await.unwrap();
        assert_eq!(body, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn transient_status_without_retries_is_an_error() {
        let (url, hits) = serve(vec![(503, "busy"), (200, "ok")]).await;
        let err = http_fetcher(0).fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status: StatusCode::SERVICE_UNAVAILABLE, .. }
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_is_never_retried() {
        let (url, hits) = serve(vec![(404, "gone"), (200, "ok")]).await;
        let err = http_fetcher(3).fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status: StatusCode::NOT_FOUND, .. }
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let (url, hits) = serve(vec![(429, "slow down"), (502, "bad"), (503, "busy")]).await;
        let err = http_fetcher(1).fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status: StatusCode::BAD_GATEWAY, .. }
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    struct Recording {
        calls: Arc<std::sync::Mutex<Vec<(String, Instant)>>>,
    }

    #[async_trait]
    impl Fetch for Recording {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), Instant::now()));
            Ok(String::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn paced_fetches_are_spaced() {
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let fetcher = Paced::new(
            Recording {
                calls: Arc::clone(&calls),
            },
            Duration::from_secs(1),
        );

        for url in ["a", "b", "c"] {
            fetcher.fetch(url).await.unwrap();
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let pacer = Pacer::new(Duration::from_secs(5));
        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_sleeps() {
        let pacer = Pacer::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            pacer.wait().await;
        }
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[test]
    fn backoff_doubles() {
        let base = Duration::from_millis(2000);
        assert_eq!(backoff_for(base, 0), Duration::from_millis(2000));
        assert_eq!(backoff_for(base, 1), Duration::from_millis(4000));
        assert_eq!(backoff_for(base, 2), Duration::from_millis(8000));
    }

    #[test]
    fn transient_statuses() {
        let status = |s| FetchError::Status {
            url: "https://example.com".into(),
            status: s,
        };
        assert!(status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(status(StatusCode::BAD_GATEWAY).is_transient());
        assert!(status(StatusCode::SERVICE_UNAVAILABLE).is_transient());
        assert!(!status(StatusCode::NOT_FOUND).is_transient());
        assert!(!status(StatusCode::FORBIDDEN).is_transient());
    }
}
