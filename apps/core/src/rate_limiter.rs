use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A simple rate limiter using a sliding window algorithm.
///
/// Tracks request timestamps per identity to decide whether a new request
/// is allowed. Stale identities are pruned as their windows empty out.
pub struct RateLimiter {
    requests: HashMap<String, Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    /// Checks if a request from the given identity is allowed. Allowed
    /// requests are recorded.
    pub fn check(&mut self, identity: &str) -> bool {
        let now = Instant::now();
        let window_start = now - self.window;

        self.requests.retain(|_, stamps| {
            stamps.retain(|&t| t > window_start);
            !stamps.is_empty()
        });

        let entry = self.requests.entry(identity.to_string()).or_default();
        if entry.len() < self.limit {
            entry.push(now);
            true
        } else {
            false
        }
    }
}

/// Cloneable handle for sharing one limiter across request handlers.
#[derive(Clone)]
pub struct SharedRateLimiter {
    inner: Arc<Mutex<RateLimiter>>,
}

impl SharedRateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimiter::new(limit, window))),
        }
    }

    pub fn check(&self, identity: &str) -> bool {
        self.inner
            .lock()
            .expect("rate limiter lock poisoned")
            .check(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        for _ in 0..5 {
            assert!(limiter.check("anon_1"));
        }
        assert!(!limiter.check("anon_1"));
    }

    #[test]
    fn test_rate_limiter_is_per_identity() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        assert!(limiter.check("anon_1"));
        assert!(limiter.check("anon_2"));
        assert!(!limiter.check("anon_1"));
    }

    #[test]
    fn test_rate_limiter_resets_after_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("anon_3"));
        assert!(limiter.check("anon_3"));
        assert!(!limiter.check("anon_3"));

        thread::sleep(Duration::from_millis(60));

        assert!(limiter.check("anon_3"));
    }

    #[test]
    fn test_shared_handle() {
        let limiter = SharedRateLimiter::new(1, Duration::from_secs(1));
        let clone = limiter.clone();
        assert!(limiter.check("anon_4"));
        assert!(!clone.check("anon_4"));
    }
}
