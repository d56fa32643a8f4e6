use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Failed-login counter keyed by client address and normalized email.
///
/// A burst against one account from one address is throttled without locking
/// the account for everyone else.
#[derive(Clone)]
pub struct LoginThrottle {
    attempts: Arc<Mutex<HashMap<(IpAddr, String), Vec<Instant>>>>,
    max_attempts: usize,
    window: Duration,
}

impl LoginThrottle {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    fn key(ip: IpAddr, email: &str) -> (IpAddr, String) {
        (ip, email.trim().to_lowercase())
    }

    /// True once `max_attempts` failures fall inside the window.
    pub fn is_blocked(&self, ip: IpAddr, email: &str) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let key = Self::key(ip, email);

        let Some(timestamps) = map.get_mut(&key) else {
            return false;
        };
        timestamps.retain(|t| now.duration_since(*t) < self.window);
        if timestamps.is_empty() {
            map.remove(&key);
            return false;
        }
        timestamps.len() >= self.max_attempts
    }

    /// Record a failure. Every entry older than the window is dropped first,
    /// so the map only holds pairs that failed recently.
    pub fn record_failure(&self, ip: IpAddr, email: &str) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        map.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < self.window);
            !timestamps.is_empty()
        });
        map.entry(Self::key(ip, email)).or_default().push(now);
    }

    pub fn clear(&self, ip: IpAddr, email: &str) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&Self::key(ip, email));
    }

    /// Number of (address, email) pairs currently holding failures.
    pub fn tracked(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for LoginThrottle {
    /// Five failures per fifteen minutes.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(900))
    }
}
