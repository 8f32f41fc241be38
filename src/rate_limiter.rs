//! Sliding-window request limiter keyed by client identity.
//!
//! Every accepted request leaves a timestamp behind. A check first drops the
//! timestamps that fell out of the trailing window, then admits the request
//! only while fewer than `max_requests` remain. There is no bucket boundary,
//! so a client can never burst at a window edge.

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub struct RateLimiter {
    entries: Mutex<HashMap<String, Vec<Instant>>>,
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests: config.max_requests,
            window: config.window,
            clock,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Instant>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn prune(timestamps: &mut Vec<Instant>, now: Instant, window: Duration) {
        timestamps.retain(|&t| now.duration_since(t) < window);
    }

    /// Admits and records a request, or rejects it without recording.
    ///
    /// Prune, count and record all happen under one lock, so two concurrent
    /// callers cannot both take the last slot.
    pub fn check(&self, identifier: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.lock();
        let timestamps = entries.entry(identifier.to_string()).or_default();
        Self::prune(timestamps, now, self.window);

        if timestamps.len() >= self.max_requests {
            log::debug!(
                "Rate limit hit for {}: {}/{} in window",
                identifier,
                timestamps.len(),
                self.max_requests
            );
            return false;
        }

        timestamps.push(now);
        true
    }

    /// How many more requests `identifier` may make right now. Records nothing.
    pub fn remaining(&self, identifier: &str) -> usize {
        let now = self.clock.now();
        let entries = self.lock();
        let used = entries
            .get(identifier)
            .map(|timestamps| {
                timestamps
                    .iter()
                    .filter(|&&t| now.duration_since(t) < self.window)
                    .count()
            })
            .unwrap_or(0);
        self.max_requests.saturating_sub(used)
    }

    /// Drops identifiers with no timestamps left in the window. Returns how many went.
    pub fn prune_idle(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, timestamps| {
            Self::prune(timestamps, now, self.window);
            !timestamps.is_empty()
        });
        before - entries.len()
    }

    pub fn tracked_identifiers(&self) -> usize {
        self.lock().len()
    }
}
