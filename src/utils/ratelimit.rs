//! Client-side request throttle for the wallet gateway, sliding one-second window
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Window {
    /// Timestamps of requests admitted inside the current window
    request_times: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl Window {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            request_times: VecDeque::new(),
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Returns how long the caller must wait. Zero means the request was recorded.
    fn check_and_record(&mut self, now: Instant) -> Duration {
        while let Some(&front) = self.request_times.front() {
            if now.duration_since(front) >= self.window {
                self.request_times.pop_front();
            } else {
                break;
            }
        }

        if self.request_times.len() >= self.max_requests {
            if let Some(&oldest) = self.request_times.front() {
                return self.window - now.duration_since(oldest);
            }
        }

        self.request_times.push_back(now);
        Duration::ZERO
    }
}

/// Shared by every worker of a client; each request calls [`RequestThrottle::acquire`] first
pub struct RequestThrottle {
    inner: Mutex<Window>,
}

impl RequestThrottle {
    pub fn per_second(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(1))
    }

    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            inner: Mutex::new(Window::new(max_requests, window)),
        }
    }

    /// Wait until the window has room for one more request, then record it
    pub async fn acquire(&self) {
        loop {
            let wait = {
                // A poisoned lock only means another worker panicked mid-update;
                // the timestamps are still usable.
                let mut window = self.inner.lock().unwrap_or_else(|e| e.into_inner());
                window.check_and_record(Instant::now())
            };

            if wait.is_zero() {
                return;
            }

            tracing::debug!("Wallet API throttle: waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_requests_within_limit() {
        let mut window = Window::new(20, Duration::from_secs(1));
        let now = Instant::now();

        for _ in 0..20 {
            assert!(window.check_and_record(now).is_zero());
        }
    }

    #[test]
    fn test_blocks_over_limit() {
        let mut window = Window::new(20, Duration::from_secs(1));
        let now = Instant::now();

        for _ in 0..20 {
            window.check_and_record(now);
        }

        assert!(window.check_and_record(now) > Duration::ZERO);
    }

    #[test]
    fn test_window_slides() {
        let mut window = Window::new(2, Duration::from_millis(100));
        let start = Instant::now();

        window.check_and_record(start);
        window.check_and_record(start);
        assert!(!window.check_and_record(start).is_zero());
        assert!(window.check_and_record(start + Duration::from_millis(100)).is_zero());
    }

    #[tokio::test]
    async fn test_acquire_waits_for_room() {
        let throttle = RequestThrottle::new(1, Duration::from_millis(50));
        let started = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;

        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
