//! Per-session hold-grant rate limiting. Not general-purpose rate-limiting
//! middleware — a narrow, in-memory sliding window over one counter:
//! `SEAT_HOLD_MAX_PER_MINUTE` grants per `sessionId` per rolling minute.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use boxoffice_types::AppError;

pub struct HoldRateLimiter {
    window: Duration,
    max_per_window: u32,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl HoldRateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            window,
            max_per_window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Records a hold-grant attempt for `session_id`, evicting timestamps
    /// outside the window first. Errs `EXTERNAL_UNAVAILABLE`-adjacent —
    /// actually a client-caused condition, so `InvalidInput` — once the cap
    /// is exceeded.
    pub fn check(&self, session_id: &str) -> Result<(), AppError> {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap();
        let entry = hits.entry(session_id.to_string()).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() as u32 >= self.max_per_window {
            return Err(AppError::InvalidInput(
                "Too many hold requests; please slow down.".to_string(),
            ));
        }

        entry.push(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_cap_then_rejects() {
        let limiter = HoldRateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("sess1").is_ok());
        assert!(limiter.check("sess1").is_ok());
        assert!(limiter.check("sess1").is_err());
    }

    #[test]
    fn sessions_are_independent() {
        let limiter = HoldRateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("sess1").is_ok());
        assert!(limiter.check("sess2").is_ok());
    }
}
