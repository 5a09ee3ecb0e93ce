use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

const PROC_UPTIME: &str = "/proc/uptime";

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds elapsed since `offset_ms` was sampled, plus `offset_ms`.
#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    epoch: Instant,
    offset_ms: u64,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    /// Starts counting at 0 now.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    pub fn with_offset(offset_ms: u64) -> Self {
        Self {
            epoch: Instant::now(),
            offset_ms,
        }
    }

    /// Counts from system boot, as read from `/proc/uptime`. Falls back to
    /// counting from now when the file is unavailable.
    pub fn since_boot() -> Self {
        let offset = std::fs::read_to_string(PROC_UPTIME)
            .ok()
            .and_then(|s| parse_uptime_ms(&s));
        match offset {
            Some(ms) => Self::with_offset(ms),
            None => {
                debug!("{} unreadable, uptime counts from now", PROC_UPTIME);
                Self::new()
            }
        }
    }
}

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        self.offset_ms + self.epoch.elapsed().as_millis() as u64
    }
}

/// Parses the first field of `/proc/uptime` (seconds, fractional) into ms.
pub fn parse_uptime_ms(content: &str) -> Option<u64> {
    let field = content.split_whitespace().next()?;
    let (secs, frac) = field.split_once('.').unwrap_or((field, ""));
    let secs: u64 = secs.parse().ok()?;
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let millis = frac
        .chars()
        .chain("000".chars())
        .take(3)
        .fold(0, |acc, c| acc * 10 + u64::from(c as u8 - b'0'));
    Some(secs * 1000 + millis)
}

/// Clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1000);
        let view = clock.clone();
        clock.advance(50);
        assert_eq!(view.now_ms(), 1050);
        view.set(7);
        assert_eq!(clock.now_ms(), 7);
    }

    #[test]
    fn parses_proc_uptime() {
        assert_eq!(parse_uptime_ms("12345.67 54321.00\n"), Some(12_345_670));
        assert_eq!(parse_uptime_ms("3 1"), Some(3000));
        assert_eq!(parse_uptime_ms("0.5 0.1"), Some(500));
        assert_eq!(parse_uptime_ms("1.2345 0"), Some(1234));
        assert_eq!(parse_uptime_ms(""), None);
        assert_eq!(parse_uptime_ms("abc 1.0"), None);
        assert_eq!(parse_uptime_ms("-1.0 1.0"), None);
    }

    #[test]
    fn offset_clock_starts_past_debounce_window() {
        let clock = UptimeClock::with_offset(60_000);
        assert!(clock.now_ms() >= 60_000);
    }

    #[test]
    fn uptime_clock_is_monotonic() {
        let clock = UptimeClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
