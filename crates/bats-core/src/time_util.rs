//! Time utilities.
//!
//! Wall-clock helpers plus conversion between the feed's
//! milliseconds-since-midnight timestamps and Unix time.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day.
const DAY_MS: u64 = 86_400_000;

/// Current time as **microseconds** since Unix epoch.
#[inline]
pub fn now_us() -> u64 {
    let d = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    d.as_secs() * 1_000_000 + d.subsec_micros() as u64
}

/// Current time as **milliseconds** since Unix epoch.
#[inline]
pub fn now_ms() -> u64 {
    let d = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    d.as_secs() * 1_000 + d.subsec_millis() as u64
}

/// UTC midnight of the day containing `unix_ms`, as Unix milliseconds.
#[inline]
pub fn midnight_ms(unix_ms: u64) -> u64 {
    unix_ms - unix_ms % DAY_MS
}

/// Convert a feed timestamp (milliseconds since midnight) to Unix
/// milliseconds, given the session's midnight anchor.
#[inline]
pub fn feed_ts_to_unix_ms(ts_ms: u32, midnight: u64) -> u64 {
    midnight + ts_ms as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_is_day_aligned() {
        let m = midnight_ms(1_672_531_200_123); // some time on 2023-01-01
        assert_eq!(m % DAY_MS, 0);
        assert!(m <= 1_672_531_200_123);
    }

    #[test]
    fn feed_ts_offsets_from_midnight() {
        let midnight = midnight_ms(now_ms());
        // 08:00:00.011 — the canonical session-open timestamp.
        assert_eq!(feed_ts_to_unix_ms(28_800_011, midnight), midnight + 28_800_011);
    }

    #[test]
    fn clocks_are_monotone_enough() {
        let a = now_us();
        let b = now_us();
        assert!(b >= a);
    }
}
