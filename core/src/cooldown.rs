//! Haste-adjusted cooldown math
//!
//! Haste is an additive stat: every 100 points halves the remaining fraction
//! of a cooldown, i.e. `effective = base / (1 + haste / 100)`.

/// Effective cooldown in seconds for a base cooldown and a haste value.
///
/// Callers clamp haste to `>= 0` before calling.
#[inline]
pub fn effective(base_secs: f64, haste: f64) -> f64 {
    base_secs / (1.0 + haste / 100.0)
}

/// Absolute end time (unix millis) of a cooldown of `effective_secs` started at `now_ms`.
///
/// Saturates at `i64::MAX` for durations too long to represent.
#[inline]
pub fn end_time_after(now_ms: i64, effective_secs: f64) -> i64 {
    // `as` saturates out-of-range floats and maps NaN to 0
    let duration_ms = (effective_secs * 1000.0).round() as i64;
    now_ms.saturating_add(duration_ms.max(0))
}

/// Whole seconds left until `end_ms`, rounded up and floored at zero.
///
/// 230.769s remaining → 231, 0.001s → 1, anything at or past the end → 0.
#[inline]
pub fn remaining_secs(end_ms: i64, now_ms: i64) -> u64 {
    let remaining_ms = end_ms.saturating_sub(now_ms);
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms as u64).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_haste_is_identity() {
        for base in [0.0, 1.0, 80.0, 300.0] {
            assert_eq!(effective(base, 0.0), base);
        }
    }

    #[test]
    fn strictly_decreasing_in_haste() {
        let base = 120.0;
        let mut last = effective(base, 0.0);
        for haste in (1..=500).map(f64::from) {
            let next = effective(base, haste);
            assert!(next < last, "haste {haste}: {next} !< {last}");
            last = next;
        }
    }

    #[test]
    fn large_haste_approaches_zero() {
        assert!(effective(300.0, 1_000_000.0) < 0.1);
    }

    #[test]
    fn hundred_haste_halves() {
        assert_eq!(effective(80.0, 100.0), 40.0);
    }

    #[test]
    fn end_time_rounds_to_millis() {
        let secs = effective(300.0, 30.0);
        assert_eq!(end_time_after(1_000, secs), 1_000 + 230_769);
    }

    #[test]
    fn huge_duration_saturates() {
        assert_eq!(end_time_after(1_000, 1e300), i64::MAX);
        assert_eq!(end_time_after(1_000, f64::INFINITY), i64::MAX);
        assert_eq!(end_time_after(1_000, f64::NAN), 1_000);
    }

    #[test]
    fn remaining_rounds_up() {
        assert_eq!(remaining_secs(230_769, 0), 231);
        assert_eq!(remaining_secs(1_001, 1_000), 1);
        assert_eq!(remaining_secs(2_000, 1_000), 1);
        assert_eq!(remaining_secs(1_000, 1_000), 0);
        assert_eq!(remaining_secs(1_000, 11_000), 0);
    }
}
