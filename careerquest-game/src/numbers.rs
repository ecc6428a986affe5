//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Clamp a value to the percentage range `[0, 100]`, returning 0.0 for NaN.
#[must_use]
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamp a value to the unit interval, returning 0.0 for NaN.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Map a raw `u32` draw onto `[0, 1)` using the midpoint of its bucket.
#[must_use]
pub fn unit_from_u32(sample: u32) -> f64 {
    let denom = f64::from(u32::MAX) + 1.0;
    (f64::from(sample) + 0.5) / denom
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Floor a non-negative f64 into the u32 range, returning 0 for NaN or negatives.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = f64::from(u32::MAX);
    cast::<f64, u32>(value.min(max).floor()).unwrap_or(u32::MAX)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_clamp_handles_range_and_nan() {
        assert!((clamp_pct(140.0) - 100.0).abs() < f64::EPSILON);
        assert!(clamp_pct(-3.0).abs() < f64::EPSILON);
        assert!(clamp_pct(f64::NAN).abs() < f64::EPSILON);
        assert!((clamp_unit(1.5) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unit_samples_stay_below_one() {
        assert!(unit_from_u32(0) > 0.0);
        assert!(unit_from_u32(u32::MAX) < 1.0);
    }

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i64(1.6), 2);
        assert_eq!(round_f64_to_i64(f64::NAN), 0);
        assert_eq!(floor_f64_to_u32(12.9), 12);
        assert_eq!(floor_f64_to_u32(-4.0), 0);
        assert_eq!(floor_f64_to_u32(f64::INFINITY), u32::MAX);
    }
}
