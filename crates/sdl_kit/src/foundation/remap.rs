//! Numeric range remapping between native and normalized values
//!
//! SDL reports analog input in bipolar integer ranges whose magnitudes
//! differ by one (`-32768..32767` for joystick axes) and accepts intensity
//! parameters as unsigned integers (`0..65535` for rumble motors). These
//! functions convert between those native ranges and the normalized
//! floating-point ranges the public API exposes, reproducing SDL's own
//! asymmetric semantics exactly so values round-trip against what the
//! hardware reported.

/// Map a bipolar integer to `[-1, 1]`.
///
/// Negative values divide by `|min|`, positive values by `max`. The two
/// halves use different scale factors because the native range itself is
/// asymmetric, so the mapping is intentionally not linear across zero:
/// `min` maps to exactly `-1.0` and `max` to exactly `1.0`.
pub fn normalized_from_raw(value: i32, min: i32, max: i32) -> f64 {
    debug_assert!(min < 0 && max > 0);
    if value < 0 {
        f64::from(value) / f64::from(min).abs()
    } else {
        f64::from(value) / f64::from(max)
    }
}

/// Map a normalized value in `[-1, 1]` back to the bipolar integer range.
///
/// Inverse of [`normalized_from_raw`]: the sign selects the scale factor.
/// The result is truncated toward zero and clamped into `[min, max]`.
pub fn raw_from_normalized(value: f64, min: i32, max: i32) -> i32 {
    debug_assert!(min < 0 && max > 0);
    let scaled = if value < 0.0 {
        value * f64::from(min).abs()
    } else {
        value * f64::from(max)
    };
    let truncated = scaled.trunc();
    if truncated <= f64::from(min) {
        min
    } else if truncated >= f64::from(max) {
        max
    } else {
        truncated as i32
    }
}

/// Quantize a unit-interval intensity to `[0, max]`.
///
/// The policy is quantization, not rounding:
/// `scaled_from_unit(x, max) = 0 if x <= 0, else min(floor(x * (max + 1)), max)`.
/// Inputs at or below zero (including NaN) map to `0`; inputs at or above
/// `1.0` map to `max`.
pub fn scaled_from_unit(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let scaled = (value * (f64::from(max) + 1.0)).floor();
    if scaled >= f64::from(max) {
        max
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AXIS_MIN: i32 = i16::MIN as i32;
    const AXIS_MAX: i32 = i16::MAX as i32;

    #[test]
    fn axis_bounds_map_to_unit_bounds() {
        assert_relative_eq!(normalized_from_raw(AXIS_MIN, AXIS_MIN, AXIS_MAX), -1.0);
        assert_relative_eq!(normalized_from_raw(AXIS_MAX, AXIS_MIN, AXIS_MAX), 1.0);
        assert_relative_eq!(normalized_from_raw(0, AXIS_MIN, AXIS_MAX), 0.0);
    }

    #[test]
    fn axis_mapping_uses_per_sign_scale_factors() {
        // Half of each range magnitude, not half of the combined span.
        assert_relative_eq!(
            normalized_from_raw(-16384, AXIS_MIN, AXIS_MAX),
            -16384.0 / 32768.0
        );
        assert_relative_eq!(
            normalized_from_raw(16384, AXIS_MIN, AXIS_MAX),
            16384.0 / 32767.0
        );
    }

    #[test]
    fn normalized_round_trip_is_within_one_quantization_step() {
        let raw = raw_from_normalized(0.5, AXIS_MIN, AXIS_MAX);
        let back = normalized_from_raw(raw, AXIS_MIN, AXIS_MAX);
        assert!((back - 0.5).abs() <= 1.0 / f64::from(AXIS_MAX));

        let raw = raw_from_normalized(-0.5, AXIS_MIN, AXIS_MAX);
        let back = normalized_from_raw(raw, AXIS_MIN, AXIS_MAX);
        assert!((back + 0.5).abs() <= 1.0 / f64::from(AXIS_MIN).abs());
    }

    #[test]
    fn raw_from_normalized_clamps_to_the_native_range() {
        assert_eq!(raw_from_normalized(-2.0, AXIS_MIN, AXIS_MAX), AXIS_MIN);
        assert_eq!(raw_from_normalized(2.0, AXIS_MIN, AXIS_MAX), AXIS_MAX);
        assert_eq!(raw_from_normalized(-1.0, AXIS_MIN, AXIS_MAX), AXIS_MIN);
        assert_eq!(raw_from_normalized(1.0, AXIS_MIN, AXIS_MAX), AXIS_MAX);
    }

    #[test]
    fn unit_quantization_boundaries() {
        assert_eq!(scaled_from_unit(0.0, 255), 0);
        assert_eq!(scaled_from_unit(1.0, 255), 255);
        assert_eq!(scaled_from_unit(-0.5, 255), 0);
        assert_eq!(scaled_from_unit(f64::NAN, 255), 0);
        assert_eq!(scaled_from_unit(2.0, 255), 255);
    }

    #[test]
    fn unit_quantization_floors_rather_than_rounds() {
        // 0.999 * 256 = 255.744, floored to 255; 0.5 * 256 = 128 exactly.
        assert_eq!(scaled_from_unit(0.999, 255), 255);
        assert_eq!(scaled_from_unit(0.5, 255), 128);
        // Just below the step boundary stays on the lower step.
        assert_eq!(scaled_from_unit(0.4999, 255), 127);
    }

    #[test]
    fn rumble_scale_covers_the_u16_range() {
        assert_eq!(scaled_from_unit(1.0, u32::from(u16::MAX)), 65535);
        assert_eq!(scaled_from_unit(0.5, u32::from(u16::MAX)), 32768);
    }
}
