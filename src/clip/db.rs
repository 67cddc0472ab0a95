//! Decibel conversions and bit-depth tables

use crate::error::{OverdubError, Result};

/// Convert decibels to a linear ratio.
///
/// With `using_amplitude` the ratio is an amplitude multiplier
/// (`10^(db/20)`), otherwise a power multiplier (`10^(db/10)`).
pub fn db_to_float(db: f64, using_amplitude: bool) -> f64 {
    if using_amplitude {
        10.0_f64.powf(db / 20.0)
    } else {
        10.0_f64.powf(db / 10.0)
    }
}

/// Convert a linear ratio to decibels.
///
/// A ratio of zero maps to negative infinity (silence).
pub fn ratio_to_db(ratio: f64, using_amplitude: bool) -> f64 {
    if ratio == 0.0 {
        return f64::NEG_INFINITY;
    }

    if using_amplitude {
        20.0 * ratio.log10()
    } else {
        10.0 * ratio.log10()
    }
}

/// Convert the ratio of two values to decibels.
///
/// Shorthand for `ratio_to_db(val1 / val2, ..)`; a zero `val1` maps to
/// negative infinity like any other silent ratio.
pub fn values_ratio_to_db(val1: f64, val2: f64, using_amplitude: bool) -> f64 {
    ratio_to_db(val1 / val2, using_amplitude)
}

/// Bytes per sample for a given bit depth.
pub fn frame_width(bit_depth: u16) -> Result<u16> {
    match bit_depth {
        8 => Ok(1),
        16 => Ok(2),
        32 => Ok(4),
        other => Err(OverdubError::UnsupportedBitDepth(other)),
    }
}

/// Signed sample value range for a given bit depth.
pub fn sample_range(bit_depth: u16) -> Result<(i64, i64)> {
    match bit_depth {
        8 => Ok((-0x80, 0x7F)),
        16 => Ok((-0x8000, 0x7FFF)),
        32 => Ok((-0x8000_0000, 0x7FFF_FFFF)),
        other => Err(OverdubError::UnsupportedBitDepth(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn db_to_float_amplitude() {
        assert_relative_eq!(db_to_float(0.0, true), 1.0);
        assert_relative_eq!(db_to_float(6.0, true), 1.9952623, max_relative = 1e-6);
        assert_relative_eq!(db_to_float(-20.0, true), 0.1);
    }

    #[test]
    fn db_to_float_power() {
        assert_relative_eq!(db_to_float(10.0, false), 10.0);
        assert_relative_eq!(db_to_float(-10.0, false), 0.1);
    }

    #[test]
    fn ratio_to_db_round_trips() {
        for db in [-24.0, -6.0, 0.0, 3.0, 12.0] {
            assert_relative_eq!(
                ratio_to_db(db_to_float(db, true), true),
                db,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn two_value_form_divides_before_converting() {
        assert_relative_eq!(
            values_ratio_to_db(2.0, 1.0, true),
            6.0205999,
            max_relative = 1e-6
        );
        assert_relative_eq!(values_ratio_to_db(1.0, 10.0, true), -20.0);
        assert_eq!(values_ratio_to_db(0.0, 4.0, true), f64::NEG_INFINITY);
    }

    #[test]
    fn zero_ratio_is_silence() {
        assert_eq!(ratio_to_db(0.0, true), f64::NEG_INFINITY);
    }

    #[test]
    fn bit_depth_tables() {
        assert_eq!(frame_width(16).unwrap(), 2);
        assert_eq!(sample_range(8).unwrap(), (-0x80, 0x7F));
        assert!(matches!(
            frame_width(24),
            Err(OverdubError::UnsupportedBitDepth(24))
        ));
    }
}
