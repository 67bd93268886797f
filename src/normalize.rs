//! Sign-aware piecewise-linear mapping from a parameter's own range into a
//! sub-rig's normalized space.
//!
//! The mapping is deliberately not a single linear formula: the parameter
//! range and the normalized range need not be symmetric around their
//! midpoints, so values above and below the middle are scaled independently.

use crate::math::clamp;

/// Maps a raw parameter value into normalized physics space.
///
/// The value is first clamped into the ordered parameter range. The pivot on
/// the parameter side is the geometric midpoint of that clamped range; the
/// parameter's own stated default is accepted for interface parity but
/// ignored. On the normalized side the pivot is `normalized_default`. Values
/// above the pivot scale by the upper span ratio, values below by the lower
/// span ratio, and a zero-length parameter span leaves the result at
/// `normalized_default` instead of dividing by zero.
///
/// The final result is negated unless `inverted` is true: the reflect flag
/// carried by inputs *disables* the negation. The polarity looks backwards
/// but is intentional; flipping it reverses every chain's response.
#[allow(clippy::too_many_arguments)]
pub fn normalize_parameter_value(
    value: f64,
    parameter_minimum: f64,
    parameter_maximum: f64,
    _parameter_default: f64,
    normalized_minimum: f64,
    normalized_maximum: f64,
    normalized_default: f64,
    inverted: bool,
) -> f64 {
    let max_value = parameter_maximum.max(parameter_minimum);
    let min_value = parameter_minimum.min(parameter_maximum);
    let value = clamp(value, min_value, max_value);

    let min_norm_value = normalized_minimum.min(normalized_maximum);
    let max_norm_value = normalized_minimum.max(normalized_maximum);
    let middle_norm_value = normalized_default;

    let middle_value = min_value + (max_value - min_value) / 2.0;
    let delta = value - middle_value;

    let result = if delta > 0.0 {
        let n_length = max_norm_value - middle_norm_value;
        let p_length = max_value - middle_value;
        if p_length != 0.0 {
            delta * (n_length / p_length) + middle_norm_value
        } else {
            middle_norm_value
        }
    } else if delta < 0.0 {
        let n_length = min_norm_value - middle_norm_value;
        let p_length = min_value - middle_value;
        if p_length != 0.0 {
            delta * (n_length / p_length) + middle_norm_value
        } else {
            middle_norm_value
        }
    } else {
        middle_norm_value
    };

    if inverted {
        result
    } else {
        -result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(value: f64, inverted: bool) -> f64 {
        // Parameter range [-30, 30], normalized range [-10, 10], defaults 0.
        normalize_parameter_value(value, -30.0, 30.0, 0.0, -10.0, 10.0, 0.0, inverted)
    }

    #[test]
    fn test_symmetry_at_bounds() {
        // With the final negation active, the bounds map to the negated
        // normalized bounds.
        assert!((normalize(30.0, false) + 10.0).abs() < 1e-12);
        assert!((normalize(-30.0, false) - 10.0).abs() < 1e-12);
        assert!(normalize(0.0, false).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_flag_disables_negation() {
        assert!((normalize(30.0, true) - 10.0).abs() < 1e-12);
        assert!((normalize(-30.0, true) + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        assert_eq!(normalize(100.0, false), normalize(30.0, false));
        assert_eq!(normalize(-100.0, false), normalize(-30.0, false));
    }

    #[test]
    fn test_parameter_midpoint_is_geometric() {
        // Range [0, 10]: the pivot is 5, not the stated default of 2.
        let below = normalize_parameter_value(4.0, 0.0, 10.0, 2.0, -10.0, 10.0, 0.0, true);
        let above = normalize_parameter_value(6.0, 0.0, 10.0, 2.0, -10.0, 10.0, 0.0, true);
        assert!((below + 2.0).abs() < 1e-12);
        assert!((above - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_asymmetric_normalized_range() {
        // Parameter [0, 10] (pivot 5), normalized [-5, 15] with default 1.
        // Upper branch: (7.5 - 5) * (15 - 1) / (10 - 5) + 1 = 8.
        let result = normalize_parameter_value(7.5, 0.0, 10.0, 0.0, -5.0, 15.0, 1.0, true);
        assert!((result - 8.0).abs() < 1e-12);

        // Lower branch: (2.5 - 5) * (-5 - 1) / (0 - 5) + 1 = -2.
        let result = normalize_parameter_value(2.5, 0.0, 10.0, 0.0, -5.0, 15.0, 1.0, true);
        assert!((result + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_parameter_range() {
        // min == max: the value clamps to the pivot and the result holds at
        // the normalized default, negated by polarity.
        let result = normalize_parameter_value(5.0, 5.0, 5.0, 5.0, -10.0, 10.0, 3.0, false);
        assert_eq!(result, -3.0);
    }

    #[test]
    fn test_reversed_parameter_bounds_are_ordered() {
        // Caller passed min > max; the ordered range is used.
        let swapped = normalize_parameter_value(30.0, 30.0, -30.0, 0.0, -10.0, 10.0, 0.0, false);
        let ordered = normalize_parameter_value(30.0, -30.0, 30.0, 0.0, -10.0, 10.0, 0.0, false);
        assert_eq!(swapped, ordered);
    }
}
