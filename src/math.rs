//! Scalar math utilities: clamping, angle conversions, direction helpers, and
//! the closed-form cubic solver used to invert Bezier curves to a parametric
//! `t` in `[0, 1]`.

use std::f64::consts::PI;

use crate::vec2::Vec2;

/// Tolerance below which a polynomial coefficient is treated as zero.
const EPSILON: f64 = 1e-5;

/// Clamps `value` to `[minimum, maximum]`.
///
/// Bounds are assumed to be ordered by the caller; they are not swapped.
pub fn clamp(value: f64, minimum: f64, maximum: f64) -> f64 {
    if value < minimum {
        minimum
    } else if value > maximum {
        maximum
    } else {
        value
    }
}

/// Converts degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees / 180.0) * PI
}

/// Converts radians to degrees.
pub fn radians_to_degrees(radians: f64) -> f64 {
    (radians * 180.0) / PI
}

/// Signed angle, in radians, that rotates `from` onto `to`.
///
/// Computed as the difference of the two `atan2` headings, then wrapped into
/// `(-PI, PI]` by repeated `2*PI` steps. The loop form tolerates inputs that
/// land right on the boundary after the subtraction.
pub fn direction_to_radian(from: Vec2, to: Vec2) -> f64 {
    let q1 = to.y.atan2(to.x);
    let q2 = from.y.atan2(from.x);
    let mut radian = q1 - q2;

    while radian < -PI {
        radian += 2.0 * PI;
    }
    while radian > PI {
        radian -= 2.0 * PI;
    }

    radian
}

/// Unit direction for an angle in radians.
///
/// Note the convention: `{sin a, cos a}`, so angle 0 points along +Y, not +X.
/// The particle chains hang along +Y at rest and this mapping keeps a zero
/// accumulated rotation pointing "down" the chain.
pub fn radian_to_direction(radian: f64) -> Vec2 {
    Vec2::new(radian.sin(), radian.cos())
}

/// Solves `a*x^2 + b*x + c = 0` for the smaller real root.
///
/// Degrades to the linear solution `-c / b` when `|a|` is negligible, and to
/// `-c` when `|b|` is negligible too.
pub fn quadratic_equation(a: f64, b: f64, c: f64) -> f64 {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return -c;
        }
        return -c / b;
    }

    -(b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}

/// Solves `a*x^3 + b*x^2 + c*x + d = 0` via Cardano's formula, clamped to
/// `[0, 1]`.
///
/// This is the inverse-Bezier parametrization routine: the coefficients come
/// from a curve segment whose parametric value is known to lie in `[0, 1]`.
/// When the depressed cubic has three real roots, the first two candidates
/// are only accepted if they fall within `0.01` of `0.5` (the visually
/// correct root for a well-formed segment sits near the middle); otherwise
/// the third root wins. When `|a|` is negligible the cubic degrades to
/// [`quadratic_equation`].
pub fn cardano_cubic_root(a: f64, b: f64, c: f64, d: f64) -> f64 {
    if a.abs() < EPSILON {
        return clamp(quadratic_equation(b, c, d), 0.0, 1.0);
    }

    let ba = b / a;
    let ca = c / a;
    let da = d / a;

    let p = (3.0 * ca - ba * ba) / 3.0;
    let p3 = p / 3.0;
    let q = (2.0 * ba * ba * ba - 9.0 * ba * ca + 27.0 * da) / 27.0;
    let q2 = q / 2.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;

    let center = 0.5;
    let threshold = 0.01;

    if discriminant < 0.0 {
        // Three distinct real roots: trigonometric form.
        let mp3 = -p / 3.0;
        let mp33 = mp3 * mp3 * mp3;
        let r = mp33.sqrt();
        let t = -q / (2.0 * r);
        let cos_phi = clamp(t, -1.0, 1.0);
        let phi = cos_phi.acos();
        let t1 = 2.0 * r.cbrt();

        let root1 = t1 * (phi / 3.0).cos() - ba / 3.0;
        if (root1 - center).abs() < threshold {
            return clamp(root1, 0.0, 1.0);
        }

        let root2 = t1 * ((phi + 2.0 * PI) / 3.0).cos() - ba / 3.0;
        if (root2 - center).abs() < threshold {
            return clamp(root2, 0.0, 1.0);
        }

        let root3 = t1 * ((phi + 4.0 * PI) / 3.0).cos() - ba / 3.0;
        return clamp(root3, 0.0, 1.0);
    }

    if discriminant == 0.0 {
        // Double (or triple) root.
        let u1 = if q2 < 0.0 { (-q2).cbrt() } else { -q2.cbrt() };

        let root1 = 2.0 * u1 - ba / 3.0;
        if (root1 - center).abs() < threshold {
            return clamp(root1, 0.0, 1.0);
        }

        return clamp(-u1 - ba / 3.0, 0.0, 1.0);
    }

    // One real root: cube-root form.
    let sd = discriminant.sqrt();
    let u1 = (sd - q2).cbrt();
    let v1 = (sd + q2).cbrt();
    clamp(u1 - v1 - ba / 3.0, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_angle_conversions() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-12);
        assert!((radians_to_degrees(PI / 2.0) - 90.0).abs() < 1e-12);
        let round_trip = radians_to_degrees(degrees_to_radians(37.5));
        assert!((round_trip - 37.5).abs() < 1e-12);
    }

    #[test]
    fn test_radian_to_direction_convention() {
        // Angle 0 points along +Y.
        let down = radian_to_direction(0.0);
        assert!((down.x - 0.0).abs() < 1e-12);
        assert!((down.y - 1.0).abs() < 1e-12);

        let side = radian_to_direction(PI / 2.0);
        assert!((side.x - 1.0).abs() < 1e-12);
        assert!(side.y.abs() < 1e-12);
    }

    #[test]
    fn test_direction_to_radian() {
        // Rotating +Y onto +X is a quarter turn.
        let r = direction_to_radian(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert!((r + PI / 2.0).abs() < 1e-12);

        // Identical directions give zero.
        let r = direction_to_radian(Vec2::new(0.3, 0.7), Vec2::new(0.3, 0.7));
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_direction_to_radian_wraps() {
        // A difference past PI wraps back into (-PI, PI].
        let from = radian_to_direction(degrees_to_radians(170.0));
        let to = radian_to_direction(degrees_to_radians(-170.0));
        let r = direction_to_radian(from, to);
        assert!(r.abs() <= PI + 1e-12);
        // 20 degrees the short way round, not 340 the long way.
        assert!((r.abs() - degrees_to_radians(20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_equation() {
        // (x - 0.25)(x - 2) = x^2 - 2.25x + 0.5; the smaller root is chosen.
        let root = quadratic_equation(1.0, -2.25, 0.5);
        assert!((root - 0.25).abs() < 1e-12);

        // Linear degradation.
        let root = quadratic_equation(0.0, 2.0, -1.0);
        assert!((root - 0.5).abs() < 1e-12);

        // Constant degradation.
        let root = quadratic_equation(0.0, 0.0, -0.75);
        assert!((root - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_cardano_single_real_root() {
        // (x - 0.3)(x^2 + x + 1): unique real root at 0.3.
        let root = cardano_cubic_root(1.0, 0.7, 0.7, -0.3);
        assert!((root - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_cardano_three_roots_falls_back_to_third() {
        // Roots {0.49, 2, -1}: the two out-of-window candidates are rejected
        // and the in-range root is returned.
        let root = cardano_cubic_root(1.0, -1.49, -1.51, 0.98);
        assert!((root - 0.49).abs() < 1e-6);
    }

    #[test]
    fn test_cardano_tie_break_window() {
        // Roots {0.502, 0.3, 0.1}: the largest root lies within 0.01 of 0.5
        // and is accepted immediately.
        let root = cardano_cubic_root(1.0, -0.902, 0.2308, -0.015_06);
        assert!((root - 0.502).abs() < 1e-6);
    }

    #[test]
    fn test_cardano_triple_root() {
        // (x - 0.5)^3: exact triple root, zero discriminant.
        let root = cardano_cubic_root(1.0, -1.5, 0.75, -0.125);
        assert!((root - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cardano_clamps_to_unit_interval() {
        // (x - 1.5)(x^2 + x + 1): the unique real root 1.5 clamps to 1.
        let root = cardano_cubic_root(1.0, -0.5, -0.5, -1.5);
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_cardano_quadratic_fallback() {
        // Degenerate cubic: solved as a quadratic, clamped to [0, 1].
        let root = cardano_cubic_root(0.0, 1.0, -0.75, 0.125);
        assert!((root - 0.25).abs() < 1e-9);
    }
}
