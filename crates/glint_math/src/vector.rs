//! Checked vector helpers on top of `glam::Vec3`.
//!
//! glam provides the arithmetic (add, sub, scalar and element-wise mul, dot,
//! cross, length). The functions here add the operations the tracer needs
//! along with the unit-length preconditions they rely on.

use crate::Vec3;

/// Tolerance used when checking that a direction is unit length.
pub const UNIT_EPSILON: f32 = 1e-5;

/// Returns true if `v` has unit length within [`UNIT_EPSILON`].
#[inline]
pub fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() < UNIT_EPSILON
}

/// Normalize `v`.
///
/// # Panics
///
/// Panics if `v` has zero or non-finite length. Normalizing such a vector is
/// a caller bug, not a recoverable condition.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    let len = v.length();
    assert!(
        len > 0.0 && len.is_finite(),
        "cannot normalize vector {v} with length {len}"
    );
    v / len
}

/// Mirror `d` about the surface normal `n`.
///
/// `n` must be unit length; `d` keeps its magnitude.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    debug_assert!(is_unit(n), "reflect: normal {n} is not unit length");
    d - 2.0 * d.dot(n) * n
}

/// Refract the unit direction `d` through a surface with unit normal `n`.
///
/// `n` must face against `d` and `eta` is the ratio n1/n2 of the refractive
/// indices on the incoming and outgoing side. Returns `None` on total
/// internal reflection, otherwise the unit refracted direction.
#[inline]
pub fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    debug_assert!(is_unit(d), "refract: direction {d} is not unit length");
    debug_assert!(is_unit(n), "refract: normal {n} is not unit length");

    let cos_theta = (-d).dot(n).min(1.0);
    let r_perp = eta * (d + cos_theta * n);
    let discriminant = 1.0 - r_perp.length_squared();
    if discriminant < 0.0 {
        return None;
    }
    let r_parallel = -discriminant.sqrt() * n;
    Some(r_perp + r_parallel)
}

/// Cosine of the angle between the unit direction `d` and the normal `n`
/// facing against it.
#[inline]
pub fn incident_cosine(d: Vec3, n: Vec3) -> f32 {
    (-d).dot(n).min(1.0)
}

/// Linear interpolation between `a` and `b`, parameterized by the vertical
/// component of the unit direction `dir`: `t = (dir.y + 1) / 2`.
///
/// # Panics
///
/// Panics if `dir` is not unit length.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, dir: Vec3) -> Vec3 {
    assert!(is_unit(dir), "lerp: direction {dir} is not unit length");
    let t = 0.5 * (dir.y + 1.0);
    (1.0 - t) * a + t * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let len_sq = v.length_squared();
            if len_sq > 1e-4 && len_sq < 1.0 {
                return v / len_sq.sqrt();
            }
        }
    }

    #[test]
    fn test_cross_is_anticommutative() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        assert_eq!(a.cross(b), -b.cross(a));
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_unit_vector() {
        let v = unit_vector(Vec3::new(3.0, 0.0, 4.0));
        assert!(is_unit(v));
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "cannot normalize")]
    fn test_unit_vector_zero_panics() {
        unit_vector(Vec3::ZERO);
    }

    #[test]
    fn test_reflect_preserves_magnitude() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = random_unit(&mut rng) * rng.gen_range(0.1..10.0);
            let n = random_unit(&mut rng);
            let r = reflect(d, n);
            assert!((r.length() - d.length()).abs() < 1e-4 * d.length().max(1.0));
        }
    }

    #[test]
    fn test_reflect_mirror() {
        let d = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let r = reflect(d, Vec3::Y);
        assert!((r - unit_vector(Vec3::new(1.0, 1.0, 0.0))).length() < 1e-6);
    }

    #[test]
    fn test_refract_is_unit() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut refracted = 0;
        for _ in 0..1000 {
            let n = random_unit(&mut rng);
            let mut d = random_unit(&mut rng);
            if d.dot(n) > 0.0 {
                d = -d;
            }
            let eta = rng.gen_range(0.3..2.5);
            if let Some(r) = refract(d, n, eta) {
                refracted += 1;
                assert!(is_unit(r), "refracted {r} has length {}", r.length());
            }
        }
        assert!(refracted > 0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Grazing ray leaving glass into air
        let d = unit_vector(Vec3::new(1.0, -0.1, 0.0));
        assert!(refract(d, Vec3::Y, 1.5).is_none());
    }

    #[test]
    fn test_refract_straight_through() {
        let r = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((r + Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::ONE;
        let b = Vec3::new(0.5, 0.7, 1.0);
        assert_eq!(lerp(a, b, -Vec3::Y), a);
        assert_eq!(lerp(a, b, Vec3::Y), b);
        assert!((lerp(a, b, Vec3::X) - 0.5 * (a + b)).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "not unit length")]
    fn test_lerp_rejects_non_unit() {
        lerp(Vec3::ZERO, Vec3::ONE, Vec3::new(0.0, 2.0, 0.0));
    }
}
