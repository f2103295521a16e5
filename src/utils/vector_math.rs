/// Vector math utilities for position calculations
///
/// Helper functions for the 3-vector operations used by the topocentric,
/// satellite and shadow computations.

/// Convert RA/Dec coordinates to a unit vector
///
/// # Arguments
/// * `ra_rad` - Right ascension in radians
/// * `dec_rad` - Declination in radians
///
/// # Returns
/// Unit vector [x, y, z] in the equatorial frame the angles refer to
pub fn radec_to_unit_vector(ra_rad: f64, dec_rad: f64) -> [f64; 3] {
    let cos_dec = dec_rad.cos();
    [cos_dec * ra_rad.cos(), cos_dec * ra_rad.sin(), dec_rad.sin()]
}

/// Convert a cartesian vector to (RA, Dec, distance) with RA in [0, 2π)
pub fn vector_to_radec(v: &[f64; 3]) -> (f64, f64, f64) {
    let r = vector_magnitude(v);
    if r == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let ra = v[1].atan2(v[0]).rem_euclid(std::f64::consts::TAU);
    let dec = (v[2] / r).clamp(-1.0, 1.0).asin();
    (ra, dec, r)
}

/// Normalize a 3D vector to unit length
///
/// # Returns
/// Normalized unit vector, or [0, 0, 0] if input magnitude is zero
pub fn normalize_vector(v: &[f64; 3]) -> [f64; 3] {
    let mag = vector_magnitude(v);
    if mag > 0.0 {
        [v[0] / mag, v[1] / mag, v[2] / mag]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Calculate the dot product of two 3D vectors
pub fn dot_product(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Calculate the magnitude (length) of a 3D vector
pub fn vector_magnitude(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[inline]
pub fn subtract(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Rotate a vector about the z axis by `angle` radians (frame rotation, not vector rotation)
#[inline]
pub fn rotate_z(v: &[f64; 3], angle: f64) -> [f64; 3] {
    let (s, c) = angle.sin_cos();
    [c * v[0] + s * v[1], -s * v[0] + c * v[1], v[2]]
}

/// Angle between two vectors in radians
pub fn angle_between(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let cos_angle = dot_product(&normalize_vector(a), &normalize_vector(b));
    cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_radec_round_trip() {
        let v = radec_to_unit_vector(1.2, -0.4);
        let (ra, dec, r) = vector_to_radec(&v);
        assert!((ra - 1.2).abs() < 1e-12);
        assert!((dec + 0.4).abs() < 1e-12);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let v = rotate_z(&[1.0, 0.0, 0.0], FRAC_PI_2);
        assert!(v[0].abs() < 1e-12);
        assert!((v[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_orthogonal() {
        let a = angle_between(&[1.0, 0.0, 0.0], &[0.0, 3.0, 0.0]);
        assert!((a - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(normalize_vector(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }
}
