#[inline]
pub fn harmonic(x: f64, k: f64, x0: f64) -> f64 {
    let dx = x - x0;
    0.5 * k * dx * dx
}

#[inline]
pub fn periodic_torsion(theta: f64, k: f64, phase: f64, periodicity: u32) -> f64 {
    k * (1.0 + (periodicity as f64 * theta - phase).cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn harmonic_at_equilibrium_is_zero() {
        assert!(f64_approx_equal(harmonic(1.52, 300.0, 1.52), 0.0));
    }

    #[test]
    fn harmonic_is_symmetric_about_equilibrium() {
        let left = harmonic(1.0, 100.0, 1.5);
        let right = harmonic(2.0, 100.0, 1.5);
        assert!(f64_approx_equal(left, right));
    }

    #[test]
    fn harmonic_uses_half_k_convention() {
        assert!(f64_approx_equal(harmonic(2.0, 100.0, 1.0), 50.0));
    }

    #[test]
    fn harmonic_is_non_negative_for_positive_k() {
        for x in [-2.0, 0.0, 0.7, 3.5] {
            assert!(harmonic(x, 42.0, 1.1) >= 0.0);
        }
    }

    #[test]
    fn periodic_torsion_at_in_phase_angle_is_twice_k() {
        assert!(f64_approx_equal(periodic_torsion(0.0, 3.0, 0.0, 1), 6.0));
    }

    #[test]
    fn periodic_torsion_at_opposed_angle_is_zero() {
        assert!(f64_approx_equal(periodic_torsion(PI, 3.0, 0.0, 1), 0.0));
    }

    #[test]
    fn periodic_torsion_phase_shifts_the_minimum() {
        assert!(f64_approx_equal(periodic_torsion(PI, 3.0, PI, 1), 6.0));
    }

    #[test]
    fn periodic_torsion_periodicity_scales_the_angle() {
        // n = 3 puts a maximum every 120 degrees.
        let third = 2.0 * PI / 3.0;
        assert!(f64_approx_equal(periodic_torsion(third, 1.5, 0.0, 3), 3.0));
    }
}
