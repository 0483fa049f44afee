#[inline]
pub fn lennard_jones_12_6(dist: f64, r_min: f64, well_depth: f64) -> f64 {
    if dist < 1e-6 {
        return 1e10;
    }
    let rho = r_min / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    well_depth * (rho12 - 2.0 * rho6)
}

/// Combines per-atom Lennard-Jones parameters into pair parameters.
///
/// The minimum-energy distance is the sum of the two radii and the well depth is the
/// geometric mean of the two well depths. A zero well depth on either side turns the
/// pair off.
#[inline]
pub fn combine_lennard_jones(radius_i: f64, eps_i: f64, radius_j: f64, eps_j: f64) -> (f64, f64) {
    (radius_i + radius_j, (eps_i * eps_j).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn lennard_jones_at_minimum_distance_returns_negative_well_depth() {
        let energy = lennard_jones_12_6(2.0, 2.0, 10.0);
        assert!(f64_approx_equal(energy, -10.0));
    }

    #[test]
    fn lennard_jones_at_very_small_distance_returns_large_positive_energy() {
        let energy = lennard_jones_12_6(1e-7, 2.0, 10.0);
        assert!(f64_approx_equal(energy, 1e10));
    }

    #[test]
    fn lennard_jones_vanishes_at_large_distance() {
        assert!(lennard_jones_12_6(100.0, 3.5, 0.1).abs() < 1e-9);
    }

    #[test]
    fn combine_sums_radii_and_takes_geometric_mean_of_well_depths() {
        let (r_min, eps) = combine_lennard_jones(1.5, 0.04, 2.0, 0.16);
        assert!(f64_approx_equal(r_min, 3.5));
        assert!(f64_approx_equal(eps, 0.08));
    }

    #[test]
    fn combine_with_zero_well_depth_turns_pair_off() {
        let (_, eps) = combine_lennard_jones(1.5, 0.0, 2.0, 0.16);
        assert_eq!(eps, 0.0);
        assert_eq!(lennard_jones_12_6(3.0, 3.5, eps), 0.0);
    }
}
