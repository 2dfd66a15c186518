use num::Float;

/// Center of gravity of a sampled fuzzy set: `Σ(y·μ(y)) / Σμ(y)`.
///
/// Returns `None` when the set carries no mass, in which case the centroid is
/// undefined and the caller decides what to report.
pub(crate) fn centroid<F: Float>(universe: &[F], membership: &[F]) -> Option<F> {
    debug_assert_eq!(universe.len(), membership.len());

    let (num, den) = universe
        .iter()
        .zip(membership)
        .fold((F::zero(), F::zero()), |(num, den), (&y, &mu)| (num + y * mu, den + mu));

    if den > F::zero() {
        Some(num / den)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_symmetric() {
        let ys = [0., 1., 2., 3., 4.];
        let mu = [0., 0.5, 1., 0.5, 0.];

        assert_eq!(centroid(&ys, &mu), Some(2.));
    }

    #[test]
    fn test_centroid_weighted() {
        let ys = [0., 10.];
        let mu = [1., 3.];

        assert_eq!(centroid(&ys, &mu), Some(7.5));
    }

    #[test]
    fn test_centroid_empty_mass() {
        let ys = [0., 1., 2.];
        let mu = [0., 0., 0.];

        assert_eq!(centroid(&ys, &mu), None);
        assert_eq!(centroid::<f64>(&[], &[]), None);
    }
}
