//! The Mamdani operator set: min t-norm, max s-norm, standard complement,
//! correlation-minimum implication and max aggregation.

/// Fuzzy AND
#[inline]
pub fn t_norm(u: f64, v: f64) -> f64 {
    f64::min(u, v)
}

/// Fuzzy OR
#[inline]
pub fn s_norm(u: f64, v: f64) -> f64 {
    f64::max(u, v)
}

/// Fuzzy NOT
#[inline]
pub fn complement(u: f64) -> f64 {
    1. - u
}

/// Clips a sampled consequent shape at `strength`.
pub fn implication(consequent: &[f64], strength: f64) -> impl Iterator<Item = f64> + '_ {
    consequent.iter().map(move |&mu| t_norm(mu, strength))
}

/// Folds one implied set into the running union, sample by sample.
pub fn aggregate_into(aggregate: &mut [f64], implied: impl IntoIterator<Item = f64>) {
    for (agg, mu) in aggregate.iter_mut().zip(implied) {
        *agg = s_norm(*agg, mu);
    }
}
