use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Picks a random candidate not in `exclude`. When every candidate is excluded a random one is
/// reused, so this only returns `None` for an empty pool.
pub fn pick_excluding<'a, R: Rng + ?Sized>(
    pool: &[&'a str],
    exclude: &HashSet<String>,
    rng: &mut R,
) -> Option<&'a str> {
    let fresh: Vec<&'a str> = pool
        .iter()
        .copied()
        .filter(|candidate| !exclude.contains(*candidate))
        .collect();
    fresh
        .choose(rng)
        .or_else(|| pool.choose(rng))
        .copied()
}

/// Between `min` and `max` (inclusive) distinct items, in random order.
pub fn pick_several<R: Rng + ?Sized>(pool: &[&str], min: usize, max: usize, rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(min..=max).min(pool.len());
    pool.choose_multiple(rng, count).map(|s| s.to_string()).collect()
}

/// Order-preserving dedupe of a candidate pool.
pub fn distinct<'a>(pool: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    pool.into_iter().filter(|item| seen.insert(*item)).collect()
}
