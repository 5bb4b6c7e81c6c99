//! Seeded site sampling

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::geometry::Rect;

/// Sample `count` uniform sites inside the bounds.
///
/// The same seed always yields the same sites, independent of platform.
pub fn sample_sites(bounds: &Rect, count: usize, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| bounds.sample(&mut rng)).collect()
}
