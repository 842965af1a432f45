/*!
 * Request Size Generation
 */

use crate::core::types::Size;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `count` request sizes drawn uniformly from `[min, max)`
///
/// A fixed `seed` reproduces the same sequence; without one the generator is
/// seeded from OS entropy.
pub fn generate_sizes(count: usize, min: Size, max: Size, seed: Option<u64>) -> Vec<Size> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if min >= max {
        return vec![min; count];
    }
    (0..count).map(|_| rng.gen_range(min..max)).collect()
}
