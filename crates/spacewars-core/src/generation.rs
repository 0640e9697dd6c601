//! Seeded procedural asteroid fields.
//!
//! Generation is a pure function of `(seed, index)`: every asteroid draws from
//! its own `ChaCha8Rng` stream, so regenerating a world (for example on reset)
//! reproduces the same field without carrying RNG state around.
//!
//! Stream `0` decides how many asteroids the field holds; asteroid `i` uses
//! stream `i + 1`.
//!
//! # Example
//!
//! ```
//! use spacewars_core::generation::{asteroid_count, asteroid_placement};
//! use spacewars_core::{GameConfig, Size};
//!
//! let config = GameConfig::default();
//! let size = Size::new(1024.0, 768.0);
//!
//! assert!(asteroid_count(42, &config) >= config.min_asteroids);
//! assert_eq!(asteroid_placement(42, 3, size, &config), asteroid_placement(42, 3, size, &config));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spacewars_physics::{Size, Vector2};

use crate::config::GameConfig;

const COUNT_STREAM: u64 = 0;

/// Placement of one generated asteroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidPlacement {
    /// Center of the asteroid
    pub position: Vector2,
    /// Collider radius
    pub radius: f64,
}

/// Number of asteroids in the field for `seed`.
///
/// Always within `[min_asteroids, max(min_asteroids, max_asteroids)]`.
#[must_use]
pub fn asteroid_count(seed: i64, config: &GameConfig) -> usize {
    let min = config.min_asteroids;
    let max = config.max_asteroids.max(min);
    rng_for(seed, COUNT_STREAM).gen_range(min..=max)
}

/// Position and radius of asteroid `index` for `seed`.
///
/// Positions fall inside `[0, width) x [0, height)`; degenerate axes collapse
/// to zero.
#[must_use]
pub fn asteroid_placement(
    seed: i64,
    index: usize,
    size: Size,
    config: &GameConfig,
) -> AsteroidPlacement {
    let mut rng = rng_for(seed, index as u64 + 1);

    let x = sample_axis(&mut rng, size.width);
    let y = sample_axis(&mut rng, size.height);
    let (min, max) = (config.min_asteroid_radius, config.max_asteroid_radius);
    let radius = if min.is_finite() && max.is_finite() && max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };

    AsteroidPlacement {
        position: Vector2::new(x, y),
        radius,
    }
}

/// The full field for `seed`, in index order.
pub fn generate_field(
    seed: i64,
    size: Size,
    config: &GameConfig,
) -> impl Iterator<Item = AsteroidPlacement> + '_ {
    (0..asteroid_count(seed, config))
        .map(move |index| asteroid_placement(seed, index, size, config))
}

fn rng_for(seed: i64, stream: u64) -> ChaCha8Rng {
    #[allow(clippy::cast_sign_loss)]
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    rng.set_stream(stream);
    rng
}

fn sample_axis(rng: &mut ChaCha8Rng, extent: f64) -> f64 {
    if extent > 0.0 && extent.is_finite() {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
