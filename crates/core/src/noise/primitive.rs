//! Base lattice of independent uniform samples.

use super::random::{SeededRandom, UniformSource};
use crate::texture::{Dimension, Extent, Texture, Texture2D, Texture3D};

/// Fills a lattice of `extent` with x outermost, then y, then z.
pub(crate) fn create_noise<D: Dimension>(
    extent: Extent,
    amplitude: u32,
    seed: u64,
) -> Texture<f32, D> {
    let mut rng = SeededRandom::new(seed);
    let high = amplitude as f32 * 2.0;
    let mut output = Texture::<f32, D>::from_extent(extent, 1);
    let extent = output.extent();

    for x in 0..extent.width {
        for y in 0..extent.height {
            for z in 0..extent.depth {
                output.texel_mut([x, y, z])[0] = rng.uniform_float(0.0, high);
            }
        }
    }
    output
}

/// One-channel 2D lattice of samples in `[0, 2 * amplitude)`.
///
/// A fresh generator seeded with `seed` fills the lattice with x as the
/// outer loop and y inner, so the same seed always yields the same
/// texture.
///
/// # Arguments
///
/// * `period_x`, `period_y` - Lattice extent (and output texture extent)
/// * `amplitude` - Half of the exclusive upper sample bound
/// * `seed` - Seed for this lattice
#[must_use]
pub fn create_noise_2d(
    period_x: usize,
    period_y: usize,
    amplitude: u32,
    seed: u64,
) -> Texture2D<f32> {
    create_noise(Extent::new_2d(period_x, period_y), amplitude, seed)
}

/// One-channel 3D lattice of samples in `[0, 2 * amplitude)`.
///
/// Filled with x outermost, then y, then z.
#[must_use]
pub fn create_noise_3d(
    period_x: usize,
    period_y: usize,
    period_z: usize,
    amplitude: u32,
    seed: u64,
) -> Texture3D<f32> {
    create_noise(Extent::new_3d(period_x, period_y, period_z), amplitude, seed)
}
