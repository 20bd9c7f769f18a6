//! Recursive multi-octave noise.
//!
//! Each level draws a primitive seed from the shared generator, builds a
//! lattice at its own resolution and bandwidth, recurses one octave deeper
//! with both scaled by their ratios, and combines the deeper result into
//! its own at the larger of the two resolutions:
//!
//! ```text
//! level(n) = smooth(primitive(n) + m(n) * level(n - 1))
//! m(n)     = -1 if n is even, +1 if n is odd
//! level(0) = smooth(primitive(0))
//! ```
//!
//! [`NoiseKind::Perlin`] moves the smoothing onto the primitive and leaves
//! the sum alone:
//!
//! ```text
//! level(n) = smooth(primitive(n)) + m(n) * level(n - 1)
//! ```

use rayon::prelude::*;
use tracing::{debug, info};

use super::config::{NoiseKind, NoiseSpec};
use super::dump::{DumpSink, Dumper};
use super::primitive::create_noise;
use super::random::{SeededRandom, UniformSource};
use crate::error::TextureError;
use crate::texture::{Dimension, Extent, Texture, Texture2D, Texture3D, D2, D3};

/// Exclusive upper bound (inclusive in the draw) of per-level seeds
const LEVEL_SEED_MAX: u32 = 256;

/// Sign applied to the deeper octave when combining at `octaves` remaining.
#[inline]
#[must_use]
pub fn octave_multiplier(octaves: u32) -> f32 {
    if octaves % 2 == 0 {
        -1.0
    } else {
        1.0
    }
}

/// Sums two single-channel textures at the per-axis maximum of their extents.
///
/// Output texel `(x, y, z)` is
/// `base(x/w, y/h, z/d) + multiplier * other(x/w, y/h, z/d)` where both
/// reads are interpolated from channel 0. The output has one channel and
/// `base`'s rendering settings. Neither input is ever downsampled.
#[must_use]
pub fn combine<D: Dimension>(
    base: &Texture<f32, D>,
    other: &Texture<f32, D>,
    multiplier: f32,
) -> Texture<f32, D> {
    let extent = base.extent().max(other.extent());
    let mut output = Texture::from_extent(extent, 1);
    output.set_settings(base.settings());

    let (width, height, depth) = (
        extent.width as f32,
        extent.height as f32,
        extent.depth as f32,
    );
    output
        .data_mut()
        .par_iter_mut()
        .enumerate()
        .for_each(|(texel, value)| {
            let [x, y, z] = extent.coord_of(texel);
            let coord = [x as f32 / width, y as f32 / height, z as f32 / depth];
            *value = base.sample(coord, 0) + multiplier * other.sample(coord, 0);
        });
    output
}

/// 2D octave noise seeded from `spec.seed`.
///
/// # Errors
///
/// Returns the first error of [`NoiseSpec::validate`]; nothing is generated
/// in that case.
pub fn generate_2d(spec: &NoiseSpec) -> Result<Texture2D<f32>, TextureError> {
    let mut rng = SeededRandom::new(spec.seed);
    generate_with::<D2, _>(spec, &mut rng, None)
}

/// 3D octave noise seeded from `spec.seed`.
///
/// # Errors
///
/// Returns the first error of [`NoiseSpec::validate`].
pub fn generate_3d(spec: &NoiseSpec) -> Result<Texture3D<f32>, TextureError> {
    let mut rng = SeededRandom::new(spec.seed);
    generate_with::<D3, _>(spec, &mut rng, None)
}

/// Octave noise drawing level seeds from a caller-owned generator.
///
/// `spec.seed` is not used: `rng` is consumed from its current position, so
/// successive calls with one generator produce different textures. Every
/// level is offered to `sink` when one is given.
///
/// # Arguments
///
/// * `spec` - Generation parameters
/// * `rng` - Source of the per-level primitive seeds
/// * `sink` - Optional receiver of `generated-…` / `combined-…` dumps
///
/// # Errors
///
/// Returns the first error of [`NoiseSpec::validate`].
pub fn generate_with<D, R>(
    spec: &NoiseSpec,
    rng: &mut R,
    sink: Option<&mut dyn DumpSink>,
) -> Result<Texture<f32, D>, TextureError>
where
    D: Dimension,
    R: UniformSource + ?Sized,
{
    spec.validate::<D>()?;

    let mut dumper = Dumper::new(sink);
    let noise = generate_level::<D, R>(
        spec,
        spec.base_extent::<D>(),
        spec.bandwidth,
        spec.octaves,
        rng,
        &mut dumper,
    );

    info!(
        rank = D::RANK,
        extent = %noise.extent(),
        octaves = spec.octaves,
        bandwidth = spec.bandwidth,
        "Generated octave noise"
    );
    Ok(noise)
}

fn generate_level<D, R>(
    spec: &NoiseSpec,
    extent: Extent,
    bandwidth: u32,
    octaves: u32,
    rng: &mut R,
    dumper: &mut Dumper<'_>,
) -> Texture<f32, D>
where
    D: Dimension,
    R: UniformSource + ?Sized,
{
    let seed = rng.uniform_int(0, LEVEL_SEED_MAX);
    let mut noise = create_noise::<D>(extent, bandwidth, u64::from(seed));
    debug!(extent = %extent, bandwidth, octaves, seed, "Octave primitive");
    dumper.dump(
        || format!("generated-rx{}-b{}", extent.width, bandwidth),
        &noise,
    );

    if spec.kind == NoiseKind::Perlin {
        spec.smoothing.apply(&mut noise, spec.smooth_iterations);
    }

    if octaves != 0 {
        let deeper = generate_level::<D, R>(
            spec,
            extent.scaled(spec.resolution_ratio, D::RANK),
            (bandwidth as f32 * spec.bandwidth_ratio) as u32,
            octaves - 1,
            rng,
            dumper,
        );
        noise = combine(&noise, &deeper, octave_multiplier(octaves));
    }

    if spec.kind == NoiseKind::Value {
        spec.smoothing.apply(&mut noise, spec.smooth_iterations);
    }

    if octaves != 0 {
        dumper.dump(|| format!("combined-l{}-b{}", octaves, bandwidth), &noise);
    }
    noise
}
