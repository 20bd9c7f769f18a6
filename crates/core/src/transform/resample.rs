//! Resolution changes through interpolated reads.

use rayon::prelude::*;
use tracing::debug;

use crate::texture::{Dimension, Extent, Texel, Texture, Texture2D};

/// Resamples `source` to `extent`.
///
/// Output texel `(x, y, z)` reads the source at `(x/w, y/h, z/d)` of the
/// output extent with bilinear (2D) or trilinear (3D) interpolation. The
/// channel count and rendering settings are copied from the source. 2D
/// textures ignore `extent.depth`.
#[must_use]
pub fn resample<T: Texel, D: Dimension>(source: &Texture<T, D>, extent: Extent) -> Texture<T, D> {
    let channels = source.channels();
    let mut output = Texture::<T, D>::from_extent(extent, channels);
    output.set_settings(source.settings());

    let extent = output.extent();
    if extent.is_empty() || channels == 0 {
        return output;
    }
    debug!(from = %source.extent(), to = %extent, channels, "Resample");

    let (width, height, depth) = (
        extent.width as f32,
        extent.height as f32,
        extent.depth as f32,
    );
    output
        .data_mut()
        .par_chunks_mut(channels)
        .enumerate()
        .for_each(|(texel, out)| {
            let [x, y, z] = extent.coord_of(texel);
            let coord = [x as f32 / width, y as f32 / height, z as f32 / depth];
            for (channel, value) in out.iter_mut().enumerate() {
                *value = T::from_f32(source.sample(coord, channel));
            }
        });
    output
}

/// 2D [`resample`] to `width × height`.
#[must_use]
pub fn scale<T: Texel>(source: &Texture2D<T>, width: usize, height: usize) -> Texture2D<T> {
    resample(source, Extent::new_2d(width, height))
}
