//! Texel type and channel layout conversions.
//!
//! Byte values map onto `[0, 1]` floats by a factor of 255. Float to byte
//! truncates, and out-of-range floats saturate.

use rayon::prelude::*;

use crate::error::TextureError;
use crate::texture::{Dimension, Texel, Texture};

const BYTE_SCALE: f32 = 255.0;

/// Float texture in `[0, 1]` to bytes, `v * 255` truncated.
#[must_use]
pub fn to_byte_texture<D: Dimension>(texture: &Texture<f32, D>) -> Texture<u8, D> {
    let mut output = texture.derived::<u8>(texture.channels());
    output
        .data_mut()
        .par_iter_mut()
        .zip(texture.data().par_iter())
        .for_each(|(out, &v)| *out = u8::from_f32(v * BYTE_SCALE));
    output
}

/// Byte texture to floats in `[0, 1]`, `v / 255`.
#[must_use]
pub fn to_float_texture<D: Dimension>(texture: &Texture<u8, D>) -> Texture<f32, D> {
    let mut output = texture.derived::<f32>(texture.channels());
    output
        .data_mut()
        .par_iter_mut()
        .zip(texture.data().par_iter())
        .for_each(|(out, &v)| *out = f32::from(v) / BYTE_SCALE);
    output
}

/// Greyscale RGBA from a luminance texture: RGB = L, A = full intensity.
///
/// # Errors
///
/// Returns [`TextureError::ChannelMismatch`] unless the input has exactly
/// one channel.
pub fn luminance_to_rgba<T: Texel, D: Dimension>(
    texture: &Texture<T, D>,
) -> Result<Texture<T, D>, TextureError> {
    expand_to_rgba(texture, |l| [l, l, l, T::MAX_INTENSITY])
}

/// White RGBA with a scalar density in alpha: RGB = full intensity, A = v.
///
/// # Errors
///
/// Returns [`TextureError::ChannelMismatch`] unless the input has exactly
/// one channel.
pub fn density_to_rgba<T: Texel, D: Dimension>(
    texture: &Texture<T, D>,
) -> Result<Texture<T, D>, TextureError> {
    let full = T::MAX_INTENSITY;
    expand_to_rgba(texture, |v| [full, full, full, v])
}

fn expand_to_rgba<T, D, F>(
    texture: &Texture<T, D>,
    expand: F,
) -> Result<Texture<T, D>, TextureError>
where
    T: Texel,
    D: Dimension,
    F: Fn(T) -> [T; 4] + Sync,
{
    if texture.channels() != 1 {
        return Err(TextureError::ChannelMismatch {
            expected: 1,
            found: texture.channels(),
        });
    }

    let mut output = texture.derived::<T>(4);
    output
        .data_mut()
        .par_chunks_mut(4)
        .zip(texture.data().par_iter())
        .for_each(|(out, &v)| out.copy_from_slice(&expand(v)));
    Ok(output)
}

/// Signed float texture to bytes by magnitude.
///
/// Positive values scale by the largest value and negative values by the
/// smallest, both scans starting from 0, so `max` and `min` map to 255 and
/// 0 maps to 0. A texture with no positive (or no negative) values divides
/// by zero on that side, which truncates to 0.
///
/// # Errors
///
/// Returns [`TextureError::ChannelMismatch`] unless the input has exactly
/// one channel.
pub fn to_byte_magnitude<D: Dimension>(
    texture: &Texture<f32, D>,
) -> Result<Texture<u8, D>, TextureError> {
    if texture.channels() != 1 {
        return Err(TextureError::ChannelMismatch {
            expected: 1,
            found: texture.channels(),
        });
    }

    let (min, max) = texture.data().iter().fold((0.0_f32, 0.0_f32), |(min, max), &v| {
        (if min < v { min } else { v }, if max > v { max } else { v })
    });

    let mut output = texture.derived::<u8>(1);
    output
        .data_mut()
        .par_iter_mut()
        .zip(texture.data().par_iter())
        .for_each(|(out, &v)| {
            let scaled = if v < 0.0 { v / min } else { v / max };
            *out = u8::from_f32(scaled * BYTE_SCALE);
        });
    Ok(output)
}
