//! Value curves applied element-wise.

use rayon::prelude::*;

use crate::texture::{Dimension, Texel, Texture};

/// Density below which [`cloud_exp_curve`] yields no cloud
pub const CLOUD_COVER_OFFSET: f32 = 0.215;

/// Steepness of the [`cloud_exp_curve`] falloff
pub const CLOUD_SHARPNESS: f32 = 10.0;

/// Zeroes every element strictly below `cutoff`.
pub fn threshold<T: Texel, D: Dimension>(texture: &mut Texture<T, D>, cutoff: T) {
    texture.data_mut().par_iter_mut().for_each(|v| {
        if *v < cutoff {
            *v = T::default();
        }
    });
}

/// Exponential cloud cover curve, in place.
///
/// `v' = 1 - exp(-CLOUD_SHARPNESS * (v - CLOUD_COVER_OFFSET))`, with
/// negative results clamped to 0. Densities at or below the offset vanish
/// and the rest approach 1 quickly.
pub fn cloud_exp_curve<D: Dimension>(texture: &mut Texture<f32, D>) {
    texture.data_mut().par_iter_mut().for_each(|v| {
        let curved = 1.0 - (-CLOUD_SHARPNESS * (*v - CLOUD_COVER_OFFSET)).exp();
        *v = if curved < 0.0 { 0.0 } else { curved };
    });
}
