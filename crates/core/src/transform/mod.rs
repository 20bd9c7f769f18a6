//! Pure texture transforms
//!
//! Remapping ([`normalize`], [`threshold`], [`cloud_exp_curve`]), type and
//! channel conversion ([`to_byte_texture`], [`density_to_rgba`], ...) and
//! [`resample`]. In-place variants take `&mut`; everything else returns a
//! new texture carrying the source's rendering settings.

mod convert;
mod curve;
mod normalize;
mod resample;

pub use convert::{
    density_to_rgba, luminance_to_rgba, to_byte_magnitude, to_byte_texture, to_float_texture,
};
pub use curve::{cloud_exp_curve, threshold, CLOUD_COVER_OFFSET, CLOUD_SHARPNESS};
pub use normalize::{normalize, normalize_with, normalized_copy, value_range, NormalizeFormula};
pub use resample::{resample, scale};
