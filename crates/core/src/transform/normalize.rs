//! Linear remapping of a texture's value range.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::texture::{Dimension, Texture};

/// Divisor used to bring values into `[0, 1]` before the final remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NormalizeFormula {
    /// `(v - min) / (max - min)`: the result spans exactly `[lo, hi]`
    #[default]
    Range,
    /// `(v - min) / max`, with the max scan starting at the smallest
    /// positive float. Only spans `[lo, hi]` when `min` is 0.
    DivideByMax,
}

/// Smallest and largest element over every channel, or `None` if empty.
#[must_use]
pub fn value_range<D: Dimension>(texture: &Texture<f32, D>) -> Option<(f32, f32)> {
    if texture.is_empty() {
        return None;
    }
    Some(scan(texture.data(), f32::MIN))
}

/// Min/max fold starting from `(f32::MAX, seed_max)`
fn scan(data: &[f32], seed_max: f32) -> (f32, f32) {
    data.iter().fold((f32::MAX, seed_max), |(min, max), &v| {
        (if v < min { v } else { min }, if v > max { v } else { max })
    })
}

/// Remaps every element linearly so the texture spans `[lo, hi]`.
///
/// A constant texture has a zero range; the division is still carried out
/// (yielding NaN) and a warning is logged.
pub fn normalize<D: Dimension>(texture: &mut Texture<f32, D>, lo: f32, hi: f32) {
    normalize_with(texture, lo, hi, NormalizeFormula::Range);
}

/// [`normalize`] with an explicit divisor formula.
pub fn normalize_with<D: Dimension>(
    texture: &mut Texture<f32, D>,
    lo: f32,
    hi: f32,
    formula: NormalizeFormula,
) {
    let seed_max = match formula {
        NormalizeFormula::Range => f32::MIN,
        NormalizeFormula::DivideByMax => f32::MIN_POSITIVE,
    };
    let (min, max) = scan(texture.data(), seed_max);

    let divisor = match formula {
        NormalizeFormula::Range => max - min,
        NormalizeFormula::DivideByMax => max,
    };
    if divisor == 0.0 && !texture.is_empty() {
        warn!(
            ?formula,
            min, max, "Normalizing with a zero divisor, values become non-finite"
        );
    }

    let span = hi - lo;
    for v in texture.data_mut() {
        *v = (*v - min) / divisor * span + lo;
    }
}

/// Normalized copy; the input is left untouched.
#[must_use]
pub fn normalized_copy<D: Dimension>(
    texture: &Texture<f32, D>,
    lo: f32,
    hi: f32,
) -> Texture<f32, D> {
    let mut copy = texture.clone();
    normalize(&mut copy, lo, hi);
    copy
}
