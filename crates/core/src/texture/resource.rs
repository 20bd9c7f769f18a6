//! Texture resource metadata and the contract consumed by engine code.
//!
//! The rendering pipeline owns upload and binding. This module only carries
//! the data it reads from a texture: extents, channels, storage, and the
//! rendering flags that must survive resampling untouched.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::{Extent, Texel};
use crate::error::TextureError;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a texture as seen by change observers.
///
/// Every texture gets a fresh id at construction (clones included), so an
/// observer can tell textures apart without holding a reference to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Receives change notifications for textures whose contents were rewritten.
pub trait TextureObserver {
    /// Called with the id of the texture that changed
    fn texture_changed(&self, id: TextureId);
}

/// Channel layout of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorFormat {
    /// Single intensity channel
    Luminance,
    /// Intensity plus alpha
    LuminanceAlpha,
    /// Three color channels
    Rgb,
    /// Three color channels plus alpha
    Rgba,
}

impl ColorFormat {
    /// Format matching a channel count, if any
    #[must_use]
    pub const fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Luminance),
            2 => Some(Self::LuminanceAlpha),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Byte-texture format for a bits-per-pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::UnsupportedBitDepth`] for anything other than
    /// 8, 24 or 32.
    pub fn from_bits_per_pixel(bits: u32) -> Result<Self, TextureError> {
        match bits {
            8 => Ok(Self::Luminance),
            24 => Ok(Self::Rgb),
            32 => Ok(Self::Rgba),
            other => Err(TextureError::UnsupportedBitDepth(other)),
        }
    }

    /// Number of channels in this format
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Luminance => 1,
            Self::LuminanceAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Sampler wrap mode requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Wrapping {
    /// Tile the texture
    #[default]
    Repeat,
    /// Stretch edge texels
    ClampToEdge,
}

/// Sampler filter requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Filtering {
    /// Nearest texel
    Nearest,
    /// Linear within a mip level
    Bilinear,
    /// Linear within and between mip levels
    #[default]
    Trilinear,
}

/// Rendering flags carried by a texture.
///
/// These are opaque to every operation in this crate; they are only copied
/// from a source texture to any texture derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureSettings {
    /// Whether the renderer should build mipmaps on upload
    pub mipmapping: bool,
    /// Sampler wrap mode
    pub wrapping: Wrapping,
    /// Sampler filter
    pub filtering: Filtering,
    /// Whether the renderer may compress on upload
    pub compression: bool,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            mipmapping: true,
            wrapping: Wrapping::Repeat,
            filtering: Filtering::Trilinear,
            compression: false,
        }
    }
}

/// Data-access contract of a texture resource.
///
/// Anything implementing this can be copied into a [`super::Texture`] of
/// the same texel type.
pub trait TextureResource {
    /// Element type of the backing storage
    type Texel: Texel;

    /// Extent in texels (depth is 1 for 2D resources)
    fn extent(&self) -> Extent;

    /// Channels per texel
    fn channels(&self) -> usize;

    /// Contiguous storage, x fastest, then y, then z, channels interleaved
    fn data(&self) -> &[Self::Texel];

    /// Rendering flags
    fn settings(&self) -> TextureSettings;

    /// Identity used for change notification
    fn id(&self) -> TextureId;

    /// Channel layout, if the channel count maps onto one
    fn color_format(&self) -> Option<ColorFormat> {
        ColorFormat::from_channels(self.channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_formats() {
        assert_eq!(ColorFormat::from_bits_per_pixel(8), Ok(ColorFormat::Luminance));
        assert_eq!(ColorFormat::from_bits_per_pixel(24), Ok(ColorFormat::Rgb));
        assert_eq!(ColorFormat::from_bits_per_pixel(32), Ok(ColorFormat::Rgba));
        assert_eq!(
            ColorFormat::from_bits_per_pixel(16),
            Err(TextureError::UnsupportedBitDepth(16))
        );
    }

    #[test]
    fn test_format_channel_round_trip() {
        for channels in 1..=4 {
            let format = ColorFormat::from_channels(channels).unwrap();
            assert_eq!(format.channels(), channels);
        }
        assert!(ColorFormat::from_channels(5).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = TextureId::next();
        let b = TextureId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
