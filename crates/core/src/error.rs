//! Error type shared by every fallible texture and noise operation.

use thiserror::Error;

use crate::texture::Extent;

/// Errors raised by texture construction, copies between resources and
/// noise parameter checks.
///
/// All variants are fail-fast: the operation that returns one leaves its
/// output untouched and produces no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    /// Raw texel data does not hold `extent × channels` elements
    #[error("texture data holds {actual} elements, expected {expected}")]
    DataLength {
        /// Element count implied by the extent and channel count
        expected: usize,
        /// Element count actually supplied
        actual: usize,
    },

    /// Two textures that must share an extent do not
    #[error("extent mismatch: expected {expected}, found {found}")]
    ExtentMismatch {
        /// Extent required by the destination
        expected: Extent,
        /// Extent of the offending source
        found: Extent,
    },

    /// Channel count differs from what the operation requires
    #[error("channel mismatch: expected {expected} channel(s), found {found}")]
    ChannelMismatch {
        /// Channel count required by the operation
        expected: usize,
        /// Channel count of the supplied texture
        found: usize,
    },

    /// A channel index past the texture's channel count
    #[error("channel {channel} out of range for a {channels}-channel texture")]
    ChannelOutOfRange {
        /// Requested channel
        channel: usize,
        /// Channels available
        channels: usize,
    },

    /// Byte textures only come in 8, 24 and 32 bits per pixel
    #[error("unsupported bit depth {0}, expected 8, 24 or 32 bits per pixel")]
    UnsupportedBitDepth(u32),

    /// Octave ratios shrink a recursive level to zero texels
    #[error("octave level {level} collapses to a zero-sized extent {extent}")]
    CollapsedResolution {
        /// Recursion depth (0 = base resolution) at which the collapse happens
        level: u32,
        /// The collapsed extent
        extent: Extent,
    },

    /// Octave ratios grow a recursive level past what one buffer can hold
    #[error("octave level {level} grows to an extent {extent} too large to allocate")]
    ExtentOverflow {
        /// Recursion depth (0 = base resolution) at which the overflow happens
        level: u32,
        /// The oversized extent
        extent: Extent,
    },

    /// A noise parameter outside its usable domain
    #[error("invalid noise parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on `NoiseSpec`
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl TextureError {
    /// Convenience constructor for [`TextureError::InvalidParameter`]
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
