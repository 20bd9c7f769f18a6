//! Dense 2D/3D texel buffers
//!
//! [`Texture`] is generic over its element type ([`Texel`]: `f32` or `u8`)
//! and its dimensionality ([`D2`] or [`D3`]). Storage is one contiguous
//! `Vec`, x fastest, then y, then z, with channels interleaved per texel:
//!
//! ```text
//! index(x, y, z, c) = ((z * height + y) * width + x) * channels + c
//! ```
//!
//! 2D textures carry a depth of 1 so that filters and samplers can walk
//! every axis generically.

mod interpolate;
mod resource;
mod texel;

pub use resource::{
    ColorFormat, Filtering, TextureId, TextureObserver, TextureResource, TextureSettings, Wrapping,
};
pub use texel::Texel;

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::TextureError;

/// Texture dimensionality marker.
///
/// Implemented by [`D2`] and [`D3`]. Interpolation is the only piece of
/// texture logic that is written out once per dimensionality; everything
/// else walks the first [`Dimension::RANK`] axes of an [`Extent`].
pub trait Dimension: Copy + fmt::Debug + Send + Sync + 'static {
    /// Number of spatial axes
    const RANK: usize;

    /// Interpolated read of `channel` at normalized coordinates.
    ///
    /// Only the first `RANK` coordinates are used.
    fn interpolate<T: Texel>(texture: &Texture<T, Self>, coord: [f32; 3], channel: usize) -> f32;
}

/// Two-dimensional textures (bilinear sampling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D2;

/// Three-dimensional textures (trilinear sampling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D3;

/// Texture size in texels along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Texels along x
    pub width: usize,
    /// Texels along y
    pub height: usize,
    /// Texels along z (1 for 2D textures)
    pub depth: usize,
}

impl Extent {
    /// Extent of a 2D texture
    #[must_use]
    pub const fn new_2d(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: 1,
        }
    }

    /// Extent of a 3D texture
    #[must_use]
    pub const fn new_3d(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of texels
    #[must_use]
    pub const fn texel_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Number of texels, or `None` if it does not fit in `usize`
    #[must_use]
    pub const fn checked_texel_count(&self) -> Option<usize> {
        match self.width.checked_mul(self.height) {
            Some(area) => area.checked_mul(self.depth),
            None => None,
        }
    }

    /// Whether any axis is zero
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// Length along `axis` (0 = x, 1 = y, 2 = z)
    #[must_use]
    pub const fn axis(&self, axis: usize) -> usize {
        match axis {
            0 => self.width,
            1 => self.height,
            _ => self.depth,
        }
    }

    /// Distance in texels between neighbors along `axis`
    #[must_use]
    pub const fn stride(&self, axis: usize) -> usize {
        match axis {
            0 => 1,
            1 => self.width,
            _ => self.width * self.height,
        }
    }

    /// Per-axis maximum of two extents
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
            depth: self.depth.max(other.depth),
        }
    }

    /// Scales the first `rank` axes by `ratio`, truncating toward zero.
    ///
    /// Axes past `rank` are left alone so a 2D extent keeps its depth of 1.
    #[must_use]
    pub fn scaled(self, ratio: f32, rank: usize) -> Self {
        let scale = |len: usize| (len as f32 * ratio) as usize;
        Self {
            width: scale(self.width),
            height: if rank >= 2 { scale(self.height) } else { self.height },
            depth: if rank >= 3 { scale(self.depth) } else { self.depth },
        }
    }

    /// Texel coordinate of a flat texel index
    #[must_use]
    pub const fn coord_of(&self, texel: usize) -> [usize; 3] {
        let x = texel % self.width;
        let y = (texel / self.width) % self.height;
        let z = texel / (self.width * self.height);
        [x, y, z]
    }

    /// Flat texel index of a coordinate
    #[must_use]
    pub const fn index_of(&self, coord: [usize; 3]) -> usize {
        (coord[2] * self.height + coord[1]) * self.width + coord[0]
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Policy for neighbor reads that fall outside the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Replicate the edge texel. Used by every filter, so borders keep their
    /// energy instead of darkening.
    #[default]
    Clamp,
    /// Tile the texture
    Wrap,
}

impl EdgeMode {
    /// Maps a possibly out-of-range coordinate onto `0..len`.
    ///
    /// `len` must be non-zero.
    #[inline]
    #[must_use]
    pub fn resolve(self, coord: isize, len: usize) -> usize {
        match self {
            Self::Clamp => coord.clamp(0, len as isize - 1) as usize,
            Self::Wrap => coord.rem_euclid(len as isize) as usize,
        }
    }
}

/// A dense texel buffer.
///
/// Extent and channel count are fixed at construction and the texture
/// exclusively owns its storage. Dropping it releases the storage.
pub struct Texture<T: Texel, D: Dimension> {
    extent: Extent,
    channels: usize,
    data: Vec<T>,
    settings: TextureSettings,
    id: TextureId,
    _dimension: PhantomData<D>,
}

/// 2D texture
pub type Texture2D<T> = Texture<T, D2>;

/// 3D texture
pub type Texture3D<T> = Texture<T, D3>;

impl<T: Texel, D: Dimension> Texture<T, D> {
    /// Zero-filled texture of the given extent.
    ///
    /// For 2D textures the depth is forced to 1.
    #[must_use]
    pub fn from_extent(extent: Extent, channels: usize) -> Self {
        let extent = Self::fit_extent(extent);
        Self {
            extent,
            channels,
            data: vec![T::default(); extent.texel_count() * channels],
            settings: TextureSettings::default(),
            id: TextureId::next(),
            _dimension: PhantomData,
        }
    }

    /// Wraps existing texel data.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::DataLength`] if `data` does not hold exactly
    /// `extent.texel_count() * channels` elements.
    pub fn from_extent_data(
        extent: Extent,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, TextureError> {
        let extent = Self::fit_extent(extent);
        let expected = extent.texel_count() * channels;
        if data.len() != expected {
            return Err(TextureError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            extent,
            channels,
            data,
            settings: TextureSettings::default(),
            id: TextureId::next(),
            _dimension: PhantomData,
        })
    }

    /// Copy of any resource with the same texel type and dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::ExtentMismatch`] when a 3D resource with a
    /// depth other than 1 is read into a 2D texture, or
    /// [`TextureError::DataLength`] when the resource's storage does not
    /// match its own extent.
    pub fn from_resource<R>(resource: &R) -> Result<Self, TextureError>
    where
        R: TextureResource<Texel = T>,
    {
        let extent = resource.extent();
        if D::RANK == 2 && extent.depth != 1 {
            return Err(TextureError::ExtentMismatch {
                expected: Extent::new_2d(extent.width, extent.height),
                found: extent,
            });
        }
        let mut texture =
            Self::from_extent_data(extent, resource.channels(), resource.data().to_vec())?;
        texture.settings = resource.settings();
        Ok(texture)
    }

    fn fit_extent(extent: Extent) -> Extent {
        if D::RANK == 2 {
            Extent::new_2d(extent.width, extent.height)
        } else {
            extent
        }
    }

    /// Extent in texels
    #[inline]
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Width in texels
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.extent.width
    }

    /// Height in texels
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.extent.height
    }

    /// Depth in texels (1 for 2D textures)
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.extent.depth
    }

    /// Channels per texel
    #[inline]
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Whether the texture holds no texels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Channel layout, if the channel count maps onto one
    #[must_use]
    pub fn color_format(&self) -> Option<ColorFormat> {
        ColorFormat::from_channels(self.channels)
    }

    /// Identity used for change notification
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Rendering flags
    #[must_use]
    pub fn settings(&self) -> TextureSettings {
        self.settings
    }

    /// Replaces the rendering flags
    pub fn set_settings(&mut self, settings: TextureSettings) {
        self.settings = settings;
    }

    /// Raw storage
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Raw storage, mutable
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the texture and returns its storage
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Swaps the storage with a scratch buffer of identical length.
    pub(crate) fn swap_data(&mut self, scratch: &mut Vec<T>) {
        debug_assert_eq!(scratch.len(), self.data.len());
        std::mem::swap(&mut self.data, scratch);
    }

    /// Channels of the texel at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the extent.
    #[inline]
    #[must_use]
    pub fn texel(&self, coord: [usize; 3]) -> &[T] {
        let start = self.element_index(coord);
        &self.data[start..start + self.channels]
    }

    /// Mutable channels of the texel at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the extent.
    #[inline]
    pub fn texel_mut(&mut self, coord: [usize; 3]) -> &mut [T] {
        let start = self.element_index(coord);
        &mut self.data[start..start + self.channels]
    }

    /// Channels of the texel at a signed coordinate, resolving each axis
    /// with `mode`.
    ///
    /// # Panics
    ///
    /// Panics if the texture is empty.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, coord: [isize; 3], mode: EdgeMode) -> &[T] {
        let resolved = [
            mode.resolve(coord[0], self.extent.width),
            mode.resolve(coord[1], self.extent.height),
            mode.resolve(coord[2], self.extent.depth),
        ];
        self.texel(resolved)
    }

    /// Mutable channels of the texel at a signed coordinate, resolving each
    /// axis with `mode`.
    ///
    /// # Panics
    ///
    /// Panics if the texture is empty.
    #[inline]
    pub fn neighbor_mut(&mut self, coord: [isize; 3], mode: EdgeMode) -> &mut [T] {
        let resolved = [
            mode.resolve(coord[0], self.extent.width),
            mode.resolve(coord[1], self.extent.height),
            mode.resolve(coord[2], self.extent.depth),
        ];
        self.texel_mut(resolved)
    }

    #[inline]
    fn element_index(&self, coord: [usize; 3]) -> usize {
        assert!(
            coord[0] < self.extent.width
                && coord[1] < self.extent.height
                && coord[2] < self.extent.depth,
            "Texel coordinates out of bounds"
        );
        self.extent.index_of(coord) * self.channels
    }

    /// Sets every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Interpolated read of `channel` at normalized coordinates in `[0, 1]`.
    ///
    /// Bilinear for 2D, trilinear for 3D. Returns 0 for an empty texture or
    /// a channel past the channel count.
    #[inline]
    #[must_use]
    pub fn sample(&self, coord: [f32; 3], channel: usize) -> f32 {
        if self.is_empty() || channel >= self.channels {
            return 0.0;
        }
        D::interpolate(self, coord, channel)
    }

    /// Overwrites this texture's storage with another resource's.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::ExtentMismatch`] or
    /// [`TextureError::ChannelMismatch`] when the two layouts differ. The
    /// destination is left untouched on error.
    pub fn copy_data_from<R>(&mut self, source: &R) -> Result<(), TextureError>
    where
        R: TextureResource<Texel = T>,
    {
        if source.extent() != self.extent {
            return Err(TextureError::ExtentMismatch {
                expected: self.extent,
                found: source.extent(),
            });
        }
        if source.channels() != self.channels {
            return Err(TextureError::ChannelMismatch {
                expected: self.channels,
                found: source.channels(),
            });
        }
        if source.data().len() != self.data.len() {
            return Err(TextureError::DataLength {
                expected: self.data.len(),
                actual: source.data().len(),
            });
        }
        self.data.copy_from_slice(source.data());
        Ok(())
    }

    /// Single-channel copy of one channel.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::ChannelOutOfRange`] if `channel` is not below
    /// the channel count.
    pub fn extract_channel(&self, channel: usize) -> Result<Self, TextureError> {
        if channel >= self.channels {
            return Err(TextureError::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|texel| texel[channel])
            .collect();
        let mut single = Self::from_extent_data(self.extent, 1, data)?;
        single.settings = self.settings;
        Ok(single)
    }

    /// Notifies `observer` that this texture's contents changed.
    pub fn rebind(&self, observer: &dyn TextureObserver) {
        observer.texture_changed(self.id);
    }

    /// Texture with the same extent and settings but other channels/type.
    pub(crate) fn derived<U: Texel>(&self, channels: usize) -> Texture<U, D> {
        let mut texture = Texture::<U, D>::from_extent(self.extent, channels);
        texture.settings = self.settings;
        texture
    }
}

impl<T: Texel> Texture<T, D2> {
    /// Zero-filled 2D texture
    #[must_use]
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self::from_extent(Extent::new_2d(width, height), channels)
    }

    /// 2D texture over existing data.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::DataLength`] on a length mismatch.
    pub fn from_data(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, TextureError> {
        Self::from_extent_data(Extent::new_2d(width, height), channels, data)
    }

    /// Channels of pixel `(x, y)`
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        self.texel([x, y, 0])
    }

    /// Mutable channels of pixel `(x, y)`
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [T] {
        self.texel_mut([x, y, 0])
    }
}

impl Texture<u8, D2> {
    /// Zero-filled byte texture from a bits-per-pixel value (8, 24 or 32).
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::UnsupportedBitDepth`] for any other depth.
    pub fn with_bit_depth(
        width: usize,
        height: usize,
        bits_per_pixel: u32,
    ) -> Result<Self, TextureError> {
        let format = ColorFormat::from_bits_per_pixel(bits_per_pixel)?;
        Ok(Self::new(width, height, format.channels()))
    }
}

impl<T: Texel> Texture<T, D3> {
    /// Zero-filled 3D texture
    #[must_use]
    pub fn new(width: usize, height: usize, depth: usize, channels: usize) -> Self {
        Self::from_extent(Extent::new_3d(width, height, depth), channels)
    }

    /// 3D texture over existing data.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::DataLength`] on a length mismatch.
    pub fn from_data(
        width: usize,
        height: usize,
        depth: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, TextureError> {
        Self::from_extent_data(Extent::new_3d(width, height, depth), channels, data)
    }

    /// Channels of voxel `(x, y, z)`
    #[inline]
    #[must_use]
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> &[T] {
        self.texel([x, y, z])
    }

    /// Mutable channels of voxel `(x, y, z)`
    #[inline]
    pub fn voxel_mut(&mut self, x: usize, y: usize, z: usize) -> &mut [T] {
        self.texel_mut([x, y, z])
    }
}

impl<T: Texel, D: Dimension> Clone for Texture<T, D> {
    /// Deep copy with a fresh [`TextureId`]
    fn clone(&self) -> Self {
        Self {
            extent: self.extent,
            channels: self.channels,
            data: self.data.clone(),
            settings: self.settings,
            id: TextureId::next(),
            _dimension: PhantomData,
        }
    }
}

impl<T: Texel, D: Dimension> PartialEq for Texture<T, D> {
    /// Textures compare by layout and contents, never by id
    fn eq(&self, other: &Self) -> bool {
        self.extent == other.extent && self.channels == other.channels && self.data == other.data
    }
}

impl<T: Texel, D: Dimension> fmt::Debug for Texture<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("rank", &D::RANK)
            .field("extent", &self.extent)
            .field("channels", &self.channels)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: Texel, D: Dimension> TextureResource for Texture<T, D> {
    type Texel = T;

    fn extent(&self) -> Extent {
        self.extent
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn data(&self) -> &[T] {
        &self.data
    }

    fn settings(&self) -> TextureSettings {
        self.settings
    }

    fn id(&self) -> TextureId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_texture_creation() {
        let texture = Texture2D::<f32>::new(10, 20, 3);
        assert_eq!(texture.width(), 10);
        assert_eq!(texture.height(), 20);
        assert_eq!(texture.depth(), 1);
        assert_eq!(texture.data().len(), 600);
        assert!(texture.data().iter().all(|&v| v == 0.0));
        assert_eq!(texture.color_format(), Some(ColorFormat::Rgb));
    }

    #[test]
    fn test_3d_element_count() {
        let texture = Texture3D::<u8>::new(4, 5, 6, 2);
        assert_eq!(texture.data().len(), 4 * 5 * 6 * 2);
        assert_eq!(texture.extent(), Extent::new_3d(4, 5, 6));
    }

    #[test]
    fn test_texel_layout_is_x_fastest() {
        let mut texture = Texture3D::<f32>::new(3, 4, 5, 2);
        texture.voxel_mut(1, 2, 3)[1] = 7.0;
        let index = ((3 * 4 + 2) * 3 + 1) * 2 + 1;
        assert_eq!(texture.data()[index], 7.0);
    }

    #[test]
    fn test_from_data_rejects_wrong_length() {
        let result = Texture2D::<u8>::from_data(2, 2, 1, vec![0; 3]);
        assert_eq!(
            result.unwrap_err(),
            TextureError::DataLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "Texel coordinates out of bounds")]
    fn test_bounds_check() {
        let texture = Texture2D::<f32>::new(4, 4, 1);
        let _ = texture.pixel(4, 0);
    }

    #[test]
    fn test_edge_modes() {
        assert_eq!(EdgeMode::Clamp.resolve(-3, 5), 0);
        assert_eq!(EdgeMode::Clamp.resolve(7, 5), 4);
        assert_eq!(EdgeMode::Clamp.resolve(2, 5), 2);
        assert_eq!(EdgeMode::Wrap.resolve(-1, 5), 4);
        assert_eq!(EdgeMode::Wrap.resolve(5, 5), 0);
        assert_eq!(EdgeMode::Wrap.resolve(12, 5), 2);
    }

    #[test]
    fn test_neighbor_access() {
        let data: Vec<f32> = (0..9).map(|v| v as f32).collect();
        let texture = Texture2D::from_data(3, 3, 1, data).unwrap();
        assert_eq!(texture.neighbor([-1, 0, 0], EdgeMode::Clamp)[0], 0.0);
        assert_eq!(texture.neighbor([-1, 0, 0], EdgeMode::Wrap)[0], 2.0);
        assert_eq!(texture.neighbor([1, 5, 0], EdgeMode::Clamp)[0], 7.0);
        assert_eq!(texture.neighbor([1, 1, -1], EdgeMode::Clamp)[0], 4.0);
    }

    #[test]
    fn test_neighbor_write() {
        let mut texture = Texture2D::<f32>::new(3, 2, 1);
        texture.neighbor_mut([-4, 0, 0], EdgeMode::Clamp)[0] = 1.0;
        texture.neighbor_mut([3, 9, 0], EdgeMode::Clamp)[0] = 2.0;
        texture.neighbor_mut([-1, -1, 0], EdgeMode::Wrap)[0] = 3.0;
        assert_eq!(texture.data(), &[1.0, 0.0, 0.0, 0.0, 0.0, 3.0]);
        assert_eq!(texture.pixel(2, 1)[0], 3.0);

        let mut volume = Texture3D::<u8>::new(2, 2, 2, 2);
        volume.neighbor_mut([0, 0, 5], EdgeMode::Clamp)[1] = 9;
        assert_eq!(volume.voxel(0, 0, 1), &[0, 9]);
    }

    #[test]
    fn test_bit_depth_constructor() {
        let rgb = Texture2D::<u8>::with_bit_depth(4, 4, 24).unwrap();
        assert_eq!(rgb.channels(), 3);
        assert_eq!(
            Texture2D::<u8>::with_bit_depth(4, 4, 12).unwrap_err(),
            TextureError::UnsupportedBitDepth(12)
        );
    }

    #[test]
    fn test_copy_data_from() {
        let source = Texture2D::from_data(2, 1, 2, vec![1u8, 2, 3, 4]).unwrap();
        let mut target = Texture2D::<u8>::new(2, 1, 2);
        target.copy_data_from(&source).unwrap();
        assert_eq!(target.data(), &[1, 2, 3, 4]);
        assert_ne!(target.id(), source.id());
    }

    #[test]
    fn test_copy_data_rejects_mismatch() {
        let source = Texture2D::<u8>::new(2, 2, 1);
        let mut wrong_size = Texture2D::<u8>::new(3, 2, 1);
        assert!(matches!(
            wrong_size.copy_data_from(&source),
            Err(TextureError::ExtentMismatch { .. })
        ));

        let mut wrong_channels = Texture2D::<u8>::new(2, 2, 4);
        assert_eq!(
            wrong_channels.copy_data_from(&source),
            Err(TextureError::ChannelMismatch {
                expected: 4,
                found: 1
            })
        );
        assert!(wrong_channels.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_from_resource_rejects_volume_into_2d() {
        let volume = Texture3D::<u8>::new(2, 2, 3, 1);
        assert!(matches!(
            Texture2D::<u8>::from_resource(&volume),
            Err(TextureError::ExtentMismatch { .. })
        ));

        let slab = Texture3D::<u8>::new(2, 2, 1, 1);
        let flat = Texture2D::<u8>::from_resource(&slab).unwrap();
        assert_eq!(flat.extent(), Extent::new_2d(2, 2));
    }

    #[test]
    fn test_extract_channel() {
        let data = vec![10u8, 20, 30, 40, 11, 21, 31, 41];
        let rgba = Texture2D::from_data(2, 1, 4, data).unwrap();
        let green = rgba.extract_channel(1).unwrap();
        assert_eq!(green.channels(), 1);
        assert_eq!(green.data(), &[20, 21]);
        assert_eq!(
            rgba.extract_channel(4).unwrap_err(),
            TextureError::ChannelOutOfRange {
                channel: 4,
                channels: 4
            }
        );
    }

    #[test]
    fn test_clone_gets_fresh_id() {
        let texture = Texture2D::<f32>::new(2, 2, 1);
        let copy = texture.clone();
        assert_eq!(texture, copy);
        assert_ne!(texture.id(), copy.id());
    }

    #[test]
    fn test_rebind_notifies_with_id() {
        struct Recorder(RefCell<Vec<TextureId>>);
        impl TextureObserver for Recorder {
            fn texture_changed(&self, id: TextureId) {
                self.0.borrow_mut().push(id);
            }
        }

        let recorder = Recorder(RefCell::new(Vec::new()));
        let texture = Texture2D::<u8>::new(1, 1, 1);
        texture.rebind(&recorder);
        assert_eq!(recorder.0.borrow().as_slice(), &[texture.id()]);
    }

    #[test]
    fn test_extent_scaling_truncates() {
        let extent = Extent::new_3d(8, 5, 3);
        assert_eq!(extent.scaled(0.5, 3), Extent::new_3d(4, 2, 1));
        assert_eq!(Extent::new_2d(8, 5).scaled(0.5, 2), Extent::new_2d(4, 2));
    }

    #[test]
    fn test_extent_emptiness_and_overflow() {
        assert!(Extent::new_3d(4, 0, 4).is_empty());
        assert!(!Extent::new_2d(1, 1).is_empty());
        let huge = Extent::new_3d(usize::MAX, 2, 1);
        assert!(!huge.is_empty());
        assert_eq!(huge.checked_texel_count(), None);
        assert_eq!(Extent::new_3d(3, 4, 5).checked_texel_count(), Some(60));
    }

    #[test]
    fn test_coord_index_round_trip() {
        let extent = Extent::new_3d(3, 4, 5);
        for texel in 0..extent.texel_count() {
            assert_eq!(extent.index_of(extent.coord_of(texel)), texel);
        }
    }
}
