//! Opaque texture handles and the operations exposed on them.

use std::ptr;

use texgen_core::filter::box_blur;
use texgen_core::noise::{self, create_noise_2d};
use texgen_core::transform::{
    cloud_exp_curve, density_to_rgba, normalize, threshold, to_byte_texture,
};
use texgen_core::{Extent, NoiseKind, NoiseSpec, SmoothingPolicy, Texture2D, Texture3D};

use crate::error::{DefaultTexgenError, TexgenErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};

/// Noise generation parameters.
///
/// `depth` is ignored by 2D generation. When `legacy_stencil` is true the
/// center-weighted stencil smooths each level and `half_window` is unused.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TexgenNoiseParams {
    /// Base lattice width in texels
    pub width: u32,
    /// Base lattice height in texels
    pub height: u32,
    /// Base lattice depth in texels (3D only)
    pub depth: u32,
    /// Base octave amplitude
    pub bandwidth: u32,
    /// Per-octave resolution factor
    pub resolution_ratio: f32,
    /// Per-octave bandwidth factor
    pub bandwidth_ratio: f32,
    /// Smoothing iterations per level
    pub smooth_iterations: u32,
    /// Octaves below the base level
    pub octaves: u32,
    /// Root seed
    pub seed: u64,
    /// Box blur half window
    pub half_window: u32,
    /// Use the legacy stencil instead of the box blur
    pub legacy_stencil: bool,
    /// Smooth each primitive before combining instead of after
    pub perlin: bool,
}

impl From<&TexgenNoiseParams> for NoiseSpec {
    fn from(params: &TexgenNoiseParams) -> Self {
        let smoothing = if params.legacy_stencil {
            SmoothingPolicy::LegacyStencil
        } else {
            SmoothingPolicy::Separable {
                half_window: params.half_window as usize,
            }
        };
        NoiseSpec {
            resolution: Extent::new_3d(
                params.width as usize,
                params.height as usize,
                params.depth as usize,
            ),
            bandwidth: params.bandwidth,
            resolution_ratio: params.resolution_ratio,
            bandwidth_ratio: params.bandwidth_ratio,
            smooth_iterations: params.smooth_iterations,
            octaves: params.octaves,
            seed: params.seed,
            smoothing,
            kind: if params.perlin {
                NoiseKind::Perlin
            } else {
                NoiseKind::Value
            },
        }
    }
}

/// Texture extent in texels (depth is 1 for 2D textures).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexgenExtent {
    /// Texels along x
    pub width: u32,
    /// Texels along y
    pub height: u32,
    /// Texels along z
    pub depth: u32,
    /// Channels per texel
    pub channels: u32,
}

/// A single float texture owned by the caller.
///
/// Created by `texgen_generate_2d`, `texgen_generate_3d` or
/// `texgen_create_noise_2d`; released with `texgen_texture_destroy`.
pub struct TexgenTexture {
    inner: TextureKind,
}

enum TextureKind {
    Flat(Texture2D<f32>),
    Volume(Texture3D<f32>),
}

/// Runs `$body` with `$texture` bound to the inner 2D or 3D texture.
macro_rules! with_texture {
    ($handle:expr, $texture:ident => $body:expr) => {
        match $handle {
            TextureKind::Flat($texture) => $body,
            TextureKind::Volume($texture) => $body,
        }
    };
}

impl TexgenTexture {
    fn flat(texture: Texture2D<f32>) -> Box<Self> {
        Box::new(Self {
            inner: TextureKind::Flat(texture),
        })
    }

    fn volume(texture: Texture3D<f32>) -> Box<Self> {
        Box::new(Self {
            inner: TextureKind::Volume(texture),
        })
    }

    fn extent(&self) -> Extent {
        with_texture!(&self.inner, texture => texture.extent())
    }

    fn channels(&self) -> usize {
        with_texture!(&self.inner, texture => texture.channels())
    }

    fn data(&self) -> &[f32] {
        with_texture!(&self.inner, texture => texture.data())
    }

    fn rgba8(&self) -> Result<Vec<u8>, DefaultTexgenError> {
        with_texture!(&self.inner, texture => {
            Ok(to_byte_texture(&density_to_rgba(texture)?).into_data())
        })
    }
}

/// Writes a freshly created texture (or null on error) to `out_texture`.
///
/// # Safety
/// `out_texture` must be non-null and writable.
unsafe fn publish(
    result: Result<Box<TexgenTexture>, DefaultTexgenError>,
    out_texture: *mut *mut TexgenTexture,
) -> TexgenErrorCode {
    match track_result(result) {
        Ok(texture) => {
            unsafe {
                *out_texture = Box::into_raw(texture);
            }
            TexgenErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_texture = ptr::null_mut();
            }
            code
        }
    }
}

/// Generates 2D multi-octave noise.
///
/// Returns
/// - `TexgenErrorCode::Ok` (0): success, `out_texture` holds a new texture
/// - `TexgenErrorCode::NullPointer`: `params` or `out_texture` is null
/// - `TexgenErrorCode::CollapsedResolution`: an octave would have zero texels
/// - `TexgenErrorCode::InvalidParameter`: a ratio is negative or not finite
///
/// # Safety
///
/// - `params` must point to a valid `TexgenNoiseParams`.
/// - `out_texture` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned texture and MUST call `texgen_texture_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn texgen_generate_2d(
    params: *const TexgenNoiseParams,
    out_texture: *mut *mut TexgenTexture,
) -> TexgenErrorCode {
    if out_texture.is_null() {
        return track_error(&DefaultTexgenError::null_pointer("out_texture"));
    }
    let Some(params) = (unsafe { params.as_ref() }) else {
        unsafe {
            *out_texture = ptr::null_mut();
        }
        return track_error(&DefaultTexgenError::null_pointer("params"));
    };

    let spec = NoiseSpec::from(params);
    let result = noise::generate_2d(&spec)
        .map(TexgenTexture::flat)
        .map_err(DefaultTexgenError::from);
    unsafe { publish(result, out_texture) }
}

/// Generates 3D multi-octave noise.
///
/// Same contract and error codes as `texgen_generate_2d`.
///
/// # Safety
///
/// - `params` must point to a valid `TexgenNoiseParams`.
/// - `out_texture` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned texture and MUST call `texgen_texture_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn texgen_generate_3d(
    params: *const TexgenNoiseParams,
    out_texture: *mut *mut TexgenTexture,
) -> TexgenErrorCode {
    if out_texture.is_null() {
        return track_error(&DefaultTexgenError::null_pointer("out_texture"));
    }
    let Some(params) = (unsafe { params.as_ref() }) else {
        unsafe {
            *out_texture = ptr::null_mut();
        }
        return track_error(&DefaultTexgenError::null_pointer("params"));
    };

    let spec = NoiseSpec::from(params);
    let result = noise::generate_3d(&spec)
        .map(TexgenTexture::volume)
        .map_err(DefaultTexgenError::from);
    unsafe { publish(result, out_texture) }
}

/// Creates a single lattice of uniform samples in `[0, 2 * amplitude)`.
///
/// # Safety
///
/// - `out_texture` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned texture and MUST call `texgen_texture_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn texgen_create_noise_2d(
    width: u32,
    height: u32,
    amplitude: u32,
    seed: u64,
    out_texture: *mut *mut TexgenTexture,
) -> TexgenErrorCode {
    if out_texture.is_null() {
        return track_error(&DefaultTexgenError::null_pointer("out_texture"));
    }
    if width == 0 || height == 0 {
        let error = DefaultTexgenError::invalid_parameter(format!(
            "Noise lattice must be non-empty, got {width}x{height}"
        ));
        return unsafe { publish(Err(error), out_texture) };
    }

    let texture = create_noise_2d(width as usize, height as usize, amplitude, seed);
    unsafe { publish(Ok(TexgenTexture::flat(texture)), out_texture) }
}

/// Destroys a texture previously returned by this library.
///
/// If `texture` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been returned by a `texgen_*` constructor.
/// - The pointer MUST NOT have been freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn texgen_texture_destroy(texture: *mut TexgenTexture) {
    if texture.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `publish` and is
    // non-null; dropping the Box frees the texel storage.
    unsafe {
        drop(Box::from_raw(texture));
    }
}

/// Writes the extent and channel count of `texture` to `out_extent`.
///
/// # Safety
/// `texture` must be a live texture handle and `out_extent` must be writable.
#[no_mangle]
pub unsafe extern "C" fn texgen_texture_extent(
    texture: *const TexgenTexture,
    out_extent: *mut TexgenExtent,
) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_ref() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    if out_extent.is_null() {
        return track_error(&DefaultTexgenError::null_pointer("out_extent"));
    }

    let extent = texture.extent();
    unsafe {
        *out_extent = TexgenExtent {
            width: extent.width as u32,
            height: extent.height as u32,
            depth: extent.depth as u32,
            channels: texture.channels() as u32,
        };
    }
    clear_last_error()
}

/// Borrows the texel storage of `texture`.
///
/// Returns a pointer to `*out_len` floats laid out x fastest, then y, then
/// z, or null if either argument is null. The pointer stays valid until
/// the texture is modified or destroyed.
///
/// # Safety
/// `texture` must be a live texture handle and `out_len` must be writable.
#[no_mangle]
pub unsafe extern "C" fn texgen_texture_data(
    texture: *const TexgenTexture,
    out_len: *mut usize,
) -> *const f32 {
    let Some(texture) = (unsafe { texture.as_ref() }) else {
        track_error(&DefaultTexgenError::null_pointer("texture"));
        return ptr::null();
    };
    if out_len.is_null() {
        track_error(&DefaultTexgenError::null_pointer("out_len"));
        return ptr::null();
    }

    let data = texture.data();
    unsafe {
        *out_len = data.len();
    }
    clear_last_error();
    data.as_ptr()
}

/// Remaps `texture` linearly onto `[lo, hi]`.
///
/// # Safety
/// `texture` must be a live texture handle not used concurrently.
#[no_mangle]
pub unsafe extern "C" fn texgen_normalize(
    texture: *mut TexgenTexture,
    lo: f32,
    hi: f32,
) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_mut() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    with_texture!(&mut texture.inner, inner => normalize(inner, lo, hi));
    clear_last_error()
}

/// Zeroes every texel strictly below `cutoff`.
///
/// # Safety
/// `texture` must be a live texture handle not used concurrently.
#[no_mangle]
pub unsafe extern "C" fn texgen_threshold(
    texture: *mut TexgenTexture,
    cutoff: f32,
) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_mut() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    with_texture!(&mut texture.inner, inner => threshold(inner, cutoff));
    clear_last_error()
}

/// Applies the exponential cloud cover curve.
///
/// # Safety
/// `texture` must be a live texture handle not used concurrently.
#[no_mangle]
pub unsafe extern "C" fn texgen_cloud_curve(texture: *mut TexgenTexture) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_mut() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    with_texture!(&mut texture.inner, inner => cloud_exp_curve(inner));
    clear_last_error()
}

/// Separable box blur with clamped edges.
///
/// # Safety
/// `texture` must be a live texture handle not used concurrently.
#[no_mangle]
pub unsafe extern "C" fn texgen_blur(
    texture: *mut TexgenTexture,
    iterations: u32,
    half_window: u32,
) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_mut() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    let half_window = half_window as usize;
    with_texture!(&mut texture.inner, inner => box_blur(inner, iterations, half_window));
    clear_last_error()
}

/// Copies `texture` as white RGBA8 with the texel value in alpha.
///
/// Values are expected in `[0, 1]`; `out` must hold
/// `width * height * depth * 4` bytes.
///
/// Returns
/// - `TexgenErrorCode::Ok` (0): `out` filled
/// - `TexgenErrorCode::NullPointer`: `texture` or `out` is null
/// - `TexgenErrorCode::LayoutMismatch`: the texture has more than one channel
/// - `TexgenErrorCode::BufferTooSmall`: `out_len` is below the required size
///
/// # Safety
/// `texture` must be a live texture handle and `out` must point to `out_len`
/// writable bytes.
#[no_mangle]
pub unsafe extern "C" fn texgen_copy_rgba8(
    texture: *const TexgenTexture,
    out: *mut u8,
    out_len: usize,
) -> TexgenErrorCode {
    let Some(texture) = (unsafe { texture.as_ref() }) else {
        return track_error(&DefaultTexgenError::null_pointer("texture"));
    };
    if out.is_null() {
        return track_error(&DefaultTexgenError::null_pointer("out"));
    }

    let bytes = match track_result(texture.rgba8()) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };
    if bytes.len() > out_len {
        return track_error(&DefaultTexgenError::buffer_too_small(bytes.len(), out_len));
    }

    // SAFETY: `out` is non-null and the caller guarantees `out_len` writable
    // bytes, which is at least `bytes.len()`.
    unsafe {
        ptr::copy_nonoverlapping(bytes.as_ptr(), out, bytes.len());
    }
    clear_last_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{texgen_get_last_error, texgen_get_last_error_code};

    fn params() -> TexgenNoiseParams {
        TexgenNoiseParams {
            width: 8,
            height: 8,
            depth: 4,
            bandwidth: 2,
            resolution_ratio: 0.5,
            bandwidth_ratio: 0.5,
            smooth_iterations: 1,
            octaves: 2,
            seed: 7,
            half_window: 1,
            legacy_stencil: false,
            perlin: false,
        }
    }

    #[test]
    fn test_generate_and_destroy() {
        let mut texture = ptr::null_mut();
        let code = unsafe { texgen_generate_2d(&params(), &mut texture) };
        assert_eq!(code, TexgenErrorCode::Ok);
        assert!(!texture.is_null());

        let mut extent = TexgenExtent {
            width: 0,
            height: 0,
            depth: 0,
            channels: 0,
        };
        let code = unsafe { texgen_texture_extent(texture, &mut extent) };
        assert_eq!(code, TexgenErrorCode::Ok);
        assert_eq!(
            extent,
            TexgenExtent {
                width: 8,
                height: 8,
                depth: 1,
                channels: 1
            }
        );

        let mut len = 0;
        let data = unsafe { texgen_texture_data(texture, &mut len) };
        assert!(!data.is_null());
        assert_eq!(len, 64);

        unsafe { texgen_texture_destroy(texture) };
    }

    #[test]
    fn test_matches_library_output() {
        let mut texture = ptr::null_mut();
        unsafe { texgen_generate_3d(&params(), &mut texture) };
        let expected = noise::generate_3d(&NoiseSpec::from(&params())).unwrap();

        let mut len = 0;
        let data = unsafe { texgen_texture_data(texture, &mut len) };
        let data = unsafe { std::slice::from_raw_parts(data, len) };
        assert_eq!(data, expected.data());

        unsafe { texgen_texture_destroy(texture) };
    }

    #[test]
    fn test_collapse_reports_error() {
        let collapsing = TexgenNoiseParams {
            octaves: 6,
            ..params()
        };
        let mut texture = ptr::null_mut();
        let code = unsafe { texgen_generate_2d(&collapsing, &mut texture) };
        assert_eq!(code, TexgenErrorCode::CollapsedResolution);
        assert!(texture.is_null());
        assert_eq!(texgen_get_last_error_code(), TexgenErrorCode::CollapsedResolution);
        assert!(!texgen_get_last_error().is_null());
    }

    #[test]
    fn test_growing_ratio_reports_error() {
        let growing = TexgenNoiseParams {
            width: 256,
            height: 256,
            resolution_ratio: 4.0,
            octaves: 40,
            ..params()
        };
        let mut texture = ptr::null_mut();
        let code = unsafe { texgen_generate_2d(&growing, &mut texture) };
        assert_eq!(code, TexgenErrorCode::InvalidParameter);
        assert!(texture.is_null());
        assert_eq!(texgen_get_last_error_code(), TexgenErrorCode::InvalidParameter);
    }

    #[test]
    fn test_perlin_flag_selects_order() {
        let perlin = TexgenNoiseParams {
            perlin: true,
            legacy_stencil: true,
            ..params()
        };
        let spec = NoiseSpec::from(&perlin);
        assert_eq!(spec.kind, NoiseKind::Perlin);

        let mut texture = ptr::null_mut();
        unsafe { texgen_generate_2d(&perlin, &mut texture) };
        let expected = noise::generate_2d(&spec).unwrap();
        let mut len = 0;
        let data = unsafe { texgen_texture_data(texture, &mut len) };
        let data = unsafe { std::slice::from_raw_parts(data, len) };
        assert_eq!(data, expected.data());

        unsafe { texgen_texture_destroy(texture) };
    }

    #[test]
    fn test_null_pointers() {
        let code = unsafe { texgen_generate_2d(&params(), ptr::null_mut()) };
        assert_eq!(code, TexgenErrorCode::NullPointer);

        let mut texture = ptr::null_mut();
        let code = unsafe { texgen_generate_2d(ptr::null(), &mut texture) };
        assert_eq!(code, TexgenErrorCode::NullPointer);
        assert!(texture.is_null());

        assert_eq!(
            unsafe { texgen_normalize(ptr::null_mut(), 0.0, 1.0) },
            TexgenErrorCode::NullPointer
        );
        unsafe { texgen_texture_destroy(ptr::null_mut()) };
    }

    #[test]
    fn test_cloud_pipeline_to_rgba() {
        let mut texture = ptr::null_mut();
        unsafe { texgen_create_noise_2d(4, 4, 1, 0, &mut texture) };
        unsafe {
            assert_eq!(texgen_normalize(texture, 0.0, 1.0), TexgenErrorCode::Ok);
            assert_eq!(texgen_blur(texture, 1, 1), TexgenErrorCode::Ok);
            assert_eq!(texgen_cloud_curve(texture), TexgenErrorCode::Ok);
            assert_eq!(texgen_threshold(texture, 0.1), TexgenErrorCode::Ok);
        }

        let mut small = [0u8; 8];
        let code = unsafe { texgen_copy_rgba8(texture, small.as_mut_ptr(), small.len()) };
        assert_eq!(code, TexgenErrorCode::BufferTooSmall);

        let mut rgba = vec![0u8; 4 * 4 * 4];
        let code = unsafe { texgen_copy_rgba8(texture, rgba.as_mut_ptr(), rgba.len()) };
        assert_eq!(code, TexgenErrorCode::Ok);
        assert_eq!(texgen_get_last_error_code(), TexgenErrorCode::Ok);
        assert!(rgba.chunks_exact(4).all(|px| px[..3] == [255, 255, 255]));

        unsafe { texgen_texture_destroy(texture) };
    }

    #[test]
    fn test_empty_lattice_is_rejected() {
        let mut texture = ptr::null_mut();
        let code = unsafe { texgen_create_noise_2d(0, 4, 1, 0, &mut texture) };
        assert_eq!(code, TexgenErrorCode::InvalidParameter);
        assert!(texture.is_null());
    }
}
