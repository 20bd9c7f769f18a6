//! C ABI for texture generation
//!
//! Exposes octave noise generation and the common texture transforms over
//! an opaque `TexgenTexture` handle. Every fallible function returns a
//! `TexgenErrorCode` (0 = success) and records a message retrievable with
//! `texgen_get_last_error` on the calling thread.
//!
//! ```c
//! TexgenNoiseParams params = {
//!     .width = 256, .height = 256, .depth = 1,
//!     .bandwidth = 256, .resolution_ratio = 0.5f, .bandwidth_ratio = 0.5f,
//!     .smooth_iterations = 1, .octaves = 5, .seed = 42,
//!     .half_window = 1, .legacy_stencil = false, .perlin = false,
//! };
//! TexgenTexture* clouds = NULL;
//! if (texgen_generate_2d(&params, &clouds) == Ok) {
//!     texgen_normalize(clouds, 0.0f, 1.0f);
//!     texgen_cloud_curve(clouds);
//!     texgen_copy_rgba8(clouds, pixels, 256 * 256 * 4);
//!     texgen_texture_destroy(clouds);
//! }
//! ```

mod error;
mod helpers;
mod texture;

pub use error::{texgen_get_last_error, texgen_get_last_error_code, TexgenErrorCode};
pub use texture::{
    texgen_blur, texgen_cloud_curve, texgen_copy_rgba8, texgen_create_noise_2d,
    texgen_generate_2d, texgen_generate_3d, texgen_normalize, texgen_texture_data,
    texgen_texture_destroy, texgen_texture_extent, texgen_threshold, TexgenExtent,
    TexgenNoiseParams, TexgenTexture,
};
