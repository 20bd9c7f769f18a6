//! Texture buffers and procedural noise
//!
//! In-memory texture containers, format conversions and multi-octave value
//! noise for synthesizing terrain heightmaps, cloud masks and volumetric
//! density fields.
//!
//! ## Pipeline
//!
//! 1. [`noise::generate_2d`] / [`noise::generate_3d`] build fractal noise from
//!    a [`NoiseSpec`]: one random lattice per octave, upsampled, combined with
//!    alternating sign and smoothed in value or Perlin order ([`NoiseKind`])
//! 2. [`transform`] functions shape the result ([`transform::normalize`],
//!    [`transform::cloud_exp_curve`], [`transform::threshold`])
//! 3. Conversions produce renderer-ready byte RGBA textures
//!
//! ```
//! use texgen_core::{noise, transform, NoiseSpec};
//!
//! let spec = NoiseSpec::cloud_layer().with_seed(42);
//! let mut clouds = noise::generate_2d(&spec)?;
//! transform::normalize(&mut clouds, 0.0, 1.0);
//! transform::cloud_exp_curve(&mut clouds);
//! let rgba = transform::to_byte_texture(&transform::density_to_rgba(&clouds)?);
//! assert_eq!(rgba.channels(), 4);
//! # Ok::<(), texgen_core::TextureError>(())
//! ```

pub mod error;
pub mod filter;
pub mod noise;
pub mod texture;
pub mod transform;

pub use error::TextureError;
pub use noise::{NoiseKind, NoiseSpec, SeededRandom, SmoothingPolicy, UniformSource};
pub use texture::{
    ColorFormat, EdgeMode, Extent, Texel, Texture, Texture2D, Texture3D, TextureId,
    TextureObserver, TextureResource, TextureSettings, D2, D3,
};
