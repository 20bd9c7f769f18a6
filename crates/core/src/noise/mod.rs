//! Procedural value noise
//!
//! - [`create_noise_2d`] / [`create_noise_3d`]: one lattice of uniform samples
//! - [`generate_2d`] / [`generate_3d`]: recursive multi-octave noise built
//!   from those lattices, combined with alternating sign and smoothed in
//!   value or Perlin order ([`NoiseKind`])
//! - [`NoiseSpec`]: parameters and presets
//! - [`DumpSink`]: optional per-level debug output

mod config;
mod dump;
mod octave;
mod primitive;
mod random;

pub use config::{NoiseKind, NoiseSpec, SmoothingPolicy};
pub use dump::{DumpFrame, DumpSink, MemorySink, TracingSink};
pub use octave::{combine, generate_2d, generate_3d, generate_with, octave_multiplier};
pub use primitive::{create_noise_2d, create_noise_3d};
pub use random::{SeededRandom, UniformSource};
