//! In-place smoothing filters
//!
//! - [`box_blur`]: separable unweighted mean along each axis in turn
//! - [`legacy_stencil`]: center-weighted 3×3 / 3×3×3 average, updated in
//!   place in raster order
//!
//! Both clamp out-of-range neighbors to the edge.

mod separable;
mod stencil;

pub use separable::{box_blur, box_blur_with_edges};
pub use stencil::legacy_stencil;
