//! Octave noise parameters and smoothing policy.

use serde::{Deserialize, Serialize};

use crate::error::TextureError;
use crate::filter::{box_blur, legacy_stencil};
use crate::texture::{Dimension, Extent, Texel, Texture};

/// Largest level a float texture can hold in one allocation
const MAX_LEVEL_TEXELS: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// Smoothing applied after each octave level is built.
///
/// One policy is used for a whole generation; the two kernels are never
/// mixed within a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingPolicy {
    /// Separable box blur with the given half window
    Separable {
        /// Neighbors averaged on each side of the center
        half_window: usize,
    },
    /// Center-weighted 3×3 (2D) or 3×3×3 (3D) in-place average
    LegacyStencil,
}

impl Default for SmoothingPolicy {
    fn default() -> Self {
        Self::Separable { half_window: 1 }
    }
}

impl SmoothingPolicy {
    /// Smooths `texture` in place `iterations` times.
    pub fn apply<T: Texel, D: Dimension>(self, texture: &mut Texture<T, D>, iterations: u32) {
        match self {
            Self::Separable { half_window } => box_blur(texture, iterations, half_window),
            Self::LegacyStencil => legacy_stencil(texture, iterations),
        }
    }
}

/// Order in which a level smooths and combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Combine the deeper octave into the primitive, then smooth the sum
    #[default]
    Value,
    /// Smooth the primitive, then combine; the sum is left unsmoothed
    Perlin,
}

/// Parameters of one multi-octave noise generation.
///
/// Built per call and never mutated while generating. 2D generation reads
/// only the width and height of `resolution`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Lattice extent of the base octave
    pub resolution: Extent,

    /// Amplitude of the base octave (samples fall in `[0, 2 * bandwidth)`)
    pub bandwidth: u32,

    /// Factor applied to the resolution at each deeper octave
    pub resolution_ratio: f32,

    /// Factor applied to the bandwidth at each deeper octave
    pub bandwidth_ratio: f32,

    /// Smoothing iterations per level
    pub smooth_iterations: u32,

    /// Number of octaves below the base level (0 = single primitive)
    pub octaves: u32,

    /// Root seed of the generator threaded through the recursion
    pub seed: u64,

    /// Smoothing kernel
    pub smoothing: SmoothingPolicy,

    /// Smooth-then-combine or combine-then-smooth
    #[serde(default)]
    pub kind: NoiseKind,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self::cloud_layer()
    }
}

impl NoiseSpec {
    /// 2D cloud coverage mask: broad base octave, five halving octaves
    #[must_use]
    pub fn cloud_layer() -> Self {
        Self {
            resolution: Extent::new_2d(256, 256),
            bandwidth: 256,
            resolution_ratio: 0.5,
            bandwidth_ratio: 0.5,
            smooth_iterations: 1,
            octaves: 5,
            seed: 0,
            smoothing: SmoothingPolicy::default(),
            kind: NoiseKind::Value,
        }
    }

    /// 2D terrain heightmap with the legacy stencil smoother
    #[must_use]
    pub fn terrain() -> Self {
        Self {
            resolution: Extent::new_2d(128, 128),
            bandwidth: 64,
            resolution_ratio: 0.5,
            bandwidth_ratio: 0.5,
            smooth_iterations: 2,
            octaves: 4,
            seed: 0,
            smoothing: SmoothingPolicy::LegacyStencil,
            kind: NoiseKind::Value,
        }
    }

    /// 2D Perlin-ordered layer: each primitive is stencil-smoothed before
    /// the octaves are summed
    #[must_use]
    pub fn perlin_layer() -> Self {
        Self {
            resolution: Extent::new_2d(128, 128),
            bandwidth: 128,
            resolution_ratio: 0.5,
            bandwidth_ratio: 0.5,
            smooth_iterations: 2,
            octaves: 4,
            seed: 0,
            smoothing: SmoothingPolicy::LegacyStencil,
            kind: NoiseKind::Perlin,
        }
    }

    /// 3D cloud density volume
    #[must_use]
    pub fn volume() -> Self {
        Self {
            resolution: Extent::new_3d(32, 32, 32),
            bandwidth: 16,
            resolution_ratio: 0.5,
            bandwidth_ratio: 0.5,
            smooth_iterations: 1,
            octaves: 3,
            seed: 0,
            smoothing: SmoothingPolicy::default(),
            kind: NoiseKind::Value,
        }
    }

    /// Same parameters with another root seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lattice extent of each level, base first.
    ///
    /// Each level truncates the previous one scaled by `resolution_ratio`;
    /// 2D specs keep a depth of 1 throughout.
    #[must_use]
    pub fn level_extents<D: Dimension>(&self) -> Vec<Extent> {
        let mut extent = self.base_extent::<D>();
        let mut levels = Vec::with_capacity(self.octaves as usize + 1);
        levels.push(extent);
        for _ in 0..self.octaves {
            extent = extent.scaled(self.resolution_ratio, D::RANK);
            levels.push(extent);
        }
        levels
    }

    pub(crate) fn base_extent<D: Dimension>(&self) -> Extent {
        if D::RANK == 2 {
            Extent::new_2d(self.resolution.width, self.resolution.height)
        } else {
            self.resolution
        }
    }

    /// Checks that every level of a `D`-dimensional generation is usable.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidParameter`] for a non-finite or
    /// negative ratio, [`TextureError::ExtentOverflow`] for the first level
    /// too large to allocate, or [`TextureError::CollapsedResolution`]
    /// naming the first level whose extent truncates to zero texels.
    pub fn validate<D: Dimension>(&self) -> Result<(), TextureError> {
        for (name, ratio) in [
            ("resolution_ratio", self.resolution_ratio),
            ("bandwidth_ratio", self.bandwidth_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(TextureError::invalid_parameter(
                    name,
                    format!("must be finite and non-negative, got {ratio}"),
                ));
            }
        }

        for (level, extent) in self.level_extents::<D>().into_iter().enumerate() {
            let level = level as u32;
            if extent.is_empty() {
                return Err(TextureError::CollapsedResolution { level, extent });
            }
            match extent.checked_texel_count() {
                Some(count) if count <= MAX_LEVEL_TEXELS => {}
                _ => return Err(TextureError::ExtentOverflow { level, extent }),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{D2, D3};

    #[test]
    fn test_presets_validate() {
        assert!(NoiseSpec::cloud_layer().validate::<D2>().is_ok());
        assert!(NoiseSpec::terrain().validate::<D2>().is_ok());
        assert!(NoiseSpec::volume().validate::<D3>().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let spec = NoiseSpec::terrain().with_seed(17);
        assert_eq!(spec.seed, 17);
        assert_eq!(spec.bandwidth, NoiseSpec::terrain().bandwidth);
    }

    #[test]
    fn test_level_extents_truncate() {
        let spec = NoiseSpec {
            resolution: Extent::new_3d(10, 6, 3),
            octaves: 2,
            ..NoiseSpec::volume()
        };
        assert_eq!(
            spec.level_extents::<D3>(),
            vec![
                Extent::new_3d(10, 6, 3),
                Extent::new_3d(5, 3, 1),
                Extent::new_3d(2, 1, 0),
            ]
        );
        // 2D ignores depth entirely
        assert_eq!(spec.level_extents::<D2>()[2], Extent::new_2d(2, 1));
    }

    #[test]
    fn test_collapse_is_rejected() {
        let spec = NoiseSpec {
            resolution: Extent::new_2d(8, 8),
            octaves: 4,
            ..NoiseSpec::cloud_layer()
        };
        assert_eq!(
            spec.validate::<D2>(),
            Err(TextureError::CollapsedResolution {
                level: 4,
                extent: Extent::new_2d(0, 0),
            })
        );
    }

    #[test]
    fn test_bad_ratio_is_rejected() {
        let spec = NoiseSpec {
            bandwidth_ratio: f32::NAN,
            ..NoiseSpec::cloud_layer()
        };
        assert!(matches!(
            spec.validate::<D2>(),
            Err(TextureError::InvalidParameter {
                name: "bandwidth_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_growing_ratio_overflow_is_rejected() {
        let spec = NoiseSpec {
            resolution: Extent::new_2d(256, 256),
            resolution_ratio: 4.0,
            octaves: 40,
            ..NoiseSpec::cloud_layer()
        };
        assert!(matches!(
            spec.validate::<D2>(),
            Err(TextureError::ExtentOverflow { .. })
        ));

        let volume = NoiseSpec {
            resolution: Extent::new_3d(32, 32, 32),
            resolution_ratio: 4.0,
            octaves: 40,
            ..NoiseSpec::volume()
        };
        assert!(matches!(
            volume.validate::<D3>(),
            Err(TextureError::ExtentOverflow { .. })
        ));
    }

    #[test]
    fn test_growing_ratio_within_bounds_is_accepted() {
        let spec = NoiseSpec {
            resolution: Extent::new_2d(4, 4),
            resolution_ratio: 2.0,
            octaves: 2,
            ..NoiseSpec::cloud_layer()
        };
        assert!(spec.validate::<D2>().is_ok());
        assert_eq!(spec.level_extents::<D2>()[2], Extent::new_2d(16, 16));
    }

    #[test]
    fn test_perlin_preset() {
        let spec = NoiseSpec::perlin_layer();
        assert_eq!(spec.kind, NoiseKind::Perlin);
        assert_eq!(spec.smoothing, SmoothingPolicy::LegacyStencil);
        assert!(spec.validate::<D2>().is_ok());
        assert_eq!(NoiseSpec::default().kind, NoiseKind::Value);
    }

    #[test]
    fn test_smoothing_policy_dispatch() {
        let mut texture = Texture::<f32, D2>::new(3, 1, 1);
        texture.data_mut()[1] = 3.0;
        SmoothingPolicy::Separable { half_window: 1 }.apply(&mut texture, 1);
        assert!(texture.data().iter().all(|&v| v == 1.0));
    }
}
