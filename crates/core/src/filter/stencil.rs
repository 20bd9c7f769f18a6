//! Center-weighted neighborhood average, updated in place.
//!
//! Each texel becomes `(sum of neighbors + n * center) / (2 * n)` where `n`
//! is the neighborhood size: 8 in 2D, 26 in 3D. Texels are visited with x
//! as the outermost loop and z innermost, and are overwritten immediately,
//! so a texel sees the already-smoothed values of the neighbors visited
//! before it.
//!
//! The weights sum to one in both ranks, so the 3D form divides by 52 rather
//! than by the 27 texels it reads.

use tracing::debug;

use crate::texture::{Dimension, EdgeMode, Texel, Texture};

/// Runs the legacy stencil `iterations` times over every channel.
pub fn legacy_stencil<T: Texel, D: Dimension>(texture: &mut Texture<T, D>, iterations: u32) {
    if iterations == 0 || texture.is_empty() {
        return;
    }

    let extent = texture.extent();
    let channels = texture.channels();
    // 3^RANK - 1 neighbors
    let neighbors = 3usize.pow(D::RANK as u32) - 1;
    let center_weight = neighbors as f32;
    let z_reach: isize = if D::RANK == 3 { 1 } else { 0 };

    debug!(extent = %extent, iterations, neighbors, "Legacy stencil");

    for _ in 0..iterations {
        for x in 0..extent.width {
            for y in 0..extent.height {
                for z in 0..extent.depth {
                    smooth_texel(texture, [x, y, z], channels, z_reach, center_weight);
                }
            }
        }
    }
}

fn smooth_texel<T: Texel, D: Dimension>(
    texture: &mut Texture<T, D>,
    coord: [usize; 3],
    channels: usize,
    z_reach: isize,
    center_weight: f32,
) {
    let texel = texture.extent().index_of(coord);
    let (x, y, z) = (coord[0] as isize, coord[1] as isize, coord[2] as isize);

    for channel in 0..channels {
        let mut sum = 0.0_f32;
        for dz in -z_reach..=z_reach {
            for dy in -1..=1_isize {
                for dx in -1..=1_isize {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let value =
                        texture.neighbor([x + dx, y + dy, z + dz], EdgeMode::Clamp)[channel];
                    sum += value.to_f32();
                }
            }
        }

        let slot = &mut texture.data_mut()[texel * channels + channel];
        let center = slot.to_f32();
        *slot = T::from_f32((sum + center_weight * center) / (2.0 * center_weight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture2D, Texture3D};
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_texture_is_preserved() {
        let mut flat = Texture2D::<f32>::new(4, 3, 1);
        flat.fill(0.5);
        legacy_stencil(&mut flat, 3);
        assert!(flat.data().iter().all(|&v| v == 0.5));

        let mut volume = Texture3D::<f32>::new(3, 3, 3, 1);
        volume.fill(0.25);
        legacy_stencil(&mut volume, 2);
        assert!(volume.data().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_2d_center_weight() {
        let mut texture = Texture2D::<f32>::new(3, 3, 1);
        texture.pixel_mut(1, 1)[0] = 16.0;
        legacy_stencil(&mut texture, 1);
        // First texel: clamped neighborhood holds the spike once
        assert_relative_eq!(texture.pixel(0, 0)[0], 1.0);
    }

    #[test]
    fn test_3d_center_weight() {
        let mut texture = Texture3D::<f32>::new(1, 1, 1, 1);
        texture.fill(52.0);
        legacy_stencil(&mut texture, 1);
        // All 26 clamped neighbors are the texel itself
        assert_relative_eq!(texture.voxel(0, 0, 0)[0], 52.0);

        let mut spike = Texture3D::<f32>::new(3, 3, 3, 1);
        spike.voxel_mut(1, 1, 1)[0] = 52.0;
        legacy_stencil(&mut spike, 1);
        assert_relative_eq!(spike.voxel(0, 0, 0)[0], 1.0);
    }

    #[test]
    fn test_updates_in_raster_order() {
        let mut texture = Texture2D::from_data(2, 1, 1, vec![16.0f32, 0.0]).unwrap();
        legacy_stencil(&mut texture, 1);
        let first = texture.pixel(0, 0)[0];
        let second = texture.pixel(1, 0)[0];
        assert_relative_eq!(first, 13.0);
        // The second texel reads the already-smoothed first one
        let expected_second = (3.0 * first + 5.0 * 0.0 + 8.0 * 0.0) / 16.0;
        assert_relative_eq!(second, expected_second);
    }
}
