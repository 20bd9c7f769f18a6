//! Separable box blur.
//!
//! Each iteration runs one pass per axis (x, then y, then z for volumes).
//! A pass writes every texel of a scratch buffer from the unmodified input
//! and then swaps the two, so no texel ever reads a value already updated
//! in the same pass.

use rayon::prelude::*;
use tracing::debug;

use crate::texture::{Dimension, EdgeMode, Extent, Texel, Texture};

/// Box blur with clamp-to-edge neighbors.
///
/// Every element becomes the mean of the `2 * half_window + 1` elements
/// centered on it along the current axis. A `half_window` of 0 or an
/// `iterations` of 0 leaves the texture unchanged.
///
/// # Arguments
///
/// * `texture` - Texture to smooth in place
/// * `iterations` - Number of full x/y(/z) sweeps
/// * `half_window` - Neighbors taken on each side of the center
pub fn box_blur<T: Texel, D: Dimension>(
    texture: &mut Texture<T, D>,
    iterations: u32,
    half_window: usize,
) {
    box_blur_with_edges(texture, iterations, half_window, EdgeMode::Clamp);
}

/// [`box_blur`] with an explicit out-of-range policy.
pub fn box_blur_with_edges<T: Texel, D: Dimension>(
    texture: &mut Texture<T, D>,
    iterations: u32,
    half_window: usize,
    edges: EdgeMode,
) {
    if iterations == 0 || half_window == 0 || texture.is_empty() {
        return;
    }

    debug!(
        extent = %texture.extent(),
        iterations,
        half_window,
        "Box blur"
    );

    let extent = texture.extent();
    let channels = texture.channels();
    let mut scratch = vec![T::default(); texture.data().len()];

    for _ in 0..iterations {
        for axis in 0..D::RANK {
            blur_axis(
                texture.data(),
                &mut scratch,
                extent,
                channels,
                axis,
                half_window,
                edges,
            );
            texture.swap_data(&mut scratch);
        }
    }
}

/// One box pass along `axis`, reading `input` and writing `output`.
fn blur_axis<T: Texel>(
    input: &[T],
    output: &mut [T],
    extent: Extent,
    channels: usize,
    axis: usize,
    half_window: usize,
    edges: EdgeMode,
) {
    let len = extent.axis(axis);
    let stride = extent.stride(axis);
    let window = (2 * half_window + 1) as f32;
    let reach = half_window as isize;

    output
        .par_chunks_mut(channels)
        .enumerate()
        .for_each(|(texel, out)| {
            let coord = (texel / stride) % len;
            // Texel index with this axis' coordinate zeroed
            let line_start = texel - coord * stride;

            for (channel, value) in out.iter_mut().enumerate() {
                let mut sum = 0.0_f32;
                for k in -reach..=reach {
                    let neighbor = edges.resolve(coord as isize + k, len);
                    sum += input[(line_start + neighbor * stride) * channels + channel].to_f32();
                }
                *value = T::from_f32(sum / window);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture2D, Texture3D};
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_texture_is_preserved() {
        for half_window in 0..4 {
            for iterations in 0..3 {
                let mut texture = Texture3D::<f32>::new(5, 4, 3, 2);
                texture.fill(0.375);
                box_blur(&mut texture, iterations, half_window);
                assert!(texture.data().iter().all(|&v| v == 0.375));
            }
        }
    }

    #[test]
    fn test_single_row_mean_with_clamped_edges() {
        let mut texture = Texture2D::from_data(4, 1, 1, vec![0.0f32, 3.0, 6.0, 9.0]).unwrap();
        box_blur(&mut texture, 1, 1);
        // Edges replicate: [0,0,3], [0,3,6], [3,6,9], [6,9,9]
        let expected = [1.0, 3.0, 6.0, 8.0];
        for (value, expected) in texture.data().iter().zip(expected) {
            assert_relative_eq!(*value, expected);
        }
    }

    #[test]
    fn test_wrapped_edges() {
        let mut texture = Texture2D::from_data(3, 1, 1, vec![3.0f32, 0.0, 0.0]).unwrap();
        box_blur_with_edges(&mut texture, 1, 1, EdgeMode::Wrap);
        for value in texture.data() {
            assert_relative_eq!(*value, 1.0);
        }
    }

    #[test]
    fn test_2d_iterations_are_honored() {
        let data = vec![0.0f32, 0.0, 9.0, 0.0, 0.0];
        let mut once = Texture2D::from_data(5, 1, 1, data.clone()).unwrap();
        let mut twice = Texture2D::from_data(5, 1, 1, data).unwrap();
        box_blur(&mut once, 1, 1);
        box_blur(&mut twice, 2, 1);
        assert_ne!(once.data(), twice.data());
    }

    #[test]
    fn test_volume_blurs_along_depth() {
        let mut texture = Texture3D::<f32>::new(1, 1, 3, 1);
        texture.voxel_mut(0, 0, 1)[0] = 3.0;
        box_blur(&mut texture, 1, 1);
        assert_relative_eq!(texture.voxel(0, 0, 0)[0], 1.0);
        assert_relative_eq!(texture.voxel(0, 0, 1)[0], 1.0);
        assert_relative_eq!(texture.voxel(0, 0, 2)[0], 1.0);
    }

    #[test]
    fn test_channels_blur_independently() {
        let data = vec![0.0f32, 6.0, 3.0, 6.0, 0.0, 6.0];
        let mut texture = Texture2D::from_data(3, 1, 2, data).unwrap();
        box_blur(&mut texture, 1, 1);
        assert_relative_eq!(texture.pixel(1, 0)[0], 1.0);
        assert!(texture.data().iter().skip(1).step_by(2).all(|&v| v == 6.0));
    }

    #[test]
    fn test_byte_blur_truncates() {
        let mut texture = Texture2D::from_data(3, 1, 1, vec![0u8, 10, 0]).unwrap();
        box_blur(&mut texture, 1, 1);
        assert_eq!(texture.data(), &[3, 3, 3]);
    }
}
