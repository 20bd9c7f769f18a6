//! Bilinear and trilinear reads at normalized coordinates.
//!
//! A coordinate `u` in `[0, 1]` maps onto the texel lattice as
//! `p = u * n` clamped to `[0, n - 1]`. The lower lattice point is
//! `floor(p)`, the upper one is clamped to the last texel, and each axis
//! blends as `a * (1 - f) + b * f`. Coordinates landing exactly on a
//! lattice point therefore reproduce that texel.

use super::{Dimension, Texel, Texture, D2, D3};

/// Lower index, upper index and blend weight along one axis.
#[inline(always)]
fn lattice(u: f32, len: usize) -> (usize, usize, f32) {
    let last = (len - 1) as f32;
    let p = (u * len as f32).clamp(0.0, last);
    // NaN survives clamp; treat it as the origin
    let p = if p.is_nan() { 0.0 } else { p };
    let i0 = p.floor() as usize;
    let i1 = (i0 + 1).min(len - 1);
    (i0, i1, p - i0 as f32)
}

#[inline(always)]
fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + b * f
}

impl Dimension for D2 {
    const RANK: usize = 2;

    fn interpolate<T: Texel>(texture: &Texture<T, Self>, coord: [f32; 3], channel: usize) -> f32 {
        let (x0, x1, fx) = lattice(coord[0], texture.width());
        let (y0, y1, fy) = lattice(coord[1], texture.height());
        let at = |x: usize, y: usize| texture.texel([x, y, 0])[channel].to_f32();

        let top = lerp(at(x0, y0), at(x1, y0), fx);
        let bottom = lerp(at(x0, y1), at(x1, y1), fx);
        lerp(top, bottom, fy)
    }
}

impl Dimension for D3 {
    const RANK: usize = 3;

    fn interpolate<T: Texel>(texture: &Texture<T, Self>, coord: [f32; 3], channel: usize) -> f32 {
        let (x0, x1, fx) = lattice(coord[0], texture.width());
        let (y0, y1, fy) = lattice(coord[1], texture.height());
        let (z0, z1, fz) = lattice(coord[2], texture.depth());
        let at = |x: usize, y: usize, z: usize| texture.texel([x, y, z])[channel].to_f32();

        let plane = |z: usize| {
            let top = lerp(at(x0, y0, z), at(x1, y0, z), fx);
            let bottom = lerp(at(x0, y1, z), at(x1, y1, z), fx);
            lerp(top, bottom, fy)
        };
        lerp(plane(z0), plane(z1), fz)
    }
}

impl<T: Texel> Texture<T, D2> {
    /// Bilinear read of up to four channels at `(u, v)`.
    ///
    /// Channels past the texture's channel count read as 0.
    #[must_use]
    pub fn interpolated_pixel(&self, u: f32, v: f32) -> [f32; 4] {
        std::array::from_fn(|channel| self.sample([u, v, 0.0], channel))
    }
}

impl<T: Texel> Texture<T, D3> {
    /// Trilinear read of up to four channels at `(u, v, w)`.
    ///
    /// Channels past the texture's channel count read as 0.
    #[must_use]
    pub fn interpolated_voxel(&self, u: f32, v: f32, w: f32) -> [f32; 4] {
        std::array::from_fn(|channel| self.sample([u, v, w], channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture2D, Texture3D};
    use approx::assert_relative_eq;

    #[test]
    fn test_lattice_points_are_exact() {
        let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let texture = Texture2D::from_data(4, 4, 1, data).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let u = x as f32 / 4.0;
                let v = y as f32 / 4.0;
                assert_eq!(texture.sample([u, v, 0.0], 0), (y * 4 + x) as f32);
            }
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let texture = Texture2D::from_data(2, 2, 1, vec![0.0f32, 1.0, 2.0, 3.0]).unwrap();
        // p = 0.25 * 2 = 0.5 on both axes
        assert_relative_eq!(texture.sample([0.25, 0.25, 0.0], 0), 1.5);
    }

    #[test]
    fn test_coordinates_clamp_to_last_texel() {
        let texture = Texture2D::from_data(2, 1, 1, vec![3.0f32, 9.0]).unwrap();
        assert_eq!(texture.sample([1.0, 0.0, 0.0], 0), 9.0);
        assert_eq!(texture.sample([-0.5, 0.0, 0.0], 0), 3.0);
        assert_eq!(texture.sample([f32::NAN, 0.0, 0.0], 0), 3.0);
    }

    #[test]
    fn test_trilinear_center_of_cube() {
        let data: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let texture = Texture3D::from_data(2, 2, 2, 1, data).unwrap();
        assert_relative_eq!(texture.sample([0.25, 0.25, 0.25], 0), 3.5);
        assert_eq!(texture.sample([0.5, 0.5, 0.5], 0), 7.0);
    }

    #[test]
    fn test_multi_channel_reads() {
        let texture = Texture2D::from_data(1, 1, 2, vec![10u8, 20]).unwrap();
        assert_eq!(texture.interpolated_pixel(0.3, 0.7), [10.0, 20.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_texture_samples_zero() {
        let texture = Texture3D::<f32>::new(0, 4, 4, 1);
        assert_eq!(texture.interpolated_voxel(0.5, 0.5, 0.5), [0.0; 4]);
    }
}
