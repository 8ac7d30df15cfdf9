//! Procedural tile textures for the corridor surfaces.
//!
//! Each texture is a fixed size tile painted once at startup and repeated
//! across its surface through the material's UV transform, so a longer
//! corridor repeats the tile more often rather than stretching it.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

type Rgb = [u8; 3];

/// Square RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePixels {
    pub size: u32,
    pub data: Vec<u8>,
}

impl TilePixels {
    pub fn filled(size: u32, colour: Rgb) -> Self {
        let data = std::iter::repeat([colour[0], colour[1], colour[2], 255])
            .take((size * size) as usize)
            .flatten()
            .collect();
        Self { size, data }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.size + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Alpha-blend a colour over one pixel. Out of range writes are ignored.
    fn blend(&mut self, x: u32, y: u32, colour: Rgb, alpha: f32) {
        if x >= self.size || y >= self.size {
            return;
        }
        let i = ((y * self.size + x) * 4) as usize;
        for (channel, value) in colour.iter().enumerate() {
            let under = f32::from(self.data[i + channel]);
            let mixed = under + (f32::from(*value) - under) * alpha;
            self.data[i + channel] = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, colour: Rgb, alpha: f32) {
        for py in y..(y + height).min(self.size) {
            for px in x..(x + width).min(self.size) {
                self.blend(px, py, colour, alpha);
            }
        }
    }

    fn row(&mut self, y: u32, thickness: u32, colour: Rgb, alpha: f32) {
        self.fill_rect(0, y, self.size, thickness, colour, alpha);
    }

    fn column(&mut self, x: u32, thickness: u32, colour: Rgb, alpha: f32) {
        self.fill_rect(x, 0, thickness, self.size, colour, alpha);
    }

    /// sRGB texture that repeats in both directions.
    pub fn into_image(self) -> Image {
        let mut image = Image::new(
            Extent3d {
                width: self.size,
                height: self.size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD,
        );
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            ..ImageSamplerDescriptor::linear()
        });
        image
    }
}

/// Scale a tile coordinate authored for a 512px tile to `size`.
fn scaled(value: u32, size: u32) -> u32 {
    (value * size / 512).max(1)
}

/// Warm lengthwise planks with seams, faint grain and a gold runner.
pub fn floor_planks(size: u32) -> TilePixels {
    let mut tile = TilePixels::filled(size, [0xc4, 0xa8, 0x6a]);
    let plank = scaled(64, size);
    let seam = scaled(2, size);

    let mut y = 0;
    while y < size {
        let shade = ((y * 7) % 30) as i32 - 15;
        let tint = |base: u8| (i32::from(base) + shade).clamp(0, 255) as u8;
        tile.fill_rect(0, y + seam, size, plank.saturating_sub(seam), [tint(196), tint(168), tint(106)], 1.0);
        tile.row(y, seam, [0x9e, 0x85, 0x50], 1.0);
        for grain in 0..3 {
            let offset = scaled(12 + grain * 18, size) + (y * 13 + grain * 7) % 8;
            tile.row(y + offset, 1, [140, 110, 60], 0.12);
        }
        y += plank;
    }

    let runner = scaled(64, size);
    tile.fill_rect((size - runner) / 2, 0, runner, size, [0xfd, 0xb9, 0x27], 0.08);
    tile
}

/// Navy panelling lit from above, with panel seams, a wainscot line and a
/// bright band under the crown molding.
pub fn wall_panels(size: u32) -> TilePixels {
    let mut tile = TilePixels::filled(size, [0x25, 0x2a, 0x48]);

    for y in 0..size {
        let t = y as f32 / size as f32;
        let (colour, alpha) = if t < 0.3 {
            let k = t / 0.3;
            ([80, 80, 130], 0.2 - 0.1 * k)
        } else {
            let k = (t - 0.3) / 0.7;
            ([10, 10, 30], 0.1 + 0.05 * k)
        };
        tile.row(y, 1, colour, alpha);
    }

    let panel = scaled(128, size);
    let mut x = 0;
    while x < size {
        tile.column(x, 1, [0x35, 0x3a, 0x5a], 1.0);
        x += panel;
    }

    tile.row(scaled(340, size), scaled(3, size), [0x40, 0x45, 0x70], 1.0);
    tile.row(0, scaled(8, size), [100, 100, 160], 0.15);
    tile
}

/// Dark ceiling with a coarse grid.
pub fn ceiling_grid(size: u32) -> TilePixels {
    let mut tile = TilePixels::filled(size, [0x1a, 0x1a, 0x32]);
    let cell = (size / 4).max(1);
    let mut i = 0;
    while i < size {
        tile.row(i, 1, [0x22, 0x22, 0x44], 1.0);
        tile.column(i, 1, [0x22, 0x22, 0x44], 1.0);
        i += cell;
    }
    tile
}

/// UV scale repeating a tile of `tile_world_size` over a surface.
pub fn tile_repeat(surface: Vec2, tile_world_size: Vec2) -> Affine2 {
    let repeat = (surface / tile_world_size).max(Vec2::ONE);
    Affine2::from_scale(repeat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_have_requested_size() {
        for tile in [floor_planks(128), wall_panels(128), ceiling_grid(64)] {
            assert_eq!(tile.data.len(), (tile.size * tile.size * 4) as usize);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(floor_planks(256), floor_planks(256));
        assert_eq!(wall_panels(256), wall_panels(256));
    }

    #[test]
    fn plank_seams_are_darker_than_planks() {
        let tile = floor_planks(512);
        let seam = tile.pixel(10, 0);
        let plank = tile.pixel(10, 30);
        assert!(seam[0] < plank[0]);
        assert_eq!(seam[3], 255);
    }

    #[test]
    fn ceiling_grid_lines_on_cell_boundaries() {
        let tile = ceiling_grid(256);
        assert_eq!(tile.pixel(64, 10), [0x22, 0x22, 0x44, 255]);
        assert_eq!(tile.pixel(10, 10), [0x1a, 0x1a, 0x32, 255]);
    }

    #[test]
    fn repeat_grows_with_surface_length() {
        let short = tile_repeat(Vec2::new(14.0, 20.0), Vec2::splat(4.0));
        let long = tile_repeat(Vec2::new(14.0, 200.0), Vec2::splat(4.0));
        assert_eq!(short.matrix2.y_axis.y, 5.0);
        assert_eq!(long.matrix2.y_axis.y, 50.0);
        assert_eq!(long.matrix2.x_axis.x, 3.5);

        let tiny = tile_repeat(Vec2::new(1.0, 1.0), Vec2::splat(4.0));
        assert_eq!(tiny.matrix2.x_axis.x, 1.0);
    }
}
