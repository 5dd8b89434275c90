//! Pre-rendered background
//!
//! Easy mode never looks at shapes: it asks a `PixelSource` what color is
//! under the bit. `SceneBitmap` rasterizes the course once, one sample per
//! pixel centre, so colors are exact (no antialiased edges).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::point_in_ellipse;
use crate::sim::terrain::Terrain;

/// An RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Color channels without alpha
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

pub const SKY_COLOR: Rgba = Rgba::opaque(51, 51, 51);
pub const GROUND_COLOR: Rgba = Rgba::opaque(139, 69, 19);
pub const WATER_COLOR: Rgba = Rgba::opaque(30, 144, 255);
pub const GOAL_COLOR: Rgba = Rgba::opaque(0, 255, 0);
/// What a sample outside the bitmap reads as
pub const OUT_OF_BOUNDS: Rgba = Rgba([0, 0, 0, 0]);

/// Something the easy-mode rule can sample
pub trait PixelSource {
    /// Color at integer pixel coordinates; out-of-range reads are `OUT_OF_BOUNDS`
    fn pixel_at(&self, x: i32, y: i32) -> Rgba;
}

/// Static course background, row-major RGBA
#[derive(Debug, Clone)]
pub struct SceneBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl SceneBitmap {
    /// Paint sky, ground, river and goal, in that order
    pub fn render(terrain: &Terrain) -> Self {
        let width = terrain.bounds.width.max(0.0) as u32;
        let height = terrain.bounds.height.max(0.0) as u32;
        let ground_level = terrain.bounds.ground_level;

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for py in 0..height {
            for px in 0..width {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);

                let color = if terrain.goal.contains(p) {
                    GOAL_COLOR
                } else if p.y < ground_level {
                    SKY_COLOR
                } else if point_in_ellipse(p, &terrain.water) {
                    WATER_COLOR
                } else {
                    GROUND_COLOR
                };
                pixels.push(color);
            }
        }

        log::debug!("Rendered {}x{} scene bitmap", width, height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat RGBA bytes, ready for `ImageData`
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0).collect()
    }
}

impl PixelSource for SceneBitmap {
    fn pixel_at(&self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return OUT_OF_BOUNDS;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }
}
