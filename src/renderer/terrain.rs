//! Terrain image derived from the city mask
//!
//! The mask only knows opacity. Color and lit windows are decided here, so a
//! crater simply shows up as transparent pixels in the next upload.

use bytemuck::{Pod, Zeroable};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::vertex::colors;
use crate::sim::CityMask;

/// One RGBA8 texel
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const CLEAR: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    pub fn from_color(color: [f32; 4], alpha: u8) -> Self {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: to_u8(color[0]),
            g: to_u8(color[1]),
            b: to_u8(color[2]),
            a: alpha,
        }
    }
}

/// Window grid cell size in pixels (window + spacing)
const WINDOW_CELL: u32 = 8;
/// Lit window footprint inside a cell
const WINDOW_SIZE: u32 = 4;

/// Share of window cells that are lit
const LIT_CHANCE: f64 = 1.0 / 3.0;

/// Row-major lit flags per window cell, drawn from the game's RNG family so
/// the same seed always lights the same windows
fn lit_cells(seed: u64, cols: u32, rows: u32) -> Vec<bool> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..cols as usize * rows as usize)
        .map(|_| rng.random_bool(LIT_CHANCE))
        .collect()
}

/// Color the mask: building color where opaque, roughly a third of window
/// cells lit, transparent sky and craters
pub fn terrain_texels(mask: &CityMask, seed: u64) -> Vec<Rgba8> {
    let wall = Rgba8::from_color(colors::BUILDING, 255);
    let lit = Rgba8::from_color(colors::WINDOW_LIT, 255);
    let w = mask.width();
    let cols = w.div_ceil(WINDOW_CELL);
    let lit_table = lit_cells(seed, cols, mask.height().div_ceil(WINDOW_CELL));

    mask.pixels()
        .iter()
        .enumerate()
        .map(|(i, &alpha)| {
            if alpha == 0 {
                return Rgba8::CLEAR;
            }
            let x = i as u32 % w;
            let y = i as u32 / w;
            let in_window = x % WINDOW_CELL < WINDOW_SIZE && y % WINDOW_CELL < WINDOW_SIZE;
            let cell = (y / WINDOW_CELL * cols + x / WINDOW_CELL) as usize;
            if in_window && lit_table[cell] {
                Rgba8 { a: alpha, ..lit }
            } else {
                Rgba8 { a: alpha, ..wall }
            }
        })
        .collect()
}

/// Terrain as raw RGBA8 bytes ready for a texture upload
pub fn terrain_rgba(mask: &CityMask, seed: u64) -> Vec<u8> {
    bytemuck::cast_slice(&terrain_texels(mask, seed)).to_vec()
}
