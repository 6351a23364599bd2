//! Packed ARGB8888 colors used by the frame buffer.

pub const BACKGROUND: u32 = 0xFF1E1E1E;

/// Base color of a triangle when nothing else is configured.
pub const DEFAULT_BASE_COLOR: [u8; 3] = [0, 0, 255];

#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline]
pub fn unpack_rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}
