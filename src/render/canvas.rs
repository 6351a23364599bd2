//! The owned pixel buffer the presentation layer draws into.
//!
//! [`Canvas`] owns the ARGB color buffer; [`FrameBuffer`] views are borrowed
//! from it for rasterization.

use std::path::Path;

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::error::RenderError;

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.color_buffer[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Native-endian ARGB8888 bytes, the layout an ARGB streaming texture expects.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.color_buffer[(y * self.width + x) as usize];
            let [r, g, b] = colors::unpack_rgb(color);
            image::Rgba([r, g, b, (color >> 24) as u8])
        })
    }

    /// Writes the buffer as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!("wrote {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_background() {
        let canvas = Canvas::new(3, 2);
        assert!(canvas.pixels().iter().all(|&c| c == colors::BACKGROUND));
        assert_eq!(canvas.as_bytes().len(), 3 * 2 * 4);
    }

    #[test]
    fn framebuffer_writes_land_in_the_canvas() {
        let mut canvas = Canvas::new(4, 4);
        canvas.as_framebuffer().set_pixel(1, 2, 0xFF00FF00);

        assert_eq!(canvas.pixel(1, 2), Some(0xFF00FF00));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn image_conversion_keeps_channels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.as_framebuffer().set_pixel(1, 0, colors::pack_rgb([10, 20, 30]));

        let image = canvas.to_image();
        assert_eq!(image.get_pixel(1, 0), &image::Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn resize_reallocates() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(0);
        canvas.resize(5, 3);
        assert_eq!(canvas.pixels().len(), 15);
        assert_eq!(canvas.pixel(4, 2), Some(colors::BACKGROUND));
    }
}
