//! Measurement callbacks.
//!
//! Layout knows nothing about glyphs or image files. It asks a
//! [`TextMeasurer`] how big a string is and an [`ImageSizer`] how big an
//! image is. Both are pure queries; `None` means "could not measure" and is
//! laid out as zero size.

use super::box_model::Size;

/// Measures a run of text at a font size.
pub trait TextMeasurer {
    /// Width and height of `text` on a single line.
    fn measure(&self, text: &str, font_size_px: f32) -> Option<Size>;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f32) -> Option<Size>,
{
    fn measure(&self, text: &str, font_size_px: f32) -> Option<Size> {
        self(text, font_size_px)
    }
}

/// Reports the intrinsic size of an image by its source URL.
pub trait ImageSizer {
    /// Natural size of the image at `src`.
    fn image_size(&self, src: &str) -> Option<Size>;
}

impl<F> ImageSizer for F
where
    F: Fn(&str) -> Option<Size>,
{
    fn image_size(&self, src: &str) -> Option<Size> {
        self(src)
    }
}

/// An [`ImageSizer`] for documents without images.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageSizer for NoImages {
    fn image_size(&self, _src: &str) -> Option<Size> {
        None
    }
}

/// Fixed-ratio text metrics.
///
/// Every character advances `advance_ratio × font size` and a line is
/// `line_height_ratio × font size` tall. Useful without real fonts and in
/// tests, where predictable widths matter more than realistic ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character, as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size_px: f32) -> Option<Size> {
        let chars = text.chars().count() as f32;
        Some(Size::new(
            (chars * font_size_px * self.advance_ratio).round() as i32,
            (font_size_px * self.line_height_ratio).round() as i32,
        ))
    }
}
