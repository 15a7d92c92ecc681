//! Module computing rendered text metrics.

use std::cmp;

use rusttype::{point, Font, Scale};

use model::Offset;


/// Leading used when *measuring* multi-line text.
/// Actual rendering uses caption-specific spacing computed by the placer.
const MEASURE_SPACING: f32 = 4.0;

/// Smallest stroke width drawn around glyphs.
const MIN_STROKE_WIDTH: u32 = 1;
/// Largest stroke width drawn around glyphs.
const MAX_STROKE_WIDTH: u32 = 3;


/// Stroke width that text of given font size is rendered with.
///
/// Note that this is a property of the size alone; captions with a black
/// fill have their stroke dropped separately, at draw time.
#[inline]
pub fn stroke_width(font_size: u32) -> u32 {
    cmp::min(MAX_STROKE_WIDTH, cmp::max(MIN_STROKE_WIDTH, font_size / 12))
}


/// Text measurements of a font at a particular pixel size.
///
/// All results are for the exact string passed in (kerning included)
/// and account for the stroke that will be drawn around the glyphs.
#[derive(Clone, Copy)]
pub struct Metrics<'f> {
    font: &'f Font<'static>,
    size: u32,
}

impl<'f> Metrics<'f> {
    #[inline]
    pub fn new(font: &'f Font<'static>, size: u32) -> Self {
        Metrics{font: font, size: size}
    }

    /// The font size these metrics are computed at.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Stroke width of text at this size.
    #[inline]
    pub fn stroke_width(&self) -> u32 {
        stroke_width(self.size)
    }

    #[inline]
    fn scale(&self) -> Scale {
        Scale::uniform(self.size as f32)
    }
}

impl<'f> Metrics<'f> {
    /// Pixel size of the bounding box of given text, stroke included.
    ///
    /// The text may contain line breaks; the widest line wins
    /// and line boxes are stacked with the measurement leading.
    pub fn text_size(&self, text: &str) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }

        let v_metrics = self.font.v_metrics(self.scale());
        let line_height = v_metrics.ascent - v_metrics.descent;

        let mut width = 0.0f32;
        let mut line_count = 0;
        for line in text.split('\n') {
            width = width.max(line_width(self.font, self.scale(), line));
            line_count += 1;
        }
        let height = line_count as f32 * line_height
            + (line_count - 1) as f32 * MEASURE_SPACING;

        let stroke = self.stroke_width() as f32;
        (width + stroke, height + stroke)
    }

    /// The glyph origin offset of given text: where the first inked pixels
    /// actually land, relative to the top-left corner of the text box.
    ///
    /// Fonts report this per string (a caps-only caption starts lower than
    /// one with ascenders), so it has to be compensated for during placement.
    /// Computed over the first line for multi-line text.
    pub fn origin(&self, text: &str) -> Offset {
        let first_line = text.split('\n').next().unwrap_or("");
        let v_metrics = self.font.v_metrics(self.scale());

        let (mut dx, mut dy) = (::std::f32::MAX, ::std::f32::MAX);
        let start = point(0.0, v_metrics.ascent);
        for glyph in self.font.layout(first_line, self.scale(), start) {
            if let Some(bbox) = glyph.pixel_bounding_box() {
                dx = dx.min(bbox.min.x as f32);
                dy = dy.min(bbox.min.y as f32);
            }
        }

        if dx == ::std::f32::MAX {
            // Nothing inked (empty or whitespace-only line).
            return Offset::new(0.0, 0.0);
        }
        Offset::new(dx, dy)
    }
}


/// Pixel width of a single line of text:
/// the final position of the "caret" after laying out all the glyphs.
pub(crate) fn line_width(font: &Font, scale: Scale, line: &str) -> f32 {
    font.layout(line, scale, point(0.0, /* unused */ 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
