//! Module implementing the text pipeline:
//! measuring, wrapping, fitting, placing, and rasterizing captions.

mod fit;
mod metrics;
mod place;
mod wrap;

pub use self::fit::{fit, MIN_FONT_SIZE};
pub use self::metrics::{Metrics, stroke_width};
pub use self::place::{line_spacing, place};
pub use self::wrap::{choose_split, split, wrap};


use std::collections::HashSet;

use image::{Pixel, RgbaImage};
use itertools::Itertools;
use rusttype::{point, Font, GlyphId, Scale};

use model::{Color, Dimensions, Offset, TextTransform};
use self::metrics::line_width;


/// A caption fully prepared for rasterization:
/// wrapped & transformed text together with its layout parameters.
///
/// Computed fresh for every render, since all of it depends
/// on the exact caption text.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedText {
    /// Final text, including the line break if one was chosen.
    pub text: String,
    /// Font size the text fits its box at.
    pub font_size: u32,
    /// Stroke width the text measures & renders with.
    pub stroke_width: u32,
    /// Draw offset within the box.
    pub offset: Offset,
}

/// Run the whole text pipeline for one caption:
/// wrap, apply the region's case transform, fit, and place.
pub fn fit_text(font: &Font<'static>, caption: &str,
                transform: TextTransform, max_box: Dimensions) -> FittedText {
    // Wrapping decides on the raw caption; the case transform can change
    // glyph widths, so fitting & placement use the transformed text.
    let wrapped = wrap(font, caption, max_box);
    let text = transform.apply(&wrapped);

    let font_size = fit(font, &text, max_box);
    let stroke_width = Metrics::new(font, font_size).stroke_width();
    let offset = place(font, &text, font_size, max_box);

    FittedText{
        text: text,
        font_size: font_size,
        stroke_width: stroke_width,
        offset: offset,
    }
}


/// Check if given font has all the glyphs for given text.
pub fn check(font: &Font, text: &str) {
    let mut missing = HashSet::new();
    for ch in text.chars() {
        if ch == '\n' {
            continue;  // line breaks are ours, not the font's
        }
        if font.glyph(ch).id() == GlyphId(0) {
            missing.insert(ch as u32);
        }
    }
    if !missing.is_empty() {
        warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
            missing.into_iter().map(|c| format!("{:#x}", c)).join(", "));
    }
}


/// Draw fitted caption text onto a transparent layer.
///
/// Lines are centered relative to the widest one. The stroke is drawn
/// as shifted copies of the text in the stroke color, under the fill.
pub fn draw(layer: &mut RgbaImage, fitted: &FittedText, font: &Font<'static>,
            fill: Color, stroke_width: u32, stroke_fill: Color) {
    let scale = Scale::uniform(fitted.font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let line_height = v_metrics.ascent - v_metrics.descent;
    let spacing = line_spacing(fitted.offset);

    let lines: Vec<&str> = fitted.text.split('\n').collect();
    let widths: Vec<f32> = lines.iter()
        .map(|line| line_width(font, scale, line))
        .collect();
    let block_width = widths.iter().cloned().fold(0.0f32, f32::max);

    for (i, line) in lines.iter().enumerate() {
        // Negating the offset is what actually centers the text:
        // the offset points from the desired position to the glyph origin.
        let x = -fitted.offset.dx + (block_width - widths[i]) / 2.0;
        let baseline = -fitted.offset.dy + v_metrics.ascent
            + i as f32 * (line_height + spacing);

        if stroke_width > 0 {
            let r = stroke_width as f32;
            for &(sx, sy) in [(-r, -r), (0.0, -r), (r, -r),
                              (-r, 0.0),           (r, 0.0),
                              (-r,  r), (0.0,  r), (r,  r)].iter() {
                draw_line(layer, line, font, scale, x + sx, baseline + sy, stroke_fill);
            }
        }
        draw_line(layer, line, font, scale, x, baseline, fill);
    }
}

/// Draw a single line of text with its baseline starting at given position.
/// Glyphs outside the layer are clipped away.
fn draw_line(layer: &mut RgbaImage, line: &str, font: &Font,
             scale: Scale, x: f32, baseline: f32, color: Color) {
    let (width, height) = layer.dimensions();
    for glyph in font.layout(line, scale, point(x, baseline)) {
        if let Some(bbox) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bbox.min.x + gx as i32;
                let py = bbox.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let alpha = (coverage * 255.0) as u8;
                    layer.get_pixel_mut(px as u32, py as u32)
                        .blend(&color.to_rgba(alpha));
                }
            });
        }
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use image::RgbaImage;
    use rusttype::Font;

    use model::{Color, Dimensions, TextTransform};
    use super::{draw, fit_text};

    /// Load some font present on the system, if any.
    ///
    /// Metric-dependent tests are skipped when none is found,
    /// since exact glyph shapes are not what they assert about.
    pub(crate) fn test_font() -> Option<Font<'static>> {
        const CANDIDATES: &'static [&'static str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
        ];
        for path in CANDIDATES {
            if let Ok(bytes) = fs::read(path) {
                if let Some(font) = Font::try_from_vec(bytes) {
                    return Some(font);
                }
            }
        }
        None
    }

    #[test]
    fn fitted_text_is_transformed() {
        let font = match test_font() { Some(f) => f, None => return };
        let fitted = fit_text(&font, "hello", TextTransform::Upper,
            Dimensions::new(300, 100));
        assert_eq!("HELLO", fitted.text);
    }

    #[test]
    fn fitted_text_follows_the_stroke_policy() {
        let font = match test_font() { Some(f) => f, None => return };
        let fitted = fit_text(&font, "HELLO", TextTransform::None,
            Dimensions::new(300, 100));
        // Font size is capped by box.height / 9 = 11,
        // and sizes this small always stroke at the minimum width.
        assert!(fitted.font_size <= 11);
        assert_eq!(1, fitted.stroke_width);
    }

    #[test]
    fn drawing_inks_the_layer() {
        let font = match test_font() { Some(f) => f, None => return };
        let max_box = Dimensions::new(300, 100);
        let fitted = fit_text(&font, "HELLO", TextTransform::Upper, max_box);

        let mut layer = RgbaImage::new(max_box.width, max_box.height);
        draw(&mut layer, &fitted, &font,
            Color::white(), fitted.stroke_width, Color::black());

        let inked = layer.pixels().filter(|p| p.0[3] > 0).count();
        assert!(inked > 0, "drawing left the layer fully transparent");
    }

    #[test]
    fn drawing_empty_text_is_a_noop() {
        let font = match test_font() { Some(f) => f, None => return };
        let max_box = Dimensions::new(300, 100);
        let fitted = fit_text(&font, "", TextTransform::Upper, max_box);

        let mut layer = RgbaImage::new(max_box.width, max_box.height);
        draw(&mut layer, &fitted, &font,
            Color::white(), fitted.stroke_width, Color::black());
        assert!(layer.pixels().all(|p| p.0[3] == 0));
    }
}
