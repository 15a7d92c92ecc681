//! Module computing the draw offset of fitted text within its box.

use rusttype::Font;

use model::{Dimensions, Offset};
use super::metrics::Metrics;


/// Divisor of the text height in the vertical centering term
/// for captions that broke into two lines.
const MULTILINE_VDIV: f32 = 1.25;
/// Same, for single-line captions.
const SINGLE_LINE_VDIV: f32 = 1.5;


/// Compute the offset at which given text has to be drawn
/// so that it ends up centered within its box.
///
/// The offset folds together three corrections, per axis:
/// the glyph origin quirk of the font (see `Metrics::origin`),
/// the stroke that will be drawn around the glyphs,
/// and the centering of the rendered text block within the box.
///
/// The vertical divisors are empirically tuned values that account for
/// how line spacing makes multi-line text occupy its height differently
/// than a single line does. They are load-bearing for output parity;
/// don't "fix" them.
pub fn place(font: &Font<'static>, text: &str, size: u32, max_box: Dimensions) -> Offset {
    let metrics = Metrics::new(font, size);
    let (width, height) = metrics.text_size(text);
    let origin = metrics.origin(text);
    let stroke = metrics.stroke_width() as f32;

    let vdiv = if text.contains('\n') { MULTILINE_VDIV } else { SINGLE_LINE_VDIV };

    let dx = origin.dx - stroke - (max_box.width as f32 - width) / 2.0;
    let dy = origin.dy - stroke
        - ((max_box.height as f32 - height / vdiv) / 2.0).floor();

    trace!("Text offset within {} computed as {}", max_box, Offset::new(dx, dy));
    Offset::new(dx, dy)
}

/// Line spacing that multi-line text is drawn with,
/// derived from its vertical draw offset.
#[inline]
pub fn line_spacing(offset: Offset) -> f32 {
    -offset.dy / 2.0
}


#[cfg(test)]
mod tests {
    use model::{Dimensions, Offset};
    use text::tests::test_font;
    use super::{line_spacing, place};

    #[test]
    fn spacing_is_half_the_vertical_offset() {
        assert_eq!(8.0, line_spacing(Offset::new(3.0, -16.0)));
        assert_eq!(-2.0, line_spacing(Offset::new(0.0, 4.0)));
    }

    #[test]
    fn wider_box_pushes_text_further_left() {
        let font = match test_font() { Some(f) => f, None => return };
        // The centering term grows with the box, so the (negated-at-draw)
        // offset must strictly decrease.
        let narrow = place(&font, "HELLO", 11, Dimensions::new(100, 100));
        let wide = place(&font, "HELLO", 11, Dimensions::new(300, 100));
        assert!(wide.dx < narrow.dx);
        assert_eq!(narrow.dy, wide.dy);
    }

    #[test]
    fn line_break_changes_the_vertical_division() {
        let font = match test_font() { Some(f) => f, None => return };
        let box_ = Dimensions::new(300, 100);
        let single = place(&font, "AB", 11, box_);
        let double = place(&font, "A\nB", 11, box_);
        // Two lines are both taller and divided by 1.25 instead of 1.5,
        // so the text starts strictly higher up in the box.
        assert!(double.dy > single.dy);
    }
}
