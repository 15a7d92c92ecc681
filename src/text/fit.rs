//! Module implementing the font size search.

use std::cmp;

use rusttype::Font;

use model::Dimensions;
use super::metrics::Metrics;


/// Smallest font size the search will consider.
/// Text that doesn't fit even at this size is rendered anyway (and clips).
pub const MIN_FONT_SIZE: u32 = 7;

/// Divisor applied to the box height to obtain the largest candidate size.
const MAX_SIZE_DIVISOR: u32 = 9;


/// Find the largest font size at which given text still fits the box.
///
/// The search is a descending linear scan from `max_box.height / 9`
/// down to `MIN_FONT_SIZE`. A small part of the box is reserved as
/// a margin against clipping: 1/35 of its width and 1/10 of its height.
///
/// This never fails: if no size fits, the smallest one is returned.
///
/// Note that the scan is deliberately *not* a binary search -- the fit
/// predicate is not guaranteed monotonic across font sizes (kerning and
/// glyph hinting can make a bigger size measure relatively narrower).
pub fn fit(font: &Font<'static>, text: &str, max_box: Dimensions) -> u32 {
    let max_width = max_box.width as f32 - max_box.width as f32 / 35.0;
    let max_height = max_box.height as f32 - max_box.height as f32 / 10.0;

    let largest = cmp::max(MIN_FONT_SIZE, max_box.height / MAX_SIZE_DIVISOR);
    let mut size = largest;
    loop {
        let metrics = Metrics::new(font, size);
        let (width, height) = metrics.text_size(text);
        let origin = metrics.origin(text);

        // The origin offset is subtracted since that part of the box
        // is never inked and shouldn't count against the fit.
        if width - origin.dx <= max_width && height - origin.dy <= max_height {
            break;
        }
        if size <= MIN_FONT_SIZE {
            break;  // degrade to the smallest size rather than fail
        }
        size -= 1;
    }

    trace!("Fitted text of length {} into {} at font size {} (of max {})",
        text.len(), max_box, size, largest);
    size
}


#[cfg(test)]
mod tests {
    use model::Dimensions;
    use text::tests::test_font;
    use super::{fit, MIN_FONT_SIZE};

    #[test]
    fn size_stays_within_bounds() {
        let font = match test_font() { Some(f) => f, None => return };
        for &(w, h) in [(300, 100), (200, 80), (50, 20), (10, 5)].iter() {
            let max_box = Dimensions::new(w, h);
            let size = fit(&font, "HELLO WORLD", max_box);
            assert!(size >= MIN_FONT_SIZE);
            assert!(size <= ::std::cmp::max(MIN_FONT_SIZE, h / 9),
                "size {} out of bounds for {}", size, max_box);
        }
    }

    #[test]
    fn shrinking_the_box_never_grows_the_text() {
        let font = match test_font() { Some(f) => f, None => return };
        let text = "SHRINKING BOXES";
        let mut last_size = ::std::u32::MAX;
        for &(w, h) in [(400, 150), (300, 110), (200, 75), (100, 40), (50, 20)].iter() {
            let size = fit(&font, text, Dimensions::new(w, h));
            assert!(size <= last_size,
                "font size grew from {} to {} at {}x{}", last_size, size, w, h);
            last_size = size;
        }
    }

    #[test]
    fn short_text_gets_the_largest_size() {
        let font = match test_font() { Some(f) => f, None => return };
        // A single character in a generous box fits at the very first
        // candidate size.
        let size = fit(&font, "A", Dimensions::new(300, 100));
        assert_eq!(11, size);  // 100 / 9
    }

    #[test]
    fn oversized_text_degrades_to_minimum() {
        let font = match test_font() { Some(f) => f, None => return };
        let size = fit(&font, "ABSOLUTELY ENORMOUS CAPTION TEXT", Dimensions::new(30, 90));
        assert_eq!(MIN_FONT_SIZE, size);
    }
}
