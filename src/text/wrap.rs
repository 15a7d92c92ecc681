//! Module deciding whether & where a caption breaks into two lines.

use rusttype::Font;

use model::Dimensions;
use super::fit::fit;
use super::metrics::Metrics;


/// Fraction of the box width that a two-line caption may not reach.
/// Splits that render this wide look unbalanced and are rejected.
const MAX_SPLIT_WIDTH_RATIO: f32 = 0.65;


/// Break the caption into two lines if that makes its text larger.
///
/// This is a heuristic, not an optimal line breaking algorithm:
/// at most one split point is ever tried, so the result has
/// either zero or one line breaks.
pub fn wrap(font: &Font<'static>, line: &str, max_box: Dimensions) -> String {
    let split_line = split(line);
    if split_line == line {
        return line.to_owned();  // no split point found
    }

    let single_size = fit(font, line, max_box);
    let double_size = fit(font, &split_line, max_box);
    let (double_width, _) = Metrics::new(font, double_size).text_size(&split_line);

    if choose_split(single_size, double_size, double_width, max_box.width) {
        split_line
    } else {
        line.to_owned()
    }
}


/// Decide between a single-line caption and its two-line form,
/// given the font sizes both fitted at.
///
/// Splitting is only worth it when it allows strictly larger text,
/// and even then a near-full-width two-liner is vetoed.
pub fn choose_split(single_size: u32, double_size: u32,
                    double_width: f32, box_width: u32) -> bool {
    if single_size >= double_size {
        return false;
    }
    if double_width >= box_width as f32 * MAX_SPLIT_WIDTH_RATIO {
        return false;
    }
    true
}


/// Split the line at the space nearest to its midpoint, if there is one
/// close enough (within a quarter of the line's length).
///
/// The break is inserted *before* the space, which therefore stays
/// at the start of the second line.
pub fn split(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let length = chars.len();
    if length / 4 == 0 {
        return line.to_owned();  // too short to have a usable midpoint
    }

    let midpoint = length / 2 - 1;
    for offset in 0..length / 4 {
        for &index in [midpoint - offset, midpoint + offset].iter() {
            if chars[index] == ' ' {
                let byte_index = line.char_indices().nth(index)
                    .map(|(byte, _)| byte).unwrap();
                return format!("{}\n{}", &line[..byte_index], &line[byte_index..]);
            }
        }
    }
    line.to_owned()
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::{choose_split, split};

    #[test]
    fn split_at_the_space_nearest_to_midpoint() {
        // Midpoint is `o` (index 4); the scan finds the space at index 5.
        assert_eq!("hello\n world", split("hello world"));
        assert_eq!("A VERY LONG SENTENCE\n THAT EXCEEDS THE BOX WIDTH",
                   split("A VERY LONG SENTENCE THAT EXCEEDS THE BOX WIDTH"));
    }

    #[test]
    fn split_inserts_exactly_one_break() {
        let result = split("one two three four five six");
        assert_eq!(1, result.matches('\n').count());
        // Removing the break recovers the original.
        assert_eq!("one two three four five six", result.replace('\n', ""));
    }

    #[test]
    fn split_needs_a_space_near_the_middle() {
        assert_eq!("hi", split("hi"));
        assert_eq!("unbreakable", split("unbreakable"));
        // Spaces exist but are too far from the midpoint.
        assert_eq!("a bcdefghijklmnopqrstuvwxyz", split("a bcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn split_of_empty_line_is_a_noop() {
        assert_eq!("", split(""));
    }

    #[test]
    fn splitting_must_win_by_a_strict_margin() {
        // Equal sizes mean the split bought nothing: keep the single line.
        assert_that!(choose_split(11, 11, 50.0, 200)).is_false();
        assert_that!(choose_split(11, 9, 50.0, 200)).is_false();
        // Strictly larger text wins.
        assert_that!(choose_split(9, 11, 50.0, 200)).is_true();
    }

    #[test]
    fn wide_splits_are_vetoed() {
        // 130 >= 0.65 * 200, so the split is rejected despite the bigger font.
        assert_that!(choose_split(9, 11, 130.0, 200)).is_false();
        assert_that!(choose_split(9, 11, 129.9, 200)).is_true();
    }

    mod with_font {
        use model::Dimensions;
        use text::tests::test_font;
        use super::super::wrap;

        #[test]
        fn short_captions_stay_single_line() {
            let font = match test_font() { Some(f) => f, None => return };
            assert_eq!("HELLO", wrap(&font, "HELLO", Dimensions::new(300, 100)));
        }

        #[test]
        fn wrapping_never_loses_characters() {
            let font = match test_font() { Some(f) => f, None => return };
            let caption = "A VERY LONG SENTENCE THAT EXCEEDS THE BOX WIDTH";
            let wrapped = wrap(&font, caption, Dimensions::new(200, 80));
            assert_eq!(caption, wrapped.replace('\n', ""));
        }
    }
}
