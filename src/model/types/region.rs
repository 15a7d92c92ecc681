//! Module implementing the `TextRegion` type.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use super::color::Color;
use super::geometry::{Dimensions, Point};


/// A single caption slot on a template.
///
/// Coordinates are expressed in the pixel space of the template image
/// itself and are scaled proportionally when the template is rendered
/// at a different output size.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TextRegion {
    /// Top-left corner of the caption box.
    pub anchor: Point,
    /// Maximum size of the caption box.
    pub size: Dimensions,
    /// Fill color of the caption text. Defaults to white.
    #[serde(default)]
    pub color: Color,
    /// Rotation of the caption, in degrees. Positive is counter-clockwise.
    #[serde(default)]
    pub angle: f32,
    /// Transformation applied to caption text before rendering.
    #[serde(default)]
    pub transform: TextTransform,
}

impl TextRegion {
    /// Create a region with given box and the default styling.
    #[inline]
    pub fn new<P, D>(anchor: P, size: D) -> Self
        where P: Into<Point>, D: Into<Dimensions>
    {
        TextRegion{
            anchor: anchor.into(),
            size: size.into(),
            color: Color::default(),
            angle: 0.0,
            transform: TextTransform::default(),
        }
    }

    /// Whether the caption in this region is to be rotated.
    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }
}

impl TextRegion {
    /// The anchor point, scaled from template space to given canvas.
    pub fn anchor_within(&self, canvas: Dimensions, template: Dimensions) -> Point {
        Point::new(
            (self.anchor.x as f32 * canvas.width as f32 / template.width as f32) as u32,
            (self.anchor.y as f32 * canvas.height as f32 / template.height as f32) as u32)
    }

    /// The maximum box size, scaled from template space to given canvas.
    pub fn size_within(&self, canvas: Dimensions, template: Dimensions) -> Dimensions {
        Dimensions::new(
            (self.size.width as f32 * canvas.width as f32 / template.width as f32) as u32,
            (self.size.height as f32 * canvas.height as f32 / template.height as f32) as u32)
    }
}

impl fmt::Display for TextRegion {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}+{}@{}deg[{}]",
            self.size, self.anchor, self.angle, self.color)
    }
}


/// Case transformation applied to caption text before it is rendered.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Render the text as typed.
    None,
    /// Uppercase the entire caption (the classic image macro look).
    Upper,
    /// Lowercase the entire caption.
    Lower,
    /// Capitalize the first letter of every word.
    Title,
    /// Capitalize only the first letter of the caption.
    Capitalize,
}

impl Default for TextTransform {
    fn default() -> Self {
        TextTransform::Upper
    }
}

impl TextTransform {
    /// Apply the transformation to given text.
    ///
    /// The text is NFC-normalized first so that combining characters
    /// don't end up case-mapped separately from their base.
    pub fn apply(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        match *self {
            TextTransform::None => text,
            TextTransform::Upper => text.to_uppercase(),
            TextTransform::Lower => text.to_lowercase(),
            TextTransform::Title => {
                let mut result = String::with_capacity(text.len());
                let mut inside_word = false;
                for ch in text.chars() {
                    if ch.is_alphanumeric() {
                        if inside_word {
                            result.extend(ch.to_lowercase());
                        } else {
                            result.extend(ch.to_uppercase());
                        }
                        inside_word = true;
                    } else {
                        result.push(ch);
                        inside_word = false;
                    }
                }
                result
            }
            TextTransform::Capitalize => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase()
                        .chain(chars.flat_map(|c| c.to_lowercase()))
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}
