//! Module defining constants relevant to the data model.

use super::types::{Color, Dimensions};


/// Name of the background style used when a request doesn't pick one.
pub const DEFAULT_STYLE: &'static str = "default";

/// Name of the font used for unrotated captions.
/// The bolder weight reads better when text sits flat on the image.
pub const DEFAULT_THICK_FONT: &'static str = "thick";
/// Name of the font used for rotated captions.
/// Thin strokes survive the resampling of rotation better.
pub const DEFAULT_THIN_FONT: &'static str = "thin";

/// Default fill color of caption text.
pub const DEFAULT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the stroke drawn around caption glyphs.
pub const STROKE_COLOR: Color = Color(0x0, 0x0, 0x0);

/// Output size used when a request specifies neither dimension.
pub const DEFAULT_IMAGE_SIZE: Dimensions = Dimensions::new(600, 600);
/// Output size of preview renders.
pub const PREVIEW_IMAGE_SIZE: Dimensions = Dimensions::new(300, 300);

/// Upper bound on the pixel count of a rendered image.
/// Requests over the budget are scaled down, not rejected.
pub const MAX_PIXELS: u64 = 1920 * 1080;

/// Maximum number of captions a request can carry.
pub const MAX_CAPTION_COUNT: usize = 16;
/// Maximum length (in Unicode codepoints) of a single caption.
pub const MAX_CAPTION_LENGTH: usize = 256;
