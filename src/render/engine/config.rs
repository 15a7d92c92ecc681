//! Module with rendering engine configuration.

use model::{Dimensions, DEFAULT_IMAGE_SIZE, DEFAULT_THICK_FONT, DEFAULT_THIN_FONT,
            MAX_PIXELS, PREVIEW_IMAGE_SIZE};


/// Structure holding configuration for the `Engine`.
///
/// This is shared with `RenderTask`s. All the pipeline tunables live here
/// (rather than in ambient/global state), so renders stay deterministic
/// and testable in isolation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Output size used when a request specifies neither dimension.
    pub default_size: Dimensions,
    /// Output size of preview renders.
    pub preview_size: Dimensions,
    /// Upper bound on the output pixel count.
    /// Larger requests are scaled down, not rejected.
    pub max_pixels: u64,
    /// Quality of full-fidelity JPEG output (in %).
    pub jpeg_quality: u8,
    /// Quality of preview JPEG output (in %).
    pub preview_jpeg_quality: u8,
    /// Whether to draw the text region outlines, for visual calibration.
    pub debug: bool,
    /// Name of the font used for unrotated captions.
    pub thick_font: String,
    /// Name of the font used for rotated captions.
    pub thin_font: String,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config{
            default_size: DEFAULT_IMAGE_SIZE,
            preview_size: PREVIEW_IMAGE_SIZE,
            max_pixels: MAX_PIXELS,
            jpeg_quality: 95,
            preview_jpeg_quality: 50,
            debug: false,
            thick_font: DEFAULT_THICK_FONT.into(),
            thin_font: DEFAULT_THIN_FONT.into(),
        }
    }
}
