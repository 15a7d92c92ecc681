//! Module preparing the background canvas:
//! resizing, the pixel budget, and the blurred letterbox padding.

use std::cmp;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use image::imageops::{self, FilterType};

use model::Dimensions;
use util::imageops::darken;


/// Factor the requested dimensions shrink by on every step
/// towards the pixel budget.
const BUDGET_STEP: f64 = 0.75;

/// Factor the padding background is darkened by.
const PAD_DARKEN: f32 = 0.4;
/// Radius of the Gaussian blur applied to the padding background.
const PAD_BLUR: f32 = 5.0;


/// Resize the background image to the target dimensions.
///
/// * with `pad`, the background is scaled to the largest size that fits
///   entirely within the target while keeping its aspect ratio
///   (the gap is filled by `pad()` later);
/// * with only one axis given, the other one follows the aspect ratio;
/// * with no axis given, the default size kicks in, stretched along
///   the longer side of the background.
pub fn resize(image: &DynamicImage, size: Dimensions, pad: bool,
              default_size: Dimensions) -> DynamicImage {
    let (orig_width, orig_height) = image.dimensions();
    let ratio = orig_width as f32 / orig_height as f32;

    let (width, height) = (size.width, size.height);
    let (target_width, target_height) = if pad {
        if (width as f32) < height as f32 * ratio {
            (width, (width as f32 / ratio) as u32)
        } else {
            ((height as f32 * ratio) as u32, height)
        }
    } else if width > 0 {
        (width, (width as f32 / ratio) as u32)
    } else if height > 0 {
        ((height as f32 * ratio) as u32, height)
    } else if ratio < 1.0 {
        (default_size.width, (default_size.height as f32 / ratio) as u32)
    } else {
        ((default_size.width as f32 * ratio) as u32, default_size.height)
    };

    if (target_width, target_height) == (orig_width, orig_height) {
        debug!("Using original background size of {}x{}", orig_width, orig_height);
        return image.clone();
    }
    debug!("Resizing {}x{} background to {}x{}",
        orig_width, orig_height, target_width, target_height);
    image.resize_exact(target_width, target_height, FilterType::Lanczos3)
}


/// Shrink requested dimensions until they respect the pixel budget.
///
/// This runs on the *requested* size, before any rendering, and protects
/// against memory & time blowup from oversized output requests.
pub fn fit(size: Dimensions, max_pixels: u64) -> Dimensions {
    let (mut width, mut height) = (size.width as f64, size.height as f64);
    while width * height > max_pixels as f64 {
        width *= BUDGET_STEP;
        height *= BUDGET_STEP;
    }

    let result = Dimensions::new(width as u32, height as u32);
    if result != size {
        debug!("Requested size {} exceeds the pixel budget, shrunk to {}",
            size, result);
    }
    result
}


/// Letterbox the rendered foreground within the full target size,
/// filling the bars with a darkened, blurred copy of the same background.
///
/// The foreground gets a one pixel black safety border (as far as the
/// target size allows) so that its edges stay crisp against the blur.
pub fn pad(foreground: &RgbaImage, background: &DynamicImage,
           size: Dimensions) -> RgbaImage {
    let (fg_width, fg_height) = foreground.dimensions();

    let border_width = cmp::min(size.width, fg_width + 2);
    let border_height = cmp::min(size.height, fg_height + 2);
    let mut border = RgbaImage::from_pixel(
        border_width, border_height, Rgba([0, 0, 0, 255]));
    imageops::overlay(&mut border, foreground,
        (border_width.saturating_sub(fg_width) / 2) as i64,
        (border_height.saturating_sub(fg_height) / 2) as i64);

    // The fill is the *original* background stretched over the whole
    // target, aspect ratio be damned; nobody sees its proportions
    // through the blur anyway.
    let filled = background
        .resize_exact(size.width, size.height, FilterType::Lanczos3)
        .to_rgba8();
    let mut result = imageops::blur(&darken(&filled, PAD_DARKEN), PAD_BLUR);

    imageops::overlay(&mut result, &border,
        (size.width.saturating_sub(border_width) / 2) as i64,
        (size.height.saturating_sub(border_height) / 2) as i64);
    result
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    use model::Dimensions;
    use super::{fit, pad, resize};

    const DEFAULT_SIZE: Dimensions = Dimensions::new(600, 600);

    fn background(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width, height, Rgba([100, 100, 100, 255])))
    }

    #[test]
    fn resize_to_width_keeps_aspect() {
        let resized = resize(&background(600, 400), Dimensions::new(300, 0),
            false, DEFAULT_SIZE);
        assert_eq!((300, 200), resized.dimensions());
    }

    #[test]
    fn resize_to_height_keeps_aspect() {
        let resized = resize(&background(600, 400), Dimensions::new(0, 200),
            false, DEFAULT_SIZE);
        assert_eq!((300, 200), resized.dimensions());
    }

    #[test]
    fn resize_with_pad_fits_within_target() {
        let resized = resize(&background(600, 400), Dimensions::new(300, 300),
            true, DEFAULT_SIZE);
        assert_eq!((300, 200), resized.dimensions());

        let resized = resize(&background(400, 600), Dimensions::new(300, 300),
            true, DEFAULT_SIZE);
        assert_eq!((200, 300), resized.dimensions());
    }

    #[test]
    fn resize_defaults_for_landscape() {
        // Aspect ratio 1.5 >= 1.0: default height, width follows the ratio.
        let resized = resize(&background(600, 400), Dimensions::new(0, 0),
            false, DEFAULT_SIZE);
        assert_eq!((900, 600), resized.dimensions());
    }

    #[test]
    fn resize_defaults_for_portrait() {
        // Aspect ratio below 1.0: default width, height follows the ratio.
        let resized = resize(&background(400, 600), Dimensions::new(0, 0),
            false, DEFAULT_SIZE);
        assert_eq!((600, 900), resized.dimensions());
    }

    #[test]
    fn budget_is_enforced_by_quarter_steps() {
        let max_pixels: u64 = 1920 * 1080;
        let shrunk = fit(Dimensions::new(4000, 4000), max_pixels);
        // 4000 * 0.75^4 = 1265.625, truncated.
        assert_eq!(Dimensions::new(1265, 1265), shrunk);
        assert!(shrunk.pixels() <= max_pixels);
    }

    #[test]
    fn budget_leaves_small_sizes_alone() {
        let size = Dimensions::new(800, 600);
        assert_eq!(size, fit(size, 1920 * 1080));
        // Unconstrained axes stay unconstrained.
        assert_eq!(Dimensions::new(0, 0), fit(Dimensions::new(0, 0), 1920 * 1080));
    }

    #[test]
    fn pad_produces_exactly_the_target_size() {
        let foreground = RgbaImage::from_pixel(100, 50, Rgba([200, 0, 0, 255]));
        let padded = pad(&foreground, &background(600, 400), Dimensions::new(300, 300));
        assert_eq!((300, 300), padded.dimensions());

        // The middle is the foreground, verbatim.
        assert_eq!(Rgba([200, 0, 0, 255]), *padded.get_pixel(150, 150));
        // The corners are the darkened (0.4x) blurred background;
        // allow for rounding inside the blur.
        for &(x, y) in [(0, 0), (299, 299)].iter() {
            let pixel = padded.get_pixel(x, y);
            assert!(pixel.0[0] >= 38 && pixel.0[0] <= 42,
                "corner ({}, {}) is {:?}, expected ~40 gray", x, y, pixel);
            assert_eq!(pixel.0[0], pixel.0[1]);
            assert_eq!(pixel.0[1], pixel.0[2]);
        }
    }
}
