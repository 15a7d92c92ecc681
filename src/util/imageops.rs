//! Module with pixel-level image operations
//! that the `image` crate doesn't provide out of the box.

use image::{Rgba, RgbaImage};


/// Rotate an image by given angle (in degrees),
/// expanding the canvas so that no corner gets clipped.
///
/// Positive angles turn counter-clockwise.
/// Pixels outside the original image are fully transparent.
pub fn rotate(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin(), radians.cos());
    let (width, height) = (image.width() as f32, image.height() as f32);

    // The epsilon shaves off float noise that'd otherwise add
    // a spurious pixel row/column at right angles.
    let new_width = (width * cos.abs() + height * sin.abs() - 1e-3).ceil().max(1.0) as u32;
    let new_height = (width * sin.abs() + height * cos.abs() - 1e-3).ceil().max(1.0) as u32;

    let (cx, cy) = (width / 2.0, height / 2.0);
    let (ncx, ncy) = (new_width as f32 / 2.0, new_height as f32 / 2.0);

    let mut result = RgbaImage::new(new_width, new_height);
    for y in 0..new_height {
        for x in 0..new_width {
            let dx = x as f32 + 0.5 - ncx;
            let dy = y as f32 + 0.5 - ncy;
            // With the Y axis pointing down, the inverse mapping of
            // a counter-clockwise rotation is the plain rotation matrix.
            let sx = cos * dx - sin * dy + cx - 0.5;
            let sy = sin * dx + cos * dy + cy - 0.5;
            result.put_pixel(x, y, sample_bilinear(image, sx, sy));
        }
    }
    result
}

/// Sample an image at a fractional position, bilinearly.
///
/// The interpolation is alpha-weighted, so that transparent neighbors
/// don't bleed their (meaningless) color into the result.
fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let (x0, y0) = (x.floor() as i64, y.floor() as i64);
    let (tx, ty) = (x - x0 as f32, y - y0 as f32);

    let mut rgb = [0.0f32; 3];
    let mut alpha = 0.0f32;
    for &(ix, iy, weight) in [
        (x0,     y0,     (1.0 - tx) * (1.0 - ty)),
        (x0 + 1, y0,     tx * (1.0 - ty)),
        (x0,     y0 + 1, (1.0 - tx) * ty),
        (x0 + 1, y0 + 1, tx * ty),
    ].iter() {
        if ix < 0 || iy < 0 || ix >= width || iy >= height {
            continue;  // outside the image, contributes transparency
        }
        let pixel = image.get_pixel(ix as u32, iy as u32);
        let coverage = weight * pixel.0[3] as f32 / 255.0;
        rgb[0] += coverage * pixel.0[0] as f32;
        rgb[1] += coverage * pixel.0[1] as f32;
        rgb[2] += coverage * pixel.0[2] as f32;
        alpha += coverage;
    }

    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    Rgba([(rgb[0] / alpha).round().min(255.0) as u8,
          (rgb[1] / alpha).round().min(255.0) as u8,
          (rgb[2] / alpha).round().min(255.0) as u8,
          (alpha * 255.0).round().min(255.0) as u8])
}


/// Darken an image by scaling every color channel by given factor.
pub fn darken(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        for channel in 0..3 {
            pixel.0[channel] = (pixel.0[channel] as f32 * factor) as u8;
        }
    }
    result
}


/// Draw a one pixel wide rectangle outline along the edges of the image.
pub fn outline(image: &mut RgbaImage, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    for x in 0..width {
        image.put_pixel(x, 0, color);
        image.put_pixel(x, height - 1, color);
    }
    for y in 0..height {
        image.put_pixel(0, y, color);
        image.put_pixel(width - 1, y, color);
    }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use super::{darken, outline, rotate};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn rotate_right_angle() {
        // Two pixels side by side...
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, RED);
        image.put_pixel(1, 0, BLUE);

        // ...after a quarter turn counter-clockwise, the right one is on top.
        let turned = rotate(&image, 90.0);
        assert_eq!((1, 2), turned.dimensions());
        assert_eq!(BLUE, *turned.get_pixel(0, 0));
        assert_eq!(RED, *turned.get_pixel(0, 1));
    }

    #[test]
    fn rotate_expands_canvas() {
        let image = RgbaImage::new(100, 20);
        let turned = rotate(&image, 45.0);
        // Both dimensions must fit the rotated corners.
        assert!(turned.width() >= 84 && turned.width() <= 86);
        assert!(turned.height() >= 84 && turned.height() <= 86);
    }

    #[test]
    fn rotation_keeps_corners_transparent() {
        let mut image = RgbaImage::new(10, 10);
        for pixel in image.pixels_mut() {
            *pixel = RED;
        }
        let turned = rotate(&image, 45.0);
        assert_eq!(0, turned.get_pixel(0, 0).0[3]);
        assert_eq!(0, turned.get_pixel(turned.width() - 1, turned.height() - 1).0[3]);
    }

    #[test]
    fn darken_scales_channels() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([100, 200, 50, 255]));
        let darkened = darken(&image, 0.4);
        assert_eq!(Rgba([40, 80, 20, 255]), *darkened.get_pixel(0, 0));
    }

    #[test]
    fn outline_touches_only_edges() {
        let mut image = RgbaImage::new(4, 3);
        outline(&mut image, RED);
        assert_eq!(RED, *image.get_pixel(0, 0));
        assert_eq!(RED, *image.get_pixel(3, 2));
        assert_eq!(RED, *image.get_pixel(2, 0));
        assert_eq!(0, image.get_pixel(1, 1).0[3]);
        assert_eq!(0, image.get_pixel(2, 1).0[3]);
    }
}
