//! Module implementing the actual rendering task.
//! Most if not all compositing logic lives here.

use std::ops::Deref;
use std::sync::Arc;

use image::{ColorType, DynamicImage, ImageEncoder, ImageFormat, RgbaImage};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::overlay;

use model::{Color, Dimensions, RenderRequest, TextRegion, STROKE_COLOR};
use resources::{Font, Loader, Template};
use text;
use util::imageops;
use super::engine::{Config, Inner};
use super::error::RenderError;
use super::output::RenderOutput;
use super::resize;


/// Color of the region outlines drawn when the debug flag is on.
const DEBUG_OUTLINE_COLOR: Color = Color(0x0, 0xff, 0x0);


/// Fidelity that a render is performed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Mode {
    /// Small fixed output size, lossy compression, no padding.
    Preview,
    /// Requested output size (within the pixel budget), optional padding,
    /// output in the template's preferred format.
    Full,
}


/// Represents a single render and contains all the relevant logic.
///
/// This is a separate struct so that the rendering state can be
/// easily carried between its methods.
///
/// All the code here is synchronous: the pipeline is CPU-bound
/// with no suspension points, and runs entirely on the calling thread.
pub(super) struct RenderTask<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    request: RenderRequest,
    mode: Mode,
    engine: Arc<Inner<Tl, Fl>>,
}

impl<Tl, Fl> Deref for RenderTask<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    type Target = RenderRequest;
    fn deref(&self) -> &Self::Target {
        &self.request  // makes the rendering code a little terser
    }
}

impl<Tl, Fl> RenderTask<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    #[inline]
    pub fn new(request: RenderRequest, mode: Mode, engine: Arc<Inner<Tl, Fl>>) -> Self {
        RenderTask{request: request, mode: mode, engine: engine}
    }
}

impl<Tl, Fl> RenderTask<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    /// Perform the render.
    pub fn perform(self) -> Result<RenderOutput, RenderError<Tl, Fl>> {
        debug!("Rendering {:?} ({:?})", self.request, self.mode);

        let template = self.engine.template_loader.load(&self.template)
            .map_err(|e| RenderError::Template(self.template.clone(), e))?;
        let config = self.engine.config.read().clone();

        let (size, pad) = self.output_params(&config);
        let background = template.image(&self.style);

        let mut canvas = resize::resize(background, size, pad, config.default_size)
            .to_rgba8();
        let canvas_size = {
            let (width, height) = canvas.dimensions();
            Dimensions::new(width, height)
        };

        for (index, region) in template.regions().iter().enumerate() {
            self.render_caption(&mut canvas, canvas_size, template.size(),
                region, self.caption(index), &config)?;
        }

        if pad {
            canvas = resize::pad(&canvas, background, size);
        }

        let (format, bytes) = self.encode(canvas, &*template, &config)?;
        Ok(RenderOutput::new(format, bytes))
    }

    /// Final output size & padding decision for this render.
    fn output_params(&self, config: &Config) -> (Dimensions, bool) {
        match self.mode {
            Mode::Preview => (config.preview_size, false),
            Mode::Full => {
                let size = resize::fit(self.size, config.max_pixels);
                // Padding needs a fully specified target to letterbox into.
                let pad = self.pad.unwrap_or_else(|| size.is_complete())
                    && size.is_complete();
                (size, pad)
            }
        }
    }

    /// Render a single caption onto the canvas.
    ///
    /// The caption is rasterized onto a fresh transparent layer sized
    /// to its region's box, rotated if the region calls for it, and
    /// alpha-composited onto the canvas at the region's anchor.
    fn render_caption(&self, canvas: &mut RgbaImage,
                      canvas_size: Dimensions, template_size: Dimensions,
                      region: &TextRegion, caption: &str,
                      config: &Config) -> Result<(), RenderError<Tl, Fl>> {
        let max_box = region.size_within(canvas_size, template_size);
        let anchor = region.anchor_within(canvas_size, template_size);
        if max_box.width == 0 || max_box.height == 0 {
            warn!("Degenerate text region {} after scaling to {}, skipping",
                region, canvas_size);
            return Ok(());
        }

        let font_name = if region.is_rotated() { &config.thin_font }
                        else { &config.thick_font };
        trace!("Loading font `{}`...", font_name);
        let font = self.engine.font_loader.load(font_name)
            .map_err(|e| RenderError::Font(font_name.clone(), e))?;

        text::check(&*font, caption);
        let fitted = text::fit_text(&*font, caption, region.transform, max_box);
        trace!("Caption {:?} fitted at font size {} with offset {}",
            fitted.text, fitted.font_size, fitted.offset);

        // Black text gets no stroke: the stroke is itself black,
        // and doubling up produces a smudged outline.
        let stroke_width = if region.color.is_black() { 0 }
                           else { fitted.stroke_width };

        let mut layer = RgbaImage::new(max_box.width, max_box.height);
        if config.debug {
            imageops::outline(&mut layer, DEBUG_OUTLINE_COLOR.to_rgba(0xff));
        }
        text::draw(&mut layer, &fitted, &*font,
            region.color, stroke_width, STROKE_COLOR);

        // The rotated layer grows to hold its corners; like the original
        // box, it is pasted by its top-left corner, with its own alpha
        // masking out everything beyond the rotated corners.
        let layer = if region.is_rotated() {
            imageops::rotate(&layer, region.angle)
        } else {
            layer
        };
        overlay(canvas, &layer, anchor.x as i64, anchor.y as i64);
        Ok(())
    }

    /// Encode the composited canvas as bytes of the appropriate image format.
    fn encode(&self, canvas: RgbaImage, template: &Template,
              config: &Config) -> Result<(ImageFormat, Vec<u8>), RenderError<Tl, Fl>> {
        let (format, quality) = match self.mode {
            Mode::Preview => (ImageFormat::Jpeg, config.preview_jpeg_quality),
            Mode::Full => (template.preferred_format(), config.jpeg_quality),
        };
        debug!("Encoding the final image as {:?}...", format);

        let mut bytes = vec![];
        match format {
            ImageFormat::Jpeg => {
                trace!("Writing JPEG with quality {}%", quality);
                let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
                let (width, height) = rgb.dimensions();
                JpegEncoder::new_with_quality(&mut bytes, quality)
                    .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
                    .map_err(RenderError::Encode)?;
            }
            _ => {
                trace!("Writing PNG image");
                let (width, height) = canvas.dimensions();
                PngEncoder::new(&mut bytes)
                    .write_image(canvas.as_raw(), width, height, ColorType::Rgba8)
                    .map_err(RenderError::Encode)?;
            }
        }
        Ok((format, bytes))
    }
}


#[cfg(test)]
mod tests {
    use std::io;

    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    use model::{RenderRequestBuilder, TextRegion};
    use render::Engine;
    use resources::{Font, Loader, Template, DEFAULT_IMAGE_FORMAT};
    use text::tests::test_font;

    /// Loader doling out clones of a single fixed template.
    struct FixedTemplate(Template);
    impl Loader for FixedTemplate {
        type Item = Template;
        type Err = io::Error;
        fn load<'n>(&self, name: &'n str) -> Result<Template, Self::Err> {
            if name == "test" {
                Ok(self.0.clone())
            } else {
                Err(io::Error::new(io::ErrorKind::NotFound, name.to_owned()))
            }
        }
    }

    /// Loader doling out the system test font under any name.
    struct FixedFont(::rusttype::Font<'static>);
    impl Loader for FixedFont {
        type Item = Font;
        type Err = io::Error;
        fn load<'n>(&self, _: &'n str) -> Result<Font, Self::Err> {
            Ok(Font::from(self.0.clone()))
        }
    }

    fn test_engine(template: Template) -> Option<Engine<FixedTemplate, FixedFont>> {
        let font = test_font()?;
        Some(Engine::with_raw_loaders(FixedTemplate(template), FixedFont(font)))
    }

    fn flat_template(width: u32, height: u32, region: TextRegion) -> Template {
        let background = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width, height, Rgba([0, 0, 200, 255])));
        Template::new(vec![region], background, DEFAULT_IMAGE_FORMAT)
    }

    #[test]
    fn rendering_is_deterministic() {
        let template = flat_template(320, 120, TextRegion::new((10, 10), (300, 100)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        let request = RenderRequestBuilder::new()
            .template("test").caption("HELLO").size((320, 0))
            .build().unwrap();

        let first = engine.render(request.clone()).unwrap();
        let second = engine.render(request).unwrap();
        assert_eq!(first.bytes(), second.bytes());
    }

    #[test]
    fn text_stays_inside_its_region() {
        let template = flat_template(320, 120, TextRegion::new((10, 10), (300, 100)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        let request = RenderRequestBuilder::new()
            .template("test").caption("HELLO").size((320, 0))
            .build().unwrap();

        let output = engine.render(request).unwrap();
        let rendered = ::image::load_from_memory(output.bytes()).unwrap().to_rgba8();
        assert_eq!((320, 120), rendered.dimensions());

        let background = Rgba([0, 0, 200, 255]);
        let mut inked = 0;
        for (x, y, pixel) in rendered.enumerate_pixels() {
            if *pixel != background {
                assert!(x >= 10 && x < 310 && y >= 10 && y < 110,
                    "pixel ({}, {}) changed outside the text region", x, y);
                inked += 1;
            }
        }
        assert!(inked > 0, "no text was rendered at all");
    }

    #[test]
    fn preview_is_a_small_jpeg() {
        let template = flat_template(300, 300, TextRegion::new((0, 0), (300, 100)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        let request = RenderRequestBuilder::new()
            .template("test").caption("SUP").size((1024, 1024))
            .build().unwrap();

        // The requested size is ignored for previews.
        let output = engine.preview(request).unwrap();
        assert_eq!(::image::ImageFormat::Jpeg, output.format());
        assert_eq!(&[0xff, 0xd8][..], &output.bytes()[..2]);  // JPEG magic

        let rendered = ::image::load_from_memory(output.bytes()).unwrap();
        assert_eq!((300, 300), rendered.dimensions());
    }

    #[test]
    fn padded_render_is_letterboxed() {
        let template = flat_template(300, 300, TextRegion::new((0, 0), (300, 100)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        // Both dimensions given: the default policy turns padding on.
        let request = RenderRequestBuilder::new()
            .template("test").size((200, 100))
            .build().unwrap();

        let output = engine.render(request).unwrap();
        let rendered = ::image::load_from_memory(output.bytes()).unwrap().to_rgba8();
        assert_eq!((200, 100), rendered.dimensions());

        // The square background aspect-fits to 100x100 in the middle;
        // the bars on the sides hold the darkened blurred background.
        let corner = rendered.get_pixel(0, 0);
        assert!(corner.0[2] < 200, "letterbox bar wasn't darkened: {:?}", corner);
    }

    #[test]
    fn missing_template_is_an_error() {
        let template = flat_template(100, 100, TextRegion::new((0, 0), (100, 50)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        let request = RenderRequestBuilder::new().template("nope").build().unwrap();

        let error = engine.render(request).unwrap_err();
        match error {
            ::render::RenderError::Template(name, _) => assert_eq!("nope", name),
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn missing_captions_render_as_empty() {
        let template = flat_template(100, 100, TextRegion::new((0, 0), (100, 50)));
        let engine = match test_engine(template) { Some(e) => e, None => return };
        // No captions at all: the background comes through untouched.
        let request = RenderRequestBuilder::new()
            .template("test").size((100, 0))
            .build().unwrap();

        let output = engine.render(request).unwrap();
        let rendered = ::image::load_from_memory(output.bytes()).unwrap().to_rgba8();
        assert!(rendered.pixels().all(|p| *p == Rgba([0, 0, 200, 255])));
    }
}
