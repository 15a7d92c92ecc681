//! Module implementing the builder for `Engine`.

use std::error;
use std::fmt;
use std::path::{Path, PathBuf};

use model::Dimensions;
use resources::{CachingLoader, FontLoader, TemplateLoader};
use super::config::Config;
use super::{Engine, Inner};


const DEFAULT_TEMPLATE_CAPACITY: usize = 128;
const DEFAULT_FONT_CAPACITY: usize = 16;


/// Builder for the standard, directory-backed `Engine`.
///
/// For engines over custom loaders,
/// see `Engine::with_loaders` and `Engine::with_raw_loaders`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    template_directory: Option<PathBuf>,
    font_directory: Option<PathBuf>,
    template_cache_size: usize,
    font_cache_size: usize,
    config: Config,
}

impl Builder {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl Default for Builder {
    fn default() -> Self {
        Builder{
            template_directory: None,
            font_directory: None,
            template_cache_size: DEFAULT_TEMPLATE_CAPACITY,
            font_cache_size: DEFAULT_FONT_CAPACITY,
            config: Config::default(),
        }
    }
}

// Loader setters.
impl Builder {
    /// Set the directory where the templates will be loaded from.
    #[inline]
    pub fn template_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.template_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Change the size of the template cache.
    #[inline]
    pub fn template_cache_size(mut self, size: usize) -> Self {
        self.template_cache_size = size; self
    }

    /// Set the directory where the fonts will be loaded from.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.font_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Change the size of the font cache.
    #[inline]
    pub fn font_cache_size(mut self, size: usize) -> Self {
        self.font_cache_size = size; self
    }
}

// Config setters.
impl Builder {
    /// Set the output size used when a request specifies neither dimension.
    #[inline]
    pub fn default_size<D: Into<Dimensions>>(mut self, size: D) -> Self {
        self.config.default_size = size.into(); self
    }

    /// Set the output size of preview renders.
    #[inline]
    pub fn preview_size<D: Into<Dimensions>>(mut self, size: D) -> Self {
        self.config.preview_size = size.into(); self
    }

    /// Set the upper bound on the output pixel count.
    #[inline]
    pub fn max_pixels(mut self, max_pixels: u64) -> Self {
        self.config.max_pixels = max_pixels; self
    }

    /// Set the quality percentage of full-fidelity JPEG output.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality; self
    }

    /// Set the quality percentage of preview JPEG output.
    #[inline]
    pub fn preview_jpeg_quality(mut self, quality: u8) -> Self {
        self.config.preview_jpeg_quality = quality; self
    }

    /// Toggle drawing of text region outlines (visual calibration aid).
    #[inline]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug; self
    }

    /// Set the name of the font used for unrotated captions.
    #[inline]
    pub fn thick_font<S: Into<String>>(mut self, name: S) -> Self {
        self.config.thick_font = name.into(); self
    }

    /// Set the name of the font used for rotated captions.
    #[inline]
    pub fn thin_font<S: Into<String>>(mut self, name: S) -> Self {
        self.config.thin_font = name.into(); self
    }
}

// Validation & building.
impl Builder {
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine, Error> {
        for &quality in [self.config.jpeg_quality, self.config.preview_jpeg_quality].iter() {
            if quality == 0 || quality > 100 {
                return Err(Error::InvalidJpegQuality(quality));
            }
        }

        let template_directory = self.template_directory
            .ok_or(Error::NoTemplateDirectory)?;
        let font_directory = self.font_directory
            .ok_or(Error::NoFontDirectory)?;

        let template_loader = CachingLoader::new(
            TemplateLoader::new(template_directory), self.template_cache_size);
        let font_loader = CachingLoader::new(
            FontLoader::new(font_directory), self.font_cache_size);
        Ok(Engine::from(Inner::new(self.config, template_loader, font_loader)))
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No template directory given.
    NoTemplateDirectory,
    /// No font directory given.
    NoFontDirectory,
    /// JPEG quality outside of the valid percentage range.
    InvalidJpegQuality(u8),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoTemplateDirectory => write!(fmt, "no template directory configured"),
            Error::NoFontDirectory => write!(fmt, "no font directory configured"),
            Error::InvalidJpegQuality(q) =>
                write!(fmt, "JPEG quality must be within 1..=100%, got {}", q),
        }
    }
}
