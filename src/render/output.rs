//! Defines the output of a render.

use std::ops::Deref;

use image::ImageFormat;
use mime::{self, Mime};


/// Output of the rendering process: an encoded image.
///
/// The engine doesn't write anything to disk itself;
/// persisting (or caching) the bytes is entirely up to the caller,
/// with `file_extension()` as the suggested way to name the artifact.
#[derive(Clone, Debug)]
#[must_use = "unused render output which must be used"]
pub struct RenderOutput {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl RenderOutput {
    #[inline]
    pub(super) fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        RenderOutput{format: format, bytes: bytes}
    }
}

impl RenderOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes of the output.
    ///
    /// See `RenderOutput::format` for how to interpret it.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Suggested file extension for the output.
    pub fn file_extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpg",
            _ => "png",
        }
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}

impl Deref for RenderOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl Into<Vec<u8>> for RenderOutput {
    fn into(self) -> Vec<u8> {
        self.into_bytes()
    }
}
