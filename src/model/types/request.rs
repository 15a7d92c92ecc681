//! Module implementing the `RenderRequest` type and its builder.

use std::error;
use std::fmt;

use model::constants::{DEFAULT_STYLE, MAX_CAPTION_COUNT, MAX_CAPTION_LENGTH};
use super::geometry::Dimensions;


/// Describes a single meme to render. Used as an input structure.
///
/// *Note*: If the target `size` exceeds the engine's pixel budget,
/// the result is silently rendered at a proportionally smaller size.
#[derive(Clone, Default, PartialEq)]
pub struct RenderRequest {
    /// Name of the template to render.
    pub template: String,
    /// Captions, one per text region of the template, in template order.
    ///
    /// If fewer captions than regions are given,
    /// the remaining regions are left empty.
    pub captions: Vec<String>,
    /// Name of the background style variant to use.
    pub style: String,
    /// Target output dimensions. A zero axis means "derive from the template".
    pub size: Dimensions,
    /// Whether to letterbox the result over a blurred background.
    ///
    /// `None` applies the default policy: pad exactly when both
    /// output dimensions have been given explicitly.
    pub pad: Option<bool>,
}

impl RenderRequest {
    /// Caption for the text region of given index.
    /// Missing captions are treated as empty.
    #[inline]
    pub fn caption(&self, index: usize) -> &str {
        self.captions.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    /// Whether the request includes any text.
    #[inline]
    pub fn has_text(&self) -> bool {
        self.captions.iter().any(|c| !c.is_empty())
    }
}

impl fmt::Debug for RenderRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("RenderRequest");
        ds.field("template", &self.template);
        if self.style != DEFAULT_STYLE {
            ds.field("style", &self.style);
        }
        if self.size != Dimensions::default() {
            ds.field("size", &self.size);
        }
        if let Some(pad) = self.pad {
            ds.field("pad", &pad);
        }
        if !self.captions.is_empty() {
            ds.field("captions", &self.captions);
        }
        ds.finish()
    }
}


/// Builder for `RenderRequest`.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    template: Option<String>,
    captions: Vec<String>,
    style: Option<String>,
    size: Option<Dimensions>,
    pad: Option<bool>,
}

impl Builder {
    /// Create a new `Builder` for a `RenderRequest`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Builder {
    /// Set the template to render.
    #[inline]
    pub fn template<S: Into<String>>(mut self, template: S) -> Self {
        self.template = Some(template.into()); self
    }

    /// Add a caption for the next text region of the template.
    #[inline]
    pub fn caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.captions.push(caption.into()); self
    }

    /// Set the background style variant.
    ///
    /// By default, the template's default background is used.
    #[inline]
    pub fn style<S: Into<String>>(mut self, style: S) -> Self {
        self.style = Some(style.into()); self
    }

    /// Set the target output dimensions.
    #[inline]
    pub fn size<D: Into<Dimensions>>(mut self, size: D) -> Self {
        self.size = Some(size.into()); self
    }

    /// Request (or forbid) letterboxing over a blurred background.
    ///
    /// Without an explicit choice, the result is padded exactly when
    /// both output dimensions have been given.
    #[inline]
    pub fn pad(mut self, pad: bool) -> Self {
        self.pad = Some(pad); self
    }
}

impl Builder {
    /// Build the resulting `RenderRequest`.
    pub fn build(self) -> Result<RenderRequest, Error> {
        self.validate()?;
        Ok(RenderRequest{
            template: self.template.unwrap(),
            captions: self.captions,
            style: self.style.unwrap_or_else(|| DEFAULT_STYLE.into()),
            size: self.size.unwrap_or_default(),
            pad: self.pad,
        })
    }

    #[doc(hidden)]
    fn validate(&self) -> Result<(), Error> {
        if self.template.is_none() {
            return Err(Error::NoTemplate);
        }
        if self.captions.len() > MAX_CAPTION_COUNT {
            return Err(Error::TooManyCaptions(self.captions.len()));
        }
        for caption in &self.captions {
            if caption.chars().count() > MAX_CAPTION_LENGTH {
                return Err(Error::CaptionTooLong(caption.chars().count()));
            }
        }
        Ok(())
    }
}


/// Error while building a `RenderRequest`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No template given.
    NoTemplate,
    /// Too many captions.
    TooManyCaptions(usize),
    /// Caption text too long.
    CaptionTooLong(usize),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoTemplate => write!(fmt, "no template chosen"),
            Error::TooManyCaptions(c) =>
                write!(fmt, "too many captions: {} > {}", c, MAX_CAPTION_COUNT),
            Error::CaptionTooLong(l) =>
                write!(fmt, "caption too long: {} > {}", l, MAX_CAPTION_LENGTH),
        }
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use model::Dimensions;
    use super::{Builder, Error};

    #[test]
    fn minimal_request() {
        let request = Builder::new().template("dog").build().unwrap();
        assert_eq!("dog", request.template);
        assert_eq!("default", request.style);
        assert_eq!(Dimensions::new(0, 0), request.size);
        assert_eq!(None, request.pad);
    }

    #[test]
    fn template_is_mandatory() {
        assert_that!(Builder::new().caption("sup").build())
            .is_err().is_equal_to(Error::NoTemplate);
    }

    #[test]
    fn missing_captions_are_empty() {
        let request = Builder::new().template("dog").caption("first").build().unwrap();
        assert_eq!("first", request.caption(0));
        assert_eq!("", request.caption(1));
        assert_eq!("", request.caption(42));
    }

    #[test]
    fn caption_length_is_validated() {
        let long: String = ::std::iter::repeat('x').take(257).collect();
        assert_that!(Builder::new().template("dog").caption(long).build())
            .is_err().is_equal_to(Error::CaptionTooLong(257));
    }

    #[test]
    fn caption_count_is_validated() {
        let mut builder = Builder::new().template("dog");
        for _ in 0..17 {
            builder = builder.caption("hi");
        }
        assert_that!(builder.build())
            .is_err().is_equal_to(Error::TooManyCaptions(17));
    }
}
