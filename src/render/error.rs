//! Rendering error.

use std::error::Error;
use std::fmt;

use image;

use resources::{Font, FontLoader, Loader, Template, TemplateLoader};


/// Error that may occur during a render.
pub enum RenderError<Tl = TemplateLoader, Fl = FontLoader>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    /// Error while loading the template.
    Template(String, Tl::Err),
    /// Error while loading a font.
    Font(String, Fl::Err),
    /// Error while encoding the final image.
    Encode(image::ImageError),
}

impl<Tl, Fl> Error for RenderError<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            RenderError::Template(_, ref e) => Some(e),
            RenderError::Font(_, ref e) => Some(e),
            RenderError::Encode(ref e) => Some(e),
        }
    }
}

impl<Tl, Fl> fmt::Debug for RenderError<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderError::Template(ref t, _) => write!(fmt, "RenderError::Template({:?})", t),
            RenderError::Font(ref f, _) => write!(fmt, "RenderError::Font({:?})", f),
            RenderError::Encode(ref e) => write!(fmt, "RenderError::Encode({:?})", e),
        }
    }
}

impl<Tl, Fl> fmt::Display for RenderError<Tl, Fl>
    where Tl: Loader<Item=Template>, Fl: Loader<Item=Font>
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderError::Template(ref t, ref e) =>
                write!(fmt, "cannot load template `{}`: {}", t, e),
            RenderError::Font(ref f, ref e) =>
                write!(fmt, "cannot load font `{}`: {}", f, e),
            RenderError::Encode(ref e) =>
                write!(fmt, "failed to encode the final image: {}", e),
        }
    }
}
