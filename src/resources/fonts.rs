//! Module for loading the fonts that captions are rendered with.

use std::error::Error;
use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::Path;

use rusttype;

use super::Loader;
use super::filesystem::{BytesLoader, FileLoader};


pub const FILE_EXTENSION: &'static str = "ttf";


/// Font that can be used to render captions.
pub struct Font(rusttype::Font<'static>);

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<rusttype::Font<'static>> for Font {
    fn from(font: rusttype::Font<'static>) -> Self {
        Font(font)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyph(s))", self.0.glyph_count())
    }
}


/// Loader for `*.ttf` font files in a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader<'static>,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                FileLoader::for_extension(directory, FILE_EXTENSION))
        }
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name)?;
        match rusttype::Font::try_from_vec(bytes) {
            Some(font) => {
                debug!("Font `{}` loaded successfully", name);
                Ok(Font(font))
            }
            None => {
                error!("File of the `{}` font resource doesn't contain a usable font",
                    name);
                Err(FontError::BadData(name.to_owned()))
            }
        }
    }
}


/// Error that may occur while loading a font.
#[derive(Debug)]
pub enum FontError {
    /// Error while reading the font file.
    File(io::Error),
    /// The file's bytes don't form a usable font.
    BadData(String),
}

impl From<io::Error> for FontError {
    fn from(e: io::Error) -> Self {
        FontError::File(e)
    }
}

impl Error for FontError {
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            FontError::File(ref e) => Some(e),
            FontError::BadData(..) => None,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontError::File(ref e) => write!(fmt, "cannot read font file: {}", e),
            FontError::BadData(ref name) =>
                write!(fmt, "file of font `{}` is not a usable font", name),
        }
    }
}
