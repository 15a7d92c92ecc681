//! Module handling meme templates.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use image::{self, DynamicImage, GenericImageView, ImageFormat};
use serde_json;

use model::{Dimensions, TextRegion, DEFAULT_STYLE};
use super::Loader;
use super::filesystem::PathLoader;


/// Default image format to use when encoding rendered memes.
pub const DEFAULT_IMAGE_FORMAT: ImageFormat = ImageFormat::Png;

/// File extension of template manifests.
const MANIFEST_EXTENSION: &'static str = "json";

lazy_static! {
    /// Map of template file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// Represents a meme template.
///
/// A template knows where its captions go (the ordered text regions)
/// and carries one or more background image variants ("styles"),
/// of which `"default"` is always present.
#[derive(Clone)]
pub struct Template {
    regions: Vec<TextRegion>,
    images: HashMap<String, DynamicImage>,
    format: ImageFormat,
}

impl Template {
    /// Create a template with a sole default background image.
    pub fn new(regions: Vec<TextRegion>, image: DynamicImage, format: ImageFormat) -> Self {
        let mut images = HashMap::new();
        images.insert(DEFAULT_STYLE.to_owned(), image);
        Template{regions: regions, images: images, format: format}
    }

    /// Add a background style variant to the template.
    pub fn with_style<S: Into<String>>(mut self, name: S, image: DynamicImage) -> Self {
        self.images.insert(name.into(), image);
        self
    }
}

impl Template {
    /// The text regions of the template, in their caption order.
    #[inline]
    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    /// The background image for given style.
    ///
    /// Unknown styles fall back to the default background.
    pub fn image(&self, style: &str) -> &DynamicImage {
        self.images.get(style).unwrap_or_else(|| {
            if style != DEFAULT_STYLE {
                warn!("Unknown style `{}`, using the default one", style);
            }
            &self.images[DEFAULT_STYLE]
        })
    }

    /// Names of all the background styles this template has.
    pub fn styles<'t>(&'t self) -> Box<Iterator<Item=&'t str> + 't> {
        Box::new(self.images.keys().map(|s| s.as_str()))
    }

    /// Natural pixel size of the template (its default background image).
    pub fn size(&self) -> Dimensions {
        let (width, height) = self.image(DEFAULT_STYLE).dimensions();
        Dimensions::new(width, height)
    }

    /// The preferred format for memes generated using this template.
    /// This is usually the same that the background was loaded from.
    pub fn preferred_format(&self) -> ImageFormat {
        match self.format {
            // These are the formats we encode natively.
            ImageFormat::Png | ImageFormat::Jpeg => self.format,
            _ => DEFAULT_IMAGE_FORMAT,
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Template({}, {} region(s), {} style(s), {:?})",
            self.size(), self.regions.len(), self.images.len(), self.format)
    }
}


/// The part of a template that's stored in its manifest file.
#[derive(Debug, Deserialize)]
struct Manifest {
    regions: Vec<TextRegion>,
}


/// Loader for templates within a directory.
///
/// A template named `dog` is the file family `dog.*`:
/// the manifest `dog.json` with the text regions,
/// the mandatory default background `dog.png` (or another image extension),
/// and any number of style variants named like `dog.blank.png`.
#[derive(Debug)]
pub struct TemplateLoader {
    inner: PathLoader<'static>,
}

impl TemplateLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        let mut extensions: Vec<&str> = IMAGE_FORMAT_EXTENSIONS.keys().cloned().collect();
        extensions.push(MANIFEST_EXTENSION);
        TemplateLoader{
            inner: PathLoader::for_extensions(directory, extensions),
        }
    }
}

impl Loader for TemplateLoader {
    type Item = Template;
    type Err = TemplateError;

    fn load<'n>(&self, name: &'n str) -> Result<Template, Self::Err> {
        let mut manifest: Option<Manifest> = None;
        let mut images = HashMap::new();
        let mut format = DEFAULT_IMAGE_FORMAT;

        for path in self.inner.load_all(name)? {
            let extension = path.extension().and_then(|e| e.to_str())
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(String::new);
            if extension == MANIFEST_EXTENSION {
                trace!("Reading template manifest {}", path.display());
                let file = fs::File::open(&path)?;
                manifest = Some(serde_json::from_reader(file)?);
            } else {
                trace!("Opening template image {}", path.display());
                let image = image::open(&path)?;
                let style = style_name(&path, name);
                if style == DEFAULT_STYLE {
                    format = IMAGE_FORMAT_EXTENSIONS.get(extension.as_str())
                        .map(|f| *f).unwrap_or(DEFAULT_IMAGE_FORMAT);
                }
                images.insert(style, image);
            }
        }

        let manifest = manifest.ok_or_else(|| TemplateError::NoManifest(name.to_owned()))?;
        if manifest.regions.is_empty() {
            return Err(TemplateError::NoRegions(name.to_owned()));
        }
        if !images.contains_key(DEFAULT_STYLE) {
            return Err(TemplateError::NoDefaultImage(name.to_owned()));
        }

        debug!("Template `{}` loaded with {} region(s) and {} style(s)",
            name, manifest.regions.len(), images.len());
        Ok(Template{regions: manifest.regions, images: images, format: format})
    }
}

/// Derive the style name from an image path of given template.
/// `dog.png` is the default style; `dog.blank.png` is the style `blank`.
fn style_name(path: &Path, template: &str) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if stem.len() > template.len() + 1 && stem.starts_with(template) {
        stem[template.len() + 1..].to_owned()
    } else {
        DEFAULT_STYLE.to_owned()
    }
}


/// Error that may occur while loading a template.
#[derive(Debug)]
pub enum TemplateError {
    /// Error while accessing the template's files.
    File(io::Error),
    /// Template has no manifest file with its text regions.
    NoManifest(String),
    /// Error while parsing the template manifest.
    Manifest(serde_json::Error),
    /// Template manifest defines no text regions at all.
    NoRegions(String),
    /// Error while opening a template's background image.
    OpenImage(image::ImageError),
    /// Template has no default background image.
    NoDefaultImage(String),
}

impl From<io::Error> for TemplateError {
    fn from(e: io::Error) -> Self {
        TemplateError::File(e)
    }
}
impl From<serde_json::Error> for TemplateError {
    fn from(e: serde_json::Error) -> Self {
        TemplateError::Manifest(e)
    }
}
impl From<image::ImageError> for TemplateError {
    fn from(e: image::ImageError) -> Self {
        TemplateError::OpenImage(e)
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            TemplateError::File(ref e) => Some(e),
            TemplateError::Manifest(ref e) => Some(e),
            TemplateError::OpenImage(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TemplateError::File(ref e) =>
                write!(fmt, "cannot access template files: {}", e),
            TemplateError::NoManifest(ref t) =>
                write!(fmt, "template `{}` has no manifest", t),
            TemplateError::Manifest(ref e) =>
                write!(fmt, "invalid template manifest: {}", e),
            TemplateError::NoRegions(ref t) =>
                write!(fmt, "template `{}` defines no text regions", t),
            TemplateError::OpenImage(ref e) =>
                write!(fmt, "cannot open template image: {}", e),
            TemplateError::NoDefaultImage(ref t) =>
                write!(fmt, "template `{}` has no default background image", t),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::path::Path;

    use model::DEFAULT_STYLE;
    use super::style_name;

    #[test]
    fn style_names() {
        assert_eq!(DEFAULT_STYLE, style_name(Path::new("/t/dog.png"), "dog"));
        assert_eq!("blank", style_name(Path::new("/t/dog.blank.png"), "dog"));
        assert_eq!("dark.wide", style_name(Path::new("/t/dog.dark.wide.png"), "dog"));
    }
}
