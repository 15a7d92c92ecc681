//! Module defining the model types.

mod color;
mod geometry;
mod region;
mod request;

pub use self::color::Color;
pub use self::geometry::{Dimensions, Offset, Point};
pub use self::region::{TextRegion, TextTransform};
pub use self::request::{RenderRequest,
                        Builder as RenderRequestBuilder,
                        Error as RenderRequestBuildError};
