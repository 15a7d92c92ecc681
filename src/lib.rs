//!
//! placard -- Memes on demand
//!

             extern crate antidote;
             extern crate css_color_parser;
             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
             extern crate lru_cache;
#[macro_use] extern crate maplit;
             extern crate mime;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate serde_json;
             extern crate unicode_normalization;


#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate spectral;


mod model;
mod render;
mod resources;
mod text;
mod util;


pub use model::*;
pub use render::*;
pub use resources::*;
pub use text::{FittedText, fit_text};
pub use util::cache::*;
