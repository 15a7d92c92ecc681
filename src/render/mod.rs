//! Module implementing meme rendering.

mod engine;
mod error;
mod output;
mod resize;
mod task;


pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Config as EngineConfig,
                       Engine};
pub use self::error::RenderError;
pub use self::output::RenderOutput;
