//! HTTP Handlers

mod book;
mod ping;
mod settings;

pub use book::*;
pub use ping::*;
pub use settings::*;
