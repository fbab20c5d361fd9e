//! Immutable document facade over `genpdf`.
//!
//! [`Document`] values carry metadata, an output name and directory, and a
//! [`Renderer`]. Every `with_*` call returns a new snapshot; [`Document::output`]
//! serializes the snapshot and routes the bytes to a file, a [`Sink`] or the
//! caller.

pub mod builder;
pub mod content;
pub mod destination;
pub mod document;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod info;
pub mod metadata;
pub mod renderer;
pub mod sink;

pub use builder::{EngineBuilder, EngineConfig, Orientation, PageSize};
pub use content::{FontStyle, HorizontalAlignment, TextBlock};
pub use destination::{Destination, Dispatch};
pub use document::{Document, Output};
pub use engine::{GenpdfEngine, ENGINE_NAME};
pub use error::{Error, Result};
pub use metadata::{Metadata, MetadataField};
pub use renderer::Renderer;
pub use sink::{Disposition, ResponseSink, Sink, MIME_TYPE};
