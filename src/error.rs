//! Error type shared by the facade, the renderer adapter and the sinks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, serializing or routing a document.
#[derive(Debug, Error)]
pub enum Error {
    /// The destination needs a filename but none was configured.
    #[error("filename not set")]
    NameNotSet,

    /// The output directory did not exist and could not be created.
    #[error("directory `{}` was not created", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination code is outside the `D`/`F`/`I`/`S` vocabulary.
    #[error("invalid output destination `{0}`")]
    InvalidDestination(String),

    /// Writing the serialized document to disk failed.
    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A font was selected from a family that was never added.
    #[error("unknown font family `{0}`")]
    UnknownFontFamily(String),

    /// Font discovery or loading failed.
    #[error("{0}")]
    Font(String),

    /// The rendering engine failed to produce the document.
    #[error("failed to render document: {0}")]
    Render(#[from] genpdf::error::Error),

    /// The rendered bytes could not be reopened to write the document information.
    #[error("failed to update document information: {0}")]
    Info(#[from] lopdf::Error),

    /// The rendered document has no usable `/Info` dictionary slot.
    #[error("document information dictionary is not a dictionary")]
    MissingInfo,

    /// The sink could not assemble a response.
    #[error("failed to build response: {0}")]
    Response(#[from] http::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
