//! The immutable document facade.
//!
//! A [`Document`] is a snapshot: every `with_*` method borrows the receiver and
//! returns a new value, so a base document can be shared (or cloned across
//! threads) and specialised without affecting the other holders.
//!
//! ```no_run
//! use pdf_facade::{Document, EngineBuilder, Output, ResponseSink};
//!
//! # fn main() -> Result<(), pdf_facade::Error> {
//! let base = Document::new(EngineBuilder::new().build()?)
//!     .with_author("Automation & Insights Team")
//!     .with_keywords(["report", "quarterly"]);
//!
//! let report = base
//!     .with_title("Quarterly report")
//!     .with_page()
//!     .with_text("Hello, PDF!")
//!     .with_name("report.pdf")
//!     .with_path("target/reports");
//!
//! if let Output::Written(true) = report.output("F", &ResponseSink)? {
//!     println!("saved");
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::{self, DirBuilder};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::content::{FontStyle, TextBlock};
use crate::destination::{Destination, Dispatch};
use crate::engine::GenpdfEngine;
use crate::error::{Error, Result};
use crate::metadata::{Metadata, MetadataField};
use crate::renderer::Renderer;
use crate::sink::{Disposition, Sink, MIME_TYPE};

/// Permissions of directories created for file output.
#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o755;

/// Result of [`Document::output`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output<T> {
    /// No dispatch followed; `true` when the file was written.
    Written(bool),
    /// The serialized document (`S`).
    Bytes(Vec<u8>),
    /// The artifact produced by the sink (`D`, `I`).
    Response(T),
}

impl<T> Output<T> {
    /// Returns the bytes of an `S` output.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Output::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the sink artifact of a `D` or `I` output.
    pub fn into_response(self) -> Option<T> {
        match self {
            Output::Response(response) => Some(response),
            _ => None,
        }
    }
}

/// Immutable document configuration bound to a renderer.
#[derive(Clone, Debug)]
pub struct Document<R = GenpdfEngine> {
    renderer: R,
    metadata: Metadata,
    name: String,
    path: PathBuf,
    utf8: bool,
}

impl<R: Renderer> Document<R> {
    /// Binds a new document to `renderer`; the creator defaults to the engine name.
    pub fn new(renderer: R) -> Self {
        let metadata = Metadata::new().set(MetadataField::Creator, renderer.creator(), false);
        Self {
            renderer,
            metadata,
            name: String::new(),
            path: PathBuf::new(),
            utf8: false,
        }
    }

    /// Name of the entity (person, organisation, ...) that created the document.
    pub fn author(&self) -> &str {
        self.metadata.get(MetadataField::Author)
    }

    /// Name of the package used to create the document.
    pub fn creator(&self) -> &str {
        self.metadata.get(MetadataField::Creator)
    }

    /// Keywords joined with `", "`.
    pub fn keywords(&self) -> &str {
        self.metadata.get(MetadataField::Keywords)
    }

    /// Subject of the document.
    pub fn subject(&self) -> &str {
        self.metadata.get(MetadataField::Subject)
    }

    /// Title of the document.
    pub fn title(&self) -> &str {
        self.metadata.get(MetadataField::Title)
    }

    /// Custom properties in insertion order.
    pub fn custom_properties(&self) -> &[(String, String)] {
        self.metadata.custom_properties()
    }

    /// All metadata of the snapshot.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Name of the document when displayed, downloaded or saved. Empty when unset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the document is saved in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether metadata set from now on is encoded as Unicode.
    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    /// The engine holding the placed content.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn with_metadata(&self, metadata: Metadata) -> Self {
        let mut new = self.clone();
        new.metadata = metadata;
        new
    }

    fn with_field(&self, field: MetadataField, value: impl Into<String>) -> Self {
        self.with_metadata(self.metadata.set(field, value, self.utf8))
    }

    fn with_renderer<F>(&self, change: F) -> Result<Self>
    where
        F: FnOnce(&mut R) -> Result<()>,
    {
        let mut new = self.clone();
        change(&mut new.renderer)?;
        Ok(new)
    }

    /// Sets the author.
    pub fn with_author(&self, author: impl Into<String>) -> Self {
        self.with_field(MetadataField::Author, author)
    }

    /// Sets the creator, replacing the engine name.
    pub fn with_creator(&self, creator: impl Into<String>) -> Self {
        self.with_field(MetadataField::Creator, creator)
    }

    /// Sets the subject.
    pub fn with_subject(&self, subject: impl Into<String>) -> Self {
        self.with_field(MetadataField::Subject, subject)
    }

    /// Sets the title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        self.with_field(MetadataField::Title, title)
    }

    /// Sets the keywords, joined with `", "`.
    pub fn with_keywords<I, S>(&self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_metadata(self.metadata.set_keywords(keywords, self.utf8))
    }

    /// Replaces all custom properties.
    ///
    /// A key naming a standard entry such as `Title` or `Producer` is not
    /// written by [`GenpdfEngine`]; see [`crate::info::is_reserved_key`].
    pub fn with_custom_properties<I, K, V>(&self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_metadata(self.metadata.set_custom_properties(properties))
    }

    /// Sets the file name used by the `F`, `D` and `I` destinations.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.name = name.into();
        new
    }

    /// Sets the directory used by the `F` destination. Nothing is checked or created here.
    pub fn with_path(&self, path: impl Into<PathBuf>) -> Self {
        let mut new = self.clone();
        new.path = path.into();
        new
    }

    /// Sets the encoding flag for metadata set afterwards and for serialization.
    ///
    /// Metadata that is already stored keeps the flag it was set with.
    pub fn with_utf8(&self, utf8: bool) -> Self {
        let mut new = self.clone();
        new.utf8 = utf8;
        new
    }

    /// Adds the font family `name` from `directory`.
    pub fn with_font_family(&self, name: &str, directory: impl AsRef<Path>) -> Result<Self> {
        self.with_renderer(|renderer| renderer.add_font_family(name, directory.as_ref()))
    }

    /// Starts a new page.
    pub fn with_page(&self) -> Self {
        let mut new = self.clone();
        new.renderer.add_page();
        new
    }

    /// Selects the font for following text. An empty `family` selects the default family.
    pub fn with_font(&self, family: &str, style: FontStyle, size: Option<u8>) -> Result<Self> {
        self.with_renderer(|renderer| renderer.set_font(family, style, size))
    }

    /// Writes a block of text on the current page.
    pub fn with_text(&self, block: impl Into<TextBlock>) -> Self {
        let mut new = self.clone();
        new.renderer.write(block.into());
        new
    }

    /// Adds vertical space of `lines` lines.
    pub fn with_line_break(&self, lines: u32) -> Self {
        let mut new = self.clone();
        new.renderer.line_break(lines);
        new
    }

    /// Renders the document. The same snapshot always yields the same bytes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let bytes = self.renderer.render(&self.metadata, self.utf8)?;
        debug!("serialized document into {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Delivers the document to `destination`.
    ///
    /// `destination` is parsed before anything runs, so an invalid code never
    /// leaves a file behind. With `F` the document is written to `path/name`;
    /// a remaining `D`, `I` or `S` is dispatched afterwards.
    pub fn output<S: Sink>(&self, destination: &str, sink: S) -> Result<Output<S::Response>> {
        let destination: Destination = destination.parse()?;
        self.output_to(destination, sink)
    }

    /// Like [`Document::output`] with an already parsed destination.
    pub fn output_to<S: Sink>(
        &self,
        destination: Destination,
        sink: S,
    ) -> Result<Output<S::Response>> {
        if destination.requires_name() && self.name.is_empty() {
            return Err(Error::NameNotSet);
        }

        if destination.is_empty() {
            return Ok(Output::Written(false));
        }

        let bytes = self.serialize()?;
        let written = destination.writes_file() && self.write_file(&bytes)?;

        let Some(dispatch) = destination.dispatch_kind() else {
            return Ok(Output::Written(written));
        };

        debug!("dispatching document `{}` as {:?}", self.name, dispatch);
        match dispatch {
            Dispatch::Download => sink
                .send(bytes, &self.name, Disposition::Attachment, MIME_TYPE)
                .map(Output::Response),
            Dispatch::Inline => sink
                .send(bytes, &self.name, Disposition::Inline, MIME_TYPE)
                .map(Output::Response),
            Dispatch::String => Ok(Output::Bytes(bytes)),
        }
    }

    /// Full path of the `F` destination.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }

    fn write_file(&self, bytes: &[u8]) -> Result<bool> {
        ensure_directory(&self.path)?;

        let target = self.file_path();
        fs::write(&target, bytes).map_err(|source| Error::Write {
            path: target.clone(),
            source,
        })?;
        info!("wrote {} bytes to {}", bytes.len(), target.display());
        Ok(true)
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }

    match builder.create(path) {
        Ok(()) => Ok(()),
        // another writer may have created it in the meantime
        Err(_) if path.is_dir() => Ok(()),
        Err(source) => Err(Error::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        }),
    }
}
