//! The capability a [`crate::Document`] needs from a rendering engine.

use std::path::Path;

use crate::content::{FontStyle, TextBlock};
use crate::error::Result;
use crate::metadata::Metadata;

/// Engine that turns placed content plus metadata into document bytes.
///
/// Implementations are cloned on every content change of a document, so the
/// clone must not share mutable state with the original.
pub trait Renderer: Clone {
    /// Name recorded as the creator of new documents.
    fn creator(&self) -> &str;

    /// Registers the font family `name` loaded from `directory`.
    fn add_font_family(&mut self, name: &str, directory: &Path) -> Result<()>;

    /// Starts a new page.
    fn add_page(&mut self);

    /// Selects the font for subsequent writes. `size == None` keeps the engine default.
    fn set_font(&mut self, family: &str, style: FontStyle, size: Option<u8>) -> Result<()>;

    /// Writes a block of text on the current page.
    fn write(&mut self, block: TextBlock);

    /// Adds vertical space on the current page.
    fn line_break(&mut self, lines: u32);

    /// Produces the final document. Identical state must produce identical bytes.
    ///
    /// `utf8` is the document flag at serialization time. It applies to
    /// document strings that carry no flag of their own and never alters page
    /// text.
    fn render(&self, metadata: &Metadata, utf8: bool) -> Result<Vec<u8>>;
}
