//! [`Renderer`] adapter over `genpdf`.
//!
//! genpdf consumes its document when rendering, so the engine keeps a
//! description of the content and builds a fresh `genpdf::Document` on every
//! [`Renderer::render`] call. Page text is laid out with the embedded fonts as
//! given; the rendered bytes are passed through [`crate::info`] to write the
//! metadata.

use std::fmt;
use std::path::Path;

use genpdf::elements::{Break, PageBreak, Paragraph};
use genpdf::fonts::{Font, FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, SimplePageDecorator};
use log::debug;

use crate::builder::EngineConfig;
use crate::content::{Content, FontSelection, FontStyle, HorizontalAlignment, PageItem, TextBlock};
use crate::error::{Error, Result};
use crate::fonts;
use crate::info;
use crate::metadata::{Metadata, MetadataField};
use crate::renderer::Renderer;

/// Name recorded as the default creator of documents rendered by this engine.
pub const ENGINE_NAME: &str = "genpdf";

/// genpdf-backed rendering engine.
#[derive(Clone)]
pub struct GenpdfEngine {
    config: EngineConfig,
    default_family: FontFamily<FontData>,
    families: Vec<(String, FontFamily<FontData>)>,
    content: Content,
}

impl GenpdfEngine {
    /// Creates an engine using `default_family` for text without an explicit font.
    pub fn new(config: EngineConfig, default_family: FontFamily<FontData>) -> Self {
        Self {
            config,
            default_family,
            families: Vec::new(),
            content: Content::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Names of the font families added with [`Renderer::add_font_family`].
    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|(name, _)| name.as_str())
    }

    fn has_family(&self, name: &str) -> bool {
        self.families.iter().any(|(existing, _)| existing.as_str() == name)
    }

    fn build_document(&self, metadata: &Metadata) -> Result<genpdf::Document> {
        let mut document = genpdf::Document::new(self.default_family.clone());
        let families: Vec<(&str, FontFamily<Font>)> = self
            .families
            .iter()
            .map(|(name, family)| (name.as_str(), document.add_font_family(family.clone())))
            .collect();

        document.set_title(metadata.get(MetadataField::Title));
        document.set_minimal_conformance();
        document.set_paper_size(self.config.paper_size());
        document.set_font_size(self.config.font_size);
        document.set_line_spacing(self.config.line_spacing);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(self.config.margins());
        document.set_page_decorator(decorator);

        for (index, page) in self.content.pages().iter().enumerate() {
            if index > 0 {
                document.push(PageBreak::new());
            }
            for item in page.items() {
                match item {
                    PageItem::Text { block, font } => {
                        document.push(paragraph(block, font, &families)?)
                    }
                    PageItem::Break(lines) => document.push(Break::new(*lines)),
                }
            }
        }

        Ok(document)
    }
}

fn paragraph(
    block: &TextBlock,
    font: &FontSelection,
    families: &[(&str, FontFamily<Font>)],
) -> Result<Paragraph> {
    let mut style = Style::new();
    if let Some(name) = &font.family {
        let family = families
            .iter()
            .find(|(existing, _)| *existing == name.as_str())
            .map(|(_, family)| family.clone())
            .ok_or_else(|| Error::UnknownFontFamily(name.clone()))?;
        style.set_font_family(family);
    }
    if font.style.is_bold() {
        style.set_bold();
    }
    if font.style.is_italic() {
        style.set_italic();
    }
    if let Some(size) = font.size {
        style.set_font_size(size);
    }

    let mut paragraph = Paragraph::default();
    paragraph.push_styled(block.text(), style);
    paragraph.set_alignment(alignment(block.alignment()));
    Ok(paragraph)
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        // genpdf lays out ragged-right only
        HorizontalAlignment::Left | HorizontalAlignment::Justified => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

impl Renderer for GenpdfEngine {
    fn creator(&self) -> &str {
        ENGINE_NAME
    }

    fn add_font_family(&mut self, name: &str, directory: &Path) -> Result<()> {
        let family = fonts::load_family(directory, name)?;
        match self.families.iter_mut().find(|(existing, _)| existing.as_str() == name) {
            Some(entry) => entry.1 = family,
            None => self.families.push((name.to_owned(), family)),
        }
        Ok(())
    }

    fn add_page(&mut self) {
        self.content.add_page();
    }

    fn set_font(&mut self, family: &str, style: FontStyle, size: Option<u8>) -> Result<()> {
        let family = if family.is_empty() {
            None
        } else if self.has_family(family) {
            Some(family.to_owned())
        } else {
            return Err(Error::UnknownFontFamily(family.to_owned()));
        };

        self.content.set_font(FontSelection {
            family,
            style,
            size,
        });
        Ok(())
    }

    fn write(&mut self, block: TextBlock) {
        self.content.write(block);
    }

    fn line_break(&mut self, lines: u32) {
        self.content.line_break(lines);
    }

    fn render(&self, metadata: &Metadata, utf8: bool) -> Result<Vec<u8>> {
        let document = self.build_document(metadata)?;
        let mut buffer = Vec::new();
        document.render(&mut buffer)?;
        debug!(
            "genpdf rendered {} page(s) into {} bytes",
            self.content.pages().len().max(1),
            buffer.len()
        );
        info::apply_document_info(&buffer, metadata, utf8)
    }
}

impl fmt::Debug for GenpdfEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenpdfEngine")
            .field("config", &self.config)
            .field("families", &self.font_families().collect::<Vec<_>>())
            .field("content", &self.content)
            .finish()
    }
}
