#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;

use pdf_facade::content::{FontStyle, TextBlock};
use pdf_facade::{Disposition, Document, Metadata, Renderer, Result, Sink};

/// Renderer producing a readable, deterministic byte dump of its state.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    operations: Vec<String>,
}

impl TextRenderer {
    pub fn operations(&self) -> &[String] {
        &self.operations
    }
}

impl Renderer for TextRenderer {
    fn creator(&self) -> &str {
        "text-renderer"
    }

    fn add_font_family(&mut self, name: &str, directory: &Path) -> Result<()> {
        self.operations
            .push(format!("font-family {name} {}", directory.display()));
        Ok(())
    }

    fn add_page(&mut self) {
        self.operations.push("page".to_owned());
    }

    fn set_font(&mut self, family: &str, style: FontStyle, size: Option<u8>) -> Result<()> {
        if family == "Missing" {
            return Err(pdf_facade::Error::UnknownFontFamily(family.to_owned()));
        }
        self.operations
            .push(format!("font {family} {style:?} {size:?}"));
        Ok(())
    }

    fn write(&mut self, block: TextBlock) {
        self.operations.push(format!("text {}", block.text()));
    }

    fn line_break(&mut self, lines: u32) {
        self.operations.push(format!("break {lines}"));
    }

    fn render(&self, metadata: &Metadata, utf8: bool) -> Result<Vec<u8>> {
        let mut out = String::from("%PDF-text\n");
        for (field, value) in metadata.entries() {
            out.push_str(&format!("{field}={} utf8={}\n", value.text(), value.is_utf8()));
        }
        for (key, value) in metadata.custom_properties() {
            out.push_str(&format!("custom {key}={value}\n"));
        }
        for operation in &self.operations {
            out.push_str(operation);
            out.push('\n');
        }
        out.push_str(&format!("utf8={utf8}\n%%EOF\n"));
        Ok(out.into_bytes())
    }
}

pub fn document() -> Document<TextRenderer> {
    Document::new(TextRenderer::default())
}

/// What a sink received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub content: Vec<u8>,
    pub name: String,
    pub disposition: Disposition,
    pub mime_type: String,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: RefCell<Vec<Delivery>>,
}

impl RecordingSink {
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.borrow().clone()
    }
}

impl Sink for RecordingSink {
    type Response = Delivery;

    fn send(
        &self,
        content: Vec<u8>,
        name: &str,
        disposition: Disposition,
        mime_type: &str,
    ) -> Result<Self::Response> {
        let delivery = Delivery {
            content,
            name: name.to_owned(),
            disposition,
            mime_type: mime_type.to_owned(),
        };
        self.deliveries.borrow_mut().push(delivery.clone());
        Ok(delivery)
    }
}
