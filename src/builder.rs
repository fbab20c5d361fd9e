//! Configuration of the genpdf engine.

use std::path::PathBuf;

use genpdf::{Margins, PaperSize, Size};

use crate::engine::GenpdfEngine;
use crate::error::Result;
use crate::fonts;

const DEFAULT_MARGIN_MM: f64 = 10.0;
const DEFAULT_FONT_SIZE: u8 = 10;
const DEFAULT_LINE_SPACING: f64 = 1.0;

/// Page formats understood by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PageSize {
    A3,
    #[default]
    A4,
    A5,
    Legal,
    Letter,
    /// Arbitrary portrait size in millimetres.
    Custom { width_mm: f64, height_mm: f64 },
}

impl PageSize {
    /// Portrait width and height in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Legal => (216.0, 356.0),
            PageSize::Letter => (216.0, 279.0),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Page orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Resolved page geometry and typography used by [`GenpdfEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Top, right, bottom and left margins in millimetres.
    pub margins_mm: [f64; 4],
    pub font_size: u8,
    pub line_spacing: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            margins_mm: [DEFAULT_MARGIN_MM; 4],
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl EngineConfig {
    /// Paper size with the orientation applied.
    pub fn paper_size(&self) -> Size {
        match (self.page_size, self.orientation) {
            (PageSize::A4, Orientation::Portrait) => PaperSize::A4.into(),
            (PageSize::Legal, Orientation::Portrait) => PaperSize::Legal.into(),
            (PageSize::Letter, Orientation::Portrait) => PaperSize::Letter.into(),
            (page_size, orientation) => {
                let (width, height) = page_size.dimensions_mm();
                match orientation {
                    Orientation::Portrait => Size::new(width, height),
                    Orientation::Landscape => Size::new(height, width),
                }
            }
        }
    }

    pub fn margins(&self) -> Margins {
        let [top, right, bottom, left] = self.margins_mm;
        Margins::trbl(top, right, bottom, left)
    }
}

/// Builder for [`GenpdfEngine`] instances pre-configured with the crate defaults.
#[derive(Clone, Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    font_directory: Option<PathBuf>,
}

impl EngineBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page format.
    pub fn with_paper_size(mut self, page_size: PageSize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Sets top, right, bottom and left margins in millimetres.
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.config.margins_mm = [top, right, bottom, left];
        self
    }

    /// Sets the default font size in points.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.config.font_size = font_size;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.config.line_spacing = line_spacing;
        self
    }

    /// Directory searched first for the bundled default font family.
    pub fn with_default_font_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.font_directory = Some(directory.into());
        self
    }

    /// Returns the configuration the engine will be built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Loads the default font family and builds the engine.
    pub fn build(self) -> Result<GenpdfEngine> {
        let family = fonts::default_font_family(self.font_directory.as_deref())?;
        Ok(GenpdfEngine::new(self.config, family))
    }
}
