//! Page content placed through a [`crate::Renderer`].
//!
//! The types here describe what goes on each page without referencing the
//! rendering engine, so a renderer can be cloned and rendered any number of
//! times from the same description.

/// Font style applied to written text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// Horizontal alignment of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Fully justified paragraphs.
    Justified,
}

/// A paragraph of text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
    alignment: HorizontalAlignment,
}

impl TextBlock {
    /// Creates a left aligned block.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated block.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextBlock {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// The font in effect when a block was written.
///
/// `family == None` selects the engine's default family.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontSelection {
    pub family: Option<String>,
    pub style: FontStyle,
    pub size: Option<u8>,
}

/// A single item placed on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageItem {
    /// Text written with the font selected at the time.
    Text {
        block: TextBlock,
        font: FontSelection,
    },
    /// Vertical space of the given number of lines.
    Break(u32),
}

/// One page worth of content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    items: Vec<PageItem>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    pub fn push(&mut self, item: PageItem) {
        self.items.push(item);
    }
}

/// Ordered pages plus the font cursor used while writing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Content {
    pages: Vec<Page>,
    font: FontSelection,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Starts a new, empty page.
    pub fn add_page(&mut self) {
        self.pages.push(Page::new());
    }

    pub fn set_font(&mut self, font: FontSelection) {
        self.font = font;
    }

    /// Writes a block on the current page, opening the first page if needed.
    pub fn write(&mut self, block: TextBlock) {
        let font = self.font.clone();
        self.current_page().push(PageItem::Text { block, font });
    }

    /// Adds vertical space on the current page.
    pub fn line_break(&mut self, lines: u32) {
        self.current_page().push(PageItem::Break(lines));
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
