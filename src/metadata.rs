//! Document metadata carried by every [`crate::Document`] snapshot.
//!
//! [`Metadata`] is a plain value: setters borrow the current value and return a
//! new one, so a snapshot handed out earlier never observes later changes. Each
//! text field remembers the UTF-8 flag it was set with; the flag decides how the
//! value is transcoded when it reaches the rendered document (see
//! [`crate::encoding`]).

use std::fmt;

use crate::encoding;

/// Separator placed between keywords.
pub const KEYWORD_SEPARATOR: &str = ", ";

/// The standard text fields of the document information dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataField {
    /// Entity (person, organisation, ...) that created the document.
    Author,
    /// Package used to create the document.
    Creator,
    /// Keywords, stored joined with [`KEYWORD_SEPARATOR`].
    Keywords,
    /// Subject of the document.
    Subject,
    /// Title of the document.
    Title,
}

impl MetadataField {
    /// All fields in the order returned by [`Metadata::entries`].
    pub const ALL: [MetadataField; 5] = [
        MetadataField::Author,
        MetadataField::Creator,
        MetadataField::Keywords,
        MetadataField::Subject,
        MetadataField::Title,
    ];

    /// Key used for the field in the PDF `/Info` dictionary.
    pub fn key(self) -> &'static str {
        match self {
            MetadataField::Author => "Author",
            MetadataField::Creator => "Creator",
            MetadataField::Keywords => "Keywords",
            MetadataField::Subject => "Subject",
            MetadataField::Title => "Title",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A metadata value together with the encoding flag it was set with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataValue {
    text: String,
    utf8: bool,
}

impl MetadataValue {
    pub fn new(text: impl Into<String>, utf8: bool) -> Self {
        Self {
            text: text.into(),
            utf8,
        }
    }

    /// The text exactly as it was set.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the value is transcoded to Unicode when written.
    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    /// Bytes of the value as a PDF text string.
    pub fn to_pdf_bytes(&self) -> Vec<u8> {
        encoding::pdf_text_bytes(&self.text, self.utf8)
    }
}

/// Immutable store of document metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    author: Option<MetadataValue>,
    creator: Option<MetadataValue>,
    keywords: Option<MetadataValue>,
    subject: Option<MetadataValue>,
    title: Option<MetadataValue>,
    custom_properties: Vec<(String, String)>,
}

impl Metadata {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: MetadataField) -> &Option<MetadataValue> {
        match field {
            MetadataField::Author => &self.author,
            MetadataField::Creator => &self.creator,
            MetadataField::Keywords => &self.keywords,
            MetadataField::Subject => &self.subject,
            MetadataField::Title => &self.title,
        }
    }

    fn slot_mut(&mut self, field: MetadataField) -> &mut Option<MetadataValue> {
        match field {
            MetadataField::Author => &mut self.author,
            MetadataField::Creator => &mut self.creator,
            MetadataField::Keywords => &mut self.keywords,
            MetadataField::Subject => &mut self.subject,
            MetadataField::Title => &mut self.title,
        }
    }

    /// Returns the text of `field`, or an empty string when it was never set.
    pub fn get(&self, field: MetadataField) -> &str {
        self.slot(field)
            .as_ref()
            .map(MetadataValue::text)
            .unwrap_or_default()
    }

    /// Returns the stored value of `field` including its encoding flag.
    pub fn value(&self, field: MetadataField) -> Option<&MetadataValue> {
        self.slot(field).as_ref()
    }

    /// Returns every field that has been set, in [`MetadataField::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (MetadataField, &MetadataValue)> {
        MetadataField::ALL
            .into_iter()
            .filter_map(move |field| self.value(field).map(|value| (field, value)))
    }

    /// Returns the custom properties in insertion order.
    pub fn custom_properties(&self) -> &[(String, String)] {
        &self.custom_properties
    }

    /// Returns a copy with `field` set to `value`.
    pub fn set(&self, field: MetadataField, value: impl Into<String>, utf8: bool) -> Self {
        let mut new = self.clone();
        *new.slot_mut(field) = Some(MetadataValue::new(value, utf8));
        new
    }

    /// Returns a copy whose keywords are `keywords` joined with [`KEYWORD_SEPARATOR`].
    pub fn set_keywords<I, S>(&self, keywords: I, utf8: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(KEYWORD_SEPARATOR);
        self.set(MetadataField::Keywords, joined, utf8)
    }

    /// Returns a copy whose custom properties are replaced by `properties`.
    ///
    /// Order is preserved; a repeated key overwrites the earlier value in place.
    pub fn set_custom_properties<I, K, V>(&self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut collected: Vec<(String, String)> = Vec::new();
        for (key, value) in properties {
            let (key, value) = (key.into(), value.into());
            match collected.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => collected.push((key, value)),
            }
        }

        let mut new = self.clone();
        new.custom_properties = collected;
        new
    }
}
