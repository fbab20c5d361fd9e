//! Document information dictionary handling built on top of `lopdf`.

use log::warn;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use crate::error::{Error, Result};
use crate::metadata::{Metadata, MetadataField, MetadataValue};

/// Entries that change on every render and are dropped for reproducible output.
const VOLATILE_INFO_KEYS: &[&[u8]] = &[b"CreationDate", b"ModDate"];

/// Entries owned by the producer that custom properties may not replace.
const PRODUCER_INFO_KEYS: &[&str] = &["Producer", "CreationDate", "ModDate", "Trapped"];

/// Writes `metadata` into the `/Info` dictionary of the rendered PDF.
///
/// The function opens the provided PDF bytes using `lopdf`, creates the
/// dictionary when the trailer has none, sets every metadata field and custom
/// property, and removes the creation dates and the trailer `/ID` so that the
/// same input always yields the same bytes.
///
/// Custom properties are written as UTF-16 when `utf8` is set or when the
/// value is not plain ASCII. A custom property named like a standard entry
/// (see [`is_reserved_key`]) is skipped.
pub fn apply_document_info(pdf_bytes: &[u8], metadata: &Metadata, utf8: bool) -> Result<Vec<u8>> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let info_id = info_dictionary_id(&mut document);
    let info = document
        .get_object_mut(info_id)?
        .as_dict_mut()
        .map_err(|_| Error::MissingInfo)?;

    for key in VOLATILE_INFO_KEYS {
        info.remove(key);
    }

    for (field, value) in metadata.entries() {
        info.set(field.key(), text_string(value));
    }

    for (key, value) in metadata.custom_properties() {
        if is_reserved_key(key) {
            warn!("custom property `{}` collides with a standard entry and is skipped", key);
            continue;
        }
        let value = MetadataValue::new(value.as_str(), utf8 || !value.is_ascii());
        info.set(key.as_bytes().to_vec(), text_string(&value));
    }

    document.trailer.remove(b"ID");

    let mut buffer = Vec::new();
    document.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

/// Whether `key` names a standard or producer-owned `/Info` entry.
pub fn is_reserved_key(key: &str) -> bool {
    MetadataField::ALL.iter().any(|field| field.key() == key) || PRODUCER_INFO_KEYS.contains(&key)
}

fn info_dictionary_id(document: &mut Document) -> ObjectId {
    if let Ok(id) = document.trailer.get(b"Info").and_then(Object::as_reference) {
        if document.objects.contains_key(&id) {
            return id;
        }
    }

    let id = document.add_object(Dictionary::new());
    document.trailer.set("Info", Object::Reference(id));
    id
}

fn text_string(value: &MetadataValue) -> Object {
    let format = if value.is_utf8() {
        StringFormat::Hexadecimal
    } else {
        StringFormat::Literal
    };
    Object::String(value.to_pdf_bytes(), format)
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, Document, Object, Stream};

    use super::{apply_document_info, is_reserved_key};
    use crate::metadata::{Metadata, MetadataField};

    fn minimal_pdf(with_info: bool) -> Vec<u8> {
        let mut document = Document::with_version("1.3");
        let pages_id = document.new_object_id();
        let content_id = document.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        if with_info {
            let info_id = document.add_object(dictionary! {
                "Producer" => Object::string_literal("test"),
                "CreationDate" => Object::string_literal("D:20240101000000Z"),
                "ModDate" => Object::string_literal("D:20240101000000Z"),
            });
            document.trailer.set("Info", info_id);
            document.trailer.set(
                "ID",
                vec![
                    Object::string_literal("random"),
                    Object::string_literal("random"),
                ],
            );
        }

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).unwrap();
        bytes
    }

    fn info_of(bytes: &[u8]) -> lopdf::Dictionary {
        let document = Document::load_mem(bytes).unwrap();
        let id = document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .unwrap();
        document.get_dictionary(id).unwrap().clone()
    }

    #[test]
    fn writes_metadata_and_drops_volatile_entries() {
        let metadata = Metadata::new()
            .set(MetadataField::Title, "Quarterly report", false)
            .set(MetadataField::Author, "Zoë", true);

        let bytes = apply_document_info(&minimal_pdf(true), &metadata, false).unwrap();
        let info = info_of(&bytes);

        assert_eq!(
            info.get(b"Title").unwrap().as_str().unwrap(),
            b"Quarterly report"
        );
        assert_eq!(
            info.get(b"Author").unwrap().as_str().unwrap(),
            &[0xFE, 0xFF, 0x00, 0x5A, 0x00, 0x6F, 0x00, 0xEB]
        );
        assert_eq!(info.get(b"Producer").unwrap().as_str().unwrap(), b"test");
        assert!(info.get(b"CreationDate").is_err());
        assert!(info.get(b"ModDate").is_err());

        let document = Document::load_mem(&bytes).unwrap();
        assert!(document.trailer.get(b"ID").is_err());
    }

    #[test]
    fn creates_the_info_dictionary_when_missing() {
        let metadata = Metadata::new()
            .set(MetadataField::Subject, "Testing", false)
            .set_custom_properties([("Department", "QA")]);

        let bytes = apply_document_info(&minimal_pdf(false), &metadata, false).unwrap();
        let info = info_of(&bytes);

        assert_eq!(info.get(b"Subject").unwrap().as_str().unwrap(), b"Testing");
        assert_eq!(info.get(b"Department").unwrap().as_str().unwrap(), b"QA");
    }

    #[test]
    fn document_flag_switches_custom_properties_to_unicode() {
        let metadata = Metadata::new().set_custom_properties([("Department", "QA")]);

        let bytes = apply_document_info(&minimal_pdf(false), &metadata, true).unwrap();
        let info = info_of(&bytes);

        assert_eq!(
            info.get(b"Department").unwrap().as_str().unwrap(),
            &[0xFE, 0xFF, 0x00, 0x51, 0x00, 0x41]
        );
    }

    #[test]
    fn custom_properties_never_replace_standard_entries() {
        let metadata = Metadata::new()
            .set(MetadataField::Title, "Real title", false)
            .set_custom_properties([
                ("Title", "Shadow"),
                ("Producer", "Someone else"),
                ("Department", "QA"),
            ]);

        let bytes = apply_document_info(&minimal_pdf(true), &metadata, false).unwrap();
        let info = info_of(&bytes);

        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Real title");
        assert_eq!(info.get(b"Producer").unwrap().as_str().unwrap(), b"test");
        assert_eq!(info.get(b"Department").unwrap().as_str().unwrap(), b"QA");
    }

    #[test]
    fn reserved_keys_cover_standard_fields() {
        assert!(is_reserved_key("Author"));
        assert!(is_reserved_key("Keywords"));
        assert!(is_reserved_key("CreationDate"));
        assert!(!is_reserved_key("Department"));
        assert!(!is_reserved_key("title"));
    }

    #[test]
    fn output_is_reproducible() {
        let metadata = Metadata::new().set(MetadataField::Title, "Same", false);
        let source = minimal_pdf(true);

        let first = apply_document_info(&source, &metadata, false).unwrap();
        let second = apply_document_info(&source, &metadata, false).unwrap();
        assert_eq!(first, second);
    }
}
