use super::text::page_text;
use super::{FormField, PdfDocument, PdfPage};
use lopdf::{Dictionary, Document, Object};
use shared_types::ExtractionError;
use std::path::Path;
use tracing::{debug, warn};

/// Guards against reference cycles in malformed field trees
const MAX_FIELD_DEPTH: usize = 32;

pub fn load_pdf(path: &Path) -> Result<PdfDocument, ExtractionError> {
    let document = Document::load(path).map_err(|e| {
        ExtractionError::Io(format!("Failed to read PDF {}: {}", path.display(), e))
    })?;

    let form_fields = collect_form_fields(&document);

    let mut pages = Vec::new();
    for (number, page_id) in document.get_pages() {
        let text = page_text(&document, page_id)?;
        pages.push(PdfPage { number, text });
    }

    debug!(
        pages = pages.len(),
        form_fields = form_fields.len(),
        "Loaded PDF"
    );

    Ok(PdfDocument { form_fields, pages })
}

/// Flatten the AcroForm field tree, qualifying names with their ancestors
pub fn collect_form_fields(document: &Document) -> Vec<FormField> {
    let Some(fields) = acroform_fields(document) else {
        return Vec::new();
    };

    let mut collected = Vec::new();
    for field in fields {
        collect_field(document, field, "", None, 0, &mut collected);
    }
    collected
}

fn acroform_fields(document: &Document) -> Option<&Vec<Object>> {
    let root = resolve(document, document.trailer.get(b"Root").ok()?)?.as_dict().ok()?;
    let acroform = resolve(document, root.get(b"AcroForm").ok()?)?.as_dict().ok()?;
    resolve(document, acroform.get(b"Fields").ok()?)?.as_array().ok()
}

fn collect_field(
    document: &Document,
    object: &Object,
    prefix: &str,
    inherited_kind: Option<&str>,
    depth: usize,
    collected: &mut Vec<FormField>,
) {
    if depth > MAX_FIELD_DEPTH {
        warn!(prefix, "Form field tree too deep, skipping");
        return;
    }
    let Some(dict) = resolve(document, object).and_then(|o| o.as_dict().ok()) else {
        return;
    };

    let name = match dict.get(b"T").ok().and_then(|t| object_text(document, t)) {
        Some(partial) if prefix.is_empty() => partial,
        Some(partial) => format!("{}.{}", prefix, partial),
        None => prefix.to_string(),
    };
    let kind = dict
        .get(b"FT")
        .ok()
        .and_then(|ft| resolve(document, ft))
        .and_then(|ft| ft.as_name().ok())
        .map(|ft| String::from_utf8_lossy(ft).into_owned())
        .or_else(|| inherited_kind.map(str::to_string));

    let kids: Vec<&Object> = kid_fields(document, dict);
    if !kids.is_empty() {
        for kid in kids {
            collect_field(document, kid, &name, kind.as_deref(), depth + 1, collected);
        }
        return;
    }

    if name.is_empty() {
        warn!("Skipping unnamed form field");
        return;
    }

    collected.push(FormField {
        name,
        value: dict.get(b"V").ok().and_then(|v| object_text(document, v)),
        kind,
    });
}

/// Children that are fields in their own right; widget-only kids don't count
fn kid_fields<'a>(document: &'a Document, dict: &'a Dictionary) -> Vec<&'a Object> {
    let Some(kids) = dict
        .get(b"Kids")
        .ok()
        .and_then(|k| resolve(document, k))
        .and_then(|k| k.as_array().ok())
    else {
        return Vec::new();
    };

    kids.iter()
        .filter(|kid| {
            resolve(document, kid)
                .and_then(|k| k.as_dict().ok())
                .map(|k| k.has(b"T"))
                .unwrap_or(false)
        })
        .collect()
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

fn object_text(document: &Document, object: &Object) -> Option<String> {
    match resolve(document, object)? {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// PDF text strings are UTF-16BE with a BOM, otherwise a single-byte encoding
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
