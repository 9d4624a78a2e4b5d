//! Exporters: JSON and XML rendering of a result set

use sxd_document::writer::format_document;
use sxd_document::Package;

use super::error::{ReportError, ReportResult};
use super::model::{QueryOutcome, ResultSet};

/// Render the result set as pretty-printed JSON
///
/// # Errors
/// Returns error when serialization fails
pub fn to_json(results: &ResultSet) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Render the result set as an XML document
///
/// The document root is `<results>`, with one child element per query.
/// Each result row becomes a `<record>` whose children are named after
/// the row's columns, sanitized into valid XML tag names. A failed query
/// is rendered as a single `<error>` child holding the diagnostic.
///
/// # Errors
/// Returns error when the document cannot be written out
pub fn to_xml(results: &ResultSet) -> ReportResult<String> {
    let package = Package::new();
    let doc = package.as_document();

    let root = doc.create_element("results");
    doc.root().append_child(root);

    for (name, outcome) in results.iter() {
        let query_el = doc.create_element(sanitize_tag_name(name).as_str());
        root.append_child(query_el);

        match outcome {
            QueryOutcome::Rows(rows) => {
                for row in rows {
                    let record = doc.create_element("record");
                    query_el.append_child(record);
                    for (column, value) in row {
                        let field = doc.create_element(sanitize_tag_name(column).as_str());
                        record.append_child(field);
                        field.append_child(doc.create_text(&scalar_text(value)));
                    }
                }
            }
            QueryOutcome::Failed { diagnostic } => {
                let error_el = doc.create_element("error");
                query_el.append_child(error_el);
                error_el.append_child(doc.create_text(diagnostic));
            }
        }
    }

    let mut buf = Vec::new();
    format_document(&doc, &mut buf).map_err(|err| ReportError::Xml(err.to_string()))?;
    String::from_utf8(buf).map_err(|err| ReportError::Xml(err.to_string()))
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce an arbitrary string into a valid XML element name
///
/// Invalid characters become underscores, and a name that does not
/// start with a letter or underscore gets a leading underscore. An
/// empty input yields `"_"`.
#[must_use]
pub fn sanitize_tag_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }

    let mut out = String::with_capacity(name.len());
    for (idx, ch) in name.chars().enumerate() {
        let valid = if idx == 0 {
            ch.is_alphabetic() || ch == '_'
        } else {
            ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.')
        };
        if valid {
            out.push(ch);
        } else if idx == 0 && (ch.is_alphanumeric() || matches!(ch, '-' | '.')) {
            out.push('_');
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out
}
