//! Swagger-to-target type-name resolution.
//!
//! Maps one property/parameter descriptor to a canonical type-name string
//! in the target language, appending a `?` nullability marker to scalar
//! value types that are not required. Reference types (strings, lists,
//! objects) never carry the marker.
//!
//! Several branches are workarounds for defects in the swagger export;
//! each carries a comment naming the defect it compensates for.

use crate::error::{Error, Result};
use crate::swagger::SwaggerProperty;

/// Schema-name prefix of the generic pagination wrapper
pub const PAGINATION_WRAPPER_PREFIX: &str = "FetchResult";

/// Comment texts the exporter attaches to upload streams it mistypes as
/// base64 strings; these resolve to a byte array instead of a single byte.
const BYTE_ARRAY_COMMENTS: [&str; 2] = [
    "Content of the batch file.",
    "This stream contains the bytes of the file being uploaded.",
];

/// Comment text of the one schema entry the exporter emits with no type
/// information at all; it is a string-to-string map on the wire.
const TAX_CODE_TYPES_COMMENT: &str = "The list of Avalara-defined tax code types.";

/// Resolve the canonical type name for one descriptor.
///
/// An absent descriptor (e.g. a response with no schema) resolves to the
/// file-result marker type.
pub fn resolve_type_name(prop: Option<&SwaggerProperty>) -> Result<String> {
    // A missing schema or an explicit `file` type marks a file download
    let Some(prop) = prop else {
        return Ok("FileResult".to_string());
    };
    if prop.prop_type.as_deref() == Some("file") {
        return Ok("FileResult".to_string());
    }

    let mut is_value_type = false;
    let type_name = match prop.prop_type.as_deref() {
        Some("integer") => {
            is_value_type = true;
            match prop.format.as_deref() {
                Some(f) if f.eq_ignore_ascii_case("int64") => "Int64".to_string(),
                Some(f) if f.eq_ignore_ascii_case("byte") => "Byte".to_string(),
                Some(f) if f.eq_ignore_ascii_case("int16") => "Int16".to_string(),
                None => "Int32".to_string(),
                Some(f) if f.eq_ignore_ascii_case("int32") => "Int32".to_string(),
                Some(other) => {
                    return Err(Error::UnimplementedType(format!("integer/{other}")));
                }
            }
        }
        Some("number") => {
            is_value_type = true;
            "Decimal".to_string()
        }
        Some("boolean") => {
            is_value_type = true;
            "Boolean".to_string()
        }
        Some("string") if matches!(prop.format.as_deref(), Some("date-time") | Some("date")) => {
            is_value_type = true;
            "DateTime".to_string()
        }
        Some("string") if prop.format.as_deref() == Some("byte") => {
            // The exporter types upload streams as base64 strings; only the
            // two known stream descriptors are actually byte arrays.
            let comment = prop.description.as_deref().unwrap_or("");
            if BYTE_ARRAY_COMMENTS.contains(&comment) {
                "Byte[]".to_string()
            } else {
                is_value_type = true;
                "Byte".to_string()
            }
        }
        Some("string") => match prop.enum_data_type.as_deref() {
            None => "String".to_string(),
            Some(enum_name) => {
                // Enums are represented as strings on the wire but are
                // value types in the generated clients
                is_value_type = true;
                enum_name.to_string()
            }
        },
        Some("array") => {
            let element = resolve_type_name(prop.items.as_deref())?;
            // The element type is never nullable inside the collection
            format!("List<{}>", element.replace('?', ""))
        }
        _ => {
            if let Some(schema_ref) = prop.schema_ref.as_deref() {
                resolve_schema_ref(schema_ref)
            } else if let Some(schema) = prop.schema.as_deref() {
                return resolve_type_name(Some(schema));
            } else if prop.description.as_deref() == Some(TAX_CODE_TYPES_COMMENT) {
                // The exporter emits this one entry with no type at all;
                // on the wire it is a string-to-string map
                "Dictionary<string, string>".to_string()
            } else if prop.prop_type.as_deref() == Some("object") {
                "Object".to_string()
            } else {
                return Err(Error::UnimplementedType(
                    prop.prop_type.clone().unwrap_or_else(|| "<none>".to_string()),
                ));
            }
        }
    };

    // Scalar value types that are not required become nullable
    if is_value_type && !prop.required {
        return Ok(format!("{type_name}?"));
    }
    Ok(type_name)
}

/// Take the trailing path segment of a `$ref`, converting the pagination
/// wrapper's bracket-style generic syntax to angle brackets.
fn resolve_schema_ref(schema_ref: &str) -> String {
    let schema = schema_ref
        .rsplit('/')
        .next()
        .unwrap_or(schema_ref)
        .to_string();
    if schema.starts_with(PAGINATION_WRAPPER_PREFIX) {
        schema.replace('[', "<").replace(']', ">")
    } else {
        schema
    }
}
