//! Normalization primitives for the XML-derived document shape.
//!
//! The report arrives as the JSON conversion of an XML document: elements
//! that can repeat collapse to a single object when they occur once, element
//! attributes arrive as `_`-prefixed keys, and mixed text content arrives
//! under `__text`. Every ingestion point in the crate goes through the
//! helpers here instead of sniffing shapes itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field that may occur once or many times in the source XML.
///
/// `None` at the field level (`Option<OneOrMany<T>>`) means the element was
/// absent entirely; [`elements`] coerces all three cases to a slice.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Many(items) => items.as_slice(),
            Self::One(item) => std::slice::from_ref(item),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Coerce an optional one-or-many field to a slice (empty when absent).
pub fn elements<T>(field: Option<&OneOrMany<T>>) -> &[T] {
    field.map(OneOrMany::as_slice).unwrap_or(&[])
}

/// Parse an ISO 8601 timestamp leaf, tolerating absence and garbage.
pub(crate) fn parse_timestamp(text: Option<&str>) -> Option<DateTime<Utc>> {
    let text = text?.trim();
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Lenient deserializers for scalar leaves.
///
/// Numeric leaves may arrive as JSON numbers or as strings, and text leaves
/// may arrive wrapped in a `{"__text": ...}` element when the source XML
/// carried attributes alongside the text. Values that cannot be interpreted
/// degrade to `None` rather than failing the whole document.
pub mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScalar {
        Bool(bool),
        Number(serde_json::Number),
        Text(String),
        Element {
            #[serde(rename = "__text", default)]
            text: Option<Box<RawScalar>>,
        },
    }

    impl RawScalar {
        fn into_string(self) -> Option<String> {
            match self {
                Self::Bool(b) => Some(b.to_string()),
                Self::Number(n) => Some(n.to_string()),
                Self::Text(s) => Some(s),
                Self::Element { text } => text.and_then(|t| t.into_string()),
            }
        }

        fn into_f64(self) -> Option<f64> {
            match self {
                Self::Bool(_) => None,
                Self::Number(n) => n.as_f64(),
                Self::Text(s) => s.trim().parse().ok(),
                Self::Element { text } => text.and_then(|t| t.into_f64()),
            }
        }

        fn into_u64(self) -> Option<u64> {
            match self {
                Self::Bool(_) => None,
                Self::Number(n) => n.as_u64(),
                Self::Text(s) => s.trim().parse().ok(),
                Self::Element { text } => text.and_then(|t| t.into_u64()),
            }
        }

        fn into_bool(self) -> Option<bool> {
            match self {
                Self::Bool(b) => Some(b),
                Self::Number(n) => n.as_u64().map(|v| v != 0),
                Self::Text(s) => match s.trim() {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                },
                Self::Element { text } => text.and_then(|t| t.into_bool()),
            }
        }
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<RawScalar>::deserialize(d)?;
        Ok(raw.and_then(RawScalar::into_string))
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = Option::<RawScalar>::deserialize(d)?;
        Ok(raw.and_then(RawScalar::into_f64))
    }

    pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let raw = Option::<RawScalar>::deserialize(d)?;
        Ok(raw.and_then(RawScalar::into_u64))
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let raw = Option::<RawScalar>::deserialize(d)?;
        Ok(raw.and_then(RawScalar::into_bool))
    }
}
