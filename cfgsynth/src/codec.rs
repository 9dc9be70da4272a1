//! Decoding of struct-slice configuration values.
//!
//! A struct slice reaches an adapter in one of two shapes: a document-native
//! sequence of mappings, or a single serialised blob in an environment
//! variable. [`ElementCodec`] is implemented by the element type and decides
//! how both shapes are decoded.
//!
//! The provided methods use JSON for the environment blob, for example
//! `SERVER_REALMS='[{"id":"eu","clientPort":8085}]'`, and route document
//! sequences through [`Value::to_json`] so the type's `serde` derive applies
//! field by field. Types with a different wire format override either method.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::value::Value;

/// Decoder for the element type of a struct-slice configuration method.
///
/// ```rust
/// use cfgsynth::{Document, ElementCodec};
///
/// #[derive(serde::Deserialize, Debug, PartialEq)]
/// struct Realm {
///     id: String,
/// }
///
/// impl ElementCodec for Realm {}
///
/// # fn main() -> Result<(), cfgsynth::CfgsynthError> {
/// let document = Document::parse(b"server:\n  realms:\n    - id: eu\n")?;
/// let realms: Option<Vec<Realm>> = document.get_slice(&["server"], &["realms"]);
/// assert_eq!(realms, Some(vec![Realm { id: "eu".to_owned() }]));
/// # Ok(())
/// # }
/// ```
pub trait ElementCodec: DeserializeOwned {
    /// Decodes an environment variable value.
    ///
    /// Returns `None` when the blob is malformed; the lookup then moves on to
    /// the next candidate key.
    #[must_use]
    fn decode_env(raw: &str) -> Option<Vec<Self>> {
        serde_json::from_str(raw)
            .inspect_err(|err| debug!(error = %err, "environment value is not a JSON array"))
            .ok()
    }

    /// Decodes a document node.
    ///
    /// Only a sequence whose items are all mappings is accepted. Any
    /// malformed item rejects the whole node; partial results are never
    /// returned. A null field is treated as absent, so defaulted fields
    /// still decode.
    #[must_use]
    fn decode_document(value: &Value) -> Option<Vec<Self>> {
        let items = value.as_sequence()?;
        if !items.iter().all(|item| item.as_mapping().is_some()) {
            debug!("document sequence contains non-mapping items");
            return None;
        }
        items
            .iter()
            .map(|item| serde_json::from_value(item.to_json()))
            .collect::<Result<Vec<Self>, _>>()
            .inspect_err(|err| debug!(error = %err, "document sequence item failed to decode"))
            .ok()
    }
}
