//! Self-describing encoding of a resolved inheritance chain.
//!
//! A blob can be pasted verbatim into another document's `inherit` field.
//! The loader tries to decode every `inherit` value as a blob before treating
//! it as a path, so an embedded parent never touches the filesystem.
//!
//! Layout: `conjure-chain:` followed by standard base64 of a JSON envelope:
//!
//! ```text
//! {"format":"conjure-chain","version":1,"documents":[<root>, <parent>, ...]}
//! ```

use super::InheritanceChain;
use crate::document::ConfigurationDocument;
use crate::error::{ConjureError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Prefix marking an `inherit` value as an encoded chain.
pub const BLOB_PREFIX: &str = "conjure-chain:";

const ENVELOPE_FORMAT: &str = "conjure-chain";
const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    documents: Vec<ConfigurationDocument>,
}

/// Encode every document of `chain`, root first.
///
/// The documents are stored already linked, so their own `inherit` values
/// are dropped.
pub fn encode_chain(chain: &InheritanceChain) -> Result<String> {
    let documents = chain
        .iter()
        .map(|node| ConfigurationDocument {
            inherit: None,
            ..node.document.clone()
        })
        .collect();

    let envelope = Envelope {
        format: ENVELOPE_FORMAT.to_string(),
        version: ENVELOPE_VERSION,
        documents,
    };

    let json = serde_json::to_vec(&envelope)
        .map_err(|e| ConjureError::UserError(format!("failed to encode chain: {}", e)))?;

    Ok(format!("{}{}", BLOB_PREFIX, STANDARD.encode(json)))
}

/// Try to decode `reference` as an encoded chain.
///
/// # Returns
///
/// * `Ok(Some(documents))` - A blob; documents are ordered nearest first
/// * `Ok(None)` - Not a blob; the caller should treat it as a path
/// * `Err(ConjureError::Validation)` - A blob whose documents fail validation
pub fn decode_blob(reference: &str) -> Result<Option<Vec<ConfigurationDocument>>> {
    let payload = reference.trim();
    let payload = payload.strip_prefix(BLOB_PREFIX).unwrap_or(payload);

    let Ok(bytes) = STANDARD.decode(payload) else {
        return Ok(None);
    };
    let Ok(envelope) = serde_json::from_slice::<Envelope>(&bytes) else {
        return Ok(None);
    };
    if envelope.format != ENVELOPE_FORMAT || envelope.version != ENVELOPE_VERSION {
        return Ok(None);
    }

    for document in &envelope.documents {
        document.validate()?;
    }

    Ok(Some(envelope.documents))
}
