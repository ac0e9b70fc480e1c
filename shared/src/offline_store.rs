//! On-device snapshot of the contact list.
//!
//! The shell stores the bytes as-is. Every snapshot is a CBOR envelope with
//! magic, schema version and a blake3 checksum of the payload, so a truncated
//! or foreign file is reported as corrupted instead of decoding to garbage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CacheError;
use crate::model::Contact;

const CURRENT_SCHEMA_VERSION: u32 = 1;
const MAX_CACHE_BYTES: usize = 10 * 1024 * 1024;
const MAX_CACHED_CONTACTS: usize = 10_000;
const CACHE_MAGIC: &[u8; 4] = b"CTCH";

#[derive(Serialize, Deserialize, Debug)]
struct CacheEnvelope {
    magic: [u8; 4],
    schema_version: u32,
    checksum: [u8; 32],
    payload: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug)]
struct CachePayload {
    saved_at: DateTime<Utc>,
    contacts: Vec<Contact>,
}

/// Serializes a contact snapshot into the on-disk envelope.
pub fn encode_snapshot(
    contacts: &[Contact],
    saved_at: DateTime<Utc>,
) -> Result<Vec<u8>, CacheError> {
    if contacts.len() > MAX_CACHED_CONTACTS {
        return Err(CacheError::Storage(format!(
            "too many contacts: {}, max {MAX_CACHED_CONTACTS}",
            contacts.len()
        )));
    }

    let payload = CachePayload {
        saved_at,
        contacts: contacts.to_vec(),
    };

    let mut payload_bytes = Vec::new();
    ciborium::into_writer(&payload, &mut payload_bytes)?;

    let envelope = CacheEnvelope {
        magic: *CACHE_MAGIC,
        schema_version: CURRENT_SCHEMA_VERSION,
        checksum: *blake3::hash(&payload_bytes).as_bytes(),
        payload: payload_bytes,
    };

    let mut bytes = Vec::new();
    ciborium::into_writer(&envelope, &mut bytes)?;

    if bytes.len() > MAX_CACHE_BYTES {
        return Err(CacheError::Storage(format!(
            "snapshot too large: {} bytes, max {MAX_CACHE_BYTES}",
            bytes.len()
        )));
    }

    Ok(bytes)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Contact>, CacheError> {
    if bytes.is_empty() {
        return Err(CacheError::Corrupted {
            reason: "empty file".into(),
        });
    }
    if bytes.len() > MAX_CACHE_BYTES {
        return Err(CacheError::Corrupted {
            reason: format!("file too large: {} bytes", bytes.len()),
        });
    }

    let envelope: CacheEnvelope = ciborium::from_reader(bytes)?;

    if &envelope.magic != CACHE_MAGIC {
        return Err(CacheError::Corrupted {
            reason: "invalid magic bytes".into(),
        });
    }

    if envelope.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(CacheError::FutureSchema {
            found: envelope.schema_version,
            max: CURRENT_SCHEMA_VERSION,
        });
    }

    let actual = blake3::hash(&envelope.payload);
    if actual.as_bytes() != &envelope.checksum {
        return Err(CacheError::Corrupted {
            reason: "checksum mismatch".into(),
        });
    }

    let payload: CachePayload = ciborium::from_reader(envelope.payload.as_slice())?;
    debug!(
        count = payload.contacts.len(),
        saved_at = %payload.saved_at,
        "decoded contact snapshot"
    );
    Ok(payload.contacts)
}
