use chrono::Utc;
use pame_core::errors::{ErrorInfo, StoreError};
use pame_core::provenance::{SchemaVersion, StoreProvenance};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Schema written into every saved store.
pub const STORE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0, 0);

fn serde_error(code: &str, err: impl ToString) -> StoreError {
    StoreError::Format(ErrorInfo::new(code, err.to_string()))
}

fn decode_error(code: &str, err: impl ToString) -> StoreError {
    StoreError::Deserialization(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value into JSON bytes with object keys in sorted order.
///
/// Going through [`Value`] sorts keys because `serde_json::Map` is a
/// `BTreeMap` here. Floats are written in shortest round-trip form and the
/// workspace enables `float_roundtrip`, so reading the bytes back yields
/// bit-identical `f64` cells.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    let value: Value =
        serde_json::to_value(value).map_err(|err| serde_error("json-serialize", err))?;
    serde_json::to_vec(&value).map_err(|err| serde_error("json-write", err))
}

/// Deserializes a JSON document, reporting shape problems as format errors.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-deserialize", err))
}

/// Binary container for a saved store: versioned header plus canonical JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEnvelope {
    pub schema_version: SchemaVersion,
    pub provenance: StoreProvenance,
    pub payload: String,
}

impl StoreEnvelope {
    /// Wraps a serializable snapshot with the current schema and provenance.
    pub fn wrap<T: Serialize>(snapshot: &T) -> Result<Self, StoreError> {
        let bytes = to_canonical_json_bytes(snapshot)?;
        let payload = String::from_utf8(bytes).map_err(|err| serde_error("json-utf8", err))?;
        let provenance = StoreProvenance {
            created_at: Utc::now().to_rfc3339(),
            tool_versions: [(
                env!("CARGO_PKG_NAME").to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            )]
            .into_iter()
            .collect(),
        };
        Ok(Self {
            schema_version: STORE_SCHEMA_VERSION,
            provenance,
            payload,
        })
    }

    /// Encodes the envelope with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(|err| serde_error("bincode-serialize", err))
    }

    /// Decodes an envelope, rejecting payloads from an incompatible schema.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let envelope: StoreEnvelope =
            bincode::deserialize(bytes).map_err(|err| decode_error("bincode-deserialize", err))?;
        if !envelope.schema_version.is_compatible_with(&STORE_SCHEMA_VERSION) {
            return Err(StoreError::Deserialization(
                ErrorInfo::new("schema-version", "saved store uses an incompatible schema")
                    .with_context("found", envelope.schema_version.to_string())
                    .with_context("expected", STORE_SCHEMA_VERSION.to_string()),
            ));
        }
        Ok(envelope)
    }

    /// Decodes the JSON body into a snapshot.
    pub fn unwrap_payload<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_str(&self.payload).map_err(|err| decode_error("payload-deserialize", err))
    }
}
