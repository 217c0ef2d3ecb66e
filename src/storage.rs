//! Construction of the contract's initial storage.
//!
//! The storage record mirrors the compiled contract's storage type: a
//! TZIP-16 metadata big map, the three generic FA2 big maps, and the
//! TZIP-17 permit extension. The record is built once per deploy and
//! converted into the Micheline JSON literal the node expects.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::{
    constants::{
        CONTRACT_METADATA, DEFAULT_PERMIT_EXPIRY_SECS, MAX_PERMIT_EXPIRY_SECS,
        METADATA_CONTENTS_KEY, METADATA_POINTER,
    },
    errors::ScriptError,
};

/// The initial storage of the taco shop token contract
#[derive(Clone, Debug)]
pub struct InitialStorage {
    /// TZIP-16 contract metadata: big map key to hex-encoded bytes.
    ///
    /// Exactly two entries: the empty key pointing at `contents`, and
    /// `contents` holding the serialized metadata document.
    pub metadata: BTreeMap<String, String>,
    /// FA2 ledger entries, empty at origination
    pub ledger: Vec<Value>,
    /// FA2 token metadata entries, empty at origination
    pub token_metadata: Vec<Value>,
    /// FA2 operator entries, empty at origination
    pub operators: Vec<Value>,
    /// The TZIP-17 permit extension record
    pub extension: StorageExtension,
}

/// The permit extension over the generic FA2 storage
#[derive(Clone, Debug)]
pub struct StorageExtension {
    /// The contract admin address
    pub admin: String,
    /// The permit counter, starts at zero
    pub counter: u64,
    /// The default permit expiry, in seconds
    pub default_expiry: u64,
    /// The maximum permit expiry, in seconds
    pub max_expiry: u64,
    /// Registered permits, empty at origination
    pub permits: Vec<Value>,
    /// Per-user expiry overrides, empty at origination
    pub user_expiries: Vec<Value>,
    /// Per-permit expiry overrides, empty at origination
    pub permit_expiries: Vec<Value>,
    /// Further extension slots, empty at origination
    pub extension: Vec<Value>,
}

impl InitialStorage {
    /// Build the initial storage for the given admin address, embedding the
    /// given TZIP-16 metadata document
    pub fn new(admin: &str, metadata_document: &Value) -> Result<Self, ScriptError> {
        let serialized = serde_json::to_string(metadata_document)
            .map_err(|e| ScriptError::Serde(e.to_string()))?;

        let mut metadata = BTreeMap::new();
        metadata.insert(String::new(), hex::encode(METADATA_POINTER));
        metadata.insert(METADATA_CONTENTS_KEY.to_string(), hex::encode(serialized));

        Ok(Self {
            metadata,
            ledger: Vec::new(),
            token_metadata: Vec::new(),
            operators: Vec::new(),
            extension: StorageExtension {
                admin: admin.to_string(),
                counter: 0,
                default_expiry: DEFAULT_PERMIT_EXPIRY_SECS,
                max_expiry: MAX_PERMIT_EXPIRY_SECS,
                permits: Vec::new(),
                user_expiries: Vec::new(),
                permit_expiries: Vec::new(),
                extension: Vec::new(),
            },
        })
    }

    /// Convert the storage record into the Micheline literal matching the
    /// contract's storage type.
    ///
    /// Fields are paired right-comb in declared order; the artifact's
    /// storage type declares its fields in the same order.
    pub fn to_micheline(&self) -> Value {
        let metadata = Value::Array(
            self.metadata
                .iter()
                .map(|(key, bytes)| elt(string(key), bytes_literal(bytes)))
                .collect(),
        );

        pair(
            metadata,
            pair(
                Value::Array(self.ledger.clone()),
                pair(
                    Value::Array(self.token_metadata.clone()),
                    pair(
                        Value::Array(self.operators.clone()),
                        self.extension.to_micheline(),
                    ),
                ),
            ),
        )
    }
}

impl StorageExtension {
    /// Convert the extension record into its Micheline literal
    fn to_micheline(&self) -> Value {
        pair(
            string(&self.admin),
            pair(
                int(self.counter),
                pair(
                    int(self.default_expiry),
                    pair(
                        int(self.max_expiry),
                        pair(
                            Value::Array(self.permits.clone()),
                            pair(
                                Value::Array(self.user_expiries.clone()),
                                pair(
                                    Value::Array(self.permit_expiries.clone()),
                                    Value::Array(self.extension.clone()),
                                ),
                            ),
                        ),
                    ),
                ),
            ),
        )
    }
}

/// Parse the bundled TZIP-16 metadata document
pub fn metadata_document() -> Result<Value, ScriptError> {
    serde_json::from_str(CONTRACT_METADATA).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// A Micheline string literal
fn string(value: &str) -> Value {
    json!({ "string": value })
}

/// A Micheline int literal
fn int(value: u64) -> Value {
    json!({ "int": value.to_string() })
}

/// A Micheline bytes literal, from hex
fn bytes_literal(hex_bytes: &str) -> Value {
    json!({ "bytes": hex_bytes })
}

/// A Micheline map entry
fn elt(key: Value, value: Value) -> Value {
    json!({ "prim": "Elt", "args": [key, value] })
}

/// A Micheline binary pair
fn pair(left: Value, right: Value) -> Value {
    json!({ "prim": "Pair", "args": [left, right] })
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use serde_json::{json, Value};

    use super::{metadata_document, InitialStorage};

    /// The admin address used across the storage tests
    const ADMIN: &str = "tz1VSUr8wWNhLAzempoch5d6hLRiTh8Cjcjb";

    #[test]
    fn test_metadata_map_entries() {
        let storage = InitialStorage::new(ADMIN, &metadata_document().unwrap()).unwrap();

        assert_eq!(storage.metadata.len(), 2);

        // The empty key holds the hex-encoded TZIP-16 pointer
        let pointer = storage.metadata.get("").unwrap();
        assert_eq!(pointer, &hex::encode("tezos-storage:contents"));
        assert_eq!(pointer, "74657a6f732d73746f726167653a636f6e74656e7473");

        // The contents key holds the hex-encoded serialized document
        let contents = storage.metadata.get("contents").unwrap();
        let decoded = hex::decode(contents).unwrap();
        let document: Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(document, metadata_document().unwrap());
    }

    #[test]
    fn test_fa2_maps_start_empty() {
        let storage = InitialStorage::new(ADMIN, &json!({})).unwrap();

        assert!(storage.ledger.is_empty());
        assert!(storage.token_metadata.is_empty());
        assert!(storage.operators.is_empty());
        assert!(storage.extension.permits.is_empty());
        assert!(storage.extension.user_expiries.is_empty());
        assert!(storage.extension.permit_expiries.is_empty());
        assert!(storage.extension.extension.is_empty());
    }

    #[test]
    fn test_extension_defaults() {
        let storage = InitialStorage::new(ADMIN, &json!({})).unwrap();

        assert_eq!(storage.extension.admin, ADMIN);
        assert_eq!(storage.extension.counter, 0);
        assert_eq!(storage.extension.default_expiry, 3600);
        assert_eq!(storage.extension.max_expiry, 7200);
    }

    #[test]
    fn test_micheline_shape() {
        let storage = InitialStorage::new(ADMIN, &json!({ "name": "test" })).unwrap();
        let micheline = storage.to_micheline();

        // Metadata map: two Elt entries, empty key sorted first
        let metadata = micheline.pointer("/args/0").unwrap().as_array().unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0]["prim"], "Elt");
        assert_eq!(metadata[0]["args"][0]["string"], "");
        assert_eq!(metadata[1]["args"][0]["string"], "contents");

        // The three FA2 maps are empty sequences
        for path in ["/args/1/args/0", "/args/1/args/1/args/0", "/args/1/args/1/args/1/args/0"] {
            assert_eq!(micheline.pointer(path).unwrap(), &json!([]));
        }

        // Extension scalars, in declared order
        let extension = micheline.pointer("/args/1/args/1/args/1/args/1").unwrap();
        assert_eq!(extension.pointer("/args/0/string").unwrap(), ADMIN);
        assert_eq!(extension.pointer("/args/1/args/0/int").unwrap(), "0");
        assert_eq!(extension.pointer("/args/1/args/1/args/0/int").unwrap(), "3600");
        assert_eq!(
            extension.pointer("/args/1/args/1/args/1/args/0/int").unwrap(),
            "7200"
        );
    }
}
