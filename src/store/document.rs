//! Stored documents and their store-generated identifiers

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::StoreError;

/// Field name the store reserves for its own identifier
pub const ID_FIELD: &str = "_id";

/// Opaque identifier assigned by the store at insert time.
///
/// Always lowercase hex: 24 characters for a MongoDB `ObjectId`, 32 for the
/// UUIDs generated by the local backends. Clients only ever see the string
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Identifier of a document the network store created
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid.to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower_hex = s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !lower_hex || !matches!(s.len(), 24 | 32) {
            return Err(StoreError::InvalidDocument(format!(
                "malformed document id {:?}",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for DocumentId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}

/// A record as held by the store: identifier beside the payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    pub fn new(id: DocumentId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Client-facing form: payload fields plus the identifier as a string `id`
    pub fn into_public(self) -> Map<String, Value> {
        let mut fields = self.fields;
        fields.remove(ID_FIELD);
        fields.insert("id".to_string(), Value::String(self.id.to_string()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_hex_and_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        let rendered = a.to_string();
        assert_eq!(rendered.len(), 32);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_parse_rejects_foreign_formats() {
        assert!("not-an-id".parse::<DocumentId>().is_err());
        assert!("67e55044-10b1-426f-9247-bb680e5fe0c8".parse::<DocumentId>().is_err());
        assert!("67E5504410B1426F9247BB680E5FE0C8".parse::<DocumentId>().is_err());
        let id = DocumentId::generate();
        assert_eq!(id.to_string().parse::<DocumentId>().unwrap(), id);
    }

    #[test]
    fn test_object_ids_render_as_hex() {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let id = DocumentId::from_object_id(oid);
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(id.to_string().parse::<DocumentId>().unwrap(), id);
    }

    #[test]
    fn test_into_public_exposes_string_id() {
        let id = DocumentId::generate();
        let mut fields = Map::new();
        fields.insert("name".into(), json!("Ada"));
        let public = StoredDocument::new(id.clone(), fields).into_public();
        assert_eq!(public["id"], json!(id.to_string()));
        assert_eq!(public["name"], json!("Ada"));
        assert!(!public.contains_key(ID_FIELD));
    }

    #[test]
    fn test_on_disk_form_uses_reserved_key() {
        let id = DocumentId::generate();
        let mut fields = Map::new();
        fields.insert("tier".into(), json!(2));
        let line = serde_json::to_value(StoredDocument::new(id.clone(), fields)).unwrap();
        assert_eq!(line[ID_FIELD], json!(id.to_string()));
        assert_eq!(line["tier"], json!(2));

        let back: StoredDocument = serde_json::from_value(line).unwrap();
        assert_eq!(back.id, id);
        assert!(!back.fields.contains_key(ID_FIELD));
    }
}
