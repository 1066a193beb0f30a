//! Wire and row types for the `contacts` table.

use serde::{Deserialize, Deserializer, Serialize};

/// A stored contact. `id` is assigned by the database and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub relation: Option<String>,
    pub notes: Option<String>,
    pub address: Option<String>,
}

/// Creation payload. `name` and `email` are required but modelled as
/// options so their absence surfaces as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NewContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Sparse patch over the mutable columns.
///
/// Each field is a double option so the three JSON states stay distinct:
/// an absent key leaves the column untouched, an explicit `null` clears it,
/// and a string replaces it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub relation: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
}

/// Marks a field present even when its JSON value is `null`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The present fields as `(column, new value)` pairs, in column order.
    /// A `None` value means the column is to be set NULL.
    pub fn entries(&self) -> Vec<(&'static str, Option<&str>)> {
        let mut entries = Vec::new();
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("relation", &self.relation),
            ("notes", &self.notes),
            ("address", &self.address),
        ];
        for (column, value) in fields {
            if let Some(value) = value {
                entries.push((column, value.as_deref()));
            }
        }
        entries
    }
}

/// Confirmation body for update and delete responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_null_and_value() {
        let patch: ContactPatch =
            serde_json::from_str(r#"{"name": "Bob", "phone": null}"#).unwrap();

        assert_eq!(patch.name, Some(Some("Bob".to_string())));
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.email, None);
    }

    #[test]
    fn empty_body_is_an_empty_patch() {
        let patch: ContactPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: ContactPatch = serde_json::from_str(r#"{"notes": "met at work"}"#).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn entries_follow_column_order() {
        let patch: ContactPatch =
            serde_json::from_str(r#"{"address": "12 Elm St", "name": "Ann"}"#).unwrap();

        assert_eq!(
            patch.entries(),
            vec![("name", Some("Ann")), ("address", Some("12 Elm St"))]
        );
    }

    #[test]
    fn patch_serializes_null_for_cleared_fields() {
        let patch = ContactPatch {
            phone: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"phone":null}"#);
    }

    #[test]
    fn new_contact_omits_absent_fields() {
        let req = NewContact {
            name: Some("Ann".to_string()),
            email: Some("ann@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"name":"Ann","email":"ann@example.com"}"#
        );
    }
}
