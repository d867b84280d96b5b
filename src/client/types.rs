//! Records exchanged with the downstream user service.

use serde::{Deserialize, Serialize};

/// A user record as stored by the downstream service.
///
/// `id` is assigned by the downstream on create and omitted from serialized
/// payloads until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub age: u32,
    pub salary: f64,
    pub department: String,
}
