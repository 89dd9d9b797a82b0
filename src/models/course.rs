use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub faculty: Option<String>,
}
