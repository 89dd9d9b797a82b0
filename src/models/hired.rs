use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiredCandidate {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub internship_id: Uuid,
    pub internship_title: Option<String>,
    pub hired_at: Option<DateTime<Utc>>,
}
