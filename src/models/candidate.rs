use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course_id: Option<Uuid>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub cv_url: Option<String>,
}
