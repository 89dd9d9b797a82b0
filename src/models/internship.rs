use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternshipStatus {
    #[default]
    Draft,
    Open,
    Closed,
    Archived,
}

impl InternshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }
}

/// An internship offer published by a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Internship {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub unit_name: Option<String>,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub slots: u32,
    pub status: InternshipStatus,
    pub course_ids: Vec<Uuid>,
    pub application_deadline: Option<NaiveDate>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Internship {
    /// Whether candidates can still apply on `today`
    pub fn accepts_applications(&self, today: NaiveDate) -> bool {
        self.status == InternshipStatus::Open
            && self.application_deadline.map_or(true, |deadline| today <= deadline)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInternship {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    pub slots: u32,
    #[serde(default)]
    pub course_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
}

/// Partial update; only the fields that are set are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InternshipStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
}

/// Filters for the internship listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InternshipFilter {
    pub status: Option<InternshipStatus>,
    pub unit_id: Option<Uuid>,
    pub search: Option<String>,
}

impl InternshipFilter {
    pub fn open() -> Self {
        Self {
            status: Some(InternshipStatus::Open),
            ..Self::default()
        }
    }

    /// Search text, trimmed; blank text means no search
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_payload_decodes_with_defaults() {
        let internship: Internship = serde_json::from_value(json!({
            "title": "Backend intern",
            "status": "open",
            "slots": 2
        }))
        .unwrap();

        assert_eq!(internship.title, "Backend intern");
        assert_eq!(internship.status, InternshipStatus::Open);
        assert!(internship.requirements.is_empty());
        assert!(internship.id.is_nil());
    }

    #[test]
    fn test_accepts_applications() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut internship = Internship {
            status: InternshipStatus::Open,
            application_deadline: NaiveDate::from_ymd_opt(2026, 3, 10),
            ..Internship::default()
        };
        assert!(internship.accepts_applications(today));

        internship.application_deadline = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert!(!internship.accepts_applications(today));

        internship.application_deadline = None;
        internship.status = InternshipStatus::Closed;
        assert!(!internship.accepts_applications(today));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = InternshipUpdate {
            slots: Some(4),
            ..InternshipUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"slots": 4}));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = InternshipFilter {
            search: Some("   ".to_string()),
            ..InternshipFilter::default()
        };
        assert_eq!(filter.search_text(), None);
    }
}
