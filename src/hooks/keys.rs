//! Query key names shared by queries and the mutations that invalidate them

use uuid::Uuid;

use crate::cache::QueryKey;
use crate::models::InternshipFilter;

pub const INTERNSHIPS: &str = "internships";
pub const INTERNSHIP: &str = "internship";
pub const UNIT_INTERNSHIPS: &str = "unitInternships";
pub const APPLICANTS: &str = "applicants";
pub const MY_APPLICATIONS: &str = "myApplications";
pub const CANDIDATE_TASKS: &str = "candidateTasks";
pub const NOTIFICATIONS: &str = "notifications";
pub const COURSES: &str = "courses";
pub const UNITS: &str = "units";
pub const UNIT: &str = "unit";
pub const SETTINGS: &str = "settings";
pub const HIRED_CANDIDATES: &str = "hiredCandidates";
pub const CANDIDATE_PROFILE: &str = "candidateProfile";
pub const CANDIDATE_DASHBOARD: &str = "candidateDashboard";
pub const UNIT_DASHBOARD: &str = "unitDashboard";

pub fn internships(filter: &InternshipFilter) -> QueryKey {
    QueryKey::new(INTERNSHIPS)
        .with(filter.status.map(|s| s.as_str()).unwrap_or("all"))
        .with(filter.unit_id.map(|id| id.to_string()).unwrap_or_default())
        .with(filter.search_text().unwrap_or_default())
}

pub fn scoped(name: &str, id: Uuid) -> QueryKey {
    QueryKey::new(name).with(id)
}

pub fn all(name: &str) -> QueryKey {
    QueryKey::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InternshipStatus;

    #[test]
    fn test_internship_keys_differ_by_filter() {
        let open = internships(&InternshipFilter::open());
        let all_statuses = internships(&InternshipFilter::default());

        assert_ne!(open, all_statuses);
        assert!(open.starts_with(&all(INTERNSHIPS)));
        assert_eq!(
            open,
            internships(&InternshipFilter {
                status: Some(InternshipStatus::Open),
                search: Some("  ".to_string()),
                ..InternshipFilter::default()
            })
        );
    }
}
