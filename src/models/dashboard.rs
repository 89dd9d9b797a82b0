use serde::{Deserialize, Serialize};

/// Counters shown on the candidate dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateDashboard {
    pub total_applications: u32,
    pub pending: u32,
    pub interviews: u32,
    pub offers: u32,
    pub open_tasks: u32,
    pub completed_tasks: u32,
}

/// Counters shown on the unit dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitDashboard {
    pub open_internships: u32,
    pub total_applicants: u32,
    pub pending_reviews: u32,
    pub hired: u32,
}
