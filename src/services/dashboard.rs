use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::{CandidateDashboard, UnitDashboard};

#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn candidate(&self, candidate_id: Uuid) -> Result<CandidateDashboard, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("dashboard.candidate", format!("/dashboard/candidate/{}", candidate_id)),
                CandidateDashboard::default(),
                "Failed to fetch dashboard",
            )
            .await
    }

    pub async fn unit(&self, unit_id: Uuid) -> Result<UnitDashboard, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("dashboard.unit", format!("/dashboard/unit/{}", unit_id)),
                UnitDashboard::default(),
                "Failed to fetch dashboard",
            )
            .await
    }
}
