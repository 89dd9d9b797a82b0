use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::HiredCandidate;

#[derive(Clone)]
pub struct HiredCandidateService {
    api: ApiClient,
}

impl HiredCandidateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_for_unit(&self, unit_id: Uuid) -> Result<Vec<HiredCandidate>, RequestFailed> {
        self.api
            .call_list(
                ApiRequest::get(
                    "hired_candidates.list_for_unit",
                    format!("/units/{}/hired-candidates", unit_id),
                ),
                "Failed to fetch hired candidates",
            )
            .await
    }
}
