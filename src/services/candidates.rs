use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::CandidateProfile;

#[derive(Clone)]
pub struct CandidateService {
    api: ApiClient,
}

impl CandidateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn profile(&self, candidate_id: Uuid) -> Result<CandidateProfile, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("candidates.profile", format!("/candidates/{}", candidate_id)),
                CandidateProfile::default(),
                "Failed to fetch candidate profile",
            )
            .await
    }

    pub async fn update_profile(
        &self,
        candidate_id: Uuid,
        profile: &CandidateProfile,
    ) -> Result<CandidateProfile, RequestFailed> {
        self.api
            .call(
                ApiRequest::put("candidates.update_profile", format!("/candidates/{}", candidate_id))
                    .json(profile),
                profile.clone(),
                "Failed to update profile",
            )
            .await
    }
}
