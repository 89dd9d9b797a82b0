use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::application::{OfferDecisionChange, StatusChange};
use crate::models::{Application, ApplicationStatus, NewApplication, OfferDecision};

#[derive(Clone)]
pub struct ApplicationService {
    api: ApiClient,
}

impl ApplicationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Applicants of one internship
    pub async fn list_for_internship(
        &self,
        internship_id: Uuid,
    ) -> Result<Vec<Application>, RequestFailed> {
        let request = ApiRequest::get("applications.list_for_internship", "/applications")
            .query("internship_id", internship_id);

        self.api.call_list(request, "Failed to fetch applicants").await
    }

    /// Applications of the signed-in candidate
    pub async fn list_mine(&self) -> Result<Vec<Application>, RequestFailed> {
        self.api
            .call_list(
                ApiRequest::get("applications.list_mine", "/applications/me"),
                "Failed to fetch your applications",
            )
            .await
    }

    pub async fn apply(&self, application: &NewApplication) -> Result<Application, RequestFailed> {
        self.api
            .call(
                ApiRequest::post("applications.apply", "/applications").json(application),
                Application::default(),
                "Failed to submit application",
            )
            .await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, RequestFailed> {
        self.api
            .call(
                ApiRequest::patch("applications.update_status", format!("/applications/{}/status", id))
                    .json(&StatusChange { status }),
                Application::default(),
                "Failed to update application status",
            )
            .await
    }

    pub async fn update_offer_decision(
        &self,
        id: Uuid,
        decision: OfferDecision,
    ) -> Result<Application, RequestFailed> {
        self.api
            .call(
                ApiRequest::patch("applications.offer_decision", format!("/applications/{}/offer", id))
                    .json(&OfferDecisionChange { decision }),
                Application::default(),
                "Failed to update offer decision",
            )
            .await
    }

    pub async fn withdraw(&self, id: Uuid) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::delete("applications.withdraw", format!("/applications/{}", id)),
                "Failed to withdraw application",
            )
            .await
    }
}
