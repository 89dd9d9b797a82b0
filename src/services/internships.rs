use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::{Internship, InternshipFilter, InternshipUpdate, NewInternship};

#[derive(Clone)]
pub struct InternshipService {
    api: ApiClient,
}

impl InternshipService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &InternshipFilter) -> Result<Vec<Internship>, RequestFailed> {
        let request = ApiRequest::get("internships.list", "/internships")
            .query_opt("status", filter.status.map(|s| s.as_str()))
            .query_opt("unit_id", filter.unit_id)
            .query_opt("search", filter.search_text());

        self.api.call_list(request, "Failed to fetch internships").await
    }

    pub async fn get(&self, id: Uuid) -> Result<Internship, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("internships.get", format!("/internships/{}", id)),
                Internship::default(),
                "Failed to fetch internship",
            )
            .await
    }

    pub async fn list_for_unit(&self, unit_id: Uuid) -> Result<Vec<Internship>, RequestFailed> {
        self.api
            .call_list(
                ApiRequest::get("internships.list_for_unit", format!("/units/{}/internships", unit_id)),
                "Failed to fetch unit internships",
            )
            .await
    }

    pub async fn create(&self, internship: &NewInternship) -> Result<Internship, RequestFailed> {
        self.api
            .call(
                ApiRequest::post("internships.create", "/internships").json(internship),
                Internship::default(),
                "Failed to create internship",
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: &InternshipUpdate,
    ) -> Result<Internship, RequestFailed> {
        self.api
            .call(
                ApiRequest::put("internships.update", format!("/internships/{}", id)).json(update),
                Internship::default(),
                "Failed to update internship",
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::delete("internships.delete", format!("/internships/{}", id)),
                "Failed to delete internship",
            )
            .await
    }
}
