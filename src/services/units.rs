use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::{Unit, UnitUpdate};

#[derive(Clone)]
pub struct UnitService {
    api: ApiClient,
}

impl UnitService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Unit>, RequestFailed> {
        self.api
            .call_list(ApiRequest::get("units.list", "/units"), "Failed to fetch units")
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Unit, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("units.get", format!("/units/{}", id)),
                Unit::default(),
                "Failed to fetch unit",
            )
            .await
    }

    pub async fn update(&self, id: Uuid, update: &UnitUpdate) -> Result<Unit, RequestFailed> {
        self.api
            .call(
                ApiRequest::put("units.update", format!("/units/{}", id)).json(update),
                Unit::default(),
                "Failed to update unit",
            )
            .await
    }
}
