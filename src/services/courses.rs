use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::Course;

#[derive(Clone)]
pub struct CourseService {
    api: ApiClient,
}

impl CourseService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Course>, RequestFailed> {
        self.api
            .call_list(ApiRequest::get("courses.list", "/courses"), "Failed to fetch courses")
            .await
    }
}
