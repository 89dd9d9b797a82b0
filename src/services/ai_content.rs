use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::{ContentRequest, GeneratedContent};

#[derive(Clone)]
pub struct AiContentService {
    api: ApiClient,
}

impl AiContentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn generate_description(
        &self,
        request: &ContentRequest,
    ) -> Result<GeneratedContent, RequestFailed> {
        self.api
            .call(
                ApiRequest::post("ai.internship_description", "/ai/internship-description")
                    .json(request),
                GeneratedContent::default(),
                "Failed to generate internship description",
            )
            .await
    }

    pub async fn generate_cover_letter(
        &self,
        request: &ContentRequest,
    ) -> Result<GeneratedContent, RequestFailed> {
        self.api
            .call(
                ApiRequest::post("ai.cover_letter", "/ai/cover-letter").json(request),
                GeneratedContent::default(),
                "Failed to generate cover letter",
            )
            .await
    }
}
