use uuid::Uuid;

use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::Notification;

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, RequestFailed> {
        self.api
            .call_list(
                ApiRequest::get("notifications.list", "/notifications"),
                "Failed to fetch notifications",
            )
            .await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::patch("notifications.mark_read", format!("/notifications/{}/read", id)),
                "Failed to mark notification as read",
            )
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::patch("notifications.mark_all_read", "/notifications/read-all"),
                "Failed to mark notifications as read",
            )
            .await
    }

    pub async fn clear_all(&self) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::delete("notifications.clear_all", "/notifications"),
                "Failed to clear notifications",
            )
            .await
    }
}
