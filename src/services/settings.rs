use crate::api::{ApiClient, ApiRequest};
use crate::errors::RequestFailed;
use crate::models::{AccountSettings, NotificationSettings, PasswordChange};

#[derive(Clone)]
pub struct SettingsService {
    api: ApiClient,
}

impl SettingsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<AccountSettings, RequestFailed> {
        self.api
            .call(
                ApiRequest::get("settings.get", "/settings"),
                AccountSettings::default(),
                "Failed to fetch settings",
            )
            .await
    }

    pub async fn update_notifications(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, RequestFailed> {
        self.api
            .call(
                ApiRequest::patch("settings.update_notifications", "/settings/notifications")
                    .json(settings),
                settings.clone(),
                "Failed to update notification settings",
            )
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), RequestFailed> {
        self.api
            .call_unit(
                ApiRequest::put("settings.change_password", "/settings/password").json(change),
                "Failed to change password",
            )
            .await
    }
}
