use serde::Deserialize;
use uuid::Uuid;

use crate::cache::QueryCache;
use crate::hooks::keys::{self, APPLICANTS, CANDIDATE_DASHBOARD, CANDIDATE_TASKS, MY_APPLICATIONS, NOTIFICATIONS};

/// Server push message, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    NotificationCreated { notification_id: Uuid },
    NotificationRead { notification_id: Uuid },
    ApplicationUpdated { application_id: Uuid },
    TaskUpdated { application_id: Uuid },
}

impl NotificationEvent {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Mark the queries an event makes outdated as stale; returns entries marked
pub async fn apply_event(cache: &QueryCache, event: &NotificationEvent) -> usize {
    let prefixes = match event {
        NotificationEvent::NotificationCreated { .. } | NotificationEvent::NotificationRead { .. } => {
            vec![keys::all(NOTIFICATIONS)]
        }
        NotificationEvent::ApplicationUpdated { .. } => vec![
            keys::all(NOTIFICATIONS),
            keys::all(MY_APPLICATIONS),
            keys::all(APPLICANTS),
            keys::all(CANDIDATE_DASHBOARD),
        ],
        NotificationEvent::TaskUpdated { application_id } => vec![
            keys::all(NOTIFICATIONS),
            keys::scoped(CANDIDATE_TASKS, *application_id),
        ],
    };

    let mut marked = 0;
    for prefix in &prefixes {
        marked += cache.invalidate(prefix).await;
    }
    marked
}
