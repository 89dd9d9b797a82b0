//! Shared UI selection state, independent of server data.

use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub internship_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
}

/// Currently selected internship and application.
///
/// Every clone shares the same state; subscribers are notified on change.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    sender: Arc<watch::Sender<Selection>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(Selection::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Selection {
        *self.sender.borrow()
    }

    /// Selecting another internship drops the selected application
    pub fn select_internship(&self, internship_id: Option<Uuid>) {
        self.sender.send_if_modified(|selection| {
            if selection.internship_id == internship_id {
                return false;
            }
            selection.internship_id = internship_id;
            selection.application_id = None;
            true
        });
    }

    pub fn select_application(&self, application_id: Option<Uuid>) {
        self.sender.send_if_modified(|selection| {
            if selection.application_id == application_id {
                return false;
            }
            selection.application_id = application_id;
            true
        });
    }

    pub fn clear(&self) {
        self.sender.send_replace(Selection::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_internship_resets_application() {
        let store = SelectionStore::new();
        let internship = Uuid::new_v4();
        let application = Uuid::new_v4();

        store.select_internship(Some(internship));
        store.select_application(Some(application));
        assert_eq!(store.current().application_id, Some(application));

        store.select_internship(Some(Uuid::new_v4()));
        assert_eq!(store.current().application_id, None);

        store.clear();
        assert_eq!(store.current(), Selection::default());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SelectionStore::new();
        let mut receiver = store.subscribe();
        let internship = Uuid::new_v4();

        let writer = store.clone();
        writer.select_internship(Some(internship));

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().internship_id, Some(internship));
    }

    #[test]
    fn test_reselecting_same_value_does_not_notify() {
        let store = SelectionStore::new();
        let internship = Uuid::new_v4();
        store.select_internship(Some(internship));

        let receiver = store.subscribe();
        store.select_internship(Some(internship));
        assert!(!receiver.has_changed().unwrap());
    }
}
