//! Real-time notification socket

pub mod events;
pub mod socket;

pub use events::{apply_event, NotificationEvent};
pub use socket::{NotificationSocket, SocketError};
