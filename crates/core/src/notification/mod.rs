//! Durable notification records and their port.
//!
//! Delivery mechanics (push, email transport) live outside this subsystem;
//! the contract here is that a notification record is durably created.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::NotificationRepository;
pub use service::NotificationService;
pub use types::{NewNotification, Notification, NotificationCategory, NotificationDraft};
