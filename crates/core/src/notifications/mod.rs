//! Notifications module - domain models, services, and traits.

mod notifications_model;
mod notifications_service;
mod notifications_traits;

pub use notifications_model::{NewNotification, Notification, NotificationType};
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
