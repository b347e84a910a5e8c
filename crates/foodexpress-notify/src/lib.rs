//! # foodexpress-notify
//!
//! Inbound push handling: normalizes push payloads into displayable
//! notification descriptors (forcing required interaction for emergency
//! responses), routes notification clicks back into app actions, and
//! reports close-tracking to analytics on a best-effort basis.

pub mod analytics;
pub mod gateway;

pub use analytics::{AnalyticsSink, HttpAnalytics};
pub use gateway::{ClickOutcome, NotificationGateway};
