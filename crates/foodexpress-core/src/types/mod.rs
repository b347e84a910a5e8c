//! Domain types shared across the agent crates.

pub mod alert;
pub mod http;
pub mod notification;

pub use alert::{AlertPayload, Contact, Incident, LocationReading, LocationShare, Urgency};
pub use http::{FetchRequest, FetchResponse, RequestMode, ResponseKind};
pub use notification::{
    NotificationAction, NotificationData, NotificationDescriptor, PushPayload,
};
