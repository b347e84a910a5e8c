//! Trait seams between the agent and its environment.
//!
//! Implementations live in the leaf crates (HTTP in `foodexpress-fetch`
//! and `foodexpress-sync`); tests substitute mocks.

pub mod clients;
pub mod delivery;
pub mod net;
pub mod notify;
pub mod registration;

pub use clients::ClientWindows;
pub use delivery::DeliveryTransport;
pub use net::NetworkClient;
pub use notify::NotificationSink;
pub use registration::SyncRegistration;
