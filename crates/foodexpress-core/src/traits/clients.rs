//! Host client-window control trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Control over the app's open windows, provided by the hosting
/// environment.
#[async_trait]
pub trait ClientWindows: Send + Sync + std::fmt::Debug + 'static {
    /// Take control of all open app windows without a reload.
    async fn claim(&self) -> AppResult<()>;

    /// Focus an already-open app window. Returns `false` if none exists.
    async fn focus_existing(&self) -> AppResult<bool>;

    /// Open a new window at the given URL.
    async fn open_window(&self, url: &str) -> AppResult<()>;

    /// Open the system dialer with a `tel:` URL.
    async fn open_dialer(&self, tel_url: &str) -> AppResult<()>;
}
