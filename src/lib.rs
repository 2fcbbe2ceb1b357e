//! Uploads a single file to a WebDAV collection with one authenticated PUT.

pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod upload;
pub mod utils;

pub use app::{Invocation, Outcome, Uploader};
pub use config::Settings;
pub use error::{Result, UploadError};
pub use notify::{DesktopNotifier, Notifier};
