mod body;
mod client;
mod types;

pub use body::{ProgressBody, ProgressCallback, CHUNK_SIZE};
pub use client::{basic_auth_value, target_url, WebDavClient, OCTET_STREAM};
pub use types::{UploadPhase, UploadRequest};
