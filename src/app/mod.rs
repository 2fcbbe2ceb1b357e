mod window;

use crate::config::Settings;
use crate::error::{Result, UploadError};
use crate::notify::{self, Notifier};
use crate::upload::{
    target_url, ProgressBody, ProgressCallback, UploadPhase, UploadRequest, WebDavClient,
};
use crate::utils::file_size::format_size;
use log::{debug, error, info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};

pub use window::{run_background, BackgroundWindow, WINDOW_TITLE};

pub const START_MINIMIZED_FLAG: &str = "/StartMinimized";

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    StartMinimized,
    Upload(Option<PathBuf>),
}

impl Invocation {
    /// `/StartMinimized` anywhere on the command line wins. Otherwise the
    /// first argument is the file to upload and the rest are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let args: Vec<PathBuf> = args.into_iter().collect();
        if args.iter().any(|arg| arg.as_os_str() == START_MINIMIZED_FLAG) {
            return Self::StartMinimized;
        }
        Self::Upload(args.into_iter().next())
    }
}

/// How an upload invocation ended. Every variant has already been reported
/// to the user by the time it is returned.
#[derive(Debug)]
pub enum Outcome {
    MissingPath,
    NotFound(PathBuf),
    ConfigError(UploadError),
    Uploaded { url: String, bytes: u64 },
    Failed(UploadError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Uploaded { .. })
    }
}

/// Drives a single upload from settings to the final notification.
pub struct Uploader<N> {
    settings_path: PathBuf,
    notifier: N,
    progress: ProgressCallback,
    phase: UploadPhase,
}

impl<N: Notifier> Uploader<N> {
    pub fn new(settings_path: impl Into<PathBuf>, notifier: N) -> Self {
        Self {
            settings_path: settings_path.into(),
            notifier,
            progress: Box::new(|_| {}),
            phase: UploadPhase::default(),
        }
    }

    /// Replaces the default no-op progress callback.
    pub fn on_progress<F>(mut self, progress: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.progress = Box::new(progress);
        self
    }

    pub fn run(mut self, file_path: Option<&Path>) -> Outcome {
        let file_path = match file_path {
            Some(path) => path,
            None => {
                self.advance(UploadPhase::Failed);
                self.notifier
                    .show_info(notify::TITLE_INFO, notify::MSG_MISSING_PATH);
                return Outcome::MissingPath;
            }
        };

        let settings = match Settings::load(&self.settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                self.advance(UploadPhase::Failed);
                self.notifier.show_error(notify::TITLE_ERROR, &e.to_string());
                return Outcome::ConfigError(e);
            }
        };
        self.advance(UploadPhase::ConfigResolved);

        if !file_path.exists() {
            warn!("File does not exist: {}", file_path.display());
            self.advance(UploadPhase::Failed);
            self.notifier
                .show_error(notify::TITLE_ERROR, notify::MSG_NOT_FOUND);
            return Outcome::NotFound(file_path.to_path_buf());
        }
        self.advance(UploadPhase::FileValidated);

        let request = UploadRequest::new(settings, file_path.to_path_buf());
        match self.upload(&request) {
            Ok((url, status)) if status.is_success() => {
                self.advance(UploadPhase::Succeeded);
                info!("Uploaded {} to {} ({})", file_path.display(), url, status);
                self.notifier.notify_success(
                    notify::TITLE_SUCCESS,
                    &format!("File uploaded successfully\n{}", file_path.display()),
                );
                let bytes = file_path.metadata().map(|m| m.len()).unwrap_or_default();
                Outcome::Uploaded { url, bytes }
            }
            Ok((_, status)) => self.fail(UploadError::Status(status)),
            Err(e) => self.fail(e),
        }
    }

    fn upload(&mut self, request: &UploadRequest) -> Result<(String, reqwest::StatusCode)> {
        let client = WebDavClient::new(&request.settings)?;
        let url = target_url(&request.settings.webdav_url, &request.file_path)?;
        self.advance(UploadPhase::Authenticated);

        let file = File::open(&request.file_path)?;
        let progress = std::mem::replace(&mut self.progress, Box::new(|_| {}));
        let body = ProgressBody::new(file, progress)?;
        info!(
            "Uploading {} ({}) to {}",
            request.file_path.display(),
            format_size(body.content_length()),
            url
        );

        self.advance(UploadPhase::Uploading);
        self.notifier
            .notify_info(notify::TITLE_STARTED, notify::MSG_STARTED);

        let status = client.put(&url, body)?;
        Ok((url, status))
    }

    fn fail(&mut self, e: UploadError) -> Outcome {
        error!("Upload failed: {}", e);
        self.advance(UploadPhase::Failed);
        self.notifier
            .notify_error(notify::TITLE_ERROR, notify::MSG_FAILED);
        self.notifier.show_error(
            notify::TITLE_ERROR,
            &format!("Error while uploading the file: {}", e),
        );
        Outcome::Failed(e)
    }

    fn advance(&mut self, next: UploadPhase) {
        if self.phase.can_advance_to(next) {
            debug!("{:?} -> {:?}", self.phase, next);
            self.phase = next;
        } else {
            warn!("Ignoring transition {:?} -> {:?}", self.phase, next);
        }
    }
}

/// Top-level dispatch. Returns `None` for the background-window mode.
pub fn run<N: Notifier>(
    invocation: &Invocation,
    settings_path: &Path,
    notifier: N,
) -> Option<Outcome> {
    match invocation {
        Invocation::StartMinimized => {
            info!("Starting minimized");
            if let Err(e) = run_background() {
                error!("Background window failed: {}", e);
            }
            None
        }
        Invocation::Upload(path) => {
            Some(Uploader::new(settings_path, notifier).run(path.as_deref()))
        }
    }
}
