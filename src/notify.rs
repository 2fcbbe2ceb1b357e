//! User-facing messages.
//!
//! Tips are short, non-blocking notices (the tray balloon of the desktop
//! build). Dialogs are modal and wait for the user.

use log::{error, info};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

pub const TITLE_INFO: &str = "Information";
pub const TITLE_ERROR: &str = "Error";
pub const TITLE_STARTED: &str = "Upload started";
pub const TITLE_SUCCESS: &str = "Success";

pub const MSG_MISSING_PATH: &str = "Specify the path of the file to upload.";
pub const MSG_NOT_FOUND: &str = "File not found.";
pub const MSG_STARTED: &str = "The file upload has started.";
pub const MSG_FAILED: &str = "Error while uploading the file.";

pub trait Notifier {
    fn notify_info(&self, title: &str, message: &str);
    fn notify_success(&self, title: &str, message: &str);
    fn notify_error(&self, title: &str, message: &str);
    fn show_info(&self, title: &str, message: &str);
    fn show_error(&self, title: &str, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify_info(&self, title: &str, message: &str) {
        (**self).notify_info(title, message)
    }

    fn notify_success(&self, title: &str, message: &str) {
        (**self).notify_success(title, message)
    }

    fn notify_error(&self, title: &str, message: &str) {
        (**self).notify_error(title, message)
    }

    fn show_info(&self, title: &str, message: &str) {
        (**self).show_info(title, message)
    }

    fn show_error(&self, title: &str, message: &str) {
        (**self).show_error(title, message)
    }
}

/// Native message boxes through `rfd`. Tips go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    fn dialog(level: MessageLevel, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Notifier for DesktopNotifier {
    fn notify_info(&self, title: &str, message: &str) {
        info!("{}: {}", title, message);
    }

    fn notify_success(&self, title: &str, message: &str) {
        info!("{}: {}", title, message);
    }

    fn notify_error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }

    fn show_info(&self, title: &str, message: &str) {
        Self::dialog(MessageLevel::Info, title, message);
    }

    fn show_error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
        Self::dialog(MessageLevel::Error, title, message);
    }
}
