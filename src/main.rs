#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use webdav_uploader::app::{self, Invocation};
use webdav_uploader::notify::{self, Notifier};
use webdav_uploader::{DesktopNotifier, Settings};

// Every argument is positional. No help or version flags, and file names
// may start with `-`.
#[derive(Parser, Debug)]
#[command(
    about = "Upload a file to a WebDAV server",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// File to upload, or `/StartMinimized` to start in the background
    #[arg(value_name = "FILE", allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let notifier = DesktopNotifier;
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            notifier.show_error(notify::TITLE_ERROR, &e.to_string());
            return;
        }
    };
    let invocation = Invocation::from_args(cli.args);

    let settings_path = match Settings::settings_path() {
        Ok(path) => path,
        Err(e) => {
            error!("Cannot locate settings file: {}", e);
            notifier.show_error(notify::TITLE_ERROR, &e.to_string());
            return;
        }
    };

    if let Some(outcome) = app::run(&invocation, &settings_path, notifier) {
        info!("Finished: {:?}", outcome);
    }
}
