//! `Setting.txt` handling.
//!
//! The settings file sits next to the executable and holds exactly three
//! `KEY=value` lines. A key whose value is blank falls back to the default
//! compiled into the binary.

use crate::error::{Result, UploadError};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "Setting.txt";

pub const KEY_WEBDAV_URL: &str = "WEBDAV_URL";
pub const KEY_USERNAME: &str = "USERNAME";
pub const KEY_PASSWORD: &str = "PASSWORD";

const KEYS: [&str; 3] = [KEY_WEBDAV_URL, KEY_USERNAME, KEY_PASSWORD];

/// Written when no settings file exists yet.
pub const EMPTY_SETTINGS: &str = "WEBDAV_URL=\nUSERNAME=\nPASSWORD=\n";

// Baked in at build time, e.g. `WEBDAV_UPLOADER_URL=https://dav.example.com cargo build`.
pub const DEFAULT_WEBDAV_URL: &str = match option_env!("WEBDAV_UPLOADER_URL") {
    Some(url) => url,
    None => "http://localhost/webdav",
};
pub const DEFAULT_USERNAME: &str = match option_env!("WEBDAV_UPLOADER_USERNAME") {
    Some(username) => username,
    None => "anonymous",
};
pub const DEFAULT_PASSWORD: &str = match option_env!("WEBDAV_UPLOADER_PASSWORD") {
    Some(password) => password,
    None => "",
};

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub webdav_url: String,
    pub username: String,
    pub password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webdav_url: DEFAULT_WEBDAV_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("webdav_url", &self.webdav_url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Settings {
    /// Location of `Setting.txt` for the running executable.
    pub fn settings_path() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(SETTINGS_FILE_NAME))
    }

    /// Reads the settings file, creating it with empty values first if it
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Creating settings file {}", path.display());
            fs::write(path, EMPTY_SETTINGS)?;
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::parse(&content).map_err(|reason| UploadError::Settings {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Parses the three `KEY=value` lines and applies the defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut values: [Option<&str>; 3] = [None; 3];
        let mut line_count = 0;

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for (index, line) in content.lines().enumerate() {
            line_count += 1;
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| format!("line {} is not a KEY=value pair", index + 1))?;

            let slot = KEYS
                .iter()
                .position(|known| *known == key)
                .ok_or_else(|| format!("unknown key `{}` on line {}", key, index + 1))?;

            if values[slot].replace(value).is_some() {
                return Err(format!("duplicate key `{}` on line {}", key, index + 1));
            }
        }

        if line_count != KEYS.len() {
            return Err(format!(
                "expected {} lines, found {}",
                KEYS.len(),
                line_count
            ));
        }

        let [url, username, password] = values;
        let defaults = Self::default();
        Ok(Self {
            webdav_url: pick(url, defaults.webdav_url),
            username: pick(username, defaults.username),
            password: pick(password, defaults.password),
        })
    }
}

fn pick(value: Option<&str>, default: String) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default,
    }
}
