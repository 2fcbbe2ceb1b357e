use crate::config::Settings;
use std::path::PathBuf;

/// Everything needed for one PUT. Built once per invocation.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub settings: Settings,
    pub file_path: PathBuf,
}

impl UploadRequest {
    pub fn new(settings: Settings, file_path: PathBuf) -> Self {
        Self {
            settings,
            file_path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Start,
    ConfigResolved,
    FileValidated,
    Authenticated,
    Uploading,
    Succeeded,
    Failed,
}

impl Default for UploadPhase {
    fn default() -> Self {
        Self::Start
    }
}

impl UploadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether `next` may follow `self`. Any non-terminal phase may fail.
    pub fn can_advance_to(self, next: UploadPhase) -> bool {
        use UploadPhase::*;
        match (self, next) {
            (Start, ConfigResolved)
            | (ConfigResolved, FileValidated)
            | (FileValidated, Authenticated)
            | (Authenticated, Uploading)
            | (Uploading, Succeeded) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UploadPhase::*;

    #[test]
    fn happy_path_is_linear() {
        let path = [Start, ConfigResolved, FileValidated, Authenticated, Uploading, Succeeded];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
        assert!(!Start.can_advance_to(Uploading));
        assert!(!ConfigResolved.can_advance_to(Succeeded));
    }

    #[test]
    fn terminal_phases_are_final() {
        assert!(Uploading.can_advance_to(Failed));
        assert!(Start.can_advance_to(Failed));
        assert!(!Succeeded.can_advance_to(Failed));
        assert!(!Failed.can_advance_to(Start));
        assert!(Failed.is_terminal() && Succeeded.is_terminal());
    }
}
