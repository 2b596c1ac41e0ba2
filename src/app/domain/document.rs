use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "Open Turing Editor";
pub const UNTITLED_NAME: &str = "untitled.txt";

/// Which file the editor shows and whether it has unsaved edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub file_path: Option<PathBuf>,
    modified: bool,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `path` (or to an untitled document) and mark it clean.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.file_path = path;
        self.modified = false;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .map(extract_filename)
            .unwrap_or_else(|| UNTITLED_NAME.to_string())
    }

    pub fn window_title(&self) -> String {
        let prefix = if self.modified { "*" } else { "" };
        format!("{}{} - {}", prefix, self.display_name(), APP_NAME)
    }
}

/// Extract the file name component of a path.
///
/// Returns "Unknown" for paths without one (`/`, `.`, empty).
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
