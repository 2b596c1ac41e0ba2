use fltk::dialog;

/// Every file is offered; Turing sources have no fixed extension.
const ALL_FILES: &str = "*";

pub fn native_open_dialog(directory: Option<&str>) -> Option<String> {
    dialog::file_chooser("Open File", ALL_FILES, directory.unwrap_or("."), false)
}

pub fn native_save_dialog(directory: Option<&str>) -> Option<String> {
    dialog::file_chooser("Save As", ALL_FILES, directory.unwrap_or("."), false)
}
