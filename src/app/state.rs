use std::path::{Path, PathBuf};

use fltk::{
    app::Sender,
    dialog,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::overlay::OverlayManager;
use super::domain::{AppSettings, DocumentState, FindRequest, Message, Theme};
use super::infrastructure::file_io::{read_document, write_document};
use super::widget::EditorWidget;
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::find::FindReplaceDialog;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::fltk_editor::FltkEditor;
use crate::ui::main_window::MainWidgets;
use crate::ui::theme::apply_theme;
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// Seconds a transient status message stays up before "Ready" returns.
const STATUS_TIMEOUT: f64 = 2.0;
const STATUS_READY: &str = "Ready";

pub struct AppState {
    pub overlay: OverlayManager<FltkEditor>,
    pub document: DocumentState,
    pub settings: AppSettings,
    pub window: Window,
    pub menu: MenuBar,
    pub status_bar: Frame,
    pub sender: Sender<Message>,
    find_dialog: Option<FindReplaceDialog>,
    /// Bumped on every status message so stale timeouts are ignored.
    status_generation: u64,
    /// Last directory used in a file open/save dialog.
    last_open_directory: Option<String>,
}

impl AppState {
    pub fn new(widgets: MainWidgets, sender: Sender<Message>, settings: AppSettings) -> Self {
        let MainWidgets {
            wind,
            flex,
            menu,
            text_editor,
            annotation_strip,
            status_bar,
        } = widgets;

        let editor = FltkEditor::new(text_editor, annotation_strip, flex, sender);
        let overlay = OverlayManager::new(editor, Theme::Light);

        let mut state = Self {
            overlay,
            document: DocumentState::new(),
            settings,
            window: wind,
            menu,
            status_bar,
            sender,
            find_dialog: None,
            status_generation: 0,
            last_open_directory: None,
        };
        state.set_theme(state.settings.theme);
        state.update_window_title();
        state.update_edit_actions();
        state
    }

    pub fn update_window_title(&mut self) {
        self.window.set_label(&self.document.window_title());
    }

    /// Mirror the editor's modification flag into the title.
    pub fn on_buffer_modified(&mut self) {
        let modified = self.overlay.widget().is_modified();
        if modified != self.document.is_modified() {
            self.document.set_modified(modified);
            self.update_window_title();
        }
        self.update_edit_actions();
    }

    /// Cut and Copy are only available while text is selected.
    pub fn update_edit_actions(&mut self) {
        let available = self.overlay.widget().has_selection();
        for path in ["Edit/Cut", "Edit/Copy"] {
            let idx = self.menu.find_index(path);
            if idx >= 0 {
                if let Some(mut item) = self.menu.at(idx) {
                    if available {
                        item.activate();
                    } else {
                        item.deactivate();
                    }
                }
            }
        }
    }

    // --- Status bar ---

    /// Show `message`, reverting to "Ready" after a timeout.
    pub fn show_status(&mut self, message: &str) {
        self.status_generation += 1;
        self.status_bar.set_label(message);
        self.status_bar.redraw();

        let generation = self.status_generation;
        let sender = self.sender;
        fltk::app::add_timeout3(STATUS_TIMEOUT, move |_| {
            sender.send(Message::StatusExpired(generation));
        });
    }

    pub fn status_expired(&mut self, generation: u64) {
        if generation == self.status_generation {
            self.status_bar.set_label(STATUS_READY);
            self.status_bar.redraw();
        }
    }

    // --- Files ---

    /// Offer to save unsaved edits. Returns false when the user cancels.
    pub fn maybe_save(&mut self) -> bool {
        if !self.document.is_modified() {
            return true;
        }
        let choice = dialog::choice2_default(
            "The document has been modified.\nDo you want to save your changes?",
            "Save",
            "Discard",
            "Cancel",
        );
        match choice {
            Some(0) => self.file_save(),
            Some(1) => true,
            _ => false,
        }
    }

    pub fn file_new(&mut self) {
        if !self.maybe_save() {
            return;
        }
        self.overlay.widget_mut().set_text("");
        self.overlay.clear_everything();
        self.set_current_file(None);
    }

    pub fn file_open(&mut self) {
        if !self.maybe_save() {
            return;
        }
        if let Some(path) = native_open_dialog(self.last_open_directory.as_deref()) {
            self.load_file(Path::new(&path));
        }
    }

    pub fn load_file(&mut self, path: &Path) {
        self.remember_directory(path);
        match read_document(path) {
            Ok(content) => {
                self.overlay.widget_mut().set_text(&content);
                self.overlay.clear_everything();
                self.set_current_file(Some(path.to_path_buf()));
                tracing::debug!("Loaded {}", path.display());
                self.show_status("File loaded");
            }
            Err(e) => {
                tracing::warn!("{}", e);
                dialog::alert_default(&e.to_string());
            }
        }
    }

    /// Save to the current file, asking for one if the document is untitled.
    /// Returns whether the document was written.
    pub fn file_save(&mut self) -> bool {
        match self.document.file_path.clone() {
            Some(path) => self.save_file(&path),
            None => self.file_save_as(),
        }
    }

    pub fn file_save_as(&mut self) -> bool {
        match native_save_dialog(self.last_open_directory.as_deref()) {
            Some(path) => self.save_file(Path::new(&path)),
            None => false,
        }
    }

    fn save_file(&mut self, path: &Path) -> bool {
        self.remember_directory(path);
        let text = self.overlay.widget().text();
        match write_document(path, &text) {
            Ok(()) => {
                self.set_current_file(Some(path.to_path_buf()));
                tracing::debug!("Saved {}", path.display());
                self.show_status("File saved");
                true
            }
            Err(e) => {
                tracing::warn!("{}", e);
                dialog::alert_default(&e.to_string());
                false
            }
        }
    }

    fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.overlay.widget_mut().set_modified(false);
        self.document.set_current_file(path);
        self.update_window_title();
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
    }

    /// Returns true if the app should exit. Settings are written on the way out.
    pub fn file_quit(&mut self) -> bool {
        if !self.maybe_save() {
            return false;
        }
        self.write_settings();
        if let Some(dialog) = self.find_dialog.as_mut() {
            dialog.hide();
        }
        true
    }

    fn write_settings(&mut self) {
        self.settings.window_x = self.window.x();
        self.settings.window_y = self.window.y();
        self.settings.window_width = self.window.w();
        self.settings.window_height = self.window.h();
        self.settings.theme = self.overlay.theme();
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    // --- Edit ---

    pub fn edit_cut(&mut self) {
        self.overlay.widget_mut().cut();
    }

    pub fn edit_copy(&self) {
        self.overlay.widget().copy();
    }

    pub fn edit_paste(&mut self) {
        self.overlay.widget_mut().paste();
    }

    pub fn show_find(&mut self) {
        let sender = self.sender;
        self.find_dialog
            .get_or_insert_with(|| FindReplaceDialog::new(sender))
            .show();
    }

    pub fn handle_find(&mut self, request: FindRequest) {
        if let Err(e) = self.overlay.dispatch(request) {
            tracing::warn!("Find/replace failed: {}", e);
        }
    }

    // --- View ---

    pub fn clear_all(&mut self) {
        self.overlay.clear_everything();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        apply_theme(
            self.overlay.widget_mut().editor_mut(),
            &mut self.window,
            &mut self.menu,
            &mut self.status_bar,
            theme,
        );
        self.overlay.widget_mut().set_palette(theme);
        self.overlay.set_theme(theme);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, theme);
    }

    pub fn show_about(&self) {
        show_about_dialog();
    }
}
