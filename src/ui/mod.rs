//! FLTK front end: window layout, menus, dialogs and the `EditorWidget`
//! implementation over `TextEditor`.

pub mod buffer;
pub mod dialogs;
pub mod file_dialogs;
pub mod fltk_editor;
pub mod main_window;
pub mod menu;
pub mod theme;
