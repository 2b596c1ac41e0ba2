use fltk::{app, prelude::*};

use turing_editor::app::domain::{AppSettings, Message, Theme};
use turing_editor::app::state::AppState;
use turing_editor::ui::main_window::build_main_window;
use turing_editor::ui::menu::build_menu;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let mut widgets = build_main_window(&settings);
    build_menu(&mut widgets.menu, &sender, settings.theme);

    // Closing the window goes through the same save prompt as File/Exit
    widgets.wind.set_callback(move |_| {
        if app::event() == fltk::enums::Event::Close {
            sender.send(Message::WindowClose);
        }
    });

    let mut state = AppState::new(widgets, sender, settings);
    state.window.show();

    // A file named on the command line is opened at startup
    if let Some(path) = std::env::args_os().nth(1) {
        state.load_file(std::path::Path::new(&path));
    }

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::FileNew => state.file_new(),
                Message::FileOpen => state.file_open(),
                Message::FileSave => {
                    state.file_save();
                }
                Message::FileSaveAs => {
                    state.file_save_as();
                }
                Message::FileQuit | Message::WindowClose => {
                    if state.file_quit() {
                        app.quit();
                    }
                }
                Message::EditCut => state.edit_cut(),
                Message::EditCopy => state.edit_copy(),
                Message::EditPaste => state.edit_paste(),
                Message::ShowFind => state.show_find(),
                Message::ClearAll => state.clear_all(),
                Message::LightTheme => state.set_theme(Theme::Light),
                Message::DarkTheme => state.set_theme(Theme::Dark),
                Message::ShowAbout => state.show_about(),
                Message::BufferModified => state.on_buffer_modified(),
                Message::SelectionChanged => state.update_edit_actions(),
                Message::StatusExpired(generation) => state.status_expired(generation),
                Message::Find(request) => state.handle_find(request),
            }
        }
    }
}
