use fltk::{
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::domain::{AppSettings, DocumentState};
use crate::app::domain::settings::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

pub const MENU_HEIGHT: i32 = 30;
pub const STATUS_HEIGHT: i32 = 22;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub text_editor: TextEditor,
    pub annotation_strip: Frame,
    pub status_bar: Frame,
}

/// Menu bar, editor, annotation strip and status bar stacked in a column,
/// placed where the settings last left the window.
pub fn build_main_window(settings: &AppSettings) -> MainWidgets {
    let (w, h) = settings.window_size();
    let mut wind = Window::new(settings.window_x, settings.window_y, w, h, None);
    wind.set_label(&DocumentState::new().window_title());
    wind.set_xclass("OpenTuringEditor");
    wind.size_range(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, 0, 0);

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_linenumber_width(40);

    // Error annotations, sized by the editor widget (hidden when empty)
    let mut annotation_strip = Frame::default().with_size(0, 0);
    annotation_strip.hide();
    flex.fixed(&annotation_strip, 0);

    let mut status_bar = Frame::default().with_label("Ready");
    status_bar.set_frame(FrameType::FlatBox);
    status_bar.set_align(Align::Left | Align::Inside);
    status_bar.set_label_size(12);
    flex.fixed(&status_bar, STATUS_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        flex,
        menu,
        text_editor,
        annotation_strip,
        status_bar,
    }
}
