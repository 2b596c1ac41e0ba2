use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::domain::{Rgb, Theme};

/// Colours of the editor chrome and of the decoration backgrounds drawn
/// through the style buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub paper: Rgb,
    pub ink: Rgb,
    pub search_box: Rgb,
    pub error_line: Rgb,
    pub chrome: Rgb,
    pub chrome_ink: Rgb,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                paper: Rgb::new(30, 30, 30),
                ink: Rgb::new(220, 220, 220),
                search_box: Rgb::new(40, 90, 40),
                error_line: Rgb::new(70, 35, 35),
                chrome: Rgb::new(35, 35, 35),
                chrome_ink: Rgb::new(220, 220, 220),
            },
            Theme::Light => Self {
                paper: Rgb::new(255, 255, 255),
                ink: Rgb::new(0, 0, 0),
                search_box: Rgb::new(170, 230, 170),
                error_line: Rgb::new(255, 225, 225),
                chrome: Rgb::new(240, 240, 240),
                chrome_ink: Rgb::new(0, 0, 0),
            },
        }
    }
}

pub fn to_color(c: Rgb) -> Color {
    Color::from_rgb(c.r, c.g, c.b)
}

/// Paint the window, menu and editor background for `theme`. Caret and
/// selection colours belong to the overlay manager and are set there.
pub fn apply_theme(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    status: &mut Frame,
    theme: Theme,
) {
    let palette = Palette::for_theme(theme);

    editor.set_color(to_color(palette.paper));
    editor.set_text_color(to_color(palette.ink));
    window.set_color(to_color(palette.chrome));
    window.set_label_color(to_color(palette.chrome_ink));
    menu.set_color(to_color(palette.chrome));
    menu.set_text_color(to_color(palette.chrome_ink));
    status.set_color(to_color(palette.chrome));
    status.set_label_color(to_color(palette.chrome_ink));

    if theme.is_dark() {
        editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
        editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
    } else {
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
    }

    editor.redraw();
    window.redraw();
    menu.redraw();
    status.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, theme: Theme) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        let on: i32 = if theme.is_dark() { 1 } else { 0 };

        // 20 on Windows 11 / Windows 10 2004+, 19 on 1809-1903
        for attribute in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
