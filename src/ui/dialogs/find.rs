use fltk::{
    app::Sender,
    button::{Button, CheckButton},
    dialog,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::domain::{FindOptions, FindRequest, Message};

/// Non-modal Find & Replace window. Built once and re-shown; every button
/// sends a `Message::Find` to the main loop.
pub struct FindReplaceDialog {
    window: Window,
    find_input: Input,
}

struct Fields {
    find_input: Input,
    replace_input: Input,
    case_check: CheckButton,
    regex_check: CheckButton,
    word_check: CheckButton,
    greedy_check: CheckButton,
}

impl Fields {
    fn options(&self) -> FindOptions {
        FindOptions {
            case_sensitive: self.case_check.is_checked(),
            regex: self.regex_check.is_checked(),
            whole_word: self.word_check.is_checked(),
        }
    }
}

impl FindReplaceDialog {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut window = Window::default()
            .with_size(420, 250)
            .with_label("Find & Replace")
            .center_screen();

        Frame::default().with_pos(20, 20).with_size(80, 30).with_label("Find what:");
        let find_input = Input::default().with_pos(110, 20).with_size(290, 30);

        Frame::default().with_pos(20, 60).with_size(80, 30).with_label("Replace:");
        let replace_input = Input::default().with_pos(110, 60).with_size(290, 30);

        let case_check = CheckButton::default()
            .with_pos(110, 100).with_size(140, 25).with_label("Match case");
        let word_check = CheckButton::default()
            .with_pos(260, 100).with_size(140, 25).with_label("Whole word");
        let regex_check = CheckButton::default()
            .with_pos(110, 130).with_size(140, 25).with_label("Regular expression");
        let greedy_check = CheckButton::default()
            .with_pos(260, 130).with_size(140, 25).with_label("Greedy regex");

        let mut find_btn = Button::default()
            .with_pos(20, 170).with_size(90, 30).with_label("Find");
        let mut find_next_btn = Button::default()
            .with_pos(120, 170).with_size(90, 30).with_label("Find Next");
        let mut find_all_btn = Button::default()
            .with_pos(220, 170).with_size(90, 30).with_label("Find All");
        let mut replace_btn = Button::default()
            .with_pos(20, 210).with_size(90, 30).with_label("Replace");
        let mut replace_all_btn = Button::default()
            .with_pos(120, 210).with_size(90, 30).with_label("Replace All");
        let mut close_btn = Button::default()
            .with_pos(320, 210).with_size(80, 30).with_label("Close");

        window.end();
        window.make_resizable(false);

        let fields = std::rc::Rc::new(Fields {
            find_input: find_input.clone(),
            replace_input,
            case_check,
            regex_check,
            word_check,
            greedy_check,
        });

        let f = fields.clone();
        find_btn.set_callback(move |_| {
            let text = f.find_input.value();
            if text.is_empty() {
                dialog::message_default("Please enter text to find");
                return;
            }
            sender.send(Message::Find(FindRequest::Find { text, options: f.options() }));
        });

        find_next_btn.set_callback(move |_| {
            sender.send(Message::Find(FindRequest::FindNext));
        });

        let f = fields.clone();
        find_all_btn.set_callback(move |_| {
            sender.send(Message::Find(FindRequest::FindAll(f.find_input.value())));
        });

        let f = fields.clone();
        replace_btn.set_callback(move |_| {
            sender.send(Message::Find(FindRequest::Replace(f.replace_input.value())));
        });

        let f = fields;
        replace_all_btn.set_callback(move |_| {
            let find = f.find_input.value();
            if find.is_empty() {
                dialog::message_default("Please enter text to find");
                return;
            }
            sender.send(Message::Find(FindRequest::ReplaceAll {
                find,
                replacement: f.replace_input.value(),
                regex: f.regex_check.is_checked(),
                greedy: f.greedy_check.is_checked(),
            }));
        });

        let mut dialog_close = window.clone();
        close_btn.set_callback(move |_| {
            dialog_close.hide();
        });

        Self { window, find_input }
    }

    pub fn show(&mut self) {
        self.window.show();
        let _ = self.find_input.take_focus();
    }

    pub fn hide(&mut self) {
        self.window.hide();
    }
}
