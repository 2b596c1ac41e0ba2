/// Flags for an incremental search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub case_sensitive: bool,
    pub regex: bool,
    pub whole_word: bool,
}

/// Requests raised by the find/replace dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindRequest {
    /// Box every occurrence of the text.
    FindAll(String),
    /// Select the first match from the top of the document.
    Find { text: String, options: FindOptions },
    /// Select the match after the current one, wrapping to the top.
    FindNext,
    /// Replace the current selection.
    Replace(String),
    ReplaceAll {
        find: String,
        replacement: String,
        regex: bool,
        greedy: bool,
    },
}

/// All messages that can be sent through the UI channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileQuit,
    WindowClose,

    // Edit
    EditCut,
    EditCopy,
    EditPaste,
    ShowFind,

    // View
    ClearAll,
    LightTheme,
    DarkTheme,

    // Help
    ShowAbout,

    // Editor events
    BufferModified,
    /// The editor selection was made or dropped.
    SelectionChanged,
    StatusExpired(u64),

    Find(FindRequest),
}
