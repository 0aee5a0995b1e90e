use std::path::PathBuf;

use crate::dialog::window::NativeWindowHandle;

/// Which native file-selection dialog to open.
///
/// The raw discriminants are the values the scripting layer passes; anything
/// outside this set fails validation rather than being cast blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    OpenFile,
    OpenMultiFile,
    SaveFile,
    SelectFolder,
}

impl SelectionKind {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(SelectionKind::OpenFile),
            2 => Some(SelectionKind::OpenMultiFile),
            3 => Some(SelectionKind::SaveFile),
            4 => Some(SelectionKind::SelectFolder),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            SelectionKind::OpenFile => 1,
            SelectionKind::OpenMultiFile => 2,
            SelectionKind::SaveFile => 3,
            SelectionKind::SelectFolder => 4,
        }
    }
}

/// Severity/icon class of the blocking choice dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxKind {
    Plain,
    Information,
    Warning,
}

impl MessageBoxKind {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(MessageBoxKind::Plain),
            1 => Some(MessageBoxKind::Information),
            2 => Some(MessageBoxKind::Warning),
            _ => None,
        }
    }
}

/// Fully validated parameters for one blocking choice dialog. Constructed,
/// handed to the native invoker, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceDialogSpec {
    pub kind: MessageBoxKind,
    pub buttons: Vec<String>,
    pub title: String,
    pub message: String,
    pub detail: String,
}

/// One accepted asynchronous selection request.
///
/// Owned exclusively by the `SelectionTicket` from creation until the single
/// completion call consumes it. At most one live request per bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogRequest {
    pub request_id: i64,
    pub owning_window: NativeWindowHandle,
}

/// The outcome of a selection request, tagged with the request id that
/// produced it. Emitted exactly once per `DialogRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    SingleFile { request_id: i64, path: PathBuf },
    MultipleFiles { request_id: i64, paths: Vec<PathBuf> },
    Cancelled { request_id: i64 },
}

impl SelectionResult {
    /// The correlation key: the caller-supplied id round-trips unchanged,
    /// sign included.
    pub fn request_id(&self) -> i64 {
        match self {
            SelectionResult::SingleFile { request_id, .. }
            | SelectionResult::MultipleFiles { request_id, .. }
            | SelectionResult::Cancelled { request_id } => *request_id,
        }
    }
}
