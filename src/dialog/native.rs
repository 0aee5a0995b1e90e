use std::path::PathBuf;

use crate::dialog::bridge::SelectionTicket;
use crate::dialog::filters::FileFilterSet;
use crate::dialog::types::{ChoiceDialogSpec, SelectionKind};
use crate::dialog::window::NativeWindowHandle;

/// Fully validated parameters for one native file-selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFileParams {
    pub kind: SelectionKind,
    pub title: String,
    pub default_path: PathBuf,
    /// `None` signals "no extension restriction" to the native layer.
    pub filters: Option<FileFilterSet>,
    /// Carried as supplied; the native layer decides what an out-of-range
    /// index means.
    pub filter_index: i64,
    pub default_extension: String,
    pub owning_window: NativeWindowHandle,
}

/// The platform dialog layer, treated as an external collaborator.
///
/// `select_file` must eventually consume the ticket through exactly one of
/// its completion methods, on the same UI-affine context the request was
/// issued from. `show_message_box` blocks its caller until the user responds
/// and always resolves to a button index; construction failure is not
/// modeled.
pub trait NativeDialogs {
    fn select_file(&self, params: SelectFileParams, ticket: SelectionTicket);

    fn show_message_box(&self, spec: &ChoiceDialogSpec) -> u32;
}
