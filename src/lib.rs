// casement: lets an embedded scripting layer drive native OS dialogs and
// receive correlated results back as structured events.

pub mod dialog;
pub mod error;
pub mod js;

pub use dialog::bridge::{FileDialogBridge, SelectionTicket};
pub use dialog::filters::{FileFilterSet, FileTypeFilter};
pub use dialog::native::{NativeDialogs, SelectFileParams};
pub use dialog::types::{ChoiceDialogSpec, MessageBoxKind, SelectionKind, SelectionResult};
pub use dialog::window::{NativeWindowHandle, WindowId, WindowRegistry};
pub use error::DialogError;
pub use js::environment::ShellEnvironment;
