use tracing::debug;

use crate::dialog::native::NativeDialogs;
use crate::dialog::types::{ChoiceDialogSpec, MessageBoxKind};
use crate::error::DialogError;
use crate::js::marshal::{ArgKind, CheckedArgs, InvalidArgument, ScriptValue};

/// Positional contract of `showMessageBox(type, buttons, title, message,
/// detail)`.
const MESSAGE_BOX_SCHEMA: &[ArgKind] = &[
    ArgKind::Number,
    ArgKind::Array,
    ArgKind::Text,
    ArgKind::Text,
    ArgKind::Text,
];

/// Validate the raw argument list and invoke the blocking choice dialog.
///
/// Blocks the calling context until the user responds and returns the
/// zero-based index of the chosen button; the native dialog always resolves
/// to an index, so no cancellation path exists here.
pub fn show_message_box(
    native: &dyn NativeDialogs,
    args: &[ScriptValue],
) -> Result<u32, DialogError> {
    let checked = CheckedArgs::check(MESSAGE_BOX_SCHEMA, args)?;

    let kind = MessageBoxKind::from_raw(checked.integer(0)?)
        .ok_or(InvalidArgument::new(0, "a known message box type"))?;

    let mut buttons = Vec::new();
    for value in checked.array(1)? {
        let ScriptValue::Text(label) = value else {
            return Err(InvalidArgument::new(1, "an array of strings").into());
        };
        buttons.push(label.clone());
    }

    let spec = ChoiceDialogSpec {
        kind,
        buttons,
        title: checked.text(2)?.to_string(),
        message: checked.text(3)?.to_string(),
        detail: checked.text(4)?.to_string(),
    };

    debug!(
        target = "dialog",
        kind = ?spec.kind,
        buttons = spec.buttons.len(),
        "showing blocking message box"
    );
    Ok(native.show_message_box(&spec))
}
