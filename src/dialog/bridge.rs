use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use crate::dialog::filters;
use crate::dialog::native::{NativeDialogs, SelectFileParams};
use crate::dialog::types::{DialogRequest, SelectionKind, SelectionResult};
use crate::dialog::window::{NativeWindowHandle, WindowId, WindowRegistry};
use crate::error::DialogError;
use crate::js::marshal::{path_from_text, ArgKind, CheckedArgs, InvalidArgument, ScriptValue};

/// Positional contract of `selectFile(window, type, title, defaultPath,
/// fileTypes, fileTypeIndex, defaultExtension, callbackId)`.
const SELECT_FILE_SCHEMA: &[ArgKind] = &[
    ArgKind::Object,
    ArgKind::Number,
    ArgKind::Text,
    ArgKind::Text,
    ArgKind::Array,
    ArgKind::Number,
    ArgKind::Text,
    ArgKind::Number,
];

/// Bridges asynchronous native file selection back to the logical request
/// that triggered it.
///
/// One bridge supports one outstanding request cycle at a time: `select_file`
/// moves the bridge from idle to awaiting-completion, and only consumption of
/// the issued `SelectionTicket` moves it back. Results arrive on the receiver
/// returned by `new`, each tagged with the caller-supplied request id.
pub struct FileDialogBridge {
    native: Rc<dyn NativeDialogs>,
    windows: Rc<WindowRegistry>,
    pending: Rc<RefCell<Option<i64>>>,
    events: UnboundedSender<SelectionResult>,
}

impl FileDialogBridge {
    pub fn new(
        native: Rc<dyn NativeDialogs>,
        windows: Rc<WindowRegistry>,
    ) -> (Self, UnboundedReceiver<SelectionResult>) {
        let (events, receiver) = unbounded_channel();
        let bridge = Self {
            native,
            windows,
            pending: Rc::new(RefCell::new(None)),
            events,
        };
        (bridge, receiver)
    }

    /// True while a request is awaiting its native completion.
    pub fn is_awaiting_completion(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Validate the raw argument list and issue the native selection request.
    ///
    /// Validation is all-or-nothing: any failure leaves the bridge idle and
    /// makes no native call. On success the native layer receives a
    /// `SelectionTicket` it must consume exactly once.
    pub fn select_file(&self, args: &[ScriptValue]) -> Result<(), DialogError> {
        let checked = CheckedArgs::check(SELECT_FILE_SCHEMA, args)?;

        let window = checked.object(0)?;
        let kind = SelectionKind::from_raw(checked.integer(1)?)
            .ok_or(InvalidArgument::new(1, "a known dialog type"))?;
        let title = checked.text(2)?.to_string();
        let default_path = path_from_text(checked.text(3)?);
        let file_types = filters::filters_from_entries(checked.array(4)?, 4)?;
        let filter_index = checked.integer(5)?;
        let default_extension = checked.text(6)?.to_string();
        let request_id = checked.integer(7)?;

        let owning_window = self
            .resolve_window(window)
            .ok_or(DialogError::InvalidWindow)?;

        {
            let mut pending = self.pending.borrow_mut();
            if pending.is_some() {
                return Err(DialogError::Busy);
            }
            *pending = Some(request_id);
        }

        let request = DialogRequest {
            request_id,
            owning_window,
        };
        let params = SelectFileParams {
            kind,
            title,
            default_path,
            filters: filters::build_filter_set(&file_types).into_active(),
            filter_index,
            default_extension,
            owning_window,
        };

        debug!(
            target = "dialog",
            request_id,
            kind = ?params.kind,
            filtered = params.filters.is_some(),
            "issuing native file selection"
        );

        let ticket = SelectionTicket::new(request, Rc::clone(&self.pending), self.events.clone());
        self.native.select_file(params, ticket);
        Ok(())
    }

    fn resolve_window(
        &self,
        window: &HashMap<String, ScriptValue>,
    ) -> Option<NativeWindowHandle> {
        let id = match window.get("id") {
            Some(ScriptValue::Number(id)) if id.fract() == 0.0 && *id >= 0.0 => *id as u32,
            _ => return None,
        };
        self.windows.resolve(WindowId::from_raw(id))
    }
}

/// Single-owner completion token for one selection request.
///
/// The ticket is moved into the native call and consumed, not merely
/// referenced, by whichever completion variant fires; move semantics make a
/// second completion unrepresentable. Consuming the ticket is the sole
/// trigger for releasing the request and returning the bridge to idle.
///
/// Holds an `Rc` slot and is therefore `!Send`: completions must arrive on
/// the same logical UI-affine context the request was issued from.
pub struct SelectionTicket {
    request: DialogRequest,
    slot: Rc<RefCell<Option<i64>>>,
    events: UnboundedSender<SelectionResult>,
    resolved: bool,
}

impl SelectionTicket {
    fn new(
        request: DialogRequest,
        slot: Rc<RefCell<Option<i64>>>,
        events: UnboundedSender<SelectionResult>,
    ) -> Self {
        Self {
            request,
            slot,
            events,
            resolved: false,
        }
    }

    pub fn request_id(&self) -> i64 {
        self.request.request_id
    }

    /// The user picked a single file.
    pub fn selected(mut self, path: PathBuf) {
        let request_id = self.request.request_id;
        self.finish(SelectionResult::SingleFile { request_id, path });
    }

    /// The user picked several files; input ordering is preserved.
    pub fn selected_many(mut self, paths: Vec<PathBuf>) {
        let request_id = self.request.request_id;
        self.finish(SelectionResult::MultipleFiles { request_id, paths });
    }

    /// The user dismissed the dialog. Carries only the request id.
    pub fn cancelled(mut self) {
        let request_id = self.request.request_id;
        self.finish(SelectionResult::Cancelled { request_id });
    }

    fn finish(&mut self, result: SelectionResult) {
        self.resolved = true;
        self.slot.borrow_mut().take();
        debug!(
            target = "dialog",
            request_id = result.request_id(),
            "selection request completed"
        );
        if self.events.send(result).is_err() {
            error!(
                target = "dialog",
                request_id = self.request.request_id,
                "dialog result receiver dropped before completion was delivered"
            );
        }
    }
}

impl Drop for SelectionTicket {
    fn drop(&mut self) {
        // The native contract is exactly-once; a dropped ticket means that
        // contract was broken. Reset the slot so the bridge is not wedged,
        // but do not forge a completion event.
        if !self.resolved {
            error!(
                target = "dialog",
                request_id = self.request.request_id,
                "selection ticket dropped without completion; bridge reset to idle"
            );
            self.slot.borrow_mut().take();
        }
    }
}
