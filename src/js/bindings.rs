use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context as AnyhowContext, Result};
use rquickjs::function::Rest;
use rquickjs::{Ctx, Exception, Function, Type, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::error;

use crate::dialog::bridge::FileDialogBridge;
use crate::dialog::message_box;
use crate::dialog::native::NativeDialogs;
use crate::dialog::types::SelectionResult;
use crate::dialog::window::WindowRegistry;
use crate::error::DialogError;
use crate::js::marshal::ScriptValue;
use crate::js::runtime::QuickJsEngine;

/// Rust-side state behind the `casement` script globals.
///
/// Each JS `FileDialog` instance maps to one `FileDialogBridge` registered
/// here under an opaque numeric handle; the handle is what a corrupted or
/// hand-rolled instance fails to present, surfacing `BadConstructionCall`.
pub(crate) struct DialogHost {
    native: Rc<dyn NativeDialogs>,
    windows: Rc<WindowRegistry>,
    dialogs: RefCell<HashMap<u32, DialogSlot>>,
    next_dialog: Cell<u32>,
}

struct DialogSlot {
    bridge: FileDialogBridge,
    events: UnboundedReceiver<SelectionResult>,
}

impl DialogHost {
    pub(crate) fn new(native: Rc<dyn NativeDialogs>, windows: Rc<WindowRegistry>) -> Self {
        Self {
            native,
            windows,
            dialogs: RefCell::new(HashMap::new()),
            next_dialog: Cell::new(0),
        }
    }

    fn create_dialog(&self) -> u32 {
        let id = self.next_dialog.get() + 1;
        self.next_dialog.set(id);
        let (bridge, events) =
            FileDialogBridge::new(Rc::clone(&self.native), Rc::clone(&self.windows));
        self.dialogs
            .borrow_mut()
            .insert(id, DialogSlot { bridge, events });
        id
    }

    fn select_file(&self, target: &ScriptValue, args: &[ScriptValue]) -> Result<(), DialogError> {
        let bridge_id = match target {
            ScriptValue::Number(id) if id.fract() == 0.0 && *id >= 0.0 => *id as u32,
            _ => return Err(DialogError::BadConstructionCall),
        };
        let dialogs = self.dialogs.borrow();
        let slot = dialogs
            .get(&bridge_id)
            .ok_or(DialogError::BadConstructionCall)?;
        slot.bridge.select_file(args)
    }

    fn show_message_box(&self, args: &[ScriptValue]) -> Result<u32, DialogError> {
        message_box::show_message_box(self.native.as_ref(), args)
    }

    /// Drain every bridge's completed results, tagged with the bridge handle
    /// so the JS layer can route them to the right instance.
    pub(crate) fn drain_results(&self) -> Vec<(u32, SelectionResult)> {
        let mut out = Vec::new();
        for (id, slot) in self.dialogs.borrow_mut().iter_mut() {
            while let Ok(result) = slot.events.try_recv() {
                out.push((*id, result));
            }
        }
        out
    }
}

/// Install the `casement` globals into the engine.
///
/// Explicit wiring performed once by the host; nothing here mutates
/// process-wide state.
pub(crate) fn install_dialog_bindings(
    engine: &QuickJsEngine,
    host: Rc<DialogHost>,
) -> Result<()> {
    engine
        .with_context(|ctx| install(&ctx, host))
        .context("failed to install casement dialog bindings")
}

fn install<'js>(ctx: &Ctx<'js>, host: Rc<DialogHost>) -> rquickjs::Result<()> {
    let global = ctx.globals();

    {
        let host = Rc::clone(&host);
        let func = Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, args: Rest<Value<'js>>| -> rquickjs::Result<u32> {
                let raw = script_values(&args.0)?;
                host.show_message_box(&raw)
                    .map_err(|err| throw_dialog_error(&ctx, &err))
            },
        )?
        .with_name("__casement_show_message_box")?;
        global.set("__casement_show_message_box", func)?;
    }

    {
        let host = Rc::clone(&host);
        let func = Function::new(ctx.clone(), move || -> rquickjs::Result<u32> {
            Ok(host.create_dialog())
        })?
        .with_name("__casement_dialog_new")?;
        global.set("__casement_dialog_new", func)?;
    }

    {
        let host = Rc::clone(&host);
        let func = Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, args: Rest<Value<'js>>| -> rquickjs::Result<()> {
                let raw = script_values(&args.0)?;
                let Some((target, call_args)) = raw.split_first() else {
                    return Err(throw_dialog_error(&ctx, &DialogError::BadConstructionCall));
                };
                host.select_file(target, call_args)
                    .map_err(|err| throw_dialog_error(&ctx, &err))
            },
        )?
        .with_name("__casement_dialog_select_file")?;
        global.set("__casement_dialog_select_file", func)?;
    }

    ctx.eval::<(), _>(DIALOG_BOOTSTRAP.as_bytes())
}

fn throw_dialog_error(ctx: &Ctx<'_>, err: &DialogError) -> rquickjs::Error {
    match err {
        DialogError::InvalidArgument(_) => Exception::throw_type(ctx, &err.to_string()),
        _ => Exception::throw_message(ctx, &err.to_string()),
    }
}

fn script_values<'js>(values: &[Value<'js>]) -> rquickjs::Result<Vec<ScriptValue>> {
    values.iter().map(script_value_from_js).collect()
}

/// Convert an engine value into the engine-independent loose representation
/// the validation layer consumes.
fn script_value_from_js<'js>(value: &Value<'js>) -> rquickjs::Result<ScriptValue> {
    match value.type_of() {
        Type::Uninitialized | Type::Undefined => Ok(ScriptValue::Undefined),
        Type::Null => Ok(ScriptValue::Null),
        Type::Bool => Ok(ScriptValue::Bool(value.as_bool().unwrap_or(false))),
        Type::Int => Ok(ScriptValue::Number(f64::from(value.as_int().unwrap_or(0)))),
        Type::Float => Ok(ScriptValue::Number(value.as_float().unwrap_or(0.0))),
        Type::String => {
            let text = match value.as_string() {
                Some(string) => string.to_string()?,
                None => String::new(),
            };
            Ok(ScriptValue::Text(text))
        }
        Type::Array => {
            let mut items = Vec::new();
            if let Some(array) = value.as_array() {
                for item in array.iter::<Value<'js>>() {
                    items.push(script_value_from_js(&item?)?);
                }
            }
            Ok(ScriptValue::Array(items))
        }
        Type::Object | Type::Exception => {
            let mut map = HashMap::new();
            if let Some(object) = value.as_object() {
                for prop in object.props::<String, Value<'js>>() {
                    let (key, item) = prop?;
                    map.insert(key, script_value_from_js(&item)?);
                }
            }
            Ok(ScriptValue::Object(map))
        }
        other => {
            // Functions, symbols, modules... carry no marshaling meaning.
            error!(
                target = "quickjs",
                kind = ?other,
                "dropping unmarshalable script value"
            );
            Ok(ScriptValue::Undefined)
        }
    }
}

const DIALOG_BOOTSTRAP: &str = r#"
(() => {
    const global = globalThis;
    const instances = new Map();

    function FileDialog() {
        if (!(this instanceof FileDialog)) {
            throw new Error('Require constructor call');
        }
        this.__bridge = global.__casement_dialog_new();
        this.__listeners = {};
        instances.set(this.__bridge, this);
    }

    FileDialog.prototype.on = function (event, listener) {
        if (!this.__listeners[event]) {
            this.__listeners[event] = [];
        }
        this.__listeners[event].push(listener);
        return this;
    };

    FileDialog.prototype.selectFile = function (...args) {
        return global.__casement_dialog_select_file(this.__bridge, ...args);
    };

    global.__casement_emit_dialog_event = (bridgeId, event, payload) => {
        const dialog = instances.get(bridgeId);
        if (!dialog) {
            return;
        }
        const listeners = dialog.__listeners[event] || [];
        for (const listener of listeners) {
            try {
                listener(...payload);
            } catch (err) {
                global.__casement_log('dialog listener error: ' + err);
            }
        }
    };

    global.casement = {
        showMessageBox: (...args) => global.__casement_show_message_box(...args),
        FileDialog: FileDialog,
    };
})();
"#;
