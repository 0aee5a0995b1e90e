use std::rc::Rc;

use anyhow::{Context as AnyhowContext, Result};
use rquickjs::Function;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::dialog::native::NativeDialogs;
use crate::dialog::types::SelectionResult;
use crate::dialog::window::WindowRegistry;
use crate::js::bindings::{install_dialog_bindings, DialogHost};
use crate::js::runtime::QuickJsEngine;

/// Owns the QuickJS engine plus the dialog bindings for one script host.
///
/// Construction performs all registration explicitly and returns the handle;
/// there is no load-time or process-global setup. Scripts then see
/// `casement.showMessageBox` and `casement.FileDialog`, and the host drives
/// result delivery by calling `pump_dialog_events` on its UI-affine context.
pub struct ShellEnvironment {
    engine: QuickJsEngine,
    host: Rc<DialogHost>,
}

impl ShellEnvironment {
    pub fn new(native: Rc<dyn NativeDialogs>, windows: Rc<WindowRegistry>) -> Result<Self> {
        let engine = QuickJsEngine::new().context("failed to create QuickJS engine")?;
        let host = Rc::new(DialogHost::new(native, windows));
        install_dialog_bindings(&engine, Rc::clone(&host))?;
        Ok(Self { engine, host })
    }

    pub fn eval(&self, source: &str, filename: &str) -> Result<()> {
        self.engine.eval(source, filename)
    }

    pub fn eval_with<V>(&self, source: &str, filename: &str) -> Result<V>
    where
        V: for<'js> rquickjs::FromJs<'js>,
    {
        self.engine.eval_with(source, filename)
    }

    /// Deliver completed selection results to their JS dialog instances.
    ///
    /// Each result becomes one `selected` or `cancelled` event whose payload
    /// leads with the originating request id; multi-file selections are the
    /// same `selected` event with one path per extra element, so consumers
    /// distinguish by arity. Returns the number of events delivered.
    pub fn pump_dialog_events(&self) -> Result<usize> {
        let results = self.host.drain_results();
        if results.is_empty() {
            return Ok(0);
        }

        let mut delivered = 0;
        for (bridge_id, result) in results {
            let (event, payload) = event_payload(&result);
            let payload_json =
                serde_json::to_string(&payload).context("failed to serialize dialog payload")?;

            self.engine.with_context(|ctx| {
                let global = ctx.globals();
                let emit: Function = global.get("__casement_emit_dialog_event")?;
                let payload_value = ctx.json_parse(payload_json.as_bytes())?;
                emit.call::<_, ()>((bridge_id, event, payload_value))
            })?;

            debug!(
                target = "dialog",
                request_id = result.request_id(),
                event,
                "dispatched dialog event to script"
            );
            delivered += 1;
        }

        self.engine.drain_jobs()?;
        Ok(delivered)
    }
}

fn event_payload(result: &SelectionResult) -> (&'static str, Vec<JsonValue>) {
    match result {
        SelectionResult::SingleFile { request_id, path } => (
            "selected",
            vec![json!(request_id), json!(path.to_string_lossy())],
        ),
        SelectionResult::MultipleFiles { request_id, paths } => {
            let mut payload = Vec::with_capacity(paths.len() + 1);
            payload.push(json!(request_id));
            payload.extend(paths.iter().map(|path| json!(path.to_string_lossy())));
            ("selected", payload)
        }
        SelectionResult::Cancelled { request_id } => ("cancelled", vec![json!(request_id)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn payload_leads_with_request_id_and_preserves_order() {
        let result = SelectionResult::MultipleFiles {
            request_id: 5,
            paths: vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")],
        };
        let (event, payload) = event_payload(&result);
        assert_eq!(event, "selected");
        assert_eq!(payload, vec![json!(5), json!("/a"), json!("/b"), json!("/c")]);
    }

    #[test]
    fn cancelled_payload_carries_only_the_id() {
        let (event, payload) = event_payload(&SelectionResult::Cancelled { request_id: 42 });
        assert_eq!(event, "cancelled");
        assert_eq!(payload, vec![json!(42)]);
    }
}
