//! Thin request boundary: JSON in, JSON out.
//!
//! Every outcome — including malformed bodies and unknown actions — comes
//! back as a well-formed JSON payload, never as a propagated error, so the
//! transport layer can always return something sensible.

use serde_json::{Value, json};
use tracing::error;

use crate::reconcile::{Reconciler, SheetKey, WriteOutcome};
use crate::store::TabularStore;

/// Handle a read-style request. `action=read` returns the full model;
/// anything else is an unknown-action error payload.
pub fn handle_get<S: TabularStore>(store: &mut S, action: &str) -> Value {
    match action {
        "read" => {
            let mut reconciler = Reconciler::new(&mut *store);
            match reconciler.read_all() {
                Ok(model) => serde_json::to_value(model)
                    .unwrap_or_else(|err| error_payload(&format!("encode model: {err}"))),
                Err(err) => {
                    error!(%err, "read request failed");
                    error_payload(&format!("{err:#}"))
                }
            }
        }
        other => error_payload(&format!("Unknown GET action: {other}")),
    }
}

/// Handle a write-style request. The body must be a JSON object with an
/// `action` of `writeAll` (with `data` as a model payload) or `writePartial`
/// (with `sheetKey` and `data` as the section payload).
pub fn handle_post<S: TabularStore>(store: &mut S, body: &str) -> Value {
    let request: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(err) => return error_payload(&format!("malformed request body: {err}")),
    };

    let action = request
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match action {
        "writeAll" => {
            let data = request.get("data").cloned().unwrap_or(Value::Null);
            let update = match serde_json::from_value(data) {
                Ok(update) => update,
                Err(err) => return error_payload(&format!("malformed writeAll data: {err}")),
            };
            let mut reconciler = Reconciler::new(&mut *store);
            write_response(reconciler.write_all(&update))
        }
        "writePartial" => {
            let key = request
                .get("sheetKey")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let key: SheetKey = match key.parse() {
                Ok(key) => key,
                Err(err) => return error_payload(&format!("{err:#}")),
            };
            let data = request.get("data").cloned().unwrap_or(Value::Null);
            let mut reconciler = Reconciler::new(&mut *store);
            write_response(reconciler.write_partial(key, &data))
        }
        other => error_payload(&format!("Unknown POST action: {other}")),
    }
}

fn write_response(result: anyhow::Result<WriteOutcome>) -> Value {
    match result {
        Ok(WriteOutcome { warning: None }) => json!({ "success": true }),
        Ok(WriteOutcome {
            warning: Some(warning),
        }) => json!({ "success": true, "warning": warning }),
        Err(err) => {
            error!(%err, "write request failed");
            error_payload(&format!("{err:#}"))
        }
    }
}

fn error_payload(message: &str) -> Value {
    json!({ "error": message })
}
