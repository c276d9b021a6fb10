//! RPC method handler for the Destiny Dice JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the selection engine held by
//! the `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::destiny_manager::DestinyManagerTrait;
use crate::types::destiny::{Destiny, HistoryItem, HistorySize};

fn destiny_json(d: &Destiny) -> Value {
    json!({
        "id": d.id,
        "text": d.text,
        "createdAt": d.created_at,
        "editedAt": d.edited_at,
        "label": d.timestamp_label().to_string(),
    })
}

fn history_json(h: &HistoryItem) -> Value {
    json!({
        "id": h.destiny.id,
        "text": h.destiny.text,
        "selectedAt": h.selected_at,
        "time": h.selected_time(),
    })
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let mgr = &mut a.manager;
    mgr.sync();

    match method {
        // ─── Destinies ───
        "destiny.add" => {
            let text = str_param(params, "text")?;
            let destiny = mgr.add_destiny(text).map_err(|e| e.to_string())?;
            Ok(destiny_json(&destiny))
        }
        "destiny.edit" => {
            let id = str_param(params, "id")?;
            let text = str_param(params, "text")?;
            let destiny = mgr.edit_destiny(id, text).map_err(|e| e.to_string())?;
            Ok(destiny_json(&destiny))
        }
        "destiny.remove" => {
            let id = str_param(params, "id")?;
            let removed = mgr.remove_destiny(id);
            Ok(json!({"ok": true, "removed": removed}))
        }
        "destiny.list" => {
            let arr: Vec<Value> = mgr.destinies().into_iter().map(destiny_json).collect();
            Ok(json!({"total": arr.len(), "destinies": arr}))
        }
        "destiny.roll" => {
            let picked = mgr.select_random().map_err(|e| e.to_string())?;
            Ok(history_json(&picked))
        }
        "destiny.current" => Ok(mgr
            .current_selection()
            .map(history_json)
            .unwrap_or(Value::Null)),

        // ─── History ───
        "history.list" => {
            let all = params.get("all").and_then(|v| v.as_bool()).unwrap_or(false);
            let entries = if all { mgr.history() } else { mgr.visible_history() };
            let arr: Vec<Value> = entries.iter().map(history_json).collect();
            Ok(json!(arr))
        }
        "history.size.get" => Ok(json!(u32::from(mgr.history_size()))),
        "history.size.set" => {
            let size = params
                .get("size")
                .and_then(|v| v.as_u64())
                .ok_or("missing size")?;
            let size = u32::try_from(size).map_err(|_| format!("invalid size: {}", size))?;
            mgr.set_history_size(size).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "size": size}))
        }
        "history.size.options" => {
            let options: Vec<u32> = HistorySize::options().map(u32::from).collect();
            Ok(json!(options))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
