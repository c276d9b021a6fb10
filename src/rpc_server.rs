//! Destiny Dice RPC Server: JSON-RPC over stdin/stdout for a rendering front end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"destiny.add", "params":{"text":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Event:    {"event":"itemsUpdated"} after every write of the destinies record

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use destiny_dice::app::{resolve_database_path, App};
use destiny_dice::events::Subscription;
use destiny_dice::logging;
use destiny_dice::rpc_handler::handle_method;
use destiny_dice::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};

fn emit(out: &mut impl Write, frame: &Value) -> io::Result<()> {
    writeln!(out, "{}", frame)?;
    out.flush()
}

fn emit_events(out: &mut impl Write, events: &Subscription) -> io::Result<()> {
    let mut pending = events.drain();
    pending.dedup();
    for event in pending {
        emit(out, &json!({"event": event.name()}))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let mut settings_engine = SettingsEngine::new(None);
    let settings = settings_engine.load().unwrap_or_default();
    logging::init(&settings.logging.level, false);

    let db_path = resolve_database_path(None, &settings);
    let app = match App::new(&db_path) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(path = %db_path.display(), "failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let events = app.subscribe();
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if emit(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")})).is_err() {
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                tracing::debug!(method, "rpc request");
                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if emit(&mut out, &response).is_err() || emit_events(&mut out, &events).is_err() {
            break;
        }
    }
    ExitCode::SUCCESS
}
