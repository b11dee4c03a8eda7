//! RPC method handler for the qr-history JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to `App`.

use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::history::HistoryEntry;
use crate::types::qr::QrStyle;

fn entry_json(entry: &HistoryEntry) -> Value {
    serde_json::to_value(entry).unwrap_or(Value::Null)
}

fn out_dir(params: &Value) -> Option<PathBuf> {
    params.get("dir").and_then(|v| v.as_str()).map(PathBuf::from)
}

fn index_param(params: &Value) -> Result<usize, String> {
    params
        .get("index")
        .and_then(|v| v.as_u64())
        .map(|i| i as usize)
        .ok_or_else(|| "missing index".to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── QR ───
        "qr.generate" => {
            let link = params.get("link").and_then(|v| v.as_str()).ok_or("missing link")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let qr = match params.get("style") {
                Some(style) => {
                    let style: QrStyle = serde_json::from_value(style.clone())
                        .map_err(|e| format!("invalid style: {}", e))?;
                    a.generate_with_style(link, &style)
                }
                None => a.generate(link),
            }
            .map_err(|e| e.to_string())?;
            Ok(json!({"link": qr.link, "qrData": qr.image_data}))
        }
        "qr.current" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            match a.current_qr() {
                Some(qr) => Ok(json!({"link": qr.link, "qrData": qr.image_data})),
                None => Ok(Value::Null),
            }
        }
        "qr.download" => {
            let dir = out_dir(params);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let path = a.download_current(dir.as_deref()).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }

        // ─── History ───
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let view = a.history_view();
            Ok(json!({"items": view.rows, "total": view.rows.len()}))
        }
        "history.delete" => {
            let index = index_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let removed = a.remove_from_history(index).map_err(|e| e.to_string())?;
            Ok(json!({"removed": entry_json(&removed)}))
        }
        "history.clear" => {
            let confirmed = params.get("confirm").and_then(|v| v.as_bool()).unwrap_or(false);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let cleared = a
                .clear_history(&|_: &str| confirmed)
                .map_err(|e| e.to_string())?;
            Ok(json!({"cleared": cleared}))
        }
        "history.export" => {
            let dir = out_dir(params);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let path = a.export_history(dir.as_deref()).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "history.download" => {
            let index = index_param(params)?;
            let dir = out_dir(params);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let path = a
                .download_from_history(index, dir.as_deref())
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.set_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Notifications ───
        "notifications.active" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = a
                .notifier
                .active()
                .iter()
                .map(|n| json!({"id": n.id.to_string(), "kind": n.kind.as_str(), "message": n.message}))
                .collect();
            Ok(json!(arr))
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
