//! qr-history RPC Server: JSON-RPC over stdin/stdout for UI front-ends.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"qr.generate", "params":{"link":"https://example.com"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use qr_history::app::App;
use qr_history::logging;
use qr_history::rpc_handler::handle_method;

use serde_json::{json, Value};
use tracing::{error, info};

fn reply(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() {
    logging::init();

    // QR_HISTORY_DATA_DIR wins over the configured data directory
    let data_dir = std::env::var("QR_HISTORY_DATA_DIR").ok().map(PathBuf::from);
    let app = match App::open(data_dir.as_deref(), None) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(error = %e, "failed to initialize qr-history");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    if reply(&mut out, &ready).is_err() {
        return;
    }
    info!("rpc server ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id":null,"error":format!("parse error: {}",e)});
                if reply(&mut out, &err).is_err() {
                    break;
                }
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        if reply(&mut out, &response).is_err() {
            break;
        }
    }
    info!("rpc server stopped");
}
