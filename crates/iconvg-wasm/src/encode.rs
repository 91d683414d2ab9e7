//! One-shot encoding from a command list.
//!
//! # Example
//!
//! ```typescript
//! import { encode_icon } from '@iconvg/wasm';
//!
//! const ivg = encode_icon(undefined, [
//!   { op: 'startPath', adj: 0, x: 0, y: 0 },
//!   { op: 'absLineTo', x: 1, y: 1 },
//!   { op: 'absLineTo', x: 2, y: 2 },
//!   { op: 'closePathEndPath' },
//! ]);
//! ```

use crate::encoder::{encode_error_to_js, metadata_from_js};
use iconvg_core::{encode_commands, Command};
use wasm_bindgen::prelude::*;

/// Encode a whole icon in one call.
///
/// # Arguments
///
/// * `metadata` - Metadata object, or `undefined` for the defaults
/// * `commands` - Array of `{ op, ...args }` objects, one per encoder operation
///
/// # Errors
///
/// Returns an error if:
/// - The metadata or a command cannot be deserialized
/// - A command is used in the wrong mode
/// - A path start has a selector adjustment outside 0 to 6
/// - The metadata requests a suggested palette
#[wasm_bindgen]
pub fn encode_icon(metadata: JsValue, commands: JsValue) -> Result<Vec<u8>, JsValue> {
    let metadata = metadata_from_js(metadata)?;
    let commands: Vec<Command> = serde_wasm_bindgen::from_value(commands)
        .map_err(|e| JsValue::from_str(&format!("Invalid commands: {}", e)))?;
    encode_commands(metadata, &commands).map_err(encode_error_to_js)
}
