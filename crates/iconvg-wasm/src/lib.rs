//! IconVG WASM - WebAssembly bindings for the IconVG encoder
//!
//! This crate exposes the iconvg-core encoder to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `encoder` - Streaming encoder handle (`JsEncoder`)
//! - `encode` - One-shot encoding from a command list
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEncoder } from '@iconvg/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const enc = new JsEncoder(undefined);
//! enc.start_path(0, 0, 0);
//! enc.abs_line_to(1, 1);
//! enc.close_path_end_path();
//! const ivg = enc.bytes();
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod encoder;

// Re-export public types
pub use encode::encode_icon;
pub use encoder::JsEncoder;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
