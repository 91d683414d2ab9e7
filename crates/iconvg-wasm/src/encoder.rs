//! Streaming encoder bindings.
//!
//! [`JsEncoder`] wraps the core encoder one method per operation, so
//! JavaScript can build an icon incrementally and collect the bytes at the
//! end.
//!
//! # Example
//!
//! ```typescript
//! import { JsEncoder } from '@iconvg/wasm';
//!
//! const enc = new JsEncoder({ viewBox: { min: [0, 0], max: [48, 48] } });
//! enc.set_color_selector(1);
//! enc.start_path(0, 8, 8);
//! enc.rel_h_line_to(32);
//! enc.rel_v_line_to(32);
//! enc.rel_h_line_to(-32);
//! enc.close_path_end_path();
//! const ivg = enc.bytes();
//! enc.free();
//! ```

use iconvg_core::{EncodeError, Encoder, Metadata};
use wasm_bindgen::prelude::*;

/// Read metadata from a JS object. `undefined` and `null` mean the defaults.
pub(crate) fn metadata_from_js(value: JsValue) -> Result<Metadata, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Metadata::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid metadata: {}", e)))
}

/// Convert an encoder error for JavaScript, logging it to the console first.
pub(crate) fn encode_error_to_js(error: EncodeError) -> JsValue {
    let message = error.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// JavaScript handle to an IconVG encoder.
#[wasm_bindgen]
pub struct JsEncoder {
    inner: Encoder,
}

#[wasm_bindgen]
impl JsEncoder {
    /// Create an encoder for the given metadata object.
    ///
    /// # Arguments
    /// * `metadata` - `{ viewBox?: { min: [x, y], max: [x, y] } }`, or
    ///   `undefined` for the defaults
    ///
    /// # Errors
    /// Returns error if metadata cannot be deserialized
    #[wasm_bindgen(constructor)]
    pub fn new(metadata: JsValue) -> Result<JsEncoder, JsValue> {
        Ok(Self::with_metadata(metadata_from_js(metadata)?))
    }

    /// Start over with new metadata, clearing any latched error.
    pub fn reset(&mut self, metadata: JsValue) -> Result<(), JsValue> {
        self.inner.reset(metadata_from_js(metadata)?);
        Ok(())
    }

    /// The encoded file so far.
    ///
    /// # Errors
    /// Returns the first error any operation latched
    pub fn bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.bytes().map_err(encode_error_to_js)
    }

    /// The latched error message, if any.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.error().map(ToString::to_string)
    }

    /// `"styling"` or `"drawing"`
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn color_selector(&self) -> u8 {
        self.inner.color_selector()
    }

    #[wasm_bindgen(getter)]
    pub fn natural_selector(&self) -> u8 {
        self.inner.natural_selector()
    }

    #[wasm_bindgen(getter)]
    pub fn lod0(&self) -> f32 {
        self.inner.level_of_detail().0
    }

    #[wasm_bindgen(getter)]
    pub fn lod1(&self) -> f32 {
        self.inner.level_of_detail().1
    }

    pub fn set_color_selector(&mut self, sel: u8) {
        self.inner.set_color_selector(sel);
    }

    pub fn set_natural_selector(&mut self, sel: u8) {
        self.inner.set_natural_selector(sel);
    }

    pub fn set_level_of_detail(&mut self, lod0: f32, lod1: f32) {
        self.inner.set_level_of_detail(lod0, lod1);
    }

    pub fn start_path(&mut self, adj: i32, x: f32, y: f32) {
        self.inner.start_path(adj, x, y);
    }

    pub fn abs_h_line_to(&mut self, x: f32) {
        self.inner.abs_h_line_to(x);
    }

    pub fn rel_h_line_to(&mut self, x: f32) {
        self.inner.rel_h_line_to(x);
    }

    pub fn abs_v_line_to(&mut self, y: f32) {
        self.inner.abs_v_line_to(y);
    }

    pub fn rel_v_line_to(&mut self, y: f32) {
        self.inner.rel_v_line_to(y);
    }

    pub fn abs_line_to(&mut self, x: f32, y: f32) {
        self.inner.abs_line_to(x, y);
    }

    pub fn rel_line_to(&mut self, x: f32, y: f32) {
        self.inner.rel_line_to(x, y);
    }

    pub fn abs_smooth_quad_to(&mut self, x: f32, y: f32) {
        self.inner.abs_smooth_quad_to(x, y);
    }

    pub fn rel_smooth_quad_to(&mut self, x: f32, y: f32) {
        self.inner.rel_smooth_quad_to(x, y);
    }

    pub fn abs_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inner.abs_quad_to(x1, y1, x, y);
    }

    pub fn rel_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inner.rel_quad_to(x1, y1, x, y);
    }

    pub fn abs_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) {
        self.inner.abs_smooth_cube_to(x2, y2, x, y);
    }

    pub fn rel_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) {
        self.inner.rel_smooth_cube_to(x2, y2, x, y);
    }

    pub fn abs_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inner.abs_cube_to(x1, y1, x2, y2, x, y);
    }

    pub fn rel_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inner.rel_cube_to(x1, y1, x2, y2, x, y);
    }

    /// Elliptical arc. `x_axis_rotation` is in turns, not degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn abs_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) {
        self.inner
            .abs_arc_to(rx, ry, x_axis_rotation, large_arc, sweep, x, y);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rel_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) {
        self.inner
            .rel_arc_to(rx, ry, x_axis_rotation, large_arc, sweep, x, y);
    }

    pub fn close_path_end_path(&mut self) {
        self.inner.close_path_end_path();
    }

    pub fn close_path_abs_move_to(&mut self, x: f32, y: f32) {
        self.inner.close_path_abs_move_to(x, y);
    }

    pub fn close_path_rel_move_to(&mut self, x: f32, y: f32) {
        self.inner.close_path_rel_move_to(x, y);
    }
}

impl JsEncoder {
    pub(crate) fn with_metadata(metadata: Metadata) -> Self {
        Self {
            inner: Encoder::new(metadata),
        }
    }

    pub(crate) fn inner(&self) -> &Encoder {
        &self.inner
    }
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn view_box_object(min: [f32; 2], max: [f32; 2]) -> JsValue {
        let view_box = js_sys::Object::new();
        js_sys::Reflect::set(&view_box, &"min".into(), &serde_wasm_bindgen::to_value(&min).unwrap())
            .unwrap();
        js_sys::Reflect::set(&view_box, &"max".into(), &serde_wasm_bindgen::to_value(&max).unwrap())
            .unwrap();
        let metadata = js_sys::Object::new();
        js_sys::Reflect::set(&metadata, &"viewBox".into(), &view_box).unwrap();
        metadata.into()
    }

    #[wasm_bindgen_test]
    fn test_new_with_undefined_metadata() {
        let enc = JsEncoder::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(enc.bytes().unwrap(), vec![0x89, b'I', b'V', b'G', 0x00]);
    }

    #[wasm_bindgen_test]
    fn test_new_with_view_box_object() {
        let enc = JsEncoder::new(view_box_object([0.0, 0.0], [48.0, 48.0])).unwrap();
        assert_eq!(
            enc.bytes().unwrap(),
            vec![0x89, b'I', b'V', b'G', 0x02, 0x0a, 0x10, 0x80, 0x80, 0xe0, 0xe0]
        );
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_metadata() {
        let result = JsEncoder::new(JsValue::from_f64(42.0));
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_bytes_surfaces_latched_error() {
        let mut enc = JsEncoder::new(JsValue::NULL).unwrap();
        enc.close_path_end_path();
        let err = enc.bytes().unwrap_err();
        assert_eq!(
            err.as_string().as_deref(),
            Some("iconvg: drawing op in styling mode")
        );
    }

    #[wasm_bindgen_test]
    fn test_reset_clears_error() {
        let mut enc = JsEncoder::new(JsValue::NULL).unwrap();
        enc.close_path_end_path();
        enc.reset(JsValue::UNDEFINED).unwrap();
        assert!(enc.error().is_none());
        assert!(enc.bytes().is_ok());
    }
}
