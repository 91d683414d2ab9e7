//! IconVG encoding pipeline.
//!
//! This module provides functionality for:
//! - Appending naturals, coordinates, reals and zero-to-one values
//! - Looking up drawing opcodes and their run-length limits
//! - Writing the magic header and metadata chunks
//! - Driving the styling/drawing mode state machine
//!
//! # Architecture
//!
//! Styling ops are written immediately. Drawing ops are buffered while they
//! share a kind, then flushed as one or more run-length opcode groups when the
//! kind changes or the path closes. The first error is latched and every later
//! operation is ignored, so callers only need to check the result of
//! [`Encoder::bytes`].
//!
//! # Examples
//!
//! ```ignore
//! use iconvg_core::encode::Encoder;
//! use iconvg_core::Metadata;
//!
//! let mut enc = Encoder::new(Metadata::default());
//! enc.set_color_selector(2);
//! enc.start_path(0, -16.0, -16.0);
//! enc.rel_h_line_to(32.0);
//! enc.rel_v_line_to(32.0);
//! enc.rel_h_line_to(-32.0);
//! enc.close_path_end_path();
//! let bytes = enc.bytes()?;
//! ```

pub mod buffer;
mod encoder;
mod ops;
mod types;

pub use encoder::{Encoder, MAGIC};
pub use ops::{DrawOp, OpcodeSpec};
pub use types::{EncodeError, Mode};
