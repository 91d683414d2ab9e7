//! The IconVG encoder state machine.

use super::buffer::{encode_coordinate, encode_natural, encode_real, encode_zero_to_one};
use super::ops::DrawOp;
use super::types::{EncodeError, Mode};
use crate::Metadata;
use tracing::{debug, trace, warn};

/// Magic bytes that start every IconVG file.
pub const MAGIC: [u8; 4] = [0x89, b'I', b'V', b'G'];

/// Metadata chunk identifier for the view box.
const MID_VIEW_BOX: u32 = 8;

const OPCODE_START_PATH: u8 = 0xc0;
const OPCODE_SET_LOD: u8 = 0xc7;

const SELECTOR_MASK: u8 = 0x3f;
const NATURAL_SELECTOR_TAG: u8 = 0x40;
const MAX_SELECTOR_ADJUSTMENT: i32 = 6;

const ARC_LARGE_ARC_FLAG: u32 = 0x01;
const ARC_SWEEP_FLAG: u32 = 0x02;

const INITIAL_CAPACITY: usize = 1024;

/// Mutable state of a healthy encoder.
#[derive(Debug)]
struct EncoderState {
    buf: Vec<u8>,
    /// Reused to measure metadata chunks before writing their length.
    scratch: Vec<u8>,

    mode: Mode,
    draw_op: Option<DrawOp>,
    /// Always a whole number of `draw_op` argument tuples.
    draw_args: Vec<f32>,

    c_sel: u8,
    n_sel: u8,
    lod0: f32,
    lod1: f32,
}

#[derive(Debug)]
enum State {
    Ok(EncoderState),
    /// The first error, plus the state at the time it happened. The state's
    /// buffers are recycled by the next reset.
    Failed {
        error: EncodeError,
        recycled: EncoderState,
    },
}

/// An IconVG encoder.
///
/// Styling operations (`set_*`, `start_path`) are only valid outside a path
/// and drawing operations only inside one. Misuse latches an error instead of
/// panicking: later operations become no-ops and [`Encoder::bytes`] returns
/// the first error.
#[derive(Debug)]
pub struct Encoder {
    state: State,
    metadata: Metadata,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Metadata::default())
    }
}

impl EncoderState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            scratch: Vec::new(),
            mode: Mode::Styling,
            draw_op: None,
            draw_args: Vec::new(),
            c_sel: 0,
            n_sel: 0,
            lod0: 0.0,
            lod1: f32::INFINITY,
        }
    }

    /// Return to the initial state, keeping buffer capacity.
    fn clear(&mut self) {
        self.buf.clear();
        self.scratch.clear();
        self.mode = Mode::Styling;
        self.draw_op = None;
        self.draw_args.clear();
        self.c_sel = 0;
        self.n_sel = 0;
        self.lod0 = 0.0;
        self.lod1 = f32::INFINITY;
    }

    fn write_header(&mut self, metadata: &Metadata) -> Result<(), EncodeError> {
        if metadata.has_suggested_palette() {
            return Err(EncodeError::UnsupportedFeature("suggested palette"));
        }

        self.buf.extend_from_slice(&MAGIC);

        let has_view_box = !metadata.view_box.is_default();
        let n_chunks = u32::from(has_view_box);
        encode_natural(&mut self.buf, n_chunks);

        if has_view_box {
            let vb = metadata.view_box;
            self.write_metadata_chunk(MID_VIEW_BOX, |chunk| {
                encode_coordinate(chunk, vb.min[0]);
                encode_coordinate(chunk, vb.min[1]);
                encode_coordinate(chunk, vb.max[0]);
                encode_coordinate(chunk, vb.max[1]);
            });
        }

        debug!(chunks = n_chunks, "iconvg header written");
        Ok(())
    }

    /// Write one length-prefixed metadata chunk. The length covers the chunk
    /// identifier and the payload.
    fn write_metadata_chunk(&mut self, mid: u32, payload: impl FnOnce(&mut Vec<u8>)) {
        self.scratch.clear();
        encode_natural(&mut self.scratch, mid);
        payload(&mut self.scratch);

        encode_natural(&mut self.buf, self.scratch.len() as u32);
        self.buf.extend_from_slice(&self.scratch);
        self.scratch.clear();
    }

    fn require(&self, mode: Mode) -> Result<(), EncodeError> {
        match (mode, self.mode) {
            (Mode::Styling, Mode::Drawing) => Err(EncodeError::styling_op_in_drawing_mode()),
            (Mode::Drawing, Mode::Styling) => Err(EncodeError::drawing_op_in_styling_mode()),
            _ => Ok(()),
        }
    }

    fn draw(&mut self, op: DrawOp, args: [f32; 6]) -> Result<(), EncodeError> {
        self.require(Mode::Drawing)?;

        if self.draw_op != Some(op) {
            self.flush_draw_ops();
        }
        self.draw_op = Some(op);
        self.draw_args.extend_from_slice(&args[..op.n_args()]);

        if op.closes_path() {
            if op == DrawOp::ClosePathEndPath {
                self.mode = Mode::Styling;
            }
            self.flush_draw_ops();
        }
        Ok(())
    }

    /// Emit the pending run as opcode groups of at most `max_rep_count`
    /// tuples each. The opcode's low bits carry the group length minus one.
    fn flush_draw_ops(&mut self) {
        let Some(op) = self.draw_op.take() else {
            return;
        };
        let spec = op.spec();

        if spec.n_args == 0 {
            self.buf.push(spec.opcode_base);
            trace!(op = %op.letter(), "flushed draw op");
        } else {
            let group_len = spec.n_args * usize::from(spec.max_rep_count);
            for group in self.draw_args.chunks(group_len) {
                let m = group.len() / spec.n_args;
                self.buf.push(spec.opcode_base + (m as u8 - 1));
                for tuple in group.chunks_exact(spec.n_args) {
                    encode_draw_args(&mut self.buf, op, tuple);
                }
                trace!(op = %op.letter(), run = m, "flushed draw op group");
            }
        }

        self.draw_args.clear();
    }
}

fn encode_draw_args(buf: &mut Vec<u8>, op: DrawOp, tuple: &[f32]) {
    if op.is_arc() {
        encode_coordinate(buf, tuple[0]);
        encode_coordinate(buf, tuple[1]);
        encode_zero_to_one(buf, tuple[2]);
        encode_natural(buf, tuple[3] as u32);
        encode_coordinate(buf, tuple[4]);
        encode_coordinate(buf, tuple[5]);
    } else {
        for &arg in tuple {
            encode_coordinate(buf, arg);
        }
    }
}

fn arc_flags(large_arc: bool, sweep: bool) -> f32 {
    let mut flags = 0;
    if large_arc {
        flags |= ARC_LARGE_ARC_FLAG;
    }
    if sweep {
        flags |= ARC_SWEEP_FLAG;
    }
    flags as f32
}

impl Encoder {
    /// Create an encoder and write the header for `metadata`.
    pub fn new(metadata: Metadata) -> Self {
        let mut enc = Self {
            state: State::Ok(EncoderState::with_capacity(INITIAL_CAPACITY)),
            metadata: Metadata::default(),
        };
        enc.reset(metadata);
        enc
    }

    /// Discard everything written so far, including any latched error, and
    /// start a new file for `metadata`. Buffer capacity is kept.
    pub fn reset(&mut self, metadata: Metadata) {
        let placeholder = State::Ok(EncoderState::with_capacity(0));
        let mut state = match std::mem::replace(&mut self.state, placeholder) {
            State::Ok(state) | State::Failed { recycled: state, .. } => state,
        };
        state.clear();

        let header = state.write_header(&metadata);
        self.metadata = metadata;
        self.state = State::Ok(state);
        if let Err(error) = header {
            self.latch(error);
        }
    }

    /// The metadata passed to the last reset.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The encoded file, or the first error.
    ///
    /// Segments of a path that has not been closed yet are still buffered and
    /// are not part of the returned bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, EncodeError> {
        match &self.state {
            State::Ok(state) => Ok(state.buf.clone()),
            State::Failed { error, .. } => Err(error.clone()),
        }
    }

    /// Like [`Encoder::bytes`], without copying the buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        match self.state {
            State::Ok(state) => Ok(state.buf),
            State::Failed { error, .. } => Err(error),
        }
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<&EncodeError> {
        match &self.state {
            State::Ok(_) => None,
            State::Failed { error, .. } => Some(error),
        }
    }

    fn current(&self) -> &EncoderState {
        match &self.state {
            State::Ok(state) | State::Failed { recycled: state, .. } => state,
        }
    }

    pub fn mode(&self) -> Mode {
        self.current().mode
    }

    /// Current color register selector (6 bits).
    pub fn color_selector(&self) -> u8 {
        self.current().c_sel
    }

    /// Current natural number register selector (6 bits).
    pub fn natural_selector(&self) -> u8 {
        self.current().n_sel
    }

    /// Current level-of-detail window `[lod0, lod1)`.
    pub fn level_of_detail(&self) -> (f32, f32) {
        let state = self.current();
        (state.lod0, state.lod1)
    }

    fn latch(&mut self, error: EncodeError) {
        warn!(%error, "iconvg encoder failed, ignoring further operations");
        let placeholder = State::Ok(EncoderState::with_capacity(0));
        self.state = match std::mem::replace(&mut self.state, placeholder) {
            State::Ok(recycled) => State::Failed { error, recycled },
            failed => failed,
        };
    }

    /// Run `op` unless an error is already latched, latching its error.
    fn run(&mut self, op: impl FnOnce(&mut EncoderState) -> Result<(), EncodeError>) {
        let State::Ok(state) = &mut self.state else {
            return;
        };
        if let Err(error) = op(state) {
            self.latch(error);
        }
    }

    fn styling(&mut self, op: impl FnOnce(&mut EncoderState)) {
        self.run(|state| {
            state.require(Mode::Styling)?;
            op(state);
            Ok(())
        });
    }

    fn draw(&mut self, op: DrawOp, args: [f32; 6]) {
        self.run(|state| state.draw(op, args));
    }

    // ------------------------------------------------------------------------
    // Styling ops
    // ------------------------------------------------------------------------

    /// Select the color register used by following paths.
    pub fn set_color_selector(&mut self, c_sel: u8) {
        self.styling(|state| {
            state.c_sel = c_sel & SELECTOR_MASK;
            state.buf.push(state.c_sel);
        });
    }

    /// Select the natural number register used by following paths.
    pub fn set_natural_selector(&mut self, n_sel: u8) {
        self.styling(|state| {
            state.n_sel = n_sel & SELECTOR_MASK;
            state.buf.push(state.n_sel | NATURAL_SELECTOR_TAG);
        });
    }

    /// Restrict following paths to the level-of-detail window `[lod0, lod1)`.
    pub fn set_level_of_detail(&mut self, lod0: f32, lod1: f32) {
        self.styling(|state| {
            state.lod0 = lod0;
            state.lod1 = lod1;
            state.buf.push(OPCODE_SET_LOD);
            encode_real(&mut state.buf, lod0);
            encode_real(&mut state.buf, lod1);
        });
    }

    /// Start a path at `(x, y)` and enter drawing mode.
    ///
    /// `adj` (0 to 6) is the color selector adjustment the path is filled
    /// with.
    pub fn start_path(&mut self, adj: i32, x: f32, y: f32) {
        self.run(|state| {
            state.require(Mode::Styling)?;
            if !(0..=MAX_SELECTOR_ADJUSTMENT).contains(&adj) {
                return Err(EncodeError::InvalidArgument {
                    name: "selector adjustment",
                    value: i64::from(adj),
                });
            }
            state.buf.push(OPCODE_START_PATH + adj as u8);
            encode_coordinate(&mut state.buf, x);
            encode_coordinate(&mut state.buf, y);
            state.mode = Mode::Drawing;
            Ok(())
        });
    }

    // ------------------------------------------------------------------------
    // Drawing ops
    // ------------------------------------------------------------------------

    /// Horizontal line to an absolute x.
    pub fn abs_h_line_to(&mut self, x: f32) {
        self.draw(DrawOp::AbsHLineTo, [x, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Horizontal line by a relative x offset.
    pub fn rel_h_line_to(&mut self, x: f32) {
        self.draw(DrawOp::RelHLineTo, [x, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Vertical line to an absolute y.
    pub fn abs_v_line_to(&mut self, y: f32) {
        self.draw(DrawOp::AbsVLineTo, [y, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Vertical line by a relative y offset.
    pub fn rel_v_line_to(&mut self, y: f32) {
        self.draw(DrawOp::RelVLineTo, [y, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Line to an absolute point.
    pub fn abs_line_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::AbsLineTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Line to a relative point.
    pub fn rel_line_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::RelLineTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Quadratic Bézier to an absolute point, reflecting the previous control point.
    pub fn abs_smooth_quad_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::AbsSmoothQuadTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Quadratic Bézier to a relative point, reflecting the previous control point.
    pub fn rel_smooth_quad_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::RelSmoothQuadTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Quadratic Bézier to an absolute point.
    pub fn abs_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.draw(DrawOp::AbsQuadTo, [x1, y1, x, y, 0.0, 0.0]);
    }

    /// Quadratic Bézier to a relative point.
    pub fn rel_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.draw(DrawOp::RelQuadTo, [x1, y1, x, y, 0.0, 0.0]);
    }

    /// Cubic Bézier to an absolute point, with the first control point reflected from the previous segment.
    pub fn abs_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) {
        self.draw(DrawOp::AbsSmoothCubeTo, [x2, y2, x, y, 0.0, 0.0]);
    }

    /// Cubic Bézier to a relative point, with the first control point reflected from the previous segment.
    pub fn rel_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) {
        self.draw(DrawOp::RelSmoothCubeTo, [x2, y2, x, y, 0.0, 0.0]);
    }

    /// Cubic Bézier to an absolute point.
    pub fn abs_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.draw(DrawOp::AbsCubeTo, [x1, y1, x2, y2, x, y]);
    }

    /// Cubic Bézier to a relative point.
    pub fn rel_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.draw(DrawOp::RelCubeTo, [x1, y1, x2, y2, x, y]);
    }

    /// Elliptical arc to an absolute point. `x_axis_rotation` is measured in
    /// turns, in `[0, 1]`.
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
        let flags = arc_flags(large_arc, sweep);
        self.draw(DrawOp::AbsArcTo, [rx, ry, x_axis_rotation, flags, x, y]);
    }

    /// Elliptical arc to a relative point. `x_axis_rotation` is measured in
    /// turns, in `[0, 1]`.
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
        let flags = arc_flags(large_arc, sweep);
        self.draw(DrawOp::RelArcTo, [rx, ry, x_axis_rotation, flags, x, y]);
    }

    /// Close the path and return to styling mode.
    pub fn close_path_end_path(&mut self) {
        self.draw(DrawOp::ClosePathEndPath, [0.0; 6]);
    }

    /// Close the path and start another at an absolute point.
    pub fn close_path_abs_move_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::ClosePathAbsMoveTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }

    /// Close the path and start another at a relative point.
    pub fn close_path_rel_move_to(&mut self, x: f32, y: f32) {
        self.draw(DrawOp::ClosePathRelMoveTo, [x, y, 0.0, 0.0, 0.0, 0.0]);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
