//! Serializable drawing commands.
//!
//! A [`Command`] mirrors one public [`Encoder`] operation, so a whole icon can
//! be described as data (for example a JSON array coming from JavaScript) and
//! replayed with [`encode_commands`].
//!
//! ```json
//! [
//!   { "op": "startPath", "adj": 0, "x": 0, "y": 0 },
//!   { "op": "absLineTo", "x": 1, "y": 1 },
//!   { "op": "closePathEndPath" }
//! ]
//! ```

use crate::encode::{EncodeError, Encoder};
use crate::Metadata;
use serde::{Deserialize, Serialize};

fn unbounded() -> f32 {
    f32::INFINITY
}

fn is_unbounded(lod: &f32) -> bool {
    *lod == f32::INFINITY
}

/// One encoder operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    SetColorSelector {
        sel: u8,
    },
    SetNaturalSelector {
        sel: u8,
    },
    SetLevelOfDetail {
        #[serde(default)]
        lod0: f32,
        // JSON has no infinity, so an unbounded window omits lod1.
        #[serde(default = "unbounded", skip_serializing_if = "is_unbounded")]
        lod1: f32,
    },
    StartPath {
        adj: i32,
        x: f32,
        y: f32,
    },
    AbsHLineTo {
        x: f32,
    },
    RelHLineTo {
        x: f32,
    },
    AbsVLineTo {
        y: f32,
    },
    RelVLineTo {
        y: f32,
    },
    AbsLineTo {
        x: f32,
        y: f32,
    },
    RelLineTo {
        x: f32,
        y: f32,
    },
    AbsSmoothQuadTo {
        x: f32,
        y: f32,
    },
    RelSmoothQuadTo {
        x: f32,
        y: f32,
    },
    AbsQuadTo {
        x1: f32,
        y1: f32,
        x: f32,
        y: f32,
    },
    RelQuadTo {
        x1: f32,
        y1: f32,
        x: f32,
        y: f32,
    },
    AbsSmoothCubeTo {
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    RelSmoothCubeTo {
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    AbsCubeTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    RelCubeTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    AbsArcTo {
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    },
    RelArcTo {
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    },
    ClosePathEndPath,
    ClosePathAbsMoveTo {
        x: f32,
        y: f32,
    },
    ClosePathRelMoveTo {
        x: f32,
        y: f32,
    },
}

impl Encoder {
    /// Apply a single command.
    pub fn apply(&mut self, command: &Command) {
        match *command {
            Command::SetColorSelector { sel } => self.set_color_selector(sel),
            Command::SetNaturalSelector { sel } => self.set_natural_selector(sel),
            Command::SetLevelOfDetail { lod0, lod1 } => self.set_level_of_detail(lod0, lod1),
            Command::StartPath { adj, x, y } => self.start_path(adj, x, y),
            Command::AbsHLineTo { x } => self.abs_h_line_to(x),
            Command::RelHLineTo { x } => self.rel_h_line_to(x),
            Command::AbsVLineTo { y } => self.abs_v_line_to(y),
            Command::RelVLineTo { y } => self.rel_v_line_to(y),
            Command::AbsLineTo { x, y } => self.abs_line_to(x, y),
            Command::RelLineTo { x, y } => self.rel_line_to(x, y),
            Command::AbsSmoothQuadTo { x, y } => self.abs_smooth_quad_to(x, y),
            Command::RelSmoothQuadTo { x, y } => self.rel_smooth_quad_to(x, y),
            Command::AbsQuadTo { x1, y1, x, y } => self.abs_quad_to(x1, y1, x, y),
            Command::RelQuadTo { x1, y1, x, y } => self.rel_quad_to(x1, y1, x, y),
            Command::AbsSmoothCubeTo { x2, y2, x, y } => self.abs_smooth_cube_to(x2, y2, x, y),
            Command::RelSmoothCubeTo { x2, y2, x, y } => self.rel_smooth_cube_to(x2, y2, x, y),
            Command::AbsCubeTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => self.abs_cube_to(x1, y1, x2, y2, x, y),
            Command::RelCubeTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => self.rel_cube_to(x1, y1, x2, y2, x, y),
            Command::AbsArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => self.abs_arc_to(rx, ry, x_axis_rotation, large_arc, sweep, x, y),
            Command::RelArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => self.rel_arc_to(rx, ry, x_axis_rotation, large_arc, sweep, x, y),
            Command::ClosePathEndPath => self.close_path_end_path(),
            Command::ClosePathAbsMoveTo { x, y } => self.close_path_abs_move_to(x, y),
            Command::ClosePathRelMoveTo { x, y } => self.close_path_rel_move_to(x, y),
        }
    }
}

/// Encode a complete icon from metadata and a command list.
pub fn encode_commands(metadata: Metadata, commands: &[Command]) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new(metadata);
    for command in commands {
        enc.apply(command);
    }
    enc.into_bytes()
}
