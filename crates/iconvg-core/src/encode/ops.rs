//! Drawing opcode table.

/// Path segment kinds that can be buffered while in drawing mode.
///
/// The SVG path letter for each kind is given in its doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawOp {
    /// `L`
    AbsLineTo,
    /// `l`
    RelLineTo,
    /// `T`
    AbsSmoothQuadTo,
    /// `t`
    RelSmoothQuadTo,
    /// `Q`
    AbsQuadTo,
    /// `q`
    RelQuadTo,
    /// `S`
    AbsSmoothCubeTo,
    /// `s`
    RelSmoothCubeTo,
    /// `C`
    AbsCubeTo,
    /// `c`
    RelCubeTo,
    /// `A`
    AbsArcTo,
    /// `a`
    RelArcTo,
    /// `Z`: close the path and return to styling mode.
    ClosePathEndPath,
    /// `Y`: close the path and start a new one at an absolute point.
    ClosePathAbsMoveTo,
    /// `y`: close the path and start a new one at a relative point.
    ClosePathRelMoveTo,
    /// `H`
    AbsHLineTo,
    /// `h`
    RelHLineTo,
    /// `V`
    AbsVLineTo,
    /// `v`
    RelVLineTo,
}

/// Encoding parameters for one [`DrawOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSpec {
    /// Opcode for a run of one. A run of `m` uses `opcode_base + m - 1`.
    pub opcode_base: u8,
    /// Longest run a single opcode can carry.
    pub max_rep_count: u8,
    /// Arguments per repetition.
    pub n_args: usize,
}

impl OpcodeSpec {
    const fn new(opcode_base: u8, max_rep_count: u8, n_args: usize) -> Self {
        Self {
            opcode_base,
            max_rep_count,
            n_args,
        }
    }
}

impl DrawOp {
    /// Every drawing op, ordered by opcode base.
    pub const ALL: [DrawOp; 19] = [
        DrawOp::AbsLineTo,
        DrawOp::RelLineTo,
        DrawOp::AbsSmoothQuadTo,
        DrawOp::RelSmoothQuadTo,
        DrawOp::AbsQuadTo,
        DrawOp::RelQuadTo,
        DrawOp::AbsSmoothCubeTo,
        DrawOp::RelSmoothCubeTo,
        DrawOp::AbsCubeTo,
        DrawOp::RelCubeTo,
        DrawOp::AbsArcTo,
        DrawOp::RelArcTo,
        DrawOp::ClosePathEndPath,
        DrawOp::ClosePathAbsMoveTo,
        DrawOp::ClosePathRelMoveTo,
        DrawOp::AbsHLineTo,
        DrawOp::RelHLineTo,
        DrawOp::AbsVLineTo,
        DrawOp::RelVLineTo,
    ];

    /// Look up the opcode base, maximum run length and arity.
    pub const fn spec(self) -> OpcodeSpec {
        match self {
            DrawOp::AbsLineTo => OpcodeSpec::new(0x00, 32, 2),
            DrawOp::RelLineTo => OpcodeSpec::new(0x20, 32, 2),
            DrawOp::AbsSmoothQuadTo => OpcodeSpec::new(0x40, 16, 2),
            DrawOp::RelSmoothQuadTo => OpcodeSpec::new(0x50, 16, 2),
            DrawOp::AbsQuadTo => OpcodeSpec::new(0x60, 16, 4),
            DrawOp::RelQuadTo => OpcodeSpec::new(0x70, 16, 4),
            DrawOp::AbsSmoothCubeTo => OpcodeSpec::new(0x80, 16, 4),
            DrawOp::RelSmoothCubeTo => OpcodeSpec::new(0x90, 16, 4),
            DrawOp::AbsCubeTo => OpcodeSpec::new(0xa0, 16, 6),
            DrawOp::RelCubeTo => OpcodeSpec::new(0xb0, 16, 6),
            DrawOp::AbsArcTo => OpcodeSpec::new(0xc0, 16, 6),
            DrawOp::RelArcTo => OpcodeSpec::new(0xd0, 16, 6),
            DrawOp::ClosePathEndPath => OpcodeSpec::new(0xe1, 1, 0),
            DrawOp::ClosePathAbsMoveTo => OpcodeSpec::new(0xe2, 1, 2),
            DrawOp::ClosePathRelMoveTo => OpcodeSpec::new(0xe3, 1, 2),
            DrawOp::AbsHLineTo => OpcodeSpec::new(0xe6, 1, 1),
            DrawOp::RelHLineTo => OpcodeSpec::new(0xe7, 1, 1),
            DrawOp::AbsVLineTo => OpcodeSpec::new(0xe8, 1, 1),
            DrawOp::RelVLineTo => OpcodeSpec::new(0xe9, 1, 1),
        }
    }

    /// Number of `f32` arguments buffered per call.
    #[inline]
    pub const fn n_args(self) -> usize {
        self.spec().n_args
    }

    /// Whether arguments use the arc layout (flags and a zero-to-one angle).
    #[inline]
    pub fn is_arc(self) -> bool {
        matches!(self, DrawOp::AbsArcTo | DrawOp::RelArcTo)
    }

    /// Whether the op ends the current path, forcing an immediate flush.
    #[inline]
    pub fn closes_path(self) -> bool {
        matches!(
            self,
            DrawOp::ClosePathEndPath | DrawOp::ClosePathAbsMoveTo | DrawOp::ClosePathRelMoveTo
        )
    }

    /// The SVG path command letter for this op.
    pub fn letter(self) -> char {
        match self {
            DrawOp::AbsLineTo => 'L',
            DrawOp::RelLineTo => 'l',
            DrawOp::AbsSmoothQuadTo => 'T',
            DrawOp::RelSmoothQuadTo => 't',
            DrawOp::AbsQuadTo => 'Q',
            DrawOp::RelQuadTo => 'q',
            DrawOp::AbsSmoothCubeTo => 'S',
            DrawOp::RelSmoothCubeTo => 's',
            DrawOp::AbsCubeTo => 'C',
            DrawOp::RelCubeTo => 'c',
            DrawOp::AbsArcTo => 'A',
            DrawOp::RelArcTo => 'a',
            DrawOp::ClosePathEndPath => 'Z',
            DrawOp::ClosePathAbsMoveTo => 'Y',
            DrawOp::ClosePathRelMoveTo => 'y',
            DrawOp::AbsHLineTo => 'H',
            DrawOp::RelHLineTo => 'h',
            DrawOp::AbsVLineTo => 'V',
            DrawOp::RelVLineTo => 'v',
        }
    }

    /// Find the op whose opcode range contains `opcode`, returning the run
    /// length it encodes.
    pub fn from_opcode(opcode: u8) -> Option<(DrawOp, usize)> {
        DrawOp::ALL.iter().find_map(|&op| {
            let spec = op.spec();
            let offset = opcode.checked_sub(spec.opcode_base)?;
            (offset < spec.max_rep_count).then_some((op, offset as usize + 1))
        })
    }
}
