//! Test support: a minimal reader for the byte layout the encoder produces.
//!
//! It turns an encoded file back into metadata and a command list so tests can
//! re-encode it and compare bytes.

#![allow(dead_code)]

use iconvg_core::{Command, DrawOp, Metadata, ViewBox, MAGIC};

const MID_VIEW_BOX: u32 = 8;

pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn byte(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let bytes = self.bytes;
        let slice = &bytes[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    /// Read a tagged 1, 2 or 4 byte little-endian value, returning the raw
    /// value and its length.
    fn tagged(&mut self) -> (u32, usize) {
        let first = self.bytes[self.pos];
        match first & 0x03 {
            0x00 | 0x02 => (u32::from(self.byte()), 1),
            0x01 => {
                let b = self.take(2);
                (u32::from(u16::from_le_bytes([b[0], b[1]])), 2)
            }
            _ => {
                let b = self.take(4);
                (u32::from_le_bytes([b[0], b[1], b[2], b[3]]), 4)
            }
        }
    }

    pub fn natural(&mut self) -> u32 {
        match self.tagged() {
            (u, 1) => u >> 1,
            (u, _) => u >> 2,
        }
    }

    pub fn real(&mut self) -> f32 {
        match self.tagged() {
            (u, 1) => (u >> 1) as f32,
            (u, 2) => (u >> 2) as f32,
            (u, _) => f32::from_bits(u & !0x03),
        }
    }

    pub fn coordinate(&mut self) -> f32 {
        match self.tagged() {
            (u, 1) => (u >> 1) as f32 - 64.0,
            (u, 2) => ((u >> 2) as f32 - 128.0 * 64.0) / 64.0,
            (u, _) => f32::from_bits(u & !0x03),
        }
    }

    pub fn zero_to_one(&mut self) -> f32 {
        match self.tagged() {
            (u, 1) => (u >> 1) as f32 * 126.0 / 15120.0,
            (u, 2) => (u >> 2) as f32 * 2.0 / 15120.0,
            (u, _) => f32::from_bits(u & !0x03),
        }
    }
}

/// Decode a file written by the encoder. Panics on anything malformed.
pub fn decode(bytes: &[u8]) -> (Metadata, Vec<Command>) {
    let mut r = Reader::new(bytes);
    assert_eq!(r.take(4), &MAGIC, "bad magic");

    let mut metadata = Metadata::default();
    let n_chunks = r.natural();
    for _ in 0..n_chunks {
        let len = r.natural() as usize;
        let mut chunk = Reader::new(r.take(len));
        match chunk.natural() {
            MID_VIEW_BOX => {
                metadata.view_box = ViewBox::new(
                    chunk.coordinate(),
                    chunk.coordinate(),
                    chunk.coordinate(),
                    chunk.coordinate(),
                );
            }
            mid => panic!("unexpected metadata chunk {}", mid),
        }
        assert!(chunk.is_empty(), "trailing bytes in metadata chunk");
    }

    let mut commands = Vec::new();
    let mut drawing = false;
    while !r.is_empty() {
        let opcode = r.byte();
        if drawing {
            let (op, run) = DrawOp::from_opcode(opcode)
                .unwrap_or_else(|| panic!("bad drawing opcode 0x{:02x}", opcode));
            for _ in 0..run {
                commands.push(read_draw_command(&mut r, op));
            }
            if op == DrawOp::ClosePathEndPath {
                drawing = false;
            }
        } else {
            match opcode {
                0x00..=0x3f => commands.push(Command::SetColorSelector { sel: opcode }),
                0x40..=0x7f => commands.push(Command::SetNaturalSelector { sel: opcode & 0x3f }),
                0xc0..=0xc6 => {
                    commands.push(Command::StartPath {
                        adj: i32::from(opcode - 0xc0),
                        x: r.coordinate(),
                        y: r.coordinate(),
                    });
                    drawing = true;
                }
                0xc7 => commands.push(Command::SetLevelOfDetail {
                    lod0: r.real(),
                    lod1: r.real(),
                }),
                _ => panic!("bad styling opcode 0x{:02x}", opcode),
            }
        }
    }
    (metadata, commands)
}

fn read_draw_command(r: &mut Reader<'_>, op: DrawOp) -> Command {
    match op {
        DrawOp::AbsLineTo => Command::AbsLineTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::RelLineTo => Command::RelLineTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsSmoothQuadTo => Command::AbsSmoothQuadTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::RelSmoothQuadTo => Command::RelSmoothQuadTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsQuadTo => Command::AbsQuadTo {
            x1: r.coordinate(),
            y1: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::RelQuadTo => Command::RelQuadTo {
            x1: r.coordinate(),
            y1: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsSmoothCubeTo => Command::AbsSmoothCubeTo {
            x2: r.coordinate(),
            y2: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::RelSmoothCubeTo => Command::RelSmoothCubeTo {
            x2: r.coordinate(),
            y2: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsCubeTo => Command::AbsCubeTo {
            x1: r.coordinate(),
            y1: r.coordinate(),
            x2: r.coordinate(),
            y2: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::RelCubeTo => Command::RelCubeTo {
            x1: r.coordinate(),
            y1: r.coordinate(),
            x2: r.coordinate(),
            y2: r.coordinate(),
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsArcTo | DrawOp::RelArcTo => {
            let rx = r.coordinate();
            let ry = r.coordinate();
            let x_axis_rotation = r.zero_to_one();
            let flags = r.natural();
            let x = r.coordinate();
            let y = r.coordinate();
            let (large_arc, sweep) = (flags & 0x01 != 0, flags & 0x02 != 0);
            if op == DrawOp::AbsArcTo {
                Command::AbsArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                }
            } else {
                Command::RelArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                }
            }
        }
        DrawOp::ClosePathEndPath => Command::ClosePathEndPath,
        DrawOp::ClosePathAbsMoveTo => Command::ClosePathAbsMoveTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::ClosePathRelMoveTo => Command::ClosePathRelMoveTo {
            x: r.coordinate(),
            y: r.coordinate(),
        },
        DrawOp::AbsHLineTo => Command::AbsHLineTo { x: r.coordinate() },
        DrawOp::RelHLineTo => Command::RelHLineTo { x: r.coordinate() },
        DrawOp::AbsVLineTo => Command::AbsVLineTo { y: r.coordinate() },
        DrawOp::RelVLineTo => Command::RelVLineTo { y: r.coordinate() },
    }
}
