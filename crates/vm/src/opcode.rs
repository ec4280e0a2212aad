//! Opcode and instruction definitions.
//!
//! An instruction is a fixed-size record: the opcode, the scalar type it
//! operates on, and an immediate payload. Opcodes that take no immediate
//! ignore the payload; `Rand` and `Return` also ignore the type tag.
//!
//! The stack carries no per-slot type information. The tag on each
//! instruction tells its handler how to interpret the lanes it touches,
//! and handlers reject tags they do not support. Producing bytecode whose
//! tags agree from one instruction to the next is the producer's job.

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// Bytecode operation.
///
/// Every opcode applies element-wise across all lanes in one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // === Stack operations ===
    /// Broadcast the payload literal to all lanes of a new top slot.
    PushConst,
    /// Push a copy of the typed variable slot named in the payload.
    LoadVar,
    /// Pop the top of the stack into the typed variable slot named in the payload.
    StoreVar,

    // === Arithmetic ===
    /// Lane-wise `Top-1 + Top`. Integer lanes wrap.
    Add,
    /// Lane-wise `Top-1 - Top`. Integer lanes wrap.
    Sub,
    /// Lane-wise `Top-1 * Top`. Integer lanes wrap.
    Mul,
    /// Lane-wise `Top-1 / Top`. Fails if any integer lane divides by zero.
    Div,
    /// Lane-wise remainder, truncated toward zero. Integer only.
    Mod,

    // === Comparisons (result is a lane mask) ===
    /// Lane-wise `Top-1 < Top`.
    CmpLt,
    /// Lane-wise `Top-1 <= Top`.
    CmpLte,
    /// Lane-wise `Top-1 > Top`.
    CmpGt,
    /// Lane-wise `Top-1 >= Top`.
    CmpGte,
    /// Lane-wise `Top-1 == Top`.
    CmpEq,
    /// Lane-wise `Top-1 != Top`.
    CmpNe,

    // === Logic (lane masks only) ===
    /// Lane-wise mask conjunction.
    And,
    /// Lane-wise mask disjunction.
    Or,
    /// Lane-wise mask complement of `Top`, in place.
    Not,

    // === Branch-free choice ===
    /// Lane-wise `mask ? then : else` over `Top-2` (mask), `Top-1` (then),
    /// `Top` (else).
    Select,

    // === Random ===
    /// Advance the lane RNG and push one float per lane in `[0, 1)`.
    Rand,

    // === Termination ===
    /// Materialize `Top` under the declared return type and stop.
    Return,
}

/// Number of opcodes; sizes the dispatch jump table.
pub(crate) const OPCODE_COUNT: usize = 20;

impl Opcode {
    /// All opcodes, in dispatch-table order.
    pub const ALL: [Opcode; OPCODE_COUNT] = [
        Opcode::PushConst,
        Opcode::LoadVar,
        Opcode::StoreVar,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::CmpLt,
        Opcode::CmpLte,
        Opcode::CmpGt,
        Opcode::CmpGte,
        Opcode::CmpEq,
        Opcode::CmpNe,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Select,
        Opcode::Rand,
        Opcode::Return,
    ];
}

/// Scalar type a typed opcode operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Signed 32-bit two's complement integer.
    I32,
    /// IEEE-754 binary32 float.
    F32,
    /// Lane mask: all-ones true, all-zeros false.
    Bool,
}

/// A single bytecode instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// How the operands' lanes are interpreted.
    pub tag: TypeTag,
    /// Immediate data for the opcodes that take it.
    pub payload: Payload,
}

impl Instruction {
    /// Create an instruction with an immediate payload.
    pub fn new(opcode: Opcode, tag: TypeTag, payload: Payload) -> Self {
        Self {
            opcode,
            tag,
            payload,
        }
    }

    /// Create a payloadless instruction.
    pub fn op(opcode: Opcode, tag: TypeTag) -> Self {
        Self::new(opcode, tag, Payload::None)
    }
}
