//! Kernel container.
//!
//! A kernel is a straight-line instruction sequence ending in `Return`.
//! This type is just the container hosts hand to the VM; producing the
//! instructions (by compiler or by hand) is outside the interpreter's
//! concern.

use serde::{Deserialize, Serialize};

use crate::opcode::Instruction;

/// A compiled kernel: the flat instruction sequence the VM executes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kernel {
    instructions: Vec<Instruction>,
}

impl Kernel {
    /// Create an empty kernel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a kernel from a pre-built instruction sequence.
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Append an instruction.
    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// The instruction sequence, as the VM consumes it.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the kernel has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
