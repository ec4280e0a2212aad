//! The VM and its dispatch loop.
//!
//! A [`Vm`] borrows an immutable instruction sequence and owns everything
//! else: program counter, operand stack, slot file, RNG state and the
//! return buffer. `run` executes to completion synchronously; the host
//! sees no intermediate state, only the final return value. After a
//! fault the VM should be `reset` before being reused.

use lockstep_foundation::{LaneRng, LANES};
use serde::{Deserialize, Serialize};

use crate::error::VmError;
use crate::handlers::Flow;
use crate::opcode::Instruction;
use crate::registry::handler_for;
use crate::stack::{OperandStack, SlotFile};

/// Return type a host declares before running a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnType {
    /// The kernel leaves integer lanes on top.
    I32,
    /// The kernel leaves float lanes on top.
    F32,
    /// The kernel leaves a lane mask on top.
    Bool,
    /// No type declared; `Return` faults. This is also what the buffer
    /// reports after any fault.
    Error,
}

/// Result of running a kernel: one value per lane, or an error.
///
/// The discriminant is the host-declared [`ReturnType`] unless execution
/// faulted, in which case it is `Error` regardless of what was declared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReturnValue {
    /// Integer result lanes.
    I32([i32; LANES]),
    /// Float result lanes.
    F32([f32; LANES]),
    /// Mask result lanes, `-1` or `0` per lane.
    Bool([i32; LANES]),
    /// The kernel faulted; no lanes are valid.
    Error,
}

impl ReturnValue {
    /// Whether this value reports a fault.
    pub fn is_error(&self) -> bool {
        matches!(self, ReturnValue::Error)
    }
}

/// Lane-parallel kernel interpreter.
pub struct Vm<'k> {
    code: &'k [Instruction],
    pc: usize,
    pub(crate) stack: OperandStack,
    pub(crate) slots: SlotFile,
    pub(crate) rng: LaneRng,
    pub(crate) return_type: ReturnType,
    pub(crate) retval: ReturnValue,
}

impl<'k> Vm<'k> {
    /// Create a VM over a borrowed instruction sequence.
    ///
    /// The stack starts empty, every variable slot is zeroed and the RNG
    /// is in its fixed initial state. No return type is declared yet;
    /// call [`set_return_type`](Self::set_return_type) before
    /// [`run`](Self::run).
    pub fn new(code: &'k [Instruction]) -> Self {
        Self {
            code,
            pc: 0,
            stack: OperandStack::new(),
            slots: SlotFile::new(),
            rng: LaneRng::new(),
            return_type: ReturnType::Error,
            retval: ReturnValue::Error,
        }
    }

    /// Declare the type `Return` will materialize.
    ///
    /// Declaring [`ReturnType::Error`] is the same as not declaring at
    /// all: `Return` faults.
    pub fn set_return_type(&mut self, return_type: ReturnType) {
        self.return_type = return_type;
    }

    /// Execute until the kernel returns or faults.
    ///
    /// Instructions retire strictly in program order. The first failing
    /// handler stamps the return buffer with [`ReturnValue::Error`] and
    /// halts; nothing after it executes. Running past the last
    /// instruction without a `Return` is a fault as well.
    pub fn run(&mut self) -> &ReturnValue {
        loop {
            let Some(instruction) = self.code.get(self.pc) else {
                tracing::debug!(pc = self.pc, error = %VmError::MissingReturn, "kernel faulted");
                self.retval = ReturnValue::Error;
                return &self.retval;
            };
            tracing::trace!(pc = self.pc, opcode = ?instruction.opcode, "dispatch");
            match handler_for(instruction.opcode)(self, instruction) {
                Ok(Flow::Continue) => self.pc += 1,
                Ok(Flow::Return) => return &self.retval,
                Err(error) => {
                    tracing::debug!(
                        pc = self.pc,
                        opcode = ?instruction.opcode,
                        %error,
                        "kernel faulted"
                    );
                    self.retval = ReturnValue::Error;
                    return &self.retval;
                }
            }
        }
    }

    /// Restore the VM to the state it was constructed in.
    ///
    /// Program counter, stack, slots and return buffer are cleared and
    /// the RNG is re-seeded with the fixed construction seed, so a reset
    /// VM replays a deterministic kernel identically. The declared return
    /// type is cleared too; declare it again before the next `run`.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.stack.clear();
        self.slots.clear();
        self.rng.reseed();
        self.return_type = ReturnType::Error;
        self.retval = ReturnValue::Error;
        tracing::debug!("vm reset");
    }
}
