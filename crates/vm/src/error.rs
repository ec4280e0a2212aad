//! Execution errors.
//!
//! Internally each fault keeps its own variant so tests and trace output
//! can tell them apart. Hosts never see this enum through `run`: the
//! dispatcher collapses the first fault into the error-discriminated
//! return value and halts.

use crate::opcode::{Opcode, TypeTag};

/// Kernel execution fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VmError {
    /// Push with the operand stack already at capacity.
    #[error("Stack overflow: operand stack capacity exceeded")]
    StackOverflow,

    /// An operation needed more operands than the stack holds.
    #[error("Stack underflow: not enough operands on the stack")]
    StackUnderflow,

    /// Variable slot index outside the slot file.
    #[error("Invalid slot access: slot {slot} out of bounds")]
    InvalidSlot { slot: u32 },

    /// An integer lane divided or took a remainder by zero.
    #[error("Integer division by zero in at least one lane")]
    DivisionByZero,

    /// An opcode was invoked with a type tag it does not accept.
    #[error("Opcode {opcode:?} does not accept {tag:?} operands")]
    TypeMismatch { opcode: Opcode, tag: TypeTag },

    /// The instruction payload did not have the shape the opcode needs.
    #[error("Expected {expected} payload")]
    InvalidPayload { expected: &'static str },

    /// `Return` executed before the host declared a return type.
    #[error("Return executed with no return type declared")]
    ReturnTypeUnset,

    /// The program counter ran past the last instruction.
    #[error("Kernel ended without executing Return")]
    MissingReturn,
}
