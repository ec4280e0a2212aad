//! Immediate payload encoding for instructions.
//!
//! The payload carries the one immediate an instruction may need: a typed
//! literal for `PushConst` or a variable slot index for `LoadVar` /
//! `StoreVar`. Handlers decode the shape they expect; a mismatch is a
//! runtime fault, not a silent reinterpretation.

use serde::{Deserialize, Serialize};

use crate::error::VmError;

/// Variable slot identifier.
///
/// Indexes the per-type slot arrays of the slot file. The same index
/// names three independent storage locations, one per scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot(
    /// Zero-based index into the slot file.
    pub u32,
);

impl Slot {
    /// Create a new slot reference.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the slot index.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Immediate payload of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// No immediate; the opcode ignores the payload.
    None,
    /// Integer literal for `PushConst I32`.
    I32(i32),
    /// Float literal for `PushConst F32`.
    F32(f32),
    /// Boolean literal for `PushConst Bool`.
    Bool(bool),
    /// Variable slot for `LoadVar` / `StoreVar`.
    Slot(Slot),
}

/// Helper to expect a specific payload shape.
fn expect_payload<T>(
    payload: &Payload,
    expected: &'static str,
    map: impl FnOnce(&Payload) -> Option<T>,
) -> Result<T, VmError> {
    map(payload).ok_or(VmError::InvalidPayload { expected })
}

/// Decode an integer literal payload.
pub(crate) fn payload_i32(payload: &Payload) -> Result<i32, VmError> {
    expect_payload(payload, "integer literal", |p| {
        if let Payload::I32(value) = p {
            Some(*value)
        } else {
            None
        }
    })
}

/// Decode a float literal payload.
pub(crate) fn payload_f32(payload: &Payload) -> Result<f32, VmError> {
    expect_payload(payload, "float literal", |p| {
        if let Payload::F32(value) = p {
            Some(*value)
        } else {
            None
        }
    })
}

/// Decode a boolean literal payload.
pub(crate) fn payload_bool(payload: &Payload) -> Result<bool, VmError> {
    expect_payload(payload, "boolean literal", |p| {
        if let Payload::Bool(value) = p {
            Some(*value)
        } else {
            None
        }
    })
}

/// Decode a slot payload.
pub(crate) fn payload_slot(payload: &Payload) -> Result<Slot, VmError> {
    expect_payload(payload, "slot index", |p| {
        if let Payload::Slot(slot) = p {
            Some(*slot)
        } else {
            None
        }
    })
}
