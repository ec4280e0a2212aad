//! Opcode handlers.
//!
//! One handler per opcode. Each reads its operands from the top of the
//! stack, applies the typed lane-wise operation, and writes the result
//! back in place; binary operations leave their result where `Top-1` was,
//! so the stack shrinks by exactly the documented amount. Handlers reject
//! type tags their opcode does not accept.
//!
//! All lane work goes through the foundation vector types; nothing here
//! iterates lanes by hand.

use lockstep_foundation::{LaneF32, LaneI32, LaneMask};

use crate::error::VmError;
use crate::executor::{ReturnType, ReturnValue, Vm};
use crate::opcode::{Instruction, TypeTag};
use crate::payload::{payload_bool, payload_f32, payload_i32, payload_slot};

/// What a handler tells the dispatch loop to do next.
pub(crate) enum Flow {
    /// Advance the program counter and keep going.
    Continue,
    /// The return buffer is filled; stop successfully.
    Return,
}

/// Functional interface for an opcode execution handler.
pub(crate) type Handler = fn(&mut Vm<'_>, &Instruction) -> Result<Flow, VmError>;

fn type_mismatch(instruction: &Instruction) -> VmError {
    VmError::TypeMismatch {
        opcode: instruction.opcode,
        tag: instruction.tag,
    }
}

/// Shared shape for `Add`/`Sub`/`Mul`/`Div`: pop the right operand, apply
/// the typed operation against the slot below, write the result there.
fn binary_numeric(
    vm: &mut Vm<'_>,
    instruction: &Instruction,
    int_op: fn(LaneI32, LaneI32) -> Result<LaneI32, VmError>,
    float_op: fn(LaneF32, LaneF32) -> LaneF32,
) -> Result<Flow, VmError> {
    let b = vm.stack.pop()?;
    let a = vm.stack.top()?;
    let result = match instruction.tag {
        TypeTag::I32 => int_op(a.as_i32(), b.as_i32())?.to_bits(),
        TypeTag::F32 => float_op(a.as_f32(), b.as_f32()).to_bits(),
        TypeTag::Bool => return Err(type_mismatch(instruction)),
    };
    vm.stack.replace_top(result)?;
    Ok(Flow::Continue)
}

/// Shared shape for the six comparisons: like [`binary_numeric`] but the
/// result is a lane mask.
fn binary_compare(
    vm: &mut Vm<'_>,
    instruction: &Instruction,
    int_cmp: fn(LaneI32, LaneI32) -> LaneMask,
    float_cmp: fn(LaneF32, LaneF32) -> LaneMask,
) -> Result<Flow, VmError> {
    let b = vm.stack.pop()?;
    let a = vm.stack.top()?;
    let mask = match instruction.tag {
        TypeTag::I32 => int_cmp(a.as_i32(), b.as_i32()),
        TypeTag::F32 => float_cmp(a.as_f32(), b.as_f32()),
        TypeTag::Bool => return Err(type_mismatch(instruction)),
    };
    vm.stack.replace_top(mask.to_bits())?;
    Ok(Flow::Continue)
}

/// Shared shape for `And`/`Or`: mask operands only.
fn binary_mask(
    vm: &mut Vm<'_>,
    instruction: &Instruction,
    op: fn(LaneMask, LaneMask) -> LaneMask,
) -> Result<Flow, VmError> {
    if instruction.tag != TypeTag::Bool {
        return Err(type_mismatch(instruction));
    }
    let b = vm.stack.pop()?;
    let a = vm.stack.top()?;
    vm.stack.replace_top(op(a.as_mask(), b.as_mask()).to_bits())?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_push_const(
    vm: &mut Vm<'_>,
    instruction: &Instruction,
) -> Result<Flow, VmError> {
    let bits = match instruction.tag {
        TypeTag::I32 => LaneI32::splat(payload_i32(&instruction.payload)?).to_bits(),
        TypeTag::F32 => LaneF32::splat(payload_f32(&instruction.payload)?).to_bits(),
        TypeTag::Bool => LaneMask::splat(payload_bool(&instruction.payload)?).to_bits(),
    };
    vm.stack.push(bits)?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_load_var(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    let slot = payload_slot(&instruction.payload)?;
    let bits = match instruction.tag {
        TypeTag::I32 => vm.slots.load_i32(slot)?.to_bits(),
        TypeTag::F32 => vm.slots.load_f32(slot)?.to_bits(),
        TypeTag::Bool => vm.slots.load_mask(slot)?.to_bits(),
    };
    vm.stack.push(bits)?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_store_var(
    vm: &mut Vm<'_>,
    instruction: &Instruction,
) -> Result<Flow, VmError> {
    let slot = payload_slot(&instruction.payload)?;
    let bits = vm.stack.pop()?;
    match instruction.tag {
        TypeTag::I32 => vm.slots.store_i32(slot, bits.as_i32())?,
        TypeTag::F32 => vm.slots.store_f32(slot, bits.as_f32())?,
        TypeTag::Bool => vm.slots.store_mask(slot, bits.as_mask())?,
    }
    Ok(Flow::Continue)
}

pub(crate) fn handle_add(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_numeric(vm, instruction, |a, b| Ok(a + b), |a, b| a + b)
}

pub(crate) fn handle_sub(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_numeric(vm, instruction, |a, b| Ok(a - b), |a, b| a - b)
}

pub(crate) fn handle_mul(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_numeric(vm, instruction, |a, b| Ok(a * b), |a, b| a * b)
}

pub(crate) fn handle_div(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_numeric(
        vm,
        instruction,
        |a, b| a.checked_div(b).ok_or(VmError::DivisionByZero),
        |a, b| a / b,
    )
}

pub(crate) fn handle_mod(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    if instruction.tag != TypeTag::I32 {
        return Err(type_mismatch(instruction));
    }
    let b = vm.stack.pop()?;
    let a = vm.stack.top()?;
    let result = a
        .as_i32()
        .checked_rem(b.as_i32())
        .ok_or(VmError::DivisionByZero)?;
    vm.stack.replace_top(result.to_bits())?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_cmp_lt(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_lt, LaneF32::cmp_lt)
}

pub(crate) fn handle_cmp_lte(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_le, LaneF32::cmp_le)
}

pub(crate) fn handle_cmp_gt(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_gt, LaneF32::cmp_gt)
}

pub(crate) fn handle_cmp_gte(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_ge, LaneF32::cmp_ge)
}

pub(crate) fn handle_cmp_eq(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_eq, LaneF32::cmp_eq)
}

pub(crate) fn handle_cmp_ne(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_compare(vm, instruction, LaneI32::cmp_ne, LaneF32::cmp_ne)
}

pub(crate) fn handle_and(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_mask(vm, instruction, |a, b| a & b)
}

pub(crate) fn handle_or(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    binary_mask(vm, instruction, |a, b| a | b)
}

pub(crate) fn handle_not(vm: &mut Vm<'_>, instruction: &Instruction) -> Result<Flow, VmError> {
    if instruction.tag != TypeTag::Bool {
        return Err(type_mismatch(instruction));
    }
    let top = vm.stack.top()?;
    vm.stack.replace_top((!top.as_mask()).to_bits())?;
    Ok(Flow::Continue)
}

/// `Select` blends raw bits, so one path serves all three type tags. The
/// mask below the two value operands decides lane by lane.
pub(crate) fn handle_select(vm: &mut Vm<'_>, _instruction: &Instruction) -> Result<Flow, VmError> {
    let other = vm.stack.pop()?;
    let then = vm.stack.pop()?;
    let mask = vm.stack.top()?.as_mask();
    vm.stack.replace_top(mask.select(then, other))?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_rand(vm: &mut Vm<'_>, _instruction: &Instruction) -> Result<Flow, VmError> {
    let value = vm.rng.next_f32();
    vm.stack.push(value.to_bits())?;
    Ok(Flow::Continue)
}

pub(crate) fn handle_return(vm: &mut Vm<'_>, _instruction: &Instruction) -> Result<Flow, VmError> {
    let top = vm.stack.top()?;
    vm.retval = match vm.return_type {
        ReturnType::I32 => ReturnValue::I32(top.as_i32().0),
        ReturnType::F32 => ReturnValue::F32(top.as_f32().0),
        ReturnType::Bool => ReturnValue::Bool(top.as_mask().0),
        ReturnType::Error => return Err(VmError::ReturnTypeUnset),
    };
    Ok(Flow::Return)
}
