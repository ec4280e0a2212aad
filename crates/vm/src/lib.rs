//! Lockstep VM - lane-parallel bytecode interpreter.
//!
//! Executes short straight-line "kernels" of typed bytecode where every
//! operand-stack slot and variable slot is a vector of [`LANES`]
//! elements. Each opcode dispatches once and applies its operation
//! element-wise across all lanes, amortizing interpreter overhead over
//! LANES independent evaluations of the same expression - the shape
//! Monte-Carlo style workloads want.
//!
//! # Execution model
//!
//! - Flat operand stack of untyped lane slots; instruction type tags
//!   decide how lanes are interpreted, and handlers reject tags their
//!   opcode does not accept.
//! - Three independent per-type variable slot arrays.
//! - No control flow: kernels run straight through to `Return`.
//! - One error taxon: any fault stamps the return value with its error
//!   discriminant and halts.
//!
//! # Example
//!
//! ```
//! use lockstep_vm::{Instruction, Opcode, Payload, ReturnType, ReturnValue, TypeTag, Vm, LANES};
//!
//! let code = [
//!     Instruction::new(Opcode::PushConst, TypeTag::I32, Payload::I32(21)),
//!     Instruction::new(Opcode::PushConst, TypeTag::I32, Payload::I32(2)),
//!     Instruction::op(Opcode::Mul, TypeTag::I32),
//!     Instruction::op(Opcode::Return, TypeTag::I32),
//! ];
//!
//! let mut vm = Vm::new(&code);
//! vm.set_return_type(ReturnType::I32);
//! assert_eq!(*vm.run(), ReturnValue::I32([42; LANES]));
//! ```

mod error;
mod executor;
mod handlers;
mod kernel;
mod opcode;
mod payload;
mod registry;
mod stack;

pub use error::VmError;
pub use executor::{ReturnType, ReturnValue, Vm};
pub use kernel::Kernel;
pub use opcode::{Instruction, Opcode, TypeTag};
pub use payload::{Payload, Slot};
pub use stack::{OperandStack, SlotFile, MAX_SLOTS, MAX_STACK};

pub use lockstep_foundation::{LaneBits, LaneF32, LaneI32, LaneMask, LaneRng, LANES};
