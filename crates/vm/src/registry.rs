//! Opcode registry linking opcodes to handlers.
//!
//! Dispatch is a jump table indexed by the opcode discriminant: one
//! function-pointer lookup per instruction, constant time, no allocation.
//! The spec list below is the source of truth; the table is built from it
//! once and any gap is a startup panic rather than a silent miss.

use std::sync::OnceLock;

use crate::handlers::{
    handle_add, handle_and, handle_cmp_eq, handle_cmp_gt, handle_cmp_gte, handle_cmp_lt,
    handle_cmp_lte, handle_cmp_ne, handle_div, handle_load_var, handle_mod, handle_mul, handle_not,
    handle_or, handle_push_const, handle_rand, handle_return, handle_select, handle_store_var,
    handle_sub, Handler,
};
use crate::opcode::{Opcode, OPCODE_COUNT};

/// Handler specification for one opcode.
pub(crate) struct OpcodeSpec {
    /// The opcode this specification covers.
    pub opcode: Opcode,
    /// The function executing it.
    pub handler: Handler,
}

/// Master list of opcode specifications.
fn build_specs() -> Vec<OpcodeSpec> {
    use Opcode::*;

    macro_rules! op {
        ($opcode:ident, $handler:ident) => {
            OpcodeSpec {
                opcode: $opcode,
                handler: $handler,
            }
        };
    }

    vec![
        op!(PushConst, handle_push_const),
        op!(LoadVar, handle_load_var),
        op!(StoreVar, handle_store_var),
        op!(Add, handle_add),
        op!(Sub, handle_sub),
        op!(Mul, handle_mul),
        op!(Div, handle_div),
        op!(Mod, handle_mod),
        op!(CmpLt, handle_cmp_lt),
        op!(CmpLte, handle_cmp_lte),
        op!(CmpGt, handle_cmp_gt),
        op!(CmpGte, handle_cmp_gte),
        op!(CmpEq, handle_cmp_eq),
        op!(CmpNe, handle_cmp_ne),
        op!(And, handle_and),
        op!(Or, handle_or),
        op!(Not, handle_not),
        op!(Select, handle_select),
        op!(Rand, handle_rand),
        op!(Return, handle_return),
    ]
}

/// Retrieve the execution handler for an opcode in O(1) time.
///
/// # Panics
///
/// Panics if an opcode has no entry in the spec list.
pub(crate) fn handler_for(opcode: Opcode) -> Handler {
    static HANDLERS: OnceLock<[Handler; OPCODE_COUNT]> = OnceLock::new();
    HANDLERS.get_or_init(|| {
        let mut table: [Option<Handler>; OPCODE_COUNT] = [None; OPCODE_COUNT];
        for spec in build_specs() {
            table[spec.opcode as usize] = Some(spec.handler);
        }
        std::array::from_fn(|index| {
            table[index].unwrap_or_else(|| panic!("Missing handler for opcode index {index}"))
        })
    })[opcode as usize]
}
