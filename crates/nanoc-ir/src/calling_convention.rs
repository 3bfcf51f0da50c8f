//! Windows x64 calling convention, for the IR→asm prototype lowering.
//!
//! Same shape as a System V ABI handler, different register set and
//! shadow-space rule per the Microsoft x64 ABI this compiler targets.
//! The IR path only ever lowers zero-argument functions today, so only
//! the return register and the shadow-space constant are actually
//! exercised; the argument table is carried for when the builder grows
//! parameter support.

/// Windows x64 calling convention handler.
pub struct WindowsX64Abi;

impl WindowsX64Abi {
    /// Integer/pointer argument registers, in order. Windows x64 passes
    /// the first four in registers (a System V counterpart would use
    /// six: `rdi, rsi, rdx, rcx, r8, r9`).
    pub const ARG_REGS: [&'static str; 4] = ["%rcx", "%rdx", "%r8", "%r9"];

    pub const RET_REG: &'static str = "%rax";

    /// Every call site reserves 32 bytes of "shadow space" for the
    /// callee to spill its register arguments into, even when it takes
    /// fewer than four.
    pub const SHADOW_SPACE: u32 = 32;

    pub fn arg_register(index: usize) -> Option<&'static str> {
        Self::ARG_REGS.get(index).copied()
    }

    pub fn is_stack_arg(index: usize) -> bool {
        index >= Self::ARG_REGS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_four_arguments_are_register_passed() {
        assert_eq!(WindowsX64Abi::arg_register(0), Some("%rcx"));
        assert_eq!(WindowsX64Abi::arg_register(3), Some("%r9"));
        assert!(!WindowsX64Abi::is_stack_arg(3));
    }

    #[test]
    fn fifth_argument_spills_to_the_stack() {
        assert_eq!(WindowsX64Abi::arg_register(4), None);
        assert!(WindowsX64Abi::is_stack_arg(4));
    }
}
