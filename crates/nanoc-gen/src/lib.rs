//! AST → x86-64 AT&T assembly code generation (spec §4.5, component C6).
//!
//! Consumes a resolved [`nanoc_par::Ast`] plus its [`nanoc_sem::Resolution`]
//! and produces assembly text for the Windows x64 calling convention,
//! targeting an external assembler/linker.

pub mod codegen;
pub mod frame;

pub use codegen::{generate, CodeGenerator};
pub use frame::FrameLayout;

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_lex::tokenize;
    use nanoc_par::parse;
    use nanoc_sem::resolve;
    use nanoc_util::FileId;

    fn generate_src(src: &str) -> String {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let ast = parse(&tokens).unwrap();
        let resolution = resolve(&ast).unwrap();
        generate(&ast, &resolution)
    }

    #[test]
    fn empty_main_has_no_frame_and_returns_zero() {
        let asm = generate_src("int main(void) { }");
        assert!(asm.contains(".globl main"));
        assert!(asm.contains("sub $32, %rsp"));
        assert!(asm.contains("mov $0, %rax"));
        assert!(asm.contains("add $32, %rsp"));
    }

    #[test]
    fn trailing_return_elides_the_separate_epilogue() {
        let asm = generate_src("int main(void) { return 5; }");
        // Exactly one `ret` — the return's own epilogue, no second one.
        assert_eq!(asm.matches("ret").count(), 1);
    }

    #[test]
    fn locals_and_binops_each_get_a_slot() {
        let asm = generate_src("int main(void) { int a = 1; int b = a + 2; return b; }");
        assert!(asm.contains("sub $56, %rsp")); // 32 + 8*3 (a, b, the binop)
    }

    #[test]
    fn global_without_initializer_is_zero_filled() {
        let asm = generate_src("int counter; int main(void) { return counter; } ");
        assert!(asm.contains(".data"));
        assert!(asm.contains("counter:\n  .zero 8"));
        assert!(asm.contains("counter(%rip)"));
    }

    #[test]
    fn global_with_initializer_emits_its_value() {
        let asm = generate_src("int counter = 7; int main(void) { return counter; }");
        assert!(asm.contains("counter:\n  .long 7"));
    }

    #[test]
    fn subtraction_reverses_evaluation_order() {
        let asm = generate_src("int main(void) { return 10 - 3; }");
        assert!(asm.contains("sub %rcx, %rax"));
    }

    #[test]
    fn comparison_uses_reversed_cmp_operands() {
        let asm = generate_src("int main(void) { return 1 < 2; }");
        assert!(asm.contains("cmp %rax, %rcx"));
        assert!(asm.contains("setl %al"));
    }

    #[test]
    fn short_circuit_and_allocates_a_branch_around_the_right_side() {
        let asm = generate_src("int f(void); int main(void) { return 0 && f(); }");
        assert!(asm.contains("jne and_rhs_"));
    }

    #[test]
    fn break_jumps_to_the_loop_end_label() {
        let asm = generate_src("int main(void) { for (;;) { break; } return 0; }");
        assert!(asm.contains("jmp for_end_"));
    }

    #[test]
    fn continue_in_for_jumps_to_the_update_label_not_the_condition() {
        let asm = generate_src(
            "int main(void) { for (int i = 0; i < 10; i = i + 1) { continue; } return 0; }",
        );
        assert!(asm.contains("jmp for_update_"));
    }

    #[test]
    fn function_call_moves_args_into_the_windows_x64_registers() {
        let asm = generate_src("int add(int a, int b); int main(void) { return add(1, 2); }");
        assert!(asm.contains("mov %rax, %rcx"));
        assert!(asm.contains("mov %rax, %rdx"));
        assert!(asm.contains("callq add"));
    }

    #[test]
    fn non_main_function_falling_off_the_end_traps() {
        let asm = generate_src("int f(void) { int x = 1; }");
        assert!(asm.contains("int $3"));
    }
}
