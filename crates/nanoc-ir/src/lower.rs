//! IR → x86-64 AT&T assembly lowering (spec §4.6).
//!
//! A prototype: it only has to lower what [`crate::builder`] can
//! produce (constants, unary operators, a single `return`), not the
//! full expression/statement grammar C6's AST-path codegen handles.
//! Every register holds its value in a stack slot addressed via
//! `%rsp`, mirroring the AST path's own convention for locals, and the
//! epilogue follows [`crate::calling_convention::WindowsX64Abi`].

use crate::calling_convention::WindowsX64Abi;
use crate::ir::{Instruction, IrBinOp, IrUnOp, Program};
use std::fmt::Write as _;

/// Lower a [`Program`] to AT&T-syntax assembly text.
pub fn lower_to_asm(program: &Program) -> String {
    let mut out = String::new();
    let slot_count = program
        .instructions
        .iter()
        .filter(|i| {
            matches!(
                i,
                Instruction::Const { .. } | Instruction::Unary { .. } | Instruction::Binary { .. }
            )
        })
        .count();
    let frame_size = WindowsX64Abi::SHADOW_SPACE + 8 * slot_count as u32;

    for instruction in &program.instructions {
        match instruction {
            Instruction::FunctionStart { name, .. } => {
                let _ = writeln!(out, "    .globl {name}");
                let _ = writeln!(out, "{name}:");
                let _ = writeln!(out, "    sub ${frame_size}, %rsp");
            }
            Instruction::Const { dst, value } => {
                let _ = writeln!(out, "    movq ${value}, {}(%rsp)", slot_offset(dst.index()));
            }
            Instruction::Unary { op, dst, src } => {
                let _ = writeln!(out, "    movq {}(%rsp), %rax", slot_offset(src.index()));
                match op {
                    IrUnOp::Neg => {
                        let _ = writeln!(out, "    negq %rax");
                    }
                    IrUnOp::BitNot => {
                        let _ = writeln!(out, "    notq %rax");
                    }
                    IrUnOp::Not => {
                        let _ = writeln!(out, "    cmpq $0, %rax");
                        let _ = writeln!(out, "    sete %al");
                        let _ = writeln!(out, "    movzbq %al, %rax");
                    }
                }
                let _ = writeln!(out, "    movq %rax, {}(%rsp)", slot_offset(dst.index()));
            }
            Instruction::Binary { op, dst, left, right } => {
                let _ = writeln!(out, "    movq {}(%rsp), %rax", slot_offset(left.index()));
                let _ = writeln!(out, "    movq {}(%rsp), %rcx", slot_offset(right.index()));
                match op {
                    IrBinOp::Add => {
                        let _ = writeln!(out, "    addq %rcx, %rax");
                    }
                    IrBinOp::Sub => {
                        let _ = writeln!(out, "    subq %rcx, %rax");
                    }
                    IrBinOp::Mul => {
                        let _ = writeln!(out, "    imulq %rcx, %rax");
                    }
                    IrBinOp::Div => {
                        let _ = writeln!(out, "    cqto");
                        let _ = writeln!(out, "    idivq %rcx");
                    }
                    IrBinOp::Mod => {
                        let _ = writeln!(out, "    cqto");
                        let _ = writeln!(out, "    idivq %rcx");
                        let _ = writeln!(out, "    movq %rdx, %rax");
                    }
                }
                let _ = writeln!(out, "    movq %rax, {}(%rsp)", slot_offset(dst.index()));
            }
            Instruction::Return => {
                let _ = writeln!(out, "    movq $0, {}", WindowsX64Abi::RET_REG);
                let _ = writeln!(out, "    add ${frame_size}, %rsp");
                let _ = writeln!(out, "    ret");
            }
            Instruction::ReturnValue { src } => {
                let _ = writeln!(
                    out,
                    "    movq {}(%rsp), {}",
                    slot_offset(src.index()),
                    WindowsX64Abi::RET_REG
                );
                let _ = writeln!(out, "    add ${frame_size}, %rsp");
                let _ = writeln!(out, "    ret");
            }
        }
    }
    out
}

fn slot_offset(register: u32) -> i64 {
    i64::from(register) * 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use nanoc_lex::tokenize;
    use nanoc_util::FileId;

    #[test]
    fn lowers_a_constant_return() {
        let tokens = tokenize("int main(void) { return 7; }", FileId::DUMMY).unwrap();
        let program = build(&tokens).unwrap();
        let asm = lower_to_asm(&program);
        assert!(asm.contains(".globl main"));
        assert!(asm.contains("ret"));
    }
}
