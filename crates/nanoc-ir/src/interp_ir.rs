//! An interpreter over the IR itself.
//!
//! Cross-checks the IR path's output against the AST interpreter's;
//! this is that second leg, mirroring `interp_ir` from the reference
//! driver's `interp.cpp`.

use crate::error::IrError;
use crate::ir::{Instruction, IrBinOp, IrUnOp, Program, RegisterId};
use std::collections::HashMap;

pub fn interp_ir(program: &Program) -> Result<i64, IrError> {
    let mut registers: HashMap<RegisterId, i64> = HashMap::new();
    let mut result = 0;

    for instruction in &program.instructions {
        match instruction {
            Instruction::FunctionStart { .. } => {}
            Instruction::Const { dst, value } => {
                registers.insert(*dst, *value);
            }
            Instruction::Unary { op, dst, src } => {
                let v = registers[src];
                let folded = match op {
                    IrUnOp::Neg => v.wrapping_neg(),
                    IrUnOp::BitNot => !v,
                    IrUnOp::Not => i64::from(v == 0),
                };
                registers.insert(*dst, folded);
            }
            Instruction::Binary { op, dst, left, right } => {
                let l = registers[left];
                let r = registers[right];
                let folded = match op {
                    IrBinOp::Add => l.wrapping_add(r),
                    IrBinOp::Sub => l.wrapping_sub(r),
                    IrBinOp::Mul => l.wrapping_mul(r),
                    IrBinOp::Div => {
                        if r == 0 {
                            return Err(IrError::DivisionByZero);
                        }
                        l.wrapping_div(r)
                    }
                    IrBinOp::Mod => {
                        if r == 0 {
                            return Err(IrError::ModuloByZero);
                        }
                        l.wrapping_rem(r)
                    }
                };
                registers.insert(*dst, folded);
            }
            Instruction::Return => result = 0,
            Instruction::ReturnValue { src } => result = registers[src],
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use nanoc_lex::tokenize;
    use nanoc_util::FileId;

    fn run(src: &str) -> i64 {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let program = build(&tokens).unwrap();
        interp_ir(&program).unwrap()
    }

    #[test]
    fn constant_return() {
        assert_eq!(run("int main(void) { return 7; }"), 7);
    }

    #[test]
    fn nested_unary_operators() {
        assert_eq!(run("int main(void) { return - -1; }"), 1);
        assert_eq!(run("int main(void) { return !0; }"), 1);
        assert_eq!(run("int main(void) { return ~0; }"), -1);
    }

    #[test]
    fn bare_return_yields_zero() {
        assert_eq!(run("void main(void) { return; }"), 0);
    }
}
