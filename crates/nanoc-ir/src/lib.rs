//! The linear IR path (spec §4.6): a second, narrower front end that
//! builds straight from tokens (no AST), an interpreter over it used
//! as a ground-truth cross-check, and a prototype IR→assembly lowering.
//!
//! This path is deliberately not as capable as the AST path in
//! [`nanoc_gen`] — see [`builder`] for exactly what it covers.

pub mod builder;
pub mod calling_convention;
pub mod error;
pub mod interp_ir;
pub mod ir;
pub mod lower;

pub use builder::{build, IrBuilder};
pub use calling_convention::WindowsX64Abi;
pub use error::IrError;
pub use interp_ir::interp_ir;
pub use ir::{Instruction, IrBinOp, IrRetType, IrUnOp, Program, RegisterId};
pub use lower::lower_to_asm;
