//! Front-end orchestration: wires the stages in C1-C8 together the way
//! `original_source/++c/main.cpp` drives `lex -> ast -> gen`, fanned out
//! over the `--emit` choices spec §9's design notes call out (tokens,
//! AST, simplified AST, AT&T asm via the AST path, AT&T asm via the IR
//! path).

use crate::error::DriverError;
use nanoc_par::Ast;
use nanoc_sem::Resolution;
use nanoc_util::FileId;

/// A source file, already read off disk and registered with a `FileId`.
pub struct Source<'a> {
    pub file: FileId,
    pub text: &'a str,
}

/// Lex, parse and resolve a source file. Every later stage (interpreter,
/// AST codegen, simplifier) starts from this pair.
pub fn front_end(source: Source<'_>) -> Result<(Ast, Resolution), DriverError> {
    let tokens = nanoc_lex::tokenize(source.text, source.file)?;
    let ast = nanoc_par::parse(&tokens)?;
    let resolution = nanoc_sem::resolve(&ast)?;
    Ok((ast, resolution))
}

/// What a `build` invocation should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// The raw token sequence, one per line.
    Tokens,
    /// The parsed AST, pretty-printed.
    Ast,
    /// The AST after the constant-folding simplifier pass (spec §4.7).
    SimplifiedAst,
    /// AT&T assembly via the AST codegen (spec §4.5, the primary path).
    Asm,
    /// AT&T assembly via the prototype IR path (spec §4.6).
    IrAsm,
}

/// Render a single source file per `emit`. Returns text suitable for
/// writing to the chosen output (a file, or stdout).
pub fn render(source: Source<'_>, emit: Emit) -> Result<String, DriverError> {
    match emit {
        Emit::Tokens => {
            let tokens = nanoc_lex::tokenize(source.text, source.file)?;
            Ok(tokens
                .iter()
                .map(|t| format!("{:?}", t.kind))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Emit::Ast => {
            let (ast, _) = front_end(source)?;
            Ok(format!("{ast:#?}"))
        }
        Emit::SimplifiedAst => {
            let tokens = nanoc_lex::tokenize(source.text, source.file)?;
            let mut ast = nanoc_par::parse(&tokens)?;
            nanoc_simplify::simplify(&mut ast);
            Ok(format!("{ast:#?}"))
        }
        Emit::Asm => {
            let (ast, resolution) = front_end(source)?;
            Ok(nanoc_gen::generate(&ast, &resolution))
        }
        Emit::IrAsm => {
            let tokens = nanoc_lex::tokenize(source.text, source.file)?;
            let program = nanoc_ir::build(&tokens)?;
            Ok(nanoc_ir::lower_to_asm(&program))
        }
    }
}

/// Run a source file through the tree-walking interpreter and return
/// `main`'s exit value (spec §4.4, the `--interp` mode).
pub fn interpret(source: Source<'_>) -> Result<i64, DriverError> {
    let (ast, resolution) = front_end(source)?;
    Ok(nanoc_interp::interpret(&ast, &resolution)?)
}
