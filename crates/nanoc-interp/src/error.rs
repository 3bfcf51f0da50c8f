use nanoc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InterpError {
    #[error("division by zero at line {}, column {}", span.line, span.column)]
    DivisionByZero { span: Span },

    #[error("modulo by zero at line {}, column {}", span.line, span.column)]
    ModuloByZero { span: Span },

    #[error("call to undefined function '{name}' at line {}, column {}", span.line, span.column)]
    UndefinedFunction { name: String, span: Span },

    #[error("'break' outside a loop at line {}, column {}", span.line, span.column)]
    BreakOutsideLoop { span: Span },

    #[error("'continue' outside a loop at line {}, column {}", span.line, span.column)]
    ContinueOutsideLoop { span: Span },
}
