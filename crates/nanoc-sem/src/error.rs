use nanoc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("use of undeclared identifier '{name}' at line {}, column {}", span.line, span.column)]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("call to undeclared function '{name}' at line {}, column {}", span.line, span.column)]
    UndeclaredFunction { name: String, span: Span },

    #[error("global '{name}' initialized more than once at line {}, column {}", span.line, span.column)]
    MultipleGlobalInitializers { name: String, span: Span },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SemanticError {
    #[error("global '{name}' must be initialized with a literal at line {}, column {}", span.line, span.column)]
    NonLiteralGlobalInitializer { name: String, span: Span },

    #[error("function '{name}' has {count} parameters, more than the 4 supported at line {}, column {}", span.line, span.column)]
    TooManyParameters { name: String, count: usize, span: Span },

    #[error("'main' must return 'int', found 'void' at line {}, column {}", span.line, span.column)]
    MainMustReturnInt { span: Span },

    #[error("call to '{name}' passes {found} arguments, expected {expected} at line {}, column {}", span.line, span.column)]
    ArgumentCountMismatch {
        name: String,
        found: usize,
        expected: usize,
        span: Span,
    },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SemError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}
