//! nanoc-sem - name resolution (spec component C4).
//!
//! Binds every non-declaring `var` node to the declaration it refers
//! to, honoring lexical scope, and checks the handful of whole-program
//! rules that only make sense once every top-level item has been seen:
//! global redefinition, parameter-count limits, and `main`'s return
//! type.

pub mod error;
pub mod resolution;
pub mod resolver;
pub mod scope;

pub use error::{ResolveError, SemError, SemanticError};
pub use resolution::Resolution;
pub use resolver::resolve;

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_lex::tokenize;
    use nanoc_par::parse;
    use nanoc_util::FileId;

    fn resolve_src(src: &str) -> Result<Resolution, SemError> {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let ast = parse(&tokens).unwrap();
        resolve(&ast)
    }

    #[test]
    fn resolves_local_to_its_declaration() {
        assert!(resolve_src("int main(void) { int x = 1; return x; }").is_ok());
    }

    #[test]
    fn undeclared_identifier_is_an_error() {
        assert!(matches!(
            resolve_src("int main(void) { return y; }"),
            Err(SemError::Resolve(ResolveError::UndeclaredIdentifier { .. }))
        ));
    }

    #[test]
    fn inner_scope_shadows_outer_and_restores_on_exit() {
        let result = resolve_src(
            "int main(void) { int x = 1; { int x = 2; x = 3; } return x; }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn for_init_variable_is_not_visible_after_the_loop() {
        assert!(matches!(
            resolve_src("int main(void) { for (int i = 0; i < 1; i = i + 1) {} return i; }"),
            Err(SemError::Resolve(ResolveError::UndeclaredIdentifier { .. }))
        ));
    }

    #[test]
    fn global_initializer_replaces_bare_declaration() {
        assert!(resolve_src("int x; int x = 5; int main(void) { return x; }").is_ok());
    }

    #[test]
    fn two_initializing_global_definitions_is_an_error() {
        assert!(matches!(
            resolve_src("int x = 1; int x = 2; int main(void) { return x; }"),
            Err(SemError::Resolve(ResolveError::MultipleGlobalInitializers { .. }))
        ));
    }

    #[test]
    fn non_literal_global_initializer_is_rejected() {
        assert!(matches!(
            resolve_src("int y; int x = y; int main(void) { return x; }"),
            Err(SemError::Semantic(SemanticError::NonLiteralGlobalInitializer { .. }))
        ));
    }

    #[test]
    fn more_than_four_parameters_is_rejected() {
        assert!(matches!(
            resolve_src("int f(int a, int b, int c, int d, int e) { return a; }"),
            Err(SemError::Semantic(SemanticError::TooManyParameters { .. }))
        ));
    }

    #[test]
    fn main_declared_void_is_rejected() {
        assert!(matches!(
            resolve_src("void main(void) { }"),
            Err(SemError::Semantic(SemanticError::MainMustReturnInt { .. }))
        ));
    }

    #[test]
    fn call_with_wrong_argument_count_is_rejected() {
        assert!(matches!(
            resolve_src("int f(int a); int main(void) { return f(1, 2); }"),
            Err(SemError::Semantic(SemanticError::ArgumentCountMismatch { .. }))
        ));
    }

    #[test]
    fn call_to_undeclared_function_is_rejected() {
        assert!(matches!(
            resolve_src("int main(void) { return g(); }"),
            Err(SemError::Resolve(ResolveError::UndeclaredFunction { .. }))
        ));
    }

    #[test]
    fn recursive_call_resolves_against_its_own_forward_declaration() {
        assert!(resolve_src(
            "int fib(int n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }"
        )
        .is_ok());
    }
}
