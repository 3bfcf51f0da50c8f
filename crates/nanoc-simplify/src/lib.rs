//! nanoc-simplify - demonstration constant-folding pass (spec component C8).
//!
//! Not part of the default `build`/`interp` pipeline; reachable through
//! the driver's `--emit simplified-ast` flag as a worked example of a
//! structural AST rewrite.

pub mod simplify;

pub use simplify::simplify;

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_lex::tokenize;
    use nanoc_par::{parse, Node};
    use nanoc_util::FileId;

    fn folded_return_value(src: &str) -> i64 {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let mut ast = parse(&tokens).unwrap();
        simplify(&mut ast);
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            other => panic!("expected FunctionDef, got {other:?}"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => match ast.get(r.expr.unwrap()) {
                Node::Num(n) => n.value,
                other => panic!("expected folded Num, got {other:?}"),
            },
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn folds_addition_of_two_literals() {
        assert_eq!(folded_return_value("int main(void) { return 2 + 3; }"), 5);
    }

    #[test]
    fn folds_subtraction_multiplication_and_division() {
        assert_eq!(folded_return_value("int main(void) { return 10 - 3; }"), 7);
        assert_eq!(folded_return_value("int main(void) { return 4 * 5; }"), 20);
        assert_eq!(folded_return_value("int main(void) { return 20 / 4; }"), 5);
    }

    #[test]
    fn fixpoint_iterates_through_nested_binops() {
        assert_eq!(
            folded_return_value("int main(void) { return (1 + 2) * (3 + 4); }"),
            21
        );
    }

    #[test]
    fn division_by_a_literal_zero_is_left_unfolded() {
        let tokens = tokenize("int main(void) { return 1 / 0; }", FileId::DUMMY).unwrap();
        let mut ast = parse(&tokens).unwrap();
        simplify(&mut ast);
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => assert!(matches!(ast.get(r.expr.unwrap()), Node::BinOp(_))),
            other => panic!("expected Return, got {other:?}"),
        }
    }
}
