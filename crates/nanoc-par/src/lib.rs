//! nanoc-par - the parser and AST (spec component C3).
//!
//! Turns a token stream into an [`ast::Ast`]: a recursive-descent parser
//! with one method per precedence level, producing an arena of nodes
//! addressed by [`ast::NodeId`] rather than an owned tree.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{
    Ast, BinOp, BinOpNode, BlockNode, FunctionCallNode, FunctionDeclNode, FunctionDefNode,
    ForNode, IfNode, Node, NodeId, NumNode, ReturnNode, RetType, TerOpNode, UnOp, UnOpNode,
    VarNode, WhileNode,
};
pub use error::ParseError;
pub use parser::{parse, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_lex::tokenize;
    use nanoc_util::FileId;

    fn parse_src(src: &str) -> Ast {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        parse(&tokens).unwrap()
    }

    #[test]
    fn parses_minimal_function_def() {
        let ast = parse_src("int main(void) { return 0; }");
        assert_eq!(ast.items.len(), 1);
        match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => {
                assert_eq!(f.return_type, RetType::Int);
                assert_eq!(f.params.len(), 0);
                assert_eq!(f.body.len(), 1);
            }
            other => panic!("expected FunctionDef, got {other:?}"),
        }
    }

    #[test]
    fn distinguishes_declaration_from_definition() {
        let ast = parse_src("int f(int x); int f(int x) { return x; }");
        assert_eq!(ast.items.len(), 2);
        assert!(matches!(ast.get(ast.items[0]), Node::FunctionDecl(_)));
        assert!(matches!(ast.get(ast.items[1]), Node::FunctionDef(_)));
    }

    #[test]
    fn assignment_is_right_associative() {
        let ast = parse_src("int main(void) { int a; int b; a = b = 3; return a; }");
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[2]) {
            Node::Var(v) => {
                assert!(v.is_assignment);
                match ast.get(v.init.unwrap()) {
                    Node::Var(inner) => assert!(inner.is_assignment),
                    other => panic!("expected nested assignment, got {other:?}"),
                }
            }
            other => panic!("expected Var assignment, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_on_literal_folds_at_parse_time() {
        let ast = parse_src("int main(void) { return -5; }");
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => match ast.get(r.expr.unwrap()) {
                Node::Num(n) => assert_eq!(n.value, -5),
                other => panic!("expected folded Num, got {other:?}"),
            },
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn ternary_binds_looser_than_logical_or() {
        let ast = parse_src("int main(void) { return 1 || 0 ? 2 : 3; }");
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => match ast.get(r.expr.unwrap()) {
                Node::TerOp(t) => {
                    assert!(matches!(ast.get(t.condition), Node::BinOp(b) if b.op == BinOp::Or));
                }
                other => panic!("expected TerOp, got {other:?}"),
            },
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        let ast = parse_src("int main(void) { return 10 - 3 - 2; }");
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => match ast.get(r.expr.unwrap()) {
                Node::BinOp(outer) => {
                    assert_eq!(outer.op, BinOp::Sub);
                    match ast.get(outer.left) {
                        Node::BinOp(inner) => assert_eq!(inner.op, BinOp::Sub),
                        other => panic!("expected left-nested Sub, got {other:?}"),
                    }
                }
                other => panic!("expected BinOp, got {other:?}"),
            },
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_permits_all_clauses_optional() {
        let ast = parse_src("int main(void) { for (;;) { break; } return 0; }");
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::For(f) => {
                assert!(f.init.is_none());
                assert!(f.condition.is_none());
                assert!(f.update.is_none());
            }
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let ast = parse_src(
            "int main(void) { if (1) if (0) return 1; else return 2; return 3; }",
        );
        let body = match ast.get(ast.items[0]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::If(outer) => match ast.get(outer.then_branch) {
                Node::If(inner) => assert!(inner.else_branch.is_some()),
                other => panic!("expected nested If, got {other:?}"),
            },
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn function_call_with_no_args_parses() {
        let ast = parse_src("int g(void); int main(void) { return g(); }");
        let body = match ast.get(ast.items[1]) {
            Node::FunctionDef(f) => &f.body,
            _ => panic!("expected function def"),
        };
        match ast.get(body[0]) {
            Node::Return(r) => match ast.get(r.expr.unwrap()) {
                Node::FunctionCall(call) => assert!(call.args.is_empty()),
                other => panic!("expected FunctionCall, got {other:?}"),
            },
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        let tokens = tokenize("int main(void) { return 0 }", FileId::DUMMY).unwrap();
        assert!(parse(&tokens).is_err());
    }
}
