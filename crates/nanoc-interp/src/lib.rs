//! nanoc-interp - the reference tree-walking interpreter (spec component C5).
//!
//! Evaluates a resolved AST directly to a 64-bit result; used both as a
//! `--interp` execution mode and as the expected-value side of the
//! interpreter/codegen cross-check (spec §8 invariant 4).

pub mod error;
pub mod interp;

pub use error::InterpError;
pub use interp::{interpret, Interp};

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_lex::tokenize;
    use nanoc_par::parse;
    use nanoc_sem::resolve;
    use nanoc_util::FileId;

    fn run(src: &str) -> Result<i64, InterpError> {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let ast = parse(&tokens).unwrap();
        let resolution = resolve(&ast).unwrap();
        interpret(&ast, &resolution)
    }

    #[test]
    fn returns_a_literal() {
        assert_eq!(run("int main(void) { return 42; }").unwrap(), 42);
    }

    #[test]
    fn empty_main_returns_zero() {
        assert_eq!(run("int main(void) { }").unwrap(), 0);
    }

    #[test]
    fn recursive_fibonacci() {
        let src = "
            int fib(int n) {
                if (n < 2) return n;
                return fib(n - 1) + fib(n - 2);
            }
            int main(void) { return fib(10); }
        ";
        assert_eq!(run(src).unwrap(), 55);
    }

    #[test]
    fn for_loop_accumulates() {
        let src = "
            int main(void) {
                int total = 0;
                for (int i = 0; i < 5; i = i + 1) {
                    total = total + i;
                }
                return total;
            }
        ";
        assert_eq!(run(src).unwrap(), 10);
    }

    #[test]
    fn break_exits_the_innermost_loop_only() {
        let src = "
            int main(void) {
                int count = 0;
                for (int i = 0; i < 10; i = i + 1) {
                    if (i == 3) break;
                    count = count + 1;
                }
                return count;
            }
        ";
        assert_eq!(run(src).unwrap(), 3);
    }

    #[test]
    fn continue_skips_to_the_update_clause() {
        let src = "
            int main(void) {
                int sum = 0;
                for (int i = 0; i < 5; i = i + 1) {
                    if (i == 2) continue;
                    sum = sum + i;
                }
                return sum;
            }
        ";
        assert_eq!(run(src).unwrap(), 8);
    }

    #[test]
    fn logical_and_short_circuits() {
        let src = "
            int g;
            int bump(void) { g = g + 1; return 1; }
            int main(void) {
                int r = 0 && bump();
                return g;
            }
        ";
        assert_eq!(run(src).unwrap(), 0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(
            run("int main(void) { return 1 / 0; }"),
            Err(InterpError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn globals_are_visible_inside_functions() {
        let src = "
            int counter = 10;
            int main(void) { counter = counter + 1; return counter; }
        ";
        assert_eq!(run(src).unwrap(), 11);
    }

    #[test]
    fn ternary_selects_the_right_branch() {
        assert_eq!(
            run("int main(void) { return 1 ? 10 : 20; }").unwrap(),
            10
        );
    }

    #[test]
    fn do_while_runs_body_at_least_once() {
        let src = "
            int main(void) {
                int x = 0;
                do { x = x + 1; } while (0);
                return x;
            }
        ";
        assert_eq!(run(src).unwrap(), 1);
    }
}
