mod common;

use common::{run_err, run_ok};

#[test]
fn let_binding_is_visible_to_later_statements_in_the_same_scope() {
    assert_eq!(
        run_ok("(do (let x 5) (print x) (print (* x x)))"),
        "5\n25\n"
    );
}

/// A `let` made inside `do` must not leak into the enclosing scope once
/// the `do` returns.
#[test]
fn let_inside_do_does_not_escape_to_the_enclosing_scope() {
    run_err("(do (let x 1)) (print x)");
}

/// A `let` at the top level persists across later top-level statements:
/// each one extends the same program-wide scope rather than a fresh one
/// per statement.
#[test]
fn top_level_let_persists_across_later_statements() {
    assert_eq!(run_ok("(let x 1) (let y 2) (print (+ x y))"), "3\n");
}

/// The argument thunk captures the call site's context, not the callee's
/// (empty) starting context.
#[test]
fn argument_thunk_captures_the_call_sites_bindings() {
    assert_eq!(
        run_ok("(def f y y) (do (let x 10) (print (f x)))"),
        "10\n"
    );
}

/// A `let` cannot see itself: its captured context is a snapshot taken
/// before the binding was pushed.
#[test]
fn let_cannot_reference_its_own_name() {
    run_err("(do (let x x) (print x))");
}

/// A later `let` in the same scope must not retroactively become visible
/// inside an earlier one's captured context.
#[test]
fn earlier_let_does_not_see_a_later_sibling() {
    run_err("(do (let x y) (let y 1) (print x))");
}
