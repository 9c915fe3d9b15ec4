mod common;

use common::run_ok;

/// Arguments are thunked, so a side effect inside an argument only fires
/// (at most) once, and only when the parameter is actually demanded.
#[test]
fn used_argument_is_forced_exactly_once() {
    assert_eq!(
        run_ok(r#"(def f a b (do (print a) b)) (print (f (do (print "E") 1) 2))"#),
        "E\n2\n"
    );
}

/// If a parameter is never referenced in the body, its argument
/// expression is never forced, so its side effects never run.
#[test]
fn unused_argument_is_never_forced() {
    assert_eq!(
        run_ok(r#"(def f a b b) (print (f (print "should not print") 7))"#),
        "7\n"
    );
}

/// Referencing the same parameter twice must evaluate its argument at
/// most once — the second reference returns the memoised result.
#[test]
fn repeated_reference_to_the_same_parameter_forces_once() {
    assert_eq!(
        run_ok(r#"(def twice a (do (print a) (print a))) (twice (do (print "forced") 9))"#),
        "forced\n9\n9\n"
    );
}
