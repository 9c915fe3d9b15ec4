mod common;

use common::run_ok;

/// `?` picks its then-branch when the condition is truthy.
#[test]
fn conditional_evaluates_the_matching_branch() {
    assert_eq!(run_ok(r#"(print (? (= 1 1) "yes" "no"))"#), "yes\n");
}

/// `0` and `NULL` are falsy; an empty string and `ANY` are truthy.
#[test]
fn truthiness_rules_pick_the_expected_branch() {
    assert_eq!(run_ok(r#"(print (? 0 "t" "f"))"#), "f\n");
    assert_eq!(run_ok(r#"(print (? NULL "t" "f"))"#), "f\n");
    assert_eq!(run_ok(r#"(print (? "" "t" "f"))"#), "t\n");
    assert_eq!(run_ok(r#"(print (? ANY "t" "f"))"#), "t\n");
}

/// `match` adopts the first arm whose candidate compares equal.
#[test]
fn match_adopts_the_first_equal_candidate() {
    assert_eq!(
        run_ok(r#"(print (match 2 1 : "one" 2 : "two" 3 : "three"))"#),
        "two\n"
    );
}

/// A `match` with no matching arm evaluates to `NULL`.
#[test]
fn match_falls_through_to_null_when_nothing_matches() {
    assert_eq!(
        run_ok(r#"(? (= (match 3 1 : "a" 2 : "b") NULL) (print "null") (print "not null"))"#),
        "null\n"
    );
}

/// Equality across every primitive kind, including the `ANY` wildcard.
#[test]
fn equality_covers_every_primitive_kind() {
    assert_eq!(run_ok("(print (= ANY 1))"), "TRUE\n");
    assert_eq!(run_ok("(print (= 1 1))"), "TRUE\n");
    assert_eq!(run_ok(r#"(print (= "a" "a"))"#), "TRUE\n");
    assert_eq!(run_ok("(print (= TRUE FALSE))"), "FALSE\n");
    assert_eq!(run_ok("(print (= NULL NULL))"), "TRUE\n");
}
