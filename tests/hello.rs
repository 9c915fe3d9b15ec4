mod common;

use common::run_ok;

#[test]
fn prints_the_sum_of_two_literals() {
    assert_eq!(run_ok("(print (+ 1 2))"), "3\n");
}
