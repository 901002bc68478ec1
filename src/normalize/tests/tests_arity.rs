#![allow(clippy::unwrap_used)]
use rstest::rstest;

use crate::facts::RawParam;
use crate::normalize::arity;

fn req() -> RawParam {
    RawParam::required("a")
}

fn opt() -> RawParam {
    RawParam::optional("b")
}

fn rest() -> RawParam {
    RawParam::rest("rest")
}

fn kw() -> RawParam {
    RawParam::keyword("key")
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![req(), req()], 2)]
#[case(vec![opt(), opt()], 2)]
#[case(vec![req(), rest()], -2)]
#[case(vec![req(), opt(), req(), rest()], -3)]
fn test_arity_laws(#[case] params: Vec<RawParam>, #[case] expected: i32) {
    assert_eq!(arity(&params), expected);
}

#[rstest]
#[case(vec![req()], 1)]
#[case(vec![req(), opt()], 2)]
#[case(vec![rest()], -1)]
#[case(vec![opt(), rest()], -1)]
#[case(vec![req(), req(), req(), rest()], -4)]
fn test_arity_shapes(#[case] params: Vec<RawParam>, #[case] expected: i32) {
    assert_eq!(arity(&params), expected);
}

#[test]
fn test_keyword_only_methods_report_negative_one() {
    assert_eq!(arity(&[kw()]), -1);
    assert_eq!(arity(&[kw(), kw()]), -1);
}

#[test]
fn test_keywords_do_not_affect_positional_arity() {
    assert_eq!(arity(&[req(), kw()]), 1);
    assert_eq!(arity(&[req(), rest(), kw()]), -2);
}
