use super::*;
use crate::test_utils::setup;

fn inst(entries: &[Option<Symbol>]) -> FrontierInstantiation {
    FrontierInstantiation::new(entries.iter().copied())
}

#[test]
fn unspecified_is_compatible_with_anything() {
    let s = setup();
    let five = s.intern("five");
    assert!(is_compatible(&inst(&[None]), &inst(&[Some(five)])));
    assert!(is_compatible(&inst(&[Some(five)]), &inst(&[None])));
}

#[test]
fn different_constants_are_incompatible() {
    let s = setup();
    let five = s.intern("five");
    let seven = s.intern("seven");
    assert!(!is_compatible(&inst(&[Some(five)]), &inst(&[Some(seven)])));
}

#[test]
fn compatibility_checks_every_position() {
    let s = setup();
    let a = s.intern("a");
    let b = s.intern("b");
    let left = inst(&[Some(a), None, Some(b)]);
    let right = inst(&[None, Some(b), Some(a)]);
    assert!(!is_compatible(&left, &right));
    assert!(is_compatible(&left, &inst(&[Some(a), Some(b), None])));
}

#[test]
fn length_mismatch_is_incompatible() {
    assert!(!is_compatible(&inst(&[None]), &inst(&[None, None])));
}

#[test]
fn empty_instantiations_are_compatible() {
    assert!(is_compatible(&inst(&[]), &inst(&[])));
}

#[test]
fn more_general_is_asymmetric() {
    let s = setup();
    let a = s.intern("a");
    let general = inst(&[None, Some(a)]);
    let specific = inst(&[Some(a), Some(a)]);
    assert!(is_more_general_than(&general, &specific));
    assert!(!is_more_general_than(&specific, &general));
}

#[test]
fn more_general_requires_matching_constants() {
    let s = setup();
    let a = s.intern("a");
    let b = s.intern("b");
    assert!(!is_more_general_than(&inst(&[Some(a)]), &inst(&[Some(b)])));
    assert!(is_more_general_than(&inst(&[Some(a)]), &inst(&[Some(a)])));
}

#[test]
fn under_reads_constants_off_partition() {
    let s = setup();
    let x = Variable::new(s.intern("X"));
    let y = Variable::new(s.intern("Y"));
    let a = s.intern("a");
    let p = TermPartition::from_pairs([(Term::Var(x), Term::Const(a))]);

    let read = FrontierInstantiation::under(&p, &[x, y]);
    assert_eq!(read, inst(&[Some(a), None]));
    assert_eq!(read.specified(), 1);
    assert!(!read.is_ground());
}
