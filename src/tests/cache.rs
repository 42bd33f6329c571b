use super::*;
use crate::test_utils::{cq, rule, rule_var, setup, term, ucq, unifier};

fn two_head_rule(s: &crate::symbol::SymbolStore) -> Arc<Rule> {
    rule(
        s,
        0,
        &[("b", &["?X"])],
        &[&[("p", &["?X"])], &[("q", &["?X"])]],
    )
}

#[test]
fn new_rule_has_no_satisfiable_head() {
    let s = setup();
    let r = two_head_rule(&s);
    let mut cache = UnifierCache::new();
    assert!(!cache.all_satisfiable(r.id()), "Unknown rule is unsatisfiable");

    cache.ensure_rule(&r);
    assert_eq!(cache.satisfiability(r.id()), Some(&[false, false][..]));
    assert!(!cache.all_satisfiable(r.id()));
}

#[test]
fn record_marks_head_satisfiable() {
    let s = setup();
    let r = two_head_rule(&s);
    let q = cq(&s, &[("p", &["five"])], &[]);
    let mut cache = UnifierCache::new();
    cache.ensure_rule(&r);

    cache.record(&q, unifier(&r, 0, &q, &[(rule_var(&s, 0, "X"), term(&s, "five"))]));
    assert!(cache.is_satisfiable(r.id(), 0));
    assert!(!cache.is_satisfiable(r.id(), 1));
    assert!(!cache.all_satisfiable(r.id()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn ensure_rule_does_not_reset_flags() {
    let s = setup();
    let r = two_head_rule(&s);
    let mut cache = UnifierCache::new();
    cache.ensure_rule(&r);
    cache.mark_satisfiable(&r, 0);
    cache.mark_satisfiable(&r, 1);
    cache.ensure_rule(&r);
    assert!(cache.all_satisfiable(r.id()));
}

#[test]
fn records_accumulate_under_same_key() {
    let s = setup();
    let r = two_head_rule(&s);
    let q = cq(&s, &[("p", &["five"]), ("p", &["?Y"])], &[]);
    let x = rule_var(&s, 0, "X");
    let first = unifier(&r, 0, &q, &[(x, term(&s, "five"))]);
    let second = unifier(&r, 0, &q, &[(x, term(&s, "five")), (x, term(&s, "?Y"))]);

    let mut cache = UnifierCache::new();
    cache.record(&q, first.clone());
    cache.record(&q, second.clone());

    let inst = first.frontier_instantiation();
    assert_eq!(inst, second.frontier_instantiation());
    assert_eq!(cache.get(&q, r.id(), 0, &inst), &[first, second]);
}

#[test]
fn candidates_filter_by_compatibility() {
    let s = setup();
    let r = two_head_rule(&s);
    let x = rule_var(&s, 0, "X");
    let q5 = cq(&s, &[("p", &["five"])], &[]);
    let q7 = cq(&s, &[("p", &["seven"])], &[]);
    let qv = cq(&s, &[("p", &["?Y"])], &[]);
    let u5 = unifier(&r, 0, &q5, &[(x, term(&s, "five"))]);
    let u7 = unifier(&r, 0, &q7, &[(x, term(&s, "seven"))]);
    let uv = unifier(&r, 0, &qv, &[(x, term(&s, "?Y"))]);

    let mut cache = UnifierCache::new();
    cache.record(&q5, u5.clone());
    cache.record(&q7, u7.clone());
    cache.record(&qv, uv.clone());

    let five = FrontierInstantiation::new([Some(s.intern("five"))]);
    assert_eq!(
        cache.candidates_for(r.id(), 0, &five),
        vec![u5.clone(), uv.clone()]
    );
    assert_eq!(
        cache.candidates_for(r.id(), 0, &FrontierInstantiation::unspecified(1)),
        vec![u5, u7, uv]
    );
    assert!(cache
        .candidates_for(r.id(), 1, &FrontierInstantiation::unspecified(1))
        .is_empty());
}

#[test]
fn prune_drops_queries_outside_ucq() {
    let s = setup();
    let r = two_head_rule(&s);
    let x = rule_var(&s, 0, "X");
    let kept = cq(&s, &[("p", &["five"])], &[]);
    let gone = cq(&s, &[("q", &["seven"])], &[]);

    let mut cache = UnifierCache::new();
    cache.record(&kept, unifier(&r, 0, &kept, &[(x, term(&s, "five"))]));
    cache.record(&gone, unifier(&r, 1, &gone, &[(x, term(&s, "seven"))]));

    let dropped = cache.prune(&ucq(&s, &[&kept], &[]));
    assert_eq!(dropped, 1);
    assert_eq!(cache.cached_queries(), vec![&kept]);
    assert!(cache
        .candidates_for(r.id(), 1, &FrontierInstantiation::unspecified(1))
        .is_empty());
    assert!(
        cache.all_satisfiable(r.id()),
        "Pruning never clears satisfiability"
    );
}

#[test]
fn prune_against_empty_ucq_empties_cache() {
    let s = setup();
    let r = two_head_rule(&s);
    let q = cq(&s, &[("p", &["five"])], &[]);
    let mut cache = UnifierCache::new();
    cache.record(&q, unifier(&r, 0, &q, &[(rule_var(&s, 0, "X"), term(&s, "five"))]));

    cache.prune(&ucq(&s, &[], &[]));
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}
