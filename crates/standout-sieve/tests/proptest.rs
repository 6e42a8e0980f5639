//! Property-based tests for filter composition using proptest.

use proptest::prelude::*;
use standout_sieve::{Condition, Filter};

// ============================================================================
// Test helpers
// ============================================================================

/// A threshold check that is easy to mirror with plain boolean logic.
fn above(threshold: i64) -> Condition<i64> {
    Condition::new(move |v: &i64| *v > threshold)
}

fn builder_step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<i8>().prop_map(|t| Step::Add(i64::from(t))),
        Just(Step::And),
        Just(Step::Or),
    ]
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Add(i64),
    And,
    Or,
}

/// Mirror of the builder state, evaluated eagerly for one value.
#[derive(Default)]
struct Model {
    records: Vec<(bool, bool)>,
    group: Vec<bool>,
    next_or: bool,
}

impl Model {
    fn apply(&mut self, step: Step, value: i64) {
        match step {
            Step::Add(t) => {
                let hit = value > t;
                if self.group.is_empty() {
                    self.records.push((hit, self.next_or));
                } else {
                    self.group.push(hit);
                }
                self.next_or = false;
            }
            Step::And => {
                self.next_or = false;
                self.group.clear();
            }
            Step::Or => {
                self.next_or = true;
                if let Some((last, _)) = self.records.pop() {
                    self.group = vec![last];
                }
            }
        }
    }

    fn result(&self) -> bool {
        let mut acc: Option<bool> = None;
        for &(hit, or) in &self.records {
            acc = Some(match acc {
                None => hit,
                Some(a) if or => a || hit,
                Some(a) => a && hit,
            });
        }
        if !self.group.is_empty() {
            let g = self.group.iter().any(|h| *h);
            acc = Some(match acc {
                None => g,
                Some(a) if self.next_or => a || g,
                Some(a) => a && g,
            });
        }
        acc.unwrap_or(true)
    }
}

fn run(steps: &[Step]) -> Filter<i64> {
    let mut filter = Filter::new();
    for step in steps {
        match *step {
            Step::Add(t) => {
                filter.add(above(t)).unwrap();
            }
            Step::And => {
                filter.and();
            }
            Step::Or => {
                filter.or();
            }
        }
    }
    filter
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// An empty filter accepts every value.
    #[test]
    fn empty_filter_accepts_all(value in any::<i64>()) {
        prop_assert!(Filter::<i64>::new().build().test(&value));
    }

    /// Conditions added without joins behave as a conjunction.
    #[test]
    fn adds_default_to_and(
        thresholds in prop::collection::vec(any::<i64>(), 1..8),
        value in any::<i64>(),
    ) {
        let mut filter = Filter::new();
        for t in &thresholds {
            filter.add(above(*t)).unwrap();
        }
        let expected = thresholds.iter().all(|t| value > *t);
        prop_assert_eq!(filter.build().test(&value), expected);
    }

    /// `a.or().b` is a disjunction.
    #[test]
    fn or_is_disjunction(a in any::<i64>(), b in any::<i64>(), value in any::<i64>()) {
        let mut filter = Filter::new();
        filter.add(above(a)).unwrap().or().add(above(b)).unwrap();
        prop_assert_eq!(filter.build().test(&value), value > a || value > b);
    }

    /// `and()` drops the open group entirely.
    #[test]
    fn and_resets_group(a in any::<i64>(), b in any::<i64>(), c in any::<i64>(), value in any::<i64>()) {
        let mut filter = Filter::new();
        filter
            .add(above(a)).unwrap()
            .or()
            .add(above(b)).unwrap()
            .and()
            .add(above(c)).unwrap();
        prop_assert_eq!(filter.build().test(&value), value > c);
    }

    /// The negated build is the complement of the build.
    #[test]
    fn negation_is_complement(
        steps in prop::collection::vec(builder_step_strategy(), 0..12),
        value in any::<i64>(),
    ) {
        let filter = run(&steps);
        prop_assert_eq!(filter.build_negated().test(&value), !filter.build().test(&value));
    }

    /// Any sequence of builder calls evaluates like the reference model.
    #[test]
    fn builder_matches_model(
        steps in prop::collection::vec(builder_step_strategy(), 0..12),
        value in any::<i64>(),
    ) {
        let filter = run(&steps);
        let mut model = Model::default();
        for step in &steps {
            model.apply(*step, value);
        }
        prop_assert_eq!(filter.build().test(&value), model.result());
    }

    /// Building twice gives equivalent predicates.
    #[test]
    fn build_is_idempotent(
        steps in prop::collection::vec(builder_step_strategy(), 0..12),
        values in prop::collection::vec(any::<i64>(), 0..20),
    ) {
        let filter = run(&steps);
        let first = filter.build();
        let second = filter.build();
        prop_assert_eq!(first.filter(&values), second.filter(&values));
    }

    /// A group evaluates exactly like adding the sub-filter's build.
    #[test]
    fn group_matches_sub_build(
        inner in prop::collection::vec(builder_step_strategy(), 1..8),
        outer in any::<i8>(),
        value in any::<i64>(),
    ) {
        let sub = run(&inner);
        prop_assume!(!sub.is_empty());

        let mut grouped = Filter::new();
        grouped.add(above(i64::from(outer))).unwrap();
        grouped
            .add_group(|g| {
                for step in &inner {
                    match *step {
                        Step::Add(t) => {
                            g.add(above(t))?;
                        }
                        Step::And => {
                            g.and();
                        }
                        Step::Or => {
                            g.or();
                        }
                    }
                }
                Ok(())
            })
            .unwrap();

        let expected = value > i64::from(outer) && sub.build().test(&value);
        prop_assert_eq!(grouped.build().test(&value), expected);
    }

    /// Filtering never grows a collection, and count agrees with filter.
    #[test]
    fn filter_and_count_agree(
        steps in prop::collection::vec(builder_step_strategy(), 0..12),
        values in prop::collection::vec(any::<i64>(), 0..50),
    ) {
        let p = run(&steps).build();
        let kept = p.filter(&values);
        prop_assert!(kept.len() <= values.len());
        prop_assert_eq!(kept.len(), p.count(&values));
        prop_assert_eq!(p.any(&values), !kept.is_empty());
    }

    /// Reading through an accessor matches reading the value directly.
    #[test]
    fn accessor_rewrite_is_transparent(t in any::<i64>(), pair in any::<(i64, bool)>()) {
        let mut via = Filter::<(i64, bool)>::new();
        via.add_via(|p: &(i64, bool)| &p.0, above(t)).unwrap();
        prop_assert_eq!(via.build().test(&pair), pair.0 > t);
    }
}
