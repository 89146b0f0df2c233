use std::collections::{BTreeMap, HashSet};

use super::common::*;
use crate::scoring::domain::{CreditHistory, OutputClass, Term};
use crate::scoring::rules::{classify, RuleBase, RULE_COUNT};

#[test]
fn rule_base_covers_every_term_combination_once() {
    let rules = RuleBase::build();
    assert_eq!(rules.len(), 192);
    assert_eq!(RULE_COUNT, 192);

    let antecedents: HashSet<_> = rules
        .rules()
        .iter()
        .map(|rule| (rule.income, rule.debt_load, rule.credit_history, rule.age))
        .collect();
    assert_eq!(antecedents.len(), 192);
}

#[test]
fn lookup_addresses_the_matching_rule() {
    let rules = RuleBase::build();
    for rule in rules.rules() {
        let found = rules.lookup(rule.income, rule.debt_load, rule.credit_history, rule.age);
        assert_eq!(found, rule);
    }
}

#[test]
fn class_distribution_follows_score_thresholds() {
    let rules = RuleBase::build();
    let mut counts: BTreeMap<OutputClass, usize> = BTreeMap::new();
    for rule in rules.rules() {
        *counts.entry(rule.output).or_default() += 1;
    }

    assert_eq!(counts[&OutputClass::VeryLow], 6);
    assert_eq!(counts[&OutputClass::Low], 37);
    assert_eq!(counts[&OutputClass::Medium], 106);
    assert_eq!(counts[&OutputClass::High], 37);
    assert_eq!(counts[&OutputClass::VeryHigh], 6);
}

#[test]
fn weights_stay_strictly_inside_unit_interval() {
    for rule in RuleBase::build().rules() {
        assert!(
            rule.weight > 0.0 && rule.weight < 1.0,
            "weight {} out of range for {rule:?}",
            rule.weight
        );
        assert!(rule.total_score <= 10);
    }
}

#[test]
fn classify_maps_scores_to_class_and_weight() {
    let expectations = [
        (10, OutputClass::VeryHigh, 0.95),
        (9, OutputClass::VeryHigh, 0.90),
        (8, OutputClass::High, 0.85),
        (7, OutputClass::High, 0.80),
        (6, OutputClass::Medium, 0.60),
        (5, OutputClass::Medium, 0.55),
        (4, OutputClass::Medium, 0.50),
        (3, OutputClass::Low, 0.30),
        (2, OutputClass::Low, 0.25),
        (1, OutputClass::VeryLow, 0.15),
        (0, OutputClass::VeryLow, 0.10),
    ];

    for (score, class, weight) in expectations {
        let (actual_class, actual_weight) = classify(score);
        assert_eq!(actual_class, class, "score {score}");
        assert_close(actual_weight, weight);
    }
}

#[test]
fn extreme_profiles_land_in_extreme_classes() {
    let rules = RuleBase::build();

    let best = rules.lookup(Term::High, Term::VeryLow, CreditHistory::Good, Term::Medium);
    assert_eq!(best.total_score, 10);
    assert_eq!(best.output, OutputClass::VeryHigh);

    let worst = rules.lookup(Term::VeryLow, Term::High, CreditHistory::Poor, Term::VeryLow);
    assert_eq!(worst.total_score, 0);
    assert_eq!(worst.output, OutputClass::VeryLow);
}

#[test]
fn oldest_bracket_scores_below_middle_age() {
    let rules = RuleBase::build();
    let middle = rules.lookup(Term::Medium, Term::Low, CreditHistory::Average, Term::Medium);
    let senior = rules.lookup(Term::Medium, Term::Low, CreditHistory::Average, Term::High);
    let young = rules.lookup(Term::Medium, Term::Low, CreditHistory::Average, Term::Low);

    assert_eq!(senior.total_score + 1, middle.total_score);
    assert_eq!(senior.total_score, young.total_score);
}
