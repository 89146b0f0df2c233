use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::decision::defuzzify;
use super::domain::{CreditHistory, OutputClass};
use super::membership::FuzzifiedInput;
use super::rules::{Rule, RuleBase};

/// Aggregated strength per output class, rebuilt on every evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassStrengths {
    strengths: [f64; 5],
}

impl ClassStrengths {
    pub fn get(&self, class: OutputClass) -> f64 {
        self.strengths[class.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutputClass, f64)> + '_ {
        OutputClass::ALL
            .into_iter()
            .map(|class| (class, self.get(class)))
    }

    pub fn total(&self) -> f64 {
        self.strengths.iter().sum()
    }

    /// Class with the largest strength, `None` when no rule fired.
    pub fn dominant(&self) -> Option<OutputClass> {
        self.iter()
            .filter(|(_, strength)| *strength > 0.0)
            .fold(None, |best: Option<(OutputClass, f64)>, (class, strength)| match best {
                Some((_, top)) if top >= strength => best,
                _ => Some((class, strength)),
            })
            .map(|(class, _)| class)
    }

    /// Fuzzy OR: keep the larger of the current strength and `strength`.
    fn absorb(&mut self, class: OutputClass, strength: f64) {
        let slot = &mut self.strengths[class.index()];
        *slot = slot.max(strength);
    }
}

impl Serialize for ClassStrengths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OutputClass::ALL.len()))?;
        for (class, strength) in self.iter() {
            map.serialize_entry(class.label(), &strength)?;
        }
        map.end()
    }
}

/// Result of running the rule base against one fuzzified input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    /// Unrounded defuzzified approval probability in `[0, 100]`.
    pub probability: f64,
    pub strengths: ClassStrengths,
}

/// Fuzzy AND of the rule's antecedents, scaled by the rule weight.
pub fn firing_strength(rule: &Rule, fuzzified: &FuzzifiedInput) -> f64 {
    let activation = fuzzified
        .income
        .degree(rule.income)
        .min(fuzzified.debt_load.degree(rule.debt_load))
        .min(fuzzified.credit_history.degree(rule.credit_history))
        .min(fuzzified.age.degree(rule.age));
    activation * rule.weight
}

/// Evaluate the rule base and defuzzify the aggregated class strengths.
///
/// Only rules whose four antecedent terms all have non-zero membership are visited; every
/// other rule would contribute exactly 0 through the `min`.
pub fn infer(rule_base: &RuleBase, fuzzified: &FuzzifiedInput) -> Inference {
    let mut strengths = ClassStrengths::default();
    let history: CreditHistory = fuzzified.credit_history.tag();

    for (income, _) in fuzzified.income.active() {
        for (debt_load, _) in fuzzified.debt_load.active() {
            for (age, _) in fuzzified.age.active() {
                let rule = rule_base.lookup(income, debt_load, history, age);
                strengths.absorb(rule.output, firing_strength(rule, fuzzified));
            }
        }
    }

    Inference {
        probability: defuzzify(&strengths),
        strengths,
    }
}

/// Reference evaluation over every rule in the table, without the active-term shortcut.
pub fn infer_exhaustive(rule_base: &RuleBase, fuzzified: &FuzzifiedInput) -> Inference {
    let mut strengths = ClassStrengths::default();
    for rule in rule_base.rules() {
        strengths.absorb(rule.output, firing_strength(rule, fuzzified));
    }

    Inference {
        probability: defuzzify(&strengths),
        strengths,
    }
}
