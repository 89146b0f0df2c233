use serde::Serialize;

use super::domain::{CreditHistory, OutputClass, Term};

/// One row of the rule table: an antecedent term per variable and its weighted consequent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub income: Term,
    pub debt_load: Term,
    pub credit_history: CreditHistory,
    pub age: Term,
    pub total_score: u8,
    pub output: OutputClass,
    pub weight: f64,
}

/// Immutable table covering every combination of input terms.
///
/// Rules are stored in income → debt load → credit history → age order, which lets
/// [`RuleBase::lookup`] address a rule directly from its antecedent.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

pub const RULE_COUNT: usize =
    Term::ALL.len() * Term::ALL.len() * CreditHistory::ALL.len() * Term::ALL.len();

impl RuleBase {
    pub fn build() -> Self {
        let rules: Vec<Rule> = Term::ALL
            .into_iter()
            .flat_map(|income| Term::ALL.into_iter().map(move |debt| (income, debt)))
            .flat_map(|(income, debt)| {
                CreditHistory::ALL
                    .into_iter()
                    .map(move |history| (income, debt, history))
            })
            .flat_map(|(income, debt, history)| {
                Term::ALL
                    .into_iter()
                    .map(move |age| rule_for(income, debt, history, age))
            })
            .collect();

        debug_assert_eq!(rules.len(), RULE_COUNT);
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn lookup(
        &self,
        income: Term,
        debt_load: Term,
        credit_history: CreditHistory,
        age: Term,
    ) -> &Rule {
        let histories = CreditHistory::ALL.len();
        let terms = Term::ALL.len();
        let index = ((income.index() * terms + debt_load.index()) * histories
            + credit_history.index())
            * terms
            + age.index();
        &self.rules[index]
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::build()
    }
}

fn rule_for(income: Term, debt_load: Term, credit_history: CreditHistory, age: Term) -> Rule {
    let total_score = income_score(income)
        + debt_load_score(debt_load)
        + credit_history_score(credit_history)
        + age_score(age);
    let (output, weight) = classify(total_score);

    Rule {
        income,
        debt_load,
        credit_history,
        age,
        total_score,
        output,
        weight,
    }
}

fn income_score(term: Term) -> u8 {
    match term {
        Term::VeryLow => 0,
        Term::Low => 1,
        Term::Medium => 2,
        Term::High => 3,
    }
}

// Low debt is favorable.
fn debt_load_score(term: Term) -> u8 {
    match term {
        Term::VeryLow => 3,
        Term::Low => 2,
        Term::Medium => 1,
        Term::High => 0,
    }
}

fn credit_history_score(history: CreditHistory) -> u8 {
    match history {
        CreditHistory::Poor => 0,
        CreditHistory::Average => 1,
        CreditHistory::Good => 2,
    }
}

// Peaks at middle age; the oldest bracket scores like the young one.
fn age_score(term: Term) -> u8 {
    match term {
        Term::VeryLow => 0,
        Term::Low => 1,
        Term::Medium => 2,
        Term::High => 1,
    }
}

pub(crate) fn classify(total_score: u8) -> (OutputClass, f64) {
    let score = f64::from(total_score);
    match total_score {
        9.. => (OutputClass::VeryHigh, 0.95 - (10.0 - score) * 0.05),
        7..=8 => (OutputClass::High, 0.85 - (8.0 - score) * 0.05),
        4..=6 => (OutputClass::Medium, 0.60 - (6.0 - score) * 0.05),
        2..=3 => (OutputClass::Low, 0.30 - (3.0 - score) * 0.05),
        _ => (OutputClass::VeryLow, 0.15 - (1.0 - score) * 0.05),
    }
}
