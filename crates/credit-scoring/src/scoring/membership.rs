//! Piecewise-linear membership functions for the four input variables.
//!
//! Every degree is computed as `clamp01(min(rise, fall))` over the breakpoints below, so
//! out-of-range and negative inputs saturate instead of failing. Adjacent terms overlap on
//! a single ramp, which keeps at most two neighbouring terms non-zero for any input.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::domain::{CreditHistory, CreditInput, Term};

/// Shape of a single linguistic term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    /// 1 up to `full_until`, falling linearly to 0 at `zero_at`.
    Falling { full_until: f64, zero_at: f64 },
    /// Rises over `a..b`, holds 1 over `b..c`, falls over `c..d`.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// 0 up to `zero_until`, rising linearly to 1 at `full_at`.
    Rising { zero_until: f64, full_at: f64 },
}

impl Ramp {
    pub fn degree(&self, x: f64) -> f64 {
        let raw = match *self {
            Ramp::Falling {
                full_until,
                zero_at,
            } => (zero_at - x) / (zero_at - full_until),
            Ramp::Trapezoid { a, b, c, d } => ((x - a) / (b - a)).min((d - x) / (d - c)),
            Ramp::Rising {
                zero_until,
                full_at,
            } => (x - zero_until) / (full_at - zero_until),
        };
        clamp_unit(raw)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// The four term shapes of one numeric variable, indexed by [`Term`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinguisticVariable {
    pub name: &'static str,
    terms: [Ramp; 4],
}

impl LinguisticVariable {
    pub fn ramp(&self, term: Term) -> Ramp {
        self.terms[term.index()]
    }

    pub fn fuzzify(&self, x: f64) -> TermMemberships {
        let mut degrees = [0.0; 4];
        for term in Term::ALL {
            degrees[term.index()] = self.ramp(term).degree(x);
        }
        TermMemberships { degrees }
    }
}

/// Monthly income in roubles.
pub const INCOME: LinguisticVariable = LinguisticVariable {
    name: "income",
    terms: [
        Ramp::Falling {
            full_until: 20_000.0,
            zero_at: 30_000.0,
        },
        Ramp::Trapezoid {
            a: 20_000.0,
            b: 30_000.0,
            c: 50_000.0,
            d: 60_000.0,
        },
        Ramp::Trapezoid {
            a: 50_000.0,
            b: 60_000.0,
            c: 100_000.0,
            d: 120_000.0,
        },
        Ramp::Rising {
            zero_until: 100_000.0,
            full_at: 120_000.0,
        },
    ],
};

/// Outstanding debt obligations in roubles.
pub const DEBT_LOAD: LinguisticVariable = LinguisticVariable {
    name: "debtLoad",
    terms: [
        Ramp::Falling {
            full_until: 3_000.0,
            zero_at: 5_000.0,
        },
        Ramp::Trapezoid {
            a: 3_000.0,
            b: 5_000.0,
            c: 10_000.0,
            d: 15_000.0,
        },
        Ramp::Trapezoid {
            a: 10_000.0,
            b: 15_000.0,
            c: 25_000.0,
            d: 30_000.0,
        },
        Ramp::Rising {
            zero_until: 25_000.0,
            full_at: 30_000.0,
        },
    ],
};

/// Applicant age in years.
pub const AGE: LinguisticVariable = LinguisticVariable {
    name: "age",
    terms: [
        Ramp::Falling {
            full_until: 20.0,
            zero_at: 25.0,
        },
        Ramp::Trapezoid {
            a: 20.0,
            b: 25.0,
            c: 30.0,
            d: 35.0,
        },
        Ramp::Trapezoid {
            a: 30.0,
            b: 35.0,
            c: 45.0,
            d: 50.0,
        },
        Ramp::Rising {
            zero_until: 45.0,
            full_at: 50.0,
        },
    ],
};

/// Degrees of one numeric variable across its four terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermMemberships {
    degrees: [f64; 4],
}

impl TermMemberships {
    pub fn degree(&self, term: Term) -> f64 {
        self.degrees[term.index()]
    }

    /// Terms with a non-zero degree, in ascending order.
    pub fn active(&self) -> impl Iterator<Item = (Term, f64)> + '_ {
        Term::ALL
            .into_iter()
            .map(|term| (term, self.degree(term)))
            .filter(|(_, degree)| *degree > 0.0)
    }
}

/// Degenerate mapping for credit history: the tagged term is 1, the rest 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryMemberships {
    tag: CreditHistory,
}

impl HistoryMemberships {
    pub fn degree(&self, history: CreditHistory) -> f64 {
        if history == self.tag {
            1.0
        } else {
            0.0
        }
    }

    pub fn tag(&self) -> CreditHistory {
        self.tag
    }
}

impl Serialize for TermMemberships {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Term::ALL.len()))?;
        for term in Term::ALL {
            map.serialize_entry(term.label(), &self.degree(term))?;
        }
        map.end()
    }
}

impl Serialize for HistoryMemberships {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CreditHistory::ALL.len()))?;
        for history in CreditHistory::ALL {
            map.serialize_entry(history.label(), &self.degree(history))?;
        }
        map.end()
    }
}

pub fn fuzzify_income(income: f64) -> TermMemberships {
    INCOME.fuzzify(income)
}

pub fn fuzzify_debt_load(debt_load: f64) -> TermMemberships {
    DEBT_LOAD.fuzzify(debt_load)
}

pub fn fuzzify_age(age: f64) -> TermMemberships {
    AGE.fuzzify(age)
}

pub fn fuzzify_credit_history(history: CreditHistory) -> HistoryMemberships {
    HistoryMemberships { tag: history }
}

/// Membership mappings for all four variables of one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzifiedInput {
    pub income: TermMemberships,
    pub debt_load: TermMemberships,
    pub credit_history: HistoryMemberships,
    pub age: TermMemberships,
}

impl FuzzifiedInput {
    pub fn from_input(input: &CreditInput) -> Self {
        Self {
            income: fuzzify_income(input.income),
            debt_load: fuzzify_debt_load(input.debt_load),
            credit_history: fuzzify_credit_history(input.credit_history),
            age: fuzzify_age(input.age),
        }
    }
}
