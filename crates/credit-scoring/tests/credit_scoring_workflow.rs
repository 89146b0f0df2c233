//! Integration scenarios for the credit scoring engine.
//!
//! Scenarios exercise the public facade only: reference applicant profiles, the output
//! range and floor guarantees, and the directional effect of income on approval.

use std::sync::Arc;
use std::thread;

use credit_scoring::scoring::{
    CreditHistory, CreditInput, CreditOutput, CreditScoringEngine, RuleBase,
};

fn input(income: f64, debt_load: f64, credit_history: CreditHistory, age: f64) -> CreditInput {
    CreditInput {
        income,
        debt_load,
        credit_history,
        age,
    }
}

fn engine() -> CreditScoringEngine {
    CreditScoringEngine::new(Arc::new(RuleBase::build()))
}

#[test]
fn strong_applicant_gets_very_high_approval() {
    let output = engine().evaluate(&input(150_000.0, 3_000.0, CreditHistory::Good, 40.0));

    assert!(output.approval_probability > 90, "{output:?}");
    assert!(output.recommended_amount > 70_000.0, "{output:?}");
}

#[test]
fn weak_young_applicant_gets_low_approval() {
    let output = engine().evaluate(&input(20_000.0, 30_000.0, CreditHistory::Poor, 20.0));

    assert!(output.approval_probability < 20, "{output:?}");
    assert!(output.recommended_amount < 10_000.0, "{output:?}");
}

#[test]
fn middling_applicant_gets_medium_approval() {
    let output = engine().evaluate(&input(80_000.0, 20_000.0, CreditHistory::Average, 35.0));

    assert!(
        output.approval_probability > 40 && output.approval_probability < 60,
        "{output:?}"
    );
    assert!(
        output.recommended_amount > 20_000.0 && output.recommended_amount < 40_000.0,
        "{output:?}"
    );
}

#[test]
fn zero_income_with_heavy_debt_gets_nothing() {
    let output = engine().evaluate(&input(0.0, 40_000.0, CreditHistory::Poor, 25.0));

    assert!(output.approval_probability < 15, "{output:?}");
    assert_eq!(output.recommended_amount, 0.0);
}

#[test]
fn zero_income_never_recommends_credit() {
    let engine = engine();
    for debt_load in (0..=50_000).step_by(5_000) {
        for age in (18..=70).step_by(4) {
            for history in CreditHistory::ALL {
                let output = engine.evaluate(&input(
                    0.0,
                    f64::from(debt_load),
                    history,
                    f64::from(age),
                ));
                assert_eq!(output.recommended_amount, 0.0);
            }
        }
    }
}

#[test]
fn outputs_stay_in_range_including_hostile_inputs() {
    let engine = engine();
    let incomes = [-100_000.0, -1.0, 0.0, 25_000.0, 55_000.0, 110_000.0, 1e9];
    let debts = [-5_000.0, 0.0, 4_000.0, 12_500.0, 27_500.0, 1e9];
    let ages = [-10.0, 0.0, 22.5, 32.5, 47.5, 61.0, 150.0];

    for income in incomes {
        for debt_load in debts {
            for age in ages {
                for history in CreditHistory::ALL {
                    let output = engine.evaluate(&input(income, debt_load, history, age));
                    assert!(output.approval_probability <= 100);
                    assert!(output.recommended_amount >= 0.0, "{output:?}");
                }
            }
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let engine = engine();
    let profile = input(55_000.0, 12_000.0, CreditHistory::Average, 32.0);

    let first = engine.evaluate(&profile);
    for _ in 0..10 {
        assert_eq!(engine.evaluate(&profile), first);
    }
    assert_eq!(CreditScoringEngine::default().evaluate(&profile), first);
}

#[test]
fn income_raises_approval_at_sampled_breakpoints() {
    let engine = engine();
    let incomes = [0.0, 50_000.0, 100_000.0, 150_000.0, 200_000.0];

    for debt_load in [0.0, 3_000.0, 8_000.0, 20_000.0, 40_000.0] {
        for age in [18.0, 27.0, 40.0, 55.0, 65.0] {
            for history in CreditHistory::ALL {
                let probabilities: Vec<u8> = incomes
                    .iter()
                    .map(|income| {
                        engine
                            .evaluate(&input(*income, debt_load, history, age))
                            .approval_probability
                    })
                    .collect();
                assert!(
                    probabilities.windows(2).all(|pair| pair[0] <= pair[1]),
                    "debt {debt_load} age {age} history {history}: {probabilities:?}"
                );
            }
        }
    }
}

#[test]
fn highest_sampled_income_never_scores_below_zero_income() {
    let engine = engine();
    for debt_load in (0..=50_000).step_by(1_000) {
        for age in 18..=70 {
            for history in CreditHistory::ALL {
                let (debt_load, age) = (f64::from(debt_load), f64::from(age));
                let low = engine.evaluate(&input(0.0, debt_load, history, age));
                let high = engine.evaluate(&input(200_000.0, debt_load, history, age));
                assert!(high.approval_probability >= low.approval_probability);
            }
        }
    }
}

#[test]
fn better_history_does_not_lower_approval_for_crisp_profiles() {
    let engine = engine();
    let by_history: Vec<CreditOutput> = CreditHistory::ALL
        .iter()
        .map(|history| engine.evaluate(&input(80_000.0, 20_000.0, *history, 35.0)))
        .collect();

    assert_eq!(by_history[0].approval_probability, 50);
    assert_eq!(by_history[1].approval_probability, 50);
    assert_eq!(by_history[2].approval_probability, 80);
}

#[test]
fn age_factor_discounts_young_and_senior_applicants() {
    let engine = engine();
    let young = engine.evaluate(&input(100_000.0, 0.0, CreditHistory::Good, 28.0));
    let senior = engine.evaluate(&input(100_000.0, 0.0, CreditHistory::Good, 65.0));

    assert_eq!(young.approval_probability, 80);
    assert_eq!(young.recommended_amount, 38_400.0);
    assert_eq!(senior.approval_probability, 80);
    assert_eq!(senior.recommended_amount, 33_600.0);
}

#[test]
fn shared_engine_scores_concurrently() {
    let engine = Arc::new(engine());
    let profile = input(110_000.0, 27_500.0, CreditHistory::Good, 47.5);
    let expected = engine.evaluate(&profile);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.evaluate(&profile))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker finished"), expected);
    }
    assert_eq!(expected.approval_probability, 68);
    assert_eq!(expected.recommended_amount, 44_607.0);
}
