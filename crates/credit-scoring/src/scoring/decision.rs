use super::inference::ClassStrengths;

/// Share of the probability-weighted income offered as credit.
pub const INCOME_MULTIPLIER: f64 = 0.6;

/// Weighted average of the class anchors. An empty activation yields 0.
pub fn defuzzify(strengths: &ClassStrengths) -> f64 {
    let numerator: f64 = strengths
        .iter()
        .map(|(class, strength)| strength * class.anchor())
        .sum();
    let total = strengths.total();
    let divisor = if total == 0.0 { 1.0 } else { total };
    numerator / divisor
}

/// Scaling applied to the recommended amount for the youngest and oldest applicants.
pub fn age_factor(age: f64) -> f64 {
    if age < 30.0 {
        0.8
    } else if age > 60.0 {
        0.7
    } else {
        1.0
    }
}

/// `income × probability/100 × INCOME_MULTIPLIER × age_factor`, rounded.
///
/// Negative and non-finite incomes are treated as 0, so the amount is always a
/// finite, non-negative figure.
pub fn recommended_amount(income: f64, probability: f64, age: f64) -> f64 {
    let income = if income.is_finite() { income.max(0.0) } else { 0.0 };
    let amount = income * (probability / 100.0) * INCOME_MULTIPLIER * age_factor(age);
    // `+ 0.0` folds a negative zero into positive zero.
    amount.round().max(0.0) + 0.0
}

/// Round the defuzzified probability for the public contract.
pub fn approval_percentage(probability: f64) -> u8 {
    if probability.is_nan() {
        return 0;
    }
    probability.round().clamp(0.0, 100.0) as u8
}

