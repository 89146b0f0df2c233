use clap::Args;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::scoring::sensitivity::sweep;
use credit_scoring::scoring::{
    CreditAssessment, CreditHistory, CreditInput, CreditScoringEngine, SensitivityCurve,
    SensitivityRequest, SensitivityVariable,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Monthly income in roubles
    #[arg(long)]
    pub(crate) income: f64,
    /// Outstanding debt obligations in roubles
    #[arg(long)]
    pub(crate) debt_load: f64,
    /// Credit history: poor, average or good
    #[arg(long)]
    pub(crate) credit_history: CreditHistory,
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: f64,
    /// Print the full assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SensitivityArgs {
    /// Input to vary: income, debt-load or age
    #[arg(long)]
    pub(crate) variable: SensitivityVariable,
    /// First sampled value (defaults to the variable's slider minimum)
    #[arg(long)]
    pub(crate) start: Option<f64>,
    /// Last sampled value (defaults to the variable's slider maximum)
    #[arg(long)]
    pub(crate) end: Option<f64>,
    /// Number of evenly spaced samples, both ends included
    #[arg(long, default_value_t = 21)]
    pub(crate) steps: usize,
    /// Baseline income held fixed while another variable moves
    #[arg(long, default_value_t = 80_000.0)]
    pub(crate) income: f64,
    /// Baseline debt load
    #[arg(long, default_value_t = 20_000.0)]
    pub(crate) debt_load: f64,
    /// Baseline credit history
    #[arg(long, default_value = "average")]
    pub(crate) credit_history: CreditHistory,
    /// Baseline age
    #[arg(long, default_value_t = 35.0)]
    pub(crate) age: f64,
    /// Write the curve to a CSV file instead of printing a table
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the per-class rule strengths for each scenario
    #[arg(long)]
    pub(crate) show_strengths: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        income,
        debt_load,
        credit_history,
        age,
        json,
    } = args;

    let engine = CreditScoringEngine::default();
    let assessment = engine.assess(&CreditInput {
        income,
        debt_load,
        credit_history,
        age,
    });

    if json {
        match serde_json::to_string_pretty(&assessment) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Assessment payload unavailable: {err}"),
        }
    } else {
        render_assessment(&assessment, true);
    }

    Ok(())
}

pub(crate) fn run_sensitivity(args: SensitivityArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let SensitivityArgs {
        variable,
        start,
        end,
        steps,
        income,
        debt_load,
        credit_history,
        age,
        csv,
    } = args;

    let request = SensitivityRequest {
        base: CreditInput {
            income,
            debt_load,
            credit_history,
            age,
        },
        variable,
        start,
        end,
        steps,
    };

    let engine = CreditScoringEngine::default();
    let curve = sweep(&engine, &request, config.scoring.max_sensitivity_points)?;

    match csv {
        Some(path) => {
            write_curve_csv(&curve, &path)?;
            println!(
                "Wrote {} {} samples to {}",
                curve.points.len(),
                curve.variable,
                path.display()
            );
        }
        None => render_curve(&curve),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = CreditScoringEngine::default();
    println!(
        "Fuzzy credit scoring demo ({} rules)",
        engine.rule_base().len()
    );

    for (label, input) in reference_scenarios() {
        println!("\n{label}");
        let assessment = engine.assess(&input);
        render_assessment(&assessment, args.show_strengths);
    }

    Ok(())
}

fn reference_scenarios() -> [(&'static str, CreditInput); 4] {
    [
        (
            "High income, minimal debt, good history, middle-aged",
            CreditInput {
                income: 150_000.0,
                debt_load: 3_000.0,
                credit_history: CreditHistory::Good,
                age: 40.0,
            },
        ),
        (
            "Low income, heavy debt, poor history, young",
            CreditInput {
                income: 20_000.0,
                debt_load: 30_000.0,
                credit_history: CreditHistory::Poor,
                age: 20.0,
            },
        ),
        (
            "Medium income, medium debt, average history",
            CreditInput {
                income: 80_000.0,
                debt_load: 20_000.0,
                credit_history: CreditHistory::Average,
                age: 35.0,
            },
        ),
        (
            "No income, heavy debt, poor history",
            CreditInput {
                income: 0.0,
                debt_load: 40_000.0,
                credit_history: CreditHistory::Poor,
                age: 25.0,
            },
        ),
    ]
}

fn render_assessment(assessment: &CreditAssessment, show_strengths: bool) {
    let input = &assessment.input;
    println!(
        "- income {:.0} | debt load {:.0} | history {} | age {:.0}",
        input.income, input.debt_load, input.credit_history, input.age
    );
    println!(
        "  Approval probability: {}% | recommended amount: {:.0}",
        assessment.output.approval_probability, assessment.output.recommended_amount
    );
    match assessment.dominant_class {
        Some(class) => println!("  Dominant output class: {}", class.label()),
        None => println!("  Dominant output class: none (no rule fired)"),
    }

    if show_strengths {
        println!("  Class strengths:");
        for (class, strength) in assessment.class_strengths.iter() {
            println!("    - {}: {:.3}", class.label(), strength);
        }
    }
}

fn render_curve(curve: &SensitivityCurve) {
    println!(
        "Sensitivity of approval to {} (history {})",
        curve.variable, curve.base.credit_history
    );
    println!("{:>12}  {:>11}  {:>12}", curve.variable.label(), "approval %", "amount");
    for point in &curve.points {
        println!(
            "{:>12.1}  {:>11}  {:>12.0}",
            point.value, point.approval_probability, point.recommended_amount
        );
    }
}

fn write_curve_csv(curve: &SensitivityCurve, path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(std::io::Error::from)?;
    for point in &curve.points {
        writer.serialize(point).map_err(std::io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}
