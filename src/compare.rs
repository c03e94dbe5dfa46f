use crate::errors::{PricingError, PricingResult};
use crate::models::OptionPricer;
use crate::state::PricingInputs;

/// Result of pricing one set of inputs with both methods.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Comparison {
    pub inputs: PricingInputs,
    pub analytic: f64,
    pub lattice: f64,
    pub difference: f64,
}

impl Comparison {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.analytic.is_finite() && self.lattice.is_finite() && self.difference.is_finite()
    }
}

/// One row of a step-count sweep.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ConvergencePoint {
    pub steps: usize,
    pub lattice: f64,
    pub error: f64,
}

/// Runs the analytic and lattice pricers side by side.
pub struct Comparator<'a> {
    analytic: &'a dyn OptionPricer,
    lattice: &'a dyn OptionPricer,
}

impl<'a> Comparator<'a> {
    pub fn new(analytic: &'a dyn OptionPricer, lattice: &'a dyn OptionPricer) -> Self {
        Self { analytic, lattice }
    }

    /// Price with both models and take the absolute difference.
    /// NaN from either side flows straight into the result.
    pub fn compare(&self, inputs: &PricingInputs) -> Comparison {
        let analytic = self.analytic.price(inputs);
        let lattice = self.lattice.price(inputs);
        let difference = (analytic - lattice).abs();

        tracing::debug!(
            analytic_model = self.analytic.name(),
            lattice_model = self.lattice.name(),
            analytic,
            lattice,
            difference,
            "comparison complete"
        );

        Comparison {
            inputs: *inputs,
            analytic,
            lattice,
            difference,
        }
    }

    /// Validate first, then compare; rejects non-finite prices.
    pub fn compare_strict(&self, inputs: &PricingInputs) -> PricingResult<Comparison> {
        inputs.validate()?;
        let result = self.compare(inputs);
        if !result.is_finite() {
            return Err(PricingError::NonFinite(format!(
                "analytic={} lattice={}",
                result.analytic, result.lattice
            )));
        }
        Ok(result)
    }

    /// Lattice error against the analytic price for each step count.
    /// The analytic price does not depend on steps, so it is computed once.
    pub fn convergence(&self, inputs: &PricingInputs, steps: &[usize]) -> Vec<ConvergencePoint> {
        let analytic = self.analytic.price(inputs);
        steps
            .iter()
            .map(|&n| {
                let lattice = self.lattice.price(&inputs.with_steps(n));
                ConvergencePoint {
                    steps: n,
                    lattice,
                    error: (lattice - analytic).abs(),
                }
            })
            .collect()
    }

    /// Sweep with the same checks as `compare_strict`: every step count must
    /// pass validation and every lattice price must be finite.
    pub fn convergence_strict(
        &self,
        inputs: &PricingInputs,
        steps: &[usize],
    ) -> PricingResult<Vec<ConvergencePoint>> {
        for &n in steps {
            inputs.with_steps(n).validate()?;
        }
        let points = self.convergence(inputs, steps);
        if let Some(bad) = points.iter().find(|p| !p.error.is_finite()) {
            return Err(PricingError::NonFinite(format!(
                "N={} lattice={} error={}",
                bad.steps, bad.lattice, bad.error
            )));
        }
        Ok(points)
    }
}

/// The three-line text report.
pub fn render_text(c: &Comparison) -> String {
    format!(
        "Black-Scholes Call Option Price: {:.4}\n\
         Binomial Model Call Option Price with N={} steps: {:.4}\n\
         Difference between Black-Scholes and Binomial Model: {:.4}\n",
        c.analytic, c.inputs.steps, c.lattice, c.difference
    )
}

pub fn render_convergence(points: &[ConvergencePoint]) -> String {
    points
        .iter()
        .map(|p| format!("N={:<8} lattice={:.4} error={:.6}\n", p.steps, p.lattice, p.error))
        .collect()
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    comparison: &'a Comparison,
    #[serde(skip_serializing_if = "no_points")]
    convergence: &'a [ConvergencePoint],
}

fn no_points(points: &&[ConvergencePoint]) -> bool {
    points.is_empty()
}

/// JSON report. serde_json writes NaN/Inf as null.
pub fn render_json(c: &Comparison, convergence: &[ConvergencePoint]) -> PricingResult<String> {
    let report = JsonReport {
        comparison: c,
        convergence,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
