use crate::errors::{PricingError, PricingResult};

// ── Shared pricing inputs ──

/// Parameters shared by both pricers for a single comparison.
/// `steps` is only read by the lattice.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PricingInputs {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub volatility: f64,
    pub steps: usize,
}

impl PricingInputs {
    #[inline]
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        steps: usize,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            steps,
        }
    }

    /// The reference scenario: S=125, K=100, T=1y, r=5%, sigma=32%, N=10000.
    pub fn reference() -> Self {
        Self::new(125.0, 100.0, 1.0, 0.05, 0.32, 10_000)
    }

    #[inline]
    pub fn with_steps(self, steps: usize) -> Self {
        Self { steps, ..self }
    }

    /// Check every domain invariant, reporting the first field that breaks one.
    /// NaN fails the positivity checks since every comparison with NaN is false.
    pub fn validate(&self) -> PricingResult<()> {
        let positive = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("volatility", self.volatility),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(PricingError::InvalidInput { field, value });
            }
        }

        if !self.rate.is_finite() {
            return Err(PricingError::InvalidInput {
                field: "rate",
                value: self.rate,
            });
        }

        if self.steps == 0 {
            return Err(PricingError::InvalidInput {
                field: "steps",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// European call lower bound: max(S - K*e^{-rT}, 0).
    #[inline]
    pub fn intrinsic_forward(&self) -> f64 {
        (self.spot - self.strike * (-self.rate * self.maturity).exp()).max(0.0)
    }
}

impl Default for PricingInputs {
    fn default() -> Self {
        Self::reference()
    }
}
