use crate::models::OptionPricer;
use crate::state::PricingInputs;
use statrs::distribution::{ContinuousCDF, Normal};

/// Black-Scholes European call.
///
/// C = S * Phi(d1) - K * e^{-rT} * Phi(d2)
///
/// where d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// and d2 = d1 - sigma * sqrt(T).
pub struct BlackScholesCall {
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl BlackScholesCall {
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }

    /// Closed-form call price. No guards: maturity or volatility of zero
    /// yields NaN/Inf through the d1 division.
    #[inline]
    pub fn call_price(
        &self,
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> f64 {
        let sigma_sqrt_t = volatility * maturity.sqrt();
        let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity)
            / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;

        spot * self.normal.cdf(d1) - strike * (-rate * maturity).exp() * self.normal.cdf(d2)
    }
}

impl Default for BlackScholesCall {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionPricer for BlackScholesCall {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    #[inline]
    fn price(&self, inputs: &PricingInputs) -> f64 {
        self.call_price(
            inputs.spot,
            inputs.strike,
            inputs.maturity,
            inputs.rate,
            inputs.volatility,
        )
    }
}

/// Free-function form of [`BlackScholesCall::call_price`].
pub fn black_scholes_call(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> f64 {
    BlackScholesCall::new().call_price(spot, strike, maturity, rate, volatility)
}
