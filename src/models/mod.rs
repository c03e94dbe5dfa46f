pub mod black_scholes;
pub mod binomial;

use crate::state::PricingInputs;

/// All call pricers implement this trait.
/// price() must be a pure function: deterministic output from inputs only.
/// Invalid inputs are not guarded here; NaN/Inf propagate to the caller.
pub trait OptionPricer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Present value of a European call under `inputs`.
    fn price(&self, inputs: &PricingInputs) -> f64;
}
