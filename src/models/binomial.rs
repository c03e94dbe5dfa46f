use crate::models::OptionPricer;
use crate::state::PricingInputs;

/// Cox-Ross-Rubinstein recombining binomial lattice.
///
/// u = e^{sigma * sqrt(dt)}, d = 1/u, p = (e^{r*dt} - d) / (u - d)
///
/// Level `k` holds `k + 1` nodes, ordered from the highest underlying price
/// to the lowest: node `(k, j)` is `S * u^(k-j) * d^j`. The up child of
/// `(k, j)` is `(k+1, j)` and the down child is `(k+1, j+1)`.
#[derive(Debug, Clone, Copy)]
pub struct CrrLattice {
    pub spot: f64,
    pub steps: usize,
    pub dt: f64,
    pub up: f64,
    pub down: f64,
    pub prob_up: f64,
    /// One-step discount factor e^{-r*dt}
    pub discount: f64,
}

impl CrrLattice {
    /// Derive the lattice parameters. `steps = 0` is not guarded and gives a
    /// degenerate lattice (infinite dt, NaN probability).
    pub fn new(spot: f64, maturity: f64, rate: f64, volatility: f64, steps: usize) -> Self {
        let dt = maturity / steps as f64;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let prob_up = ((rate * dt).exp() - down) / (up - down);
        let discount = (-rate * dt).exp();
        Self {
            spot,
            steps,
            dt,
            up,
            down,
            prob_up,
            discount,
        }
    }

    #[inline]
    pub fn from_inputs(inputs: &PricingInputs) -> Self {
        Self::new(
            inputs.spot,
            inputs.maturity,
            inputs.rate,
            inputs.volatility,
            inputs.steps,
        )
    }

    /// Nodes at a given level. Recombination keeps this linear in the level.
    #[inline]
    pub fn node_count(&self, level: usize) -> usize {
        level + 1
    }

    /// Underlying price at node `(level, j)`, `j = 0` being the highest.
    ///
    /// Requires `j <= level`, and `level` must fit in an `i32` for `powi`.
    #[inline]
    pub fn underlying(&self, level: usize, j: usize) -> f64 {
        debug_assert!(j <= level, "node index {j} out of range for level {level}");
        debug_assert!(level <= i32::MAX as usize, "level {level} exceeds i32 range");
        self.spot * self.up.powi((level - j) as i32) * self.down.powi(j as i32)
    }

    /// Call payoffs max(S_T - K, 0) across the `steps + 1` terminal nodes.
    pub fn terminal_payoffs(&self, strike: f64) -> Vec<f64> {
        (0..self.node_count(self.steps))
            .map(|j| (self.underlying(self.steps, j) - strike).max(0.0))
            .collect()
    }

    /// One level of backward induction, in place. The sequence shrinks by one.
    /// Updating left to right is safe: node `j` only reads `j` and `j + 1`.
    #[inline]
    pub fn step_back(&self, values: &mut Vec<f64>) {
        if values.len() < 2 {
            return;
        }
        let disc_up = self.discount * self.prob_up;
        let disc_down = self.discount * (1.0 - self.prob_up);
        for j in 0..values.len() - 1 {
            values[j] = disc_up * values[j] + disc_down * values[j + 1];
        }
        values.pop();
    }

    /// Roll a terminal layer back to the root. O(steps^2), no pruning.
    pub fn rollback(&self, mut values: Vec<f64>) -> f64 {
        while values.len() > 1 {
            self.step_back(&mut values);
        }
        values.first().copied().unwrap_or(f64::NAN)
    }
}

/// Binomial-lattice European call. Step count comes from the inputs.
pub struct BinomialCall;

impl BinomialCall {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BinomialCall {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionPricer for BinomialCall {
    #[inline]
    fn name(&self) -> &'static str {
        "Binomial"
    }

    fn price(&self, inputs: &PricingInputs) -> f64 {
        let lattice = CrrLattice::from_inputs(inputs);
        tracing::debug!(
            steps = lattice.steps,
            up = lattice.up,
            prob_up = lattice.prob_up,
            "building CRR lattice"
        );
        lattice.rollback(lattice.terminal_payoffs(inputs.strike))
    }
}

/// Free-function form: price a call on a `steps`-level CRR lattice.
pub fn binomial_call(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    steps: usize,
) -> f64 {
    let lattice = CrrLattice::new(spot, maturity, rate, volatility, steps);
    lattice.rollback(lattice.terminal_payoffs(strike))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black_scholes::black_scholes_call;

    #[test]
    fn test_reference_agrees_with_analytic() {
        let analytic = black_scholes_call(125.0, 100.0, 1.0, 0.05, 0.32);
        let lattice = binomial_call(125.0, 100.0, 1.0, 0.05, 0.32, 10_000);
        let diff = (analytic - lattice).abs();
        assert!(diff < 0.01, "lattice={lattice} analytic={analytic} diff={diff}");
    }

    #[test]
    fn test_converges_with_steps() {
        let analytic = black_scholes_call(125.0, 100.0, 1.0, 0.05, 0.32);
        let errors: Vec<f64> = [10, 100, 1000, 10_000]
            .iter()
            .map(|&n| (binomial_call(125.0, 100.0, 1.0, 0.05, 0.32, n) - analytic).abs())
            .collect();
        assert!(errors[1] < errors[0], "errors={errors:?}");
        assert!(errors[2] < errors[0], "errors={errors:?}");
        assert!(errors[3] < errors[1], "errors={errors:?}");
    }

    #[test]
    fn test_single_step_by_hand() {
        let lattice = CrrLattice::new(100.0, 1.0, 0.05, 0.2, 1);
        let expected = lattice.discount * lattice.prob_up * (100.0 * lattice.up - 100.0);
        let p = binomial_call(100.0, 100.0, 1.0, 0.05, 0.2, 1);
        assert!((p - expected).abs() < 1e-12, "one-step price={p} expected={expected}");
    }

    #[test]
    fn test_level_sizes_shrink_by_one() {
        let lattice = CrrLattice::new(125.0, 1.0, 0.05, 0.32, 50);
        let mut values = lattice.terminal_payoffs(100.0);
        assert_eq!(values.len(), lattice.node_count(50));
        for level in (0..50).rev() {
            lattice.step_back(&mut values);
            assert_eq!(values.len(), lattice.node_count(level), "level {level}");
        }
    }

    #[test]
    fn test_recombines() {
        let lattice = CrrLattice::new(125.0, 1.0, 0.05, 0.32, 8);
        // up then down and down then up both land on (2, 1), which is the spot
        let up_down = lattice.underlying(1, 0) * lattice.down;
        let down_up = lattice.underlying(1, 1) * lattice.up;
        assert!((up_down - down_up).abs() < 1e-9);
        assert!((lattice.underlying(2, 1) - 125.0).abs() < 1e-9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_underlying_rejects_index_past_level() {
        let lattice = CrrLattice::new(125.0, 1.0, 0.05, 0.32, 8);
        lattice.underlying(2, 3);
    }

    #[test]
    fn test_terminal_ordering_highest_first() {
        let lattice = CrrLattice::new(125.0, 1.0, 0.05, 0.32, 20);
        let payoffs = lattice.terminal_payoffs(100.0);
        assert!(payoffs.windows(2).all(|w| w[0] >= w[1]), "payoffs must be non-increasing");
        assert_eq!(*payoffs.last().unwrap_or(&1.0), 0.0);
    }

    #[test]
    fn test_risk_neutral_probability_in_unit_interval() {
        let lattice = CrrLattice::from_inputs(&PricingInputs::reference());
        assert!(lattice.prob_up > 0.0 && lattice.prob_up < 1.0, "p={}", lattice.prob_up);
    }

    #[test]
    fn test_within_no_arbitrage_bounds() {
        let inputs = PricingInputs::new(80.0, 100.0, 0.5, 0.02, 0.25, 500);
        let p = BinomialCall::new().price(&inputs);
        assert!(p >= inputs.intrinsic_forward() && p <= inputs.spot, "price={p}");
    }
}
