use crate::errors::{PricingError, PricingResult};
use crate::state::PricingInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: PricingInputs,
    /// Validate inputs and reject non-finite prices before reporting.
    /// When false, NaN/Inf pass straight through to the output.
    pub strict_inputs: bool,
    pub report_format: ReportFormat,
    /// Step counts for the optional convergence sweep. Empty disables it.
    pub convergence_steps: Vec<usize>,
}

impl AppConfig {
    /// Every setting is optional; unset variables fall back to the reference scenario.
    pub fn from_env() -> PricingResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PricingResult<Self> {
        let reference = PricingInputs::reference();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let inputs = PricingInputs {
            spot: parse_or(&get, "SPOT", reference.spot)?,
            strike: parse_or(&get, "STRIKE", reference.strike)?,
            maturity: parse_or(&get, "MATURITY", reference.maturity)?,
            rate: parse_or(&get, "RATE", reference.rate)?,
            volatility: parse_or(&get, "VOLATILITY", reference.volatility)?,
            steps: parse_or(&get, "STEPS", reference.steps)?,
        };

        let strict_inputs = parse_or(&get, "STRICT_INPUTS", true)?;

        let report_format = match get("REPORT_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => ReportFormat::Text,
            Some("json") => ReportFormat::Json,
            Some(other) => {
                return Err(PricingError::Config(format!(
                    "REPORT_FORMAT: expected text or json, got {other}"
                )))
            }
        };

        let convergence_steps = match get("CONVERGENCE_STEPS") {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<usize>()
                        .map_err(|e| PricingError::Config(format!("CONVERGENCE_STEPS: {e}")))
                })
                .collect::<PricingResult<Vec<_>>>()?,
        };

        Ok(Self {
            inputs,
            strict_inputs,
            report_format,
            convergence_steps,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> PricingResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PricingError::Config(format!("{key}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> PricingResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_reference() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.inputs, PricingInputs::reference());
        assert!(cfg.strict_inputs);
        assert_eq!(cfg.report_format, ReportFormat::Text);
        assert!(cfg.convergence_steps.is_empty());
    }

    #[test]
    fn test_overrides() {
        let cfg = config_from(&[
            ("SPOT", "100"),
            ("STEPS", " 500 "),
            ("STRICT_INPUTS", "false"),
            ("REPORT_FORMAT", "json"),
            ("CONVERGENCE_STEPS", "10, 100,1000"),
        ])
        .unwrap();
        assert_eq!(cfg.inputs.spot, 100.0);
        assert_eq!(cfg.inputs.steps, 500);
        assert!(!cfg.strict_inputs);
        assert_eq!(cfg.report_format, ReportFormat::Json);
        assert_eq!(cfg.convergence_steps, vec![10, 100, 1000]);
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let err = config_from(&[("VOLATILITY", "high")]).unwrap_err();
        assert!(err.to_string().contains("VOLATILITY"), "got {err}");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(config_from(&[("REPORT_FORMAT", "xml")]).is_err());
    }
}
