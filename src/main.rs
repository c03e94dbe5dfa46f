use call_compare::compare::{self, Comparator};
use call_compare::config::{AppConfig, ReportFormat};
use call_compare::errors::PricingResult;
use call_compare::models::binomial::BinomialCall;
use call_compare::models::black_scholes::BlackScholesCall;

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cfg) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cfg: &AppConfig) -> PricingResult<()> {
    let inputs = cfg.inputs;
    tracing::info!(
        spot = inputs.spot,
        strike = inputs.strike,
        maturity = inputs.maturity,
        rate = inputs.rate,
        volatility = inputs.volatility,
        steps = inputs.steps,
        strict = cfg.strict_inputs,
        "pricing european call"
    );

    let bs = BlackScholesCall::new();
    let binomial = BinomialCall::new();
    let comparator = Comparator::new(&bs, &binomial);

    let comparison = if cfg.strict_inputs {
        comparator.compare_strict(&inputs)?
    } else {
        let c = comparator.compare(&inputs);
        if !c.is_finite() {
            tracing::warn!("non-finite price in lenient mode");
        }
        c
    };

    let sweep = if cfg.convergence_steps.is_empty() {
        Vec::new()
    } else if cfg.strict_inputs {
        comparator.convergence_strict(&inputs, &cfg.convergence_steps)?
    } else {
        comparator.convergence(&inputs, &cfg.convergence_steps)
    };

    match cfg.report_format {
        ReportFormat::Text => {
            print!("{}", compare::render_text(&comparison));
            if !sweep.is_empty() {
                print!("{}", compare::render_convergence(&sweep));
            }
        }
        ReportFormat::Json => println!("{}", compare::render_json(&comparison, &sweep)?),
    }

    tracing::info!(difference = comparison.difference, "done");
    Ok(())
}
