//! European call pricing: Black-Scholes closed form against a
//! Cox-Ross-Rubinstein binomial lattice.

pub mod compare;
pub mod config;
pub mod errors;
pub mod models;
pub mod state;

pub use crate::models::binomial::binomial_call;
pub use crate::models::black_scholes::black_scholes_call;
