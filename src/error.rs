//! Error types for the asteroid belt simulation.

use thiserror::Error;

use crate::sim::units::Float;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("body {index} has non-positive mass {mass}")]
    InvalidMass { index: usize, mass: Float },

    #[error("bodies {first} and {second} occupy the same position")]
    DegenerateDistance { first: usize, second: usize },

    #[error("non-finite {quantity} on body {index}")]
    NonFiniteState { index: usize, quantity: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("simulation has been stopped")]
    Stopped,

    #[error("YAML parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
