pub mod body;
pub mod force;
pub mod initial_parameters;
pub mod integrator;
pub mod perturbation;
pub mod sink;
pub mod statistics;
pub mod system;
pub mod units;
