//! Asteroid belt dynamics under Newtonian gravity with stochastic velocity
//! perturbations.
//!
//! The physics core is `initialize` and `step`; `StellarSystem` wraps them
//! with elapsed time, a run state and a loop feeding a [`VisualizationSink`].

pub mod error;
pub mod sim;

pub use error::{Result, SimulationError};
pub use sim::body::{Appearance, Body, BodyKind, Color, Trajectory};
pub use sim::force::{gravitational_force, net_force};
pub use sim::initial_parameters::{
    InitialParameters, PerturbationParameters, PlanetParameters, SimulationConfig,
};
pub use sim::integrator::IntegrationPolicy;
pub use sim::perturbation::Perturbation;
pub use sim::sink::{LogSink, VisualizationSink};
pub use sim::statistics::{
    out_of_belt_count, top_farthest_distances, Belt, Report, StatisticsSnapshot,
};
pub use sim::system::{initialize, step, SimulationState, StellarSystem};
pub use sim::units::{Float, Vector, AU, G};
