use std::f64::consts::TAU;
use std::ops::ControlFlow;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Result, SimulationError};
use crate::sim::body::{Body, BodyKind};
use crate::sim::initial_parameters::SimulationConfig;
use crate::sim::integrator::IntegrationPolicy;
use crate::sim::perturbation::Perturbation;
use crate::sim::sink::VisualizationSink;
use crate::sim::statistics::{Report, StatisticsSnapshot};
use crate::sim::units::{Float, DAYS_PER_YEAR, SECONDS_PER_DAY};

/// Builds the central body, the planet and the asteroid population.
///
/// Asteroids are placed uniformly in distance across the belt and uniformly
/// in angle, moving tangentially at the local circular speed.
pub fn initialize<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Vec<Body>> {
    config.validate()?;
    let initial = &config.initial;
    let g = config.gravitational_constant;

    let mut bodies = vec![
        Body::new(
            0,
            BodyKind::Central,
            [0., 0.],
            [0., 0.],
            initial.central_mass,
            initial.central_appearance,
        )?,
        Body::new(
            1,
            BodyKind::Planet,
            [initial.planet.distance, 0.],
            [0., initial.planet.speed],
            initial.planet.mass,
            initial.planet.appearance,
        )?,
    ];

    if initial.asteroid_count > 0 {
        let distances = Uniform::new_inclusive(config.belt.inner_radius, config.belt.outer_radius);
        let angles = Uniform::new(0., TAU);
        let masses = Uniform::new_inclusive(initial.asteroid_min_mass, initial.asteroid_max_mass);
        for i in 0..initial.asteroid_count as usize {
            let distance: Float = distances.sample(rng);
            let angle: Float = angles.sample(rng);
            let mass = masses.sample(rng);
            let speed = (g * initial.central_mass / distance).sqrt();
            bodies.push(Body::new(
                i + 2,
                BodyKind::Asteroid,
                [distance * angle.cos(), distance * angle.sin()],
                [-speed * angle.sin(), speed * angle.cos()],
                mass,
                initial.asteroid_appearance,
            )?);
        }
    }

    log::info!(
        "initialized {} bodies ({} asteroids) with a time step of {:.2} days",
        bodies.len(),
        initial.asteroid_count,
        config.time_step / SECONDS_PER_DAY
    );
    Ok(bodies
        .into_iter()
        .map(|body| body.with_trajectory_limit(config.trajectory_limit))
        .collect())
}

/// Advances `bodies` by one tick: perturbation, integration, statistics.
pub fn step<R: Rng + ?Sized>(
    bodies: &mut [Body],
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<StatisticsSnapshot> {
    let perturbation = Perturbation::new(&config.perturbation)?;
    advance(bodies, config, &perturbation, rng)
}

fn advance<R: Rng + ?Sized>(
    bodies: &mut [Body],
    config: &SimulationConfig,
    perturbation: &Perturbation,
    rng: &mut R,
) -> Result<StatisticsSnapshot> {
    let g = config.gravitational_constant;
    let dt = config.time_step;
    match config.integration {
        IntegrationPolicy::Snapshot => {
            let kicks = perturbation.draw_kicks(bodies, rng);
            config.integration.advance(bodies, Some(&kicks), g, dt)?;
        }
        IntegrationPolicy::Sequential => {
            perturbation.apply(bodies, rng);
            config.integration.advance(bodies, None, g, dt)?;
        }
    }
    Ok(StatisticsSnapshot::of_asteroids(
        bodies,
        &config.belt,
        config.top_n,
    ))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Initializing,
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct StellarSystem {
    config: SimulationConfig,
    perturbation: Perturbation,
    pub(crate) bodies: Vec<Body>,
    pub(crate) current_time: Float,
    tick: u64,
    state: SimulationState,
}

impl StellarSystem {
    pub fn new<R: Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Result<StellarSystem> {
        let bodies = initialize(&config, rng)?;
        Self::from_bodies(config, bodies)
    }

    /// Wraps hand-made bodies, e.g. for scenarios other than the asteroid belt.
    ///
    /// The configured trajectory limit replaces whatever cap the bodies carry.
    pub fn from_bodies(config: SimulationConfig, bodies: Vec<Body>) -> Result<StellarSystem> {
        config.validate()?;
        for body in bodies.iter() {
            if !(body.mass > 0.) || !body.mass.is_finite() {
                return Err(SimulationError::InvalidMass {
                    index: body.index,
                    mass: body.mass,
                });
            }
        }
        let bodies = bodies
            .into_iter()
            .map(|body| body.with_trajectory_limit(config.trajectory_limit))
            .collect();
        let perturbation = Perturbation::new(&config.perturbation)?;
        Ok(StellarSystem {
            config,
            perturbation,
            bodies,
            current_time: 0.,
            tick: 0,
            state: SimulationState::Initializing,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seconds_elapsed(&self) -> Float {
        self.current_time
    }

    pub fn days_elapsed(&self) -> Float {
        self.current_time / SECONDS_PER_DAY
    }

    pub fn years_elapsed(&self) -> Float {
        self.days_elapsed() / DAYS_PER_YEAR
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        StatisticsSnapshot::of_asteroids(&self.bodies, &self.config.belt, self.config.top_n)
    }

    pub fn stop(&mut self) {
        self.state = SimulationState::Stopped;
    }

    /// Runs one tick. Any error is fatal and stops the system.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<StatisticsSnapshot> {
        if self.state == SimulationState::Stopped {
            return Err(SimulationError::Stopped);
        }
        self.state = SimulationState::Running;
        match advance(&mut self.bodies, &self.config, &self.perturbation, rng) {
            Ok(statistics) => {
                self.current_time += self.config.time_step;
                self.tick += 1;
                log::debug!(
                    "tick {}: {:.2} years, {} asteroids out of belt",
                    self.tick,
                    self.years_elapsed(),
                    statistics.out_of_belt
                );
                Ok(statistics)
            }
            Err(error) => {
                self.stop();
                Err(error)
            }
        }
    }

    /// Steps until `max_ticks` are done or the sink asks to stop, handing
    /// every tick to `sink`. Returns the number of ticks run.
    pub fn run<R, S>(&mut self, max_ticks: Option<u64>, rng: &mut R, sink: &mut S) -> Result<u64>
    where
        R: Rng + ?Sized,
        S: VisualizationSink + ?Sized,
    {
        let mut ticks = 0;
        while max_ticks.map_or(true, |max| ticks < max) {
            let statistics = self.step(rng)?;
            ticks += 1;
            let report = Report {
                tick: self.tick,
                years_elapsed: self.years_elapsed(),
                statistics,
            };
            if let ControlFlow::Break(()) = sink.present(&self.bodies, &report) {
                log::info!("stop requested after {} ticks", self.tick);
                self.stop();
                break;
            }
        }
        Ok(ticks)
    }
}
