//! Simulation configuration.
//!
//! Every struct here deserializes with `#[serde(default)]`, so a YAML file
//! only needs to name the values it changes:
//!
//! ```yaml
//! time_step: 86400.0
//! perturbation:
//!   probability: 0.0
//! initial:
//!   asteroid_count: 50
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::sim::body::{Appearance, Color};
use crate::sim::integrator::IntegrationPolicy;
use crate::sim::perturbation::Perturbation;
use crate::sim::statistics::Belt;
use crate::sim::units::{
    Float, AU, G, JUPITER_DISTANCE, JUPITER_MASS, JUPITER_SPEED, SECONDS_PER_DAY, SOLAR_MASS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationParameters {
    /// Chance per tick that an asteroid is kicked.
    pub probability: Float,
    /// Kicks are drawn uniformly from [-max, max] per velocity component, in m/s.
    pub max_velocity_kick: Float,
}

impl Default for PerturbationParameters {
    fn default() -> Self {
        Self {
            probability: 0.8,
            max_velocity_kick: 100.,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetParameters {
    pub distance: Float,
    pub speed: Float,
    pub mass: Float,
    pub appearance: Appearance,
}

impl Default for PlanetParameters {
    fn default() -> Self {
        Self {
            distance: JUPITER_DISTANCE,
            speed: JUPITER_SPEED,
            mass: JUPITER_MASS,
            appearance: Appearance {
                radius: 18.,
                color: Color::BLUE,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialParameters {
    pub central_mass: Float,
    pub central_appearance: Appearance,
    pub planet: PlanetParameters,
    pub asteroid_count: u32,
    pub asteroid_min_mass: Float,
    pub asteroid_max_mass: Float,
    pub asteroid_appearance: Appearance,
}

impl Default for InitialParameters {
    fn default() -> Self {
        Self {
            central_mass: SOLAR_MASS,
            central_appearance: Appearance {
                radius: 30.,
                color: Color::YELLOW,
            },
            planet: PlanetParameters::default(),
            asteroid_count: 300,
            asteroid_min_mass: 1e15,
            asteroid_max_mass: 1e20,
            asteroid_appearance: Appearance {
                radius: 4.,
                color: Color::GREY,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravitational_constant: Float,
    /// Seconds per tick.
    pub time_step: Float,
    /// Pixels per meter. Only meaningful to the visualization sink.
    pub display_scale: Float,
    pub belt: Belt,
    pub top_n: usize,
    pub perturbation: PerturbationParameters,
    pub integration: IntegrationPolicy,
    /// Keep only this many trajectory points per body. Unbounded if absent.
    pub trajectory_limit: Option<usize>,
    pub initial: InitialParameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            time_step: 3.61 * SECONDS_PER_DAY,
            display_scale: 50. / AU,
            belt: Belt::default(),
            top_n: 5,
            perturbation: PerturbationParameters::default(),
            integration: IntegrationPolicy::default(),
            trajectory_limit: None,
            initial: InitialParameters::default(),
        }
    }
}

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfig(message()))
    }
}

fn require_positive_mass(index: usize, mass: Float) -> Result<()> {
    if mass > 0. && mass.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidMass { index, mass })
    }
}

impl SimulationConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<SimulationConfig> {
        let config: SimulationConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<SimulationConfig> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<()> {
        let g = self.gravitational_constant;
        require(g > 0. && g.is_finite(), || {
            format!("gravitational constant {} must be positive", g)
        })?;
        let dt = self.time_step;
        require(dt > 0. && dt.is_finite(), || {
            format!("time step {} must be positive", dt)
        })?;
        let belt = &self.belt;
        require(
            belt.inner_radius > 0.
                && belt.inner_radius < belt.outer_radius
                && belt.outer_radius.is_finite(),
            || {
                format!(
                    "belt [{}, {}] must satisfy 0 < inner < outer",
                    belt.inner_radius, belt.outer_radius
                )
            },
        )?;
        Perturbation::new(&self.perturbation)?;

        let initial = &self.initial;
        require_positive_mass(0, initial.central_mass)?;
        require_positive_mass(1, initial.planet.mass)?;
        require(
            initial.planet.distance > 0. && initial.planet.distance.is_finite(),
            || format!("planet distance {} must be positive", initial.planet.distance),
        )?;
        require(initial.planet.speed.is_finite(), || {
            format!("planet speed {} must be finite", initial.planet.speed)
        })?;
        if initial.asteroid_count > 0 {
            require_positive_mass(2, initial.asteroid_min_mass)?;
            require_positive_mass(2, initial.asteroid_max_mass)?;
            require(initial.asteroid_min_mass <= initial.asteroid_max_mass, || {
                format!(
                    "asteroid mass range [{}, {}] is empty",
                    initial.asteroid_min_mass, initial.asteroid_max_mass
                )
            })?;
        }

        if self.trajectory_limit == Some(0) {
            log::warn!("trajectory limit of zero, no trajectories will be recorded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.initial.asteroid_count, 300);
        assert!((config.time_step - 311_904.).abs() < 1e-6);
        assert_eq!(config.perturbation.probability, 0.8);
    }

    #[test]
    fn partial_yaml_overlays_defaults() {
        let yaml = "
time_step: 86400.0
integration: sequential
trajectory_limit: 100
perturbation:
  probability: 0.0
initial:
  asteroid_count: 12
  planet:
    speed: 13000.0
";
        let config = SimulationConfig::from_reader(yaml.as_bytes()).unwrap();
        println!("{:?}", config);
        assert_eq!(config.time_step, 86400.);
        assert_eq!(config.integration, IntegrationPolicy::Sequential);
        assert_eq!(config.trajectory_limit, Some(100));
        assert_eq!(config.perturbation.probability, 0.);
        assert_eq!(config.perturbation.max_velocity_kick, 100.);
        assert_eq!(config.initial.asteroid_count, 12);
        assert_eq!(config.initial.planet.speed, 13000.);
        assert_eq!(config.initial.planet.mass, JUPITER_MASS);
        assert_eq!(config.belt, Belt::default());
    }

    #[test]
    fn bundled_scenario_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/asteroid_belt.yaml");
        let config = SimulationConfig::from_path(path).unwrap();
        let defaults = SimulationConfig::default();
        assert_eq!(config.trajectory_limit, Some(2000));
        assert_eq!(config.initial.asteroid_count, 300);
        assert_eq!(config.initial.planet.appearance, defaults.initial.planet.appearance);
        assert!((config.belt.inner_radius - defaults.belt.inner_radius).abs() < 1.);
        assert!((config.belt.outer_radius - defaults.belt.outer_radius).abs() < 1.);
        assert!((config.time_step - defaults.time_step).abs() < 1e-6);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let result = SimulationConfig::from_reader("time_step: [1, 2".as_bytes());
        assert!(matches!(result, Err(SimulationError::Config(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationConfig::from_path("/nonexistent/asteroid_belt.yaml");
        assert!(matches!(result, Err(SimulationError::Io(_))));
    }

    #[test]
    fn non_positive_masses_are_rejected() {
        let mut config = SimulationConfig::default();
        config.initial.central_mass = 0.;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidMass { index: 0, .. })
        ));

        let mut config = SimulationConfig::default();
        config.initial.planet.mass = -1.898e27;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidMass { index: 1, .. })
        ));

        let mut config = SimulationConfig::default();
        config.initial.asteroid_min_mass = 0.;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidMass { .. })
        ));
    }

    #[test]
    fn invalid_numerics_are_rejected() {
        let mutations: Vec<fn(&mut SimulationConfig)> = vec![
            |c: &mut SimulationConfig| c.gravitational_constant = 0.,
            |c: &mut SimulationConfig| c.time_step = -1.,
            |c: &mut SimulationConfig| c.time_step = Float::NAN,
            |c: &mut SimulationConfig| c.belt.inner_radius = 4. * AU,
            |c: &mut SimulationConfig| c.belt.inner_radius = 0.,
            |c: &mut SimulationConfig| c.perturbation.probability = 1.1,
            |c: &mut SimulationConfig| c.perturbation.max_velocity_kick = -5.,
            |c: &mut SimulationConfig| c.perturbation.max_velocity_kick = 1e308,
            |c: &mut SimulationConfig| c.initial.asteroid_min_mass = 1e21,
            |c: &mut SimulationConfig| c.initial.planet.distance = 0.,
        ];
        for (i, mutate) in mutations.iter().enumerate() {
            let mut config = SimulationConfig::default();
            mutate(&mut config);
            let result = config.validate();
            println!("mutation {}: {:?}", i, result);
            assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
        }
    }
}
