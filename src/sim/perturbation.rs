use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

use crate::error::{Result, SimulationError};
use crate::sim::body::Body;
use crate::sim::initial_parameters::PerturbationParameters;
use crate::sim::units::{Vector, DIMENSIONALITY};

/// Random velocity kicks applied to asteroids every tick.
#[derive(Clone, Debug)]
pub struct Perturbation {
    kicked: Bernoulli,
    kick: Uniform<f64>,
}

impl Perturbation {
    pub fn new(params: &PerturbationParameters) -> Result<Perturbation> {
        let kicked = Bernoulli::new(params.probability).map_err(|_| {
            SimulationError::InvalidConfig(format!(
                "perturbation probability {} is outside [0, 1]",
                params.probability
            ))
        })?;
        let max = params.max_velocity_kick;
        // the sampled range spans 2 * max, which must stay finite
        if !(max >= 0.) || !(max + max).is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "maximal velocity kick {} must be non-negative with a finite range",
                max
            )));
        }
        Ok(Perturbation {
            kicked,
            kick: Uniform::new_inclusive(-max, max),
        })
    }

    /// One velocity delta per body, zero for everything that is not an asteroid.
    ///
    /// Draw order per asteroid: coin flip, then x and y magnitudes if kicked.
    pub fn draw_kicks<R: Rng + ?Sized>(&self, bodies: &[Body], rng: &mut R) -> Vec<Vector> {
        bodies
            .iter()
            .map(|body| {
                let mut delta = [0.; DIMENSIONALITY];
                if body.is_asteroid() && self.kicked.sample(rng) {
                    for component in delta.iter_mut() {
                        *component = self.kick.sample(rng);
                    }
                }
                delta
            })
            .collect()
    }

    pub fn apply<R: Rng + ?Sized>(&self, bodies: &mut [Body], rng: &mut R) {
        let kicks = self.draw_kicks(bodies, rng);
        for (body, kick) in bodies.iter_mut().zip(kicks.iter()) {
            body.add_velocity(kick);
        }
    }
}
