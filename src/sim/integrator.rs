//! Semi-implicit (symplectic) Euler integration.
//!
//! Velocities are advanced from the current force first, positions from the
//! updated velocity afterwards:
//!
//! v_n+1 = v_n + (F_n / m) dt
//! x_n+1 = x_n + v_n+1 dt
//!
//! Two orderings are supported. `Snapshot` evaluates every force from the
//! pre-tick state and commits all bodies at once, so a failing tick leaves
//! the bodies untouched. `Sequential` updates body by body, later bodies see
//! the already advanced positions of earlier ones, and a failure leaves the
//! bodies before the failing one advanced.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::sim::body::Body;
use crate::sim::force::net_force;
use crate::sim::units::{is_finite, Float, Vector, DIMENSIONALITY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationPolicy {
    #[default]
    Snapshot,
    Sequential,
}

impl IntegrationPolicy {
    /// Advances all bodies by one timestep and appends the new positions to
    /// their trajectories.
    ///
    /// `kicks`, if given, holds one velocity delta per body that is added
    /// before the gravitational update.
    pub fn advance(
        &self,
        bodies: &mut [Body],
        kicks: Option<&[Vector]>,
        g: Float,
        time_step: Float,
    ) -> Result<()> {
        if let Some(kicks) = kicks {
            if kicks.len() != bodies.len() {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} velocity kicks for {} bodies",
                    kicks.len(),
                    bodies.len()
                )));
            }
        }
        let kick = |i: usize| kicks.map(|k| k[i]).unwrap_or([0.; DIMENSIONALITY]);

        match self {
            IntegrationPolicy::Snapshot => {
                let mut forces = Vec::with_capacity(bodies.len());
                for i in 0..bodies.len() {
                    forces.push(net_force(bodies, i, g)?);
                }
                let mut updated = Vec::with_capacity(bodies.len());
                for (i, body) in bodies.iter().enumerate() {
                    updated.push(evolve(body, &forces[i], &kick(i), time_step)?);
                }
                for (body, (velocity, position)) in bodies.iter_mut().zip(updated) {
                    commit(body, velocity, position);
                }
            }
            IntegrationPolicy::Sequential => {
                for i in 0..bodies.len() {
                    let force = net_force(bodies, i, g)?;
                    let (velocity, position) = evolve(&bodies[i], &force, &kick(i), time_step)?;
                    commit(&mut bodies[i], velocity, position);
                }
            }
        }
        Ok(())
    }
}

fn evolve(body: &Body, force: &Vector, kick: &Vector, time_step: Float) -> Result<(Vector, Vector)> {
    let mut velocity = body.velocity;
    let mut position = body.position;
    for k in 0..DIMENSIONALITY {
        velocity[k] += kick[k] + force[k] / body.mass * time_step;
        position[k] += velocity[k] * time_step;
    }
    if !is_finite(&velocity) {
        return Err(SimulationError::NonFiniteState {
            index: body.index,
            quantity: "velocity",
        });
    }
    if !is_finite(&position) {
        return Err(SimulationError::NonFiniteState {
            index: body.index,
            quantity: "position",
        });
    }
    Ok((velocity, position))
}

fn commit(body: &mut Body, velocity: Vector, position: Vector) {
    body.velocity = velocity;
    body.position = position;
    body.record_position();
}
