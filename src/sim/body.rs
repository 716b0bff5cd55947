use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::sim::units::{norm, Float, Vector, DIMENSIONALITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Central,
    Planet,
    Asteroid,
}

/// Display color. Stored and handed to the sink, never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const BLUE: Color = Color(100, 149, 237);
    pub const GREY: Color = Color(169, 169, 169);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub radius: Float,
    pub color: Color,
}

/// Past positions of a body, oldest first.
///
/// Unbounded unless a limit is given, in which case only the most recent
/// `limit` points are retained.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    points: VecDeque<Vector>,
    limit: Option<usize>,
}

impl Trajectory {
    pub fn new(limit: Option<usize>) -> Trajectory {
        Trajectory {
            points: VecDeque::new(),
            limit,
        }
    }

    pub(crate) fn push(&mut self, point: Vector) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.points.len() >= limit {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Changes the cap, dropping the oldest points that no longer fit.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        if let Some(limit) = limit {
            while self.points.len() > limit {
                self.points.pop_front();
            }
        }
        self.limit = limit;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&Vector> {
        self.points.back()
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) index: usize,
    pub(crate) kind: BodyKind,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) mass: Float,
    pub(crate) appearance: Appearance,
    pub(crate) trajectory: Trajectory,
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Body {
    pub fn new(
        index: usize,
        kind: BodyKind,
        position: Vector,
        velocity: Vector,
        mass: Float,
        appearance: Appearance,
    ) -> Result<Body> {
        if !(mass > 0.) || !mass.is_finite() {
            return Err(SimulationError::InvalidMass { index, mass });
        }
        Ok(Body {
            index,
            kind,
            position,
            velocity,
            mass,
            appearance,
            trajectory: Trajectory::default(),
        })
    }

    pub fn with_trajectory_limit(mut self, limit: Option<usize>) -> Body {
        self.trajectory.set_limit(limit);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_asteroid(&self) -> bool {
        self.kind == BodyKind::Asteroid
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn mass(&self) -> Float {
        self.mass
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn distance_from_origin(&self) -> Float {
        norm(&self.position)
    }

    pub(crate) fn add_velocity(&mut self, delta: &Vector) {
        for i in 0..DIMENSIONALITY {
            self.velocity[i] += delta[i];
        }
    }

    pub(crate) fn record_position(&mut self) {
        self.trajectory.push(self.position);
    }

    pub fn specific_relative_angular_momentum(&self, other: &Self) -> Float {
        let mut relative_position = [0.; DIMENSIONALITY];
        let mut relative_velocity = [0.; DIMENSIONALITY];
        for i in 0..DIMENSIONALITY {
            relative_position[i] = self.position[i] - other.position[i];
            relative_velocity[i] = self.velocity[i] - other.velocity[i];
        }
        relative_position[0] * relative_velocity[1] - relative_position[1] * relative_velocity[0]
    }
}
