use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::body::Body;
use crate::sim::units::{Float, AU};

/// Annulus around the origin, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Belt {
    pub inner_radius: Float,
    pub outer_radius: Float,
}

impl Default for Belt {
    fn default() -> Self {
        Self {
            inner_radius: 2.0 * AU,
            outer_radius: 3.5 * AU,
        }
    }
}

impl Belt {
    pub fn contains(&self, distance: Float) -> bool {
        distance >= self.inner_radius && distance <= self.outer_radius
    }
}

pub fn out_of_belt_count<'a>(bodies: impl IntoIterator<Item = &'a Body>, belt: &Belt) -> usize {
    bodies
        .into_iter()
        .filter(|body| !belt.contains(body.distance_from_origin()))
        .count()
}

/// Distances from the origin, largest first, at most `top_n` of them.
pub fn top_farthest_distances<'a>(
    bodies: impl IntoIterator<Item = &'a Body>,
    top_n: usize,
) -> Vec<Float> {
    let mut distances: Vec<Float> = bodies
        .into_iter()
        .map(|body| body.distance_from_origin())
        .collect();
    distances.sort_by(|a, b| b.total_cmp(a));
    distances.truncate(top_n);
    distances
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatisticsSnapshot {
    pub out_of_belt: usize,
    pub top_distances: Vec<Float>,
}

impl StatisticsSnapshot {
    /// Statistics over the asteroids among `bodies`.
    pub fn of_asteroids(bodies: &[Body], belt: &Belt, top_n: usize) -> Self {
        let asteroids = || bodies.iter().filter(|body| body.is_asteroid());
        StatisticsSnapshot {
            out_of_belt: out_of_belt_count(asteroids(), belt),
            top_distances: top_farthest_distances(asteroids(), top_n),
        }
    }
}

/// What the driver hands to the visualization sink after every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub tick: u64,
    pub years_elapsed: Float,
    pub statistics: StatisticsSnapshot,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Asteroids out of belt: {}", self.statistics.out_of_belt)?;
        write!(f, "Time elapsed: {:.2} years", self.years_elapsed)?;
        for (i, distance) in self.statistics.top_distances.iter().enumerate() {
            write!(f, "\nTop {} distance: {:.2} AU", i + 1, distance / AU)?;
        }
        Ok(())
    }
}
