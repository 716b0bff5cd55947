use crate::error::{Result, SimulationError};
use crate::sim::body::Body;
use crate::sim::units::{is_finite, Float, Vector, DIMENSIONALITY};

/// Newtonian attraction exerted on `attracted` by `attracting`.
///
/// Fails on coincident bodies instead of returning an infinite force.
pub fn gravitational_force(attracted: &Body, attracting: &Body, g: Float) -> Result<Vector> {
    let mut r = [0.; DIMENSIONALITY];
    for i in 0..DIMENSIONALITY {
        r[i] = attracting.position[i] - attracted.position[i];
    }
    let r_squared = r.iter().map(|x| x * x).sum::<Float>();
    if r_squared == 0. {
        return Err(SimulationError::DegenerateDistance {
            first: attracted.index,
            second: attracting.index,
        });
    }

    let magnitude = g * attracted.mass * attracting.mass / r_squared;
    let theta = r[1].atan2(r[0]);
    let force = [theta.cos() * magnitude, theta.sin() * magnitude];
    if !is_finite(&force) {
        return Err(SimulationError::NonFiniteState {
            index: attracted.index,
            quantity: "force",
        });
    }
    Ok(force)
}

/// Sum of the forces all other bodies exert on `bodies[index]`.
pub fn net_force(bodies: &[Body], index: usize, g: Float) -> Result<Vector> {
    let mut total = [0.; DIMENSIONALITY];
    for (j, other) in bodies.iter().enumerate() {
        if j == index {
            continue;
        }
        let force = gravitational_force(&bodies[index], other, g)?;
        for k in 0..DIMENSIONALITY {
            total[k] += force[k];
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::tests::test_body;
    use crate::sim::units::{norm, AU, G, JUPITER_MASS, SOLAR_MASS};

    #[test]
    fn force_is_antisymmetric() {
        let positions = vec![[1., 1.], [-3., 2.], [AU, -0.5 * AU], [1e-3, 0.]];
        for position in positions.iter() {
            let body1 = test_body(1, [0., 0.], [0., 0.], 2.);
            let body2 = test_body(2, *position, [0., 0.], 5.);
            let force_1 = gravitational_force(&body1, &body2, G).unwrap();
            let force_2 = gravitational_force(&body2, &body1, G).unwrap();
            println!("Force on body 1:\n{:?}", force_1);
            println!("Force on body 2:\n{:?}", force_2);
            let scale = norm(&force_1);
            assert!((force_1[0] + force_2[0]).abs() <= 1e-12 * scale);
            assert!((force_1[1] + force_2[1]).abs() <= 1e-12 * scale);
        }
    }

    #[test]
    fn force_points_towards_attracting_body() {
        let body1 = test_body(1, [1., 1.], [0., 0.], 1.);
        let body2 = test_body(2, [4., 5.], [0., 0.], 1.);
        let force = gravitational_force(&body1, &body2, 1.).unwrap();
        // |r| = 5, so |F| = 1 / 25 along (3, 4) / 5
        assert!((force[0] - 0.6 / 25.).abs() < 1e-15);
        assert!((force[1] - 0.8 / 25.).abs() < 1e-15);
    }

    #[test]
    fn sun_pulls_jupiter_with_expected_magnitude() {
        let sun = test_body(0, [0., 0.], [0., 0.], SOLAR_MASS);
        let jupiter = test_body(1, [5.2 * AU, 0.], [0., 13_070.], JUPITER_MASS);
        let force = gravitational_force(&jupiter, &sun, G).unwrap();
        let expected = G * SOLAR_MASS * JUPITER_MASS / (5.2 * AU * 5.2 * AU);
        assert!(force[0] < 0.);
        assert!(force[1].abs() < 1e-12 * expected);
        assert!((norm(&force) - expected).abs() < 1e-12 * expected);
    }

    #[test]
    fn coincident_bodies_are_degenerate() {
        let body1 = test_body(3, [AU, AU], [0., 0.], 1.);
        let body2 = test_body(4, [AU, AU], [1., 0.], 1.);
        let result = gravitational_force(&body1, &body2, G);
        assert!(matches!(
            result,
            Err(SimulationError::DegenerateDistance {
                first: 3,
                second: 4
            })
        ));
    }

    #[test]
    fn net_force_skips_self_and_cancels_symmetric_pulls() {
        let bodies = vec![
            test_body(0, [0., 0.], [0., 0.], 1.),
            test_body(1, [1., 0.], [0., 0.], 1.),
            test_body(2, [-1., 0.], [0., 0.], 1.),
        ];
        let total = net_force(&bodies, 0, 1.).unwrap();
        assert!(norm(&total) < 1e-15);

        let total = net_force(&bodies, 1, 1.).unwrap();
        // pulled by unit mass at distance 1 and at distance 2
        assert!((total[0] + 1.25).abs() < 1e-12);
    }
}
