pub type Float = f64;
pub const DIMENSIONALITY: usize = 2;
pub type Vector = [Float; DIMENSIONALITY];

//SI units throughout: meters, kilograms, seconds.
pub const G: Float = 6.67428e-11;
pub const AU: Float = 1.496e11;
pub const SECONDS_PER_DAY: Float = 3600. * 24.;
//Julian year
pub const DAYS_PER_YEAR: Float = 365.25;

pub const SOLAR_MASS: Float = 1.98892e30;
pub const JUPITER_MASS: Float = 1.898e27;
pub const JUPITER_DISTANCE: Float = 5.2 * AU;
//Measured, slightly above the circular speed at 5.2 AU
pub const JUPITER_SPEED: Float = 13_070.;

pub(crate) fn norm(vector: &Vector) -> Float {
    vector.iter().map(|x| x * x).sum::<Float>().sqrt()
}

pub(crate) fn is_finite(vector: &Vector) -> bool {
    vector.iter().all(|x| x.is_finite())
}
