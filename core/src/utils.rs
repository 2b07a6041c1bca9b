// Numeric helpers shared by every generator and operator

// Linear interpolation, returns a at t = 0 and b at t = 1
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

// Cubic s-curve 3t^2 - 2t^3, zero slope at both ends
#[inline]
pub fn scurve3(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

// Quintic s-curve 6t^5 - 15t^4 + 10t^3 as defined by Ken Perlin.
// First and second derivatives are zero at t=0 and t=1.
#[inline]
pub fn scurve5(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}
