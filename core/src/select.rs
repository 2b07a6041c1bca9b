use crate::utils::{lerp, scurve3};
use crate::{NoiseGenerator2D, NoiseGenerator3D};

// Picks between `a` and `b` depending on the value of `control`:
// b inside (lower_bound, upper_bound), a everywhere else.
// With a positive edge_falloff the switch is smoothed over a window
// of that half-width around each bound.
#[derive(Debug, Clone)]
pub struct Select2D<A, B, C> {
    pub a: A,
    pub b: B,
    pub control: C,
    // bounds and falloff change together through set_bounds/set_edge_falloff
    lower_bound: f64,
    upper_bound: f64,
    edge_falloff: f64,
}

// Select2D over 3D points
#[derive(Debug, Clone)]
pub struct Select3D<A, B, C> {
    pub a: A,
    pub b: B,
    pub control: C,
    // bounds and falloff change together through set_bounds/set_edge_falloff
    lower_bound: f64,
    upper_bound: f64,
    edge_falloff: f64,
}

// Clamp a requested falloff so the two transition windows never overlap
fn clamp_falloff(falloff: f64, lower: f64, upper: f64) -> f64 {
    let half = ((upper - lower) / 2.0).max(0.0);
    falloff.max(0.0).min(half)
}

// The shared blend. `a` and `b` are only evaluated when their value is needed.
#[inline]
fn select(
    control: f64,
    lower: f64,
    upper: f64,
    falloff: f64,
    a: impl Fn() -> f64,
    b: impl Fn() -> f64,
) -> f64 {
    if falloff > 0.0 {
        if control < lower - falloff {
            a()
        } else if control < lower + falloff {
            let start = lower - falloff;
            let alpha = scurve3((control - start) / (2.0 * falloff));
            lerp(a(), b(), alpha)
        } else if control < upper - falloff {
            b()
        } else if control < upper + falloff {
            let start = upper - falloff;
            let alpha = scurve3((control - start) / (2.0 * falloff));
            lerp(b(), a(), alpha)
        } else {
            a()
        }
    } else if control > lower && control < upper {
        b()
    } else {
        a()
    }
}

macro_rules! select_impl {
    ($name:ident) => {
        impl<A, B, C> $name<A, B, C> {
            // Hard cutoff until set_edge_falloff is called
            pub fn new(a: A, b: B, control: C, lower_bound: f64, upper_bound: f64) -> Self {
                Self {
                    a,
                    b,
                    control,
                    lower_bound,
                    upper_bound,
                    edge_falloff: 0.0,
                }
            }

            // Clamped to [0, (upper - lower) / 2]
            pub fn set_edge_falloff(&mut self, falloff: f64) {
                self.edge_falloff = clamp_falloff(falloff, self.lower_bound, self.upper_bound);
            }

            pub fn with_edge_falloff(mut self, falloff: f64) -> Self {
                self.set_edge_falloff(falloff);
                self
            }

            pub fn edge_falloff(&self) -> f64 {
                self.edge_falloff
            }

            pub fn lower_bound(&self) -> f64 {
                self.lower_bound
            }

            pub fn upper_bound(&self) -> f64 {
                self.upper_bound
            }

            // Changing the bounds re-clamps the current falloff
            pub fn set_bounds(&mut self, lower_bound: f64, upper_bound: f64) {
                self.lower_bound = lower_bound;
                self.upper_bound = upper_bound;
                self.edge_falloff = clamp_falloff(self.edge_falloff, lower_bound, upper_bound);
            }
        }
    };
}

select_impl!(Select2D);
select_impl!(Select3D);

impl<A, B, C> NoiseGenerator2D for Select2D<A, B, C>
where
    A: NoiseGenerator2D,
    B: NoiseGenerator2D,
    C: NoiseGenerator2D,
{
    fn get2(&self, x: f64, y: f64) -> f64 {
        select(
            self.control.get2(x, y),
            self.lower_bound,
            self.upper_bound,
            self.edge_falloff,
            || self.a.get2(x, y),
            || self.b.get2(x, y),
        )
    }
}

impl<A, B, C> NoiseGenerator3D for Select3D<A, B, C>
where
    A: NoiseGenerator3D,
    B: NoiseGenerator3D,
    C: NoiseGenerator3D,
{
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        select(
            self.control.get3(x, y, z),
            self.lower_bound,
            self.upper_bound,
            self.edge_falloff,
            || self.a.get3(x, y, z),
            || self.b.get3(x, y, z),
        )
    }
}
