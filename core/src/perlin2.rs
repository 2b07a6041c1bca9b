use std::f64::consts::TAU;

use crate::utils::{lerp, scurve3, scurve5};
use crate::{NoiseGenerator2D, RandomSource, TABLE_MASK, TABLE_SIZE, permutation_table};

// How the corner values get blended inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    // Plain linear weights, visible creases along cell edges
    Fast,
    // Cubic s-curve
    #[default]
    Standard,
    // Quintic s-curve, smooth second derivative
    High,
}

impl Quality {
    #[inline]
    fn weight(self, t: f64) -> f64 {
        match self {
            Quality::Fast => t,
            Quality::Standard => scurve3(t),
            Quality::High => scurve5(t),
        }
    }
}

// Integer codes used by configuration documents: 0 fast, 1 standard, 2 high
impl TryFrom<i64> for Quality {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Quality::Fast),
            1 => Ok(Quality::Standard),
            2 => Ok(Quality::High),
            other => Err(other),
        }
    }
}

impl From<Quality> for i64 {
    fn from(q: Quality) -> Self {
        match q {
            Quality::Fast => 0,
            Quality::Standard => 1,
            Quality::High => 2,
        }
    }
}

// Classic 2D gradient noise with random unit gradients.
// Output is 0 at every integer lattice point.
#[derive(Debug, Clone)]
pub struct Perlin2D {
    perm: [u8; TABLE_SIZE],           // permutation of 0..256
    gradients: [[f64; 2]; TABLE_SIZE], // random unit vectors
    quality: Quality,
}

impl Perlin2D {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R, quality: Quality) -> Self {
        let perm = permutation_table(rng);

        // Each gradient is a unit vector at a uniformly random angle
        let mut gradients = [[0.0; 2]; TABLE_SIZE];
        for g in gradients.iter_mut() {
            let angle = rng.uniform() * TAU;
            *g = [angle.cos(), angle.sin()];
        }

        Self {
            perm,
            gradients,
            quality,
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn permutation(&self) -> &[u8; TABLE_SIZE] {
        &self.perm
    }

    // Gradient assigned to lattice corner (x, y)
    #[inline]
    fn gradient(&self, x: i64, y: i64) -> [f64; 2] {
        let px = self.perm[(x & TABLE_MASK) as usize] as usize;
        let py = self.perm[(y & TABLE_MASK) as usize] as usize;
        self.gradients[(px + py) & TABLE_MASK as usize]
    }

    // Influence of a corner gradient on the point at offset (dx, dy) from it
    #[inline]
    fn corner(g: [f64; 2], dx: f64, dy: f64) -> f64 {
        g[0] * dx + g[1] * dy
    }
}

impl NoiseGenerator2D for Perlin2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        // Which cell, and where inside it
        let x0f = x.floor();
        let y0f = y.floor();
        let x0 = x0f as i64;
        let y0 = y0f as i64;
        let xf = x - x0f;
        let yf = y - y0f;

        let v00 = Self::corner(self.gradient(x0, y0), xf, yf);
        let v10 = Self::corner(self.gradient(x0 + 1, y0), xf - 1.0, yf);
        let v01 = Self::corner(self.gradient(x0, y0 + 1), xf, yf - 1.0);
        let v11 = Self::corner(self.gradient(x0 + 1, y0 + 1), xf - 1.0, yf - 1.0);

        let u = self.quality.weight(xf);
        let v = self.quality.weight(yf);

        // Blend along x first, then y
        let bottom = lerp(v00, v10, u);
        let top = lerp(v01, v11, u);
        lerp(bottom, top, v)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NoiseGenerator2D, seeded};

    use super::{Perlin2D, Quality};

    #[test]
    fn perlin2_determinism() {
        let p1 = Perlin2D::new(&mut seeded(1234), Quality::High);
        let p2 = Perlin2D::new(&mut seeded(1234), Quality::High);
        for i in 0..200 {
            let x = i as f64 * 0.37 - 20.0;
            let y = i as f64 * -0.61 + 7.5;
            assert_eq!(p1.get2(x, y), p2.get2(x, y));
        }
    }

    #[test]
    fn perlin2_zero_on_lattice() {
        for q in [Quality::Fast, Quality::Standard, Quality::High] {
            let p = Perlin2D::new(&mut seeded(7), q);
            for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (-3.0, 12.0), (255.0, 256.0), (-1000.0, -1.0)] {
                assert_eq!(p.get2(x, y), 0.0, "nonzero at lattice point ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn perlin2_range() {
        let p = Perlin2D::new(&mut seeded(0), Quality::Standard);
        for i in 0..5000 {
            let x = (i % 100) as f64 * 0.173 - 8.0;
            let y = (i / 100) as f64 * 0.291 - 8.0;
            let v = p.get2(x, y);
            // Unit gradients bound each corner by sqrt(2)
            assert!(v.abs() <= std::f64::consts::SQRT_2, "value {} out of range", v);
        }
    }

    #[test]
    fn perlin2_is_continuous() {
        let p = Perlin2D::new(&mut seeded(99), Quality::High);
        let eps = 1e-6;
        for i in 0..100 {
            let x = i as f64 * 0.25 + 0.999_999;
            let y = i as f64 * 0.5;
            assert!((p.get2(x, y) - p.get2(x + eps, y)).abs() < 1e-4);
        }
    }

    #[test]
    fn perlin2_seeds_differ() {
        let a = Perlin2D::new(&mut seeded(1), Quality::Standard);
        let b = Perlin2D::new(&mut seeded(2), Quality::Standard);
        let differs = (0..50).any(|i| {
            let x = i as f64 * 0.31 + 0.5;
            a.get2(x, 0.25) != b.get2(x, 0.25)
        });
        assert!(differs);
    }

    #[test]
    fn perlin2_gradients_are_unit() {
        let p = Perlin2D::new(&mut seeded(5), Quality::Fast);
        for g in p.gradients.iter() {
            let len = (g[0] * g[0] + g[1] * g[1]).sqrt();
            assert!((len - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn quality_codes() {
        assert_eq!(Quality::try_from(0), Ok(Quality::Fast));
        assert_eq!(Quality::try_from(1), Ok(Quality::Standard));
        assert_eq!(Quality::try_from(2), Ok(Quality::High));
        assert_eq!(Quality::try_from(3), Err(3));
        assert_eq!(i64::from(Quality::High), 2);
        assert_eq!(Quality::default(), Quality::Standard);
    }
}
