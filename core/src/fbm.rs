use crate::{NoiseGenerator2D, NoiseGenerator3D};

// Fractal Brownian motion: sums octaves of an underlying field, each at a
// higher frequency and (usually) lower amplitude than the last.
// The sum is not normalized, so its range grows with octaves and persistence.
#[derive(Debug, Clone)]
pub struct Fbm2D<S> {
    pub source: S,
    pub octaves: u32,     // number of rounds, 0 yields 0.0
    pub persistence: f64, // amplitude multiplier per octave
    pub lacunarity: f64,  // frequency multiplier per octave
    pub frequency: f64,   // frequency of the first octave
}

impl<S> Fbm2D<S> {
    // One octave at frequency 1, persistence 0.5, lacunarity 2
    pub fn new(source: S) -> Self {
        Self::with_params(source, 1, 0.5, 2.0, 1.0)
    }

    pub fn with_params(
        source: S,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        frequency: f64,
    ) -> Self {
        Self {
            source,
            octaves,
            persistence,
            lacunarity,
            frequency,
        }
    }
}

impl<S: NoiseGenerator2D> NoiseGenerator2D for Fbm2D<S> {
    fn get2(&self, x: f64, y: f64) -> f64 {
        let mut x = x * self.frequency;
        let mut y = y * self.frequency;
        let mut amplitude = 1.0;
        let mut total = 0.0;

        for _ in 0..self.octaves {
            total += self.source.get2(x, y) * amplitude;
            x *= self.lacunarity;
            y *= self.lacunarity;
            amplitude *= self.persistence;
        }
        total
    }
}

// Fbm2D over 3D points
#[derive(Debug, Clone)]
pub struct Fbm3D<S> {
    pub source: S,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub frequency: f64,
}

impl<S> Fbm3D<S> {
    pub fn new(source: S) -> Self {
        Self::with_params(source, 1, 0.5, 2.0, 1.0)
    }

    pub fn with_params(
        source: S,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        frequency: f64,
    ) -> Self {
        Self {
            source,
            octaves,
            persistence,
            lacunarity,
            frequency,
        }
    }
}

impl<S: NoiseGenerator3D> NoiseGenerator3D for Fbm3D<S> {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut x = x * self.frequency;
        let mut y = y * self.frequency;
        let mut z = z * self.frequency;
        let mut amplitude = 1.0;
        let mut total = 0.0;

        for _ in 0..self.octaves {
            total += self.source.get3(x, y, z) * amplitude;
            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            amplitude *= self.persistence;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use crate::{NoiseGenerator2D, NoiseGenerator3D, OpenSimplex, Perlin2D, Quality, seeded};

    use super::{Fbm2D, Fbm3D};

    // Returns x + 10y (+ 100z), handy for checking which coordinates were sampled
    struct Linear;

    impl NoiseGenerator2D for Linear {
        fn get2(&self, x: f64, y: f64) -> f64 {
            x + 10.0 * y
        }
    }

    impl NoiseGenerator3D for Linear {
        fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
            x + 10.0 * y + 100.0 * z
        }
    }

    #[test]
    fn fbm_single_octave_matches_source() {
        let perlin = Perlin2D::new(&mut seeded(3), Quality::High);
        for &(persistence, lacunarity) in &[(0.5, 2.0), (0.9, 3.7), (0.0, 0.0)] {
            let fbm = Fbm2D::with_params(&perlin, 1, persistence, lacunarity, 1.0);
            for i in 0..100 {
                let (x, y) = (i as f64 * 0.217, i as f64 * -0.133);
                assert_eq!(fbm.get2(x, y), perlin.get2(x, y));
            }
        }
    }

    #[test]
    fn fbm_zero_octaves_is_zero() {
        let fbm = Fbm2D::with_params(Linear, 0, 0.5, 2.0, 1.0);
        assert_eq!(fbm.get2(3.0, 4.0), 0.0);
        let fbm3 = Fbm3D::with_params(Linear, 0, 0.5, 2.0, 1.0);
        assert_eq!(fbm3.get3(3.0, 4.0, 5.0), 0.0);
    }

    #[test]
    fn fbm_octave_schedule() {
        // 3 octaves at frequency 2, lacunarity 3, persistence 0.5:
        // f(2p) + 0.5 f(6p) + 0.25 f(18p), and f is linear
        let fbm = Fbm2D::with_params(Linear, 3, 0.5, 3.0, 2.0);
        let expected = 2.0 * 21.0 + 0.5 * 6.0 * 21.0 + 0.25 * 18.0 * 21.0;
        assert!((fbm.get2(1.0, 2.0) - expected).abs() < 1e-9);

        let fbm3 = Fbm3D::with_params(Linear, 2, 0.25, 2.0, 1.0);
        let expected3 = 321.0 + 0.25 * 2.0 * 321.0;
        assert!((fbm3.get3(1.0, 2.0, 3.0) - expected3).abs() < 1e-9);
    }

    #[test]
    fn fbm_defaults() {
        let fbm = Fbm2D::new(Linear);
        assert_eq!(fbm.octaves, 1);
        assert_eq!(fbm.persistence, 0.5);
        assert_eq!(fbm.lacunarity, 2.0);
        assert_eq!(fbm.frequency, 1.0);
        assert_eq!(fbm.get2(1.5, 0.5), 6.5);
    }

    #[test]
    fn fbm3_over_simplex_is_deterministic() {
        let a = Fbm3D::with_params(OpenSimplex::new(&mut seeded(5)), 5, 0.5, 2.0, 0.8);
        let b = Fbm3D::with_params(OpenSimplex::new(&mut seeded(5)), 5, 0.5, 2.0, 0.8);
        for i in 0..100 {
            let p = i as f64 * 0.19;
            assert_eq!(a.get3(p, -p, 0.5 * p), b.get3(p, -p, 0.5 * p));
        }
    }
}
