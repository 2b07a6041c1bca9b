use crate::{
    NoiseGenerator2D, NoiseGenerator3D, RandomSource, TABLE_MASK, TABLE_SIZE, permutation_table,
};

// Correction applied to the summed kernels to land roughly in [-1, 1]
const OUTPUT_OFFSET: f64 = 0.053179;
const OUTPUT_SCALE: f64 = 1.056165;

// 32 lattice directions: the 12 cube edge midpoints twice, plus the 8 corners.
// None of them has a zero (x, y) projection so the 2D form can reuse them.
const GRADIENTS: [[i8; 3]; 32] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 1],
    [-1, 1, 1],
    [1, -1, 1],
    [-1, -1, 1],
    [1, 1, -1],
    [-1, 1, -1],
    [1, -1, -1],
    [-1, -1, -1],
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

const GRADIENT_MASK: usize = GRADIENTS.len() - 1;

// Gradient noise with a fixed gradient set and a radial kernel per corner
// instead of s-curve interpolation. Not interchangeable with Perlin2D:
// the output scale and lattice behaviour differ.
#[derive(Debug, Clone)]
pub struct Perlin3D {
    perm: [u8; TABLE_SIZE],
}

impl Perlin3D {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            perm: permutation_table(rng),
        }
    }

    pub fn permutation(&self) -> &[u8; TABLE_SIZE] {
        &self.perm
    }

    #[inline]
    fn hash(&self, v: i64) -> i64 {
        self.perm[(v & TABLE_MASK) as usize] as i64
    }

    #[inline]
    fn gradient3(&self, x: i64, y: i64, z: i64) -> [f64; 3] {
        let h = self.hash(self.hash(self.hash(x) + y) + z) as usize;
        let g = GRADIENTS[h & GRADIENT_MASK];
        [g[0] as f64, g[1] as f64, g[2] as f64]
    }

    #[inline]
    fn gradient2(&self, x: i64, y: i64) -> [f64; 2] {
        let h = self.hash(self.hash(x) + y) as usize;
        let g = GRADIENTS[h & GRADIENT_MASK];
        [g[0] as f64, g[1] as f64]
    }

    #[inline]
    fn correct(sum: f64) -> f64 {
        (sum + OUTPUT_OFFSET) * OUTPUT_SCALE
    }
}

impl NoiseGenerator3D for Perlin3D {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let x0f = x.floor();
        let y0f = y.floor();
        let z0f = z.floor();
        let (x0, y0, z0) = (x0f as i64, y0f as i64, z0f as i64);
        let (xf, yf, zf) = (x - x0f, y - y0f, z - z0f);

        let mut sum = 0.0;
        for corner in 0..8 {
            let cx = corner & 1;
            let cy = (corner >> 1) & 1;
            let cz = (corner >> 2) & 1;

            // offset from the corner to the sample point
            let dx = xf - cx as f64;
            let dy = yf - cy as f64;
            let dz = zf - cz as f64;

            let attn = 1.0 - (dx * dx + dy * dy + dz * dz);
            if attn > 0.0 {
                let g = self.gradient3(x0 + cx, y0 + cy, z0 + cz);
                sum += attn * attn * (g[0] * dx + g[1] * dy + g[2] * dz);
            }
        }

        Self::correct(sum)
    }
}

// Same kernel over the 4 corners of a square cell
impl NoiseGenerator2D for Perlin3D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        let x0f = x.floor();
        let y0f = y.floor();
        let (x0, y0) = (x0f as i64, y0f as i64);
        let (xf, yf) = (x - x0f, y - y0f);

        let mut sum = 0.0;
        for corner in 0..4 {
            let cx = corner & 1;
            let cy = (corner >> 1) & 1;
            let dx = xf - cx as f64;
            let dy = yf - cy as f64;

            let attn = 1.0 - (dx * dx + dy * dy);
            if attn > 0.0 {
                let g = self.gradient2(x0 + cx, y0 + cy);
                sum += attn * attn * (g[0] * dx + g[1] * dy);
            }
        }

        Self::correct(sum)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NoiseGenerator2D, NoiseGenerator3D, seeded};

    use super::{GRADIENTS, OUTPUT_OFFSET, OUTPUT_SCALE, Perlin3D};

    #[test]
    fn perlin3_determinism() {
        let p1 = Perlin3D::new(&mut seeded(2025));
        let p2 = Perlin3D::new(&mut seeded(2025));
        for i in 0..200 {
            let (x, y, z) = (i as f64 * 0.123, i as f64 * -0.456, i as f64 * 0.789);
            assert_eq!(p1.get3(x, y, z), p2.get3(x, y, z));
            assert_eq!(p1.get2(x, y), p2.get2(x, y));
        }
    }

    #[test]
    fn perlin3_lattice_is_correction_constant() {
        let p = Perlin3D::new(&mut seeded(8));
        let expected = (0.0 + OUTPUT_OFFSET) * OUTPUT_SCALE;
        assert_eq!(p.get3(0.0, 0.0, 0.0), expected);
        assert_eq!(p.get3(4.0, -7.0, 300.0), expected);
        assert_eq!(p.get2(-2.0, 9.0), expected);
    }

    #[test]
    fn perlin3_range() {
        let p = Perlin3D::new(&mut seeded(0));
        for i in 0..4000 {
            let x = (i % 20) as f64 * 0.173 - 1.5;
            let y = ((i / 20) % 20) as f64 * 0.291 + 3.0;
            let z = (i / 400) as f64 * 0.377 - 2.0;
            let v = p.get3(x, y, z);
            assert!(v >= -1.5 && v <= 1.5, "value {} out of range", v);
        }
    }

    #[test]
    fn gradient_table_shape() {
        for g in GRADIENTS.iter() {
            assert!(g.iter().all(|c| (-1..=1).contains(c)));
            assert!(g[0] != 0 || g[1] != 0, "zero xy projection in {:?}", g);
        }
        assert!(GRADIENTS.len().is_power_of_two());
    }

    #[test]
    fn perlin3_permutation_is_bijection() {
        let p = Perlin3D::new(&mut seeded(64));
        let mut sorted = p.permutation().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..=255u8).collect::<Vec<_>>());
    }
}
