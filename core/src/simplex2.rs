use crate::{NoiseGenerator2D, RandomSource, TABLE_MASK, TABLE_SIZE, permutation_table, simplex3};

// (1 / sqrt(2 + 1) - 1) / 2
const STRETCH_2D: f64 = -0.211324865405187;
// (sqrt(2 + 1) - 1) / 2
const SQUISH_2D: f64 = 0.366025403784439;
const NORM_2D: f64 = 47.0;

// Directions towards the vertices of an octagon, stored as (x, y) pairs
const GRADIENTS_2D: [i8; 16] = [
    5, 2, 2, 5, //
    -5, 2, -2, 5, //
    5, -2, 2, -5, //
    -5, -2, -2, -5,
];

// OpenSimplex noise (Kurt Spencer's algorithm) in 2D and 3D.
// Simplex-style lattices avoid the axis-aligned artifacts of Perlin noise.
// The 3D half lives in simplex3.rs.
#[derive(Debug, Clone)]
pub struct OpenSimplex {
    pub(crate) perm: [u8; TABLE_SIZE],
    // perm mapped onto offsets into the 3D gradient table
    pub(crate) perm_grad_index3: [u8; TABLE_SIZE],
}

impl OpenSimplex {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let perm = permutation_table(rng);
        let perm_grad_index3 = simplex3::gradient_index_table(&perm);
        Self {
            perm,
            perm_grad_index3,
        }
    }

    pub fn permutation(&self) -> &[u8; TABLE_SIZE] {
        &self.perm
    }

    #[inline]
    pub(crate) fn hash(&self, v: i64) -> i64 {
        self.perm[(v & TABLE_MASK) as usize] as i64
    }

    // Gradient at lattice vertex (xsv, ysv) dotted with the offset
    #[inline]
    fn extrapolate2(&self, xsv: i64, ysv: i64, dx: f64, dy: f64) -> f64 {
        let index = (self.hash(self.hash(xsv) + ysv) & 0x0E) as usize;
        GRADIENTS_2D[index] as f64 * dx + GRADIENTS_2D[index + 1] as f64 * dy
    }

    // Kernel contribution of one vertex, zero outside its radius
    #[inline]
    fn contribution2(&self, xsv: i64, ysv: i64, dx: f64, dy: f64) -> f64 {
        let attn = 2.0 - dx * dx - dy * dy;
        if attn > 0.0 {
            let attn2 = attn * attn;
            attn2 * attn2 * self.extrapolate2(xsv, ysv, dx, dy)
        } else {
            0.0
        }
    }
}

impl NoiseGenerator2D for OpenSimplex {
    fn get2(&self, x: f64, y: f64) -> f64 {
        // Place input coordinates onto the stretched grid
        let stretch = (x + y) * STRETCH_2D;
        let xs = x + stretch;
        let ys = y + stretch;

        // Rhombus super-cell origin in grid coordinates
        let mut xsb = xs.floor() as i64;
        let mut ysb = ys.floor() as i64;

        // Squish back to get the origin in input space
        let squish = (xsb + ysb) as f64 * SQUISH_2D;
        let xb = xsb as f64 + squish;
        let yb = ysb as f64 + squish;

        // Position inside the rhombus, their sum picks the triangle
        let xins = xs - xsb as f64;
        let yins = ys - ysb as f64;
        let in_sum = xins + yins;

        let mut dx0 = x - xb;
        let mut dy0 = y - yb;

        let mut value = 0.0;

        // (1, 0) and (0, 1) contribute in both triangles
        value += self.contribution2(xsb + 1, ysb, dx0 - 1.0 - SQUISH_2D, dy0 - SQUISH_2D);
        value += self.contribution2(xsb, ysb + 1, dx0 - SQUISH_2D, dy0 - 1.0 - SQUISH_2D);

        let (xsv_ext, ysv_ext, dx_ext, dy_ext) = if in_sum <= 1.0 {
            // Lower triangle at (0, 0)
            let zins = 1.0 - in_sum;
            if zins > xins || zins > yins {
                // (0, 0) is one of the closest two vertices
                if xins > yins {
                    (xsb + 1, ysb - 1, dx0 - 1.0, dy0 + 1.0)
                } else {
                    (xsb - 1, ysb + 1, dx0 + 1.0, dy0 - 1.0)
                }
            } else {
                // (1, 0) and (0, 1) are the closest two, the far corner joins
                (
                    xsb + 1,
                    ysb + 1,
                    dx0 - 1.0 - 2.0 * SQUISH_2D,
                    dy0 - 1.0 - 2.0 * SQUISH_2D,
                )
            }
        } else {
            // Upper triangle at (1, 1)
            let zins = 2.0 - in_sum;
            if zins < xins || zins < yins {
                // (1, 1) is one of the closest two vertices
                if xins > yins {
                    (xsb + 2, ysb, dx0 - 2.0 - 2.0 * SQUISH_2D, dy0 - 2.0 * SQUISH_2D)
                } else {
                    (xsb, ysb + 2, dx0 - 2.0 * SQUISH_2D, dy0 - 2.0 - 2.0 * SQUISH_2D)
                }
            } else {
                // (1, 0) and (0, 1) are the closest two, the origin joins
                (xsb, ysb, dx0, dy0)
            }
        };

        if in_sum > 1.0 {
            // base vertex moves to (1, 1)
            xsb += 1;
            ysb += 1;
            dx0 = dx0 - 1.0 - 2.0 * SQUISH_2D;
            dy0 = dy0 - 1.0 - 2.0 * SQUISH_2D;
        }

        // (0, 0) or (1, 1), whichever triangle we are in
        value += self.contribution2(xsb, ysb, dx0, dy0);
        value += self.contribution2(xsv_ext, ysv_ext, dx_ext, dy_ext);

        value / NORM_2D
    }
}

#[cfg(test)]
mod tests {
    use crate::{NoiseGenerator2D, RandomSource, seeded};

    use super::OpenSimplex;

    #[test]
    fn simplex2_determinism() {
        let s1 = OpenSimplex::new(&mut seeded(9999));
        let s2 = OpenSimplex::new(&mut seeded(9999));
        for i in 0..500 {
            let x = i as f64 * 0.0731 - 11.0;
            let y = i as f64 * 0.1913 + 4.0;
            assert_eq!(s1.get2(x, y), s2.get2(x, y));
        }
    }

    #[test]
    fn simplex2_range() {
        let s = OpenSimplex::new(&mut seeded(0));
        let mut coords = seeded(1);
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for _ in 0..100_000 {
            let x = coords.uniform() * 2000.0 - 1000.0;
            let y = coords.uniform() * 2000.0 - 1000.0;
            let v = s.get2(x, y);
            min = min.min(v);
            max = max.max(v);
        }
        assert!(min >= -1.2 && max <= 1.2, "range [{}, {}] too wide", min, max);
        // The field should actually vary
        assert!(max - min > 0.5);
    }

    #[test]
    fn simplex2_is_continuous() {
        let s = OpenSimplex::new(&mut seeded(42));
        let eps = 1e-7;
        for i in 0..2000 {
            let x = i as f64 * 0.0137;
            let y = i as f64 * 0.0291 - 3.0;
            let a = s.get2(x, y);
            let b = s.get2(x + eps, y + eps);
            assert!((a - b).abs() < 1e-4, "jump at ({}, {}): {} vs {}", x, y, a, b);
        }
    }

    #[test]
    fn simplex2_seeds_differ() {
        let a = OpenSimplex::new(&mut seeded(1));
        let b = OpenSimplex::new(&mut seeded(2));
        let differs = (0..50).any(|i| {
            let x = i as f64 * 0.37 + 0.1;
            a.get2(x, 0.3) != b.get2(x, 0.3)
        });
        assert!(differs);
    }
}
