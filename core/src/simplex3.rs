use crate::{NoiseGenerator3D, OpenSimplex, TABLE_MASK, TABLE_SIZE};

// (1 / sqrt(3 + 1) - 1) / 3
const STRETCH_3D: f64 = -1.0 / 6.0;
// (sqrt(3 + 1) - 1) / 3
const SQUISH_3D: f64 = 1.0 / 3.0;
const NORM_3D: f64 = 103.0;

// Directions towards the vertices of a rhombicuboctahedron, skewed so the
// triangular and square facets fit circles of the same radius. (x, y, z) triples.
const GRADIENTS_3D: [i8; 72] = [
    -11, 4, 4, -4, 11, 4, -4, 4, 11, //
    11, 4, 4, 4, 11, 4, 4, 4, 11, //
    -11, -4, 4, -4, -11, 4, -4, -4, 11, //
    11, -4, 4, 4, -11, 4, 4, -4, 11, //
    -11, 4, -4, -4, 11, -4, -4, 4, -11, //
    11, 4, -4, 4, 11, -4, 4, 4, -11, //
    -11, -4, -4, -4, -11, -4, -4, -4, -11, //
    11, -4, -4, 4, -11, -4, 4, -4, -11,
];

// Lattice offsets from the cell origin that always contribute, per region
const NEAR_TETRAHEDRON: [[i64; 3]; 4] = [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]];
const FAR_TETRAHEDRON: [[i64; 3]; 4] = [[1, 1, 0], [1, 0, 1], [0, 1, 1], [1, 1, 1]];
const OCTAHEDRON: [[i64; 3]; 6] = [
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [1, 0, 1],
    [0, 1, 1],
];

// Maps each permutation entry to the start of a gradient triple
pub(crate) fn gradient_index_table(perm: &[u8; TABLE_SIZE]) -> [u8; TABLE_SIZE] {
    let count = (GRADIENTS_3D.len() / 3) as u8;
    let mut table = [0u8; TABLE_SIZE];
    for (slot, &p) in table.iter_mut().zip(perm.iter()) {
        *slot = (p % count) * 3;
    }
    table
}

// Axis of the first bit set in a vertex code, z if only z is left
#[inline]
fn first_set_axis(code: u8) -> usize {
    if code & 0x01 != 0 {
        0
    } else if code & 0x02 != 0 {
        1
    } else {
        2
    }
}

// Axis of the first bit clear in a vertex code, z if only z is left
#[inline]
fn first_clear_axis(code: u8) -> usize {
    if code & 0x01 == 0 {
        0
    } else if code & 0x02 == 0 {
        1
    } else {
        2
    }
}

impl OpenSimplex {
    #[inline]
    fn extrapolate3(&self, v: [i64; 3], d: [f64; 3]) -> f64 {
        let px = self.hash(v[0]);
        let py = self.hash(px + v[1]);
        let index = self.perm_grad_index3[((py + v[2]) & TABLE_MASK) as usize] as usize;
        GRADIENTS_3D[index] as f64 * d[0]
            + GRADIENTS_3D[index + 1] as f64 * d[1]
            + GRADIENTS_3D[index + 2] as f64 * d[2]
    }

    // Contribution of the vertex at origin + offset. The squish term grows
    // with the coordinate sum of the offset.
    #[inline]
    fn lattice3(&self, origin: [i64; 3], d0: [f64; 3], offset: [i64; 3]) -> f64 {
        let squish = (offset[0] + offset[1] + offset[2]) as f64 * SQUISH_3D;
        let d = [
            d0[0] - offset[0] as f64 - squish,
            d0[1] - offset[1] as f64 - squish,
            d0[2] - offset[2] as f64 - squish,
        ];
        let attn = 2.0 - d[0] * d[0] - d[1] * d[1] - d[2] * d[2];
        if attn > 0.0 {
            let v = [
                origin[0] + offset[0],
                origin[1] + offset[1],
                origin[2] + offset[2],
            ];
            let attn2 = attn * attn;
            attn2 * attn2 * self.extrapolate3(v, d)
        } else {
            0.0
        }
    }
}

// Extra vertices when the point is in the tetrahedron at (0, 0, 0)
fn near_extras(ins: [f64; 3], in_sum: f64) -> ([i64; 3], [i64; 3]) {
    // Which two of (1,0,0), (0,1,0), (0,0,1) are closest
    let (mut a_point, mut a_score) = (0x01u8, ins[0]);
    let (mut b_point, mut b_score) = (0x02u8, ins[1]);
    if a_score >= b_score && ins[2] > b_score {
        b_score = ins[2];
        b_point = 0x04;
    } else if a_score < b_score && ins[2] > a_score {
        a_score = ins[2];
        a_point = 0x04;
    }

    let mut e0 = [0i64; 3];
    let mut e1 = [0i64; 3];
    let wins = 1.0 - in_sum;
    if wins > a_score || wins > b_score {
        // (0,0,0) is one of the closest two, pair it with the closer of a and b
        let c = if b_score > a_score { b_point } else { a_point };
        for axis in 0..3 {
            if c & (1 << axis) != 0 {
                e0[axis] = 1;
                e1[axis] = 1;
            } else if axis == 0 || (axis == 1 && c & 0x01 != 0) {
                e0[axis] = -1;
            } else {
                e1[axis] = -1;
            }
        }
    } else {
        let c = a_point | b_point;
        for axis in 0..3 {
            if c & (1 << axis) != 0 {
                e0[axis] = 1;
                e1[axis] = 1;
            } else {
                e1[axis] = -1;
            }
        }
    }
    (e0, e1)
}

// Extra vertices when the point is in the tetrahedron at (1, 1, 1)
fn far_extras(ins: [f64; 3], in_sum: f64) -> ([i64; 3], [i64; 3]) {
    // Which two of (1,1,0), (1,0,1), (0,1,1) are closest
    let (mut a_point, mut a_score) = (0x06u8, ins[0]);
    let (mut b_point, mut b_score) = (0x05u8, ins[1]);
    if a_score <= b_score && ins[2] < b_score {
        b_score = ins[2];
        b_point = 0x03;
    } else if a_score > b_score && ins[2] < a_score {
        a_score = ins[2];
        a_point = 0x03;
    }

    let mut e0 = [0i64; 3];
    let mut e1 = [0i64; 3];
    let wins = 3.0 - in_sum;
    if wins < a_score || wins < b_score {
        // (1,1,1) is one of the closest two
        let c = if b_score < a_score { b_point } else { a_point };
        for axis in 0..3 {
            if c & (1 << axis) == 0 {
                continue;
            }
            if axis == 0 || (axis == 1 && c & 0x01 == 0) {
                e0[axis] = 2;
                e1[axis] = 1;
            } else {
                e0[axis] = 1;
                e1[axis] = 2;
            }
        }
    } else {
        let c = a_point & b_point;
        for axis in 0..3 {
            if c & (1 << axis) != 0 {
                e0[axis] = 1;
                e1[axis] = 2;
            }
        }
    }
    (e0, e1)
}

// Extra vertices when the point is in the octahedron between the tetrahedra
fn octahedron_extras(ins: [f64; 3]) -> ([i64; 3], [i64; 3]) {
    // (0,0,1) against (1,1,0)
    let p1 = ins[0] + ins[1];
    let (mut a_point, a_score, mut a_further) = if p1 > 1.0 {
        (0x03u8, p1 - 1.0, true)
    } else {
        (0x04u8, 1.0 - p1, false)
    };

    // (0,1,0) against (1,0,1)
    let p2 = ins[0] + ins[2];
    let (mut b_point, b_score, mut b_further) = if p2 > 1.0 {
        (0x05u8, p2 - 1.0, true)
    } else {
        (0x02u8, 1.0 - p2, false)
    };

    // The closer of (1,0,0) and (0,1,1) replaces the further of a and b, if closer
    let p3 = ins[1] + ins[2];
    let (point, score, further) = if p3 > 1.0 {
        (0x06u8, p3 - 1.0, true)
    } else {
        (0x01u8, 1.0 - p3, false)
    };
    if a_score <= b_score && a_score < score {
        a_point = point;
        a_further = further;
    } else if a_score > b_score && b_score < score {
        b_point = point;
        b_further = further;
    }

    let shifted = |axis: usize, by: i64, base: i64| {
        let mut v = [base; 3];
        v[axis] = by;
        v
    };

    if a_further == b_further {
        if a_further {
            // Both on the (1,1,1) side: (1,1,1) and a step of 2 along the shared axis
            ([1, 1, 1], shifted(first_set_axis(a_point & b_point), 2, 0))
        } else {
            // Both on the (0,0,0) side: (0,0,0) and a (1,1,-1) permutation
            // with the -1 on the axis neither uses
            ([0, 0, 0], shifted(first_clear_axis(a_point | b_point), -1, 1))
        }
    } else {
        let (c1, c2) = if a_further {
            (a_point, b_point)
        } else {
            (b_point, a_point)
        };
        (
            shifted(first_clear_axis(c1), -1, 1),
            shifted(first_set_axis(c2), 2, 0),
        )
    }
}

impl NoiseGenerator3D for OpenSimplex {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        // Place input coordinates on the simplectic honeycomb
        let stretch = (x + y + z) * STRETCH_3D;
        let xs = x + stretch;
        let ys = y + stretch;
        let zs = z + stretch;

        // Rhombohedron super-cell origin
        let origin = [xs.floor() as i64, ys.floor() as i64, zs.floor() as i64];

        // Squish back out to input space
        let squish = (origin[0] + origin[1] + origin[2]) as f64 * SQUISH_3D;
        let d0 = [
            x - (origin[0] as f64 + squish),
            y - (origin[1] as f64 + squish),
            z - (origin[2] as f64 + squish),
        ];

        // Position inside the cell, the sum picks the region
        let ins = [
            xs - origin[0] as f64,
            ys - origin[1] as f64,
            zs - origin[2] as f64,
        ];
        let in_sum = ins[0] + ins[1] + ins[2];

        let (base, (e0, e1)) = if in_sum <= 1.0 {
            (&NEAR_TETRAHEDRON[..], near_extras(ins, in_sum))
        } else if in_sum >= 2.0 {
            (&FAR_TETRAHEDRON[..], far_extras(ins, in_sum))
        } else {
            (&OCTAHEDRON[..], octahedron_extras(ins))
        };

        let mut value = 0.0;
        for &offset in base {
            value += self.lattice3(origin, d0, offset);
        }
        value += self.lattice3(origin, d0, e0);
        value += self.lattice3(origin, d0, e1);

        value / NORM_3D
    }
}
