// core holds the noise engines, the composition operators and the grid builder
pub mod builder;
pub mod fbm;
pub mod perlin2;
pub mod perlin3;
pub mod random;
pub mod scale;
pub mod select;
pub mod simplex2;
pub mod simplex3;
pub mod utils;

use std::rc::Rc;
use std::sync::Arc;

pub use builder::{Bounds2D, Builder2D};
pub use fbm::{Fbm2D, Fbm3D};
pub use perlin2::{Perlin2D, Quality};
pub use perlin3::Perlin3D;
pub use random::{RandomSource, seeded};
pub use scale::{Scale2D, Scale3D};
pub use select::{Select2D, Select3D};
pub use simplex2::OpenSimplex;

// Size of every permutation table, lookups mask with TABLE_MASK
pub const TABLE_SIZE: usize = 256;
pub const TABLE_MASK: i64 = 255;

// Anything that can be sampled at a 2D point: base generators and operators alike
pub trait NoiseGenerator2D {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}

// Same as NoiseGenerator2D but over 3D points
pub trait NoiseGenerator3D {
    // Sample 3D noise at (x, y, z).
    fn get3(&self, x: f64, y: f64, z: f64) -> f64;
}

// A 2D field that can be shared across threads, used for type-erased graphs
pub type SharedNoise2D = Arc<dyn NoiseGenerator2D + Send + Sync>;

// A 3D field that can be shared across threads
pub type SharedNoise3D = Arc<dyn NoiseGenerator3D + Send + Sync>;

// Forwarding impls so operators can own, borrow or share their inputs
macro_rules! forward_noise {
    ($($ptr:ty),*) => {
        $(
            impl<T: NoiseGenerator2D + ?Sized> NoiseGenerator2D for $ptr {
                #[inline]
                fn get2(&self, x: f64, y: f64) -> f64 {
                    (**self).get2(x, y)
                }
            }

            impl<T: NoiseGenerator3D + ?Sized> NoiseGenerator3D for $ptr {
                #[inline]
                fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
                    (**self).get3(x, y, z)
                }
            }
        )*
    };
}

forward_noise!(&T, Box<T>, Rc<T>, Arc<T>);

// Build a 256 entry permutation table from a random source.
// Falls back to the identity table if the source hands back something
// that is not a permutation of 0..256.
pub(crate) fn permutation_table<R: RandomSource + ?Sized>(rng: &mut R) -> [u8; TABLE_SIZE] {
    let drawn = rng.permutation(TABLE_SIZE);
    let mut perm = [0u8; TABLE_SIZE];
    let mut seen = [false; TABLE_SIZE];

    let valid = drawn.len() == TABLE_SIZE
        && drawn.iter().all(|&v| {
            if v >= TABLE_SIZE || seen[v] {
                return false;
            }
            seen[v] = true;
            true
        });

    if valid {
        for (slot, &v) in perm.iter_mut().zip(drawn.iter()) {
            *slot = v as u8;
        }
    } else {
        log::warn!(
            "random source returned an invalid permutation ({} entries), using identity table",
            drawn.len()
        );
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
    }
    perm
}
