use rayon::prelude::*;

use crate::NoiseGenerator2D;

// Rectangle of the input plane that gets mapped onto the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2D {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

// The unit square
impl Default for Bounds2D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

// Samples a 2D field over a width×height grid.
// Cell (x, y) is sampled at min + index * (extent / dimension) on each axis,
// so the last column and row stop one step short of the max edge.
pub struct Builder2D<S> {
    pub source: S,
    pub width: usize,
    pub height: usize,
    pub bounds: Bounds2D,
    values: Vec<f64>, // row-major, empty until built
}

impl<S: NoiseGenerator2D> Builder2D<S> {
    pub fn new(source: S, width: usize, height: usize) -> Self {
        Self {
            source,
            width,
            height,
            bounds: Bounds2D::default(),
            values: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds2D) -> Self {
        self.bounds = bounds;
        self
    }

    // Input coordinate of cell (x, y)
    #[inline]
    fn coordinate(bounds: &Bounds2D, width: usize, height: usize, x: usize, y: usize) -> (f64, f64) {
        let step_x = (bounds.max_x - bounds.min_x) / width as f64;
        let step_y = (bounds.max_y - bounds.min_y) / height as f64;
        (
            bounds.min_x + x as f64 * step_x,
            bounds.min_y + y as f64 * step_y,
        )
    }

    // Sample every cell on the calling thread
    pub fn build(&mut self) -> &[f64] {
        let (width, height, bounds) = (self.width, self.height, self.bounds);
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (px, py) = Self::coordinate(&bounds, width, height, x, y);
                values.push(self.source.get2(px, py));
            }
        }
        log::debug!("built {}x{} grid", width, height);
        self.values = values;
        &self.values
    }

    // Current contents of the grid, empty before the first build
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    // Value of cell (x, y), None outside the grid or before building
    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    // Smallest and largest value of the built grid.
    // An empty grid reports (f64::MAX, f64::MIN).
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

impl<S: NoiseGenerator2D + Sync> Builder2D<S> {
    // Same grid as build(), filled in parallel on the rayon pool
    pub fn build_par(&mut self) -> &[f64] {
        let (width, height, bounds) = (self.width, self.height, self.bounds);
        let source = &self.source;
        let mut values = vec![0.0; width * height];

        // one row per task, chunks of zero length are not allowed
        if !values.is_empty() {
            values.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
                for (x, value) in row.iter_mut().enumerate() {
                    let (px, py) = Self::coordinate(&bounds, width, height, x, y);
                    *value = source.get2(px, py);
                }
            });
        }

        log::debug!("built {}x{} grid in parallel", width, height);
        self.values = values;
        &self.values
    }
}
