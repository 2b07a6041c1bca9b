use crate::{NoiseGenerator2D, NoiseGenerator3D};

// Linear rescale of a field: value * scale + bias
#[derive(Debug, Clone)]
pub struct Scale2D<S> {
    pub source: S,
    pub scale: f64,
    pub bias: f64,
}

impl<S> Scale2D<S> {
    pub fn new(source: S, scale: f64, bias: f64) -> Self {
        Self {
            source,
            scale,
            bias,
        }
    }
}

impl<S: NoiseGenerator2D> NoiseGenerator2D for Scale2D<S> {
    #[inline]
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.source.get2(x, y) * self.scale + self.bias
    }
}

#[derive(Debug, Clone)]
pub struct Scale3D<S> {
    pub source: S,
    pub scale: f64,
    pub bias: f64,
}

impl<S> Scale3D<S> {
    pub fn new(source: S, scale: f64, bias: f64) -> Self {
        Self {
            source,
            scale,
            bias,
        }
    }
}

impl<S: NoiseGenerator3D> NoiseGenerator3D for Scale3D<S> {
    #[inline]
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.get3(x, y, z) * self.scale + self.bias
    }
}
