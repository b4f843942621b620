//! Group-to-group attraction coefficients

use rand::Rng;

use crate::error::{PhysicsError, Result};

/// Square matrix where entry `(i, j)` is how strongly group `i` is drawn to group `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionMatrix {
    size: usize,
    values: Vec<f32>,
}

impl AttractionMatrix {
    /// All-zero matrix for `size` groups.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> Result<f32> {
        self.index(from, to).map(|i| self.values[i])
    }

    pub fn set(&mut self, from: usize, to: usize, value: f32) -> Result<()> {
        let i = self.index(from, to)?;
        self.values[i] = value;
        Ok(())
    }

    /// Mutable access for UI editing.
    pub fn get_mut(&mut self, from: usize, to: usize) -> Result<&mut f32> {
        let i = self.index(from, to)?;
        Ok(&mut self.values[i])
    }

    /// Effective coefficient with the global multiplier applied.
    ///
    /// Group ids come from the particles themselves, so this is the unchecked
    /// hot-path accessor.
    #[inline]
    pub fn force(&self, from: usize, to: usize, multiplier: f32) -> f32 {
        self.values[from * self.size + to] * multiplier
    }

    /// Fill every entry uniformly from `[-1, 1]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for v in &mut self.values {
            *v = rng.random_range(-1.0..=1.0);
        }
    }

    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    fn index(&self, from: usize, to: usize) -> Result<usize> {
        for group in [from, to] {
            if group >= self.size {
                return Err(PhysicsError::GroupOutOfRange {
                    group,
                    size: self.size,
                });
            }
        }
        Ok(from * self.size + to)
    }
}
