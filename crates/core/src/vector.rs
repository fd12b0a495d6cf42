//! Dense single-precision vector
//!
//! `Vector` owns its elements. A value handed out by a reader is a fresh
//! copy, so scaling it in place never touches the source it came from.

use std::ops::Index;

/// Ordered sequence of `f32` values with a fixed length per instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Vector { data: Vec::new() }
    }

    /// Create a vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Vector {
            data: vec![0.0; len],
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the vector, returning its elements.
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// Multiply every element by `factor` in place.
    ///
    /// A factor of zero is valid and yields all zeros of the same length.
    pub fn scale(&mut self, factor: f32) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// Consuming form of [`Vector::scale`].
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale(factor);
        self
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector { data }
    }
}

impl From<&[f32]> for Vector {
    fn from(data: &[f32]) -> Self {
        Vector {
            data: data.to_vec(),
        }
    }
}

impl FromIterator<f32> for Vector {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        Vector {
            data: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}
