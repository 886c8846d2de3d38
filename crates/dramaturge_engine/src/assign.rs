//! Assignments (swizzles) between a pool and rule-local positions.

use dramaturge_foundation::{Entity, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of pool indices, one per rule participant slot.
///
/// Selecting with an assignment permutes a subset of a larger entity pool
/// into rule-local positions; splicing is the inverse operation, writing the
/// rule's output back onto the pool while leaving uncovered positions
/// untouched.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment(Vec<usize>);

impl Assignment {
    /// Creates an assignment from explicit pool indices.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Creates the identity assignment `[0, 1, .., len-1]`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Returns the number of slots covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no slots are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying pool indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Selects the first `count` assigned entities out of the pool, in slot
    /// order.
    ///
    /// # Errors
    /// Returns an error if fewer than `count` slots are covered or an index
    /// falls outside the pool.
    pub fn select(&self, pool: &[Entity], count: usize) -> Result<Vec<Entity>> {
        if self.len() < count {
            return Err(Error::index_out_of_bounds(count, self.len()));
        }
        let mut out = Vec::with_capacity(count);
        for &i in &self.0[..count] {
            let entity = pool
                .get(i)
                .ok_or_else(|| Error::index_out_of_bounds(i, pool.len()))?;
            out.push(entity.clone());
        }
        Ok(out)
    }

    /// Writes `replacements` back onto a copy of the pool at the assigned
    /// positions. Positions not covered by the assignment (and assignment
    /// slots beyond the replacement count) are left untouched.
    #[must_use]
    pub fn splice(&self, pool: &[Entity], replacements: Vec<Entity>) -> Vec<Entity> {
        let mut out = pool.to_vec();
        for (&i, entity) in self.0.iter().zip(replacements) {
            out[i] = entity;
        }
        out
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}
