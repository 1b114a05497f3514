/// Offset added to an energy change to index the dense weight table
pub const DE_OFFSET: i32 = 8;

/// Number of slots covering every offset index `de + 8` for `de` in -8..=8
pub const TABLE_LEN: usize = 17;

/// Precomputed Boltzmann factors for single-spin flips on the square lattice
///
/// Flipping one spin with four neighbours changes the energy by
/// `de = 2 * s * (sum of neighbours)`, which is always one of
/// {-8, -4, 0, 4, 8}. The factors `exp(-de / T)` are stored densely at
/// index `de + 8`; the remaining slots hold 0.0 and are never read.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    temperature: f64,
    weights: [f64; TABLE_LEN],
}

impl TransitionTable {
    /// Build the table for temperature `T > 0` (in units of J/k_B)
    pub fn new(temperature: f64) -> Self {
        let mut weights = [0.0; TABLE_LEN];
        for de in (-DE_OFFSET..=DE_OFFSET).step_by(4) {
            weights[(de + DE_OFFSET) as usize] = (-de as f64 / temperature).exp();
        }

        Self {
            temperature,
            weights,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Boltzmann factor `exp(-de / T)` for an attainable energy change
    #[inline]
    pub fn acceptance(&self, de: i32) -> f64 {
        self.weights[(de + DE_OFFSET) as usize]
    }

    /// All 17 slots, indexed by `de + 8`
    pub fn weights(&self) -> &[f64; TABLE_LEN] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        TABLE_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
