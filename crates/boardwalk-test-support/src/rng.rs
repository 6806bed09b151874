//! Scripted `DeterministicRng` implementations for tests.

use boardwalk_core::rng::DeterministicRng;

/// Always returns the low end of the requested range.
///
/// With it a roll uses the minimum frame count, shows face 1 on every frame
/// and lands on 1.
#[derive(Debug, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Returns values from a script, in order.
///
/// A dice roll draws, in order: the frame count, one display face per frame,
/// then the outcome. Scripted values outside the requested range are clamped
/// into it so a script written for one configuration stays legal in another.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    /// # Panics
    ///
    /// Panics if the script is exhausted.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let value = *self
            .values
            .get(self.index)
            .unwrap_or_else(|| panic!("SequenceRng exhausted after {} values", self.index));
        self.index += 1;
        value.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_rng_replays_script_and_clamps() {
        let mut rng = SequenceRng::new(vec![3, 0, 9]);

        assert_eq!(rng.next_u32_range(1, 6), 3);
        assert_eq!(rng.next_u32_range(1, 6), 1);
        assert_eq!(rng.next_u32_range(1, 6), 6);
        assert_eq!(rng.drawn(), 3);
    }

    #[test]
    #[should_panic(expected = "SequenceRng exhausted")]
    fn test_sequence_rng_panics_when_exhausted() {
        let mut rng = SequenceRng::new(vec![]);
        rng.next_u32_range(1, 6);
    }

    #[test]
    fn test_mock_rng_returns_min() {
        let mut rng = MockRng;
        assert_eq!(rng.next_u32_range(10, 19), 10);
    }
}
