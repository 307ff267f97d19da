use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Byte pair that opens every gate encoding.
pub const GATE_MARKER: [u8; 2] = [42, 213];

/// Flat byte buffer encoding the gates of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    bytes: Vec<u8>,
}

impl Genome {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Draw `length` uniform bytes, then plant `seed_gate_count` gate markers
    /// at offsets within the first 80% of the buffer.
    ///
    /// Seeds may land on the same or adjacent offsets and clobber each other,
    /// so the decoded gate count can be lower than `seed_gate_count`.
    pub fn random(length: usize, seed_gate_count: usize, rng: &mut dyn RngCore) -> Self {
        let mut bytes = vec![0u8; length];
        rng.fill_bytes(&mut bytes);

        let seed_span = length * 4 / 5;
        if seed_span > 0 {
            for _ in 0..seed_gate_count {
                let start = rng.gen_range(0..seed_span);
                bytes[start] = GATE_MARKER[0];
                bytes[start + 1] = GATE_MARKER[1];
            }
        }
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offsets of every marker pair, including ones that cannot hold a gate.
    pub fn marker_positions(&self) -> Vec<usize> {
        self.bytes
            .windows(2)
            .enumerate()
            .filter(|(_, w)| *w == GATE_MARKER)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<u8>> for Genome {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Genome {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Genome {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_genome_has_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let genome = Genome::random(500, 3, &mut rng);
        assert_eq!(genome.len(), 500);
    }

    #[test]
    fn seeded_markers_stay_in_front() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let genome = Genome::random(1000, 8, &mut rng);
        let seeded: Vec<usize> = genome
            .marker_positions()
            .into_iter()
            .filter(|&p| p < 800)
            .collect();
        assert!(!seeded.is_empty());
    }

    #[test]
    fn same_seed_same_genome() {
        let a = Genome::random(256, 4, &mut ChaCha8Rng::seed_from_u64(3));
        let b = Genome::random(256, 4, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_genome_skips_seeding() {
        // 1 * 4 / 5 == 0 leaves no room for a marker
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let genome = Genome::random(1, 4, &mut rng);
        assert_eq!(genome.len(), 1);
    }

    #[test]
    fn marker_positions_overlap() {
        let genome = Genome::from(vec![42, 213, 42, 213, 0]);
        assert_eq!(genome.marker_positions(), vec![0, 2]);
    }
}
