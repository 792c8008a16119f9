//! Per-packet feature extraction: sizes and Shannon entropy of raw bytes.

use crate::dataset::Dataset;
use crate::error::Result;
use ndarray::Array2;

/// Number of columns produced by [`PacketFeatures::to_row`].
pub const N_PACKET_FEATURES: usize = 4;

/// Shannon entropy of `bytes` in bits per byte, `-Σ p·log2 p` over the
/// 256 byte values. Empty input has entropy 0. NUL bytes count like any
/// other value.
pub fn shannon_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }

    let mut histogram = [0usize; 256];
    for &b in bytes {
        histogram[b as usize] += 1;
    }

    let total = bytes.len() as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// The four measurements taken from one captured packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacketFeatures {
    pub header_len: usize,
    pub packet_len: usize,
    pub header_entropy: f64,
    pub packet_entropy: f64,
}

impl PacketFeatures {
    /// `packet` is the whole frame; `header` is its leading header bytes.
    pub fn from_bytes(header: &[u8], packet: &[u8]) -> Self {
        Self {
            header_len: header.len(),
            packet_len: packet.len(),
            header_entropy: shannon_entropy(header),
            packet_entropy: shannon_entropy(packet),
        }
    }

    /// Columns in table order: header size, packet size, header entropy,
    /// packet entropy.
    pub fn to_row(&self) -> [f64; N_PACKET_FEATURES] {
        [
            self.header_len as f64,
            self.packet_len as f64,
            self.header_entropy,
            self.packet_entropy,
        ]
    }
}

/// Stack packet measurements into a dataset ready for clustering.
pub fn feature_table(packets: &[PacketFeatures]) -> Result<Dataset> {
    let table = Array2::from_shape_fn((packets.len(), N_PACKET_FEATURES), |(i, j)| {
        packets[i].to_row()[j]
    });
    Dataset::new(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_entropy_of_reference_sample() {
        let bytes = [1u8, 2, 2, 3, 3, 3, 4, 4, 4, 4];
        assert!((shannon_entropy(&bytes) - 1.846439).abs() < 1e-6);
    }

    #[test]
    fn test_entropy_bounds() {
        assert_eq!(shannon_entropy(&[]), 0.0);
        assert_eq!(shannon_entropy(&[0x41; 64]), 0.0);

        let every_byte: Vec<u8> = (0..=255).collect();
        assert!((shannon_entropy(&every_byte) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_does_not_stop_at_nul() {
        // two equally likely symbols, one of them NUL
        let bytes = [7u8, 0, 7, 0];
        assert!((shannon_entropy(&bytes) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_packet_features_and_table() {
        let header = [0x45u8, 0x00, 0x00, 0x3c];
        let packet: Vec<u8> = header.iter().copied().chain(0..=255).collect();

        let features = PacketFeatures::from_bytes(&header, &packet);
        assert_eq!(features.header_len, 4);
        assert_eq!(features.packet_len, 260);
        assert!((features.header_entropy - 1.5).abs() < 1e-12);
        assert!(features.packet_entropy > 7.9);

        let quiet = PacketFeatures::from_bytes(&[0; 4], &[0; 60]);
        let table = feature_table(&[features, quiet]).unwrap();
        assert_eq!(table.n_samples(), 2);
        assert_eq!(table.n_features(), N_PACKET_FEATURES);
        assert_eq!(table.features().row(1).to_vec(), vec![4.0, 60.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(feature_table(&[]), Err(Error::EmptyInput(_))));
    }
}
