use byteorder::{ByteOrder, LittleEndian};

use crate::SAMPLE_SIZE;

/// Кодирует отсчёты в little-endian, переиспользуя буфер `out`.
pub fn encode_samples_into(
    samples: &[f32],
    out: &mut Vec<u8>,
) {
    out.clear();
    out.resize(samples.len() * SAMPLE_SIZE, 0);
    LittleEndian::write_f32_into(samples, out);
}

/// Кодирует отсчёты в новый буфер.
pub fn encode_samples(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_samples_into(samples, &mut out);
    out
}
