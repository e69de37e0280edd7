use byteorder::{ByteOrder, LittleEndian};
use pulse_types::{PulseError, PulseResult};

use crate::SAMPLE_SIZE;

/// Декодирует little-endian отсчёты f32.
///
/// Длина `bytes` должна быть кратна размеру отсчёта.
pub fn decode_samples(bytes: &[u8]) -> PulseResult<Vec<f32>> {
    if bytes.len() % SAMPLE_SIZE != 0 {
        return Err(PulseError::format_violation(format!(
            "sample buffer of {} bytes is not a multiple of {SAMPLE_SIZE}",
            bytes.len()
        )));
    }

    let mut samples = vec![0f32; bytes.len() / SAMPLE_SIZE];
    LittleEndian::read_f32_into(bytes, &mut samples);

    Ok(samples)
}
