//! Спецификация формата pulse stream файла версия 1
//!
//! Файл состоит из заголовка фиксированного размера и потока записей
//! фиксированной длины. Все многобайтовые числа хранятся в порядке
//! little-endian.
//!
//! ```text
//! 0..4    u32  version
//! 4..8         padding (нули)
//! 8..16   f64  sweep_in_nanoseconds
//! 16..24  f64  sample_speed_in_ghz
//! 24..28  i32  number_of_sample_points
//! 28..32       padding (нули)
//! 32..         записи: n × f32 время, затем n × f32 напряжение
//! ```
//!
//! Разделителей, префиксов длины и маркера конца потока нет. Количество
//! записей определяется по размеру файла.

use std::io::Write;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use pulse_types::{PulseError, PulseResult, PulseStreamHeader, PULSE_STREAM_VERSION};

/// Размер заголовка в байтах (раскладка C-структуры с выравниванием по 8)
pub const PULSE_HEADER_SIZE: usize = 32;

/// Размер одного отсчёта (f32) в байтах
pub const SAMPLE_SIZE: usize = std::mem::size_of::<f32>();

/// Размер одного канала записи (время или напряжение) в байтах.
pub fn channel_len_bytes(samples: usize) -> usize {
    samples * SAMPLE_SIZE
}

/// Полный размер записи: время + напряжение.
pub fn record_len_bytes(samples: usize) -> usize {
    2 * channel_len_bytes(samples)
}

/// Сериализация заголовка в формат pulse stream.
///
/// Заголовок живёт в `pulse-types`, поэтому кодек подключается трейтом.
pub trait PulseStreamHeaderExt: Sized {
    /// Сериализация заголовка в 32 байта
    fn encode(&self) -> PulseResult<[u8; PULSE_HEADER_SIZE]>;

    /// Десериализация заголовка из 32 байт
    fn decode(buf: &[u8; PULSE_HEADER_SIZE]) -> PulseResult<Self>;

    /// Размер одной записи в байтах.
    fn record_len(&self) -> PulseResult<usize>;
}

impl PulseStreamHeaderExt for PulseStreamHeader {
    fn encode(&self) -> PulseResult<[u8; PULSE_HEADER_SIZE]> {
        let mut buf = [0u8; PULSE_HEADER_SIZE];
        let mut w = &mut buf[..];

        w.write_u32::<LittleEndian>(self.version)?;
        w.write_all(&[0u8; 4])?; // padding
        w.write_f64::<LittleEndian>(self.sweep_in_nanoseconds)?;
        w.write_f64::<LittleEndian>(self.sample_speed_in_ghz)?;
        w.write_i32::<LittleEndian>(self.number_of_sample_points)?;
        // [28..32] — padding, уже нули

        Ok(buf)
    }

    fn decode(buf: &[u8; PULSE_HEADER_SIZE]) -> PulseResult<Self> {
        let mut r = &buf[..];

        let version = r.read_u32::<LittleEndian>()?;
        if version != PULSE_STREAM_VERSION {
            return Err(PulseError::UnsupportedVersion {
                found: version,
                expected: PULSE_STREAM_VERSION,
            });
        }
        r = &r[4..];

        let sweep_in_nanoseconds = r.read_f64::<LittleEndian>()?;
        let sample_speed_in_ghz = r.read_f64::<LittleEndian>()?;
        let number_of_sample_points = r.read_i32::<LittleEndian>()?;

        Ok(PulseStreamHeader {
            version,
            sweep_in_nanoseconds,
            sample_speed_in_ghz,
            number_of_sample_points,
        })
    }

    fn record_len(&self) -> PulseResult<usize> {
        self.samples_per_record()
            .and_then(|n| n.checked_mul(2 * SAMPLE_SIZE))
            .ok_or_else(|| {
                PulseError::format_violation(format!(
                    "invalid number_of_sample_points: {}",
                    self.number_of_sample_points
                ))
            })
    }
}

/// Раскладка файла, вычисленная по его размеру.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamLayout {
    /// Полных записей после заголовка
    pub records: u64,
    /// Байт хвоста, не образующих полную запись
    pub trailing_bytes: u64,
}

/// Считает количество записей по размеру файла.
///
/// `records = (file_len - header) / record_len`; остаток означает
/// оборванную последнюю запись.
pub fn expected_layout(
    file_len: u64,
    header: &PulseStreamHeader,
) -> PulseResult<StreamLayout> {
    let header_len = PULSE_HEADER_SIZE as u64;

    if file_len < header_len {
        return Err(PulseError::Truncated {
            expected: PULSE_HEADER_SIZE,
            found: file_len as usize,
        });
    }

    let payload = file_len - header_len;
    let record_len = header.record_len()? as u64;

    if record_len == 0 {
        return Ok(StreamLayout {
            records: 0,
            trailing_bytes: payload,
        });
    }

    Ok(StreamLayout {
        records: payload / record_len,
        trailing_bytes: payload % record_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = PulseStreamHeader::new(200.0, 2.5, 1024);

        let encoded = header.encode().unwrap();
        assert_eq!(std::mem::size_of_val(&encoded), PULSE_HEADER_SIZE);

        let decoded = PulseStreamHeader::decode(&encoded).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_byte_layout() {
        let header = PulseStreamHeader::new(200.0, 2.5, 1024);
        let bytes = header.encode().unwrap();

        assert_eq!(&bytes[0..4], &[1, 0, 0, 0], "version LE");
        assert_eq!(&bytes[4..8], &[0; 4], "padding");
        assert_eq!(&bytes[8..16], &200.0f64.to_le_bytes(), "sweep");
        assert_eq!(&bytes[16..24], &2.5f64.to_le_bytes(), "sample speed");
        // 1024 = 0x00000400
        assert_eq!(&bytes[24..28], &[0x00, 0x04, 0x00, 0x00], "samples LE");
        assert_eq!(&bytes[28..32], &[0; 4], "padding");
    }

    #[test]
    fn test_header_unsupported_version() {
        let mut header = PulseStreamHeader::new(100.0, 5.0, 512);
        header.version = 9;
        let bytes = header.encode().unwrap();

        let result = PulseStreamHeader::decode(&bytes);
        assert!(matches!(
            result,
            Err(PulseError::UnsupportedVersion {
                found: 9,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_record_len() {
        assert_eq!(channel_len_bytes(1024), 4096);
        assert_eq!(record_len_bytes(1024), 8192);

        let header = PulseStreamHeader::new(200.0, 2.5, 1024);
        assert_eq!(header.record_len().unwrap(), 8192);

        let bad = PulseStreamHeader::new(200.0, 2.5, -4);
        assert!(bad.record_len().is_err());
    }

    #[test]
    fn test_expected_layout() {
        let header = PulseStreamHeader::new(200.0, 2.5, 4); // запись = 32 байта

        let layout = expected_layout(32 + 3 * 32, &header).unwrap();
        assert_eq!(layout.records, 3);
        assert_eq!(layout.trailing_bytes, 0);

        let layout = expected_layout(32 + 2 * 32 + 16, &header).unwrap();
        assert_eq!(layout.records, 2);
        assert_eq!(layout.trailing_bytes, 16);

        assert!(expected_layout(10, &header).is_err());
    }

    #[test]
    fn test_expected_layout_zero_samples() {
        let header = PulseStreamHeader::new(200.0, 2.5, 0);
        let layout = expected_layout(40, &header).unwrap();

        assert_eq!(layout.records, 0);
        assert_eq!(layout.trailing_bytes, 8);
    }
}
