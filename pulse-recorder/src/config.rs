use pulse_core::{channel_len_bytes, record_len_bytes, PulseStreamHeader};

/// Параметры захвата, которые попадают в заголовок файла.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamParams {
    /// Длина временного окна, нс
    pub sweep_in_nanoseconds: f64,
    /// Частота дискретизации, ГГц
    pub sample_speed_in_ghz: f64,
    /// Отсчётов в одном импульсе
    pub number_of_sample_points: i32,
}

/// Поведение писателя, не отражённое в формате файла.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Отклонять импульсы, длина которых не совпадает с
    /// `number_of_sample_points` из заголовка. По умолчанию выключено:
    /// согласованность длин остаётся на вызывающей стороне.
    pub enforce_record_length: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StreamParams {
    pub fn new(
        sweep_in_nanoseconds: f64,
        sample_speed_in_ghz: f64,
        number_of_sample_points: i32,
    ) -> Self {
        Self {
            sweep_in_nanoseconds,
            sample_speed_in_ghz,
            number_of_sample_points,
        }
    }

    /// Заголовок текущей версии формата для этих параметров.
    pub fn header(&self) -> PulseStreamHeader {
        PulseStreamHeader::new(
            self.sweep_in_nanoseconds,
            self.sample_speed_in_ghz,
            self.number_of_sample_points,
        )
    }

    /// Размер буфера одного канала (время или напряжение) в байтах.
    pub fn channel_len_bytes(&self) -> usize {
        channel_len_bytes(self.samples())
    }

    /// Размер одной записи на диске в байтах.
    pub fn record_len_bytes(&self) -> usize {
        record_len_bytes(self.samples())
    }

    fn samples(&self) -> usize {
        usize::try_from(self.number_of_sample_points).unwrap_or(0)
    }
}

impl WriterOptions {
    /// Строгий режим: проверка длины каждой записи.
    pub fn strict() -> Self {
        Self {
            enforce_record_length: true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Default for StreamParams {
    fn default() -> Self {
        Self {
            sweep_in_nanoseconds: 200.0,
            sample_speed_in_ghz: 2.5,
            number_of_sample_points: 1024,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use pulse_types::PULSE_STREAM_VERSION;

    use super::*;

    #[test]
    fn test_default_params() {
        let params = StreamParams::default();

        assert_eq!(params.number_of_sample_points, 1024);
        assert_eq!(params.channel_len_bytes(), 4096);
        assert_eq!(params.record_len_bytes(), 8192);
    }

    #[test]
    fn test_header_from_params() {
        let header = StreamParams::new(100.0, 5.0, 500).header();

        assert_eq!(header.version, PULSE_STREAM_VERSION);
        assert_eq!(header.sweep_in_nanoseconds, 100.0);
        assert_eq!(header.sample_speed_in_ghz, 5.0);
        assert_eq!(header.number_of_sample_points, 500);
    }

    #[test]
    fn test_negative_sample_count_has_empty_record() {
        assert_eq!(StreamParams::new(100.0, 5.0, -3).record_len_bytes(), 0);
    }

    #[test]
    fn test_writer_options() {
        assert!(!WriterOptions::default().enforce_record_length);
        assert!(WriterOptions::strict().enforce_record_length);
    }
}
