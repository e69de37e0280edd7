/// Текущая ревизия формата pulse stream файла.
pub const PULSE_STREAM_VERSION: u32 = 1;

/// Заголовок pulse stream файла.
///
/// Пишется один раз по смещению 0 и после этого не меняется. Описывает
/// все записи, следующие за ним: каждая запись содержит ровно
/// `number_of_sample_points` отсчётов времени и столько же отсчётов
/// напряжения.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseStreamHeader {
    /// Ревизия формата (для читателей будущих версий)
    pub version: u32,
    /// Длина временного окна захвата, нс
    pub sweep_in_nanoseconds: f64,
    /// Частота дискретизации, ГГц
    pub sample_speed_in_ghz: f64,
    /// Количество пар (время, напряжение) в каждой записи
    pub number_of_sample_points: i32,
}

impl PulseStreamHeader {
    /// Заголовок текущей версии формата.
    pub fn new(
        sweep_in_nanoseconds: f64,
        sample_speed_in_ghz: f64,
        number_of_sample_points: i32,
    ) -> Self {
        Self {
            version: PULSE_STREAM_VERSION,
            sweep_in_nanoseconds,
            sample_speed_in_ghz,
            number_of_sample_points,
        }
    }

    /// Число отсчётов в записи, `None` для отрицательного значения.
    pub fn samples_per_record(&self) -> Option<usize> {
        usize::try_from(self.number_of_sample_points).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_current_version() {
        let header = PulseStreamHeader::new(200.0, 2.5, 1024);

        assert_eq!(header.version, PULSE_STREAM_VERSION);
        assert_eq!(header.sweep_in_nanoseconds, 200.0);
        assert_eq!(header.sample_speed_in_ghz, 2.5);
        assert_eq!(header.samples_per_record(), Some(1024));
    }

    #[test]
    fn test_negative_sample_count() {
        let header = PulseStreamHeader::new(200.0, 2.5, -1);
        assert_eq!(header.samples_per_record(), None);
    }
}
