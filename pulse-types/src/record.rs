/// Один импульс, прочитанный из файла: отсчёты времени и напряжения.
///
/// На диске запись хранится как `n` значений времени, за которыми сразу
/// идут `n` значений напряжения.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PulseRecord {
    /// Отсчёты времени
    pub time: Vec<f32>,
    /// Отсчёты напряжения
    pub voltage: Vec<f32>,
}

impl PulseRecord {
    pub fn new(
        time: Vec<f32>,
        voltage: Vec<f32>,
    ) -> Self {
        Self { time, voltage }
    }

    /// Количество пар (время, напряжение).
    pub fn sample_count(&self) -> usize {
        self.time.len().min(self.voltage.len())
    }
}
