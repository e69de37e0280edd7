use std::path::PathBuf;

use thiserror::Error;

pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[derive(Debug, Error)]
pub enum StreamError {
    /// Запись или остановка без активной сессии
    #[error("Pulse stream is not armed")]
    NotArmed,

    /// Повторный start при активной сессии
    #[error("Pulse stream already armed: {path:?}")]
    AlreadyArmed { path: PathBuf },

    /// Некорректные буферы отсчётов (отклоняются до любого I/O)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Длина записи не совпадает с заголовком (только при
    /// `WriterOptions::enforce_record_length`)
    #[error("Record length mismatch: header declares {expected} samples, got {found}")]
    RecordLength { expected: i32, found: usize },

    /// Ошибка создания или записи файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка формата pulse stream
    #[error("Pulse format error: {0}")]
    Format(#[from] pulse_types::PulseError),
}

impl StreamError {
    /// Вызов в неподходящем состоянии (armed/disarmed).
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, StreamError::NotArmed | StreamError::AlreadyArmed { .. })
    }
}
