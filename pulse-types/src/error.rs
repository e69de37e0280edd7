use thiserror::Error;

/// Результат для операций с форматом pulse stream
pub type PulseResult<T> = std::result::Result<T, PulseError>;

/// Ошибки формата pulse stream файла.
#[derive(Debug, Error)]
pub enum PulseError {
    /// Несовместимая версия формата
    #[error("Unsupported version: found {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Данные закончились посреди заголовка или записи
    #[error("Truncated data: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    /// Нарушение спецификации формата
    #[error("Format violation: {0}")]
    FormatViolation(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PulseError {
    pub fn format_violation<S: Into<String>>(s: S) -> Self {
        Self::FormatViolation(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PulseError::UnsupportedVersion {
            found: 7,
            expected: 1,
        };
        assert_eq!(err.to_string(), "Unsupported version: found 7, expected 1");

        let err = PulseError::Truncated {
            expected: 32,
            found: 10,
        };
        assert!(err.to_string().contains("32"));

        let err = PulseError::format_violation("negative sample count");
        assert!(err.to_string().starts_with("Format violation"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: PulseError = io.into();
        assert!(matches!(err, PulseError::Io(_)));
    }
}
