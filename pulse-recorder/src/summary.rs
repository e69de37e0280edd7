use std::path::PathBuf;

use pulse_core::{expected_layout, StreamLayout, PULSE_HEADER_SIZE};
use pulse_types::PulseStreamHeader;

/// Итог закрытой сессии записи.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub path: PathBuf,
    pub header: PulseStreamHeader,
    /// Байт в файле, включая заголовок
    pub bytes_written: u64,
    /// Полных записей после заголовка
    pub records: u64,
    /// Байт оборванной записи после неудачной записи импульса
    pub trailing_bytes: u64,
    /// Неудачных вызовов записи за сессию
    pub write_errors: u64,
}

impl SessionSummary {
    pub fn new(
        path: PathBuf,
        header: PulseStreamHeader,
        bytes_written: u64,
        write_errors: u64,
    ) -> Self {
        let layout = expected_layout(bytes_written, &header).unwrap_or(StreamLayout {
            records: 0,
            trailing_bytes: bytes_written.saturating_sub(PULSE_HEADER_SIZE as u64),
        });

        Self {
            path,
            header,
            bytes_written,
            records: layout.records,
            trailing_bytes: layout.trailing_bytes,
            write_errors,
        }
    }

    /// Файл состоит только из заголовка и целых записей.
    pub fn is_complete(&self) -> bool {
        self.trailing_bytes == 0
    }
}

impl std::fmt::Display for SessionSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  File          : {:?}", self.path)?;
        writeln!(
            f,
            "  Sweep         : {} ns @ {} GHz",
            self.header.sweep_in_nanoseconds, self.header.sample_speed_in_ghz
        )?;
        writeln!(
            f,
            "  Sample points : {}",
            self.header.number_of_sample_points
        )?;
        writeln!(f, "  Records       : {}", self.records)?;
        writeln!(f, "  Trailing      : {} B", self.trailing_bytes)?;
        writeln!(f, "  Write errors  : {}", self.write_errors)?;
        writeln!(
            f,
            "  Bytes written : {:.3} MB",
            self.bytes_written as f64 / 1e6
        )?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_records() {
        let header = PulseStreamHeader::new(200.0, 2.5, 1024);
        let summary = SessionSummary::new("run1.bin".into(), header, 32 + 3 * 8192, 0);

        assert_eq!(summary.records, 3);
        assert_eq!(summary.trailing_bytes, 0);
        assert!(summary.is_complete());
    }

    #[test]
    fn test_summary_partial_record() {
        let header = PulseStreamHeader::new(200.0, 2.5, 1024);
        let summary = SessionSummary::new("run1.bin".into(), header, 32 + 8192 + 4096, 1);

        assert_eq!(summary.records, 1);
        assert_eq!(summary.trailing_bytes, 4096);
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_summary_negative_sample_count() {
        let header = PulseStreamHeader::new(200.0, 2.5, -1);
        let summary = SessionSummary::new("bad.bin".into(), header, 32 + 100, 0);

        assert_eq!(summary.records, 0);
        assert_eq!(summary.trailing_bytes, 100);
    }

    #[test]
    fn test_summary_display() {
        let header = PulseStreamHeader::new(200.0, 2.5, 16);
        let text = SessionSummary::new("run1.bin".into(), header, 32, 0).to_string();

        assert!(text.contains("run1.bin"));
        assert!(text.contains("Records       : 0"));
    }
}
