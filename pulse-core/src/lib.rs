//! Библиотека формата pulse stream
//!
//! Бинарный формат для потоковой записи импульсов детектора: заголовок
//! фиксированного размера и последовательность записей фиксированной
//! длины (отсчёты времени, затем отсчёты напряжения).
//!
//! # Быстрый старт
//!
//! ```no_run
//! use pulse_core::{encode_samples, PulseStreamHeader, PulseStreamHeaderExt, PulseStreamReader};
//! use std::fs::File;
//! use std::io::Write;
//!
//! let mut file = File::create("run1.bin")?;
//! let header = PulseStreamHeader::new(200.0, 2.5, 2);
//! file.write_all(&header.encode()?)?;
//! file.write_all(&encode_samples(&[0.0, 0.4]))?;
//! file.write_all(&encode_samples(&[-0.1, -0.3]))?;
//!
//! let reader = PulseStreamReader::new(File::open("run1.bin")?)?;
//! assert_eq!(reader.count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod format;
pub mod reader;

pub use binary::*;
pub use format::*;
pub use pulse_types::{PulseError, PulseRecord, PulseResult, PulseStreamHeader, PULSE_STREAM_VERSION};
pub use reader::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
