//! Запись импульсов детектора в pulse stream файл.
//!
//! ```no_run
//! use pulse_recorder::{PulseStreamWriter, StreamParams};
//!
//! let mut writer = PulseStreamWriter::new();
//! writer.start("run1.bin", &StreamParams::new(200.0, 2.5, 1024))?;
//!
//! let time = vec![0.0f32; 1024];
//! let voltage = vec![0.0f32; 1024];
//! writer.write_pulse(&time, &voltage)?;
//!
//! writer.stop_and_save()?;
//! # Ok::<(), pulse_recorder::StreamError>(())
//! ```

pub mod config;
pub mod error;
pub mod summary;
pub mod writer;

pub use config::*;
pub use error::*;
pub use summary::*;
pub use writer::*;
