//! Писатель pulse stream файлов.
//!
//! Состояния: `Disarmed` (начальное и после остановки) и `Armed` (после
//! успешного [`PulseStreamWriter::start`]). Записи дописываются только в
//! состоянии `Armed`; вызовы в неподходящем состоянии отклоняются без
//! изменения состояния.
//!
//! Все операции синхронные и блокирующие. Писатель не синхронизирован
//! внутри: сессию ведёт один владелец через `&mut self`.

use std::{
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use pulse_core::{encode_samples_into, PulseStreamHeaderExt, PULSE_HEADER_SIZE};
use pulse_types::PulseStreamHeader;

use crate::{SessionSummary, StreamError, StreamParams, StreamResult, WriterOptions};

/// Открытая сессия: дескриптор и заголовок, с которым она начата.
struct StreamSession<W> {
    sink: W,
    header: PulseStreamHeader,
    write_errors: u64,
}

/// Потоковый писатель импульсов детектора.
///
/// По умолчанию пишет напрямую в [`File`] без промежуточного буфера, так что
/// [`streamed_content_in_bytes`](Self::streamed_content_in_bytes) совпадает с
/// размером файла на диске после каждого вызова.
pub struct PulseStreamWriter<W: Write = File> {
    session: Option<StreamSession<W>>,
    options: WriterOptions,
    file_name: PathBuf,
    content_in_bytes: u64,
    scratch: Vec<u8>,
}

impl PulseStreamWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    /// Создаёт (или обрезает) файл `path` и пишет в него заголовок.
    ///
    /// Если файл не открылся, ничего не записано. Если не записался
    /// заголовок, созданный файл удаляется и писатель остаётся `Disarmed`.
    pub fn start<P: AsRef<Path>>(
        &mut self,
        path: P,
        params: &StreamParams,
    ) -> StreamResult<()> {
        self.ensure_disarmed()?;

        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            warn!("Failed to create pulse stream {path:?}: {e}");
            e
        })?;

        if let Err(e) = self.start_with_sink(path, file, params) {
            if let Err(rm) = fs::remove_file(path) {
                warn!("Failed to remove incomplete pulse stream {path:?}: {rm}");
            }
            return Err(e);
        }

        Ok(())
    }
}

impl<W: Write> PulseStreamWriter<W> {
    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            session: None,
            options,
            file_name: PathBuf::new(),
            content_in_bytes: 0,
            scratch: Vec::new(),
        }
    }

    /// Начинает сессию поверх уже открытого приёмника.
    ///
    /// `path` только запоминается для [`file_name`](Self::file_name).
    pub fn start_with_sink<P: Into<PathBuf>>(
        &mut self,
        path: P,
        mut sink: W,
        params: &StreamParams,
    ) -> StreamResult<()> {
        self.ensure_disarmed()?;

        let path = path.into();
        let header = params.header();
        let encoded = header.encode()?;

        let (written, result) = write_counted(&mut sink, &encoded);
        if let Err(e) = result {
            warn!("Failed to write pulse stream header to {path:?} ({written} of {PULSE_HEADER_SIZE} bytes): {e}");
            return Err(e.into());
        }

        info!(
            "Pulse stream armed: {path:?}, sweep={} ns, speed={} GHz, samples={}",
            header.sweep_in_nanoseconds, header.sample_speed_in_ghz, header.number_of_sample_points
        );

        self.session = Some(StreamSession {
            sink,
            header,
            write_errors: 0,
        });
        self.file_name = path;
        self.content_in_bytes = PULSE_HEADER_SIZE as u64;

        Ok(())
    }

    /// Дописывает один импульс: сначала `time`, затем `voltage`.
    ///
    /// При частичной записи счётчик байт отражает только принятые байты,
    /// а уже записанная часть остаётся в файле.
    pub fn write_pulse(
        &mut self,
        time: &[f32],
        voltage: &[f32],
    ) -> StreamResult<()> {
        let header = self.armed_header()?;
        self.check_record(&header, time, voltage)?;

        self.append_record(time, voltage)
    }

    /// Дописывает два импульса одного триггера: запись 1 полностью, затем
    /// запись 2.
    ///
    /// Обе пары буферов проверяются до начала записи. Если вторая запись
    /// не удалась, первая из файла не удаляется.
    pub fn write_pulse_pair(
        &mut self,
        time_1: &[f32],
        voltage_1: &[f32],
        time_2: &[f32],
        voltage_2: &[f32],
    ) -> StreamResult<()> {
        let header = self.armed_header()?;
        self.check_record(&header, time_1, voltage_1)?;
        self.check_record(&header, time_2, voltage_2)?;

        self.append_record(time_1, voltage_1)?;
        self.append_record(time_2, voltage_2)
    }

    /// Сбрасывает и закрывает файл, переводя писатель в `Disarmed`.
    ///
    /// Без активной сессии ничего не делает и возвращает `Ok(None)`.
    /// Дескриптор освобождается и при ошибке сброса.
    pub fn stop_and_save(&mut self) -> StreamResult<Option<SessionSummary>> {
        let Some(mut session) = self.session.take() else {
            debug!("stop_and_save on a disarmed pulse stream, nothing to do");
            return Ok(None);
        };

        let flushed = session.sink.flush();
        let StreamSession {
            sink,
            header,
            write_errors,
        } = session;
        drop(sink);

        if let Err(e) = flushed {
            warn!("Failed to flush pulse stream {:?}: {e}", self.file_name);
            return Err(e.into());
        }

        let summary = SessionSummary::new(
            self.file_name.clone(),
            header,
            self.content_in_bytes,
            write_errors,
        );

        info!("Pulse stream saved: {:?}\n{summary}", self.file_name);

        Ok(Some(summary))
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    /// Путь последней успешно начатой сессии (пустой, если её не было).
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Байт, записанных в последней сессии, включая заголовок.
    pub fn streamed_content_in_bytes(&self) -> u64 {
        self.content_in_bytes
    }

    /// Заголовок активной сессии.
    pub fn header(&self) -> Option<&PulseStreamHeader> {
        self.session.as_ref().map(|s| &s.header)
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    fn ensure_disarmed(&self) -> StreamResult<()> {
        if self.session.is_some() {
            warn!("start refused: pulse stream {:?} is already armed", self.file_name);
            return Err(StreamError::AlreadyArmed {
                path: self.file_name.clone(),
            });
        }
        Ok(())
    }

    fn armed_header(&self) -> StreamResult<PulseStreamHeader> {
        match &self.session {
            Some(session) => Ok(session.header),
            None => {
                warn!("write refused: pulse stream is not armed");
                Err(StreamError::NotArmed)
            }
        }
    }

    fn check_record(
        &self,
        header: &PulseStreamHeader,
        time: &[f32],
        voltage: &[f32],
    ) -> StreamResult<()> {
        if time.len() != voltage.len() {
            return Err(StreamError::InvalidArgument(format!(
                "time has {} samples, voltage has {}",
                time.len(),
                voltage.len()
            )));
        }

        if self.options.enforce_record_length && header.samples_per_record() != Some(time.len()) {
            return Err(StreamError::RecordLength {
                expected: header.number_of_sample_points,
                found: time.len(),
            });
        }

        Ok(())
    }

    fn append_record(
        &mut self,
        time: &[f32],
        voltage: &[f32],
    ) -> StreamResult<()> {
        for channel in [time, voltage] {
            let Some(session) = self.session.as_mut() else {
                return Err(StreamError::NotArmed);
            };

            encode_samples_into(channel, &mut self.scratch);

            let (written, result) = write_counted(&mut session.sink, &self.scratch);
            self.content_in_bytes += written as u64;

            if let Err(e) = result {
                session.write_errors += 1;
                warn!(
                    "Pulse write to {:?} failed after {written} of {} bytes: {e}",
                    self.file_name,
                    self.scratch.len()
                );
                return Err(e.into());
            }
        }

        trace!(
            "Pulse appended ({} samples), stream at {} bytes",
            time.len(),
            self.content_in_bytes
        );

        Ok(())
    }
}

impl Default for PulseStreamWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Drop for PulseStreamWriter<W> {
    fn drop(&mut self) {
        if self.session.is_some() {
            if let Err(e) = self.stop_and_save() {
                warn!("Pulse stream closed with error on drop: {e}");
            }
        }
    }
}

/// `write_all`, который сообщает, сколько байт приёмник успел принять.
fn write_counted<W: Write>(
    sink: &mut W,
    mut buf: &[u8],
) -> (usize, io::Result<()>) {
    let mut written = 0;

    while !buf.is_empty() {
        match sink.write(buf) {
            Ok(0) => {
                return (
                    written,
                    Err(io::Error::new(
                        ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    )),
                );
            }
            Ok(n) => {
                written += n;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return (written, Err(e)),
        }
    }

    (written, Ok(()))
}
