use std::io::{self, BufReader, ErrorKind, Read};

use log::warn;
use pulse_types::{PulseError, PulseRecord, PulseResult, PulseStreamHeader};

use crate::{
    binary::decode_samples,
    format::{PulseStreamHeaderExt, PULSE_HEADER_SIZE},
};

/// Потоковый читатель pulse stream файлов.
pub struct PulseStreamReader<R: Read> {
    reader: BufReader<R>,
    header: PulseStreamHeader,
    record_len: usize,
    record_buf: Vec<u8>,
    stats: ReadStats,
    eof: bool,
}

/// Статистика, накопленная [`PulseStreamReader`] в процессе чтения.
#[derive(Debug, Default, Clone)]
pub struct ReadStats {
    /// Успешно прочитанных записей.
    pub records_ok: u64,
    /// Байт оборванной последней записи (0 если файл целый).
    pub trailing_bytes: u64,
    /// Всего обработано байт, включая заголовок.
    pub bytes_processed: u64,
}

impl<R: Read> PulseStreamReader<R> {
    /// Создаёт читатель, читая и валидируя заголовок из `inner`.
    pub fn new(inner: R) -> PulseResult<Self> {
        let mut reader = BufReader::new(inner);
        let mut hdr_buf = [0u8; PULSE_HEADER_SIZE];

        let filled = fill(&mut reader, &mut hdr_buf)?;
        if filled < PULSE_HEADER_SIZE {
            return Err(PulseError::Truncated {
                expected: PULSE_HEADER_SIZE,
                found: filled,
            });
        }

        let header = PulseStreamHeader::decode(&hdr_buf)?;
        let record_len = header.record_len()?;

        Ok(Self {
            reader,
            header,
            record_len,
            record_buf: Vec::new(),
            stats: ReadStats {
                bytes_processed: PULSE_HEADER_SIZE as u64,
                ..ReadStats::default()
            },
            eof: false,
        })
    }

    /// Возвращает следующую запись или `None` на EOF.
    ///
    /// Оборванная последняя запись возвращается один раз как
    /// [`PulseError::Truncated`], после чего чтение завершается.
    pub fn next_pulse(&mut self) -> Option<PulseResult<PulseRecord>> {
        if self.eof {
            return None;
        }

        if self.record_len == 0 {
            self.eof = true;
            return self.drain_trailing().err().map(Err);
        }

        // буфер растёт по мере поступления данных, а не по заголовку
        self.record_buf.clear();
        let filled = match (&mut self.reader)
            .take(self.record_len as u64)
            .read_to_end(&mut self.record_buf)
        {
            Ok(n) => n,
            Err(e) => {
                self.eof = true;
                return Some(Err(PulseError::Io(e)));
            }
        };

        self.stats.bytes_processed += filled as u64;

        if filled == 0 {
            self.eof = true;
            return None;
        }

        if filled < self.record_len {
            self.eof = true;
            self.stats.trailing_bytes = filled as u64;
            warn!(
                "Truncated final record: {filled} of {} bytes",
                self.record_len
            );
            return Some(Err(PulseError::Truncated {
                expected: self.record_len,
                found: filled,
            }));
        }

        let half = self.record_len / 2;
        let record = decode_samples(&self.record_buf[..half]).and_then(|time| {
            let voltage = decode_samples(&self.record_buf[half..])?;
            Ok(PulseRecord::new(time, voltage))
        });

        if record.is_ok() {
            self.stats.records_ok += 1;
        }

        Some(record)
    }

    // При нулевом числе отсчётов всё после заголовка считается хвостом.
    fn drain_trailing(&mut self) -> PulseResult<()> {
        let trailing = io::copy(&mut self.reader, &mut io::sink())?;

        if trailing > 0 {
            warn!("{trailing} bytes after header of a zero-sample stream");
        }
        self.stats.trailing_bytes = trailing;
        self.stats.bytes_processed += trailing;

        Ok(())
    }

    /// Прочитанный и проверенный заголовок файла.
    pub fn header(&self) -> &PulseStreamHeader {
        &self.header
    }

    /// Размер одной записи в байтах.
    pub fn record_len(&self) -> usize {
        self.record_len
    }

    /// Накопленная статистика чтения.
    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

impl<R: Read> Iterator for PulseStreamReader<R> {
    type Item = PulseResult<PulseRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pulse()
    }
}

/// Convenience: читает все полные записи в вектор.
///
/// Оборванный хвост не считается ошибкой: он учитывается в
/// [`ReadStats::trailing_bytes`].
pub fn read_all_pulses<R: Read>(
    reader: &mut PulseStreamReader<R>
) -> PulseResult<Vec<PulseRecord>> {
    let mut pulses = Vec::new();
    while let Some(result) = reader.next_pulse() {
        match result {
            Ok(pulse) => pulses.push(pulse),
            Err(PulseError::Truncated { .. }) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(pulses)
}

// read_exact, но возвращает число прочитанных байт вместо UnexpectedEof
fn fill<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> PulseResult<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(PulseError::Io(e)),
        }
    }

    Ok(filled)
}
