use std::io::{self, Write};
use std::sync::Mutex;

/// Destination for the human-readable line written alongside every emitted
/// event. Independent of the structured path: it shares only the raw
/// message string.
pub trait TextSink: Send + Sync {
    fn write(&self, text: &str) -> io::Result<()>;
}

/// Adapter wrapping any `Write` (file, stderr, socket) as a [`TextSink`].
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> TextSink for WriterSink<W> {
    fn write(&self, text: &str) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Seek, SeekFrom};

    #[test]
    fn writer_sink_appends_text() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        let sink = WriterSink::new(file.reopen().unwrap());

        sink.write("first\n").unwrap();
        sink.write("second\n").unwrap();

        assert_eq!("first\nsecond\n", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn writer_sink_over_an_in_memory_cursor() {
        let sink = WriterSink::new(io::Cursor::new(Vec::new()));
        sink.write("raw bytes").unwrap();

        let mut cursor = sink.inner.into_inner().unwrap();
        cursor.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(b"raw bytes", cursor.get_ref().as_slice());
    }
}
