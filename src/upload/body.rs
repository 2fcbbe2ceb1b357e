use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Size of each chunk forwarded from the source to the network.
pub const CHUNK_SIZE: usize = 8192;

/// Called with the cumulative number of bytes forwarded so far.
pub type ProgressCallback = Box<dyn FnMut(u64) + Send>;

/// A request body streamed from a seekable source.
///
/// The declared length is the full size of the source, measured when the
/// body is created. Bytes are forwarded sequentially in chunks of at most
/// [`CHUNK_SIZE`] and the progress callback runs once per forwarded chunk.
pub struct ProgressBody<R> {
    source: R,
    length: u64,
    sent: u64,
    progress: ProgressCallback,
}

impl<R> ProgressBody<R>
where
    R: Read + Seek,
{
    pub fn new<F>(mut source: R, progress: F) -> io::Result<Self>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let position = source.stream_position()?;
        let length = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(position))?;

        Ok(Self {
            source,
            length,
            sent: 0,
            progress: Box::new(progress),
        })
    }

    pub fn content_length(&self) -> u64 {
        self.length
    }

    pub fn bytes_sent(&self) -> u64 {
        self.sent
    }

    /// Copies the rest of the source into `sink`, one chunk at a time.
    ///
    /// Each chunk is fully written before the next read. Returns the total
    /// number of bytes written by this body.
    pub fn write_to<W: Write>(&mut self, sink: &mut W) -> io::Result<u64> {
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let read = match self.source.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            sink.write_all(&buffer[..read])?;
            self.advance(read);
        }
        sink.flush()?;
        Ok(self.sent)
    }

    fn advance(&mut self, bytes: usize) {
        self.sent += bytes as u64;
        (self.progress)(self.sent);
    }
}

impl<R> ProgressBody<R>
where
    R: Read + Seek + Send + 'static,
{
    /// Wraps the body for reqwest with a fixed `Content-Length`.
    pub fn into_body(self) -> reqwest::blocking::Body {
        let length = self.length;
        reqwest::blocking::Body::sized(self, length)
    }
}

// Pull-mode adapter used by the HTTP client. Every call hands over at most
// one chunk and reports it before returning.
impl<R> Read for ProgressBody<R>
where
    R: Read + Seek,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(CHUNK_SIZE);
        let read = self.source.read(&mut buf[..limit])?;
        if read > 0 {
            self.advance(read);
        }
        Ok(read)
    }
}

impl<R> fmt::Debug for ProgressBody<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBody")
            .field("length", &self.length)
            .field("sent", &self.sent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Sink that remembers the size of every write call.
    #[derive(Default)]
    struct ChunkSink {
        data: Vec<u8>,
        writes: Vec<usize>,
    }

    impl Write for ChunkSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            self.writes.push(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Source that fails once `fail_at` bytes have been handed out.
    struct FailingSource {
        inner: Cursor<Vec<u8>>,
        fail_at: u64,
    }

    impl Read for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.inner.position() >= self.fail_at {
                return Err(io::Error::new(io::ErrorKind::Other, "disk read failed"));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for FailingSource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn failing_source(len: usize, fail_at: u64) -> FailingSource {
        FailingSource {
            inner: Cursor::new(sample(len)),
            fail_at,
        }
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl FnMut(u64) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |sent| sink.lock().unwrap().push(sent))
    }

    #[test]
    fn writes_whole_chunks_in_order() {
        let data = sample(20_000);
        let (seen, progress) = recorder();
        let mut body = ProgressBody::new(Cursor::new(data.clone()), progress).unwrap();
        let mut sink = ChunkSink::default();

        let written = body.write_to(&mut sink).unwrap();

        assert_eq!(written, 20_000);
        assert_eq!(sink.data, data);
        assert_eq!(sink.writes, vec![8192, 8192, 3616]);
        assert_eq!(*seen.lock().unwrap(), vec![8192, 16384, 20_000]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let (seen, progress) = recorder();
        let mut body = ProgressBody::new(Cursor::new(sample(CHUNK_SIZE * 2)), progress).unwrap();
        let mut sink = ChunkSink::default();

        body.write_to(&mut sink).unwrap();

        assert_eq!(sink.writes, vec![CHUNK_SIZE, CHUNK_SIZE]);
        assert_eq!(seen.lock().unwrap().last().copied(), Some(2 * CHUNK_SIZE as u64));
    }

    #[test]
    fn empty_source_writes_nothing() {
        let (seen, progress) = recorder();
        let mut body = ProgressBody::new(Cursor::new(Vec::new()), progress).unwrap();
        let mut sink = ChunkSink::default();

        assert_eq!(body.write_to(&mut sink).unwrap(), 0);
        assert!(sink.writes.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn content_length_is_total_size_and_position_is_kept() {
        let mut cursor = Cursor::new(sample(1000));
        cursor.set_position(10);

        let body = ProgressBody::new(cursor, |_| {}).unwrap();

        assert_eq!(body.content_length(), 1000);
        assert_eq!(body.source.position(), 10);
    }

    #[test]
    fn read_hands_over_at_most_one_chunk() {
        let (seen, progress) = recorder();
        let mut body = ProgressBody::new(Cursor::new(sample(10_000)), progress).unwrap();
        let mut buf = vec![0u8; 64 * 1024];

        assert_eq!(body.read(&mut buf).unwrap(), CHUNK_SIZE);
        assert_eq!(body.read(&mut buf).unwrap(), 10_000 - CHUNK_SIZE);
        assert_eq!(body.read(&mut buf).unwrap(), 0);
        assert_eq!(*seen.lock().unwrap(), vec![8192, 10_000]);
        assert_eq!(body.bytes_sent(), 10_000);
    }

    #[test]
    fn write_failure_aborts() {
        let mut body = ProgressBody::new(Cursor::new(sample(100)), |_| {}).unwrap();

        let err = body.write_to(&mut FailingSink).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(body.bytes_sent(), 0);
    }

    #[test]
    fn read_failure_aborts_write_to() {
        let (seen, progress) = recorder();
        let mut body = ProgressBody::new(failing_source(20_000, 2 * CHUNK_SIZE as u64), progress)
            .unwrap();
        let mut sink = ChunkSink::default();

        let err = body.write_to(&mut sink).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(sink.writes, vec![CHUNK_SIZE, CHUNK_SIZE]);
        assert_eq!(sink.data, sample(2 * CHUNK_SIZE));
        assert_eq!(*seen.lock().unwrap(), vec![8192, 16384]);
        assert_eq!(body.bytes_sent(), 16384);
    }

    #[test]
    fn read_failure_surfaces_through_read() {
        let (seen, progress) = recorder();
        let mut body =
            ProgressBody::new(failing_source(20_000, CHUNK_SIZE as u64), progress).unwrap();
        let mut buf = vec![0u8; 64 * 1024];

        assert_eq!(body.read(&mut buf).unwrap(), CHUNK_SIZE);
        let err = body.read(&mut buf).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(*seen.lock().unwrap(), vec![8192]);
        assert_eq!(body.bytes_sent(), CHUNK_SIZE as u64);
    }
}
