//! Sink boundary: writes never report failure to the logging path

use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Hands out writers over a shared sink that swallow every I/O error.
///
/// Logging must never fail the caller, so whatever the sink reports
/// (a full disk, a failed rotation) stops here.
#[derive(Debug)]
pub struct SwallowErrors<T> {
    sink: Arc<T>,
}

impl<T> SwallowErrors<T> {
    pub fn new(sink: Arc<T>) -> Self {
        Self { sink }
    }
}

impl<T> Clone for SwallowErrors<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<'a, T: 'a> MakeWriter<'a> for SwallowErrors<T>
where
    &'a T: io::Write,
{
    type Writer = Swallowed<&'a T>;

    fn make_writer(&'a self) -> Self::Writer {
        Swallowed(&*self.sink)
    }
}

/// Writer returned by [`SwallowErrors`]
#[derive(Debug)]
pub struct Swallowed<W>(W);

impl<W: io::Write> io::Write for Swallowed<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = self.0.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = self.0.flush();
        Ok(())
    }
}
