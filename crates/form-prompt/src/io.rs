use std::io::{self, BufRead, Write};

/// Source of user input lines.
pub trait LineInput {
    /// Reads one line without its terminator, keeping at most `max_len`
    /// characters. Returns `Ok(None)` once the input is exhausted.
    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>>;
}

/// Sink for prompts and messages.
pub trait LineOutput {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal echo toggling used around hidden input. Best effort only.
pub trait EchoControl {
    fn suppress_echo(&mut self) -> io::Result<()>;
    fn restore_echo(&mut self) -> io::Result<()>;
}

/// Leaves the terminal echo untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEcho;

impl EchoControl for NoEcho {
    fn suppress_echo(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn restore_echo(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Line input backed by any buffered reader.
#[derive(Debug)]
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineInput for ReaderInput<R> {
    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>> {
        read_limited(&mut self.reader, max_len)
    }
}

/// Line input from the process's standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl LineInput for StdinInput {
    fn read_line(&mut self, max_len: usize) -> io::Result<Option<String>> {
        read_limited(&mut io::stdin().lock(), max_len)
    }
}

/// Line output to any writer; [`WriterOutput::stdout`] for the terminal.
#[derive(Debug)]
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineOutput for WriterOutput<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Reads one line, keeping at most `max_len * 4` bytes of it in memory and
/// decoding lossily so stray non-UTF-8 bytes never fail the read.
fn read_limited(reader: &mut impl BufRead, max_len: usize) -> io::Result<Option<String>> {
    let byte_limit = max_len.saturating_mul(4);
    let mut kept = Vec::new();
    let mut any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if available.is_empty() {
            break;
        }
        any = true;
        let newline = available.iter().position(|&byte| byte == b'\n');
        let chunk = &available[..newline.unwrap_or(available.len())];
        let room = byte_limit.saturating_sub(kept.len());
        kept.extend_from_slice(&chunk[..chunk.len().min(room)]);
        let consumed = newline.map_or(available.len(), |index| index + 1);
        reader.consume(consumed);
        if newline.is_some() {
            break;
        }
    }
    if !any {
        return Ok(None);
    }
    if kept.last() == Some(&b'\r') {
        kept.pop();
    }
    Ok(Some(
        String::from_utf8_lossy(&kept).chars().take(max_len).collect(),
    ))
}
