use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_tolerating_broken_pipe(&mut stdout, text.as_bytes())?;
    flush_tolerating_broken_pipe(&mut stdout)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_tolerating_broken_pipe(&mut stdout, text.as_bytes())?;
    write_tolerating_broken_pipe(&mut stdout, b"\n")?;
    flush_tolerating_broken_pipe(&mut stdout)
}

/// `shopdash sale list | head` closes the pipe early; that is not a failure.
fn write_tolerating_broken_pipe(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    match writer.write_all(bytes) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn flush_tolerating_broken_pipe(writer: &mut dyn Write) -> io::Result<()> {
    match writer.flush() {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
