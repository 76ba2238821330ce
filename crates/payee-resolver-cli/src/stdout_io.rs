use std::io::{self, Write};

/// Writes to stdout, treating a closed reader (`payee-resolver batch … | head`)
/// as success.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, true)
}

fn write_tolerating_closed_pipe<W: Write>(
    writer: &mut W,
    text: &str,
    newline: bool,
) -> io::Result<()> {
    match write_and_flush(writer, text, newline) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_and_flush<W: Write>(writer: &mut W, text: &str, newline: bool) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    if newline {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
