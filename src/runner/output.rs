//! Writing command output to stdout or a file.

use anyhow::{Context, Result as AnyResult};
use camino::Utf8Path;
use std::fs;
use std::io::{self, Write};
use tracing::info;

fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn write_all_ignoring_broken_pipe(writer: &mut impl Write, buf: &[u8]) -> io::Result<()> {
    match writer.write_all(buf) {
        Ok(()) => Ok(()),
        Err(err) if is_broken_pipe(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

fn flush_ignoring_broken_pipe(writer: &mut impl Write) -> io::Result<()> {
    match writer.flush() {
        Ok(()) => Ok(()),
        Err(err) if is_broken_pipe(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Write `content` to `writer`. A closed pipe on the reading end is not an
/// error.
pub(super) fn write_output(writer: &mut impl Write, content: &str) -> AnyResult<()> {
    write_all_ignoring_broken_pipe(writer, content.as_bytes()).context("failed to write output")?;
    flush_ignoring_broken_pipe(writer).context("failed to flush output")?;
    Ok(())
}

/// Write `content` to stdout.
pub(super) fn write_stdout(content: &str) -> AnyResult<()> {
    let mut stdout = io::stdout().lock();
    write_output(&mut stdout, content)
}

/// Write `content` to `path`, creating parent directories as needed.
pub(super) fn write_file(path: &Utf8Path, content: &str) -> AnyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory {parent}"))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write output to {path}"))?;
    info!("Wrote output to {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        write_output(&mut BrokenPipe, "digraph {}").expect("broken pipe ignored");
    }

    #[test]
    fn writes_file_with_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(dir.path()).expect("utf-8 temp dir");
        let path = root.join("nested/out.dot");
        write_file(&path, "digraph {}").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "digraph {}");
    }
}
