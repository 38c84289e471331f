//! Process interface: locating the wkhtmltopdf binary and running it.
//!
//! The binary path is process-wide state. When it is not set, lookup tries the directory
//! of the running executable, then `PATH`, then the directory named by
//! `WKHTMLTOPDF_PATH`.
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Name of the executable looked up on disk.
pub const BINARY_NAME: &str = "wkhtmltopdf";

/// Environment variable naming a directory that contains the binary.
pub const PATH_ENV: &str = "WKHTMLTOPDF_PATH";

static BINARY_PATH: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));

/// Override the binary location for the whole process.
pub fn set_path(path: impl Into<PathBuf>) {
    let path = path.into();
    let mut guard = BINARY_PATH.write().unwrap_or_else(|e| e.into_inner());
    *guard = if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    };
}

/// Drop the override; lookup goes back to the default search.
pub fn reset_path() {
    let mut guard = BINARY_PATH.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}

/// Current override, if any.
pub fn path() -> Option<PathBuf> {
    BINARY_PATH
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Resolve the binary to run.
pub fn find_binary() -> Result<PathBuf> {
    if let Some(path) = path() {
        return Ok(path);
    }

    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        if let Some(found) = executable_in(&dir) {
            return Ok(found);
        }
    }

    if let Some(paths) = env::var_os("PATH") {
        if let Some(found) = env::split_paths(&paths).find_map(|dir| executable_in(&dir)) {
            return Ok(found);
        }
    }

    if let Some(dir) = env::var_os(PATH_ENV) {
        if let Some(found) = executable_in(Path::new(&dir)) {
            return Ok(found);
        }
    }

    Err(Error::BinaryNotFound { name: BINARY_NAME })
}

fn executable_in(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(BINARY_NAME);
    if is_executable(&candidate) {
        return Some(candidate);
    }
    if cfg!(windows) {
        let candidate = candidate.with_extension("exe");
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// What one run of the tool produced.
#[derive(Debug)]
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Run `binary` with `args`, feeding `stdin` if given.
///
/// Standard input is written from a scoped thread while standard output and standard
/// error are drained; all three finish before this returns. A non-zero exit becomes
/// [`Error::Failed`] carrying the trimmed diagnostic text.
pub fn run(binary: &Path, args: &[String], stdin: Option<&[u8]>) -> Result<RunOutput> {
    let mut command = Command::new(binary);
    command
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| Error::Spawn {
        path: binary.to_path_buf(),
        source,
    })?;

    let pipe = child.stdin.take();
    let (output, written) = std::thread::scope(|scope| {
        let writer = match (pipe, stdin) {
            (Some(mut pipe), Some(payload)) => Some(scope.spawn(move || -> io::Result<()> {
                pipe.write_all(payload)?;
                // Dropping the pipe closes it and signals end of input.
                drop(pipe);
                Ok(())
            })),
            _ => None,
        };

        let output = child.wait_with_output();
        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
            None => Ok(()),
        };
        (output, written)
    });
    let output = output?;

    if !output.status.success() {
        if let Err(e) = &written {
            debug!("stdin write aborted: {}", e);
        }
        let text = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if text.is_empty() {
            format!("{} exited with {}", binary.display(), output.status)
        } else {
            text
        };
        return Err(Error::Failed {
            status: output.status.code(),
            message,
        });
    }

    if let Err(e) = written {
        // The tool may stop reading once it has what it needs.
        if e.kind() == io::ErrorKind::BrokenPipe {
            warn!("{} closed its input early", binary.display());
        } else {
            return Err(Error::StreamInput(e));
        }
    }

    Ok(RunOutput {
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
