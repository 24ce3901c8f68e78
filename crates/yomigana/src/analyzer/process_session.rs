//! Long-lived external process session with line I/O.
//!
//! The morphological analyzer and the kana transliterator are both classic
//! Unix filters: started once, they answer one output line per input line
//! for the life of the process. `ProcessSession` owns such a child with an
//! explicit lifecycle (no lazily-started global handles) and a counted
//! restart-on-failure policy.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ProcessConfig;
use crate::errors::SessionError;

/// Handles of a running child.
struct ChildHandle {
  child: Child,
  stdin: ChildStdin,
  stdout: BufReader<ChildStdout>,
}

/// One long-lived text-line child process.
///
/// Owned explicitly by the caller (typically via
/// [`crate::service::ReadingService`]); `start` and `stop` bound the child's
/// lifetime, and [`query`](Self::query) performs one request/response round
/// trip, respawning the child once per failure up to `max_restarts` total.
pub struct ProcessSession {
  /// Executable to spawn
  program: PathBuf,

  /// Command-line arguments
  args: Vec<String>,

  /// Extra environment exported to the child
  envs: Vec<(String, String)>,

  /// Total respawn budget over the session's life
  max_restarts: u32,

  /// Respawns performed so far
  restarts: u32,

  /// Running child, `None` when stopped
  handle: Option<ChildHandle>,
}

impl ProcessSession {
  /// Builds a session from one `[analyzer]` / `[kana]` config section.
  ///
  /// The child is not spawned yet; call [`start`](Self::start).
  pub fn from_config(config: &ProcessConfig) -> Self {
    Self {
      program: config.program.clone(),
      args: config.args.clone(),
      envs: config.envs.clone(),
      max_restarts: config.max_restarts,
      restarts: 0,
      handle: None,
    }
  }

  /// Returns the configured executable path.
  pub fn program(&self) -> &Path {
    &self.program
  }

  /// Whether a child is currently attached.
  pub fn is_running(&self) -> bool {
    self.handle.is_some()
  }

  /// Spawns the child if not already running.
  ///
  /// # Errors
  /// - The executable cannot be spawned
  /// - The child's stdin/stdout handles cannot be acquired
  pub fn start(&mut self) -> Result<(), SessionError> {
    if self.handle.is_some() {
      return Ok(());
    }

    debug!(program = %self.program.display(), "spawning analyzer child process");

    let mut child = Command::new(&self.program)
      .args(&self.args)
      .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      // child warnings must not interleave with the line protocol
      .stderr(Stdio::null())
      .spawn()
      .map_err(|e| SessionError::SpawnFailed {
        program: self.program.clone(),
        source: Arc::new(e),
      })?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let (Some(stdin), Some(stdout)) = (stdin, stdout) else {
      let _ = child.kill();
      let _ = child.wait();
      return Err(SessionError::StdioUnavailable {
        program: self.program.clone(),
      });
    };

    self.handle = Some(ChildHandle {
      child,
      stdin,
      stdout: BufReader::new(stdout),
    });

    info!(program = %self.program.display(), "analyzer child process started");
    Ok(())
  }

  /// Stops the child if running. Errors while tearing down are ignored.
  pub fn stop(&mut self) {
    if let Some(mut handle) = self.handle.take() {
      debug!(program = %self.program.display(), "stopping analyzer child process");
      let _ = handle.child.kill();
      let _ = handle.child.wait();
    }
  }

  /// Writes one line to the child and reads one answer line.
  ///
  /// On an I/O failure the child is torn down and, while the restart budget
  /// lasts, respawned for one retry.
  ///
  /// # Errors
  /// - Spawn/stdio failures from [`start`](Self::start)
  /// - `RestartLimitExceeded` once `max_restarts` respawns are spent
  /// - The I/O error itself when the retry also fails
  pub fn query(&mut self, line: &str) -> Result<String, SessionError> {
    self.start()?;

    match self.query_once(line) {
      Ok(answer) => Ok(answer),
      Err(e) => {
        warn!(
          program = %self.program.display(),
          error = %e,
          restarts = self.restarts,
          "analyzer I/O failed, respawning child"
        );
        self.stop();

        if self.restarts >= self.max_restarts {
          return Err(SessionError::RestartLimitExceeded {
            program: self.program.clone(),
            max_restarts: self.max_restarts,
          });
        }
        self.restarts += 1;

        self.start()?;
        self.query_once(line)
      }
    }
  }

  /// One write/read round trip against the attached child.
  fn query_once(&mut self, line: &str) -> Result<String, SessionError> {
    let handle = self.handle.as_mut().ok_or(SessionError::ProcessExited {
      program: self.program.clone(),
    })?;

    let io_err = |e: std::io::Error| SessionError::Io {
      program: self.program.clone(),
      source: Arc::new(e),
    };

    handle.stdin.write_all(line.as_bytes()).map_err(io_err)?;
    handle.stdin.write_all(b"\n").map_err(io_err)?;
    handle.stdin.flush().map_err(io_err)?;

    let mut answer = String::new();
    let read = handle.stdout.read_line(&mut answer).map_err(io_err)?;
    if read == 0 {
      return Err(SessionError::ProcessExited {
        program: self.program.clone(),
      });
    }

    while answer.ends_with('\n') || answer.ends_with('\r') {
      answer.pop();
    }
    Ok(answer)
  }
}

impl Drop for ProcessSession {
  fn drop(&mut self) {
    self.stop();
  }
}
