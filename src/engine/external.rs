use super::{Converter, ProcessOutput};
use crate::config::Config;
use crate::error::ConvertError;
use crossbeam_channel::Receiver;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Runs the installed pdf2html binary as a child process.
pub struct ExternalConverter {
    executable: PathBuf,
    timeout: Option<Duration>,
    env: BTreeMap<String, String>,
}

impl ExternalConverter {
    pub fn new(cfg: &Config) -> Self {
        let timeout = match cfg.converter.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self {
            executable: expand_tilde(&cfg.converter.executable),
            timeout,
            env: cfg.converter.env.clone(),
        }
    }
}

impl Converter for ExternalConverter {
    fn program(&self) -> &Path {
        &self.executable
    }

    fn is_installed(&self) -> bool {
        self.executable.exists()
    }

    fn run(&self, args: &[OsString]) -> Result<ProcessOutput, ConvertError> {
        debug!(
            "pdf2html run {} args={:?} timeout={:?}",
            self.executable.display(),
            args,
            self.timeout
        );
        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        let mut child = cmd.spawn().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConvertError::ExecutableMissing {
                    path: self.executable.clone(),
                }
            } else {
                ConvertError::Spawn {
                    program: self.executable.clone(),
                    source,
                }
            }
        })?;

        let (status, stdout, stderr) = self.wait(&mut child)?;
        let output = ProcessOutput {
            code: status.code(),
            success: status.success(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        };
        if !output.success {
            warn!(
                "pdf2html exited with {:?}: {}",
                output.code,
                output.diagnostic()
            );
        }
        Ok(output)
    }
}

impl ExternalConverter {
    fn wait(&self, child: &mut Child) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), ConvertError> {
        let io_err = |source| ConvertError::Io {
            program: self.executable.clone(),
            source,
        };

        // Drain both pipes on their own threads so a chatty child never blocks
        // on a full stdout/stderr buffer.
        let stdout_rx = spawn_reader(child.stdout.take());
        let stderr_rx = spawn_reader(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            let Some(timeout) = self.timeout else {
                break child.wait().map_err(io_err)?;
            };
            if let Some(status) = child.try_wait().map_err(io_err)? {
                break status;
            }
            if start.elapsed() > timeout {
                warn!("pdf2html timed out after {:?}", timeout);
                let _ = child.kill();
                child.wait().map_err(io_err)?;
                // Processes spawned by pdf2html may still hold the pipes open;
                // take whatever stderr is ready and leave the readers detached.
                let stderr = stderr_rx
                    .recv_timeout(KILL_GRACE)
                    .ok()
                    .and_then(|r| r.ok())
                    .unwrap_or_default();
                drop(stdout_rx);
                return Err(ConvertError::Timeout {
                    program: self.executable.clone(),
                    secs: timeout.as_secs(),
                    stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
                });
            }
            std::thread::sleep(Duration::from_millis(50));
        };

        let stdout = join_reader(stdout_rx).map_err(io_err)?;
        let stderr = join_reader(stderr_rx).map_err(io_err)?;
        Ok((status, stdout, stderr))
    }
}

const KILL_GRACE: Duration = Duration::from_millis(200);

type Reader = Receiver<std::io::Result<Vec<u8>>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let res = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send(res);
    });
    rx
}

fn join_reader(rx: Reader) -> std::io::Result<Vec<u8>> {
    rx.recv()
        .map_err(|_| std::io::Error::other("pipe reader thread panicked"))?
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
