//! Thin wrapper around the `adb` executable.
//!
//! Every operation shells out to adb and decides success by matching
//! substrings of its textual output; adb's exit code is not reliable
//! across server versions, so it is deliberately ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{Config, PRIVILEGED_PREFIXES, STAGE_PREFIX};
use crate::error::{BridgeError, Result};

/// Captured output of one adb invocation.
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Spawns the bridge executable. Kept behind a trait so tests can script
/// device responses without hardware attached.
pub trait AdbRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<RawOutput>;
}

/// Production runner backed by `std::process::Command`.
pub struct ProcessRunner;

impl AdbRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<RawOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// True when the command or path touches storage only root can read.
pub fn is_privileged(text: &str) -> bool {
    PRIVILEGED_PREFIXES.iter().any(|p| text.contains(p))
}

pub struct AdbBridge {
    adb_path: PathBuf,
    device_address: String,
    connected: bool,
    runner: Box<dyn AdbRunner>,
}

impl AdbBridge {
    pub fn new(cfg: &Config) -> Self {
        Self::with_runner(cfg, Box::new(ProcessRunner))
    }

    pub fn with_runner(cfg: &Config, runner: Box<dyn AdbRunner>) -> Self {
        Self {
            adb_path: cfg.adb_path.clone(),
            device_address: cfg.device_address.clone(),
            connected: false,
            runner,
        }
    }

    pub fn device_address(&self) -> &str {
        &self.device_address
    }

    /// Connect to the configured device address. Fatal to the run on failure.
    pub fn connect(&mut self) -> Result<()> {
        let output = self.exec(&["connect", self.device_address.as_str()])?;
        // "connected to ..." and "already connected to ..." both count.
        if output.to_lowercase().contains("connected") {
            self.connected = true;
            Ok(())
        } else {
            Err(BridgeError::ConnectionRefused {
                device: self.device_address.clone(),
                output,
            })
        }
    }

    /// Best-effort disconnect; the connected flag is cleared regardless.
    pub fn disconnect(&mut self) -> Result<String> {
        let output = self.exec(&["disconnect", self.device_address.as_str()]);
        self.connected = false;
        output
    }

    /// Check `adb devices` for our address with status `device`.
    pub fn is_connected(&self) -> bool {
        let output = match self.exec(&["devices"]) {
            Ok(out) => out,
            Err(_) => return false,
        };
        output.lines().any(|line| {
            let mut fields = line.split_whitespace();
            fields.next() == Some(self.device_address.as_str())
                && fields.next() == Some("device")
        })
    }

    /// Run a shell command on the device, escalating with `su -c` when the
    /// command touches a privileged path.
    pub fn shell(&self, cmd: &str) -> Result<String> {
        let wrapped = if is_privileged(cmd) {
            // The whole su invocation must reach the device shell as a
            // single argument, quoting included.
            format!("su -c '{cmd}'")
        } else {
            cmd.to_string()
        };
        self.exec(&["shell", &wrapped])
    }

    /// Pull a remote file or directory into `local`. Privileged paths are
    /// staged through `/sdcard` first since adb cannot read them directly.
    pub fn pull(&self, remote: &str, local: &Path) -> Result<String> {
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BridgeError::from_io_error(parent.display().to_string(), e))?;
        }

        if is_privileged(remote) {
            self.pull_staged(remote, local)
        } else {
            self.pull_direct(remote, local)
        }
    }

    fn pull_direct(&self, remote: &str, local: &Path) -> Result<String> {
        let local_str = local.to_string_lossy();
        let output = self.exec(&["pull", remote, &local_str])?;
        let lower = output.to_lowercase();
        if lower.contains("pulled") {
            Ok(output)
        } else if lower.contains("does not exist") || lower.contains("no such file") {
            Err(BridgeError::PathNotFound(remote.to_string()))
        } else {
            Err(BridgeError::PullFailed {
                path: remote.to_string(),
                output,
            })
        }
    }

    fn pull_staged(&self, remote: &str, local: &Path) -> Result<String> {
        let stage = stage_path();

        // Clear leftovers from an interrupted earlier run.
        let _ = self.shell(&format!("rm -rf {stage}"));
        self.shell(&format!("cp -r {remote} {stage}"))?;

        let local_str = local.to_string_lossy();
        let pulled = self.exec(&["pull", &stage, &local_str]);

        // The staging copy is removed whether or not the pull succeeded.
        let _ = self.shell(&format!("rm -rf {stage}"));

        let output = pulled?;
        if output.to_lowercase().contains("pulled") {
            Ok(output)
        } else {
            Err(BridgeError::PullFailed {
                path: remote.to_string(),
                output,
            })
        }
    }

    /// Resolve the install directory of a package under `/data/app/`.
    ///
    /// Handles the Android 11+ layout `/data/app/~~hash==/<pkg>-hash==/` as
    /// well as the legacy `/data/app/<pkg>-suffix/` one, which is why the
    /// lookup goes through `find` instead of a fixed template.
    pub fn find_app_path(&self, package: &str) -> Result<String> {
        let cmd = format!("find /data/app/ -maxdepth 2 -type d -name \"{package}*\" 2>/dev/null");
        let output = self.shell(&cmd)?;
        match output.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(first) => Ok(first.to_string()),
            None => Err(BridgeError::PathNotFound(format!("/data/app/{package}*"))),
        }
    }

    /// True when `ls` on the device produces any listing for the path.
    pub fn path_exists(&self, remote: &str) -> bool {
        match self.shell(&format!("ls {remote} 2>/dev/null")) {
            Ok(output) => !output.trim().is_empty(),
            Err(_) => false,
        }
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        // connect/disconnect/devices address the adb server itself; every
        // other command is pinned to our device once connected.
        let needs_device = !matches!(
            args.first().copied(),
            Some("connect" | "disconnect" | "devices")
        );

        let mut full: Vec<String> = Vec::with_capacity(args.len() + 2);
        if needs_device && self.connected {
            full.push("-s".to_string());
            full.push(self.device_address.clone());
        }
        full.extend(args.iter().map(|s| s.to_string()));

        let output = self
            .runner
            .run(&self.adb_path, &full)
            .map_err(|e| BridgeError::Spawn {
                tool: self.adb_path.display().to_string(),
                source: e,
            })?;

        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(text.trim().to_string())
    }
}

fn stage_path() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{STAGE_PREFIX}{ts}")
}
