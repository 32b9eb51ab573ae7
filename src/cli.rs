use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "droidpull",
    about = "Pull an Android app's APK, private data, external storage and OBB packages over ADB",
    version
)]
pub struct Cli {
    /// Package to extract; omit to enter the interactive prompt.
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Device address handed to `adb connect`.
    #[arg(long = "device", value_name = "HOST:PORT")]
    pub device: Option<String>,

    /// Path to the adb executable.
    #[arg(long = "adb", value_name = "PATH")]
    pub adb_path: Option<PathBuf>,

    /// Root directory for extracted files.
    #[arg(long = "out", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        let mut cfg = Config::default();
        if let Some(device) = &self.device {
            cfg.device_address = device.clone();
        }
        if let Some(adb) = &self.adb_path {
            cfg.adb_path = adb.clone();
        }
        if let Some(dir) = &self.out_dir {
            cfg.export_dir = dir.clone();
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{DEFAULT_ADB_PATH, DEFAULT_DEVICE_ADDRESS, DEFAULT_EXPORT_DIR};

    fn parse(args: &[&str]) -> (Cli, Config) {
        let mut argv = vec!["droidpull"];
        argv.extend(args);
        let cli = Cli::try_parse_from(&argv).expect("parse command line");
        let cfg = cli.to_config();
        (cli, cfg)
    }

    #[test]
    fn options_map_into_config() {
        let (cli, cfg) = parse(&[
            "com.example.app",
            "--device",
            "192.168.1.20:5555",
            "--adb",
            "/opt/platform-tools/adb",
            "--out",
            "/tmp/export",
        ]);

        assert_eq!(cli.package.as_deref(), Some("com.example.app"));
        assert_eq!(cfg.device_address, "192.168.1.20:5555");
        assert_eq!(cfg.adb_path, PathBuf::from("/opt/platform-tools/adb"));
        assert_eq!(cfg.export_dir, PathBuf::from("/tmp/export"));
    }

    #[test]
    fn defaults_apply_without_options() {
        let (cli, cfg) = parse(&[]);

        assert!(cli.package.is_none());
        assert_eq!(cfg.device_address, DEFAULT_DEVICE_ADDRESS);
        assert_eq!(cfg.adb_path, PathBuf::from(DEFAULT_ADB_PATH));
        assert_eq!(cfg.export_dir, PathBuf::from(DEFAULT_EXPORT_DIR));
    }
}
