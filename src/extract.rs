//! Per-package extraction sequencing.
//!
//! The four resource categories are pulled independently, in a fixed
//! order, each converting its own failure into an outcome instead of
//! aborting the run. A package extraction counts as successful when at
//! least one category came through.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::bridge::AdbBridge;
use crate::config::{Category, Config};

pub const REPORT_FILE: &str = "extraction_report.json";

#[derive(Clone, Debug, Serialize)]
pub struct CategoryOutcome {
    pub success: bool,
    pub message: String,
}

impl CategoryOutcome {
    fn pulled(remote: &str) -> Self {
        Self {
            success: true,
            message: format!("pulled {remote}"),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ExtractionReport {
    pub package: String,
    pub export_dir: PathBuf,
    pub app: CategoryOutcome,
    pub data: CategoryOutcome,
    pub sdcard_data: CategoryOutcome,
    pub obb: CategoryOutcome,
}

impl ExtractionReport {
    pub fn outcome(&self, category: Category) -> &CategoryOutcome {
        match category {
            Category::App => &self.app,
            Category::Data => &self.data,
            Category::SdcardData => &self.sdcard_data,
            Category::Obb => &self.obb,
        }
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (Category, &CategoryOutcome)> {
        Category::ALL.iter().map(|&c| (c, self.outcome(c)))
    }

    pub fn success_count(&self) -> usize {
        self.outcomes().filter(|(_, o)| o.success).count()
    }

    /// Best-effort semantics: one category is enough.
    pub fn overall_success(&self) -> bool {
        self.success_count() > 0
    }
}

/// Pull all four resource categories of `package` into
/// `<export-root>/<package>/`.
pub fn extract_package(
    bridge: &AdbBridge,
    cfg: &Config,
    package: &str,
) -> Result<ExtractionReport> {
    let export_dir = cfg.export_dir.join(package);
    fs::create_dir_all(&export_dir)
        .with_context(|| format!("creating export directory {}", export_dir.display()))?;

    println!("[*]  Extracting resources for {package}");

    let total = Category::ALL.len();
    let run = |step: usize, category: Category| {
        println!("[{}/{}]  {}", step, total, category.label());
        let outcome = pull_category(bridge, category, package, &export_dir);
        if outcome.success {
            println!("[+]  {}", outcome.message);
        } else {
            println!("[!]  {}", outcome.message);
        }
        outcome
    };

    let app = run(1, Category::App);
    let data = run(2, Category::Data);
    let sdcard_data = run(3, Category::SdcardData);
    let obb = run(4, Category::Obb);

    let report = ExtractionReport {
        package: package.to_string(),
        export_dir,
        app,
        data,
        sdcard_data,
        obb,
    };

    println!(
        "[*]  Done: {}/{} categories extracted into {}",
        report.success_count(),
        total,
        report.export_dir.display()
    );
    Ok(report)
}

fn pull_category(
    bridge: &AdbBridge,
    category: Category,
    package: &str,
    export_dir: &Path,
) -> CategoryOutcome {
    let remote = match category {
        // The install directory carries a per-install suffix, so it has to
        // be resolved through a root find instead of the template.
        Category::App => match bridge.find_app_path(package) {
            Ok(path) => path,
            Err(err) => return CategoryOutcome::failed(err.to_string()),
        },
        _ => {
            let path = category.remote_path(package);
            if !bridge.path_exists(&path) {
                return CategoryOutcome::failed(format!("remote path does not exist: {path}"));
            }
            path
        }
    };

    let local = export_dir.join(category.subdir());
    match bridge.pull(&remote, &local) {
        Ok(_) => CategoryOutcome::pulled(&remote),
        Err(err) => CategoryOutcome::failed(err.to_string()),
    }
}

/// Persist the report next to the extracted files.
pub fn write_report(report: &ExtractionReport) -> Result<PathBuf> {
    let path = report.export_dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report).context("serializing extraction report")?;
    fs::write(&path, json)
        .with_context(|| format!("writing extraction report {}", path.display()))?;
    Ok(path)
}
