use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use droidpull::cli::Cli;
use droidpull::config::Config;
use droidpull::extract::{extract_package, write_report, ExtractionReport};
use droidpull::AdbBridge;

fn main() -> ExitCode {
    println!("[>>>]  droidpull  [<<<]");
    println!("[>>>]  ADB app resource extractor  [<<<]");

    let cli = Cli::parse();
    let cfg = cli.to_config();
    let mut bridge = AdbBridge::new(&cfg);

    println!("[*]  Connecting to {}", cfg.device_address);
    if let Err(err) = bridge.connect() {
        eprintln!("[!]  {}", err.user_message());
        eprintln!("[!]  Check: is the emulator/device up, is '{}' the right adb, is {} the right address?",
            cfg.adb_path.display(),
            cfg.device_address
        );
        return ExitCode::FAILURE;
    }
    if !bridge.is_connected() {
        eprintln!(
            "[!]  {} did not show up as 'device' in `adb devices`",
            cfg.device_address
        );
        return ExitCode::FAILURE;
    }
    println!("[+]  Connected to {}", cfg.device_address);

    match cli.package.as_deref() {
        Some(package) => run_once(&bridge, &cfg, package),
        None => interactive_loop(&bridge, &cfg),
    }

    let _ = bridge.disconnect();
    println!("[*]  Disconnected.");
    ExitCode::SUCCESS
}

fn run_once(bridge: &AdbBridge, cfg: &Config, package: &str) {
    match extract_package(bridge, cfg, package) {
        Ok(report) => {
            print_results(&report);
            match write_report(&report) {
                Ok(path) => println!("[*]  Report written to {}", path.display()),
                Err(err) => eprintln!("[!]  Could not write report: {err:#}"),
            }
            if !report.overall_success() {
                eprintln!("[!]  Nothing was extracted; check the package name.");
            }
        }
        Err(err) => eprintln!("[!]  Extraction failed: {err:#}"),
    }
}

fn interactive_loop(bridge: &AdbBridge, cfg: &Config) {
    let stdin = io::stdin();
    loop {
        print!("\npackage name ('q' to quit): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let package = line.trim();
        if package.eq_ignore_ascii_case("q") {
            break;
        }
        if package.is_empty() {
            eprintln!("[!]  Package name must not be empty");
            continue;
        }

        run_once(bridge, cfg, package);
    }
}

fn print_results(report: &ExtractionReport) {
    println!();
    for (category, outcome) in report.outcomes() {
        let (marker, status) = if outcome.success {
            ('+', "ok")
        } else {
            ('!', "failed")
        };
        println!(
            "[{marker}]  {:<18} {:<7} {}",
            category.label(),
            status,
            outcome.message
        );
    }
    if report.overall_success() {
        println!("[*]  Export directory: {}", report.export_dir.display());
    }
}
