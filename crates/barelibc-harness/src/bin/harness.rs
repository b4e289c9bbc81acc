//! CLI entrypoint for the barelibc conformance harness.

use std::path::{Path, PathBuf};

use barelibc_core::stdio::{self, FormatArg};
use barelibc_core::syscall::{ACTIVE_PROFILE, PROFILES};
use barelibc_harness::execute::{OwnedArg, parse_arg_spec};
use barelibc_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, validate_log_file,
};
use barelibc_harness::{
    ConformanceReport, FixtureSet, RenderMode, TestRunner, VerificationSummary, config,
};
use clap::{Parser, Subcommand};

/// Conformance tooling for barelibc.
#[derive(Debug, Parser)]
#[command(name = "barelibc-harness")]
#[command(about = "Conformance testing harness for barelibc")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the implementation against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long, default_value = "tests/conformance/fixtures")]
        fixture: PathBuf,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON). Defaults to the markdown path with a `.json` extension.
        #[arg(long)]
        json: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Render mode: `device`, `buffer` or `both`. Overrides BARELIBC_RENDER_MODE.
        #[arg(long)]
        mode: Option<String>,
        /// Fixed timestamp for deterministic report output.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Render one format string ad hoc.
    Render {
        /// Format string.
        #[arg(long)]
        format: String,
        /// Argument as KIND:VALUE (kinds: s, d, c, x). Repeatable.
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Render into a buffer of this capacity instead of stdout.
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Print the architecture profile of this build.
    Profile,
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            json,
            log,
            mode,
            timestamp,
        } => verify(&fixture, report, json, log, mode, timestamp)?,
        Command::Render {
            format,
            args,
            capacity,
        } => {
            let owned = args
                .iter()
                .map(|spec| parse_arg_spec(spec))
                .collect::<Result<Vec<OwnedArg>, _>>()?;
            let args: Vec<FormatArg<'_>> = owned.iter().map(OwnedArg::as_format_arg).collect();

            let total = match capacity {
                Some(capacity) => {
                    let mut buf = vec![0u8; capacity];
                    let total = stdio::snprintf(&mut buf, format.as_bytes(), &args)?;
                    let stored = total.min(capacity.saturating_sub(1));
                    println!("{}", String::from_utf8_lossy(&buf[..stored]));
                    total
                }
                None => {
                    let total = stdio::printf(format.as_bytes(), &args)?;
                    println!();
                    total
                }
            };
            eprintln!("logical length: {total}");
        }
        Command::Profile => {
            for profile in &PROFILES {
                let marker = if *profile == ACTIVE_PROFILE { "*" } else { " " };
                let cc = &profile.convention;
                println!(
                    "{marker} {:<8} read={:<3} write={:<3} exit={:<3} {} nr={} args={} ret={}",
                    profile.arch,
                    profile.read,
                    profile.write,
                    profile.exit,
                    cc.instruction,
                    cc.number_register,
                    cc.arg_registers.join(","),
                    cc.return_register,
                );
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!("{lines} line(s), {} error(s)", errors.len());
            if !errors.is_empty() {
                return Err(format!("{} invalid log line(s)", errors.len()).into());
            }
        }
    }
    Ok(())
}

fn verify(
    fixture: &Path,
    report: Option<PathBuf>,
    json: Option<PathBuf>,
    log: Option<PathBuf>,
    mode: Option<String>,
    timestamp: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Verifying against fixtures in {}", fixture.display());
    let (fixture_sets, skipped) = FixtureSet::load_dir(fixture)?;
    for (path, err) in &skipped {
        eprintln!("Skipping {}: {err}", path.display());
    }
    if fixture_sets.is_empty() {
        return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
    }

    let mode = mode
        .as_deref()
        .map_or_else(config::render_mode, RenderMode::from_str_loose);
    let mut results = Vec::new();
    for concrete in mode.expand() {
        let runner = TestRunner::new("fixture-verify", *concrete);
        for set in &fixture_sets {
            results.extend(runner.run(set));
        }
    }

    // Stable ordering so reports hash the same across runs.
    results.sort_by(|a, b| {
        a.family
            .cmp(&b.family)
            .then_with(|| a.function.cmp(&b.function))
            .then_with(|| a.mode.cmp(&b.mode))
            .then_with(|| a.case_name.cmp(&b.case_name))
    });

    let run_id = format!(
        "run-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    );

    if let Some(log_path) = &log {
        let mut emitter = LogEmitter::to_file(log_path, "verify", &run_id)?;
        for r in &results {
            let (level, outcome) = if r.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            emitter.emit_entry(
                LogEntry::new("", level, "case_result")
                    .with_stream(StreamKind::Conformance)
                    .with_mode(r.mode.clone())
                    .with_arch(ACTIVE_PROFILE.arch)
                    .with_api(r.family.clone(), r.function.clone())
                    .with_outcome(outcome)
                    .with_details(serde_json::json!({
                        "case": r.case_name,
                        "expected": r.expected,
                        "actual": r.actual,
                    })),
            )?;
        }
        emitter.flush()?;
        eprintln!("Wrote log to {}", log_path.display());
    }

    let summary = VerificationSummary::from_results(results);
    let report_doc = ConformanceReport {
        title: String::from("barelibc Conformance Report"),
        mode: mode.as_str().to_string(),
        arch: ACTIVE_PROFILE.arch.to_string(),
        timestamp: timestamp.unwrap_or_else(barelibc_harness::structured_log::now_utc),
        summary,
    };

    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );
    for failure in report_doc.summary.failures() {
        eprintln!(
            "FAIL {}: {}",
            failure.case_name,
            failure.diff.as_deref().unwrap_or("")
        );
    }

    let json = json.or_else(|| report.as_ref().map(|p| p.with_extension("json")));
    let mut index = ArtifactIndex::new(&run_id);
    if let Some(report_path) = &report {
        std::fs::write(report_path, report_doc.to_markdown())?;
        index.add_file(report_path, "report_markdown")?;
        eprintln!("Wrote report to {}", report_path.display());
    }
    if let Some(json_path) = &json {
        std::fs::write(json_path, report_doc.to_json())?;
        index.add_file(json_path, "report_json")?;
    }
    if let Some(log_path) = &log {
        index.add_file(log_path, "log")?;
    }
    if let Some(anchor) = report.as_ref().or(json.as_ref()).or(log.as_ref()) {
        let index_path = anchor.with_extension("artifacts.json");
        std::fs::write(&index_path, index.to_json()?)?;
        eprintln!("Wrote artifact index to {}", index_path.display());
    }

    if !report_doc.summary.all_passed() {
        return Err("Conformance verification failed".into());
    }
    Ok(())
}
