use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use swerve::{
    replay::{event_csv_header, event_csv_line, replay},
    trace::{parse_expected_file, parse_trace_file},
    SwerveSettings,
};

#[derive(Debug, Parser)]
#[command(name = "swerve_replay")]
#[command(about = "Replay recorded pointer traces through the swerve gesture detector")]
struct Cli {
    /// Trace file with `swerve_trace,t,dx,dy` rows.
    trace: PathBuf,
    /// TOML file with a `[swerve]` table.
    #[arg(long)]
    config: Option<PathBuf>,
    /// File listing the expected event kinds, one per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long = "swerve-time")]
    swerve_time: Option<f64>,
    #[arg(long = "swerve-delay")]
    swerve_delay: Option<f64>,
    #[arg(long = "swerve-count")]
    swerve_count: Option<i32>,
    #[arg(long)]
    threshold: Option<f32>,
    /// Do not fire a timeout still pending after the last sample.
    #[arg(long = "no-tail")]
    no_tail: bool,
}

impl Cli {
    fn settings(&self) -> Result<SwerveSettings> {
        let mut settings = match &self.config {
            Some(path) => SwerveSettings::from_path(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => SwerveSettings::default(),
        };

        if let Some(value) = self.swerve_time {
            settings.swerve_time = value;
        }
        if let Some(value) = self.swerve_delay {
            settings.swerve_delay = value;
        }
        if let Some(value) = self.swerve_count {
            settings.swerve_count = value;
        }
        if let Some(value) = self.threshold {
            settings.move_magnitude_threshold = value;
        }
        Ok(settings)
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    let samples = parse_trace_file(&cli.trace)?;
    info!(
        "replay: trace={} samples={} time={:.3} delay={:.3} count={} threshold={:.3}",
        cli.trace.display(),
        samples.len(),
        settings.swerve_time_or_default(),
        settings.swerve_delay_or_default(),
        settings.swerve_count_or_default(),
        settings.move_magnitude_threshold_or_default()
    );

    let events = replay(&samples, settings, !cli.no_tail);

    println!("{}", event_csv_header());
    for event in &events {
        println!("{}", event_csv_line(event));
    }

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected_file(expect_path)?;
        let actual: Vec<_> = events.iter().map(|e| e.signal).collect();
        if actual != expected {
            eprintln!("expected kinds: {}", join_kinds(&expected));
            eprintln!("actual kinds:   {}", join_kinds(&actual));
            anyhow::bail!("event sequence mismatch");
        }
    }

    Ok(())
}

fn join_kinds(kinds: &[swerve::SwerveSignal]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
