//! Recorded pointer traces and expected outcome lists for replay.
//!
//! Trace lines look like `swerve_trace,<t>,<dx>,<dy>` with `t` in seconds.
//! Blank lines, `#` comments, the header line and rows with another leading
//! tag are skipped, so raw host logs can be replayed as captured.

use std::{fs, path::Path};

use crate::{
    error::{Result, SwerveError},
    swerve::{Sample, SwerveSignal},
};

pub const TRACE_TAG: &str = "swerve_trace";
pub const TRACE_HEADER: &str = "swerve_trace,t,dx,dy";

pub fn parse_trace_file(path: &Path) -> Result<Vec<Sample>> {
    parse_trace(&read(path)?, path)
}

/// `origin` only labels error messages.
pub fn parse_trace(raw: &str, origin: &Path) -> Result<Vec<Sample>> {
    let mut out = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts[0] != TRACE_TAG {
            continue;
        }
        if parts.len() < 4 {
            return Err(trace_error(
                origin,
                line_no,
                "invalid trace line, expected 4 columns".to_string(),
            ));
        }

        let time = parse_field::<f64>(parts[1], origin, line_no, "t")?;
        let dx = parse_field::<f32>(parts[2], origin, line_no, "dx")?;
        let dy = parse_field::<f32>(parts[3], origin, line_no, "dy")?;
        out.push(Sample::new(dx, dy, time));
    }

    Ok(out)
}

pub fn parse_expected_file(path: &Path) -> Result<Vec<SwerveSignal>> {
    parse_expected(&read(path)?, path)
}

pub fn parse_expected(raw: &str, origin: &Path) -> Result<Vec<SwerveSignal>> {
    let mut kinds = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let kind = signal_from_str(token).ok_or_else(|| SwerveError::UnknownKind {
            path: origin.to_path_buf(),
            line: idx + 1,
            kind: token.to_string(),
        })?;
        kinds.push(kind);
    }

    Ok(kinds)
}

pub fn signal_from_str(raw: &str) -> Option<SwerveSignal> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "started" => Some(SwerveSignal::Started),
        "performed" => Some(SwerveSignal::Performed),
        "canceled" | "cancelled" => Some(SwerveSignal::Canceled),
        _ => None,
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SwerveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field<T>(raw: &str, origin: &Path, line_no: usize, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| {
        trace_error(origin, line_no, format!("invalid {field} '{raw}': {e}"))
    })
}

fn trace_error(origin: &Path, line: usize, message: String) -> SwerveError {
    SwerveError::Trace {
        path: origin.to_path_buf(),
        line,
        message,
    }
}
