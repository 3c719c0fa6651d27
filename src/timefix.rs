//! Timestamp repair for plain-text time-series files.
//!
//! GOTM forcing files are whitespace-separated text with a date, a time,
//! and a value per line. When the recorded datetimes are wrong, this
//! utility rewrites them onto an evenly spaced datetime grid while keeping
//! the value column untouched.

use crate::error::{HovmollerError, Result};
use chrono::{Duration, NaiveDateTime};
use std::fs;
use std::path::Path;

/// Evenly spaced datetimes from `start` to `end` inclusive.
pub fn datetime_range(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> Vec<NaiveDateTime> {
    let mut times = Vec::new();
    if step <= Duration::zero() {
        return times;
    }
    let mut t = start;
    while t <= end {
        times.push(t);
        t += step;
    }
    times
}

/// Parse a frequency string such as `1h`, `30min`, `7d`, or `10s`.
pub fn parse_freq(freq: &str) -> Result<Duration> {
    let split = freq
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(freq.len());
    let (count, unit) = freq.split_at(split);
    let count: i64 = count
        .parse()
        .map_err(|_| HovmollerError::Timefix(format!("invalid frequency '{}'", freq)))?;
    if count <= 0 {
        return Err(HovmollerError::Timefix(format!(
            "frequency must be positive, got '{}'",
            freq
        )));
    }
    match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" => Ok(Duration::seconds(count)),
        "m" | "min" => Ok(Duration::minutes(count)),
        "h" | "hour" => Ok(Duration::hours(count)),
        "d" | "day" => Ok(Duration::days(count)),
        _ => Err(HovmollerError::Timefix(format!(
            "unknown frequency unit in '{}' (expected s, min, h, or d)",
            freq
        ))),
    }
}

/// Rewrite the timestamp columns of `input` onto a new datetime grid.
///
/// Each input line contributes its third whitespace column (the value);
/// every output line is `"<datetime> <value>"`. Blank lines are dropped.
/// Fails when a line has fewer than three columns or when the file holds
/// more lines than the grid has timestamps.
pub fn update_datetime_in_file(
    input: &Path,
    output: &Path,
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
) -> Result<()> {
    if step <= Duration::zero() {
        return Err(HovmollerError::Timefix(
            "time step must be positive".to_string(),
        ));
    }
    let times = datetime_range(start, end, step);
    let content = fs::read_to_string(input)
        .map_err(|e| HovmollerError::file_open(input.to_path_buf(), e))?;

    let mut rewritten = String::new();
    let mut row = 0usize;
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value = line.split_whitespace().nth(2).ok_or_else(|| {
            HovmollerError::Timefix(format!(
                "{}:{}: expected at least three columns",
                input.display(),
                lineno + 1
            ))
        })?;
        let time = times.get(row).ok_or_else(|| {
            HovmollerError::Timefix(format!(
                "{} has more lines than the {}-step datetime range",
                input.display(),
                times.len()
            ))
        })?;
        rewritten.push_str(&format!("{} {}\n", time.format("%Y-%m-%d %H:%M:%S"), value));
        row += 1;
    }

    fs::write(output, rewritten)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        lines = row,
        "rewrote timestamps"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn range_is_inclusive_of_both_ends() {
        let times = datetime_range(
            dt("2020-01-01 00:00:00"),
            dt("2020-01-01 03:00:00"),
            Duration::hours(1),
        );
        assert_eq!(times.len(), 4);
        assert_eq!(times[0], dt("2020-01-01 00:00:00"));
        assert_eq!(times[3], dt("2020-01-01 03:00:00"));
    }

    #[test]
    fn parse_freq_units() {
        assert_eq!(parse_freq("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_freq("30min").unwrap(), Duration::minutes(30));
        assert_eq!(parse_freq("7d").unwrap(), Duration::days(7));
        assert_eq!(parse_freq("10s").unwrap(), Duration::seconds(10));
        assert!(parse_freq("fortnight").is_err());
        assert!(parse_freq("0h").is_err());
    }

    #[test]
    fn rewrites_third_column_onto_new_grid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("meteo.dat");
        let output = dir.path().join("meteo_fixed.dat");
        std::fs::write(&input, "1999-01-01 12:00:00 3.5\n1999-01-01 13:00:00 4.0\n").unwrap();

        update_datetime_in_file(
            &input,
            &output,
            dt("2020-06-01 00:00:00"),
            dt("2020-06-01 01:00:00"),
            Duration::hours(1),
        )
        .unwrap();

        let fixed = std::fs::read_to_string(&output).unwrap();
        assert_eq!(fixed, "2020-06-01 00:00:00 3.5\n2020-06-01 01:00:00 4.0\n");
    }

    #[test]
    fn short_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.dat");
        std::fs::write(&input, "2020-01-01 3.5\n").unwrap();
        let err = update_datetime_in_file(
            &input,
            &dir.path().join("out.dat"),
            dt("2020-01-01 00:00:00"),
            dt("2020-01-02 00:00:00"),
            Duration::hours(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("three columns"));
    }

    #[test]
    fn too_many_lines_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("long.dat");
        std::fs::write(&input, "a b 1\na b 2\na b 3\n").unwrap();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let err = update_datetime_in_file(
            &input,
            &dir.path().join("out.dat"),
            start,
            start + Duration::hours(1),
            Duration::hours(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("more lines"));
    }
}
