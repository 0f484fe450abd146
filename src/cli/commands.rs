//! Command execution: read the bulletin, write one table per station.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::app::models::PointForecast;
use crate::app::services::csv_writer::CsvWriter;
use crate::app::services::json_writer::JsonWriter;
use crate::cli::args::{Args, OutputFormat};
use crate::constants::{OUTPUT_FILE_PREFIX, RUN_TIME_TOKEN_INDEX, RUN_TIME_TOKEN_LEN};
use crate::{Error, MosmixKmlReader, Result};

pub fn run(args: Args) -> Result<()> {
    args.validate()?;
    let model_run_time = model_run_time_from_filename(&args.kml_file)?;
    info!(
        bulletin = %args.kml_file.display(),
        run_time = %model_run_time,
        stations = %args.stations,
        "reading MOSMIX bulletin"
    );

    let file = File::open(&args.kml_file)
        .map_err(|e| Error::io(format!("failed to open '{}'", args.kml_file.display()), e))?;
    let ids: Vec<&str> = args.stations.ids.iter().map(String::as_str).collect();
    let series = MosmixKmlReader::new().read(BufReader::new(file), model_run_time, &ids)?;

    if series.len() < ids.len() {
        warn!(
            found = series.len(),
            requested = ids.len(),
            "some requested stations are not in the bulletin"
        );
    }
    for ptfc in &series {
        write_series(ptfc, args.format, args.out_dir.as_deref())?;
    }
    Ok(())
}

/// The model run time is carried in the bulletin filename as its third
/// underscore-separated token, `yyyyMMddHH` in UTC.
pub fn model_run_time_from_filename(path: &Path) -> Result<DateTime<Utc>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::configuration(format!("'{}' has no filename", path.display())))?;
    let token = name.split('_').nth(RUN_TIME_TOKEN_INDEX).ok_or_else(|| {
        Error::configuration(format!(
            "filename '{name}' has no model-run-time token at underscore position {RUN_TIME_TOKEN_INDEX}"
        ))
    })?;
    if token.len() < RUN_TIME_TOKEN_LEN || !token[..RUN_TIME_TOKEN_LEN].bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::configuration(format!(
            "model-run-time token '{token}' in '{name}' is not {RUN_TIME_TOKEN_LEN} digits (yyyyMMddHH)"
        )));
    }

    let date = NaiveDate::parse_from_str(&token[..8], "%Y%m%d")
        .map_err(|e| Error::time_parsing(format!("invalid run date in token '{token}'"), e))?;
    let hour: u32 = token[8..RUN_TIME_TOKEN_LEN]
        .parse()
        .map_err(|_| Error::configuration(format!("invalid run hour in token '{token}'")))?;
    let run_time = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| Error::configuration(format!("run hour {hour} is out of range")))?;
    Ok(run_time.and_utc())
}

fn write_series(ptfc: &PointForecast, format: OutputFormat, out_dir: Option<&Path>) -> Result<()> {
    match out_dir {
        Some(dir) => {
            let path = dir.join(format!(
                "{OUTPUT_FILE_PREFIX}{}.{}",
                ptfc.station_id(),
                format.extension()
            ));
            info!(station = ptfc.station_id(), file = %path.display(), "writing station table");
            let file = File::create(&path)
                .map_err(|e| Error::io(format!("failed to create '{}'", path.display()), e))?;
            let mut out = BufWriter::new(file);
            render(ptfc, format, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", ptfc.station_id())?;
            render(ptfc, format, &mut out)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render<W: Write>(ptfc: &PointForecast, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvWriter::new().write(ptfc, out),
        OutputFormat::Json => JsonWriter::new().write(ptfc, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    #[test]
    fn test_run_time_from_bulletin_filename() {
        let run_time =
            model_run_time_from_filename(Path::new("/data/MOSMIX_S_2018032907_240.kml")).unwrap();
        assert_eq!(run_time, Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_run_time_token_may_carry_a_suffix() {
        // token splitting stops at underscores, not at the extension
        let run_time =
            model_run_time_from_filename(Path::new("MOSMIX_L_2024123118_01001.kml")).unwrap();
        assert_eq!(
            run_time,
            Utc.with_ymd_and_hms(2024, 12, 31, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_run_time_missing_token() {
        let error = model_run_time_from_filename(Path::new("bulletin.kml")).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }

    #[test]
    fn test_run_time_non_numeric_token() {
        let error =
            model_run_time_from_filename(Path::new("MOSMIX_S_latest_240.kml")).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }

    #[test]
    fn test_run_time_out_of_range_hour() {
        let error =
            model_run_time_from_filename(Path::new("MOSMIX_S_2018032925_240.kml")).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }

    #[test]
    fn test_run_time_invalid_date() {
        let error =
            model_run_time_from_filename(Path::new("MOSMIX_S_2018133107_240.kml")).unwrap_err();
        assert!(matches!(error, Error::TimeParsing { .. }));
    }

    #[test]
    fn test_run_time_requires_a_file_name() {
        let error = model_run_time_from_filename(&PathBuf::from("/")).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }
}
