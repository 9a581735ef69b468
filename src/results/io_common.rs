use std::path::Path;

use crate::results::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads `NAME=SEATS` pairs, as given on the command line.
pub fn parse_division_seats(pairs: &[String]) -> CliResult<Vec<(String, Seats)>> {
    let mut res: Vec<(String, Seats)> = Vec::new();
    for text in pairs.iter() {
        let (name, seats) = text
            .rsplit_once('=')
            .context(InvalidDivisionSeatsSnafu { text: text.clone() })?;
        let seats = seats
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|x| Seats::try_from(x).ok())
            .context(InvalidDivisionSeatsSnafu { text: text.clone() })?;
        res.push((name.trim().to_string(), seats));
    }
    Ok(res)
}

pub fn read_summary(path: &str) -> CliResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Writes to a file, or to the standard output for `None` and `stdout`.
pub fn write_output(out: Option<&str>, text: &str) -> CliResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", text);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, text).context(WritingFileSnafu { path })
        }
    }
}
