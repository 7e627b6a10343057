//! Interactive collection of run inputs.
//!
//! Each prompt repeats until the answer validates. End of input is an error.

use ohlc_core::{EmaPeriod, Error, Interval, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Accept a path ending in `.csv` (with a non-empty stem) that names an existing file.
pub fn validate_data_file(input: &str) -> Result<PathBuf> {
    let input = input.trim();
    if input.len() <= ".csv".len() || !input.ends_with(".csv") {
        return Err(Error::config(format!("'{input}' is not a .csv file name")));
    }
    let path = Path::new(input);
    if !path.is_file() {
        return Err(Error::config(format!("file '{input}' not found")));
    }
    Ok(path.to_path_buf())
}

/// Ask for the tick file until an existing `.csv` file is named.
pub fn prompt_data_file<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf> {
    prompt_until(
        input,
        out,
        "Enter the .csv data file name (e.g. 'prices.csv'): ",
        "Invalid file extension or file not found. Please enter a valid file name.",
        |answer| validate_data_file(answer).ok(),
    )
}

/// Ask for the candle interval until it parses.
pub fn prompt_interval<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Interval> {
    prompt_until(
        input,
        out,
        "Enter the candle interval (e.g. '5T' for 5 minutes, '1H' for 1 hour, '1D' for 1 day): ",
        "Invalid interval format. Please enter a valid interval.",
        |answer| Interval::parse(answer.trim()).ok(),
    )
}

/// Ask for the EMA period until it is a whole number in range.
pub fn prompt_period<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<EmaPeriod> {
    let question = format!(
        "Enter the number of EMA periods ({} to {}): ",
        EmaPeriod::MIN,
        EmaPeriod::MAX
    );
    let retry = format!(
        "Invalid value. Please enter a number from {} to {}.",
        EmaPeriod::MIN,
        EmaPeriod::MAX
    );
    prompt_until(input, out, &question, &retry, |answer| answer.parse().ok())
}

fn prompt_until<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    question: &str,
    retry: &str,
    parse: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Option<T>,
{
    let mut line = String::new();
    loop {
        write!(out, "{question}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a valid answer was given",
            )));
        }

        if let Some(value) = parse(line.trim_end_matches(['\r', '\n'])) {
            return Ok(value);
        }
        writeln!(out, "{retry}")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answers(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[test]
    fn test_validate_data_file() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let name = file.path().to_str().unwrap();

        assert_eq!(validate_data_file(name).unwrap(), file.path());
        assert!(validate_data_file(".csv").is_err());
        assert!(validate_data_file("prices.txt").is_err());
        assert!(validate_data_file("/nonexistent/prices.csv").is_err());
    }

    #[test]
    fn test_non_csv_existing_file_rejected() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(validate_data_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_prompt_interval_reprompts() {
        let mut input = answers("5M\n10T\n1H\n");
        let mut out = Vec::new();

        let interval = prompt_interval(&mut input, &mut out).unwrap();

        assert_eq!(interval.label(), "1H");
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Invalid interval format").count(), 2);
        assert_eq!(printed.matches("Enter the candle interval").count(), 3);
    }

    #[test]
    fn test_prompt_period_reprompts() {
        let mut input = answers("abc\n6\n201\n14\n");
        let mut out = Vec::new();

        let period = prompt_period(&mut input, &mut out).unwrap();

        assert_eq!(period.get(), 14);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Invalid value").count(), 3);
    }

    #[test]
    fn test_prompt_data_file() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let text = format!("missing.csv\n{}\n", file.path().display());
        let mut input = answers(&text);
        let mut out = Vec::new();

        let path = prompt_data_file(&mut input, &mut out).unwrap();

        assert_eq!(path, file.path());
    }

    #[test]
    fn test_prompt_handles_crlf() {
        let mut input = answers("1D\r\n");
        let mut out = Vec::new();
        assert_eq!(prompt_interval(&mut input, &mut out).unwrap().label(), "1D");
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut input = answers("0T\n");
        let mut out = Vec::new();
        assert!(matches!(prompt_interval(&mut input, &mut out), Err(Error::Io(_))));
    }
}
