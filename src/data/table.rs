//! Whitespace-delimited numeric tables: one sample per line, pixel values
//! first and the class label in the last column.

use crate::core::Dataset;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind};
use std::path::Path;
use tracing::debug;

fn is_comment_or_empty(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.starts_with('#')
}

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Dataset, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = parse_table(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        samples = dataset.len(),
        dimension = dataset.dimension(),
        "loaded table"
    );
    Ok(dataset)
}

pub fn parse_table<R: BufRead>(reader: R) -> Result<Dataset, Error> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<i64> = Vec::new();
    let mut width: Option<usize> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        if is_comment_or_empty(&line) {
            continue;
        }

        let values = parse_line(&line, line_no)?;
        match width {
            None if values.len() < 2 => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("line {line_no}: need at least one feature and a label"),
                ));
            }
            None => width = Some(values.len()),
            Some(w) if w != values.len() => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "line {line_no}: expected {w} columns, found {}",
                        values.len()
                    ),
                ));
            }
            Some(_) => {}
        }

        let (features, label) = values.split_at(values.len() - 1);
        labels.push(parse_label(label[0], line_no)?);
        rows.push(features.to_vec());
    }

    Dataset::from_rows(&rows, labels).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}

fn parse_line(line: &str, line_no: usize) -> Result<Vec<f64>, Error> {
    line.split_whitespace()
        .enumerate()
        .map(|(col, token)| {
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "line {line_no}, column {}: '{token}' is not a finite number",
                        col + 1
                    ),
                )),
            }
        })
        .collect()
}

fn parse_label(value: f64, line_no: usize) -> Result<i64, Error> {
    if !value.is_finite() || value.fract() != 0.0
        || value >= i64::MAX as f64
        || value < i64::MIN as f64
    {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("line {line_no}: label {value} is not an integer"),
        ));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn parses_features_and_trailing_label() {
        let text = "0 0 255 1\n# comment\n\n10.5 3 0 0.0\n";
        let ds = parse_table(Cursor::new(text)).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dimension(), 3);
        assert_eq!(ds.labels(), &[1, 0]);
        assert_eq!(ds.observations()[(1, 0)], 10.5);
        assert_eq!(ds.observations()[(0, 2)], 255.0);
    }

    #[test]
    fn tabs_and_repeated_spaces_are_delimiters() {
        let ds = parse_table(Cursor::new("1\t2   3\n4 5\t\t6\n")).unwrap();
        assert_eq!(ds.labels(), &[3, 6]);
        assert_eq!(ds.dimension(), 2);
    }

    #[test]
    fn empty_input_is_an_empty_dataset() {
        let ds = parse_table(Cursor::new("\n# nothing\n")).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn rejects_ragged_lines() {
        let err = parse_table(Cursor::new("1 2 3\n1 2\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = parse_table(Cursor::new("1 x 3\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("column 2"));
    }

    #[test]
    fn rejects_non_finite_tokens() {
        let err = parse_table(Cursor::new("nan 1 0\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 1, column 1"));

        let err = parse_table(Cursor::new("1 2 0\n2 inf 1\n")).unwrap_err();
        assert!(err.to_string().contains("line 2, column 2"));

        let err = parse_table(Cursor::new("1 2 -infinity\n")).unwrap_err();
        assert!(err.to_string().contains("column 3"));
    }

    #[test]
    fn labels_beyond_i64_are_rejected() {
        let err = parse_table(Cursor::new("1 9223372036854775808\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let ds = parse_table(Cursor::new("1 -9223372036854775808\n")).unwrap();
        assert_eq!(ds.labels(), &[i64::MIN]);
    }

    #[test]
    fn rejects_fractional_labels() {
        let err = parse_table(Cursor::new("1 2 0.5\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_label_only_rows() {
        let err = parse_table(Cursor::new("7\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn reads_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "1 2 0").unwrap();
        writeln!(tmp, "3 4 1").unwrap();
        tmp.flush().unwrap();

        let ds = read_table(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.labels(), &[0, 1]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_table("/definitely/not/here.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
