//! Row-delimited text codec for frames.
//!
//! The first record is the header of column names; every following record
//! is one row. Fields containing commas, quotes or line breaks are quoted
//! RFC-4180 style. On decode, cell types are inferred per value: empty
//! fields read as null, then boolean, integer, float and finally text.
//! Text that spells a number or boolean therefore comes back as that type;
//! callers needing exact type fidelity use the columnar format instead.

use super::{Column, Frame, FrameError, FrameResult, Value};

pub(super) fn encode(frame: &Frame) -> FrameResult<Vec<u8>> {
    let mut out = String::new();
    write_record(&mut out, frame.columns().iter().map(|c| c.name.clone()));
    for row in 0..frame.num_rows() {
        write_record(
            &mut out,
            frame.columns().iter().map(|c| format_value(&c.values[row])),
        );
    }
    Ok(out.into_bytes())
}

pub(super) fn decode(payload: &[u8]) -> FrameResult<Frame> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| FrameError::Parse(format!("payload is not UTF-8: {e}")))?;
    let mut records = parse_records(text)?.into_iter();

    let Some(header) = records.next() else {
        return Err(FrameError::Parse("missing header record".into()));
    };
    let mut columns: Vec<Column> = header
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for (line, record) in records.enumerate() {
        if record.len() != columns.len() {
            return Err(FrameError::Parse(format!(
                "record {} has {} fields, header has {}",
                line + 2,
                record.len(),
                columns.len(),
            )));
        }
        for (column, field) in columns.iter_mut().zip(record) {
            column.values.push(infer_value(field));
        }
    }
    Frame::from_columns(columns)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        // {:?} keeps a trailing ".0" on whole floats so they re-read as
        // floats, not integers.
        Value::Float(f) => format!("{f:?}"),
        Value::Text(s) => s.clone(),
    }
}

fn infer_value(field: String) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    match field.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(field)
}

fn write_record(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains(['"', ',', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&field);
        }
    }
    out.push('\n');
}

fn parse_records(text: &str) -> FrameResult<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(FrameError::Parse("unterminated quoted field".into()));
    }
    // Final record without a trailing newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameFormat;

    fn sample() -> Frame {
        Frame::from_columns(vec![
            Column::new(
                "city",
                vec!["Oslo".into(), "Porto, Norte".into(), Value::Null],
            ),
            Column::new(
                "rainfall_mm",
                vec![Value::Float(82.5), Value::Float(31.0), Value::Float(4.0)],
            ),
            Column::new("station", vec![Value::Int(3), Value::Int(17), Value::Int(9)]),
            Column::new(
                "validated",
                vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)],
            ),
        ])
        .expect("valid sample frame")
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let frame = sample();
        let bytes = frame.encode(FrameFormat::Csv).unwrap();
        let back = Frame::decode(FrameFormat::Csv, &bytes).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let frame = sample();
        assert_eq!(
            frame.encode(FrameFormat::Csv).unwrap(),
            frame.encode(FrameFormat::Csv).unwrap(),
        );
    }

    #[test]
    fn test_quoting_of_embedded_delimiters() {
        let frame = Frame::from_columns(vec![Column::new(
            "note",
            vec![Value::Text("line one\nline \"two\", continued".into())],
        )])
        .unwrap();
        let bytes = frame.encode(FrameFormat::Csv).unwrap();
        let back = Frame::decode(FrameFormat::Csv, &bytes).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_whole_floats_stay_floats() {
        let text = "x\n31.0\n";
        let frame = Frame::decode(FrameFormat::Csv, text.as_bytes()).unwrap();
        assert_eq!(frame.column("x").unwrap().values, vec![Value::Float(31.0)]);
    }

    #[test]
    fn test_nan_round_trips_but_compares_unequal() {
        let frame =
            Frame::from_columns(vec![Column::new("x", vec![Value::Float(f64::NAN)])]).unwrap();
        let bytes = frame.encode(FrameFormat::Csv).unwrap();
        let back = Frame::decode(FrameFormat::Csv, &bytes).unwrap();
        assert!(
            matches!(back.column("x").unwrap().values[0], Value::Float(f) if f.is_nan())
        );
        // IEEE 754 equality: NaN != NaN, so the frames compare unequal.
        assert_ne!(back, frame);
    }

    #[test]
    fn test_ragged_record_is_a_parse_error() {
        let text = "a,b\n1,2\n3\n";
        let err = Frame::decode(FrameFormat::Csv, text.as_bytes()).unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_unterminated_quote_is_a_parse_error() {
        let err = Frame::decode(FrameFormat::Csv, b"a\n\"oops\n").unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let err = Frame::decode(FrameFormat::Csv, &[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "a,b\r\n1,x\r\n";
        let frame = Frame::decode(FrameFormat::Csv, text.as_bytes()).unwrap();
        assert_eq!(frame.num_rows(), 1);
        assert_eq!(frame.column("b").unwrap().values, vec![Value::Text("x".into())]);
    }
}
