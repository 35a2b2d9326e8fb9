//! Column-major binary codec for frames.
//!
//! Layout: a four-byte magic, one format version byte, then the bincode
//! encoding of the column list. Bincode output is deterministic for equal
//! frames, which the artifact layer relies on when hashing payloads.

use super::{Frame, FrameError, FrameResult};

const MAGIC: &[u8; 4] = b"MLVC";
const FORMAT_VERSION: u8 = 1;

pub(super) fn encode(frame: &Frame) -> FrameResult<Vec<u8>> {
    let body = bincode::serialize(frame.columns())
        .map_err(|e| FrameError::Encode(format!("columnar encoding failed: {e}")))?;
    let mut out = Vec::with_capacity(MAGIC.len() + 1 + body.len());
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

pub(super) fn decode(payload: &[u8]) -> FrameResult<Frame> {
    let Some((header, body)) = payload.split_at_checked(MAGIC.len() + 1) else {
        return Err(FrameError::Parse("columnar payload too short".into()));
    };
    if &header[..MAGIC.len()] != MAGIC {
        return Err(FrameError::Parse("not a columnar frame payload".into()));
    }
    let version = header[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(FrameError::Parse(format!(
            "unsupported columnar format version {version}"
        )));
    }
    let columns = bincode::deserialize(body)
        .map_err(|e| FrameError::Parse(format!("columnar body failed to decode: {e}")))?;
    Frame::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Column, FrameFormat, Value};

    fn sample() -> Frame {
        Frame::from_columns(vec![
            Column::new("id", vec![Value::Int(1), Value::Int(2)]),
            Column::new("score", vec![Value::Float(0.25), Value::Null]),
            Column::new("label", vec![Value::Text("spam".into()), Value::Text("ham".into())]),
        ])
        .expect("valid sample frame")
    }

    #[test]
    fn test_round_trip_preserves_types_exactly() {
        let frame = sample();
        let bytes = frame.encode(FrameFormat::Columnar).unwrap();
        let back = Frame::decode(FrameFormat::Columnar, &bytes).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let frame = sample();
        assert_eq!(
            frame.encode(FrameFormat::Columnar).unwrap(),
            frame.encode(FrameFormat::Columnar).unwrap(),
        );
    }

    #[test]
    fn test_rejects_wrong_magic() {
        let err = Frame::decode(FrameFormat::Columnar, b"NOPE\x01rest").unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut bytes = sample().encode(FrameFormat::Columnar).unwrap();
        bytes[4] = 99;
        let err = Frame::decode(FrameFormat::Columnar, &bytes).unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let err = Frame::decode(FrameFormat::Columnar, b"MLV").unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }

    #[test]
    fn test_rejects_garbage_body() {
        let mut bytes = Vec::from(*b"MLVC");
        bytes.push(1);
        bytes.extend_from_slice(&[0xFF; 3]);
        let err = Frame::decode(FrameFormat::Columnar, &bytes).unwrap_err();
        assert!(matches!(err, FrameError::Parse(_)));
    }
}
