//! Recorded pose streams, one JSON object per line:
//!
//! ```text
//! {"timestamp": 1.25, "joints": {"right_knee": {"x": 0.5, "y": 0.5, "confidence": 0.9}}}
//! ```
//!
//! `timestamp` is in seconds since the start of the stream.

use crate::{
    error::Error,
    pose::{JointKind, JointSample, PoseObservation},
};
use std::{
    collections::HashMap,
    io::{BufRead, Lines},
    time::Duration,
};

#[derive(Debug, serde::Deserialize)]
struct RecordedJoint {
    x: f32,
    y: f32,
    confidence: f32,
}

#[derive(Debug, serde::Deserialize)]
struct RecordedFrame {
    timestamp: f64,
    #[serde(default)]
    joints: HashMap<JointKind, RecordedJoint>,
}

fn decode_frame(text: &str, line: usize) -> Result<PoseObservation, Error> {
    let frame: RecordedFrame =
        serde_json::from_str(text).map_err(|e| Error::DecodeFrame(e, line))?;
    let timestamp = Duration::try_from_secs_f64(frame.timestamp)
        .map_err(|_| Error::InvalidTimestamp(frame.timestamp, line))?;

    frame
        .joints
        .into_iter()
        .try_fold(PoseObservation::new(timestamp), |observation, (kind, joint)| {
            observation.with_joint(kind, JointSample::new(joint.x, joint.y, joint.confidence)?)
        })
}

/// Iterator over the observations of a recorded stream. Blank lines are skipped.
pub struct Recording<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Recording<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for Recording<R> {
    type Item = Result<PoseObservation, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(Error::ReadRecording(e))),
            };
            self.line += 1;
            if !text.trim().is_empty() {
                return Some(decode_frame(&text, self.line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::io::Cursor;

    #[test]
    fn decodes_frames_and_skips_blank_lines() {
        let text = r#"{"timestamp": 0.5, "joints": {"right_knee": {"x": 0.4, "y": 0.6, "confidence": 0.8}}}

{"timestamp": 1.5, "joints": {}}
"#;
        let frames = Recording::new(Cursor::new(text))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp, Duration::from_millis(500));

        let knee = frames[0].get(JointKind::RightKnee).unwrap();
        assert_approx_eq!(knee.point.x(), 0.4);
        assert_approx_eq!(knee.point.y(), 0.6);
        assert_approx_eq!(knee.confidence, 0.8);
        assert!(frames[1].is_empty());
    }

    #[test]
    fn missing_joints_field_is_empty() {
        let mut recording = Recording::new(Cursor::new(r#"{"timestamp": 2.0}"#));
        assert!(recording.next().unwrap().unwrap().is_empty());
        assert!(recording.next().is_none());
    }

    #[test]
    fn bad_line_reports_line_number() {
        let text = "{\"timestamp\": 0.0}\n\nnot json\n";
        let result = Recording::new(Cursor::new(text)).nth(1).unwrap();
        assert!(matches!(result, Err(Error::DecodeFrame(_, 3))));
    }

    #[test]
    fn unknown_joint_is_rejected() {
        let text = r#"{"timestamp": 0.0, "joints": {"tail": {"x": 0.1, "y": 0.1, "confidence": 1.0}}}"#;
        let result = Recording::new(Cursor::new(text)).next().unwrap();
        assert!(matches!(result, Err(Error::DecodeFrame(_, 1))));
    }

    #[test]
    fn negative_timestamp_is_rejected() {
        let result = Recording::new(Cursor::new(r#"{"timestamp": -1.0}"#))
            .next()
            .unwrap();
        assert!(matches!(result, Err(Error::InvalidTimestamp(_, 1))));
    }
}
