use crate::pose::JointKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized exercise: {0:?}")]
    UnknownExercise(String),

    #[error("unrecognized body side: {0:?}")]
    ParseSide(String),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("failed to convert usize value to joint kind: {0}")]
    ConvertUSizeToJointKind(usize),

    #[error("failed to convert joint variant to usize: {0:?}")]
    JointVariantToUSize(JointKind),

    #[error("sample interval must be greater than zero")]
    ZeroSampleInterval,

    #[error("minimum confidence must be within [0, 1), got {0}")]
    MinConfidenceOutOfRange(f32),

    #[error("failed to read recorded frame")]
    ReadRecording(#[source] std::io::Error),

    #[error("failed to decode recorded frame on line {1}")]
    DecodeFrame(#[source] serde_json::Error, usize),

    #[error("invalid timestamp on line {1}: {0}")]
    InvalidTimestamp(f64, usize),
}
