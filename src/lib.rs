//! Real-time exercise form feedback from a stream of body-pose observations.
//!
//! A host pushes [`PoseObservation`]s into a [`Session`] for one selected
//! [`ExerciseId`]; each sampled frame is scored Good/Improve/Poor against the
//! exercise's rule and tallied, and [`Session::summary`] renders the result.

pub mod classify;
pub mod config;
pub mod error;
pub mod exercise;
pub mod geometry;
pub mod point;
pub mod pose;
pub mod recording;
pub mod rules;
pub mod session;
pub mod tally;

pub use classify::{Classification, Classifier, Feedback, Grade};
pub use config::AnalyzerConfig;
pub use error::Error;
pub use exercise::ExerciseId;
pub use pose::{JointKind, JointSample, PoseObservation, Side};
pub use session::{Event, Session, SessionState};
pub use tally::{Summary, Tally};
