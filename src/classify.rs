use crate::{
    config::AnalyzerConfig,
    exercise::ExerciseId,
    geometry::angle_between,
    point::Point,
    pose::{Limb, PoseObservation, Side},
    rules::{rule_for, Rule, Triple},
};
use std::fmt;
use tracing::trace;

pub const UNDETECTED_MESSAGE: &str = "cannot detect pose for this exercise";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Grade {
    Good,
    Improve,
    Poor,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Good => "Good",
            Self::Improve => "Improve",
            Self::Poor => "Poor",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Classification {
    pub grade: Grade,
    pub message: &'static str,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.grade, self.message)
    }
}

/// Result of scoring one frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feedback {
    Graded(Classification),
    /// A required joint was missing or not confident enough.
    Undetected,
}

impl Feedback {
    pub fn grade(&self) -> Option<Grade> {
        match self {
            Self::Graded(classification) => Some(classification.grade),
            Self::Undetected => None,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graded(classification) => fmt::Display::fmt(classification, f),
            Self::Undetected => f.write_str(UNDETECTED_MESSAGE),
        }
    }
}

/// Scores single observations against the rule table.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Classifier {
    side: Side,
    min_confidence: f32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from(&AnalyzerConfig::default())
    }
}

impl From<&AnalyzerConfig> for Classifier {
    fn from(config: &AnalyzerConfig) -> Self {
        Self::new(config.side, config.min_confidence)
    }
}

impl Classifier {
    pub fn new(side: Side, min_confidence: f32) -> Self {
        Self {
            side,
            min_confidence,
        }
    }

    pub fn classify(&self, exercise: ExerciseId, observation: &PoseObservation) -> Feedback {
        let entry = rule_for(exercise);

        if let Some(limb) = entry
            .rule
            .limbs()
            .into_iter()
            .find(|&limb| self.point(limb, observation).is_none())
        {
            trace!(%exercise, joint = ?limb.joint(self.side), "required joint not detected");
            return Feedback::Undetected;
        }

        let grade = match &entry.rule {
            Rule::Angle(rule) => self.angle(rule.joints, observation).map(|a| rule.grade(a)),
            Rule::Compound(rule) => self
                .angle(rule.first, observation)
                .zip(self.angle(rule.second, observation))
                .map(|(first, second)| rule.grade(first, second)),
            Rule::Height(rule) => self
                .point(rule.upper, observation)
                .zip(self.point(rule.lower, observation))
                .and_then(|(upper, lower)| rule.ratio(upper.y(), lower.y()))
                .map(|ratio| rule.grade(ratio)),
        };

        match grade {
            Some(grade) => Feedback::Graded(Classification {
                grade,
                message: entry.messages.for_grade(grade),
            }),
            None => {
                trace!(%exercise, "measurement undefined for detected joints");
                Feedback::Undetected
            }
        }
    }

    fn point(&self, limb: Limb, observation: &PoseObservation) -> Option<Point> {
        observation.confident(limb.joint(self.side), self.min_confidence)
    }

    fn angle(&self, joints: Triple, observation: &PoseObservation) -> Option<f32> {
        angle_between(
            self.point(joints.vertex, observation)?,
            self.point(joints.a, observation)?,
            self.point(joints.b, observation)?,
        )
    }
}
