use crate::{error::Error, point::Point};
use num_traits::{FromPrimitive, ToPrimitive};
use std::time::Duration;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    num_derive::FromPrimitive,
    num_derive::ToPrimitive,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    Neck,
    Root,
}

pub const NUM_JOINTS: usize = 19;

impl JointKind {
    pub fn idx(self) -> Result<usize, Error> {
        self.to_usize().ok_or(Error::JointVariantToUSize(self))
    }

    pub fn from_idx(idx: usize) -> Result<Self, Error> {
        Self::from_usize(idx).ok_or(Error::ConvertUSizeToJointKind(idx))
    }
}

/// Body side whose limbs are measured.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::str::FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(Error::ParseSide(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// A side-agnostic anatomical point named by exercise rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Limb {
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
    /// Base of the spine; has no side.
    Root,
}

impl Limb {
    pub fn joint(self, side: Side) -> JointKind {
        use JointKind::*;

        match (self, side) {
            (Self::Shoulder, Side::Left) => LeftShoulder,
            (Self::Shoulder, Side::Right) => RightShoulder,
            (Self::Elbow, Side::Left) => LeftElbow,
            (Self::Elbow, Side::Right) => RightElbow,
            (Self::Wrist, Side::Left) => LeftWrist,
            (Self::Wrist, Side::Right) => RightWrist,
            (Self::Hip, Side::Left) => LeftHip,
            (Self::Hip, Side::Right) => RightHip,
            (Self::Knee, Side::Left) => LeftKnee,
            (Self::Knee, Side::Right) => RightKnee,
            (Self::Ankle, Side::Left) => LeftAnkle,
            (Self::Ankle, Side::Right) => RightAnkle,
            (Self::Root, _) => Root,
        }
    }
}

/// One detector reading for one joint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JointSample {
    pub point: Point,
    pub confidence: f32,
}

impl JointSample {
    pub fn new(x: f32, y: f32, confidence: f32) -> Result<Self, Error> {
        Ok(Self {
            point: Point::new(x, y)?,
            confidence,
        })
    }
}

pub type Joints = [Option<JointSample>; NUM_JOINTS];

/// All joints reported for a single detector frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PoseObservation {
    /// Capture time, relative to the start of the stream.
    pub timestamp: Duration,
    joints: Joints,
}

impl PoseObservation {
    pub fn new(timestamp: Duration) -> Self {
        Self {
            timestamp,
            joints: [None; NUM_JOINTS],
        }
    }

    pub fn insert(&mut self, kind: JointKind, sample: JointSample) -> Result<(), Error> {
        self.joints[kind.idx()?] = Some(sample);
        Ok(())
    }

    pub fn with_joint(mut self, kind: JointKind, sample: JointSample) -> Result<Self, Error> {
        self.insert(kind, sample)?;
        Ok(self)
    }

    pub fn get(&self, kind: JointKind) -> Option<JointSample> {
        self.joints[kind.idx().ok()?]
    }

    /// Position of `kind` if it was reported with confidence strictly above `min_confidence`.
    pub fn confident(&self, kind: JointKind, min_confidence: f32) -> Option<Point> {
        self.get(kind)
            .filter(|sample| sample.confidence > min_confidence)
            .map(|sample| sample.point)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointKind, JointSample)> + '_ {
        self.joints
            .iter()
            .enumerate()
            .filter_map(|(i, sample)| Some((JointKind::from_idx(i).ok()?, (*sample)?)))
    }

    pub fn len(&self) -> usize {
        self.joints.iter().filter(|sample| sample.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_indices_cover_every_variant() {
        for i in 0..NUM_JOINTS {
            let kind = JointKind::from_idx(i).unwrap();
            assert_eq!(kind.idx().unwrap(), i);
        }
        assert!(JointKind::from_idx(NUM_JOINTS).is_err());
    }

    #[test]
    fn limbs_resolve_per_side() {
        assert_eq!(Limb::Knee.joint(Side::Right), JointKind::RightKnee);
        assert_eq!(Limb::Knee.joint(Side::Left), JointKind::LeftKnee);
        assert_eq!(Limb::Root.joint(Side::Left), JointKind::Root);
        assert_eq!(Limb::Root.joint(Side::Right), JointKind::Root);
    }

    #[test]
    fn side_parses_loosely() {
        assert_eq!(" Left ".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("r".parse::<Side>().unwrap(), Side::Right);
        assert!("middle".parse::<Side>().is_err());
    }

    mod observation_tests {
        use super::*;

        fn observation() -> PoseObservation {
            PoseObservation::new(Duration::from_millis(250))
                .with_joint(JointKind::RightKnee, JointSample::new(0.4, 0.5, 0.9).unwrap())
                .unwrap()
                .with_joint(JointKind::RightAnkle, JointSample::new(0.4, 0.1, 0.1).unwrap())
                .unwrap()
        }

        #[test]
        fn confident_requires_strictly_greater_confidence() {
            let obs = observation();
            assert!(obs.confident(JointKind::RightKnee, 0.1).is_some());
            assert!(obs.confident(JointKind::RightAnkle, 0.1).is_none());
            assert!(obs.confident(JointKind::RightHip, 0.1).is_none());
        }

        #[test]
        fn iter_yields_reported_joints_in_order() {
            let obs = observation();
            let kinds = obs.iter().map(|(kind, _)| kind).collect::<Vec<_>>();
            assert_eq!(kinds, vec![JointKind::RightKnee, JointKind::RightAnkle]);
            assert_eq!(obs.len(), 2);
            assert!(!obs.is_empty());
            assert!(PoseObservation::new(Duration::default()).is_empty());
        }
    }
}
