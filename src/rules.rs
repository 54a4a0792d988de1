//! Per-exercise form rules.
//!
//! Each exercise is scored from one of three kinds of measurement: a single
//! joint angle checked against half-open ranges, a pair of joint angles whose
//! thresholds must hold together, or the normalized vertical gap between two
//! joints. Anything that misses both the good and the improve tier is poor.

use crate::{
    classify::Grade,
    exercise::ExerciseId,
    pose::Limb::{self, *},
};
use std::ops::Range;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Messages {
    pub good: &'static str,
    pub improve: &'static str,
    pub poor: &'static str,
}

impl Messages {
    pub fn for_grade(&self, grade: Grade) -> &'static str {
        match grade {
            Grade::Good => self.good,
            Grade::Improve => self.improve,
            Grade::Poor => self.poor,
        }
    }
}

/// Three joints; the angle is measured at the middle one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Triple {
    pub a: Limb,
    pub vertex: Limb,
    pub b: Limb,
}

const fn triple(a: Limb, vertex: Limb, b: Limb) -> Triple {
    Triple { a, vertex, b }
}

const KNEE: Triple = triple(Hip, Knee, Ankle);
const ELBOW: Triple = triple(Shoulder, Elbow, Wrist);
const HIP_LINE: Triple = triple(Shoulder, Hip, Ankle);
const HIP_HINGE: Triple = triple(Shoulder, Hip, Knee);
const TORSO: Triple = triple(Shoulder, Root, Hip);

#[derive(Debug, Clone, PartialEq)]
pub struct AngleRule {
    pub joints: Triple,
    pub good: Range<f32>,
    pub improve: Range<f32>,
}

impl AngleRule {
    pub fn grade(&self, angle: f32) -> Grade {
        if self.good.contains(&angle) {
            Grade::Good
        } else if self.improve.contains(&angle) {
            Grade::Improve
        } else {
            Grade::Poor
        }
    }
}

/// A strict one-sided threshold.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Bound {
    Below(f32),
    Above(f32),
}

impl Bound {
    pub fn admits(self, value: f32) -> bool {
        match self {
            Self::Below(limit) => value < limit,
            Self::Above(limit) => value > limit,
        }
    }
}

/// Two angles scored together; a tier applies only when both of its bounds hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRule {
    pub first: Triple,
    pub second: Triple,
    pub good: (Bound, Bound),
    pub improve: (Bound, Bound),
}

impl CompoundRule {
    pub fn grade(&self, first: f32, second: f32) -> Grade {
        let tier = |(a, b): (Bound, Bound)| a.admits(first) && b.admits(second);
        if tier(self.good) {
            Grade::Good
        } else if tier(self.improve) {
            Grade::Improve
        } else {
            Grade::Poor
        }
    }
}

/// Vertical gap between `upper` and `lower`, normalized by the distance of
/// `upper` from the `pivot` line.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightRule {
    pub upper: Limb,
    pub lower: Limb,
    pub pivot: f32,
    pub good_below: f32,
    pub improve_below: f32,
}

impl HeightRule {
    /// `None` when the ratio is not finite.
    pub fn ratio(&self, upper_y: f32, lower_y: f32) -> Option<f32> {
        Some((upper_y - lower_y) / (upper_y - self.pivot)).filter(|ratio| ratio.is_finite())
    }

    pub fn grade(&self, ratio: f32) -> Grade {
        if ratio < self.good_below {
            Grade::Good
        } else if ratio < self.improve_below {
            Grade::Improve
        } else {
            Grade::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Angle(AngleRule),
    Compound(CompoundRule),
    Height(HeightRule),
}

impl Rule {
    /// Every limb that must be confidently detected to evaluate the rule.
    pub fn limbs(&self) -> Vec<Limb> {
        match self {
            Self::Angle(rule) => vec![rule.joints.a, rule.joints.vertex, rule.joints.b],
            Self::Compound(rule) => vec![
                rule.first.a,
                rule.first.vertex,
                rule.first.b,
                rule.second.a,
                rule.second.vertex,
                rule.second.b,
            ],
            Self::Height(rule) => vec![rule.upper, rule.lower],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRule {
    pub exercise: ExerciseId,
    pub rule: Rule,
    pub messages: Messages,
    /// Advice appended to the session summary.
    pub suggestion: &'static str,
}

const fn messages(good: &'static str, improve: &'static str, poor: &'static str) -> Messages {
    Messages {
        good,
        improve,
        poor,
    }
}

const fn angle(joints: Triple, good: Range<f32>, improve: Range<f32>) -> Rule {
    Rule::Angle(AngleRule {
        joints,
        good,
        improve,
    })
}

static RULES: [ExerciseRule; 19] = [
    ExerciseRule {
        exercise: ExerciseId::Squat,
        rule: angle(KNEE, 0.0..90.0, 90.0..120.0),
        messages: messages("Good squat depth", "Go lower", "Bend knees more"),
        suggestion: "Work on lowering your hips more and keeping your back straight.",
    },
    ExerciseRule {
        exercise: ExerciseId::PushUp,
        rule: angle(ELBOW, 0.0..90.0, 90.0..120.0),
        messages: messages("Full range", "Lower chest more", "Not low enough"),
        suggestion: "Try to lower your chest closer to the ground and keep your body straight.",
    },
    ExerciseRule {
        exercise: ExerciseId::Lunge,
        rule: angle(KNEE, 80.0..100.0, 100.0..120.0),
        messages: messages(
            "Front knee bent properly",
            "Bend front knee more",
            "Adjust stance and knee bend",
        ),
        suggestion: "Focus on keeping your front knee at a 90-degree angle.",
    },
    ExerciseRule {
        exercise: ExerciseId::Plank,
        rule: angle(HIP_LINE, 160.0..180.0, 150.0..160.0),
        messages: messages(
            "Body well-aligned",
            "Straighten body more",
            "Align body, keep straight",
        ),
        suggestion: "Keep your body in a straight line from head to heels.",
    },
    ExerciseRule {
        exercise: ExerciseId::GluteBridge,
        rule: angle(HIP_HINGE, 160.0..180.0, 140.0..160.0),
        messages: messages("Hips raised high", "Raise hips higher", "Lift hips much higher"),
        suggestion: "Lift your hips higher and squeeze your glutes at the top.",
    },
    ExerciseRule {
        exercise: ExerciseId::CalfRaise,
        rule: Rule::Height(HeightRule {
            upper: Knee,
            lower: Ankle,
            pivot: 0.5,
            good_below: 0.1,
            improve_below: 0.15,
        }),
        messages: messages(
            "Heels raised high",
            "Raise your heels higher",
            "Lift your heels much higher",
        ),
        suggestion: "Rise up onto your toes as high as possible.",
    },
    ExerciseRule {
        exercise: ExerciseId::WallSit,
        rule: angle(KNEE, 85.0..95.0, 80.0..85.0),
        messages: messages(
            "Knees at 90 degrees",
            "Adjust to 90 degree knee bend",
            "Significantly off from 90 degree knee bend",
        ),
        suggestion: "Keep thighs parallel to the ground and back against the wall.",
    },
    ExerciseRule {
        exercise: ExerciseId::ShoulderPress,
        rule: angle(ELBOW, 160.0..180.0, 140.0..160.0),
        messages: messages("Arms extended", "Extend arms more", "Push weights higher"),
        suggestion: "Fully extend your arms overhead.",
    },
    ExerciseRule {
        exercise: ExerciseId::TricepDip,
        rule: angle(ELBOW, 0.0..90.0, 90.0..120.0),
        messages: messages("Arms bent sufficiently", "Lower body more", "Bend elbows more"),
        suggestion: "Lower until your upper arms are parallel to the ground.",
    },
    ExerciseRule {
        exercise: ExerciseId::BicycleCrunch,
        rule: Rule::Compound(CompoundRule {
            first: KNEE,
            second: ELBOW,
            good: (Bound::Below(45.0), Bound::Below(90.0)),
            improve: (Bound::Below(60.0), Bound::Below(110.0)),
        }),
        messages: messages(
            "Knee close to chest and elbow twisted",
            "Bring knee closer to chest and twist more",
            "Bring your knee much closer and twist further",
        ),
        suggestion: "Rotate your torso more and bring elbow to opposite knee.",
    },
    ExerciseRule {
        exercise: ExerciseId::Superman,
        rule: angle(HIP_LINE, 160.0..180.0, 140.0..160.0),
        messages: messages(
            "Body well-extended",
            "Lift limbs higher",
            "Lift arms and legs much higher",
        ),
        suggestion: "Lift your arms and legs higher off the ground.",
    },
    ExerciseRule {
        exercise: ExerciseId::MountainClimber,
        rule: angle(KNEE, 0.0..90.0, 90.0..120.0),
        messages: messages(
            "Knee close to chest",
            "Bring knee closer to chest",
            "Bring knee much closer to chest",
        ),
        suggestion: "Bring knees closer to your chest.",
    },
    ExerciseRule {
        exercise: ExerciseId::JumpingJack,
        rule: Rule::Compound(CompoundRule {
            first: ELBOW,
            second: KNEE,
            good: (Bound::Above(150.0), Bound::Above(30.0)),
            improve: (Bound::Above(120.0), Bound::Above(20.0)),
        }),
        messages: messages(
            "Arms and legs extended",
            "Extend arms and legs more",
            "Jump higher and extend arms fully",
        ),
        suggestion: "Fully extend your arms and legs with each jump.",
    },
    ExerciseRule {
        exercise: ExerciseId::Burpee,
        rule: angle(HIP_HINGE, 0.0..60.0, 60.0..90.0),
        messages: messages(
            "Low squat position",
            "Lower your squat",
            "Squat lower and jump higher",
        ),
        suggestion: "Lower chest to the ground and jump higher at the end.",
    },
    ExerciseRule {
        exercise: ExerciseId::HighKnees,
        rule: angle(KNEE, 0.0..90.0, 90.0..120.0),
        messages: messages("Knee raised high", "Raise knee higher", "Lift knee much higher"),
        suggestion: "Lift knees higher and increase your pace.",
    },
    ExerciseRule {
        exercise: ExerciseId::BoxJump,
        rule: angle(KNEE, 0.0..90.0, 90.0..120.0),
        messages: messages(
            "Deep squat before jump",
            "Lower squat before jumping",
            "Squat lower for more explosive jump",
        ),
        suggestion: "Land softly with knees slightly bent.",
    },
    ExerciseRule {
        exercise: ExerciseId::KettlebellSwing,
        rule: angle(HIP_HINGE, 160.0..180.0, 140.0..160.0),
        messages: messages(
            "Hips fully extended at the top",
            "Extend hips more at the top",
            "Focus on hip hinge and full extension",
        ),
        suggestion: "Drive movement from hips and keep arms straight.",
    },
    ExerciseRule {
        exercise: ExerciseId::RussianTwist,
        rule: angle(TORSO, 0.0..60.0, 60.0..90.0),
        messages: messages(
            "Torso rotated sufficiently",
            "Rotate torso more",
            "Increase range of motion",
        ),
        suggestion: "Rotate torso further and lift feet off the ground.",
    },
    ExerciseRule {
        exercise: ExerciseId::StepUp,
        rule: angle(KNEE, 0.0..90.0, 90.0..120.0),
        messages: messages(
            "Leg lifted high enough",
            "Lift leg higher",
            "Step onto higher platform or lift leg higher",
        ),
        suggestion: "Step fully onto the platform and straighten your leg at the top.",
    },
];

/// The rule table entry for `exercise`.
pub fn rule_for(exercise: ExerciseId) -> &'static ExerciseRule {
    // RULES is laid out in declaration order of ExerciseId
    &RULES[exercise as usize]
}
