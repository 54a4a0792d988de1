use crate::error::Error;
use std::{fmt, str::FromStr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExerciseId {
    Squat,
    PushUp,
    Lunge,
    Plank,
    GluteBridge,
    CalfRaise,
    WallSit,
    ShoulderPress,
    TricepDip,
    BicycleCrunch,
    Superman,
    MountainClimber,
    JumpingJack,
    Burpee,
    HighKnees,
    BoxJump,
    KettlebellSwing,
    RussianTwist,
    StepUp,
}

impl ExerciseId {
    pub const ALL: [ExerciseId; 19] = [
        Self::Squat,
        Self::PushUp,
        Self::Lunge,
        Self::Plank,
        Self::GluteBridge,
        Self::CalfRaise,
        Self::WallSit,
        Self::ShoulderPress,
        Self::TricepDip,
        Self::BicycleCrunch,
        Self::Superman,
        Self::MountainClimber,
        Self::JumpingJack,
        Self::Burpee,
        Self::HighKnees,
        Self::BoxJump,
        Self::KettlebellSwing,
        Self::RussianTwist,
        Self::StepUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::PushUp => "Push-up",
            Self::Lunge => "Lunge",
            Self::Plank => "Plank",
            Self::GluteBridge => "Glute Bridge",
            Self::CalfRaise => "Calf Raise",
            Self::WallSit => "Wall Sit",
            Self::ShoulderPress => "Shoulder Press",
            Self::TricepDip => "Tricep Dip",
            Self::BicycleCrunch => "Bicycle Crunch",
            Self::Superman => "Superman",
            Self::MountainClimber => "Mountain Climber",
            Self::JumpingJack => "Jumping Jack",
            Self::Burpee => "Burpee",
            Self::HighKnees => "High Knees",
            Self::BoxJump => "Box Jump",
            Self::KettlebellSwing => "Kettlebell Swing",
            Self::RussianTwist => "Russian Twist",
            Self::StepUp => "Step-up",
        }
    }
}

/// Lowercase with separators removed, so "Push-up", "push up" and "PUSHUP" compare equal.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for ExerciseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|exercise| fold_name(exercise.name()) == wanted)
            .ok_or_else(|| Error::UnknownExercise(s.to_owned()))
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
