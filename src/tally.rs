use crate::{classify::Grade, exercise::ExerciseId, rules::rule_for};
use std::fmt;

pub const NO_DATA_MESSAGE: &str = "No feedback summary available.";

/// Running classification counts for one session.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub good: u64,
    pub improve: u64,
    pub poor: u64,
}

impl Tally {
    pub fn record(&mut self, grade: Grade) {
        match grade {
            Grade::Good => self.good += 1,
            Grade::Improve => self.improve += 1,
            Grade::Poor => self.poor += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.good + self.improve + self.poor
    }
}

/// `part / total` as a whole percentage, rounding exact halves to even like `%.0f`.
fn percent(part: u64, total: u64) -> u64 {
    let scaled = part * 100;
    let (quotient, remainder) = (scaled / total, scaled % total);
    if 2 * remainder > total || (2 * remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub exercise: ExerciseId,
    pub good_percent: u64,
    pub improve_percent: u64,
    pub poor_percent: u64,
    pub suggestion: &'static str,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} analysis: {}% good form, {}% needs improvement, {}% poor form. {}",
            self.exercise,
            self.good_percent,
            self.improve_percent,
            self.poor_percent,
            self.suggestion
        )
    }
}

/// End-of-session feedback, or an explicit marker that nothing was scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    NoData,
    Report(Report),
}

impl Summary {
    pub fn new(exercise: ExerciseId, tally: &Tally) -> Self {
        let total = tally.total();
        if total == 0 {
            return Self::NoData;
        }
        Self::Report(Report {
            exercise,
            good_percent: percent(tally.good, total),
            improve_percent: percent(tally.improve, total),
            poor_percent: percent(tally.poor, total),
            suggestion: rule_for(exercise).suggestion,
        })
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// The text read out to the user once analysis stops.
    pub fn spoken(&self) -> String {
        match self {
            Self::NoData => NO_DATA_MESSAGE.to_owned(),
            Self::Report(report) => format!("Here is your feedback. {}", report),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str(NO_DATA_MESSAGE),
            Self::Report(report) => fmt::Display::fmt(report, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(good: u64, improve: u64, poor: u64) -> Tally {
        Tally {
            good,
            improve,
            poor,
        }
    }

    #[test]
    fn record_increments_matching_counter() {
        let mut t = Tally::default();
        t.record(Grade::Good);
        t.record(Grade::Good);
        t.record(Grade::Poor);
        assert_eq!(t, tally(2, 0, 1));
        assert_eq!(t.total(), 3);
    }

    #[test]
    fn squat_report() {
        let summary = Summary::new(ExerciseId::Squat, &tally(7, 2, 1));
        assert_eq!(
            summary.to_string(),
            "Squat analysis: 70% good form, 20% needs improvement, 10% poor form. \
             Work on lowering your hips more and keeping your back straight."
        );
    }

    #[test]
    fn empty_tally_has_no_data() {
        let summary = Summary::new(ExerciseId::Plank, &Tally::default());
        assert!(summary.is_no_data());
        assert_eq!(summary.to_string(), NO_DATA_MESSAGE);
        assert_eq!(summary.spoken(), NO_DATA_MESSAGE);
    }

    #[test]
    fn thirds_round_to_nearest() {
        match Summary::new(ExerciseId::Lunge, &tally(1, 1, 1)) {
            Summary::Report(report) => {
                assert_eq!(report.good_percent, 33);
                assert_eq!(report.improve_percent, 33);
                assert_eq!(report.poor_percent, 33);
            }
            Summary::NoData => panic!("expected a report"),
        }
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(percent(1, 8), 12);
        assert_eq!(percent(3, 8), 38);
        assert_eq!(percent(5, 8), 62);
        assert_eq!(percent(7, 8), 88);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 5), 0);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn eighths_report() {
        let summary = Summary::new(ExerciseId::Squat, &tally(1, 0, 7));
        assert_eq!(
            summary.to_string(),
            "Squat analysis: 12% good form, 0% needs improvement, 88% poor form. \
             Work on lowering your hips more and keeping your back straight."
        );
    }

    #[test]
    fn spoken_report_is_prefixed() {
        let summary = Summary::new(ExerciseId::Plank, &tally(1, 0, 0));
        assert_eq!(
            summary.spoken(),
            "Here is your feedback. Plank analysis: 100% good form, 0% needs improvement, \
             0% poor form. Keep your body in a straight line from head to heels."
        );
    }
}
