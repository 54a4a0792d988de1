//! Session aggregation.
//!
//! A [`Session`] owns the tally for one exercise between `start` and `stop`.
//! Frames are pushed by the host in arrival order and scored at most once per
//! sample interval; the rest are dropped without touching the tally.

use crate::{
    classify::{Classifier, Feedback},
    config::AnalyzerConfig,
    error::Error,
    exercise::ExerciseId,
    pose::PoseObservation,
    tally::{Summary, Tally},
};
use std::{
    sync::mpsc::{channel, Receiver, Sender},
    time::Duration,
};
use tracing::{debug, info, trace};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Analyzing,
    Stopped,
}

/// Notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started(ExerciseId),
    Classified {
        timestamp: Duration,
        feedback: Feedback,
    },
    Stopped(Summary),
}

pub struct Session {
    config: AnalyzerConfig,
    classifier: Classifier,
    state: SessionState,
    exercise: Option<ExerciseId>,
    tally: Tally,
    undetected: u64,
    last_accepted: Option<Duration>,
    subscribers: Vec<Sender<Event>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_valid_config(AnalyzerConfig::default())
    }
}

impl Session {
    pub fn new(config: AnalyzerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            classifier: Classifier::from(&config),
            state: SessionState::Idle,
            exercise: None,
            tally: Tally::default(),
            undetected: 0,
            last_accepted: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Begin analyzing the exercise named `exercise`.
    ///
    /// An unrecognized name is rejected and leaves the session untouched.
    pub fn start(&mut self, exercise: &str) -> Result<ExerciseId, Error> {
        let exercise = exercise.parse()?;
        self.start_exercise(exercise);
        Ok(exercise)
    }

    /// Begin a fresh session for `exercise`, discarding any previous tally.
    pub fn start_exercise(&mut self, exercise: ExerciseId) {
        self.state = SessionState::Analyzing;
        self.exercise = Some(exercise);
        self.tally = Tally::default();
        self.undetected = 0;
        self.last_accepted = None;

        info!(%exercise, interval = ?self.config.sample_interval(), "analysis started");
        self.emit(Event::Started(exercise));
    }

    /// Offer one observation captured at `now`.
    ///
    /// Returns the frame's feedback if it was accepted, `None` if it was
    /// dropped by the session state or the sampling gate.
    pub fn submit(&mut self, observation: &PoseObservation, now: Duration) -> Option<Feedback> {
        let exercise = match (self.state, self.exercise) {
            (SessionState::Analyzing, Some(exercise)) => exercise,
            (state, _) => {
                trace!(?state, ?now, "frame dropped: not analyzing");
                return None;
            }
        };

        if let Some(last) = self.last_accepted {
            if now < last || now - last < self.config.sample_interval() {
                trace!(?now, ?last, "frame dropped: within sample interval");
                return None;
            }
        }
        self.last_accepted = Some(now);

        let feedback = self.classifier.classify(exercise, observation);
        match feedback.grade() {
            Some(grade) => self.tally.record(grade),
            None => self.undetected += 1,
        }
        debug!(?now, %feedback, total = self.tally.total(), "frame scored");

        self.emit(Event::Classified {
            timestamp: now,
            feedback,
        });
        Some(feedback)
    }

    /// Freeze the tally. Stopping twice, or before any start, does nothing.
    pub fn stop(&mut self) {
        if self.state != SessionState::Analyzing {
            return;
        }
        self.state = SessionState::Stopped;

        let summary = self.summary();
        info!(
            good = self.tally.good,
            improve = self.tally.improve,
            poor = self.tally.poor,
            undetected = self.undetected,
            "analysis stopped"
        );
        self.emit(Event::Stopped(summary));
    }

    pub fn summary(&self) -> Summary {
        match self.exercise {
            Some(exercise) => Summary::new(exercise, &self.tally),
            None => Summary::NoData,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn exercise(&self) -> Option<ExerciseId> {
        self.exercise
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Accepted frames that could not be scored.
    pub fn undetected(&self) -> u64 {
        self.undetected
    }

    fn emit(&mut self, event: Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
