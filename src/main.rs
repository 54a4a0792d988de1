use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use formcheck::{recording::Recording, AnalyzerConfig, Event, ExerciseId, Session};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;

const EXERCISES_PER_LINE: usize = 5;
const FRAME_QUEUE_DEPTH: usize = 64;
const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(structopt::StructOpt)]
struct Opt {
    /// Exercise to analyze, e.g. "Squat" or "push-up".
    #[structopt(required_unless = "list")]
    exercise: Option<String>,

    /// Recorded pose stream (JSON lines). Reads stdin when omitted.
    #[structopt(short, long)]
    input: Option<PathBuf>,

    /// Print the supported exercises and exit.
    #[structopt(long)]
    list: bool,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short = "p", long)]
    show_progress: bool,

    #[structopt(flatten)]
    analyzer: AnalyzerConfig,
}

fn print_exercises() {
    for group in ExerciseId::ALL.chunks(EXERCISES_PER_LINE) {
        let names = group.iter().map(|e| e.name()).collect::<Vec<_>>();
        println!("{}", names.join(", "));
    }
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {:?}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Wait for the next frame, giving up once `running` is cleared or the reader hangs up.
fn next_frame<T>(frames: &Receiver<T>, running: &AtomicBool) -> Option<T> {
    while running.load(Ordering::SeqCst) {
        match frames.recv_timeout(INTERRUPT_POLL_INTERVAL) {
            Ok(frame) => return Some(frame),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
    None
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    if opt.list {
        print_exercises();
        return Ok(());
    }

    let mut session = Session::new(opt.analyzer).context("invalid analyzer configuration")?;
    let events = session.subscribe();
    let exercise_name = opt.exercise.as_deref().unwrap_or_default();
    let exercise = session
        .start(exercise_name)
        .context("failed to start analysis")?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let progress = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };
    if let Some(progress) = progress.as_ref() {
        progress.set_prefix(exercise.name());
    }

    let input = open_input(opt.input.as_ref())?;
    let (frames_tx, frames_rx) = crossbeam::channel::bounded(FRAME_QUEUE_DEPTH);
    let running_read = running.clone();

    // detached: a reader blocked on stdin must not hold up shutdown after Ctrl-C
    std::thread::spawn(move || {
        for frame in Recording::new(input) {
            if !running_read.load(Ordering::SeqCst) || frames_tx.send(frame).is_err() {
                break;
            }
        }
    });

    while let Some(frame) = next_frame(&frames_rx, &running) {
        let observation = frame.context("failed reading recorded frame")?;
        session.submit(&observation, observation.timestamp);

        for event in events.try_iter() {
            if let Event::Classified {
                timestamp,
                feedback,
            } = event
            {
                let line = format!("[{:>7.2}s] {}", timestamp.as_secs_f64(), feedback);
                match progress.as_ref() {
                    Some(progress) => {
                        progress.set_message(line);
                        progress.inc(1);
                    }
                    None => println!("{}", line),
                }
            }
        }
    }
    drop(frames_rx);
    if !running.load(Ordering::SeqCst) {
        warn!("interrupted, stopping analysis early");
    }

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    session.stop();
    info!(undetected = session.undetected(), "replay finished");

    for event in events.try_iter() {
        if let Event::Stopped(summary) = event {
            println!("{}", summary.spoken());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::bounded;

    #[test]
    fn next_frame_returns_queued_frames() {
        let (tx, rx) = bounded(2);
        let running = AtomicBool::new(true);
        tx.send(1).unwrap();
        assert_eq!(next_frame(&rx, &running), Some(1));
        drop(tx);
        assert_eq!(next_frame(&rx, &running), None);
    }

    #[test]
    fn interrupt_ends_wait_on_idle_reader() {
        // the sender stays alive and silent, like a reader blocked on stdin
        let (_tx, rx) = bounded::<u32>(1);
        let running = AtomicBool::new(true);

        crossbeam::thread::scope(|scope| {
            scope.spawn(|_| {
                std::thread::sleep(INTERRUPT_POLL_INTERVAL * 2);
                running.store(false, Ordering::SeqCst);
            });
            assert_eq!(next_frame(&rx, &running), None);
        })
        .unwrap();
    }
}
