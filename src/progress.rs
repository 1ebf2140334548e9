use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::error::BarError;
use crate::options::{BarConfig, BarOption};
use crate::render::{render_line, wall_time_line};
use crate::theme::Theme;

/// A console progress bar from `0` to `bound`.
///
/// Every update redraws the current terminal line. The first update reaching
/// `bound` draws the full bar, prints the wall time and finishes the bar; after
/// that all updates are no-ops. All operations take `&self` and serialize on
/// an internal lock, so a bar can be shared between threads behind an `Arc`.
pub struct ProgressBar<W: Write + Send = Stdout> {
    bound: i64,
    config: BarConfig,
    clock: Box<dyn Clock>,
    state: Mutex<State<W>>,
}

struct State<W> {
    value: i64,
    start_time: Option<Instant>,
    finished: bool,
    writer: W,
}

impl ProgressBar<Stdout> {
    /// Create a bar drawing to stdout.
    pub fn new<I>(bound: i64, options: I) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = BarOption>,
    {
        Self::with_writer(bound, options, io::stdout())
    }

    /// Create a bar drawing to stdout and start it right away.
    pub fn start_new<I>(bound: i64, options: I) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = BarOption>,
    {
        let bar = Self::new(bound, options)?;
        bar.start()?;
        Ok(bar)
    }

    pub fn builder(bound: i64) -> BarBuilder<Stdout> {
        BarBuilder::new(bound)
    }
}

impl<W: Write + Send> ProgressBar<W> {
    pub fn with_writer<I>(bound: i64, options: I, writer: W) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = BarOption>,
    {
        Self::from_parts(bound, options, writer, Box::new(SystemClock))
    }

    fn from_parts<I>(
        bound: i64,
        options: I,
        writer: W,
        clock: Box<dyn Clock>,
    ) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = BarOption>,
    {
        if bound <= 0 {
            return Err(BarError::InvalidBound(bound));
        }
        let config = BarConfig::from_options(options)?;

        Ok(Self {
            bound,
            config,
            clock,
            state: Mutex::new(State {
                value: 0,
                start_time: None,
                finished: false,
                writer,
            }),
        })
    }

    /// Start the clock and draw the empty bar.
    ///
    /// Only the first call has an effect; the start time never moves.
    pub fn start(&self) -> Result<(), BarError> {
        let mut state = self.lock();
        if state.start_time.is_some() {
            return Ok(());
        }
        let mut out = String::new();
        self.begin(&mut state, self.clock.now(), &mut out);
        emit(&mut state.writer, &out)
    }

    /// Move the bar to `value`.
    ///
    /// Negative values draw as `0`. Values at or past the bound finish the bar.
    pub fn set(&self, value: i64) -> Result<(), BarError> {
        let mut state = self.lock();
        self.update(&mut state, value)
    }

    pub fn add(&self, delta: i64) -> Result<(), BarError> {
        let mut state = self.lock();
        let target = state.value.saturating_add(delta);
        self.update(&mut state, target)
    }

    pub fn increment(&self) -> Result<(), BarError> {
        self.add(1)
    }

    /// Fill the bar and print the wall time. Subsequent calls do nothing.
    pub fn finish(&self) -> Result<(), BarError> {
        self.set(self.bound)
    }

    pub fn value(&self) -> i64 {
        self.lock().value
    }

    pub fn bound(&self) -> i64 {
        self.bound
    }

    pub fn width(&self) -> i64 {
        self.config.width
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn is_started(&self) -> bool {
        self.lock().start_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    /// Time since the bar started, zero if it has not.
    pub fn elapsed(&self) -> Duration {
        let start_time = self.lock().start_time;
        start_time
            .map(|t| self.clock.now().saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// Consume the bar and hand back its writer.
    pub fn into_writer(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    fn lock(&self) -> MutexGuard<'_, State<W>> {
        // State is consistent between statements, a panic elsewhere cannot tear it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, state: &mut State<W>, now: Instant, out: &mut String) -> Instant {
        debug!("Starting progress bar (bound: {}, width: {})", self.bound, self.config.width);
        state.start_time = Some(now);
        out.push('\n');
        out.push_str(&render_line(&self.config, state.value, self.bound, Duration::ZERO));
        now
    }

    fn update(&self, state: &mut State<W>, target: i64) -> Result<(), BarError> {
        if state.finished {
            return Ok(());
        }

        let now = self.clock.now();
        let mut out = String::new();
        let start_time = match state.start_time {
            Some(t) => t,
            None => self.begin(state, now, &mut out),
        };
        let elapsed = now.saturating_duration_since(start_time);

        if target >= self.bound {
            if target > self.bound {
                trace!("Clamping {target} to bound {}", self.bound);
            }
            state.value = self.bound;
            state.finished = true;
            out.push_str(&render_line(&self.config, self.bound, self.bound, elapsed));
            out.push_str(&wall_time_line(elapsed));
            debug!("Progress bar finished after {:.3}s", elapsed.as_secs_f64());
        } else {
            if target < 0 {
                trace!("Clamping negative value {target} to 0");
            }
            state.value = target.max(0);
            out.push_str(&render_line(&self.config, state.value, self.bound, elapsed));
        }

        emit(&mut state.writer, &out)
    }
}

fn emit<W: Write>(writer: &mut W, out: &str) -> Result<(), BarError> {
    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

impl<W: Write + Send> fmt::Debug for ProgressBar<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ProgressBar")
            .field("bound", &self.bound)
            .field("config", &self.config)
            .field("value", &state.value)
            .field("start_time", &state.start_time)
            .field("finished", &state.finished)
            .finish_non_exhaustive()
    }
}

/// Step-by-step construction of a [`ProgressBar`].
///
/// Option setters are recorded in call order and applied by [`build`](Self::build),
/// so the last setter for a field wins and the first invalid one is reported.
pub struct BarBuilder<W> {
    bound: i64,
    options: Vec<BarOption>,
    writer: W,
    clock: Box<dyn Clock>,
}

impl BarBuilder<Stdout> {
    pub fn new(bound: i64) -> Self {
        Self {
            bound,
            options: Vec::new(),
            writer: io::stdout(),
            clock: Box::new(SystemClock),
        }
    }
}

impl<W: Write + Send> BarBuilder<W> {
    pub fn option(mut self, option: BarOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn width(self, width: i64) -> Self {
        self.option(BarOption::Width(width))
    }

    pub fn theme(self, theme: Theme) -> Self {
        self.option(BarOption::Theme(theme))
    }

    pub fn boundary_char(self, c: char) -> Self {
        self.option(BarOption::BoundaryChar(c))
    }

    pub fn start_char(self, c: char) -> Self {
        self.option(BarOption::StartChar(c))
    }

    pub fn end_char(self, c: char) -> Self {
        self.option(BarOption::EndChar(c))
    }

    pub fn fill_char(self, c: char) -> Self {
        self.option(BarOption::FillChar(c))
    }

    pub fn show_percentage(self, show: bool) -> Self {
        self.option(BarOption::ShowPercentage(show))
    }

    pub fn show_elapsed_time(self, show: bool) -> Self {
        self.option(BarOption::ShowElapsedTime(show))
    }

    pub fn writer<V: Write + Send>(self, writer: V) -> BarBuilder<V> {
        BarBuilder {
            bound: self.bound,
            options: self.options,
            writer,
            clock: self.clock,
        }
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn build(self) -> Result<ProgressBar<W>, BarError> {
        ProgressBar::from_parts(self.bound, self.options, self.writer, self.clock)
    }
}
