use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{Clock, Frame, Result, Sink};

/// What to do when a frame can't be delivered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
	/// Stop the writer and return the error.
	#[default]
	Abort,

	/// Log the error, drop the frame and carry on with the schedule.
	///
	/// The next frame is the retry. With [`WriterConfig::max_failures`] set, the writer gives up
	/// after that many failures in a row.
	Retry,
}

#[derive(Clone, Debug)]
pub struct WriterConfig {
	/// Shown at the start of each cycle.
	pub greeting: Frame,

	/// Number of date/time frames per cycle.
	pub ticks: u32,

	/// How long the greeting stays up.
	pub greeting_pause: Duration,

	/// How long each date/time frame stays up.
	pub tick_pause: Duration,

	pub on_failure: FailurePolicy,

	/// Consecutive failures tolerated under [`FailurePolicy::Retry`]. Unlimited if `None`.
	pub max_failures: Option<u32>,

	/// Stop after this many complete cycles. Runs until cancelled if `None`.
	pub cycles: Option<u64>,
}

impl Default for WriterConfig {
	fn default() -> Self {
		Self {
			greeting: Frame::greeting(),
			ticks: 15,
			greeting_pause: Duration::from_secs(3),
			tick_pause: Duration::from_secs(1),
			on_failure: FailurePolicy::default(),
			max_failures: None,
			cycles: None,
		}
	}
}

/// Counters from a finished run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
	/// Complete greeting + date/time cycles.
	pub cycles: u64,

	/// Frames delivered.
	pub frames: u64,

	/// Frames dropped after a failed send.
	pub failures: u64,
}

/// Shows the greeting, then the date and time every tick, over and over.
pub struct DisplayWriter<S, C> {
	sink: S,
	clock: C,
	config: WriterConfig,
	stats: Stats,
	failing: u32,
}

impl<S: Sink, C: Clock> DisplayWriter<S, C> {
	pub fn new(sink: S, clock: C, config: WriterConfig) -> Self {
		Self {
			sink,
			clock,
			config,
			stats: Stats::default(),
			failing: 0,
		}
	}

	pub fn sink(&self) -> &S {
		&self.sink
	}

	pub fn into_sink(self) -> S {
		self.sink
	}

	/// Run until `shutdown` is cancelled or the configured number of cycles is done.
	///
	/// Cancellation is observed while pausing. A frame being written is always finished first.
	pub async fn run(&mut self, shutdown: &CancellationToken) -> Result<Stats> {
		info!(
			ticks = self.config.ticks,
			cycles = ?self.config.cycles,
			policy = ?self.config.on_failure,
			"starting display writer"
		);

		let greeting = self.config.greeting.clone();
		'cycles: loop {
			debug!(cycle = self.stats.cycles, "showing greeting");
			self.deliver(&greeting)?;
			if !pause(self.config.greeting_pause, shutdown).await {
				break 'cycles;
			}

			for tick in 0..self.config.ticks {
				let now = self.clock.now();
				debug!(tick, %now, "showing time");
				self.deliver(&Frame::timestamp(now))?;
				if !pause(self.config.tick_pause, shutdown).await {
					break 'cycles;
				}
			}

			self.stats.cycles += 1;
			if self
				.config
				.cycles
				.is_some_and(|limit| self.stats.cycles >= limit)
			{
				debug!(cycles = self.stats.cycles, "cycle limit reached");
				break;
			}
		}

		info!(
			cycles = self.stats.cycles,
			frames = self.stats.frames,
			failures = self.stats.failures,
			"display writer stopped"
		);
		Ok(self.stats)
	}

	fn deliver(&mut self, frame: &Frame) -> Result<()> {
		let err = match self.sink.send(frame) {
			Ok(()) => {
				self.stats.frames += 1;
				self.failing = 0;
				return Ok(());
			}
			Err(err) => err,
		};

		self.stats.failures += 1;
		self.failing += 1;

		match self.config.on_failure {
			FailurePolicy::Abort => Err(err),
			FailurePolicy::Retry
				if self
					.config
					.max_failures
					.is_some_and(|max| self.failing > max) =>
			{
				error!(failures = self.failing, "too many failures in a row, giving up");
				Err(err)
			}
			FailurePolicy::Retry => {
				warn!(failures = self.failing, "failed to show frame, will try again: {err}");
				Ok(())
			}
		}
	}
}

/// Sleep for `duration`, returning `false` if cancelled first.
async fn pause(duration: Duration, shutdown: &CancellationToken) -> bool {
	tokio::select! {
		biased;
		_ = shutdown.cancelled() => {
			debug!("cancelled");
			false
		}
		_ = sleep(duration) => true,
	}
}
