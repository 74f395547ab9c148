//! The pipeline driver and its two worker loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use framepipe_bitstream::{normalize, parse_parameter_sets};
use framepipe_source::{FrameSource, SourceConfig};
use framepipe_transport::{Sink, StreamUnit, WireWriter, WIRE_HEADER_LEN};

use crate::{
    EngineError, EngineResult, FrameQueue, ParameterSetCache, PipelineSnapshot, PipelineStats,
    SessionState, ACQUIRE_TIMEOUT, IDLE_SLEEP, QUEUE_DEPTH_WARN, STATS_LOG_INTERVAL,
};

/// Pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capture/encoder settings applied to the frame source at start.
    pub source: SourceConfig,
}

/// Drives one stream session: acquire loop, transmit loop, shared queue.
///
/// The driver is the only owner of the stop signal; the loops poll it at each
/// cycle boundary, so the worst-case stop latency is one acquisition timeout
/// or one idle sleep. Dropping the driver stops the session.
pub struct PipelineDriver {
    config: PipelineConfig,
    source: Option<Box<dyn FrameSource>>,
    sink: Option<Box<dyn Sink>>,
    queue: Arc<FrameQueue>,
    stats: Arc<PipelineStats>,
    state: Mutex<SessionState>,
    running: Arc<AtomicBool>,
    acquire_thread: Option<JoinHandle<()>>,
    transmit_thread: Option<JoinHandle<()>>,
}

impl PipelineDriver {
    /// Create a driver for one session over the given collaborators.
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn FrameSource>,
        sink: Box<dyn Sink>,
    ) -> Self {
        Self {
            config,
            source: Some(source),
            sink: Some(sink),
            queue: Arc::new(FrameQueue::new()),
            stats: Arc::new(PipelineStats::default()),
            state: Mutex::new(SessionState::Idle),
            running: Arc::new(AtomicBool::new(false)),
            acquire_thread: None,
            transmit_thread: None,
        }
    }

    /// Start both loops.
    ///
    /// Fails when already running, when the session was already consumed by a
    /// previous run, or when the source refuses its configuration, in which
    /// case nothing is left running.
    #[instrument(name = "pipeline_start", skip(self))]
    pub fn start(&mut self) -> EngineResult<()> {
        {
            let state = self.state.lock();
            if state.is_running() {
                return Err(EngineError::AlreadyRunning);
            }
        }

        let mut source = self.source.take().ok_or(EngineError::SessionConsumed)?;
        let sink = self.sink.take().ok_or(EngineError::SessionConsumed)?;

        if let Err(e) = source.configure(&self.config.source) {
            source.shutdown();
            self.sink = Some(sink);
            return Err(e.into());
        }

        // The parameter-set preamble, when the encoder hands one out, goes on
        // the wire exactly once, before the first real access unit. A
        // malformed blob just means streaming without a preamble.
        let preamble = source.decoder_config().and_then(|blob| {
            let parsed = parse_parameter_sets(&blob);
            if parsed.is_none() {
                warn!(blob_len = blob.len(), "Malformed parameter-set blob, no preamble");
            }
            parsed
        });
        let cache = ParameterSetCache::new(preamble);

        self.running.store(true, Ordering::SeqCst);
        *self.state.lock() = SessionState::Running;

        let fps = self.config.source.fps.max(1);

        let acquire = {
            let queue = Arc::clone(&self.queue);
            let stats = Arc::clone(&self.stats);
            let running = Arc::clone(&self.running);
            thread::spawn(move || acquire_loop(source, queue, stats, running, cache, fps))
        };

        let transmit = {
            let queue = Arc::clone(&self.queue);
            let stats = Arc::clone(&self.stats);
            let running = Arc::clone(&self.running);
            thread::spawn(move || transmit_loop(sink, queue, stats, running))
        };

        self.acquire_thread = Some(acquire);
        self.transmit_thread = Some(transmit);

        info!(
            width = self.config.source.width,
            height = self.config.source.height,
            fps,
            "Pipeline started"
        );
        Ok(())
    }

    /// Stop both loops and tear down the collaborators. Idempotent.
    #[instrument(name = "pipeline_stop", skip(self))]
    pub fn stop(&mut self) {
        {
            let mut state = self.state.lock();
            if state.is_idle() {
                return;
            }
            *state = SessionState::Stopping;
        }

        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.acquire_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.transmit_thread.take() {
            let _ = handle.join();
        }

        *self.state.lock() = SessionState::Idle;

        let snap = self.stats.snapshot();
        info!(
            acquired = snap.samples_acquired,
            sent = snap.units_sent,
            dropped = snap.units_dropped,
            bytes = snap.bytes_sent,
            "Pipeline stopped"
        );
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Current counters.
    pub fn stats(&self) -> PipelineSnapshot {
        self.stats.snapshot()
    }

    /// Current queue depth.
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }
}

impl Drop for PipelineDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Acquire-and-normalize loop: source → normalizer → queue.
fn acquire_loop(
    mut source: Box<dyn FrameSource>,
    queue: Arc<FrameQueue>,
    stats: Arc<PipelineStats>,
    running: Arc<AtomicBool>,
    mut cache: ParameterSetCache,
    fps: u32,
) {
    debug!("Acquire loop started");

    let frame_interval = Duration::from_micros(1_000_000 / fps as u64);
    let session_start = Instant::now();
    let mut last_log = Instant::now();

    while running.load(Ordering::SeqCst) {
        let cycle_start = Instant::now();

        match source.acquire(ACQUIRE_TIMEOUT) {
            Ok(Some(sample)) => {
                stats.record_sample();

                if let Some(normalized) = normalize(sample.data, sample.framing) {
                    // A positive hint from the encoder can only add to what
                    // the bitstream scan found.
                    let is_keyframe =
                        normalized.is_keyframe || sample.keyframe_hint.unwrap_or(false);

                    if let Some(preamble) = cache.take_unsent() {
                        info!(len = preamble.len(), "Queueing parameter-set preamble");
                        queue.push(StreamUnit::video(preamble, 0, false));
                        stats.record_enqueued();
                    }

                    queue.push(StreamUnit::video(
                        normalized.data,
                        sample.timestamp_us,
                        is_keyframe,
                    ));
                    stats.record_enqueued();

                    let depth = queue.len();
                    let prev_max = stats.observe_queue_depth(depth);
                    if depth > QUEUE_DEPTH_WARN && depth > prev_max {
                        warn!(depth, "Frame queue growing, sink may be stalled");
                    }
                } else {
                    debug!("Sample produced no delimited unit, discarded");
                }
            }
            Ok(None) => {
                // Nothing new this cycle; a source need not change every
                // frame interval.
            }
            Err(e) => {
                warn!(error = %e, "Source acquisition failed, skipping cycle");
            }
        }

        if last_log.elapsed() >= STATS_LOG_INTERVAL {
            let snap = stats.snapshot();
            info!(
                acquired = snap.samples_acquired,
                enqueued = snap.units_enqueued,
                sent = snap.units_sent,
                uptime_s = session_start.elapsed().as_secs(),
                "Stream stats"
            );
            last_log = Instant::now();
        }

        // Pace to the target rate: sleep out whatever the cycle left over.
        let elapsed = cycle_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }

    source.shutdown();
    debug!("Acquire loop ended");
}

/// Drain-and-transmit loop: queue → wire writer → sink.
fn transmit_loop(
    sink: Box<dyn Sink>,
    queue: Arc<FrameQueue>,
    stats: Arc<PipelineStats>,
    running: Arc<AtomicBool>,
) {
    debug!("Transmit loop started");

    let mut writer = WireWriter::new(sink);

    while running.load(Ordering::SeqCst) {
        match queue.pop() {
            Some(unit) => match writer.send(&unit) {
                Ok(()) => {
                    stats.record_sent((WIRE_HEADER_LEN + unit.payload.len()) as u64);
                }
                Err(e) => {
                    // Favor keeping the live stream going over halting on a
                    // single transport hiccup; the unit is lost.
                    warn!(
                        error = %e,
                        timestamp_us = unit.timestamp_us,
                        "Sink write failed, unit dropped"
                    );
                    stats.record_dropped();
                }
            },
            None => thread::sleep(IDLE_SLEEP),
        }
    }

    writer.close();
    debug!("Transmit loop ended");
}
