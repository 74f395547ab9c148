//! Channel-backed frame source.
//!
//! Bridges any external producer thread into the pipeline: the producer keeps
//! a [`SampleSender`], the pipeline owns the [`ChannelSource`]. Doubles as
//! the scripted source for integration tests.

use std::thread;
use std::time::Duration;

use bytes::Bytes;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::debug;

use crate::{
    FrameSource, RawSample, SourceConfig, SourceError, SourceResult, SAMPLE_CHANNEL_CAPACITY,
};

/// Sending half handed to the producer.
pub type SampleSender = Sender<RawSample>;

/// A [`FrameSource`] fed through a bounded crossbeam channel.
pub struct ChannelSource {
    rx: Receiver<RawSample>,
    decoder_config: Option<Bytes>,
    configured: bool,
    disconnected: bool,
}

/// Create a connected sender/source pair.
///
/// `decoder_config` is the raw out-of-band parameter-set blob, if the
/// producer's encoder emits one.
pub fn channel_source(decoder_config: Option<Bytes>) -> (SampleSender, ChannelSource) {
    let (tx, rx) = bounded(SAMPLE_CHANNEL_CAPACITY);
    (
        tx,
        ChannelSource {
            rx,
            decoder_config,
            configured: false,
            disconnected: false,
        },
    )
}

impl FrameSource for ChannelSource {
    fn configure(&mut self, config: &SourceConfig) -> SourceResult<()> {
        debug!(
            width = config.width,
            height = config.height,
            fps = config.fps,
            "Channel source configured"
        );
        self.configured = true;
        Ok(())
    }

    fn decoder_config(&mut self) -> Option<Bytes> {
        self.decoder_config.take()
    }

    fn acquire(&mut self, timeout: Duration) -> SourceResult<Option<RawSample>> {
        if !self.configured {
            return Err(SourceError::NotConfigured);
        }

        // A dropped producer behaves like a source that stopped changing:
        // sleep out the bound instead of spinning on a closed channel.
        if self.disconnected {
            thread::sleep(timeout);
            return Ok(None);
        }

        match self.rx.recv_timeout(timeout) {
            Ok(sample) => Ok(Some(sample)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Sample producer disconnected, source is now idle");
                self.disconnected = true;
                Ok(None)
            }
        }
    }

    fn shutdown(&mut self) {
        self.configured = false;
        debug!("Channel source shut down");
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
