use std::cell::Cell;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use rand::Rng;

use crate::error::Result;
use crate::generator::Generator;
use crate::output::{Durable, Encoder, Sink};

// Generator -> Encoder -> Sink, once per tick.
//
// Generator == ()            ->  MetricSample
// Encoder   == MetricSample  ->  Result<Vec<u8>>
// Sink      == Vec<u8>       ->  stdout + output file (synced)

pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Creates a linked cancellation pair. Calling `cancel()` on the handle,
/// or dropping it, stops a running loop at its next wait.
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = mpsc::channel();
    (
        CancelHandle { tx },
        Cancellation {
            rx,
            cancelled: Cell::new(false),
            _keepalive: None,
        },
    )
}

pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // The receiving side may already be gone.
        let _ = self.tx.send(());
    }
}

pub struct Cancellation {
    rx: Receiver<()>,
    cancelled: Cell<bool>,
    _keepalive: Option<Sender<()>>,
}

impl Cancellation {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            cancelled: Cell::new(false),
            _keepalive: Some(tx),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        if !self.cancelled.get() {
            match self.rx.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => self.cancelled.set(true),
                Err(TryRecvError::Empty) => (),
            }
        }
        self.cancelled.get()
    }

    /// Blocks for `timeout` or until cancelled, whichever comes first.
    /// Returns true if cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.cancelled.get() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => self.cancelled.set(true),
            Err(RecvTimeoutError::Timeout) => (),
        }
        self.cancelled.get()
    }
}

pub struct Runner<R, O, S> {
    generator: Generator<R>,
    encoder: Box<dyn Encoder>,
    sink: Sink<O, S>,
    interval: Duration,
    limit: Option<usize>,
}

impl<R: Rng, O: Write, S: Durable> Runner<R, O, S> {
    pub fn new(generator: Generator<R>, encoder: Box<dyn Encoder>, sink: Sink<O, S>) -> Self {
        Self {
            generator,
            encoder,
            sink,
            interval: SAMPLE_INTERVAL,
            limit: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Stops after `limit` samples. `None` runs until cancelled.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Generates, encodes and persists exactly one sample.
    pub fn step(&mut self) -> Result<()> {
        let sample = self.generator.generate();
        let buf = self.encoder.encode(&sample)?;
        self.sink.write(&buf)?;

        log::trace!("emitted sample taken at {}", sample.time());
        Ok(())
    }

    /// Runs until cancelled, the limit is reached, or a step fails. The first
    /// error is returned as is; nothing is retried. The wait between steps
    /// doesn't account for the time the step took, so the actual period is
    /// never shorter than the interval.
    pub fn run(&mut self, cancel: &Cancellation) -> Result<usize> {
        log::info!(
            "emitting a sample every {:?} (bounds: {:?})",
            self.interval,
            self.generator.bounds()
        );

        let mut emitted = 0;
        loop {
            if cancel.is_cancelled() {
                break;
            }

            self.step()?;
            emitted += 1;

            if self.limit.map_or(false, |limit| emitted >= limit) {
                break;
            }
            if cancel.wait(self.interval) {
                break;
            }
        }

        log::info!("stopped after {} samples", emitted);
        Ok(emitted)
    }

    pub fn into_sink(self) -> Sink<O, S> {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_cancellation_wait() {
        let (handle, cancel) = cancellation();
        assert!(!cancel.wait(Duration::from_millis(10)));
        assert!(!cancel.is_cancelled());

        handle.cancel();
        assert!(cancel.wait(Duration::from_secs(10)));
        assert!(cancel.is_cancelled());
        assert!(cancel.wait(Duration::from_secs(10)));
    }

    #[test]
    fn test_cancellation_on_drop() {
        let (handle, cancel) = cancellation();
        drop(handle);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_cancellation_wakes_up_early() {
        let (handle, cancel) = cancellation();
        let t = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.cancel();
        });

        let start = Instant::now();
        assert!(cancel.wait(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(10));
        t.join().unwrap();
    }

    #[test]
    fn test_never_cancelled() {
        let cancel = Cancellation::never();
        assert!(!cancel.is_cancelled());
        assert!(!cancel.wait(Duration::from_millis(10)));
    }
}
