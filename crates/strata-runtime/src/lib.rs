//! Off-thread chunk generation: a fixed worker pool fed through typed channels.
#![forbid(unsafe_code)]

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_chunk::{ChunkBuf, generate_chunk_buffer};
use strata_world::{ChunkCoord, Terrain};
use thiserror::Error;

/// Requests each worker may have waiting in the channel.
pub const REQUEST_SLOTS_PER_WORKER: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    #[error("generation panicked: {0}")]
    Panicked(String),
    #[error("generation failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build generation pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("generation queue is full")]
    Full(GenRequest),
    #[error("generation workers have shut down")]
    Disconnected(GenRequest),
}

impl SubmitError {
    pub fn into_request(self) -> GenRequest {
        match self {
            SubmitError::Full(r) | SubmitError::Disconnected(r) => r,
        }
    }
}

/// Produces the block volume of one chunk. Each worker owns its own instance.
pub trait ChunkGenerator: Send + 'static {
    fn generate(&mut self, coord: ChunkCoord) -> Result<ChunkBuf, GenError>;
}

impl ChunkGenerator for Terrain {
    fn generate(&mut self, coord: ChunkCoord) -> Result<ChunkBuf, GenError> {
        let generated = generate_chunk_buffer(self, coord);
        let s = generated.stats;
        log::trace!(
            target: "runtime",
            "chunk {coord}: terrain {}us features {}us ({} placed, {} suppressed, {} cover)",
            s.t_terrain_us,
            s.t_features_us,
            s.features_applied,
            s.features_suppressed,
            s.ground_cover
        );
        Ok(generated.buf)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenRequest {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

#[derive(Debug)]
pub struct GenResponse {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub outcome: Result<ChunkBuf, GenError>,
    pub t_gen_ms: u32,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn process_request<G: ChunkGenerator>(generator: &mut G, req: GenRequest, tx: &Sender<GenResponse>) {
    let GenRequest { coord, job_id } = req;
    let t0 = Instant::now();
    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| generator.generate(coord))) {
        Ok(result) => result,
        Err(payload) => Err(GenError::Panicked(panic_message(payload.as_ref()))),
    };
    let t_gen_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    if let Err(e) = &outcome {
        log::warn!(target: "runtime", "chunk {coord} job {job_id}: {e}");
    }
    // The coordinator may already be gone; nothing to report to then.
    let _ = tx.send(GenResponse {
        coord,
        job_id,
        outcome,
        t_gen_ms,
    });
}

pub struct Runtime {
    req_tx: Sender<GenRequest>,
    res_rx: Receiver<GenResponse>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    workers: usize,
}

impl Runtime {
    /// Starts `workers` generation threads (`0` picks the hardware parallelism).
    pub fn new<G>(generator: G, workers: usize) -> Result<Self, RuntimeError>
    where
        G: ChunkGenerator + Clone,
    {
        let workers = if workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8)
        } else {
            workers
        };
        let (req_tx, req_rx) = bounded::<GenRequest>(workers * REQUEST_SLOTS_PER_WORKER);
        let (res_tx, res_rx) = unbounded::<GenResponse>();

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("strata-gen-{i}"))
                .build()?,
        );
        let queued = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));

        for _ in 0..workers {
            let rx = req_rx.clone();
            let tx = res_tx.clone();
            let mut generator = generator.clone();
            let queued = queued.clone();
            let in_flight = in_flight.clone();
            pool.spawn(move || {
                while let Ok(req) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    in_flight.fetch_add(1, Ordering::Relaxed);
                    process_request(&mut generator, req, &tx);
                    in_flight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::info!(target: "runtime", "generation pool started with {workers} workers");

        Ok(Self {
            req_tx,
            res_rx,
            _pool: pool,
            queued,
            in_flight,
            workers,
        })
    }

    /// Hands a request to the pool without blocking.
    pub fn try_submit(&self, req: GenRequest) -> Result<(), SubmitError> {
        self.queued.fetch_add(1, Ordering::Relaxed);
        match self.req_tx.try_send(req) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.queued.fetch_sub(1, Ordering::Relaxed);
                Err(match e {
                    TrySendError::Full(r) => SubmitError::Full(r),
                    TrySendError::Disconnected(r) => SubmitError::Disconnected(r),
                })
            }
        }
    }

    pub fn drain_results(&self) -> Vec<GenResponse> {
        self.res_rx.try_iter().collect()
    }

    /// Blocks up to `timeout` for the next response.
    pub fn recv_result_timeout(&self, timeout: Duration) -> Option<GenResponse> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn capacity(&self) -> usize {
        self.workers * REQUEST_SLOTS_PER_WORKER
    }

    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_messages() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }

    #[test]
    fn submit_error_returns_request() {
        let req = GenRequest {
            coord: ChunkCoord::new(3, -1),
            job_id: 9,
        };
        assert_eq!(SubmitError::Full(req).into_request(), req);
    }
}
