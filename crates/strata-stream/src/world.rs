use std::time::{Duration, Instant};

use hashbrown::HashMap;
use strata_blocks::BlockType;
use strata_geom::Vec3;
use strata_mesh_cpu::{ChunkMesher, ColorCacheStats, NeighborVolumes};
use strata_runtime::{ChunkGenerator, GenRequest, GenResponse, Runtime, SubmitError};
use strata_world::{CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord, Terrain, WATER_LEVEL};

use crate::StreamError;
use crate::budget::FrameBudget;
use crate::config::StreamConfig;
use crate::load_queue::LoadQueue;
use crate::sink::RenderSink;
use crate::store::{ChunkState, ChunkStore};

/// What one streaming tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub center: ChunkCoord,
    pub received: usize,
    pub stale: usize,
    pub failed: usize,
    pub enqueued: usize,
    pub dispatched: usize,
    pub meshed: usize,
    pub evicted: usize,
    pub queued: usize,
    pub in_flight: usize,
    pub resident: usize,
    pub elapsed: Duration,
    /// Work remains; the caller should tick again soon.
    pub pending: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// Estimated from the terrain because the chunk is not resident yet.
    pub provisional: bool,
}

/// Owns every piece of streaming state and drives it one tick at a time
/// from a single thread. Only generation runs elsewhere.
pub struct World {
    terrain: Terrain,
    runtime: Runtime,
    store: ChunkStore,
    queue: LoadQueue,
    budget: FrameBudget,
    mesher: ChunkMesher,
    inflight: HashMap<ChunkCoord, u64>,
    next_job_id: u64,
    config: StreamConfig,
}

impl World {
    pub fn new(terrain: Terrain, config: StreamConfig) -> Result<Self, StreamError> {
        Self::with_generator(terrain.clone(), terrain, config)
    }

    /// Like [`World::new`] but generation goes through `generator`.
    /// `terrain` still answers spawn estimates.
    pub fn with_generator<G>(
        terrain: Terrain,
        generator: G,
        config: StreamConfig,
    ) -> Result<Self, StreamError>
    where
        G: ChunkGenerator + Clone,
    {
        if config.render_distance < 0 {
            return Err(StreamError::RenderDistance(config.render_distance));
        }
        if config.budget.floor_ms > config.budget.ceiling_ms {
            return Err(StreamError::Budget {
                floor_ms: config.budget.floor_ms,
                ceiling_ms: config.budget.ceiling_ms,
            });
        }
        let runtime = Runtime::new(generator, config.workers)?;
        log::info!(
            target: "stream",
            "streaming seed {} at render distance {} with {} workers",
            terrain.seed(),
            config.render_distance,
            runtime.worker_count()
        );
        Ok(Self {
            terrain,
            runtime,
            store: ChunkStore::new(),
            queue: LoadQueue::new(ChunkCoord::default(), config.keep_distance()),
            budget: FrameBudget::new(&config.budget),
            mesher: ChunkMesher::new(),
            inflight: HashMap::new(),
            next_job_id: 1,
            config,
        })
    }

    /// One scheduling step for the viewpoint at `viewpoint`.
    pub fn update_streaming(&mut self, viewpoint: Vec3, sink: &mut dyn RenderSink) -> TickReport {
        let started = Instant::now();
        let mut report = TickReport::default();

        for resp in self.runtime.drain_results() {
            self.accept_response(resp, &mut report);
        }

        let center = ChunkCoord::from_world_pos(viewpoint);
        let dropped = self.queue.recenter(center);
        if dropped > 0 {
            log::debug!(target: "stream", "recentered on {center}, dropped {dropped} queued");
        }
        report.center = center;

        let r = self.config.render_distance;
        for dz in -r..=r {
            for dx in -r..=r {
                if self.enqueue(center.offset(dx, dz)) {
                    report.enqueued += 1;
                }
            }
        }

        report.dispatched = self.dispatch(started);
        report.meshed = self.remesh(center, sink);
        report.evicted = self.evict(center, sink);

        report.elapsed = started.elapsed();
        self.budget.record(report.elapsed);

        report.queued = self.queue.len();
        report.in_flight = self.inflight.len();
        report.resident = self.store.len();
        report.pending = !self.is_idle();
        if report.received + report.dispatched + report.meshed + report.evicted > 0 {
            log::debug!(
                target: "stream",
                "tick at {}: recv {} stale {} failed {} dispatched {} meshed {} evicted {} queued {} in-flight {} resident {} ({:?})",
                center,
                report.received,
                report.stale,
                report.failed,
                report.dispatched,
                report.meshed,
                report.evicted,
                report.queued,
                report.in_flight,
                report.resident,
                report.elapsed
            );
        }
        report
    }

    fn accept_response(&mut self, resp: GenResponse, report: &mut TickReport) {
        report.received += 1;
        let GenResponse {
            coord,
            job_id,
            outcome,
            t_gen_ms,
        } = resp;
        if self.inflight.get(&coord) != Some(&job_id) {
            report.stale += 1;
            log::debug!(target: "stream", "discarding stale response for {coord} (job {job_id})");
            return;
        }
        self.inflight.remove(&coord);
        match outcome {
            Ok(buf) if buf.coord == coord => {
                if self.store.contains(coord) {
                    report.stale += 1;
                    log::debug!(target: "stream", "discarding duplicate volume for {coord}");
                    return;
                }
                log::trace!(target: "stream", "chunk {coord} generated in {t_gen_ms}ms");
                self.store.put(buf);
                self.store.mark_neighbors_dirty(coord);
            }
            Ok(buf) => {
                report.failed += 1;
                log::warn!(target: "stream", "job for {coord} returned volume for {}", buf.coord);
                self.store.set_state(coord, ChunkState::Unrequested);
            }
            Err(e) => {
                report.failed += 1;
                log::warn!(target: "stream", "generation of {coord} failed, will retry: {e}");
                self.store.set_state(coord, ChunkState::Unrequested);
            }
        }
    }

    fn dispatch(&mut self, started: Instant) -> usize {
        let mut dispatched = 0;
        while dispatched < self.config.max_dispatch_per_tick && !self.budget.exhausted(started) {
            let Some(coord) = self.queue.peek() else {
                break;
            };
            if self.store.state(coord) != ChunkState::Unrequested {
                self.queue.pop();
                continue;
            }
            let job_id = self.next_job_id;
            match self.runtime.try_submit(GenRequest { coord, job_id }) {
                Ok(()) => {
                    self.next_job_id += 1;
                    self.queue.pop();
                    self.inflight.insert(coord, job_id);
                    self.store.set_state(coord, ChunkState::Loading);
                    dispatched += 1;
                }
                Err(SubmitError::Full(_)) => break,
                Err(e @ SubmitError::Disconnected(_)) => {
                    log::warn!(target: "stream", "cannot dispatch {coord}: {e}");
                    break;
                }
            }
        }
        dispatched
    }

    fn remesh(&mut self, center: ChunkCoord, sink: &mut dyn RenderSink) -> usize {
        let mut dirty = self.store.take_dirty();
        dirty.sort_by_key(|&c| (c.distance_sq(center), c));
        let limit = self.config.max_meshes_per_tick.min(dirty.len());
        for &coord in &dirty[limit..] {
            self.store.mark_dirty(coord);
        }
        let mut meshed = 0;
        for &coord in &dirty[..limit] {
            let Some(buf) = self.store.get(coord) else {
                continue;
            };
            let store = &self.store;
            let neighbors = NeighborVolumes::from_fn(|dx, dz| store.get(coord.offset(dx, dz)));
            let mesh = self.mesher.build(buf, &neighbors);
            sink.upload(mesh);
            self.store.set_state(coord, ChunkState::Meshed);
            meshed += 1;
        }
        meshed
    }

    fn evict(&mut self, center: ChunkCoord, sink: &mut dyn RenderSink) -> usize {
        let keep = self.config.keep_distance();
        let far: Vec<ChunkCoord> = self
            .store
            .coords()
            .filter(|c| c.chebyshev(center) > keep)
            .collect();
        for &coord in &far {
            if self.store.state(coord) == ChunkState::Meshed {
                sink.release(coord);
            }
            self.store.remove(coord);
            self.mesher.forget(coord);
        }
        // Abandoned requests: the worker's answer is dropped on arrival.
        let abandoned: Vec<ChunkCoord> = self
            .inflight
            .keys()
            .copied()
            .filter(|c| c.chebyshev(center) > keep)
            .collect();
        for coord in abandoned {
            self.inflight.remove(&coord);
            self.store.set_state(coord, ChunkState::Unrequested);
        }
        if !far.is_empty() {
            log::debug!(target: "stream", "evicted {} chunks around {center}", far.len());
        }
        far.len()
    }

    /// Queues `coord` for generation. False if it is already queued,
    /// loading or resident, or outside the queue bound.
    pub fn enqueue(&mut self, coord: ChunkCoord) -> bool {
        if self.store.state(coord) != ChunkState::Unrequested {
            return false;
        }
        self.queue.enqueue(coord)
    }

    /// Block at a world position. Unloaded chunks read as air and get queued.
    pub fn get_block(&mut self, wx: i32, wy: i32, wz: i32) -> BlockType {
        if wy < 0 || wy >= CHUNK_HEIGHT as i32 {
            return BlockType::Air;
        }
        let coord = ChunkCoord::from_world(wx, wz);
        if !self.store.contains(coord) {
            self.enqueue(coord);
            return BlockType::Air;
        }
        self.store.block_at(wx, wy, wz)
    }

    /// Read-only lookup; never queues anything.
    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> BlockType {
        self.store.block_at(wx, wy, wz)
    }

    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, b: BlockType) -> bool {
        self.store.set_block(wx, wy, wz, b)
    }

    /// Standing position above the center column of `coord`.
    pub fn find_spawn_point(&mut self, coord: ChunkCoord) -> SpawnPoint {
        let half = CHUNK_SIZE / 2;
        let (ox, oz) = coord.origin();
        let (wx, wz) = (ox + half as i32, oz + half as i32);
        let (top, provisional) = match self.store.get(coord) {
            Some(buf) => (buf.top_non_air_y(half, half).map_or(-1, |y| y as i32), false),
            None => {
                self.enqueue(coord);
                (self.terrain.surface_y(wx, wz), true)
            }
        };
        let y = (top + 2).max(WATER_LEVEL + 2);
        SpawnPoint {
            position: Vec3::new(wx as f32 + 0.5, y as f32, wz as f32 + 0.5),
            provisional,
        }
    }

    #[inline]
    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        self.store.state(coord)
    }

    /// Nothing queued, in flight, or waiting for a mesh.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.inflight.is_empty() && self.store.dirty_count() == 0
    }

    #[inline]
    pub fn resident_count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    #[inline]
    pub fn queue(&self) -> &LoadQueue {
        &self.queue
    }

    #[inline]
    pub fn budget(&self) -> &FrameBudget {
        &self.budget
    }

    #[inline]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    #[inline]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.runtime.worker_count()
    }

    pub fn color_cache_stats(&self) -> ColorCacheStats {
        self.mesher.cache_stats()
    }
}
