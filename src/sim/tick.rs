//! Driver tick
//!
//! One tick reveals one more point of every active walk. Touches found along
//! the way become spawn commands, which are drained after all walks moved.

use super::state::{EngineState, SpawnCommand, StepEvent};

/// Output of a single tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// One event per walk that advanced, in walk creation order
    pub events: Vec<StepEvent>,
    /// IDs of walks spawned during this tick
    pub spawned: Vec<u32>,
}

/// Advance the engine by one playback step
pub fn tick(state: &mut EngineState) -> TickReport {
    if state.is_finished() {
        return TickReport::default();
    }

    state.time_ticks += 1;

    let mut events = Vec::new();
    for playback in state.playbacks.iter_mut() {
        let Some(event) = playback.advance(&mut state.markers) else {
            continue;
        };
        for &marker in &event.touched {
            if let Some(m) = state.markers.get(marker) {
                state.pending.push_back(SpawnCommand {
                    marker,
                    origin: m.center,
                    parent: event.walk_id,
                });
            }
        }
        events.push(event);
    }

    let spawned = state.process_spawns();
    if !spawned.is_empty() && state.markers.all_touched() {
        log::info!("All {} markers touched", state.markers.len());
    }

    TickReport { events, spawned }
}

/// Tick until every walk has played out. Returns the number of ticks taken.
pub fn run_to_completion(state: &mut EngineState) -> u64 {
    let start = state.time_ticks;
    while !state.is_finished() {
        tick(state);
    }
    let ticks = state.time_ticks - start;
    log::info!(
        "Run finished after {} ticks: {} walks, {}/{} markers touched",
        ticks,
        state.walks_created(),
        state.markers.touched_count(),
        state.markers.len()
    );
    ticks
}
