//! Helpers shared by the play loop

use std::time::{Duration, Instant};

/// Frame budget for a target frame rate; zero means unlimited.
pub fn frame_duration(target_fps: u64) -> Duration {
    if target_fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_micros(1_000_000 / target_fps)
    }
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// This function should be called at the end of each game loop iteration.
/// It sleeps for the remaining time if the frame finished early.
///
/// # Arguments
/// * `frame_start` - The `Instant` when the frame began (typically from `Instant::now()`)
/// * `budget` - Target duration of one frame
pub fn limit_frame_rate(frame_start: Instant, budget: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < budget {
        std::thread::sleep(budget - elapsed);
    }
}
