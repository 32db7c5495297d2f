use std::time::Instant;

/// Longest step handed to animations, so a stalled frame doesn't skip a whole transition
pub const MAX_FRAME_DELTA: f32 = 0.1;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

/// Per-redraw timing: clamped delta, elapsed time and a smoothed FPS readout
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    fps: f32,
    fps_frames: u32,
    fps_timer: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            fps: 0.0,
            fps_frames: 0,
            fps_timer: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let raw_delta = now.saturating_duration_since(self.last_frame_time).as_secs_f32();
        let time = now.saturating_duration_since(self.start_time).as_secs_f32();

        self.fps_frames += 1;
        self.fps_timer += raw_delta;
        if self.fps_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.fps_frames as f32 / self.fps_timer;
            log::trace!("FPS: {:.1}", self.fps);
            self.fps_frames = 0;
            self.fps_timer = 0.0;
        }

        let info = FrameInfo {
            number: self.frame_number,
            time,
            delta: raw_delta.min(MAX_FRAME_DELTA),
        };

        self.frame_number += 1;
        self.last_frame_time = now;
        info
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
