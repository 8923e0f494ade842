use std::sync::Arc;

use crate::{
    foundation::error::{SvgaError, SvgaResult},
    playback::config::{FillMode, PlaybackConfig},
    scene::model::Document,
};

pub type StepCallback = Box<dyn FnMut(i32, f64) + Send>;
pub type EventCallback = Box<dyn FnMut() + Send>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Playing,
    Paused,
    /// Finite loop count exhausted. Only `play` leaves this phase.
    Completed,
}

/// Frame timing state machine driven by an external per-refresh tick.
///
/// `advance_frame` and the query methods never block and never allocate.
pub struct PlaybackState {
    document: Arc<Document>,
    loops: u32,
    fill_mode: FillMode,
    start_frame: i32,
    end_frame: i32,
    current_frame: i32,
    phase: PlaybackPhase,
    completed_loops: u32,
    accumulated_nanos: u64,
    on_step: Option<StepCallback>,
    on_finished: Option<EventCallback>,
    on_repeat: Option<EventCallback>,
    on_pause: Option<EventCallback>,
}

impl std::fmt::Debug for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackState")
            .field("loops", &self.loops)
            .field("fill_mode", &self.fill_mode)
            .field("start_frame", &self.start_frame)
            .field("end_frame", &self.end_frame)
            .field("current_frame", &self.current_frame)
            .field("phase", &self.phase)
            .field("completed_loops", &self.completed_loops)
            .finish_non_exhaustive()
    }
}

impl PlaybackState {
    /// Build a state over `document`. A configured range must fit inside the document's frames.
    pub fn new(document: Arc<Document>, config: PlaybackConfig) -> SvgaResult<Self> {
        let (start_frame, end_frame) = match config.range {
            Some(r) => {
                if document.frame_count > 0 && r.end() >= document.frame_count {
                    return Err(SvgaError::validation(format!(
                        "frame range {}..={} exceeds document frame count {}",
                        r.start(),
                        r.end(),
                        document.frame_count
                    )));
                }
                (r.start(), r.end())
            }
            // Empty documents collapse to a single-frame range at 0.
            None => (0, (document.frame_count - 1).max(0)),
        };

        let mut state = Self {
            document,
            loops: config.loops,
            fill_mode: config.fill_mode,
            start_frame,
            end_frame,
            current_frame: start_frame,
            phase: PlaybackPhase::Idle,
            completed_loops: 0,
            accumulated_nanos: 0,
            on_step: None,
            on_finished: None,
            on_repeat: None,
            on_pause: None,
        };
        if config.auto_play {
            state.play();
        }
        Ok(state)
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn start_frame(&self) -> i32 {
        self.start_frame
    }

    pub fn end_frame(&self) -> i32 {
        self.end_frame
    }

    /// Current frame index; `-1` means the canvas should be cleared.
    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_completed(&self) -> bool {
        self.phase == PlaybackPhase::Completed
    }

    pub fn completed_loops(&self) -> u32 {
        self.completed_loops
    }

    /// Nanoseconds per frame, `None` when the document fps is not positive.
    pub fn frame_duration_nanos(&self) -> Option<u64> {
        u64::try_from(self.document.fps)
            .ok()
            .filter(|&fps| fps > 0)
            .map(|fps| 1_000_000_000 / fps)
    }

    /// Position inside the range in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.current_frame < 0 {
            return 0.0;
        }
        let span = self.end_frame - self.start_frame;
        if span <= 0 {
            return 1.0;
        }
        f64::from(self.current_frame - self.start_frame) / f64::from(span)
    }

    pub fn set_on_step(&mut self, f: impl FnMut(i32, f64) + Send + 'static) {
        self.on_step = Some(Box::new(f));
    }

    pub fn set_on_finished(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_finished = Some(Box::new(f));
    }

    pub fn set_on_repeat(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_repeat = Some(Box::new(f));
    }

    pub fn set_on_pause(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_pause = Some(Box::new(f));
    }

    pub fn play(&mut self) {
        if self.phase == PlaybackPhase::Completed {
            self.completed_loops = 0;
            self.current_frame = self.start_frame;
            self.accumulated_nanos = 0;
        }
        self.phase = PlaybackPhase::Playing;
    }

    pub fn pause(&mut self) {
        if self.phase != PlaybackPhase::Completed {
            self.phase = PlaybackPhase::Paused;
        }
        if let Some(cb) = self.on_pause.as_mut() {
            cb();
        }
    }

    pub fn stop(&mut self) {
        self.phase = PlaybackPhase::Idle;
        self.accumulated_nanos = 0;
        self.completed_loops = 0;
        self.apply_fill_mode();
    }

    /// Jump to `frame`, clamped into the range. Playing or paused status is kept.
    pub fn step_to_frame(&mut self, frame: i32) {
        self.current_frame = frame.clamp(self.start_frame, self.end_frame);
        self.accumulated_nanos = 0;
    }

    /// Jump to a fraction of the range; `p` is clamped to `[0, 1]`.
    pub fn step_to_percentage(&mut self, p: f64) {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let offset = (p * f64::from(self.end_frame - self.start_frame)).floor() as i32;
        self.step_to_frame(self.start_frame + offset);
    }

    /// Accumulate `delta_nanos` of wall time and advance whole frames.
    pub fn advance_frame(&mut self, delta_nanos: u64) {
        if self.phase != PlaybackPhase::Playing {
            return;
        }
        let Some(frame_dur) = self.frame_duration_nanos() else {
            return;
        };

        self.accumulated_nanos = self.accumulated_nanos.saturating_add(delta_nanos);
        while self.accumulated_nanos >= frame_dur && self.phase == PlaybackPhase::Playing {
            self.accumulated_nanos -= frame_dur;

            if self.current_frame >= self.end_frame {
                self.completed_loops = self.completed_loops.saturating_add(1);
                if self.loops > 0 && self.completed_loops >= self.loops {
                    self.apply_fill_mode();
                    self.phase = PlaybackPhase::Completed;
                    self.accumulated_nanos = 0;
                    tracing::debug!(
                        frame = self.current_frame,
                        loops = self.completed_loops,
                        "playback completed"
                    );
                    self.fire_step();
                    if let Some(cb) = self.on_finished.as_mut() {
                        cb();
                    }
                    return;
                }
                self.current_frame = self.start_frame;
                if let Some(cb) = self.on_repeat.as_mut() {
                    cb();
                }
            } else {
                self.current_frame += 1;
            }
            self.fire_step();
        }
    }

    fn fire_step(&mut self) {
        let progress = self.progress();
        let frame = self.current_frame;
        if let Some(cb) = self.on_step.as_mut() {
            cb(frame, progress);
        }
    }

    fn apply_fill_mode(&mut self) {
        self.current_frame = match self.fill_mode {
            FillMode::Forward => self.end_frame,
            FillMode::Backward => self.start_frame,
            FillMode::Clear => -1,
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
