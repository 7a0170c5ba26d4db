use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};
use tracing::info;

use super::view::View;

// Key config, all in one place
const KEY_PREV_FOCUS: Key = Key::Q;
const KEY_NEXT_FOCUS: Key = Key::E;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_RESTART: Key = Key::R;

pub struct Controller {
    // Simulated seconds per wall-clock second. Always positive.
    time_scale: f64,
    last_frame: Instant,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            time_scale: 1.0,
            last_frame: Instant::now(),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, view: &mut View) {
        match event.value {
            WindowEvent::Key(KEY_NEXT_FOCUS, Action::Press, _) => {
                view.camera_focus_next();
            }
            WindowEvent::Key(KEY_PREV_FOCUS, Action::Press, _) => {
                view.camera_focus_prev();
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.time_scale *= 2.0;
                info!("Time scale is {}x", self.time_scale);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.time_scale /= 2.0;
                info!("Time scale is {}x", self.time_scale);
            }
            WindowEvent::Key(KEY_RESTART, Action::Press, _) => {
                view.restart_clock();
            }
            _ => {}
        }
    }

    /// Simulated seconds that passed since the last call.
    pub fn frame_time(&mut self) -> f64 {
        let now = Instant::now();
        let real_seconds = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        real_seconds * self.time_scale
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
