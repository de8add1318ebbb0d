//! Hero carousel: slide index arithmetic plus the auto-advance timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::page::lock;

/// Current slide of a carousel with a fixed slide count.
///
/// All moves wrap modulo the slide count; an empty carousel never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    current: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.step(-1)
    }

    /// Jump to `index`, wrapping out-of-range values (negative included).
    pub fn show(&mut self, index: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = index.rem_euclid(self.len as isize) as usize;
        Some(self.current)
    }

    fn step(&mut self, delta: isize) -> Option<usize> {
        self.show(self.current as isize + delta)
    }
}

/// Receives slide changes.
pub trait SlideView: Send {
    /// Activate slide `index` and update the `index + 1 / total` counter.
    fn show_slide(&mut self, index: usize, total: usize);
}

struct SliderState<V> {
    carousel: Carousel,
    view: V,
}

impl<V: SlideView> SliderState<V> {
    fn apply(&mut self, moved: Option<usize>) {
        if let Some(index) = moved {
            self.view.show_slide(index, self.carousel.len());
        }
    }
}

/// A carousel driving a [`SlideView`], auto-advancing on a fixed interval.
///
/// The timer is a tokio task; hovering stops it and leaving restarts it.
/// Dropping the slider stops the timer.
pub struct Slider<V> {
    state: Arc<Mutex<SliderState<V>>>,
    interval: Duration,
    timer: Option<JoinHandle<()>>,
}

impl<V: SlideView + 'static> Slider<V> {
    pub fn new(view: V, interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SliderState {
                carousel: Carousel::default(),
                view,
            })),
            interval,
            timer: None,
        }
    }

    /// (Re)initialize for `len` slides. Any previous timer is stopped first.
    pub fn init(&mut self, len: usize) {
        self.stop();
        {
            let mut state = lock(&self.state);
            state.carousel = Carousel::new(len);
            let moved = state.carousel.show(0);
            state.apply(moved);
        }
        self.start();
    }

    pub fn current(&self) -> usize {
        lock(&self.state).carousel.current()
    }

    pub fn next(&self) {
        let mut state = lock(&self.state);
        let moved = state.carousel.next();
        state.apply(moved);
    }

    pub fn prev(&self) {
        let mut state = lock(&self.state);
        let moved = state.carousel.prev();
        state.apply(moved);
    }

    pub fn show(&self, index: isize) {
        let mut state = lock(&self.state);
        let moved = state.carousel.show(index);
        state.apply(moved);
    }

    pub fn pointer_enter(&mut self) {
        self.stop();
    }

    pub fn pointer_leave(&mut self) {
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn with_view<T>(&self, f: impl FnOnce(&V) -> T) -> T {
        f(&lock(&self.state).view)
    }

    fn start(&mut self) {
        if self.timer.is_some() || lock(&self.state).carousel.is_empty() {
            return;
        }
        let state = Arc::clone(&self.state);
        let period = self.interval;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut guard = lock(&state);
                let moved = guard.carousel.next();
                guard.apply(moved);
            }
        }));
        tracing::debug!(interval_secs = period.as_secs(), "Carousel timer started");
    }

    fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::debug!("Carousel timer stopped");
        }
    }
}

impl<V> Drop for Slider<V> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
