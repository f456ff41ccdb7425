use crate::session::Session;
use cubescape_input::InputEvent;
use cubescape_render::Renderer;

/// One scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    pub index: u64,
}

/// Something that decides when the next frame happens.
pub trait TickSource {
    /// `None` ends the run.
    fn next_tick(&mut self) -> Option<FrameTick>;
}

/// Exactly `total` back-to-back ticks.
#[derive(Debug, Clone)]
pub struct FixedTicks {
    total: u64,
    issued: u64,
}

impl FixedTicks {
    pub fn new(total: u64) -> Self {
        Self { total, issued: 0 }
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.issued
    }
}

impl TickSource for FixedTicks {
    fn next_tick(&mut self) -> Option<FrameTick> {
        if self.issued == self.total {
            return None;
        }
        let tick = FrameTick { index: self.issued };
        self.issued += 1;
        Some(tick)
    }
}

/// Converts wall-clock frame time into a whole number of fixed ticks.
///
/// Leftover time carries into the next frame. At most `max_steps` ticks are
/// issued per frame; the remainder is dropped after a long stall.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FixedStep {
    pub fn new(rate_hz: f64, max_steps: u32) -> Self {
        Self {
            step: 1.0 / rate_hz,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Add `dt` seconds and return how many ticks are due.
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_steps {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == self.max_steps && self.accumulator >= self.step {
            tracing::debug!(dropped = self.accumulator, "frame stall; dropping backlog");
            self.accumulator = 0.0;
        }
        due
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(60.0, 5)
    }
}

/// Drives a session from a tick source.
pub struct Scheduler<S> {
    source: S,
}

impl<S: TickSource> Scheduler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run until the source is exhausted. `before_tick` runs ahead of every
    /// tick and may feed input to the session.
    ///
    /// Returns the last rendered output, or `None` if no tick ran.
    pub fn run<R, F>(
        &mut self,
        session: &mut Session,
        renderer: &R,
        mut before_tick: F,
    ) -> Option<R::Output>
    where
        R: Renderer + ?Sized,
        F: FnMut(FrameTick, &mut Session),
    {
        let mut last = None;
        let mut ran = 0u64;
        while let Some(tick) = self.source.next_tick() {
            before_tick(tick, session);
            last = Some(session.tick(renderer));
            ran += 1;
        }
        tracing::debug!(ticks = ran, frame = session.frame(), "scheduler finished");
        last
    }
}

/// Input events keyed by the tick index they are delivered before.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<(u64, InputEvent)>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, tick: u64, event: InputEvent) -> Self {
        self.events.push((tick, event));
        self
    }

    pub fn push(&mut self, tick: u64, event: InputEvent) {
        self.events.push((tick, event));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Deliver every event scheduled for `tick`, in insertion order.
    pub fn feed(&self, tick: FrameTick, session: &mut Session) {
        for (_, event) in self.events.iter().filter(|(at, _)| *at == tick.index) {
            session.handle_input(*event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cubescape_common::MotionConfig;
    use cubescape_input::Key;
    use cubescape_render::DebugTextRenderer;

    #[test]
    fn fixed_ticks_count_up_then_stop() {
        let mut ticks = FixedTicks::new(3);
        let seen: Vec<u64> = std::iter::from_fn(|| ticks.next_tick()).map(|t| t.index).collect();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(ticks.remaining(), 0);
        assert!(ticks.next_tick().is_none());
    }

    #[test]
    fn fixed_step_carries_remainder() {
        let mut clock = FixedStep::new(10.0, 5);
        assert_eq!(clock.advance(0.05), 0);
        assert_eq!(clock.advance(0.06), 1);
        assert_eq!(clock.advance(0.25), 2);
    }

    #[test]
    fn fixed_step_caps_stalls() {
        let mut clock = FixedStep::new(10.0, 3);
        assert_eq!(clock.advance(10.0), 3);
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn zero_ticks_renders_nothing() {
        let mut session = Session::new(MotionConfig::default());
        let renderer = DebugTextRenderer::new();
        let out = Scheduler::new(FixedTicks::new(0)).run(&mut session, &renderer, |_, _| {});
        assert!(out.is_none());
        assert_eq!(session.frame(), 0);
    }

    #[test]
    fn scripted_jump_lands_back_on_the_ground() {
        let mut session = Session::new(MotionConfig::default());
        let script = InputScript::new().at(0, InputEvent::KeyDown(Key::Jump));
        let mut peak = 0.0f32;
        let mut scheduler = Scheduler::new(FixedTicks::new(60));
        scheduler.run(&mut session, &DebugTextRenderer::new(), |tick, s| {
            script.feed(tick, s);
            peak = peak.max(s.player().position.y);
        });
        assert_eq!(session.frame(), 60);
        assert!(session.player().grounded);
        assert_eq!(session.player().position.y, 1.0);
        assert!(peak > 3.0, "peak was {peak}");
    }

    #[test]
    fn scripted_diagonal_covers_speed_root_two() {
        let mut session = Session::new(MotionConfig::default());
        let start = session.player().position;
        let script = InputScript::new()
            .at(0, InputEvent::KeyDown(Key::Forward))
            .at(0, InputEvent::KeyDown(Key::Right))
            .at(1, InputEvent::KeyUp(Key::Forward))
            .at(1, InputEvent::KeyUp(Key::Right));
        assert_eq!(script.len(), 4);
        let out = Scheduler::new(FixedTicks::new(2))
            .run(&mut session, &DebugTextRenderer::new(), |tick, s| script.feed(tick, s))
            .unwrap();
        let moved = (session.player().position - start).length();
        assert_relative_eq!(moved, 0.1 * std::f32::consts::SQRT_2, epsilon = 1e-5);
        assert!(out.contains("objects=0"));
    }
}
