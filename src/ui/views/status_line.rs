//! Terminal reporter: one live line per stage.
//!
//! With animation a gradient pulse sweeps in front of the header until the
//! stage stops; without it only the final line is printed.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use appbuild::{Reporter, StageResult};
use tokio::task::JoinHandle;

use crate::ui::context::UiContext;
use crate::ui::live_region::LiveRegion;
use crate::ui::views::stage::{render_stage_line, render_warning};
use crate::ui::widgets::pulse::Pulse;

const FRAME: Duration = Duration::from_millis(80);

#[derive(Default)]
struct LineState {
    region: LiveRegion,
    pulse: Option<Pulse>,
    ticker: Option<JoinHandle<()>>,
}

pub struct StatusLine {
    ctx: UiContext,
    state: Arc<Mutex<LineState>>,
}

impl StatusLine {
    pub fn new(ctx: UiContext) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(LineState::default())),
        }
    }

    fn spawn_ticker(&self) -> Option<JoinHandle<()>> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let state = Arc::clone(&self.state);
        let ctx = self.ctx;

        Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(FRAME);
            loop {
                interval.tick().await;
                let mut guard = lock(&state);
                if let Some(pulse) = guard.pulse.as_mut() {
                    pulse.tick();
                }
                redraw(&mut guard, ctx);
            }
        }))
    }
}

impl Reporter for StatusLine {
    fn start(&self, header: &str) {
        if !self.ctx.animation {
            return;
        }
        let ticker = self.spawn_ticker();
        let mut state = lock(&self.state);
        let width = usize::from(self.ctx.caps.width / 6).clamp(8, 24);
        state.pulse = Some(Pulse::new(header).with_width(width));
        if let Some(previous) = std::mem::replace(&mut state.ticker, ticker) {
            previous.abort();
        }
        redraw(&mut state, self.ctx);
    }

    fn update(&self, message: &str) {
        let mut state = lock(&self.state);
        if let Some(pulse) = state.pulse.as_mut() {
            pulse.set_message(message);
        }
        redraw(&mut state, self.ctx);
    }

    fn stop(&self, header: &str, result: &StageResult) {
        let mut state = lock(&self.state);
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
        state.pulse = None;

        let line = render_stage_line(header, result, self.ctx.verbose, self.ctx.color);
        let mut out = io::stdout().lock();
        // a closed stdout leaves nothing to report to
        let _ = state.region.finish(&mut out, &line);
    }

    fn warn(&self, message: &str) {
        let mut state = lock(&self.state);
        if state.region.is_drawn() {
            let _ = state.region.clear(&mut io::stdout().lock());
        }
        let _ = writeln!(
            io::stderr(),
            "{}",
            render_warning(message, self.ctx.color, self.ctx.unicode)
        );
        redraw(&mut state, self.ctx);
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
    }
}

fn lock(state: &Mutex<LineState>) -> MutexGuard<'_, LineState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn redraw(state: &mut LineState, ctx: UiContext) {
    let Some(pulse) = state.pulse.as_ref() else {
        return;
    };
    let content = pulse.render(ctx.color, ctx.unicode);
    let mut out = io::stdout().lock();
    let _ = state.region.update(&mut out, &content);
}
