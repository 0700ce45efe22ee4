//! Looping typewriter headline.
//!
//! [`Typewriter`] is the pure two-phase state machine; [`TypewriterLoop`] drives
//! it through a [`Scheduler`] so that exactly one tick is ever pending.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::TypingConfig;
use crate::scheduler::{Scheduler, TimerId};
use crate::surface::TextTarget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

/// Result of one [`Typewriter::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// New text to display; `None` on pause ticks.
    pub text: Option<String>,
    pub next_delay_ms: u32,
}

pub struct Typewriter {
    chars: Vec<char>,
    index: usize,
    phase: Phase,
    cfg: TypingConfig,
}

impl Typewriter {
    pub fn new(cfg: TypingConfig) -> Self {
        Self { chars: cfg.text.chars().collect(), index: 0, phase: Phase::Typing, cfg }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.phase = Phase::Typing;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cursor position, in chars.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn full_text(&self) -> &str {
        &self.cfg.text
    }

    fn visible(&self) -> String {
        self.chars[..self.index].iter().collect()
    }

    pub fn advance(&mut self) -> Step {
        match self.phase {
            Phase::Typing if self.index < self.chars.len() => {
                self.index += 1;
                Step { text: Some(self.visible()), next_delay_ms: self.cfg.type_speed_ms }
            }
            Phase::Typing => {
                self.phase = Phase::Deleting;
                Step { text: None, next_delay_ms: self.cfg.pause_after_type_ms }
            }
            Phase::Deleting if self.index > 0 => {
                self.index -= 1;
                Step { text: Some(self.visible()), next_delay_ms: self.cfg.delete_speed_ms }
            }
            Phase::Deleting => {
                self.phase = Phase::Typing;
                Step { text: None, next_delay_ms: self.cfg.pause_after_delete_ms }
            }
        }
    }
}

struct LoopState {
    machine: Typewriter,
    pending: Option<TimerId>,
}

/// Self-rescheduling driver around [`Typewriter`].
pub struct TypewriterLoop {
    state: Rc<RefCell<LoopState>>,
    target: Option<Rc<dyn TextTarget>>,
    scheduler: Rc<dyn Scheduler>,
    reduced_motion: bool,
}

impl TypewriterLoop {
    /// `reduced_motion` is sampled here once; later preference changes are ignored.
    pub fn new(
        cfg: TypingConfig,
        target: Option<Rc<dyn TextTarget>>,
        scheduler: Rc<dyn Scheduler>,
        reduced_motion: bool,
    ) -> Self {
        let state = LoopState { machine: Typewriter::new(cfg), pending: None };
        Self { state: Rc::new(RefCell::new(state)), target, scheduler, reduced_motion }
    }

    pub fn start(&self) {
        let Some(target) = self.target.clone() else {
            log::warn!("typewriter has no text element, not starting");
            return;
        };
        self.stop();

        if self.reduced_motion {
            let state = self.state.borrow();
            target.set_text(state.machine.full_text());
            target.hide_cursor();
            log::debug!("reduced motion: typewriter rendered statically");
            return;
        }

        self.state.borrow_mut().machine.reset();
        target.set_text("");
        tick(&self.state, &target, &self.scheduler);
    }

    pub fn stop(&self) {
        if let Some(id) = self.state.borrow_mut().pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }

    /// True while a tick is pending.
    pub fn is_running(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().machine.phase()
    }
}

impl Drop for TypewriterLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick(state: &Rc<RefCell<LoopState>>, target: &Rc<dyn TextTarget>, scheduler: &Rc<dyn Scheduler>) {
    let step = state.borrow_mut().machine.advance();
    if let Some(text) = &step.text {
        target.set_text(text);
    }

    let (s, t, sch) = (state.clone(), target.clone(), scheduler.clone());
    let pending = scheduler.set_timeout(
        step.next_delay_ms,
        Box::new(move || {
            s.borrow_mut().pending = None;
            tick(&s, &t, &sch);
        }),
    );
    if pending.is_none() {
        log::warn!("typewriter tick could not be scheduled, loop stopped");
    }
    state.borrow_mut().pending = pending;
}
