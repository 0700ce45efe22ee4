// Integration tests (native) for the `academy-splash` crate.
// Pages are simulated with recording fakes and a virtual clock so the whole
// activation sequence runs under `cargo test` on the host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use academy_splash::capabilities::DeviceProfile;
use academy_splash::input::{classify, ActivationInput};
use academy_splash::particles::{Lcg, Particle};
use academy_splash::scheduler::{ManualScheduler, Scheduler};
use academy_splash::surface::{ParticleLayer, Screen, TextTarget};
use academy_splash::{SplashConfig, SplashController, SplashView};

#[derive(Default, Debug, Clone, PartialEq)]
struct ScreenState {
    opacity: f32,
    interactive: bool,
    hidden: bool,
}

#[derive(Default)]
struct Page {
    screen1: RefCell<ScreenState>,
    screen2: RefCell<ScreenState>,
    particles1: RefCell<Vec<Particle>>,
    particles2: RefCell<Vec<Particle>>,
    typed: RefCell<String>,
    cursor_hidden: Cell<bool>,
}

struct ScreenHandle(Rc<Page>, bool);
struct LayerHandle(Rc<Page>, bool);
struct TextHandle(Rc<Page>);

impl ScreenHandle {
    fn state(&self) -> &RefCell<ScreenState> {
        if self.1 { &self.0.screen1 } else { &self.0.screen2 }
    }
}

impl Screen for ScreenHandle {
    fn set_opacity(&self, opacity: f32) {
        self.state().borrow_mut().opacity = opacity;
    }
    fn set_interactive(&self, interactive: bool) {
        self.state().borrow_mut().interactive = interactive;
    }
    fn hide(&self) {
        self.state().borrow_mut().hidden = true;
    }
}

impl LayerHandle {
    fn cell(&self) -> &RefCell<Vec<Particle>> {
        if self.1 { &self.0.particles1 } else { &self.0.particles2 }
    }
}

impl ParticleLayer for LayerHandle {
    fn particle_count(&self) -> usize {
        self.cell().borrow().len()
    }
    fn replace_particles(&self, particles: &[Particle]) {
        *self.cell().borrow_mut() = particles.to_vec();
    }
    fn set_opacity(&self, _opacity: f32) {}
}

impl TextTarget for TextHandle {
    fn set_text(&self, text: &str) {
        *self.0.typed.borrow_mut() = text.to_string();
    }
    fn hide_cursor(&self) {
        self.0.cursor_hidden.set(true);
    }
}

struct Harness {
    page: Rc<Page>,
    sched: Rc<ManualScheduler>,
    ctl: SplashController,
}

fn harness(profile: DeviceProfile) -> Harness {
    let page = Rc::new(Page::default());
    page.screen1.borrow_mut().opacity = 1.0;
    page.screen1.borrow_mut().interactive = true;
    let sched = Rc::new(ManualScheduler::new());
    let view = SplashView {
        screen1: Rc::new(ScreenHandle(page.clone(), true)),
        screen2: Rc::new(ScreenHandle(page.clone(), false)),
        particles1: Some(Rc::new(LayerHandle(page.clone(), true))),
        particles2: Some(Rc::new(LayerHandle(page.clone(), false))),
        typed_headline: Some(Rc::new(TextHandle(page.clone()))),
    };
    let scheduler: Rc<dyn Scheduler> = sched.clone();
    let ctl = SplashController::new(SplashConfig::default(), view, scheduler, Box::new(Lcg::new(42)), profile);
    ctl.init();
    Harness { page, sched, ctl }
}

fn press(h: &Harness, input: ActivationInput) {
    if classify(&input).activate {
        h.ctl.activate_screen2();
    }
}

fn snapshot(h: &Harness) -> (ScreenState, ScreenState, usize, String, bool) {
    (
        h.page.screen1.borrow().clone(),
        h.page.screen2.borrow().clone(),
        h.page.particles2.borrow().len(),
        h.page.typed.borrow().clone(),
        h.ctl.typewriter().is_running(),
    )
}

#[test]
fn every_activation_input_reaches_the_same_end_state() {
    let inputs = [
        ActivationInput::Click,
        ActivationInput::TouchStart,
        ActivationInput::Key("Enter".into()),
        ActivationInput::Key(" ".into()),
    ];
    let states: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let h = harness(DeviceProfile::default());
            press(&h, input);
            h.sched.advance(1_050);
            snapshot(&h)
        })
        .collect();

    let (s1, s2, p2, typed, running) = &states[0];
    assert!(s1.hidden);
    assert_eq!(s2.opacity, 1.0);
    assert!(s2.interactive);
    assert_eq!(*p2, 28);
    assert_eq!(typed, "A");
    assert!(running);
    assert!(states.iter().all(|s| s == &states[0]));
}

#[test]
fn other_keys_change_nothing() {
    let h = harness(DeviceProfile::default());
    let before = snapshot(&h);
    for key in ["a", "Escape", "Tab", "ArrowUp"] {
        press(&h, ActivationInput::Key(key.into()));
    }
    h.sched.advance(5_000);
    assert_eq!(snapshot(&h), before);
    assert!(!h.ctl.is_screen2_active());
}

#[test]
fn reduced_motion_shows_full_headline_without_timers() {
    let h = harness(DeviceProfile { reduced_motion: true, device_memory_gb: None });
    press(&h, ActivationInput::Click);
    h.sched.advance(1_050);
    assert_eq!(*h.page.typed.borrow(), "Academy Under Construction");
    assert!(h.page.cursor_hidden.get());
    assert_eq!(h.sched.pending(), 0);
}

#[test]
fn low_memory_device_uses_reduced_counts() {
    let h = harness(DeviceProfile { reduced_motion: false, device_memory_gb: Some(2.0) });
    assert_eq!(h.page.particles1.borrow().len(), 60);
    h.sched.advance(100);
    assert_eq!(h.page.particles1.borrow().len(), 30);
    press(&h, ActivationInput::Click);
    h.sched.advance(800);
    assert_eq!(h.page.particles2.borrow().len(), 15);
}

#[test]
fn normal_memory_device_uses_default_counts() {
    let h = harness(DeviceProfile { reduced_motion: false, device_memory_gb: Some(8.0) });
    h.sched.advance(100);
    assert_eq!(h.page.particles1.borrow().len(), 60);
    press(&h, ActivationInput::Click);
    h.sched.advance(800);
    assert_eq!(h.page.particles2.borrow().len(), 28);
}

#[test]
fn typewriter_keeps_cycling_after_activation() {
    let h = harness(DeviceProfile::default());
    press(&h, ActivationInput::Click);
    h.sched.advance(1_050);

    let full = "Academy Under Construction";
    let mut seen_full = 0;
    let mut seen_empty = 0;
    let mut last = h.page.typed.borrow().clone();
    for _ in 0..400 {
        assert!(h.sched.run_next());
        let now = h.page.typed.borrow().clone();
        if now != last {
            if now == full {
                seen_full += 1;
            }
            if now.is_empty() {
                seen_empty += 1;
            }
            assert!(full.starts_with(&now), "unexpected text {now:?}");
        }
        last = now;
        assert_eq!(h.sched.pending(), 1);
    }
    assert!(seen_full >= 3, "full text seen {seen_full} times");
    assert!(seen_empty >= 3, "empty text seen {seen_empty} times");
}
