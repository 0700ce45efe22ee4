//! Screen 1 -> screen 2 transition and startup sequencing.
//!
//! The controller is built once, owns all splash state, and is shared with the
//! input listeners and timer callbacks through an `Rc`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::capabilities::DeviceProfile;
use crate::config::{ParticleBudget, SplashConfig};
use crate::particles::{generate_field, ParticleKind, RandomSource};
use crate::scheduler::Scheduler;
use crate::surface::{ParticleLayer, Screen, TextTarget};
use crate::typewriter::TypewriterLoop;

/// Everything the controller drives on the page.
pub struct SplashView {
    pub screen1: Rc<dyn Screen>,
    pub screen2: Rc<dyn Screen>,
    pub particles1: Option<Rc<dyn ParticleLayer>>,
    pub particles2: Option<Rc<dyn ParticleLayer>>,
    pub typed_headline: Option<Rc<dyn TextTarget>>,
}

struct Inner {
    cfg: SplashConfig,
    view: SplashView,
    scheduler: Rc<dyn Scheduler>,
    rng: RefCell<Box<dyn RandomSource>>,
    profile: DeviceProfile,
    typewriter: TypewriterLoop,
    budget: Cell<ParticleBudget>,
    screen2_active: Cell<bool>,
}

#[derive(Clone)]
pub struct SplashController {
    inner: Rc<Inner>,
}

impl SplashController {
    pub fn new(
        cfg: SplashConfig,
        view: SplashView,
        scheduler: Rc<dyn Scheduler>,
        rng: Box<dyn RandomSource>,
        profile: DeviceProfile,
    ) -> Self {
        let typewriter = TypewriterLoop::new(
            cfg.typing.clone(),
            view.typed_headline.clone(),
            scheduler.clone(),
            profile.reduced_motion,
        );
        let inner = Inner {
            budget: Cell::new(cfg.particles),
            cfg,
            view,
            scheduler,
            rng: RefCell::new(rng),
            profile,
            typewriter,
            screen2_active: Cell::new(false),
        };
        Self { inner: Rc::new(inner) }
    }

    /// Initial page state: screen 2 inert, screen 1 particles, and the one-shot
    /// low-memory adaptation if the device qualifies.
    pub fn init(&self) {
        let inner = &self.inner;
        inner.view.screen2.set_interactive(false);
        self.generate_screen1(inner.budget.get().screen1);

        if inner.profile.is_low_memory(inner.cfg.low_memory_threshold_gb) {
            log::info!(
                "low-memory device ({:?} GB), reducing particles in {} ms",
                inner.profile.device_memory_gb,
                inner.cfg.low_memory_delay_ms
            );
            let this = self.clone();
            inner
                .scheduler
                .set_timeout(inner.cfg.low_memory_delay_ms, Box::new(move || this.apply_low_memory()));
        }
    }

    fn apply_low_memory(&self) {
        let reduced = self.inner.cfg.low_memory_particles;
        self.inner.budget.set(reduced);
        self.generate_screen1(reduced.screen1);
        log::debug!("particle budget now {reduced:?}");
    }

    fn generate_screen1(&self, count: usize) {
        let mut rng = self.inner.rng.borrow_mut();
        generate_field(self.inner.view.particles1.as_deref(), ParticleKind::Dot, count, &mut **rng);
    }

    /// Populate screen 2 particles once; a non-empty layer is left alone.
    fn generate_screen2(&self) {
        let Some(layer) = self.inner.view.particles2.as_deref() else { return };
        if layer.particle_count() > 0 {
            return;
        }
        let count = self.inner.budget.get().screen2;
        let mut rng = self.inner.rng.borrow_mut();
        generate_field(Some(layer), ParticleKind::Bar, count, &mut **rng);
    }

    /// One-way switch to screen 2. Repeated calls are absorbed.
    pub fn activate_screen2(&self) {
        let inner = &self.inner;
        if inner.screen2_active.replace(true) {
            log::debug!("screen 2 already active, ignoring activation");
            return;
        }
        log::info!("activating screen 2");

        inner.view.screen1.set_opacity(0.0);
        inner.view.screen1.set_interactive(false);

        let this = self.clone();
        inner
            .scheduler
            .set_timeout(inner.cfg.screen1_fade_ms, Box::new(move || this.reveal_screen2()));
    }

    fn reveal_screen2(&self) {
        let inner = &self.inner;
        inner.view.screen1.hide();

        self.generate_screen2();
        if let Some(layer) = &inner.view.particles2 {
            layer.set_opacity(1.0);
        }

        inner.view.screen2.set_opacity(1.0);
        inner.view.screen2.set_interactive(true);

        let this = self.clone();
        inner.scheduler.set_timeout(
            inner.cfg.screen2_fade_delay_ms,
            Box::new(move || this.inner.typewriter.start()),
        );
    }

    pub fn is_screen2_active(&self) -> bool {
        self.inner.screen2_active.get()
    }

    /// Counts used for the next particle generation on each screen.
    pub fn particle_budget(&self) -> ParticleBudget {
        self.inner.budget.get()
    }

    pub fn typewriter(&self) -> &TypewriterLoop {
        &self.inner.typewriter
    }
}
