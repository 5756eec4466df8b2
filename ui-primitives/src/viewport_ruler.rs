use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::scheduler::{Scheduler, Task, TaskId};
use crate::{ScrollPosition, Surface, SurfaceSignal, ViewportRect, ViewportSize};

/// Throttle window used by [`ViewportRuler::add_default_change_listener`].
pub const DEFAULT_THROTTLE_MS: u64 = 20;

/// A listener registered with [`ViewportRuler::add_change_listener`].
///
/// The argument is the last signal of the coalesced burst.
pub type ChangeCallback = Rc<dyn Fn(SurfaceSignal)>;

/// Configuration for [`ViewportRuler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulerOptions {
    /// Throttle window for listeners registered without an explicit one.
    pub throttle_ms: u64,
}

impl Default for RulerOptions {
    fn default() -> Self {
        Self {
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

impl RulerOptions {
    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }
}

struct Registration {
    id: u64,
    throttle_ms: u64,
    callback: ChangeCallback,
    pending: Option<TaskId>,
    last_signal: Option<SurfaceSignal>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl Registry {
    fn get_mut(&mut self, id: u64) -> Option<&mut Registration> {
        self.registrations.iter_mut().find(|r| r.id == id)
    }

    fn contains(&self, id: u64) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    fn remove(&mut self, id: u64) -> Option<Registration> {
        let pos = self.registrations.iter().position(|r| r.id == id)?;
        Some(self.registrations.remove(pos))
    }
}

/// Measures the visible viewport and delivers throttled resize/orientation notifications.
///
/// The ruler does not listen to anything by itself: the adapter owns the single surface listener
/// and forwards every `resize`/`orientationchange` event to [`ViewportRuler::handle_signal`].
///
/// Cloning is cheap and yields a handle to the same set of listeners.
#[derive(Clone)]
pub struct ViewportRuler {
    surface: Rc<dyn Surface>,
    scheduler: Rc<dyn Scheduler>,
    options: RulerOptions,
    registry: Rc<RefCell<Registry>>,
}

impl ViewportRuler {
    pub fn new(surface: Rc<dyn Surface>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_options(surface, scheduler, RulerOptions::default())
    }

    pub fn with_options(
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
        options: RulerOptions,
    ) -> Self {
        Self {
            surface,
            scheduler,
            options,
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    pub fn options(&self) -> &RulerOptions {
        &self.options
    }

    pub fn surface(&self) -> &Rc<dyn Surface> {
        &self.surface
    }

    /// Returns the visible viewport size, or `(0, 0)` when there is no surface.
    pub fn viewport_size(&self) -> ViewportSize {
        if !self.surface.is_available() {
            return ViewportSize::ZERO;
        }
        let size = self.surface.viewport_size();
        ViewportSize::new(
            crate::types::non_negative(size.width),
            crate::types::non_negative(size.height),
        )
    }

    /// Returns the document scroll offset, or `(0, 0)` when there is no surface.
    pub fn viewport_scroll_position(&self) -> ScrollPosition {
        if !self.surface.is_available() {
            return ScrollPosition::ORIGIN;
        }
        let pos = self.surface.scroll_position();
        ScrollPosition::new(pos.top, pos.left)
    }

    /// Returns the viewport bounding box in document coordinates.
    pub fn viewport_rect(&self) -> ViewportRect {
        ViewportRect::from_parts(self.viewport_scroll_position(), self.viewport_size())
    }

    /// Registers `callback` for resize/orientation signals.
    ///
    /// Signals arriving less than `throttle_ms` apart are coalesced into one call, delivered
    /// `throttle_ms` after the last of them (trailing edge). With `throttle_ms == 0` every
    /// signal is delivered synchronously from [`ViewportRuler::handle_signal`].
    pub fn add_change_listener(
        &self,
        callback: impl Fn(SurfaceSignal) + 'static,
        throttle_ms: u64,
    ) -> ChangeSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            throttle_ms,
            callback: Rc::new(callback),
            pending: None,
            last_signal: None,
        });
        pdebug!(id, throttle_ms, "ViewportRuler::add_change_listener");

        ChangeSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
            scheduler: Rc::clone(&self.scheduler),
        }
    }

    /// Same as [`ViewportRuler::add_change_listener`] using [`RulerOptions::throttle_ms`].
    pub fn add_default_change_listener(
        &self,
        callback: impl Fn(SurfaceSignal) + 'static,
    ) -> ChangeSubscription {
        self.add_change_listener(callback, self.options.throttle_ms)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().registrations.len()
    }

    /// Feeds a surface signal to every registered listener.
    pub fn handle_signal(&self, signal: SurfaceSignal) {
        if !self.surface.is_available() {
            return;
        }

        let mut immediate = Vec::new();
        let mut deferred = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            for r in registry.registrations.iter_mut() {
                if r.throttle_ms == 0 {
                    immediate.push((r.id, Rc::clone(&r.callback)));
                } else {
                    r.last_signal = Some(signal);
                    deferred.push((r.id, r.throttle_ms, r.pending.take()));
                }
            }
        }
        ptrace!(
            ?signal,
            immediate = immediate.len(),
            deferred = deferred.len(),
            "ViewportRuler::handle_signal"
        );

        for (id, throttle_ms, previous) in deferred {
            if let Some(previous) = previous {
                self.scheduler.cancel(previous);
            }
            let task = self.scheduler.schedule(throttle_ms, self.delivery_task(id));
            match self.registry.borrow_mut().get_mut(id) {
                Some(r) => r.pending = Some(task),
                None => self.scheduler.cancel(task),
            }
        }

        for (id, callback) in immediate {
            // An earlier callback may have unsubscribed this one.
            if self.registry.borrow().contains(id) {
                callback(signal);
            }
        }
    }

    fn delivery_task(&self, id: u64) -> Task {
        let registry = Rc::downgrade(&self.registry);
        Box::new(move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            let delivery = {
                let mut registry = registry.borrow_mut();
                registry.get_mut(id).and_then(|r| {
                    r.pending = None;
                    r.last_signal
                        .take()
                        .map(|signal| (Rc::clone(&r.callback), signal))
                })
            };
            if let Some((callback, signal)) = delivery {
                ptrace!(id, ?signal, "ViewportRuler: throttled delivery");
                callback(signal);
            }
        })
    }

    /// Removes every listener and cancels every pending delivery.
    pub fn dispose(&self) {
        let removed = core::mem::take(&mut self.registry.borrow_mut().registrations);
        pdebug!(listeners = removed.len(), "ViewportRuler::dispose");
        for r in removed {
            if let Some(task) = r.pending {
                self.scheduler.cancel(task);
            }
        }
    }
}

impl fmt::Debug for ViewportRuler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportRuler")
            .field("options", &self.options)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`ViewportRuler::add_change_listener`].
///
/// Dropping the handle does not unsubscribe.
pub struct ChangeSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
    scheduler: Rc<dyn Scheduler>,
}

impl ChangeSubscription {
    /// Removes the listener and cancels its pending delivery, if any. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry.borrow_mut().remove(self.id);
        if let Some(r) = removed {
            pdebug!(id = self.id, "ChangeSubscription::unsubscribe");
            if let Some(task) = r.pending {
                self.scheduler.cancel(task);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

impl fmt::Debug for ChangeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
