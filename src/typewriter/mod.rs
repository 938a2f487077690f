pub mod debounce;
pub mod focus;
pub mod observed;

pub use debounce::Debounced;
pub use focus::{BlockKind, CaretSnapshot, DomNode};
pub use observed::ObservedEditors;

use crate::config::TypewriterConfig;
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

/// A scroll attempt failed because the host document no longer contains
/// the target (detached element, torn-down pane, ...).
#[derive(Debug, Error)]
#[error("scroll target unavailable: {0}")]
pub struct ScrollError(pub String);

/// What the controller needs from the host editor runtime.
///
/// Surfaces are opaque and shared via `Rc`; the controller only keeps weak
/// references to them.
pub trait TypewriterHost {
    /// One pane/document view of the host's block editor.
    type Surface;
    /// A node in the host's document tree.
    type Node: DomNode;

    /// All editor surfaces currently open.
    fn open_editors(&self) -> Vec<Rc<Self::Surface>>;

    /// Attach the capture-phase key-up listener to a surface.
    fn attach_keyup(&self, surface: &Self::Surface);

    /// Detach the key-up listener from a surface.
    fn detach_keyup(&self, surface: &Self::Surface);

    /// Snapshot of the caret: nearest block, its kind, selection focus.
    /// `None` when the caret is not inside any tracked editor.
    fn caret(&self) -> Option<CaretSnapshot<Self::Node>>;

    /// Smooth-scroll the target to the center of the viewport.
    fn scroll_into_view(&self, target: &Self::Node) -> Result<(), ScrollError>;
}

/// Host-emitted editor lifecycle events routed to the controller.
#[derive(Debug)]
pub enum EditorEvent<S> {
    /// A new editor surface finished loading.
    Loaded(Rc<S>),
    /// An editor surface was torn down.
    Destroyed(Rc<S>),
    /// The user clicked inside editor content; treated like a keystroke
    /// since both move the caret.
    ContentClicked,
}

/// The typewriter controller: keeps the caret centered by scrolling the
/// current focus target into view, debounced across input bursts.
///
/// Call `enable` on plugin load and `disable` on unload; feed it lifecycle
/// events and key-up notifications, and `tick` it from the host's frame
/// loop so pending scrolls can fire.
pub struct Typewriter<H: TypewriterHost> {
    host: H,
    config: TypewriterConfig,
    /// Whether lifecycle events are being consumed (Enabled state).
    enabled: bool,
    /// Surfaces currently wired with the key-up listener.
    observed: ObservedEditors<H::Surface>,
    /// Where the user currently is. Scrolling happens only when this
    /// changes identity.
    current: Option<H::Node>,
    /// The debounced scroll action.
    scroll: Debounced<H::Node>,
}

impl<H: TypewriterHost> Typewriter<H> {
    pub fn new(host: H, config: TypewriterConfig) -> Self {
        let scroll = Debounced::new(config.timeout());
        Self {
            host,
            config,
            enabled: false,
            observed: ObservedEditors::new(),
            current: None,
            scroll,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of surfaces currently wired with the key-up listener.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Activate the controller: wire every open editor (when the master
    /// switch is on) and start consuming lifecycle events.
    pub fn enable(&mut self) {
        if self.config.enable {
            for editor in self.host.open_editors() {
                self.attach(&editor);
            }
        }
        self.enabled = true;
    }

    /// Deactivate the controller: unwire every tracked surface, stop
    /// consuming lifecycle events, drop any pending scroll.
    pub fn disable(&mut self) {
        for editor in self.observed.drain() {
            self.host.detach_keyup(&editor);
        }
        self.enabled = false;
        self.scroll.cancel();
        self.current = None;
    }

    /// Replace the configuration wholesale. The debounce delay is
    /// recomputed and listener attachment re-run for the new master switch.
    pub fn update_config(&mut self, config: TypewriterConfig) {
        self.config = config;
        self.scroll.set_delay(self.config.timeout());

        if self.enabled {
            if self.config.enable {
                for editor in self.host.open_editors() {
                    self.attach(&editor);
                }
            } else {
                for editor in self.observed.drain() {
                    self.host.detach_keyup(&editor);
                }
                self.scroll.cancel();
                self.current = None;
            }
        }
    }

    /// Route a host lifecycle event. Ignored while disabled.
    pub fn handle_event(&mut self, event: EditorEvent<H::Surface>) {
        if !self.enabled {
            return;
        }
        match event {
            EditorEvent::Loaded(surface) => {
                if self.config.enable {
                    self.attach(&surface);
                }
            }
            EditorEvent::Destroyed(surface) => {
                self.detach(&surface);
            }
            EditorEvent::ContentClicked => {
                if self.config.enable {
                    self.on_input();
                }
            }
        }
    }

    /// A key-up fired on one of the observed surfaces.
    pub fn on_key_up(&mut self) {
        if self.enabled && self.config.enable {
            self.on_input();
        }
    }

    /// Fire the pending scroll if its debounce window has elapsed.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// `tick` with an explicit clock, for deterministic scheduling.
    pub fn tick_at(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        if let Some(target) = self.scroll.poll_at(now) {
            if let Err(err) = self.host.scroll_into_view(&target) {
                // The document changed under us; skip this scroll and keep
                // handling events.
                log::warn!("typewriter: {err}");
            }
        }
    }

    fn attach(&mut self, surface: &Rc<H::Surface>) {
        self.observed.prune();
        if self.observed.insert(surface) {
            self.host.attach_keyup(surface);
        }
    }

    fn detach(&mut self, surface: &Rc<H::Surface>) {
        if self.observed.remove(surface) {
            self.host.detach_keyup(surface);
        }
    }

    /// Shared path for keystrokes and content clicks.
    fn on_input(&mut self) {
        let Some(caret) = self.host.caret() else {
            // Caret outside any tracked editor; nothing to scroll.
            return;
        };
        let target = focus::resolve(&caret, &self.config);
        if let Some(current) = &self.current {
            if current.same(&target) {
                return;
            }
        }
        self.current = Some(target.clone());
        self.scroll.call(target);
    }
}
