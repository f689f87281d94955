//! Motion state - aggregate phase and listener notifications
//!
//! `MotionState` turns what the trackers did to the model into events:
//! slide fractions, opened/closed edges and aggregate phase changes. It runs
//! once after every update, so events are coalesced per message.

use crate::model::DrawerModel;
use crate::panel::{DrawerEdge, OpenState, PanelId};
use crate::tracker::DragPhase;

/// Callbacks for drawer motion
///
/// Every method has an empty default so listeners implement only what they
/// need.
pub trait DrawerListener {
    fn on_drawer_slide(&mut self, _panel: PanelId, _edge: DrawerEdge, _openness: f32) {}

    fn on_drawer_opened(&mut self, _panel: PanelId, _edge: DrawerEdge) {}

    fn on_drawer_closed(&mut self, _panel: PanelId, _edge: DrawerEdge) {}

    fn on_drawer_state_changed(&mut self, _state: DragPhase) {}

    /// Return `true` to be removed after the current delivery
    fn is_finished(&self) -> bool {
        false
    }
}

/// Handle returned by [`MotionState::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// One notification, in delivery order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerEvent {
    Slide {
        panel: PanelId,
        edge: DrawerEdge,
        openness: f32,
    },
    Opened {
        panel: PanelId,
        edge: DrawerEdge,
    },
    Closed {
        panel: PanelId,
        edge: DrawerEdge,
    },
    StateChanged(DragPhase),
}

impl DrawerEvent {
    fn deliver(&self, listener: &mut dyn DrawerListener) {
        match *self {
            DrawerEvent::Slide {
                panel,
                edge,
                openness,
            } => listener.on_drawer_slide(panel, edge, openness),
            DrawerEvent::Opened { panel, edge } => listener.on_drawer_opened(panel, edge),
            DrawerEvent::Closed { panel, edge } => listener.on_drawer_closed(panel, edge),
            DrawerEvent::StateChanged(state) => listener.on_drawer_state_changed(state),
        }
    }
}

pub struct MotionState {
    listeners: Vec<(ListenerId, Box<dyn DrawerListener>)>,
    next_listener: u64,
    state: DragPhase,
    /// Last openness reported per edge, with the panel it belonged to
    last_slide: [Option<(PanelId, f32)>; 3],
    content_interactive: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionState")
            .field("listeners", &self.listeners.len())
            .field("state", &self.state)
            .field("last_slide", &self.last_slide)
            .field("content_interactive", &self.content_interactive)
            .finish()
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener: 0,
            state: DragPhase::Idle,
            last_slide: [None; 3],
            content_interactive: true,
        }
    }

    /// Aggregate phase as last published
    pub fn state(&self) -> DragPhase {
        self.state
    }

    /// False while any drawer is fully open
    pub fn is_content_interactive(&self) -> bool {
        self.content_interactive
    }

    pub fn add_listener(&mut self, listener: Box<dyn DrawerListener>) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; unknown ids are ignored
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Reconcile open states with the model and notify listeners
    ///
    /// Order: slides, then opened/closed, then the aggregate state change.
    /// Before the first layout the bookkeeping still runs but nothing is
    /// delivered. Returns the delivered events.
    pub fn publish(&mut self, model: &mut DrawerModel) -> Vec<DrawerEvent> {
        let mut events = Vec::new();

        for edge in DrawerEdge::ALL {
            let current = model
                .registry()
                .drawer(edge)
                .map(|panel| (panel.id, panel.openness));
            let previous = self.last_slide[edge.index()];
            if current == previous {
                continue;
            }
            self.last_slide[edge.index()] = current;
            match (current, previous) {
                // A newly attached panel starts closed; nothing moved
                (Some((_, openness)), None) if openness == 0.0 => {}
                (Some((panel, openness)), _) => events.push(DrawerEvent::Slide {
                    panel,
                    edge,
                    openness,
                }),
                (None, _) => {}
            }
        }

        for edge in DrawerEdge::ALL {
            if model.tracker(edge).phase() != DragPhase::Idle {
                continue;
            }
            let Some(panel) = model.registry_mut().drawer_mut(edge) else {
                continue;
            };
            if panel.openness >= 1.0 {
                if !panel.open_state.is_opened() {
                    events.push(DrawerEvent::Opened {
                        panel: panel.id,
                        edge,
                    });
                }
                panel.open_state = OpenState::Opened;
            } else if panel.openness <= 0.0 {
                if panel.open_state.is_opened() {
                    events.push(DrawerEvent::Closed {
                        panel: panel.id,
                        edge,
                    });
                }
                panel.open_state = OpenState::Closed;
            }
        }

        let state = model.phase();
        if state != self.state {
            self.state = state;
            events.push(DrawerEvent::StateChanged(state));
        }

        let interactive = !model.registry().any_open();
        if interactive != self.content_interactive {
            tracing::debug!(interactive, "content accessibility changed");
            self.content_interactive = interactive;
        }

        if !model.is_laid_out() {
            return Vec::new();
        }
        for event in &events {
            tracing::trace!(?event, "dispatch");
            self.dispatch(event);
        }
        events
    }

    /// Deliver to every listener, newest first
    ///
    /// Iterates by index from the end so removing the current entry never
    /// shifts one that has not been visited yet.
    fn dispatch(&mut self, event: &DrawerEvent) {
        let mut index = self.listeners.len();
        while index > 0 {
            index -= 1;
            let finished = {
                let listener = self.listeners[index].1.as_mut();
                event.deliver(listener);
                listener.is_finished()
            };
            if finished {
                self.listeners.remove(index);
            }
        }
    }
}
