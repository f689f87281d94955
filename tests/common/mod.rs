//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use edgedrawer::config::DrawerConfig;
use edgedrawer::geometry::Size;
use edgedrawer::messages::{Msg, PointerEvent};
use edgedrawer::model::DrawerLayout;
use edgedrawer::motion::{DrawerEvent, DrawerListener};
use edgedrawer::panel::{DrawerEdge, Gravity, PanelId};
use edgedrawer::tracker::DragPhase;
use edgedrawer::update::update;
use edgedrawer::Cmd;

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const SIDE_WIDTH: f32 = 200.0;
pub const BOTTOM_HEIGHT: f32 = 300.0;

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Panel ids of the standard fixture
#[derive(Debug, Clone, Copy)]
pub struct Panels {
    pub content: PanelId,
    pub left: PanelId,
    pub right: PanelId,
    pub bottom: PanelId,
}

/// Content plus left, right and bottom drawers in an 800x600 container
pub fn test_layout() -> (DrawerLayout, Panels) {
    test_layout_with(DrawerConfig::default())
}

pub fn test_layout_with(config: DrawerConfig) -> (DrawerLayout, Panels) {
    let mut layout = unlaid_layout(config);
    let panels = attach_all(&mut layout);
    layout.set_container_size(Size::new(WIDTH, HEIGHT));
    (layout, panels)
}

/// Layout with nothing attached and no container size yet
pub fn unlaid_layout(config: DrawerConfig) -> DrawerLayout {
    DrawerLayout::new(config)
}

pub fn attach_all(layout: &mut DrawerLayout) -> Panels {
    Panels {
        content: layout.attach_content(Size::new(WIDTH, HEIGHT)).unwrap(),
        left: layout
            .attach_drawer(Gravity::Left, Size::new(SIDE_WIDTH, HEIGHT))
            .unwrap(),
        right: layout
            .attach_drawer(Gravity::Right, Size::new(SIDE_WIDTH, HEIGHT))
            .unwrap(),
        bottom: layout
            .attach_drawer(Gravity::Bottom, Size::new(WIDTH, BOTTOM_HEIGHT))
            .unwrap(),
    }
}

/// Drive render ticks until nothing is settling
pub fn settle(layout: &mut DrawerLayout) {
    let mut now = layout.model().now();
    for _ in 0..200 {
        now += ms(16);
        if !layout.frame(now).needs_frame() {
            return;
        }
    }
    panic!("settle did not finish within 200 frames");
}

pub fn openness(layout: &DrawerLayout, edge: DrawerEdge) -> f32 {
    layout.registry().drawer(edge).unwrap().openness
}

/// Feed a message through `update`, panicking on configuration errors
pub fn send(layout: &mut DrawerLayout, msg: Msg) -> Option<Cmd> {
    update(layout, msg).unwrap()
}

pub fn pointer(layout: &mut DrawerLayout, event: PointerEvent) -> Option<Cmd> {
    send(layout, Msg::Pointer(event))
}

/// Listener that records every event into a shared log
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<DrawerEvent>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<DrawerEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn opened(&self, edge: DrawerEdge) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, DrawerEvent::Opened { edge: x, .. } if *x == edge))
            .count()
    }

    pub fn closed(&self, edge: DrawerEdge) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, DrawerEvent::Closed { edge: x, .. } if *x == edge))
            .count()
    }

    pub fn states(&self) -> Vec<DragPhase> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DrawerEvent::StateChanged(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn slides(&self, edge: DrawerEdge) -> Vec<f32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DrawerEvent::Slide {
                    edge: x, openness, ..
                } if *x == edge => Some(*openness),
                _ => None,
            })
            .collect()
    }
}

impl DrawerListener for EventLog {
    fn on_drawer_slide(&mut self, panel: PanelId, edge: DrawerEdge, openness: f32) {
        self.events.borrow_mut().push(DrawerEvent::Slide {
            panel,
            edge,
            openness,
        });
    }

    fn on_drawer_opened(&mut self, panel: PanelId, edge: DrawerEdge) {
        self.events
            .borrow_mut()
            .push(DrawerEvent::Opened { panel, edge });
    }

    fn on_drawer_closed(&mut self, panel: PanelId, edge: DrawerEdge) {
        self.events
            .borrow_mut()
            .push(DrawerEvent::Closed { panel, edge });
    }

    fn on_drawer_state_changed(&mut self, state: DragPhase) {
        self.events.borrow_mut().push(DrawerEvent::StateChanged(state));
    }
}

/// Register a fresh `EventLog` and return a handle to it
pub fn listen(layout: &mut DrawerLayout) -> EventLog {
    let log = EventLog::default();
    layout.add_listener(log.clone());
    log
}
