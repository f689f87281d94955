//! Gesture router - fans the raw pointer stream out to the edge trackers
//!
//! The router decides who owns a gesture: content children, one of the
//! edge trackers, or the layout itself (tap-to-close on the scrim, peeks).
//! It holds only per-gesture bookkeeping; all drawer state is in
//! [`DrawerModel`].

use crate::commands::Cmd;
use crate::geometry::Point;
use crate::messages::{PointerAction, PointerEvent, PointerId};
use crate::model::{ClosePolicy, DrawerModel};
use crate::panel::{DrawerEdge, LockMode};
use crate::render::scrim_opacity;
use crate::tracker::PeekHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackedPointer {
    id: PointerId,
    down: Point,
    last: Point,
}

#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    /// Pointers currently down, in the order they went down
    pointers: Vec<TrackedPointer>,
    /// Down position of the gesture's first pointer
    initial: Option<Point>,
    disallow_intercept: bool,
    /// A peek fired during this gesture and children were canceled
    children_canceled_touch: bool,
    /// Gesture started on the dimmed content
    intercept_for_tap: bool,
    intercepting: bool,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the layout currently owns the gesture
    pub fn is_intercepting(&self) -> bool {
        self.intercepting
    }

    pub fn is_disallowing_intercept(&self) -> bool {
        self.disallow_intercept
    }

    pub fn on_pointer(&mut self, model: &mut DrawerModel, event: PointerEvent) -> Cmd {
        model.advance_clock(event.time);
        let mut cmds = match event.action {
            PointerAction::Down => self.on_down(model, event),
            PointerAction::Move => self.on_move(model, event),
            PointerAction::Up => self.on_up(model, event),
            PointerAction::Cancel => self.on_cancel(model),
        };
        cmds.push(self.update_intercept(model));
        Cmd::batch(cmds)
    }

    fn on_down(&mut self, model: &mut DrawerModel, event: PointerEvent) -> Vec<Cmd> {
        let at = event.position;
        let first = self.pointers.is_empty();
        if first {
            self.initial = Some(at);
            self.disallow_intercept = false;
            self.children_canceled_touch = false;
            self.intercept_for_tap = false;
            model.reset_gesture();
        }
        self.pointers.retain(|p| p.id != event.pointer);
        self.pointers.push(TrackedPointer {
            id: event.pointer,
            down: at,
            last: at,
        });

        if first && scrim_opacity(model.registry()) > 0.0 && model.is_over_content(at) {
            self.intercept_for_tap = true;
        }

        let mut cmds = Vec::new();
        for edge in DrawerEdge::ALL {
            // Catch a settling drawer under the finger
            if model.tracker(edge).is_settling()
                && model.drawer_hit(edge, at)
                && model.capture(edge, event.pointer, at, at, event.time)
            {
                continue;
            }
            if first && model.in_edge_margin(edge, at) {
                model.set_edge_touched(edge);
                if let Some(handle) = model.schedule_peek(edge) {
                    cmds.push(Cmd::SchedulePeek {
                        edge,
                        handle,
                        delay: model.config().peek_delay(),
                    });
                }
            }
        }
        cmds
    }

    fn on_move(&mut self, model: &mut DrawerModel, event: PointerEvent) -> Vec<Cmd> {
        let Some(pointer) = self.pointers.iter_mut().find(|p| p.id == event.pointer) else {
            return Vec::new();
        };
        pointer.last = event.position;
        let pointer = *pointer;

        if let Some(edge) = model.dragging_edge(pointer.id) {
            model.drag(edge, pointer.last, event.time);
            return Vec::new();
        }

        let slop = model.config().touch_slop_px();
        let moved = Point::new(pointer.last.x - pointer.down.x, pointer.last.y - pointer.down.y);
        if (moved.x.abs() > slop || moved.y.abs() > slop) && model.cancel_peeks() {
            tracing::trace!("slop exceeded, pending peeks canceled");
        }

        if self.disallow_intercept || model.any_dragging() {
            return Vec::new();
        }

        for edge in DrawerEdge::ALL {
            let axis = edge.axis();
            let (along, across) = (axis.of(moved), axis.cross(moved));
            let from_edge = model.check_edge_drag(edge, along, across);
            let on_panel = along.abs() > slop && model.drawer_hit(edge, pointer.last);
            if !from_edge && !on_panel {
                continue;
            }
            let hit = if from_edge { pointer.down } else { pointer.last };
            if model.capture(edge, pointer.id, hit, pointer.last, event.time) {
                break;
            }
        }
        Vec::new()
    }

    fn on_up(&mut self, model: &mut DrawerModel, event: PointerEvent) -> Vec<Cmd> {
        self.pointers.retain(|p| p.id != event.pointer);

        if let Some(edge) = model.dragging_edge(event.pointer) {
            let successor = self
                .pointers
                .iter()
                .find(|p| model.drawer_hit(edge, p.last))
                .copied();
            match successor {
                Some(next) => {
                    tracing::debug!(%edge, from = event.pointer, to = next.id, "capture transferred");
                    model.transfer_pointer(edge, next.id, next.last);
                }
                None => {
                    model.release(edge, event.position, event.time);
                }
            }
        }

        if !self.pointers.is_empty() {
            return Vec::new();
        }

        let mut policy = ClosePolicy::PeekingOnly;
        if self.is_tap(model, event.position) {
            let open = model
                .registry()
                .drawers()
                .find(|panel| panel.open_state.is_opened())
                .and_then(|panel| panel.edge);
            if let Some(edge) = open {
                if model.registry().edge_lock_mode(edge) != LockMode::LockedOpen {
                    tracing::debug!(%edge, "tap on content closes drawers");
                    policy = ClosePolicy::ExceptLockedOpen;
                }
            }
        }
        model.close_drawers(policy);
        self.end_gesture(model);
        Vec::new()
    }

    fn on_cancel(&mut self, model: &mut DrawerModel) -> Vec<Cmd> {
        tracing::debug!("gesture canceled");
        model.abort_drags();
        model.close_drawers(ClosePolicy::ExceptLockedOpen);
        self.end_gesture(model);
        vec![Cmd::CancelChildTouches]
    }

    /// Pointer-up within slop of the gesture start, over the content
    fn is_tap(&self, model: &DrawerModel, at: Point) -> bool {
        let Some(initial) = self.initial else {
            return false;
        };
        let slop = model.config().touch_slop_px();
        initial.distance_sq(at) < slop * slop && model.is_over_content(at)
    }

    fn end_gesture(&mut self, model: &mut DrawerModel) {
        self.pointers.clear();
        self.initial = None;
        self.intercept_for_tap = false;
        self.children_canceled_touch = false;
        model.reset_gesture();
    }

    /// A scheduled peek came due
    pub fn on_peek_elapsed(
        &mut self,
        model: &mut DrawerModel,
        edge: DrawerEdge,
        handle: PeekHandle,
    ) -> Cmd {
        if !model.fire_peek(edge, handle) {
            return Cmd::None;
        }
        // The layout owns the rest of this gesture
        self.children_canceled_touch = true;
        self.update_intercept(model)
    }

    /// Content asks the layout not to steal the current gesture
    ///
    /// Ignored while the gesture started on an edge. Returns whether the
    /// request was honored.
    pub fn request_disallow_intercept(&mut self, model: &mut DrawerModel, disallow: bool) -> bool {
        if model.any_edge_touched() {
            tracing::debug!(disallow, "disallow-intercept ignored during edge touch");
            return false;
        }
        self.disallow_intercept = disallow;
        if disallow {
            model.close_drawers(ClosePolicy::ExceptLockedOpen);
            self.intercepting = false;
        }
        true
    }

    /// Recompute interception; emits the child cancel when it starts
    fn update_intercept(&mut self, model: &DrawerModel) -> Cmd {
        let wants = model.any_dragging()
            || self.intercept_for_tap
            || model.registry().has_peeking()
            || self.children_canceled_touch;
        let intercepting = wants && !self.disallow_intercept && !self.pointers.is_empty();
        let started = intercepting && !self.intercepting;
        self.intercepting = intercepting;
        if started {
            tracing::debug!("intercepting gesture");
            Cmd::CancelChildTouches
        } else {
            Cmd::None
        }
    }
}
