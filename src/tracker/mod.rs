//! Edge trackers - drag lifecycle for the drawer on one edge
//!
//! One `EdgeTracker` exists per edge. All three share this implementation;
//! the edge-specific clamp/offset math lives in `EdgeGeometry`. A tracker
//! never looks at the other edges: mutual exclusion and lock policy are
//! applied by `DrawerModel`, which owns all three.
//!
//! Phases:
//! - `Idle`: nothing in flight
//! - `Dragging`: a pointer is captured and moves the panel directly
//! - `Settling`: the panel animates toward a target openness

mod settle;
mod velocity;

use std::time::Duration;

pub use settle::{ease_out_quint, settle_duration, SettleAnimation};
pub use velocity::{clamp_magnitude, VelocityTracker};

use crate::config::DrawerConfig;
use crate::geometry::Point;
use crate::messages::PointerId;
use crate::panel::{DrawerEdge, EdgeGeometry, LockMode, Panel, PanelId};

/// Drag phase of one tracker, and of the layout as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl DragPhase {
    /// Aggregate several phases: Dragging > Settling > Idle
    pub fn combine(phases: impl IntoIterator<Item = DragPhase>) -> DragPhase {
        phases.into_iter().fold(DragPhase::Idle, |acc, phase| match (acc, phase) {
            (DragPhase::Dragging, _) | (_, DragPhase::Dragging) => DragPhase::Dragging,
            (DragPhase::Settling, _) | (_, DragPhase::Settling) => DragPhase::Settling,
            _ => DragPhase::Idle,
        })
    }
}

/// Token for a scheduled peek; a stale token is ignored when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeekHandle(pub u64);

#[derive(Debug, Clone)]
pub struct EdgeTracker {
    edge: DrawerEdge,
    phase: DragPhase,
    captured: Option<PanelId>,
    active_pointer: Option<PointerId>,
    last_position: Option<Point>,
    velocity: VelocityTracker,
    /// Current gesture started inside this edge's sensing margin
    edge_touched: bool,
    /// Current gesture moved across the edge instead of along it
    edge_drag_locked: bool,
    /// An edge drag already started during the current gesture
    edge_drag_reported: bool,
    peek: Option<PeekHandle>,
    settle: Option<SettleAnimation>,
}

impl EdgeTracker {
    pub fn new(edge: DrawerEdge) -> Self {
        Self {
            edge,
            phase: DragPhase::Idle,
            captured: None,
            active_pointer: None,
            last_position: None,
            velocity: VelocityTracker::new(),
            edge_touched: false,
            edge_drag_locked: false,
            edge_drag_reported: false,
            peek: None,
            settle: None,
        }
    }

    pub fn edge(&self) -> DrawerEdge {
        self.edge
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn captured(&self) -> Option<PanelId> {
        self.captured
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn is_settling(&self) -> bool {
        self.phase == DragPhase::Settling
    }

    pub fn is_edge_touched(&self) -> bool {
        self.edge_touched
    }

    pub fn pending_peek(&self) -> Option<PeekHandle> {
        self.peek
    }

    /// Openness the running settle is heading for
    pub fn settle_target(&self) -> Option<f32> {
        self.settle.map(|anim| anim.to)
    }

    /// Whether this tracker may take the pointer for `panel`
    ///
    /// The panel must be on this tracker's edge and unlocked, and the
    /// pointer must be over the panel or inside the edge-sensing margin.
    pub fn should_capture(
        &self,
        panel: &Panel,
        lock: LockMode,
        geom: &EdgeGeometry,
        point: Point,
        edge_margin: f32,
    ) -> bool {
        lock == LockMode::Unlocked
            && panel.edge == Some(self.edge)
            && (geom.rect(panel.openness).contains(point.x, point.y)
                || geom.in_edge_margin(point, edge_margin))
    }

    /// Take ownership of `pointer` and start dragging `panel`
    pub fn capture(&mut self, panel: &mut Panel, pointer: PointerId, at: Point, time: Duration) {
        self.phase = DragPhase::Dragging;
        self.captured = Some(panel.id);
        self.active_pointer = Some(pointer);
        self.last_position = Some(at);
        self.settle = None;
        self.peek = None;
        self.velocity.clear();
        self.velocity.add(time, self.edge.axis().of(at));
        panel.is_peeking = false;
        tracing::debug!(edge = %self.edge, pointer, "captured");
    }

    /// Hand the drag to another pointer without interrupting it
    pub fn transfer_pointer(&mut self, pointer: PointerId, at: Point) {
        self.active_pointer = Some(pointer);
        self.last_position = Some(at);
        self.velocity.clear();
    }

    /// Follow the captured pointer to `at`; returns whether openness changed
    pub fn drag_to(
        &mut self,
        panel: &mut Panel,
        geom: &EdgeGeometry,
        at: Point,
        time: Duration,
    ) -> bool {
        let axis = self.edge.axis();
        let Some(last) = self.last_position.replace(at) else {
            return false;
        };
        self.velocity.add(time, axis.of(at));
        self.drag_by(panel, geom, axis.of(at) - axis.of(last))
    }

    /// Move the panel by `delta` pixels along the slide axis, clamped
    pub fn drag_by(&mut self, panel: &mut Panel, geom: &EdgeGeometry, delta: f32) -> bool {
        let position = geom.clamp_position(geom.position(panel.openness) + delta);
        let openness = geom.openness_at(position);
        let changed = openness != panel.openness;
        panel.openness = openness;
        changed
    }

    /// Record the pointer at `at` for velocity only, without moving the panel
    ///
    /// Used for the lift position so a pause before release is measured.
    pub fn record_sample(&mut self, at: Point, time: Duration) {
        self.velocity.add(time, self.edge.axis().of(at));
    }

    /// Raw pointer velocity along the slide axis (px/s)
    pub fn pointer_velocity(&self) -> f32 {
        self.velocity.velocity()
    }

    /// Release the drag and settle to the endpoint the gesture implies
    ///
    /// `velocity` must already be filtered: zero below the fling threshold.
    /// A fling toward opening opens, a fling toward closing closes, and
    /// without a fling the nearer endpoint wins with 0.5 going to open.
    /// Returns the chosen target.
    pub fn release(
        &mut self,
        panel: &mut Panel,
        geom: &EdgeGeometry,
        velocity: f32,
        now: Duration,
        config: &DrawerConfig,
    ) -> f32 {
        let opening = velocity * self.edge.opening_sign();
        let target = if opening > 0.0 {
            1.0
        } else if opening < 0.0 {
            0.0
        } else if panel.openness >= 0.5 {
            1.0
        } else {
            0.0
        };
        tracing::debug!(
            edge = %self.edge,
            velocity,
            openness = panel.openness,
            target,
            "released"
        );
        self.settle_to(panel, geom, target, velocity, now, config);
        target
    }

    /// Animate `panel` toward `target`, dropping any captured pointer
    ///
    /// Returns `false` when the panel is already there; the tracker is then
    /// idle immediately.
    pub fn settle_to(
        &mut self,
        panel: &mut Panel,
        geom: &EdgeGeometry,
        target: f32,
        velocity: f32,
        now: Duration,
        config: &DrawerConfig,
    ) -> bool {
        self.captured = Some(panel.id);
        self.active_pointer = None;
        self.last_position = None;
        self.velocity.clear();

        let target = target.clamp(0.0, 1.0);
        let range = geom.range();
        let delta = (target - panel.openness) * range;
        let duration = settle_duration(
            delta,
            velocity,
            range,
            geom.axis_extent(),
            config.base_settle(),
            config.max_settle(),
        );

        if delta == 0.0 || duration.is_zero() {
            panel.openness = target;
            self.settle = None;
            self.phase = DragPhase::Idle;
            return false;
        }

        self.settle = Some(SettleAnimation::new(panel.openness, target, now, duration));
        self.phase = DragPhase::Settling;
        tracing::trace!(edge = %self.edge, target, ?duration, "settling");
        true
    }

    /// Advance the settle animation; returns whether another frame is needed
    pub fn continue_settling(&mut self, panel: &mut Panel, now: Duration) -> bool {
        let Some(anim) = self.settle else {
            return false;
        };
        let (value, done) = anim.sample(now);
        panel.openness = value.clamp(0.0, 1.0);
        if done {
            self.settle = None;
            self.phase = DragPhase::Idle;
        }
        !done
    }

    /// Stop any drag or settle where it is
    pub fn abort(&mut self) {
        if self.phase != DragPhase::Idle {
            tracing::debug!(edge = %self.edge, phase = ?self.phase, "aborted");
        }
        self.phase = DragPhase::Idle;
        self.settle = None;
        self.active_pointer = None;
        self.last_position = None;
        self.velocity.clear();
    }

    /// Forget the panel entirely (it was detached)
    pub fn detach(&mut self) {
        self.abort();
        self.captured = None;
        self.peek = None;
        self.reset_gesture();
    }

    pub fn set_edge_touched(&mut self) {
        self.edge_touched = true;
    }

    /// Clear per-gesture edge flags
    pub fn reset_gesture(&mut self) {
        self.edge_touched = false;
        self.edge_drag_locked = false;
        self.edge_drag_reported = false;
    }

    /// Whether the movement so far starts an edge drag
    ///
    /// Movement mostly across the slide axis locks edge drags out for the
    /// rest of the gesture. An edge drag is reported at most once per gesture.
    pub fn check_edge_drag(&mut self, along: f32, across: f32, slop: f32) -> bool {
        if !self.edge_touched
            || self.edge_drag_locked
            || self.edge_drag_reported
            || self.phase == DragPhase::Dragging
        {
            return false;
        }
        let (along, across) = (along.abs(), across.abs());
        if along <= slop && across <= slop {
            return false;
        }
        if along < across * 0.5 {
            self.edge_drag_locked = true;
            return false;
        }
        self.edge_drag_reported = along > slop;
        self.edge_drag_reported
    }

    pub fn schedule_peek(&mut self, handle: PeekHandle) {
        self.peek = Some(handle);
    }

    /// Cancel a pending peek; returns whether one was pending
    pub fn cancel_peek(&mut self) -> bool {
        self.peek.take().is_some()
    }

    /// Consume the pending peek if `handle` is still current
    pub fn take_peek(&mut self, handle: PeekHandle) -> bool {
        if self.peek == Some(handle) {
            self.peek = None;
            true
        } else {
            false
        }
    }
}
