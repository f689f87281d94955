//! Drawer model - registry, per-edge trackers and the operations that span them
//!
//! Everything that must look at more than one edge lives here: mutual
//! exclusion, lock policy, peeks and the "close what the gesture left behind"
//! rules. Trackers only ever see their own panel.

use std::time::Duration;

use crate::config::DrawerConfig;
use crate::error::{DrawerError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::messages::PointerId;
use crate::panel::{
    DrawerEdge, DrawerRegistry, DrawerTarget, EdgeGeometry, Gravity, LayoutDirection, LockMode,
    OpenState, Panel, PanelId,
};
use crate::tracker::{clamp_magnitude, DragPhase, EdgeTracker, PeekHandle};

/// Which drawers a bulk close may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicy {
    /// Only drawers nudged out by a peek
    PeekingOnly,
    /// Everything except drawers locked open
    ExceptLockedOpen,
    /// Everything
    All,
}

#[derive(Debug)]
pub struct DrawerModel {
    registry: DrawerRegistry,
    trackers: [EdgeTracker; 3],
    config: DrawerConfig,
    container: Size,
    /// Set by the first non-empty container measurement
    laid_out: bool,
    now: Duration,
    next_peek: u64,
}

impl Default for DrawerModel {
    fn default() -> Self {
        Self::new(DrawerConfig::default())
    }
}

impl DrawerModel {
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            registry: DrawerRegistry::new(config.direction),
            trackers: DrawerEdge::ALL.map(EdgeTracker::new),
            config,
            container: Size::ZERO,
            laid_out: false,
            now: Duration::ZERO,
            next_peek: 0,
        }
    }

    pub fn registry(&self) -> &DrawerRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut DrawerRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn tracker(&self, edge: DrawerEdge) -> &EdgeTracker {
        &self.trackers[edge.index()]
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Latest timestamp seen from the host
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward; timestamps from the past are ignored
    pub fn advance_clock(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    // ------------------------------------------------------------------
    // Panels and layout
    // ------------------------------------------------------------------

    pub fn attach(&mut self, gravity: Gravity, size: Size) -> Result<PanelId> {
        self.registry.attach(gravity, size)
    }

    pub fn attach_content(&mut self, size: Size) -> Result<PanelId> {
        self.registry.attach_content(size)
    }

    /// Detach a panel; a drawer's tracker forgets it mid-flight
    pub fn detach(&mut self, id: PanelId) -> Result<Panel> {
        let panel = self.registry.detach(id)?;
        if let Some(edge) = panel.edge {
            self.trackers[edge.index()].detach();
        }
        Ok(panel)
    }

    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
        if !size.is_empty() && !self.laid_out {
            self.laid_out = true;
            tracing::debug!(width = size.width, height = size.height, "first layout");
        }
    }

    pub fn set_panel_size(&mut self, id: PanelId, size: Size) -> Result<()> {
        let panel = self
            .registry
            .panel_mut(id)
            .ok_or(DrawerError::UnknownPanel(id))?;
        panel.size = size;
        Ok(())
    }

    /// Change direction; in-flight motion snaps to where it was heading
    ///
    /// Returns whether anything moved to a different edge.
    pub fn set_direction(&mut self, direction: LayoutDirection) -> Result<bool> {
        if direction == self.registry.direction() {
            return Ok(false);
        }
        // Detach trackers from their panels before the edge table changes
        let mut finished = Vec::new();
        for tracker in &mut self.trackers {
            if let Some(id) = tracker.captured() {
                finished.push((id, tracker.settle_target()));
            }
        }
        self.registry.set_direction(direction)?;
        for tracker in &mut self.trackers {
            tracker.detach();
        }
        for (id, target) in finished {
            if let (Some(panel), Some(target)) = (self.registry.panel_mut(id), target) {
                panel.openness = target;
            }
        }
        tracing::info!(?direction, "layout direction changed");
        Ok(true)
    }

    /// Travel math for the drawer on `edge`, if one is attached
    pub fn geometry(&self, edge: DrawerEdge) -> Option<EdgeGeometry> {
        let panel = self.registry.drawer(edge)?;
        let reveal = match edge {
            DrawerEdge::Bottom => self.config.bottom_reveal_px(),
            DrawerEdge::Left | DrawerEdge::Right => 0.0,
        };
        Some(EdgeGeometry::new(edge, self.container, panel.size, reveal))
    }

    /// Current on-screen rectangle of any attached panel
    pub fn panel_rect(&self, id: PanelId) -> Result<Rect> {
        let panel = self
            .registry
            .panel(id)
            .ok_or(DrawerError::UnknownPanel(id))?;
        match panel.edge {
            Some(edge) => self
                .geometry(edge)
                .map(|geom| geom.rect(panel.openness))
                .ok_or(DrawerError::NoDrawer(edge)),
            None => Ok(Rect::from_size(self.container)),
        }
    }

    /// Top-most panel under `point`
    pub fn panel_at(&self, point: Point) -> Option<PanelId> {
        self.registry
            .panels()
            .rev()
            .find(|panel| {
                self.panel_rect(panel.id)
                    .is_ok_and(|rect| rect.contains(point.x, point.y))
            })
            .map(|panel| panel.id)
    }

    /// Whether the top-most panel under `point` is the drawer on `edge`
    pub fn drawer_hit(&self, edge: DrawerEdge, point: Point) -> bool {
        match self.registry.find_panel(edge) {
            Some(id) => self.panel_at(point) == Some(id),
            None => false,
        }
    }

    /// Whether `point` is over the content area rather than a drawer
    pub fn is_over_content(&self, point: Point) -> bool {
        if !Rect::from_size(self.container).contains(point.x, point.y) {
            return false;
        }
        match self.panel_at(point) {
            Some(id) => Some(id) == self.registry.content_id(),
            None => true,
        }
    }

    pub fn in_edge_margin(&self, edge: DrawerEdge, point: Point) -> bool {
        self.geometry(edge)
            .is_some_and(|geom| geom.in_edge_margin(point, self.config.edge_size_px()))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Effective lock mode for a target
    pub fn lock_mode(&self, target: DrawerTarget) -> Result<LockMode> {
        let gravity = self.target_gravity(target)?;
        Ok(self.registry.lock_mode(gravity))
    }

    /// Fully open and settled; `false` when nothing is attached at a gravity
    pub fn is_open(&self, target: DrawerTarget) -> Result<bool> {
        let edge = self.registry.resolve(target)?;
        Ok(self.registry.is_open(edge))
    }

    pub fn is_visible(&self, target: DrawerTarget) -> Result<bool> {
        let edge = self.registry.resolve(target)?;
        Ok(self.registry.is_visible(edge))
    }

    pub fn phase(&self) -> DragPhase {
        DragPhase::combine(self.trackers.iter().map(EdgeTracker::phase))
    }

    pub fn any_dragging(&self) -> bool {
        self.trackers.iter().any(EdgeTracker::is_dragging)
    }

    pub fn any_settling(&self) -> bool {
        self.trackers.iter().any(EdgeTracker::is_settling)
    }

    pub fn any_edge_touched(&self) -> bool {
        self.trackers.iter().any(EdgeTracker::is_edge_touched)
    }

    /// Edge whose tracker holds `pointer`
    pub fn dragging_edge(&self, pointer: PointerId) -> Option<DrawerEdge> {
        self.trackers
            .iter()
            .find(|t| t.is_dragging() && t.active_pointer() == Some(pointer))
            .map(EdgeTracker::edge)
    }

    /// Gravity used for the lock slot of a target
    ///
    /// Panel targets use the panel's absolute edge.
    fn target_gravity(&self, target: DrawerTarget) -> Result<Gravity> {
        match target {
            DrawerTarget::Gravity(gravity) => Ok(gravity),
            DrawerTarget::Panel(id) => Ok(self.registry.drawer_edge(id)?.into()),
        }
    }

    // ------------------------------------------------------------------
    // Programmatic motion
    // ------------------------------------------------------------------

    /// Open a drawer, closing the others unless they are locked open
    pub fn open(&mut self, target: DrawerTarget) -> Result<()> {
        let edge = self.registry.resolve_drawer(target)?;
        tracing::debug!(%edge, animate = self.laid_out, "open");
        self.close_others(edge);
        self.trackers[edge.index()].cancel_peek();
        if let Some(panel) = self.registry.drawer_mut(edge) {
            panel.is_peeking = false;
            panel.open_state = if self.laid_out {
                panel.open_state.request_open()
            } else {
                OpenState::Opened
            };
        }
        self.move_to(edge, 1.0, 0.0);
        Ok(())
    }

    /// Close a drawer
    pub fn close(&mut self, target: DrawerTarget) -> Result<()> {
        let edge = self.registry.resolve_drawer(target)?;
        tracing::debug!(%edge, animate = self.laid_out, "close");
        self.close_edge(edge);
        Ok(())
    }

    fn close_edge(&mut self, edge: DrawerEdge) {
        self.trackers[edge.index()].cancel_peek();
        if let Some(panel) = self.registry.drawer_mut(edge) {
            panel.is_peeking = false;
            panel.open_state = if self.laid_out {
                panel.open_state.request_close()
            } else {
                OpenState::Closed
            };
        }
        self.move_to(edge, 0.0, 0.0);
    }

    /// Close the visible drawers other than `edge` that are not locked open
    fn close_others(&mut self, edge: DrawerEdge) {
        for other in edge.others() {
            let visible = self.registry.is_visible(other);
            if visible && self.registry.edge_lock_mode(other) != LockMode::LockedOpen {
                self.close_edge(other);
            }
        }
    }

    /// Close drawers allowed by `policy`; also cancels pending peeks
    ///
    /// Returns whether any drawer started to settle.
    pub fn close_drawers(&mut self, policy: ClosePolicy) -> bool {
        let mut settling = false;
        for edge in DrawerEdge::ALL {
            let Some(panel) = self.registry.drawer(edge) else {
                continue;
            };
            let skip = match policy {
                ClosePolicy::PeekingOnly => !panel.is_peeking,
                ClosePolicy::ExceptLockedOpen => {
                    self.registry.edge_lock_mode(edge) == LockMode::LockedOpen
                }
                ClosePolicy::All => false,
            };
            if skip {
                continue;
            }
            if let Some(panel) = self.registry.drawer_mut(edge) {
                panel.is_peeking = false;
                if policy != ClosePolicy::PeekingOnly {
                    panel.open_state = panel.open_state.request_close();
                }
            }
            settling |= self.move_to(edge, 0.0, 0.0);
        }
        self.cancel_peeks();
        settling
    }

    /// Record a lock mode and apply it to the matching drawer
    ///
    /// Re-applying the current value does nothing.
    pub fn set_lock_mode(&mut self, mode: LockMode, target: DrawerTarget) -> Result<()> {
        let gravity = self.target_gravity(target)?;
        if !self.registry.set_lock_mode(mode, gravity) {
            return Ok(());
        }
        let edge = gravity.resolve(self.registry.direction());
        tracing::debug!(%edge, ?mode, "lock mode set");

        if self.registry.edge_lock_mode(edge) != LockMode::Unlocked {
            let tracker = &mut self.trackers[edge.index()];
            if tracker.is_dragging() {
                tracker.abort();
            }
            tracker.cancel_peek();
        }

        if self.registry.find_panel(edge).is_none() {
            return Ok(());
        }
        match self.registry.edge_lock_mode(edge) {
            LockMode::LockedOpen => self.open(DrawerTarget::from(edge))?,
            LockMode::LockedClosed => self.close_edge(edge),
            LockMode::Unlocked | LockMode::Undefined => {}
        }
        Ok(())
    }

    /// Nudge an unlocked, closed drawer into view by the edge size
    ///
    /// Returns whether the drawer moved.
    pub fn peek(&mut self, edge: DrawerEdge) -> bool {
        let Some(geom) = self.geometry(edge) else {
            return false;
        };
        if self.registry.edge_lock_mode(edge) != LockMode::Unlocked
            || self.trackers[edge.index()].is_dragging()
        {
            return false;
        }
        let range = geom.range();
        if range <= 0.0 {
            return false;
        }
        let target = (self.config.edge_size_px() / range).min(1.0);
        let current = self.registry.drawer(edge).map_or(1.0, |p| p.openness);
        if current >= target {
            return false;
        }
        tracing::debug!(%edge, target, "peek");
        self.move_to(edge, target, 0.0);
        if let Some(panel) = self.registry.drawer_mut(edge) {
            panel.is_peeking = true;
        }
        self.close_others(edge);
        true
    }

    /// Close whatever the back button may close
    ///
    /// Returns whether the press was consumed: a visible drawer exists.
    pub fn handle_back(&mut self) -> bool {
        let visible = self
            .registry
            .drawers()
            .find(|panel| panel.is_visible())
            .and_then(|panel| panel.edge);
        let Some(edge) = visible else {
            return false;
        };
        if self.registry.edge_lock_mode(edge) == LockMode::Unlocked {
            self.close_drawers(ClosePolicy::All);
        }
        true
    }

    /// Settle the drawer on `edge` to `target`, or snap before first layout
    fn move_to(&mut self, edge: DrawerEdge, target: f32, velocity: f32) -> bool {
        let Some(geom) = self.geometry(edge) else {
            return false;
        };
        let tracker = &mut self.trackers[edge.index()];
        let Some(panel) = self.registry.drawer_mut(edge) else {
            return false;
        };
        if !self.laid_out {
            tracker.abort();
            panel.openness = target;
            return false;
        }
        tracker.settle_to(panel, &geom, target, velocity, self.now, &self.config)
    }

    // ------------------------------------------------------------------
    // Gesture plumbing
    // ------------------------------------------------------------------

    /// Capture `pointer` for the drawer on `edge` if the tracker accepts it
    ///
    /// `hit` is the point the capture is judged by: the gesture's down point
    /// for an edge drag, the current point for a grab on the panel itself.
    /// The drag then starts from `at`.
    pub fn capture(
        &mut self,
        edge: DrawerEdge,
        pointer: PointerId,
        hit: Point,
        at: Point,
        time: Duration,
    ) -> bool {
        self.advance_clock(time);
        let Some(geom) = self.geometry(edge) else {
            return false;
        };
        let lock = self.registry.edge_lock_mode(edge);
        let edge_margin = self.config.edge_size_px();
        let tracker = &mut self.trackers[edge.index()];
        let Some(panel) = self.registry.drawer_mut(edge) else {
            return false;
        };
        if !tracker.should_capture(panel, lock, &geom, hit, edge_margin) {
            tracing::trace!(%edge, ?lock, "capture refused");
            return false;
        }
        tracker.capture(panel, pointer, at, time);
        self.close_others(edge);
        true
    }

    /// Follow the captured pointer; returns whether openness changed
    pub fn drag(&mut self, edge: DrawerEdge, at: Point, time: Duration) -> bool {
        self.advance_clock(time);
        let Some(geom) = self.geometry(edge) else {
            return false;
        };
        let tracker = &mut self.trackers[edge.index()];
        let Some(panel) = self.registry.drawer_mut(edge) else {
            return false;
        };
        tracker.drag_to(panel, &geom, at, time)
    }

    /// Hand the drag on `edge` to another pointer
    pub fn transfer_pointer(&mut self, edge: DrawerEdge, pointer: PointerId, at: Point) {
        self.trackers[edge.index()].transfer_pointer(pointer, at);
    }

    /// Release the drag on `edge` and settle by fling or position
    ///
    /// The lift position counts as a velocity sample, so a drag that paused
    /// before lifting settles by position.
    pub fn release(&mut self, edge: DrawerEdge, at: Point, time: Duration) -> Option<f32> {
        self.advance_clock(time);
        let geom = self.geometry(edge)?;
        let tracker = &mut self.trackers[edge.index()];
        let panel = self.registry.drawer_mut(edge)?;
        tracker.record_sample(at, time);
        let velocity = clamp_magnitude(
            tracker.pointer_velocity(),
            self.config.min_fling_px(),
            self.config.max_fling_px(),
        );
        Some(tracker.release(panel, &geom, velocity, self.now, &self.config))
    }

    /// Advance settling drawers to `now`; returns whether more frames are needed
    pub fn continue_settling(&mut self, now: Duration) -> bool {
        self.advance_clock(now);
        let mut more = false;
        for edge in DrawerEdge::ALL {
            let tracker = &mut self.trackers[edge.index()];
            if !tracker.is_settling() {
                continue;
            }
            match self.registry.drawer_mut(edge) {
                Some(panel) => more |= tracker.continue_settling(panel, self.now),
                None => tracker.abort(),
            }
        }
        more
    }

    pub fn set_edge_touched(&mut self, edge: DrawerEdge) {
        self.trackers[edge.index()].set_edge_touched();
    }

    /// Edge-drag check for one tracker; see [`EdgeTracker::check_edge_drag`]
    pub fn check_edge_drag(&mut self, edge: DrawerEdge, along: f32, across: f32) -> bool {
        let slop = self.config.touch_slop_px();
        self.trackers[edge.index()].check_edge_drag(along, across, slop)
    }

    pub fn reset_gesture(&mut self) {
        for tracker in &mut self.trackers {
            tracker.reset_gesture();
        }
    }

    /// Stop every drag where it is
    pub fn abort_drags(&mut self) {
        for tracker in &mut self.trackers {
            if tracker.is_dragging() {
                tracker.abort();
            }
        }
    }

    /// Schedule a peek for `edge`; `None` when there is nothing to peek
    pub fn schedule_peek(&mut self, edge: DrawerEdge) -> Option<PeekHandle> {
        self.registry.find_panel(edge)?;
        if self.registry.edge_lock_mode(edge) != LockMode::Unlocked {
            return None;
        }
        self.next_peek += 1;
        let handle = PeekHandle(self.next_peek);
        self.trackers[edge.index()].schedule_peek(handle);
        Some(handle)
    }

    /// Cancel every pending peek; returns whether any was pending
    pub fn cancel_peeks(&mut self) -> bool {
        let mut any = false;
        for tracker in &mut self.trackers {
            any |= tracker.cancel_peek();
        }
        any
    }

    /// A peek delay elapsed; stale handles do nothing
    pub fn fire_peek(&mut self, edge: DrawerEdge, handle: PeekHandle) -> bool {
        if !self.trackers[edge.index()].take_peek(handle) {
            tracing::trace!(%edge, ?handle, "stale peek ignored");
            return false;
        }
        self.peek(edge)
    }
}
