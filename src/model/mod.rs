//! Layout model - the complete state of the drawer container
//!
//! `DrawerLayout` owns the drawer model, the gesture router and the motion
//! state. Hosts either feed it messages through [`crate::update::update`] or
//! call the methods below directly; both paths end in the same place.

mod drawers;

pub use drawers::{ClosePolicy, DrawerModel};

use std::time::Duration;

use crate::commands::Cmd;
use crate::config::DrawerConfig;
use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::gesture::GestureRouter;
use crate::messages::PointerEvent;
use crate::motion::{DrawerListener, ListenerId, MotionState};
use crate::panel::{
    DrawerEdge, DrawerRegistry, DrawerTarget, Gravity, LayoutDirection, LockMode, PanelId,
};
use crate::render::RenderState;
use crate::state::SavedState;
use crate::tracker::{DragPhase, PeekHandle};

/// The drawer container
#[derive(Debug, Default)]
pub struct DrawerLayout {
    model: DrawerModel,
    router: GestureRouter,
    motion: MotionState,
}

impl DrawerLayout {
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            model: DrawerModel::new(config),
            router: GestureRouter::new(),
            motion: MotionState::new(),
        }
    }

    pub fn model(&self) -> &DrawerModel {
        &self.model
    }

    pub fn registry(&self) -> &DrawerRegistry {
        self.model.registry()
    }

    pub fn config(&self) -> &DrawerConfig {
        self.model.config()
    }

    /// Publish motion and add the frame/redraw request it implies
    fn finish(&mut self, cmd: Cmd) -> Cmd {
        let events = self.motion.publish(&mut self.model);
        let follow_up = if self.model.any_settling() {
            Cmd::RequestFrame
        } else if !events.is_empty() {
            Cmd::Redraw
        } else {
            Cmd::None
        };
        Cmd::batch(vec![cmd, follow_up])
    }

    // ------------------------------------------------------------------
    // Panels and layout
    // ------------------------------------------------------------------

    pub fn attach_drawer(&mut self, gravity: Gravity, size: Size) -> Result<PanelId> {
        self.model.attach(gravity, size)
    }

    pub fn attach_content(&mut self, size: Size) -> Result<PanelId> {
        self.model.attach_content(size)
    }

    pub fn detach(&mut self, id: PanelId) -> Result<Cmd> {
        self.model.detach(id)?;
        Ok(self.finish(Cmd::Redraw))
    }

    pub fn set_container_size(&mut self, size: Size) -> Cmd {
        self.model.set_container_size(size);
        self.finish(Cmd::Redraw)
    }

    pub fn set_panel_size(&mut self, id: PanelId, size: Size) -> Result<Cmd> {
        self.model.set_panel_size(id, size)?;
        Ok(self.finish(Cmd::Redraw))
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) -> Result<Cmd> {
        if !self.model.set_direction(direction)? {
            return Ok(Cmd::None);
        }
        Ok(self.finish(Cmd::Redraw))
    }

    pub fn direction(&self) -> LayoutDirection {
        self.model.registry().direction()
    }

    pub fn panel_rect(&self, id: PanelId) -> Result<Rect> {
        self.model.panel_rect(id)
    }

    pub fn panel_at(&self, point: Point) -> Option<PanelId> {
        self.model.panel_at(point)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Cmd {
        let cmd = self.router.on_pointer(&mut self.model, event);
        self.finish(cmd)
    }

    /// Render tick: step settling drawers to `now`
    pub fn frame(&mut self, now: Duration) -> Cmd {
        self.model.continue_settling(now);
        self.finish(Cmd::None)
    }

    pub fn peek_elapsed(&mut self, edge: DrawerEdge, handle: PeekHandle) -> Cmd {
        let cmd = self.router.on_peek_elapsed(&mut self.model, edge, handle);
        self.finish(cmd)
    }

    /// Returns whether the request was honored
    pub fn request_disallow_intercept(&mut self, disallow: bool) -> (bool, Cmd) {
        let honored = self.router.request_disallow_intercept(&mut self.model, disallow);
        (honored, self.finish(Cmd::None))
    }

    pub fn is_intercepting(&self) -> bool {
        self.router.is_intercepting()
    }

    // ------------------------------------------------------------------
    // Drawer operations
    // ------------------------------------------------------------------

    pub fn open(&mut self, target: impl Into<DrawerTarget>) -> Result<Cmd> {
        self.model.open(target.into())?;
        Ok(self.finish(Cmd::None))
    }

    pub fn close(&mut self, target: impl Into<DrawerTarget>) -> Result<Cmd> {
        self.model.close(target.into())?;
        Ok(self.finish(Cmd::None))
    }

    /// Close every drawer, including ones locked open
    pub fn close_all(&mut self) -> Cmd {
        self.model.close_drawers(ClosePolicy::All);
        self.finish(Cmd::None)
    }

    pub fn set_lock_mode(&mut self, mode: LockMode, target: impl Into<DrawerTarget>) -> Result<Cmd> {
        self.model.set_lock_mode(mode, target.into())?;
        Ok(self.finish(Cmd::None))
    }

    pub fn lock_mode(&self, target: impl Into<DrawerTarget>) -> Result<LockMode> {
        self.model.lock_mode(target.into())
    }

    pub fn is_open(&self, target: impl Into<DrawerTarget>) -> Result<bool> {
        self.model.is_open(target.into())
    }

    pub fn is_visible(&self, target: impl Into<DrawerTarget>) -> Result<bool> {
        self.model.is_visible(target.into())
    }

    /// Back button; `None` when no drawer is visible and the press should bubble
    pub fn handle_back(&mut self) -> Option<Cmd> {
        if !self.model.handle_back() {
            return None;
        }
        Some(self.finish(Cmd::None))
    }

    // ------------------------------------------------------------------
    // Motion and listeners
    // ------------------------------------------------------------------

    /// Aggregate drag phase
    pub fn state(&self) -> DragPhase {
        self.motion.state()
    }

    pub fn is_content_interactive(&self) -> bool {
        self.motion.is_content_interactive()
    }

    pub fn add_listener(&mut self, listener: impl DrawerListener + 'static) -> ListenerId {
        self.motion.add_listener(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.motion.remove_listener(id)
    }

    pub fn render_state(&self) -> RenderState {
        RenderState::compute(&self.model)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn save_state(&self) -> SavedState {
        SavedState::capture(&self.model)
    }

    pub fn restore_state(&mut self, state: &SavedState) -> Result<Cmd> {
        state.restore(&mut self.model)?;
        Ok(self.finish(Cmd::Redraw))
    }
}
