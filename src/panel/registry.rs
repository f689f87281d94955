//! Panel records, lock-mode slots and the edge assignment table
//!
//! The registry is the single source of truth for which panel sits on which
//! edge and how open each drawer is. Trackers and the router mutate openness
//! through it; rendering and notifications read from it.

use serde::{Deserialize, Serialize};

use super::edge::{DrawerEdge, Gravity, LayoutDirection, LockMode};
use crate::error::{DrawerError, Result};
use crate::geometry::Size;

/// Identifier handed out when a panel is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(pub u32);

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Open/close progress of a drawer
///
/// `Opened` and `Closing` both mean "the opened notification has fired and
/// the closed one has not", which is what makes notifications edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Opening,
    Opened,
    Closing,
}

impl OpenState {
    /// Whether the opened notification is outstanding
    pub fn is_opened(self) -> bool {
        matches!(self, OpenState::Opened | OpenState::Closing)
    }

    /// State after a programmatic open request
    pub fn request_open(self) -> Self {
        if self.is_opened() {
            OpenState::Opened
        } else {
            OpenState::Opening
        }
    }

    /// State after a programmatic close request
    pub fn request_close(self) -> Self {
        if self.is_opened() {
            OpenState::Closing
        } else {
            OpenState::Closed
        }
    }
}

/// One attached child: a drawer or the content panel
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: PanelId,
    /// Requested gravity; `None` for the content panel
    pub gravity: Option<Gravity>,
    /// Gravity resolved through the current direction
    pub edge: Option<DrawerEdge>,
    /// Last measured size
    pub size: Size,
    /// Fraction of the panel on screen, `[0, 1]`
    pub openness: f32,
    pub open_state: OpenState,
    /// Nudged into view by an edge-touch peek rather than a user drag
    pub is_peeking: bool,
}

impl Panel {
    fn new(id: PanelId, gravity: Option<Gravity>, edge: Option<DrawerEdge>, size: Size) -> Self {
        Self {
            id,
            gravity,
            edge,
            size,
            openness: 0.0,
            open_state: OpenState::Closed,
            is_peeking: false,
        }
    }

    pub fn is_drawer(&self) -> bool {
        self.edge.is_some()
    }

    /// Fully open and settled
    pub fn is_open(&self) -> bool {
        self.openness >= 1.0 && self.open_state.is_opened()
    }

    /// Any part on screen, including mid-drag
    pub fn is_visible(&self) -> bool {
        self.openness > 0.0
    }
}

/// How an operation names its drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerTarget {
    Gravity(Gravity),
    Panel(PanelId),
}

impl From<Gravity> for DrawerTarget {
    fn from(gravity: Gravity) -> Self {
        DrawerTarget::Gravity(gravity)
    }
}

impl From<DrawerEdge> for DrawerTarget {
    fn from(edge: DrawerEdge) -> Self {
        DrawerTarget::Gravity(edge.into())
    }
}

impl From<PanelId> for DrawerTarget {
    fn from(id: PanelId) -> Self {
        DrawerTarget::Panel(id)
    }
}

/// Lock-mode slots as the application set them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockModes {
    #[serde(default)]
    pub left: LockMode,
    #[serde(default)]
    pub right: LockMode,
    #[serde(default)]
    pub bottom: LockMode,
    #[serde(default)]
    pub start: LockMode,
    #[serde(default)]
    pub end: LockMode,
}

impl LockModes {
    /// Raw slot value, possibly `Undefined`
    pub fn get(&self, gravity: Gravity) -> LockMode {
        match gravity {
            Gravity::Left => self.left,
            Gravity::Right => self.right,
            Gravity::Bottom => self.bottom,
            Gravity::Start => self.start,
            Gravity::End => self.end,
        }
    }

    fn slot_mut(&mut self, gravity: Gravity) -> &mut LockMode {
        match gravity {
            Gravity::Left => &mut self.left,
            Gravity::Right => &mut self.right,
            Gravity::Bottom => &mut self.bottom,
            Gravity::Start => &mut self.start,
            Gravity::End => &mut self.end,
        }
    }

    /// Resolve a slot to a concrete mode
    ///
    /// An explicit absolute mode wins; otherwise the logical counterpart for
    /// the current direction is consulted (and vice versa for START/END).
    /// `Undefined` everywhere resolves to `Unlocked`.
    pub fn effective(&self, gravity: Gravity, direction: LayoutDirection) -> LockMode {
        let ltr = direction == LayoutDirection::Ltr;
        let (primary, fallback) = match gravity {
            Gravity::Left => (self.left, if ltr { self.start } else { self.end }),
            Gravity::Right => (self.right, if ltr { self.end } else { self.start }),
            Gravity::Start => (self.start, if ltr { self.left } else { self.right }),
            Gravity::End => (self.end, if ltr { self.right } else { self.left }),
            Gravity::Bottom => (self.bottom, LockMode::Undefined),
        };
        [primary, fallback]
            .into_iter()
            .find(|mode| *mode != LockMode::Undefined)
            .unwrap_or(LockMode::Unlocked)
    }
}

/// Panel-to-edge assignment plus per-edge lock policy
#[derive(Debug, Clone, Default)]
pub struct DrawerRegistry {
    /// Attach order doubles as z-order (later panels draw on top)
    panels: Vec<Panel>,
    drawers: [Option<PanelId>; 3],
    content: Option<PanelId>,
    locks: LockModes,
    direction: LayoutDirection,
    next_id: u32,
}

impl DrawerRegistry {
    pub fn new(direction: LayoutDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    fn alloc_id(&mut self) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Attach a drawer at the given gravity
    ///
    /// Fails if another drawer already resolves to the same edge.
    pub fn attach(&mut self, gravity: Gravity, size: Size) -> Result<PanelId> {
        let edge = gravity.resolve(self.direction);
        if self.drawers[edge.index()].is_some() {
            return Err(DrawerError::EdgeConflict { edge });
        }
        let id = self.alloc_id();
        self.panels.push(Panel::new(id, Some(gravity), Some(edge), size));
        self.drawers[edge.index()] = Some(id);
        tracing::debug!(panel = %id, %edge, "drawer attached");
        Ok(id)
    }

    /// Attach the content panel
    pub fn attach_content(&mut self, size: Size) -> Result<PanelId> {
        if self.content.is_some() {
            return Err(DrawerError::DuplicateContent);
        }
        let id = self.alloc_id();
        // Content always sits below the drawers
        self.panels.insert(0, Panel::new(id, None, None, size));
        self.content = Some(id);
        Ok(id)
    }

    /// Detach a panel and return its final record
    pub fn detach(&mut self, id: PanelId) -> Result<Panel> {
        let index = self
            .panels
            .iter()
            .position(|p| p.id == id)
            .ok_or(DrawerError::UnknownPanel(id))?;
        let panel = self.panels.remove(index);
        match panel.edge {
            Some(edge) => self.drawers[edge.index()] = None,
            None => self.content = None,
        }
        tracing::debug!(panel = %id, edge = ?panel.edge, "panel detached");
        Ok(panel)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    /// Panels in z-order, bottom-most first
    pub fn panels(&self) -> impl DoubleEndedIterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Drawer panels only, bottom-most first
    pub fn drawers(&self) -> impl DoubleEndedIterator<Item = &Panel> {
        self.panels.iter().filter(|p| p.is_drawer())
    }

    pub fn find_panel(&self, edge: DrawerEdge) -> Option<PanelId> {
        self.drawers[edge.index()]
    }

    pub fn drawer(&self, edge: DrawerEdge) -> Option<&Panel> {
        self.find_panel(edge).and_then(|id| self.panel(id))
    }

    pub fn drawer_mut(&mut self, edge: DrawerEdge) -> Option<&mut Panel> {
        let id = self.find_panel(edge)?;
        self.panel_mut(id)
    }

    pub fn content(&self) -> Option<&Panel> {
        self.content.and_then(|id| self.panel(id))
    }

    pub fn content_id(&self) -> Option<PanelId> {
        self.content
    }

    /// Edge of an attached drawer panel
    pub fn drawer_edge(&self, id: PanelId) -> Result<DrawerEdge> {
        let panel = self.panel(id).ok_or(DrawerError::UnknownPanel(id))?;
        panel.edge.ok_or(DrawerError::NotADrawer(id))
    }

    /// Resolve an operation target to an absolute edge
    ///
    /// Gravity targets always resolve; whether a drawer exists there is the
    /// caller's concern.
    pub fn resolve(&self, target: DrawerTarget) -> Result<DrawerEdge> {
        match target {
            DrawerTarget::Gravity(gravity) => Ok(gravity.resolve(self.direction)),
            DrawerTarget::Panel(id) => self.drawer_edge(id),
        }
    }

    /// Resolve a target that must name an attached drawer
    pub fn resolve_drawer(&self, target: DrawerTarget) -> Result<DrawerEdge> {
        let edge = self.resolve(target)?;
        if self.drawers[edge.index()].is_none() {
            return Err(DrawerError::NoDrawer(edge));
        }
        Ok(edge)
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Change the layout direction, re-resolving START/END drawers
    ///
    /// Returns `Ok(false)` when the direction is unchanged. A change that
    /// would put two drawers on one edge is rejected and nothing moves.
    pub fn set_direction(&mut self, direction: LayoutDirection) -> Result<bool> {
        if direction == self.direction {
            return Ok(false);
        }
        let mut drawers = [None; 3];
        for panel in self.panels.iter().filter(|p| p.is_drawer()) {
            let Some(gravity) = panel.gravity else {
                continue;
            };
            let edge = gravity.resolve(direction);
            if drawers[edge.index()].is_some() {
                return Err(DrawerError::EdgeConflict { edge });
            }
            drawers[edge.index()] = Some(panel.id);
        }
        for panel in self.panels.iter_mut() {
            if let Some(gravity) = panel.gravity {
                panel.edge = Some(gravity.resolve(direction));
            }
        }
        self.drawers = drawers;
        self.direction = direction;
        Ok(true)
    }

    /// Record a lock mode in its slot; returns whether the slot changed
    pub fn set_lock_mode(&mut self, mode: LockMode, gravity: Gravity) -> bool {
        let slot = self.locks.slot_mut(gravity);
        if *slot == mode {
            return false;
        }
        *slot = mode;
        true
    }

    /// Effective lock mode for a gravity (never `Undefined`)
    pub fn lock_mode(&self, gravity: Gravity) -> LockMode {
        self.locks.effective(gravity, self.direction)
    }

    pub fn edge_lock_mode(&self, edge: DrawerEdge) -> LockMode {
        self.lock_mode(edge.into())
    }

    pub fn lock_modes(&self) -> &LockModes {
        &self.locks
    }

    pub fn is_open(&self, edge: DrawerEdge) -> bool {
        self.drawer(edge).is_some_and(Panel::is_open)
    }

    pub fn is_visible(&self, edge: DrawerEdge) -> bool {
        self.drawer(edge).is_some_and(Panel::is_visible)
    }

    pub fn has_peeking(&self) -> bool {
        self.drawers().any(|p| p.is_peeking)
    }

    /// Any drawer that is fully open
    pub fn any_open(&self) -> bool {
        self.drawers().any(Panel::is_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Size {
        Size::new(200.0, 600.0)
    }

    #[test]
    fn test_attach_rejects_same_edge() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        registry.attach(Gravity::Left, size()).unwrap();
        let err = registry.attach(Gravity::Start, size()).unwrap_err();
        assert!(matches!(
            err,
            DrawerError::EdgeConflict {
                edge: DrawerEdge::Left
            }
        ));
    }

    #[test]
    fn test_attach_second_content_fails() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        registry.attach_content(size()).unwrap();
        assert!(matches!(
            registry.attach_content(size()),
            Err(DrawerError::DuplicateContent)
        ));
    }

    #[test]
    fn test_content_is_not_a_drawer() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        let content = registry.attach_content(size()).unwrap();
        assert!(matches!(
            registry.drawer_edge(content),
            Err(DrawerError::NotADrawer(id)) if id == content
        ));
        assert!(matches!(
            registry.drawer_edge(PanelId(99)),
            Err(DrawerError::UnknownPanel(_))
        ));
    }

    #[test]
    fn test_detach_frees_edge() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        let left = registry.attach(Gravity::Left, size()).unwrap();
        registry.detach(left).unwrap();
        assert_eq!(registry.find_panel(DrawerEdge::Left), None);
        assert!(registry.attach(Gravity::Left, size()).is_ok());
    }

    #[test]
    fn test_effective_lock_mode_resolution() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        assert_eq!(registry.lock_mode(Gravity::Left), LockMode::Unlocked);

        registry.set_lock_mode(LockMode::LockedClosed, Gravity::Start);
        assert_eq!(registry.lock_mode(Gravity::Left), LockMode::LockedClosed);
        assert_eq!(registry.lock_mode(Gravity::Right), LockMode::Unlocked);

        // Explicit absolute mode wins over the logical one
        registry.set_lock_mode(LockMode::LockedOpen, Gravity::Left);
        assert_eq!(registry.lock_mode(Gravity::Left), LockMode::LockedOpen);
        assert_eq!(registry.lock_mode(Gravity::Start), LockMode::LockedClosed);

        registry.set_direction(LayoutDirection::Rtl).unwrap();
        assert_eq!(registry.lock_mode(Gravity::Right), LockMode::LockedClosed);
    }

    #[test]
    fn test_set_lock_mode_reports_change() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        assert!(registry.set_lock_mode(LockMode::LockedOpen, Gravity::Bottom));
        assert!(!registry.set_lock_mode(LockMode::LockedOpen, Gravity::Bottom));
    }

    #[test]
    fn test_direction_change_moves_start_drawer() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        let nav = registry.attach(Gravity::Start, size()).unwrap();
        assert_eq!(registry.find_panel(DrawerEdge::Left), Some(nav));

        assert!(registry.set_direction(LayoutDirection::Rtl).unwrap());
        assert_eq!(registry.find_panel(DrawerEdge::Right), Some(nav));
        assert_eq!(registry.find_panel(DrawerEdge::Left), None);
    }

    #[test]
    fn test_direction_change_conflict_is_rejected() {
        let mut registry = DrawerRegistry::new(LayoutDirection::Ltr);
        let nav = registry.attach(Gravity::Start, size()).unwrap();
        registry.attach(Gravity::Right, size()).unwrap();

        assert!(registry.set_direction(LayoutDirection::Rtl).is_err());
        assert_eq!(registry.direction(), LayoutDirection::Ltr);
        assert_eq!(registry.find_panel(DrawerEdge::Left), Some(nav));
    }

    #[test]
    fn test_open_state_transitions() {
        assert_eq!(OpenState::Closed.request_open(), OpenState::Opening);
        assert_eq!(OpenState::Closing.request_open(), OpenState::Opened);
        assert_eq!(OpenState::Opened.request_close(), OpenState::Closing);
        assert_eq!(OpenState::Opening.request_close(), OpenState::Closed);
    }
}
