//! Edge identities, lock policies and per-edge travel math
//!
//! This module defines the core vocabulary for the drawer system: which edge
//! a drawer is anchored to, how logical START/END gravities resolve through
//! the layout direction, and how a drawer's openness maps to a screen position
//! (and back) for each edge.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Absolute edge a drawer can be anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerEdge {
    Left,
    Right,
    Bottom,
}

impl DrawerEdge {
    /// All edges for iteration, in tracker order
    pub const ALL: [DrawerEdge; 3] = [DrawerEdge::Left, DrawerEdge::Right, DrawerEdge::Bottom];

    /// Stable index into per-edge arrays
    pub const fn index(self) -> usize {
        match self {
            DrawerEdge::Left => 0,
            DrawerEdge::Right => 1,
            DrawerEdge::Bottom => 2,
        }
    }

    /// Returns the axis a drawer on this edge slides along
    pub fn axis(&self) -> Axis {
        match self {
            DrawerEdge::Left | DrawerEdge::Right => Axis::Horizontal,
            DrawerEdge::Bottom => Axis::Vertical,
        }
    }

    /// Sign of pointer motion (along the axis) that opens the drawer
    pub fn opening_sign(&self) -> f32 {
        match self {
            DrawerEdge::Left => 1.0,
            DrawerEdge::Right | DrawerEdge::Bottom => -1.0,
        }
    }

    /// The two other edges, used for mutual exclusion
    pub fn others(&self) -> [DrawerEdge; 2] {
        match self {
            DrawerEdge::Left => [DrawerEdge::Right, DrawerEdge::Bottom],
            DrawerEdge::Right => [DrawerEdge::Left, DrawerEdge::Bottom],
            DrawerEdge::Bottom => [DrawerEdge::Left, DrawerEdge::Right],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrawerEdge::Left => "left",
            DrawerEdge::Right => "right",
            DrawerEdge::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for DrawerEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis a drawer slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of a point along this axis
    pub fn of(&self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Component of a point across this axis
    pub fn cross(&self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }
}

/// Text/layout direction used to resolve START and END
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    pub fn flipped(self) -> Self {
        match self {
            LayoutDirection::Ltr => LayoutDirection::Rtl,
            LayoutDirection::Rtl => LayoutDirection::Ltr,
        }
    }
}

/// Edge as requested by the application: absolute or direction-relative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    Left,
    Right,
    Bottom,
    Start,
    End,
}

impl Gravity {
    /// Resolve to an absolute edge for the given direction
    pub fn resolve(self, direction: LayoutDirection) -> DrawerEdge {
        match (self, direction) {
            (Gravity::Left, _) => DrawerEdge::Left,
            (Gravity::Right, _) => DrawerEdge::Right,
            (Gravity::Bottom, _) => DrawerEdge::Bottom,
            (Gravity::Start, LayoutDirection::Ltr) | (Gravity::End, LayoutDirection::Rtl) => {
                DrawerEdge::Left
            }
            (Gravity::Start, LayoutDirection::Rtl) | (Gravity::End, LayoutDirection::Ltr) => {
                DrawerEdge::Right
            }
        }
    }
}

impl From<DrawerEdge> for Gravity {
    fn from(edge: DrawerEdge) -> Self {
        match edge {
            DrawerEdge::Left => Gravity::Left,
            DrawerEdge::Right => Gravity::Right,
            DrawerEdge::Bottom => Gravity::Bottom,
        }
    }
}

/// Per-edge policy restricting user-driven open/close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// Drawer responds to user gestures
    Unlocked,
    /// Drawer stays closed; gestures are ignored
    LockedClosed,
    /// Drawer stays open; gestures are ignored
    LockedOpen,
    /// No explicit mode at this level; defer to the logical/absolute fallback
    #[default]
    Undefined,
}

impl LockMode {
    /// Next mode in the demo's lock cycle
    pub fn cycle_next(self) -> LockMode {
        match self {
            LockMode::Unlocked | LockMode::Undefined => LockMode::LockedClosed,
            LockMode::LockedClosed => LockMode::LockedOpen,
            LockMode::LockedOpen => LockMode::Unlocked,
        }
    }
}

/// Travel math for one drawer on one edge
///
/// Position is the leading coordinate of the panel rectangle: `x` for
/// left/right drawers, `y` (top) for the bottom drawer. Openness is the
/// normalized position between the closed and open resting places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub edge: DrawerEdge,
    pub container: Size,
    pub panel: Size,
    /// Part of a bottom drawer that stays on screen when closed
    pub reveal: f32,
}

impl EdgeGeometry {
    pub fn new(edge: DrawerEdge, container: Size, panel: Size, reveal: f32) -> Self {
        let reveal = match edge {
            DrawerEdge::Bottom => reveal.clamp(0.0, panel.height.max(0.0)),
            DrawerEdge::Left | DrawerEdge::Right => 0.0,
        };
        Self {
            edge,
            container,
            panel,
            reveal,
        }
    }

    /// Distance travelled between closed and open, in pixels
    pub fn range(&self) -> f32 {
        match self.edge {
            DrawerEdge::Left | DrawerEdge::Right => self.panel.width.max(0.0),
            DrawerEdge::Bottom => (self.panel.height - self.reveal).max(0.0),
        }
    }

    /// Container extent along the slide axis
    pub fn axis_extent(&self) -> f32 {
        match self.edge.axis() {
            Axis::Horizontal => self.container.width,
            Axis::Vertical => self.container.height,
        }
    }

    /// Leading coordinate for the given openness
    pub fn position(&self, openness: f32) -> f32 {
        let w = self.panel.width;
        match self.edge {
            DrawerEdge::Left => -w + w * openness,
            DrawerEdge::Right => self.container.width - w * openness,
            DrawerEdge::Bottom => self.container.height - self.reveal - self.range() * openness,
        }
    }

    /// Inverse of [`position`](Self::position), clamped to `[0, 1]`
    pub fn openness_at(&self, position: f32) -> f32 {
        let range = self.range();
        if range <= 0.0 {
            return 0.0;
        }
        let openness = match self.edge {
            DrawerEdge::Left => (self.panel.width + position) / range,
            DrawerEdge::Right => (self.container.width - position) / range,
            DrawerEdge::Bottom => (self.container.height - self.reveal - position) / range,
        };
        openness.clamp(0.0, 1.0)
    }

    /// Clamp a leading coordinate to the edge's legal range
    pub fn clamp_position(&self, position: f32) -> f32 {
        let (min, max) = match self.edge {
            DrawerEdge::Left => (-self.panel.width, 0.0),
            DrawerEdge::Right => (
                self.container.width - self.panel.width,
                self.container.width,
            ),
            DrawerEdge::Bottom => (
                self.container.height - self.panel.height,
                self.container.height - self.reveal,
            ),
        };
        position.clamp(min, max.max(min))
    }

    /// Panel rectangle at the given openness
    pub fn rect(&self, openness: f32) -> Rect {
        let position = self.position(openness);
        match self.edge {
            DrawerEdge::Left | DrawerEdge::Right => {
                Rect::new(position, 0.0, self.panel.width, self.panel.height)
            }
            DrawerEdge::Bottom => Rect::new(0.0, position, self.panel.width, self.panel.height),
        }
    }

    /// How far the panel's leading edge has travelled onto the screen
    pub fn visible_distance(&self, openness: f32) -> f32 {
        let position = self.position(openness);
        match self.edge {
            DrawerEdge::Left => position + self.panel.width,
            DrawerEdge::Right => self.container.width - position,
            DrawerEdge::Bottom => self.container.height - position,
        }
    }

    /// Whether a point lies inside the edge-sensing margin of this edge
    pub fn in_edge_margin(&self, point: Point, margin: f32) -> bool {
        match self.edge {
            DrawerEdge::Left => point.x < margin,
            DrawerEdge::Right => point.x > self.container.width - margin,
            DrawerEdge::Bottom => point.y > self.container.height - margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(edge: DrawerEdge) -> EdgeGeometry {
        EdgeGeometry::new(edge, Size::new(800.0, 600.0), Size::new(200.0, 150.0), 0.0)
    }

    #[test]
    fn test_gravity_resolution_follows_direction() {
        assert_eq!(Gravity::Start.resolve(LayoutDirection::Ltr), DrawerEdge::Left);
        assert_eq!(Gravity::Start.resolve(LayoutDirection::Rtl), DrawerEdge::Right);
        assert_eq!(Gravity::End.resolve(LayoutDirection::Ltr), DrawerEdge::Right);
        assert_eq!(Gravity::End.resolve(LayoutDirection::Rtl), DrawerEdge::Left);
        assert_eq!(Gravity::Bottom.resolve(LayoutDirection::Rtl), DrawerEdge::Bottom);
    }

    #[test]
    fn test_position_and_openness_are_inverse() {
        for edge in DrawerEdge::ALL {
            let g = geom(edge);
            for openness in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let back = g.openness_at(g.position(openness));
                assert!(
                    (back - openness).abs() < 1e-5,
                    "{edge}: {openness} -> {back}"
                );
            }
        }
    }

    #[test]
    fn test_left_positions() {
        let g = geom(DrawerEdge::Left);
        assert_eq!(g.position(0.0), -200.0);
        assert_eq!(g.position(1.0), 0.0);
        assert_eq!(g.clamp_position(50.0), 0.0);
        assert_eq!(g.clamp_position(-500.0), -200.0);
    }

    #[test]
    fn test_right_positions() {
        let g = geom(DrawerEdge::Right);
        assert_eq!(g.position(0.0), 800.0);
        assert_eq!(g.position(1.0), 600.0);
        assert_eq!(g.clamp_position(900.0), 800.0);
        assert_eq!(g.clamp_position(0.0), 600.0);
    }

    #[test]
    fn test_bottom_reveal_shifts_closed_position() {
        let g = EdgeGeometry::new(
            DrawerEdge::Bottom,
            Size::new(800.0, 600.0),
            Size::new(800.0, 150.0),
            30.0,
        );
        assert_eq!(g.range(), 120.0);
        assert_eq!(g.position(0.0), 570.0);
        assert_eq!(g.position(1.0), 450.0);
        assert_eq!(g.clamp_position(600.0), 570.0);
        assert_eq!(g.openness_at(570.0), 0.0);
        assert_eq!(g.openness_at(450.0), 1.0);
    }

    #[test]
    fn test_edge_margin() {
        let g = geom(DrawerEdge::Right);
        assert!(g.in_edge_margin(Point::new(790.0, 10.0), 20.0));
        assert!(!g.in_edge_margin(Point::new(700.0, 10.0), 20.0));
    }

    #[test]
    fn test_lock_mode_cycle() {
        assert_eq!(LockMode::Unlocked.cycle_next(), LockMode::LockedClosed);
        assert_eq!(LockMode::LockedClosed.cycle_next(), LockMode::LockedOpen);
        assert_eq!(LockMode::LockedOpen.cycle_next(), LockMode::Unlocked);
    }
}
