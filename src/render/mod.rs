//! Render state - what the host should draw for the current frame
//!
//! Pure functions of the model: panel placement, scrim and edge shadows.
//! Painting into a framebuffer lives in [`paint`].

pub mod paint;

use crate::config::ShadowStrategy;
use crate::geometry::Rect;
use crate::model::DrawerModel;
use crate::panel::{DrawerEdge, DrawerRegistry, PanelId};
use crate::theme::Color;

/// Dim layer over the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrim {
    pub opacity: f32,
    /// Configured scrim color with alpha scaled by `opacity`
    pub color: Color,
    /// Content area not covered by an on-screen left/right drawer
    pub rect: Rect,
}

/// Edge shadow beside a left/right drawer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeShadow {
    pub edge: DrawerEdge,
    pub alpha: f32,
    pub color: Color,
    pub rect: Rect,
}

/// Placement of one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub id: PanelId,
    /// `None` for the content panel
    pub edge: Option<DrawerEdge>,
    pub rect: Rect,
    pub openness: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderState {
    /// Panels in paint order, content first
    pub panels: Vec<PanelFrame>,
    pub scrim: Option<Scrim>,
    pub shadows: Vec<EdgeShadow>,
    /// Depth the host should give drawers when shadows are delegated
    pub elevation: Option<f32>,
}

/// Scrim opacity: the largest openness among left/right drawers
///
/// The bottom drawer never dims the content.
pub fn scrim_opacity(registry: &DrawerRegistry) -> f32 {
    registry
        .drawers()
        .filter(|panel| panel.edge != Some(DrawerEdge::Bottom))
        .map(|panel| panel.openness)
        .fold(0.0, f32::max)
}

/// Shadow alpha for a drawer edge that has travelled `visible` pixels
pub fn shadow_alpha(visible: f32, edge_size: f32) -> f32 {
    if edge_size <= 0.0 {
        return if visible > 0.0 { 1.0 } else { 0.0 };
    }
    (visible / edge_size).clamp(0.0, 1.0)
}

impl RenderState {
    pub fn compute(model: &DrawerModel) -> Self {
        let config = model.config();
        let container = Rect::from_size(model.container());
        let registry = model.registry();

        let panels: Vec<PanelFrame> = registry
            .panels()
            .filter_map(|panel| {
                let rect = model.panel_rect(panel.id).ok()?;
                Some(PanelFrame {
                    id: panel.id,
                    edge: panel.edge,
                    rect,
                    openness: panel.openness,
                })
            })
            .collect();

        let opacity = scrim_opacity(registry);
        let scrim = (opacity > 0.0).then(|| {
            let mut left = container.x;
            let mut right = container.right();
            for frame in panels.iter().filter(|f| f.openness > 0.0) {
                match frame.edge {
                    Some(DrawerEdge::Left) => left = left.max(frame.rect.right()),
                    Some(DrawerEdge::Right) => right = right.min(frame.rect.x),
                    _ => {}
                }
            }
            Scrim {
                opacity,
                color: config.scrim_color.scale_alpha(opacity),
                rect: Rect::new(left, container.y, (right - left).max(0.0), container.height),
            }
        });

        let mut shadows = Vec::new();
        let mut elevation = None;
        match &config.shadow {
            ShadowStrategy::Elevation { elevation: depth } => elevation = Some(*depth),
            ShadowStrategy::Drawable(sides) => {
                let direction = registry.direction();
                for edge in [DrawerEdge::Left, DrawerEdge::Right] {
                    let spec = match edge {
                        DrawerEdge::Left => sides.resolve_left(direction),
                        _ => sides.resolve_right(direction),
                    };
                    let (Some(spec), Some(geom), Some(panel)) =
                        (spec, model.geometry(edge), registry.drawer(edge))
                    else {
                        continue;
                    };
                    if panel.openness <= 0.0 {
                        continue;
                    }
                    let alpha =
                        shadow_alpha(geom.visible_distance(panel.openness), config.edge_size_px());
                    let rect = geom.rect(panel.openness);
                    let x = match edge {
                        DrawerEdge::Left => rect.right(),
                        _ => rect.x - spec.width,
                    };
                    shadows.push(EdgeShadow {
                        edge,
                        alpha,
                        color: spec.color.scale_alpha(alpha),
                        rect: Rect::new(x, rect.y, spec.width, rect.height),
                    });
                }
            }
        }

        Self {
            panels,
            scrim,
            shadows,
            elevation,
        }
    }
}
