//! CPU painting into an ARGB framebuffer
//!
//! Used by the demo host with softbuffer; any host with a `&mut [u32]`
//! surface can call [`paint_frame`].

use crate::geometry::Rect;
use crate::panel::DrawerEdge;
use crate::render::{EdgeShadow, RenderState};
use crate::theme::{Color, Theme};

/// Framebuffer view: pixels plus dimensions
pub struct Canvas<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Pixel span of `rect` clipped to the canvas, as `(x0, y0, x1, y1)`
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let bounds = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let clipped = rect.intersect(&bounds)?;
        let x0 = clipped.x.floor().max(0.0) as usize;
        let y0 = clipped.y.floor().max(0.0) as usize;
        let x1 = (clipped.right().ceil() as usize).min(self.width);
        let y1 = (clipped.bottom().ceil() as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Fill `rect`, alpha-blending over what is there
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let src = color.to_argb_u32();
        for py in y0..y1 {
            let row = py * self.width;
            for px in x0..x1 {
                if let Some(dst) = self.buffer.get_mut(row + px) {
                    *dst = blend_pixel(src, *dst);
                }
            }
        }
    }

    /// Horizontal gradient from `color` at the `solid` side to transparent
    pub fn fill_gradient(&mut self, rect: Rect, color: Color, solid_on_left: bool) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let span = rect.width.max(1.0);
        for px in x0..x1 {
            let t = ((px as f32 + 0.5 - rect.x) / span).clamp(0.0, 1.0);
            let strength = if solid_on_left { 1.0 - t } else { t };
            let src = color.scale_alpha(strength).to_argb_u32();
            for py in y0..y1 {
                if let Some(dst) = self.buffer.get_mut(py * self.width + px) {
                    *dst = blend_pixel(src, *dst);
                }
            }
        }
    }
}

/// Alpha-blend `src` over `dst`; both ARGB, result is opaque
#[inline]
pub fn blend_pixel(src: u32, dst: u32) -> u32 {
    let alpha = (src >> 24) & 0xFF;
    if alpha == 0xFF {
        return src;
    }
    if alpha == 0 {
        return dst;
    }

    let inv_alpha = 255 - alpha;

    let r = ((((src >> 16) & 0xFF) * alpha + ((dst >> 16) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let g = ((((src >> 8) & 0xFF) * alpha + ((dst >> 8) & 0xFF) * inv_alpha) / 255) & 0xFF;
    let b = (((src & 0xFF) * alpha + (dst & 0xFF) * inv_alpha) / 255) & 0xFF;

    0xFF000000 | (r << 16) | (g << 8) | b
}

fn paint_shadow(canvas: &mut Canvas<'_>, shadow: &EdgeShadow) {
    // Darkest next to the drawer
    let solid_on_left = shadow.edge == DrawerEdge::Left;
    canvas.fill_gradient(shadow.rect, shadow.color, solid_on_left);
}

/// Paint one frame: content, scrim, drawers, then edge shadows
pub fn paint_frame(canvas: &mut Canvas<'_>, state: &RenderState, theme: &Theme) {
    canvas.buffer.fill(theme.content.to_argb_u32());

    // Stripes make content motion behind the scrim visible
    let stripe = 40.0;
    let mut y = 0.0;
    while y < canvas.height as f32 {
        canvas.fill_rect(
            Rect::new(0.0, y, canvas.width as f32, stripe / 2.0),
            theme.content_stripe,
        );
        y += stripe;
    }

    if let Some(scrim) = &state.scrim {
        canvas.fill_rect(scrim.rect, scrim.color);
    }

    for frame in &state.panels {
        if let Some(edge) = frame.edge {
            canvas.fill_rect(frame.rect, theme.drawer(edge));
        }
    }

    for shadow in &state.shadows {
        paint_shadow(canvas, shadow);
    }
}
