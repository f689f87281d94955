//! View module - presents the layout's render state on a softbuffer surface
//!
//! All painting lives in `edgedrawer::render::paint`; this side only owns the
//! surface and keeps it sized to the window.

use anyhow::Result;
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::Window;

use edgedrawer::model::DrawerLayout;
use edgedrawer::render::paint::{paint_frame, Canvas};
use edgedrawer::theme::Theme;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<Self> {
        let size = window.inner_size();
        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface
                .resize(w, h)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        Ok(Self {
            surface,
            width: size.width,
            height: size.height,
        })
    }

    pub fn render(&mut self, layout: &DrawerLayout, theme: &Theme, size: (u32, u32)) -> Result<()> {
        // Minimized windows report a zero size; there is nothing to present
        let (Some(w), Some(h)) = (NonZeroU32::new(size.0), NonZeroU32::new(size.1)) else {
            return Ok(());
        };

        if self.width != size.0 || self.height != size.1 {
            self.width = size.0;
            self.height = size.1;
            self.surface
                .resize(w, h)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        let state = layout.render_state();
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;

        let mut canvas = Canvas::new(&mut buffer, self.width as usize, self.height as usize);
        paint_frame(&mut canvas, &state, theme);

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
