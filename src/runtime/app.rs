use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::Window;

use edgedrawer::cli::StartupConfig;
use edgedrawer::commands::Cmd;
use edgedrawer::config::DrawerConfig;
use edgedrawer::geometry::Size;
use edgedrawer::messages::{LayoutMsg, Msg, PointerEvent};
use edgedrawer::model::DrawerLayout;
use edgedrawer::panel::{Gravity, PanelId};
use edgedrawer::state::SavedState;
use edgedrawer::theme::Theme;
use edgedrawer::update::update;

use super::input::key_to_msg;
use crate::view::Renderer;

/// Mouse stands in for a single finger
const MOUSE_POINTER: u32 = 0;

/// Logical drawer sizes; side drawers span the height, the bottom one the width
const SIDE_DRAWER_WIDTH: f64 = 280.0;
const BOTTOM_DRAWER_HEIGHT: f64 = 220.0;

/// Panels attached by the playground
#[derive(Debug, Clone, Copy)]
struct PanelIds {
    content: PanelId,
    start: PanelId,
    end: PanelId,
    bottom: PanelId,
}

pub struct App {
    layout: DrawerLayout,
    panels: Option<PanelIds>,
    startup: StartupConfig,
    theme: Theme,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    /// Origin of the monotonic clock handed to the layout
    epoch: Instant,
    window_size: (u32, u32),
    scale_factor: f64,
    mouse_position: Option<(f64, f64)>,
    left_mouse_down: bool,
    /// A settle animation asked for another frame
    frame_requested: bool,
    /// Pending peek timers, fired from `about_to_wait`
    timers: Vec<(Instant, Msg)>,
    state_path: Option<PathBuf>,
}

impl App {
    pub fn new(window_width: u32, window_height: u32, startup: StartupConfig) -> Self {
        let theme = startup.config.theme.clone();
        Self {
            layout: DrawerLayout::new(startup.config.clone()),
            panels: None,
            startup,
            theme,
            renderer: None,
            window: None,
            context: None,
            epoch: Instant::now(),
            window_size: (window_width, window_height),
            scale_factor: 1.0,
            mouse_position: None,
            left_mouse_down: false,
            frame_requested: false,
            timers: Vec::new(),
            state_path: edgedrawer::config_paths::state_file(),
        }
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn init_renderer(&mut self, window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<()> {
        let size = window.inner_size();
        self.window_size = (size.width, size.height);
        self.scale_factor = window.scale_factor();
        self.renderer = Some(Renderer::new(window, context)?);
        self.build_layout()?;
        Ok(())
    }

    /// Attach content and the three drawers in physical pixels
    fn build_layout(&mut self) -> Result<()> {
        let config = DrawerConfig {
            scale_factor: self.scale_factor,
            ..self.startup.config.clone()
        };
        let mut layout = DrawerLayout::new(config);

        let (content_size, side, bottom) = self.panel_sizes();
        let panels = PanelIds {
            content: layout.attach_content(content_size)?,
            start: layout.attach_drawer(Gravity::Start, side)?,
            end: layout.attach_drawer(Gravity::End, side)?,
            bottom: layout.attach_drawer(Gravity::Bottom, bottom)?,
        };
        layout.set_container_size(content_size);

        if self.startup.restore {
            if let Some(saved) = self.state_path.as_deref().and_then(load_saved_state) {
                layout.restore_state(&saved)?;
            }
        }

        tracing::info!(
            width = content_size.width,
            height = content_size.height,
            direction = ?layout.direction(),
            "drawer layout ready"
        );
        self.layout = layout;
        self.panels = Some(panels);
        Ok(())
    }

    fn panel_sizes(&self) -> (Size, Size, Size) {
        let (width, height) = (self.window_size.0 as f32, self.window_size.1 as f32);
        let side_width = (SIDE_DRAWER_WIDTH * self.scale_factor) as f32;
        let bottom_height = (BOTTOM_DRAWER_HEIGHT * self.scale_factor) as f32;
        (
            Size::new(width, height),
            Size::new(side_width.min(width), height),
            Size::new(width, bottom_height.min(height)),
        )
    }

    /// Route a message through `update`, logging rejected operations
    fn dispatch(&mut self, msg: Msg) -> Option<Cmd> {
        match update(&mut self.layout, msg) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::warn!("drawer operation rejected: {}", e);
                None
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Option<Cmd> {
        self.window_size = (width, height);
        let panels = self.panels?;
        let (content_size, side, bottom) = self.panel_sizes();

        let mut cmds = Vec::new();
        for (panel, size) in [
            (panels.content, content_size),
            (panels.start, side),
            (panels.end, side),
            (panels.bottom, bottom),
        ] {
            cmds.extend(self.dispatch(Msg::Layout(LayoutMsg::PanelMeasured { panel, size })));
        }
        cmds.extend(self.dispatch(Msg::Layout(LayoutMsg::Resize(content_size))));
        Some(Cmd::batch(cmds))
    }

    fn pointer(&mut self, event: PointerEvent) -> Option<Cmd> {
        self.dispatch(Msg::Pointer(event))
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                let msg = key_to_msg(&self.layout, event.physical_key)?;
                self.dispatch(msg)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                if !self.left_mouse_down {
                    return None;
                }
                let now = self.now();
                self.pointer(PointerEvent::moved(
                    MOUSE_POINTER,
                    position.x as f32,
                    position.y as f32,
                    now,
                ))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position?;
                let now = self.now();
                match state {
                    ElementState::Pressed => {
                        self.left_mouse_down = true;
                        self.pointer(PointerEvent::down(MOUSE_POINTER, x as f32, y as f32, now))
                    }
                    ElementState::Released => {
                        if !self.left_mouse_down {
                            return None;
                        }
                        self.left_mouse_down = false;
                        self.pointer(PointerEvent::up(MOUSE_POINTER, x as f32, y as f32, now))
                    }
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                if !self.left_mouse_down {
                    return None;
                }
                self.left_mouse_down = false;
                let now = self.now();
                self.pointer(PointerEvent::cancel(now))
            }
            WindowEvent::Focused(false) => {
                // Losing focus mid-drag is a cancel
                if !self.left_mouse_down {
                    return None;
                }
                self.left_mouse_down = false;
                let now = self.now();
                self.pointer(PointerEvent::cancel(now))
            }
            WindowEvent::RedrawRequested => {
                if self.frame_requested {
                    self.frame_requested = false;
                    let now = self.now();
                    if let Some(cmd) = self.dispatch(Msg::Frame { now }) {
                        self.process_cmd(cmd);
                    }
                }
                if let Err(e) = self.render() {
                    tracing::error!("render failed: {}", e);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.layout, &self.theme, self.window_size)?;
        }
        Ok(())
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::RequestFrame => {
                self.frame_requested = true;
            }
            Cmd::SchedulePeek {
                edge,
                handle,
                delay,
            } => {
                self.timers
                    .push((Instant::now() + delay, Msg::PeekElapsed { edge, handle }));
            }
            Cmd::CancelChildTouches => {
                // Playground content has no children of its own
                tracing::trace!("content touch canceled");
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Fire due peek timers; returns whether any of them asked for a redraw
    fn process_timers(&mut self) -> bool {
        let now = Instant::now();
        let (due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(at, _)| *at <= now);
        self.timers = pending;

        let mut needs_redraw = false;
        for (_, msg) in due {
            if let Some(cmd) = self.dispatch(msg) {
                needs_redraw |= cmd.needs_redraw();
                self.process_cmd(cmd);
            }
        }
        needs_redraw
    }

    fn save_state(&self) {
        let Some(path) = &self.state_path else {
            return;
        };
        if let Err(e) = self.layout.save_state().save(path) {
            tracing::warn!("Failed to save drawer state to {}: {}", path.display(), e);
        }
    }
}

fn load_saved_state(path: &std::path::Path) -> Option<SavedState> {
    if !path.exists() {
        return None;
    }
    match SavedState::load(path) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!("Ignoring saved state at {}: {}", path.display(), e);
            None
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("edgedrawer")
            .with_inner_size(LogicalSize::new(self.window_size.0, self.window_size.1));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let context = match Context::new(Rc::clone(&window)) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Failed to create softbuffer context: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_renderer(Rc::clone(&window), &context) {
            tracing::error!("Failed to initialize renderer: {}", e);
            event_loop.exit();
            return;
        }
        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let should_exit = matches!(event, WindowEvent::CloseRequested);
        let should_redraw = if let Some(window) = &self.window {
            if window_id == window.id() && !should_exit {
                if let Some(cmd) = self.handle_event(&event) {
                    let needs_redraw = cmd.needs_redraw();
                    self.process_cmd(cmd);
                    needs_redraw
                } else {
                    false
                }
            } else {
                false
            }
        } else {
            false
        };

        if should_exit {
            self.save_state();
            event_loop.exit();
        } else if should_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.process_timers() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if self.frame_requested {
            event_loop.set_control_flow(ControlFlow::Poll);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else if let Some(next) = self.timers.iter().map(|(at, _)| *at).min() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(next));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
