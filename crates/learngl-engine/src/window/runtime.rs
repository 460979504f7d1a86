use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx, LoopState, StartCtx};
use crate::device::{Gpu, GpuInit};
use crate::error::StartupError;
use crate::input::platform::translate_window_event;
use crate::input::InputState;
use crate::time::ContextClock;

/// Window configuration.
///
/// `size` is the one place the window size is defined.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Requested client area in physical pixels.
    pub size: PhysicalSize<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Learn Open GL".to_string(),
            size: PhysicalSize::new(800, 600),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` in a single window until the loop closes.
    ///
    /// Returns the fatal error, if any, after the window and context are released.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop =
            EventLoop::new().map_err(|e| StartupError::EventLoop(e.to_string()))?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Runtime response to a window event.
#[derive(Debug, Copy, Clone, PartialEq)]
enum WindowAction {
    /// Raise the close flag and tear down without rendering another frame.
    Close,
    /// Reconfigure the surface to `size`; draws then cover `viewport`.
    Resize {
        size: PhysicalSize<u32>,
        viewport: Viewport,
    },
    Redraw,
    Ignore,
}

fn window_action(event: &WindowEvent) -> WindowAction {
    match event {
        WindowEvent::CloseRequested => WindowAction::Close,
        WindowEvent::Resized(size) => WindowAction::Resize {
            size: *size,
            viewport: Viewport::from_framebuffer_size(size.width, size.height),
        },
        WindowEvent::RedrawRequested => WindowAction::Redraw,
        _ => WindowAction::Ignore,
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,
    clock: ContextClock,
    viewport: Viewport,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    loop_state: LoopState,
    started: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            loop_state: LoopState::Running,
            started: false,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| StartupError::WindowCreation(e.to_string()))?;

        let size = window.inner_size();
        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            input: InputState::default(),
            clock: ContextClock::start(),
            viewport: Viewport::from_framebuffer_size(size.width, size.height),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        // Elapsed time is measured from context creation.
        entry.with_clock_mut(|c| *c = ContextClock::start());

        log::info!(
            "window `{}` {}x{} on {:?}",
            self.config.title,
            size.width,
            size.height,
            entry.borrow_gpu().backend()
        );

        let app = &mut self.app;
        entry
            .with(|fields| {
                let ctx = StartCtx {
                    gpu: fields.gpu,
                    viewport: *fields.viewport,
                };
                app.on_start(&ctx)
            })
            .context("application start failed")?;

        self.started = true;
        self.entry = Some(entry);
        Ok(())
    }

    /// Records a fatal error and closes the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.fatal = Some(err);
        self.loop_state.request_close();
        self.teardown(event_loop);
    }

    /// Releases app resources while the context is alive, then the context and window.
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            self.app.on_exit();
            self.started = false;
        }

        if self.entry.take().is_some() {
            log::debug!("window and graphics context released");
        }

        event_loop.exit();
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, viewport: Viewport) {
        let Some(entry) = self.entry.as_mut() else { return };

        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        entry.with_viewport_mut(|v| *v = viewport);

        log::debug!("resized to {}x{}", new_size.width, new_size.height);
        entry.with_window(|w| w.request_redraw());
    }

    /// Drives one frame: input poll, app frame, then teardown if the loop closed.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let (app, loop_state) = (&mut self.app, &mut self.loop_state);

        let control = entry.with_mut(|fields| {
            loop_state.poll_input(fields.input);

            let time = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                input: fields.input,
                time,
                viewport: *fields.viewport,
            };

            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.loop_state.request_close();
        }

        if !self.loop_state.is_running() {
            log::debug!("render loop closing");
            self.teardown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || !self.loop_state.is_running() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.loop_state.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the animation never settles.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.loop_state.is_running() {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            if let Some(entry) = self.entry.as_mut() {
                entry.with_input_mut(|input| input.apply_event(&ev));
            }
        }

        match window_action(&event) {
            WindowAction::Close => {
                self.loop_state.request_close();
                self.teardown(event_loop);
            }

            WindowAction::Resize { size, viewport } => self.resize(size, viewport),

            WindowAction::Redraw => self.frame(event_loop),

            WindowAction::Ignore => {}
        }
    }
}
