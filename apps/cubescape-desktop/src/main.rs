use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use cubescape_common::MotionConfig;
use cubescape_input::{InputEvent, Key};
use cubescape_persist::SceneFileStore;
use cubescape_render::Renderer;
use cubescape_render_wgpu::WgpuRenderer;
use cubescape_runtime::{FixedStep, Session};
use cubescape_tools::SceneInspector;
use egui::Context as EguiContext;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(
    name = "cubescape-desktop",
    about = "First-person viewer for prompt-generated cube scenes"
)]
struct Cli {
    /// Scene template to generate on startup (house, tower, wall, bridge, room, city, maze)
    #[arg(short, long)]
    prompt: Option<String>,

    /// Directory holding scene.json for save (F5) and load (F9)
    #[arg(long, default_value = "./scene_data")]
    data_dir: PathBuf,

    /// Walking camera: taller eye height, no jumping
    #[arg(long)]
    walk: bool,

    /// RNG seed for colors and random templates
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::Forward),
        KeyCode::KeyS => Some(Key::Backward),
        KeyCode::KeyA => Some(Key::Left),
        KeyCode::KeyD => Some(Key::Right),
        KeyCode::Space => Some(Key::Jump),
        _ => None,
    }
}

/// Viewer state independent of the GPU.
struct AppState {
    session: Session,
    rng: StdRng,
    data_dir: PathBuf,
    prompt_edit: String,
    show_hud: bool,
    status: String,
    clock: FixedStep,
    last_frame: Instant,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let config = if cli.walk {
            MotionConfig::walking()
        } else {
            MotionConfig::jumping()
        };
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = match &cli.prompt {
            Some(prompt) => Session::with_prompt(prompt, config, &mut rng),
            None => Session::new(config),
        };
        Self {
            session,
            rng,
            data_dir: cli.data_dir.clone(),
            prompt_edit: cli.prompt.clone().unwrap_or_default(),
            show_hud: true,
            status: String::new(),
            clock: FixedStep::default(),
            last_frame: Instant::now(),
        }
    }

    /// Run whatever ticks are due since the last frame.
    fn advance(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        for _ in 0..self.clock.advance(dt) {
            self.session.update();
        }
        let events = self.session.drain_scene_events();
        if !events.is_empty() {
            tracing::debug!(count = events.len(), "scene changed");
        }
    }

    fn regenerate(&mut self) {
        let prompt = self.prompt_edit.trim().to_owned();
        self.session.regenerate(&prompt, &mut self.rng);
        self.status = format!("generated {} cubes for \"{prompt}\"", self.session.scene().len());
    }

    fn add_cube(&mut self) {
        let cube = self.session.add_random_cube(&mut self.rng);
        tracing::info!(color = %cube.color, "added random cube");
    }

    fn save_scene(&mut self) {
        let result = SceneFileStore::open(&self.data_dir).and_then(|mut store| {
            self.session.save(&mut store)?;
            Ok(store.scene_path())
        });
        match result {
            Ok(path) => self.status = format!("saved to {}", path.display()),
            Err(e) => {
                tracing::error!("failed to save scene: {e}");
                self.status = format!("save failed: {e}");
            }
        }
    }

    fn load_scene(&mut self) {
        let result = SceneFileStore::open(&self.data_dir)
            .and_then(|mut store| self.session.load(&mut store));
        self.status = match result {
            Ok(true) => format!("loaded {} cubes", self.session.scene().len()),
            Ok(false) => "no scene file to load".to_owned(),
            Err(e) => {
                tracing::error!("failed to load scene: {e}");
                format!("load failed: {e}")
            }
        };
    }

    /// Keys that act immediately rather than feeding the movement input.
    fn handle_command_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyN => self.add_cube(),
            KeyCode::F5 => self.save_scene(),
            KeyCode::F9 => self.load_scene(),
            KeyCode::F1 => self.show_hud = !self.show_hud,
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if let Some(prompt) = self.session.prompt() {
            egui::Area::new(egui::Id::new("prompt_label"))
                .anchor(egui::Align2::CENTER_TOP, [0.0, 12.0])
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("Prompt: {prompt}"))
                            .size(20.0)
                            .color(egui::Color32::WHITE)
                            .background_color(egui::Color32::from_black_alpha(140)),
                    );
                });
        }

        if !self.show_hud {
            return;
        }

        let pose = self.session.pose();
        let summary = SceneInspector::summary(self.session.scene().objects());
        let nearest = SceneInspector::nearest(self.session.scene().objects(), pose.position);

        egui::SidePanel::left("hud").default_width(260.0).show(ctx, |ui| {
            ui.heading("Cubescape");
            ui.separator();
            ui.label(format!("Frame: {}", self.session.frame()));
            ui.label(format!(
                "Cubes: {}  Distinct: {}",
                summary.object_count, summary.distinct_positions
            ));
            ui.label(format!(
                "Eye: ({:.1}, {:.1}, {:.1})",
                pose.position.x, pose.position.y, pose.position.z
            ));
            ui.label(format!("Yaw: {:.2}  Pitch: {:.2}", pose.yaw, pose.pitch));
            if let Some(near) = nearest {
                ui.label(format!("Nearest cube: {:.2} away", near.planar_distance));
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Prompt:");
                ui.text_edit_singleline(&mut self.prompt_edit);
            });
            if ui.button("Generate").clicked() {
                self.regenerate();
            }
            if ui.button("Add Cube (N)").clicked() {
                self.add_cube();
            }
            ui.horizontal(|ui| {
                if ui.button("Save (F5)").clicked() {
                    self.save_scene();
                }
                if ui.button("Load (F9)").clicked() {
                    self.load_scene();
                }
            });
            if !self.status.is_empty() {
                ui.small(&self.status);
            }

            ui.separator();
            let hint = if self.session.look_locked() {
                "Esc: release mouse | WASD: move | Space: jump"
            } else {
                "Click the view to look around | F1: toggle HUD"
            };
            ui.small(hint);
        });
    }
}

/// Window, surface and the two renderers drawing into it.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn init(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Cubescape")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubescape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Grab or release the pointer. Returns whether look-lock is now engaged.
    fn set_cursor_captured(&self, captured: bool) -> bool {
        if !captured {
            if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("failed to release cursor: {e}");
            }
            self.window.set_cursor_visible(true);
            return false;
        }
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                true
            }
            Err(e) => {
                tracing::warn!("pointer lock unavailable: {e}");
                false
            }
        }
    }

    fn draw(&mut self, egui_ctx: &EguiContext, state: &mut AppState) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .frame(&self.device, &self.queue, &view)
            .render(&state.session.pose(), state.session.scene().objects());

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, &mut encoder, &paint_jobs, &screen);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn set_look_lock(&mut self, locked: bool) {
        let Some(gpu) = &self.gpu else { return };
        let engaged = gpu.set_cursor_captured(locked);
        if engaged != self.state.session.look_locked() {
            self.state.session.handle_input(InputEvent::LookLock(engaged));
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::init(event_loop, &self.egui_ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }
            WindowEvent::Focused(false) => self.set_look_lock(false),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if let Some(key) = key_for(code) {
                    let event = if pressed {
                        InputEvent::KeyDown(key)
                    } else {
                        InputEvent::KeyUp(key)
                    };
                    self.state.session.handle_input(event);
                } else if pressed && !repeat {
                    if code == KeyCode::Escape {
                        self.set_look_lock(false);
                    } else {
                        self.state.handle_command_key(code);
                    }
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if !self.state.session.look_locked() {
                    self.set_look_lock(true);
                }
            }
            WindowEvent::RedrawRequested => {
                self.state.advance();
                if let Some(gpu) = &mut self.gpu {
                    gpu.draw(&self.egui_ctx, &mut self.state);
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.session.handle_input(InputEvent::PointerMove {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(prompt = ?cli.prompt, walk = cli.walk, "cubescape-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(&cli));
    event_loop.run_app(&mut app)?;

    Ok(())
}
