use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use ofrenda_common::ObjectKind;
use ofrenda_input::{Action, ActionBindings};
use ofrenda_kernel::{SceneConfig, SceneContext};
use ofrenda_render::ViewportManager;
use ofrenda_render_wgpu::{OrbitCamera, WgpuRenderer};
use ofrenda_tools::SceneInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

const LOADING_TEXT: &str = "Loading Cyberpunk Día de los Muertos...";

#[derive(Parser)]
#[command(name = "ofrenda-desktop", about = "Neon ofrenda desktop scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML scene configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

/// Application state: the scene context plus everything outside it.
struct AppState {
    config: SceneConfig,
    scene: SceneContext,
    camera: OrbitCamera,
    viewport: ViewportManager,
    bindings: ActionBindings,
    started: Instant,
    show_inspector: bool,
    dragging: bool,
}

impl AppState {
    fn new(config: SceneConfig) -> Self {
        let scene = SceneContext::new(&config);
        let camera = OrbitCamera::new(config.camera_distance, config.orbit_damping);
        let viewport = ViewportManager::new(config.fov_degrees, config.near, config.far);
        Self {
            config,
            scene,
            camera,
            viewport,
            bindings: ActionBindings::default(),
            started: Instant::now(),
            show_inspector: false,
            dragging: false,
        }
    }

    fn update(&mut self) {
        let report = self.scene.frame(self.started.elapsed());
        if report.finished_loading {
            tracing::info!("scene ready");
        }
        self.camera.update();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(projection) = self.viewport.on_resize(width, height) {
            self.camera.set_projection(projection);
        }
    }

    fn handle_key(&mut self, key: &Key) {
        match key {
            Key::Named(NamedKey::F1) => {
                self.show_inspector = !self.show_inspector;
            }
            Key::Character(text) => {
                if self.scene.is_loading() {
                    return;
                }
                if let Some(action) = text.chars().next().and_then(|c| self.bindings.resolve(c))
                {
                    self.scene.dispatch(action);
                }
            }
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if self.scene.is_loading() {
            egui::CentralPanel::default()
                .frame(egui::Frame::default().fill(egui::Color32::BLACK))
                .show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(LOADING_TEXT)
                                .size(24.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        );
                    });
                });
            ctx.request_repaint();
            return;
        }

        let player = self.scene.player();

        egui::Area::new(egui::Id::new("player_stats"))
            .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
            .show(ctx, |ui| {
                panel_frame(egui::Color32::from_rgb(0, 255, 255)).show(ui, |ui| {
                    ui.label(egui::RichText::new("⚡ Energy:").strong());
                    ui.add(
                        egui::ProgressBar::new(player.energy_fraction())
                            .desired_width(160.0)
                            .text(player.energy().to_string()),
                    );
                    ui.label(
                        egui::RichText::new(format!("☠ Offerings: {}", player.offerings()))
                            .strong(),
                    );
                });
            });

        if !player.dialog_text().is_empty() {
            egui::Area::new(egui::Id::new("dialog"))
                .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -80.0])
                .show(ctx, |ui| {
                    panel_frame(egui::Color32::from_rgb(255, 0, 255)).show(ui, |ui| {
                        ui.set_max_width(420.0);
                        ui.label(player.dialog_text());
                    });
                });
        }

        let mut clicked = Vec::new();
        egui::Area::new(egui::Id::new("actions"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                for action in Action::ALL {
                    let caption = match self.bindings.key_for(action) {
                        Some(key) => format!("{} ({key})", action.label()),
                        None => action.label().to_string(),
                    };
                    if ui
                        .add_sized([128.0, 28.0], egui::Button::new(caption))
                        .clicked()
                    {
                        clicked.push(action);
                    }
                }
            });
        for action in clicked {
            self.scene.dispatch(action);
        }

        if self.show_inspector {
            self.draw_inspector(ctx);
        }
    }

    fn draw_inspector(&self, ctx: &EguiContext) {
        let summary = SceneInspector::summary(&self.scene);
        egui::Window::new("Inspector")
            .default_pos([16.0, 140.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Seed: {}  Tick: {}", summary.seed, summary.tick));
                ui.label(format!("Hash: {:#018x}", summary.state_hash));
                ui.separator();
                for c in &summary.collections {
                    ui.label(format!(
                        "{}: {}  y=[{:.1}, {:.1}]",
                        c.kind.label(),
                        c.count,
                        c.min_y,
                        c.max_y
                    ));
                }
                ui.separator();
                let eye = self.camera.eye();
                ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z));
                if let Some(v) = self.viewport.viewport() {
                    ui.label(format!(
                        "Viewport: {}x{} (aspect {:.2})",
                        v.width,
                        v.height,
                        v.aspect()
                    ));
                }
                ui.small("F1: Toggle Inspector | LMB: Orbit | Wheel: Zoom");
            });
    }
}

fn panel_frame(stroke: egui::Color32) -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_black_alpha(190))
        .stroke(egui::Stroke::new(2.0, stroke))
        .corner_radius(8.0)
        .inner_margin(12.0)
}

/// GPU and windowing resources, created once the event loop resumes.
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
    fn new(
        event_loop: &ActiveEventLoop,
        state: &AppState,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Neon Ofrenda")
            .with_inner_size(PhysicalSize::new(
                state.config.window_width,
                state.config.window_height,
            ));
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
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ofrenda_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            state.scene.scene(),
        );

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
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
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

    fn reconfigure(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw_overlay(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        state: &mut AppState,
    ) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    fn redraw(&mut self, egui_ctx: &EguiContext, state: &mut AppState) {
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

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &state.camera,
            state.scene.scene(),
        );
        self.draw_overlay(egui_ctx, &view, state);

        output.present();
        self.window.request_redraw();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: SceneConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.state.scene.teardown();
        self.state.viewport.detach();
        tracing::info!(
            ticks = self.state.scene.animation().ticks(),
            offerings = self.state.scene.player().offerings(),
            "shutting down"
        );
        event_loop.exit();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.state, &self.egui_ctx) {
            Ok(gpu) => {
                let projection = self
                    .state
                    .viewport
                    .attach(gpu.config.width, gpu.config.height);
                self.state.camera.set_projection(projection);
                tracing::debug!(
                    particles = self.state.scene.scene().count(ObjectKind::Particle),
                    "render surface ready"
                );
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize rendering: {e:#}");
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
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                gpu.reconfigure(new_size.width, new_size.height);
                self.state.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(&logical_key);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.dragging = btn_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.state.camera.zoom(steps);
            }
            WindowEvent::RedrawRequested => {
                self.state.update();
                gpu.redraw(&self.egui_ctx, &mut self.state);
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
            if self.state.dragging {
                self.state.camera.drag(delta.0 as f32, delta.1 as f32);
            }
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

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    tracing::info!(seed = config.seed, "ofrenda-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
