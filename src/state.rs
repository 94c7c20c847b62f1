use crate::config::Config;
use crate::error::AppError;
use crate::render::{
    create_instance_buffer, create_render_bind_group, create_render_bind_group_layout,
    create_render_pipeline, CellInstance, RenderParams,
};
use crate::simulation::{RunState, Simulation};
use wgpu::util::DeviceExt;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::Window,
};
use std::sync::Arc;
use std::time::Instant;

// GUI Imports
use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub simulation: Simulation,

    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,
    pub render_param_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub instance_capacity: usize,
    pub instance_count: u32,
    // Reused between frames to avoid reallocating per redraw
    instance_scratch: Vec<CellInstance>,

    pub is_left_mouse_pressed: bool,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // GUI State
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub menu_open: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, config: Config) -> Result<Self, AppError> {
        let size = window.inner_size();
        let surface_width = size.width.max(1);
        let surface_height = size.height.max(1);

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: surface_width,
            height: surface_height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let simulation = Simulation::new(config, surface_width, surface_height, window.scale_factor())?;

        let render_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&RenderParams::for_viewport(surface_width, surface_height)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_bind_group =
            create_render_bind_group(&device, &render_bind_group_layout, &render_param_buffer);
        let render_pipeline =
            create_render_pipeline(&device, &render_bind_group_layout, surface_config.format);

        let instance_capacity = simulation.engine().current().len();
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, surface_config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            size,
            window,
            simulation,
            render_pipeline,
            render_bind_group,
            render_param_buffer,
            instance_buffer,
            instance_capacity,
            instance_count: 0,
            instance_scratch: Vec::with_capacity(instance_capacity),
            is_left_mouse_pressed: false,
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            menu_open: false,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
            return;
        }

        self.size = new_size;
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.queue.write_buffer(
            &self.render_param_buffer,
            0,
            bytemuck::bytes_of(&RenderParams::for_viewport(new_size.width, new_size.height)),
        );

        let scale_factor = self.window.scale_factor();
        match self.simulation.resize(new_size.width, new_size.height, scale_factor, Instant::now()) {
            Ok(true) => {
                let needed = self.simulation.engine().current().len();
                if needed > self.instance_capacity {
                    self.instance_buffer = create_instance_buffer(&self.device, needed);
                    self.instance_capacity = needed;
                }
            }
            Ok(false) => {}
            Err(e) => log::error!("Failed to rebuild grid for {}x{}: {}", new_size.width, new_size.height, e),
        }

        log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
    }

    /// Convert the current generation into instance data on the GPU.
    fn upload_cells(&mut self) {
        self.instance_scratch.clear();
        self.instance_scratch
            .extend(self.simulation.draw_commands().map(|cmd| CellInstance::from(&cmd)));
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instance_scratch));
        self.instance_count = self.instance_scratch.len() as u32;
    }

    /// Draw the grid. Returns the surface texture for egui to draw on.
    pub fn render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, reconfiguring...");
                self.surface.configure(&self.device, &self.surface_config);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        self.upload_cells();

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view: &output_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                            store: wgpu::StoreOp::Store,
                        },
                    })
                ],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            // Six vertices per cell quad
            render_pass.draw(0..6, 0..self.instance_count);
        }
        self.queue.submit(Some(render_encoder.finish()));
        // output_frame.present(); // DON'T present here, egui will do it later

        Ok(output_frame)
    }

    /// Advance the simulation if a tick is due. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        match self.simulation.advance(Instant::now()) {
            Ok(stepped) => stepped,
            Err(e) => {
                log::error!("Simulation halted: {}", e);
                true
            }
        }
    }

    pub fn step_once(&mut self) {
        if let Err(e) = self.simulation.step_once() {
            log::error!("Simulation halted: {}", e);
        }
    }

    pub fn reseed(&mut self) {
        if let Err(e) = self.simulation.reseed() {
            log::error!("Reseed failed: {}", e);
        }
    }

    pub fn paint_cell(&mut self, screen_pos: PhysicalPosition<f64>) {
        // Cursor beyond the last full cell is simply ignored
        if let Err(e) = self.simulation.paint(screen_pos.x, screen_pos.y) {
            log::debug!("Paint ignored: {}", e);
        }
    }

    pub fn run_state_label(&self) -> &'static str {
        match self.simulation.run_state() {
            RunState::Running => "running",
            RunState::Stopped => "stopped",
            RunState::Halted => "halted",
        }
    }
}
