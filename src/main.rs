// Declare modules directly in the binary crate root
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod render;
pub mod rules;
pub mod seed;
pub mod simulation;
pub mod state;

// Use types/functions from the declared modules
use crate::config::Config;
use crate::error::AppError;
use crate::input::KeyAction;
use crate::rules::presets::PatternPreset;
use crate::state::State;

use winit::{
    event::{Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use std::sync::Arc;
use std::time::Instant;

// Constants
const INITIAL_WIDTH: u32 = 960;
const INITIAL_HEIGHT: u32 = 540;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, config: Config) -> Result<(), AppError> {
    let mut state = State::new(window, config).await?;

    // Show the seed, then tick after the start delay
    state.simulation.start(Instant::now());
    state.window.request_redraw();

    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // Resize and close must reach the game even when egui used them
                let consumed_by_egui = response.consumed
                    && !matches!(event, WindowEvent::Resized(_) | WindowEvent::CloseRequested);

                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        state.simulation.stop();
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                        state.window.request_redraw();
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = state.window.inner_size();
                        state.resize(size);
                        state.window.request_redraw();
                    }
                    WindowEvent::KeyboardInput {
                        event: KeyEvent { logical_key, state: key_state, .. },
                        ..
                    } => match input::handle_key(&mut state, logical_key, *key_state) {
                        KeyAction::Redraw => state.window.request_redraw(),
                        KeyAction::Exit => {
                            state.simulation.stop();
                            window_target.exit();
                        }
                        KeyAction::Ignored => {}
                    },
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                        state.window.request_redraw();
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                        if state.is_left_mouse_pressed {
                            state.window.request_redraw();
                        }
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::RedrawRequested => redraw(&mut state),
                    _ => (),
                }
            }
            Event::AboutToWait => {
                if state.tick() {
                    state.window.request_redraw();
                }
                // Sleep until the next generation is due
                match state.simulation.next_deadline() {
                    Some(deadline) => window_target.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => window_target.set_control_flow(ControlFlow::Wait),
                }
            }
            _ => ()
        }
    })?;

    Ok(())
}

fn redraw(state: &mut State) {
    // Render the grid first; egui is painted on top of the same frame.
    let output_frame = match state.render() {
        Ok(frame) => frame,
        Err(e) => {
            // Lost was handled by reconfiguring in render(); the others are temporary
            log::warn!("Skipping frame due to surface {:?}", e);
            state.window.request_redraw();
            return;
        }
    };

    // --- Egui Frame and UI Definition ---
    let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let raw_input = state.egui_winit_state.take_egui_input(&state.window);
    state.egui_ctx.begin_frame(raw_input);

    let mut toggle_clicked = false;
    let mut step_clicked = false;
    let mut reseed_clicked = false;
    let mut clear_clicked = false;

    // Use an Area for the menu button, positioned top-left
    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(&state.egui_ctx, |ui| {
            if ui.button("☰").clicked() {
                state.menu_open = !state.menu_open;
            }
        });

    if state.menu_open {
        let panel_frame = egui::Frame {
            fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 200),
            ..egui::Frame::side_top_panel(&state.egui_ctx.style())
        };

        let running = state.simulation.is_running();
        let engine = state.simulation.engine();
        let grid_label = format!(
            "Grid: {}x{} @ {}px",
            engine.width(),
            engine.height(),
            state.simulation.cell_px()
        );
        let generation_label = format!("Generation: {}", engine.generation());
        let live_label = format!("Live Cells: {}", engine.current().live_count());
        let state_label = format!("State: {}", state.run_state_label());
        let mut pattern = state.simulation.config().pattern;
        let mut randomize = state.simulation.config().randomize;

        egui::SidePanel::left("side_panel")
            .frame(panel_frame)
            .resizable(true)
            .default_width(200.0)
            .show(&state.egui_ctx, |ui| {
                ui.heading("Game of Life");
                ui.separator();
                ui.horizontal(|ui| {
                    toggle_clicked = ui.button(if running { "Stop" } else { "Resume" }).clicked();
                    step_clicked = ui.add_enabled(!running, egui::Button::new("Step")).clicked();
                });
                ui.horizontal(|ui| {
                    reseed_clicked = ui.button("Reseed").clicked();
                    clear_clicked = ui.button("Clear").clicked();
                });
                ui.separator();
                ui.checkbox(&mut randomize, "Random fill on reseed");
                egui::ComboBox::from_label("Pattern")
                    .selected_text(pattern.map_or("none", PatternPreset::name))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut pattern, None, "none");
                        for preset in PatternPreset::ALL {
                            ui.selectable_value(&mut pattern, Some(preset), preset.name());
                        }
                    });
                ui.separator();
                ui.label(state_label);
                ui.label(grid_label);
                ui.label(generation_label);
                ui.label(live_label);
            });

        state.simulation.set_pattern(pattern);
        state.simulation.set_randomize(randomize);
    }

    if toggle_clicked {
        state.simulation.toggle(Instant::now());
    }
    if step_clicked {
        state.step_once();
    }
    if reseed_clicked {
        state.reseed();
    }
    if clear_clicked {
        state.simulation.clear();
    }
    if toggle_clicked || step_clicked || reseed_clicked || clear_clicked {
        state.window.request_redraw();
    }
    // --- End UI Definition ---

    let full_output = state.egui_ctx.end_frame();
    let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, state.window.scale_factor() as f32);
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [state.surface_config.width, state.surface_config.height],
        pixels_per_point: state.window.scale_factor() as f32,
    };

    // Upload egui data to GPU
    let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("egui Encoder"),
    });
    for (id, image_delta) in &full_output.textures_delta.set {
        state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
    }
    let _tdelta = state.egui_renderer.update_buffers(
        &state.device,
        &state.queue,
        &mut encoder,
        &paint_jobs,
        &screen_descriptor,
    );
    state.egui_winit_state.handle_platform_output(&state.window, full_output.platform_output);

    // Render egui
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &output_view, // Render egui ON TOP of the grid
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
    }

    for id in &full_output.textures_delta.free {
        state.egui_renderer.free_texture(id);
    }

    state.queue.submit(Some(encoder.finish()));
    output_frame.present();
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let config = Config::from_env()?;
    log::info!("Starting with {:?}", config);

    let event_loop = EventLoop::new()?;

    let initial_size = winit::dpi::LogicalSize::new(INITIAL_WIDTH as f64, INITIAL_HEIGHT as f64);

    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Game of Life")
        .with_inner_size(initial_size)
        .build(&event_loop)?);

    pollster::block_on(run(event_loop, window, config))
}
