use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;
use crate::grid::{Grid, ALIVE};

// Colours of the original page: black live cells on white, black grid lines.
pub const COLOR_ALIVE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const COLOR_DEAD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const COLOR_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const OUTLINE_PX: f32 = 1.0;

/// One square to draw: a filled rectangle plus its outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub x_px: u32,
    pub y_px: u32,
    pub size: u32,
    pub filled: bool,
}

/// Draw instructions for every cell of `grid`, row-major, `scale` pixels per cell.
pub fn draw_commands(grid: &Grid, scale: u32) -> impl Iterator<Item = DrawCommand> + '_ {
    grid.iter().map(move |(x, y, value)| DrawCommand {
        x_px: x * scale,
        y_px: y * scale,
        size: scale,
        filled: value == ALIVE,
    })
}

/// Per-instance vertex data, one quad per [`DrawCommand`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    pub origin: [f32; 2],
    pub size: f32,
    pub filled: u32,
}

impl From<&DrawCommand> for CellInstance {
    fn from(cmd: &DrawCommand) -> Self {
        Self {
            origin: [cmd.x_px as f32, cmd.y_px as f32],
            size: cmd.size as f32,
            filled: u32::from(cmd.filled),
        }
    }
}

impl CellInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32, 2 => Uint32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

// Uniforms specific to rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderParams {
    pub viewport: [f32; 2],
    pub outline_px: f32,
    pub _padding: f32, // vec4 members below start on a 16-byte boundary
    pub alive_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub outline_color: [f32; 4],
}

impl RenderParams {
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            viewport: [width as f32, height as f32],
            outline_px: OUTLINE_PX,
            _padding: 0.0,
            alive_color: COLOR_ALIVE,
            dead_color: COLOR_DEAD,
            outline_color: COLOR_OUTLINE,
        }
    }
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_param_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: render_param_buffer.as_entire_binding() },
        ],
    })
}

pub fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Cell Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../render.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[CellInstance::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

/// Instance buffer sized for `count` cells.
pub fn create_instance_buffer(device: &wgpu::Device, count: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Cell Instance Buffer"),
        size: (count.max(1) * std::mem::size_of::<CellInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_command_per_cell_in_row_major_order() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, ALIVE).unwrap();
        let cmds: Vec<DrawCommand> = draw_commands(&grid, 10).collect();

        assert_eq!(cmds.len(), 6);
        assert_eq!(cmds[0], DrawCommand { x_px: 0, y_px: 0, size: 10, filled: false });
        assert_eq!(cmds[1], DrawCommand { x_px: 10, y_px: 0, size: 10, filled: false });
        assert_eq!(cmds[3], DrawCommand { x_px: 0, y_px: 10, size: 10, filled: false });
        assert_eq!(cmds[5], DrawCommand { x_px: 20, y_px: 10, size: 10, filled: true });
    }

    #[test]
    fn filled_matches_grid_state() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, ALIVE).unwrap();
        grid.set(3, 2, ALIVE).unwrap();
        let filled = draw_commands(&grid, 1).filter(|c| c.filled).count();
        assert_eq!(filled, grid.live_count());
    }

    #[test]
    fn instance_mirrors_command() {
        let cmd = DrawCommand { x_px: 30, y_px: 45, size: 15, filled: true };
        let instance = CellInstance::from(&cmd);
        assert_eq!(instance.origin, [30.0, 45.0]);
        assert_eq!(instance.size, 15.0);
        assert_eq!(instance.filled, 1);
    }

    #[test]
    fn gpu_structs_have_shader_layout() {
        assert_eq!(std::mem::size_of::<CellInstance>(), 16);
        assert_eq!(std::mem::size_of::<RenderParams>(), 64);
    }
}
