use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::color::Color;

/// Per-vertex data: a position already in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The one static triangle: 3 vertices, 3 coordinates each, never mutated
/// after upload.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0] },
];

/// Owns the fixed render pipeline and the triangle's vertex buffer.
///
/// Built once after the GPU context exists, immutable afterwards, dropped at
/// shutdown. The shader module is discarded as soon as the pipeline is
/// linked.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

impl TriangleRenderer {
    /// Compiles the fixed shader pair, links the pipeline, and uploads the
    /// triangle.
    ///
    /// Pipeline validation failures are captured via an error scope and
    /// logged with the driver's diagnostic text; they are not retried and
    /// construction still completes, so the frame loop keeps running with
    /// whatever state resulted.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            log::error!("triangle pipeline rejected by the driver: {err}");
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            vertex_buffer,
        }
    }

    /// Records one frame: clear to `clear`, then draw the triangle.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear: Color,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trigon triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..TRIANGLE.len() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex data ───────────────────────────────────────────────────────

    #[test]
    fn triangle_has_three_vertices_in_source_order() {
        assert_eq!(TRIANGLE.len(), 3);
        assert_eq!(TRIANGLE[0].position, [-0.5, -0.5, 0.0]);
        assert_eq!(TRIANGLE[1].position, [0.5, -0.5, 0.0]);
        assert_eq!(TRIANGLE[2].position, [0.0, 0.5, 0.0]);
    }

    #[test]
    fn triangle_uploads_exactly_nine_floats() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(bytes.len(), 9 * std::mem::size_of::<f32>());

        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(
            floats,
            &[-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]
        );
    }

    // ── vertex layout ─────────────────────────────────────────────────────

    #[test]
    fn vertex_layout_is_tightly_packed_position_at_location_zero() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);

        let attr = &layout.attributes[0];
        assert_eq!(attr.shader_location, 0);
        assert_eq!(attr.offset, 0);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
    }

    // ── shader source ─────────────────────────────────────────────────────

    #[test]
    fn shader_emits_the_constant_orange() {
        let src = include_str!("shaders/triangle.wgsl");
        assert!(src.contains("vec4<f32>(1.0, 0.5, 0.2, 1.0)"));
    }

    #[test]
    fn shader_declares_both_entry_points() {
        let src = include_str!("shaders/triangle.wgsl");
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
    }
}
