//! Standalone embedview demo: a cluster of cubes in an egui window with
//! the pivot camera style.
//!
//! Usage: `embedview [options.toml]`

use std::path::Path;

use embedview::camera::{Bounds, Camera, CameraUniform};
use embedview::render::Frame;
use embedview::scene::{PivotMarker, Scene, SphereMesh};
use embedview::{EmbedError, EmbeddedViewport, Options};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

const SHADER: &str = r"
struct Object {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> object: Object;

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = object.view_proj * object.model * vec4<f32>(position, 1.0);
    out.normal = normalize((object.model * vec4<f32>(normal, 0.0)).xyz);
    return out;
}

@fragment
fn fs_main(v: VsOut) -> @location(0) vec4<f32> {
    let light = normalize(vec3<f32>(0.4, 0.7, 0.6));
    let diffuse = max(dot(normalize(v.normal), light), 0.0);
    return vec4<f32>(object.color.rgb * (0.25 + 0.75 * diffuse), object.color.a);
}
";

/// Cube centers of the demo cluster.
const CUBES: [[f32; 3]; 5] = [
    [0.0, 0.0, 0.0],
    [2.5, 0.0, 0.0],
    [-2.5, 0.0, 0.0],
    [0.0, 2.5, -1.0],
    [0.0, -2.5, 1.0],
];
const CUBE_COLOR: [f32; 4] = [0.35, 0.6, 0.9, 1.0];
const MARKER_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniform {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Vertex, index and uniform buffers of one drawable object.
struct Mesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Mesh {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Self {
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size_of::<ObjectUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
            uniforms,
            bind_group,
        }
    }

    fn upload(&self, queue: &wgpu::Queue, view_proj: Mat4, model: Mat4, color: [f32; 4]) {
        let uniform = ObjectUniform {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color,
        };
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(&uniform));
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Pipelines and meshes, created on the first draw.
struct DemoGpu {
    layout: wgpu::BindGroupLayout,
    solid: wgpu::RenderPipeline,
    overlay: wgpu::RenderPipeline,
    cubes: Mesh,
    marker: Option<(Mesh, u32)>,
}

impl DemoGpu {
    fn new(frame: &Frame<'_>) -> Self {
        let device = frame.device;
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Demo Object Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Demo Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Demo Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let pipeline = |label: &str, depth_write_enabled: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: frame.color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: frame.depth_format,
                    depth_write_enabled,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };
        let solid = pipeline("Demo Solid Pipeline", true);
        // The marker must not end up in the depth buffer used for picking.
        let overlay = pipeline("Demo Marker Pipeline", false);

        let (vertices, indices) = cube_cluster();
        let cubes = Mesh::new(device, &layout, "Demo Cubes", &vertices, &indices);
        Self {
            layout,
            solid,
            overlay,
            cubes,
            marker: None,
        }
    }

    fn marker_mesh(&mut self, device: &wgpu::Device, resolution: u32) -> &Mesh {
        if !matches!(&self.marker, Some((_, current)) if *current == resolution) {
            self.marker = None;
        }
        let layout = &self.layout;
        &self
            .marker
            .get_or_insert_with(|| {
                let sphere = SphereMesh::uv(resolution);
                let vertices: Vec<Vertex> = sphere
                    .positions
                    .iter()
                    .map(|p| Vertex {
                        position: *p,
                        normal: *p,
                    })
                    .collect();
                let mesh = Mesh::new(device, layout, "Demo Pivot Marker", &vertices, &sphere.indices);
                (mesh, resolution)
            })
            .0
    }
}

/// Unit-half-size cubes at [`CUBES`], 24 vertices each.
fn cube_cluster() -> (Vec<Vertex>, Vec<u32>) {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let mut vertices = Vec::with_capacity(CUBES.len() * 24);
    let mut indices = Vec::with_capacity(CUBES.len() * 36);
    for center in CUBES.map(Vec3::from_array) {
        for (normal, u, v) in FACES.map(|(n, u, v)| {
            (Vec3::from_array(n), Vec3::from_array(u), Vec3::from_array(v))
        }) {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = center + normal + u * su + v * sv;
                vertices.push(Vertex {
                    position: corner.to_array(),
                    normal: normal.to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
    (vertices, indices)
}

/// The demo's only sub-scene.
struct DemoScene {
    camera: Camera,
    marker: Option<PivotMarker>,
    gpu: Option<DemoGpu>,
}

impl DemoScene {
    fn new() -> Self {
        Self {
            camera: Camera::default(),
            marker: None,
            gpu: None,
        }
    }
}

impl Scene for DemoScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn visible_bounds(&self) -> Option<Bounds> {
        let corners: Vec<Vec3> = CUBES
            .iter()
            .flat_map(|c| {
                let c = Vec3::from_array(*c);
                [c - Vec3::ONE, c + Vec3::ONE]
            })
            .collect();
        Bounds::from_points(&corners)
    }

    fn set_pivot_marker(&mut self, marker: Option<&PivotMarker>) {
        self.marker = marker.copied();
    }

    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), EmbedError> {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera, frame.aspect());
        let view_proj = Mat4::from_cols_array_2d(&uniform.view_proj);

        let gpu = self.gpu.get_or_insert_with(|| DemoGpu::new(frame));
        gpu.cubes
            .upload(frame.queue, view_proj, Mat4::IDENTITY, CUBE_COLOR);
        if let Some(marker) = self.marker {
            gpu.marker_mesh(frame.device, marker.resolution).upload(
                frame.queue,
                view_proj,
                marker.model_matrix(),
                MARKER_COLOR,
            );
        }

        let mut pass = frame.begin_pass("Demo Scene Pass");
        pass.set_pipeline(&gpu.solid);
        gpu.cubes.draw(&mut pass);
        if let (Some(_), Some((mesh, _))) = (self.marker, gpu.marker.as_ref()) {
            pass.set_pipeline(&gpu.overlay);
            mesh.draw(&mut pass);
        }
        Ok(())
    }
}

fn main() -> Result<(), EmbedError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    let title = options.window.title.clone();
    let size = options.window.size;

    let mut viewport = EmbeddedViewport::new(options)?;
    viewport.add_scene(Box::new(DemoScene::new()));
    viewport.set_pick_callback(Some(Box::new(|position, world| match world {
        Some(point) => log::info!("picked {point} at {position}"),
        None => log::info!("nothing under {position}"),
    })));

    let handle = viewport.show(
        &title,
        size,
        Some(Box::new(|| log::info!("viewport closed"))),
    )?;
    if let Some(handle) = handle {
        handle
            .join()
            .map_err(|_| EmbedError::Host("host thread panicked".to_owned()))??;
    }
    Ok(())
}
