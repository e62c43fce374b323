use glam::{Mat4, Vec3};
use scene_core::constants::{BACKGROUND, MAX_POINT_LIGHTS, SPARKLE_PINK, STAR_WHITE};
use scene_core::{FrameOutput, Material, MeshId, PointLight, Scene};
use web_sys as web;

use crate::constants::{INSTANCE_CHUNK, SPARKLE_OPACITY, STAR_OPACITY};

mod helpers;
use helpers::GpuMesh;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4
];

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    position_range: [f32; 4],
    color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    lights: [LightPacked; MAX_POINT_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl InstanceRaw {
    fn new(model: Mat4, material: &Material) -> Self {
        let [r, g, b] = material.color;
        let [er, eg, eb] = material.emissive;
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            emissive: [er, eg, eb, if material.unlit { 1.0 } else { 0.0 }],
        }
    }
}

fn pack_uniforms(out: &FrameOutput) -> SceneUniforms {
    let mut lights = [LightPacked::default(); MAX_POINT_LIGHTS];
    let count = out.lights.len().min(MAX_POINT_LIGHTS);
    for (slot, l) in lights.iter_mut().zip(&out.lights) {
        *slot = pack_light(l);
    }
    SceneUniforms {
        view_proj: out.view_proj.to_cols_array_2d(),
        camera_pos: out.camera_eye.extend(1.0).to_array(),
        ambient: [out.ambient, count as f32, 0.0, 0.0],
        lights,
    }
}

fn pack_light(l: &PointLight) -> LightPacked {
    let [r, g, b] = l.color;
    LightPacked {
        position_range: l.position.extend(l.range).to_array(),
        color_intensity: [r, g, b, l.intensity],
    }
}

fn srgb_to_linear(c: f32) -> f64 {
    (c as f64).powf(2.2)
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    // indexed by `MeshId`
    meshes: Vec<Option<GpuMesh>>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    // reused every frame: per-mesh batches, then the flattened upload
    batches: Vec<Vec<InstanceRaw>>,
    // star instances, rebuilt only when the particle field reports new positions
    stars: Vec<InstanceRaw>,
    staging: Vec<InstanceRaw>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (_depth_tex, depth_view) =
            helpers::create_depth_texture(&device, "depth", width, height, DEPTH_FORMAT);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<scene_core::Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let pipeline =
            helpers::make_scene_pipeline(&device, &pl, &shader, &buffers, format, DEPTH_FORMAT);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let meshes: Vec<Option<GpuMesh>> = scene
            .meshes()
            .iter()
            .map(|(_, label, mesh)| helpers::upload_mesh(&device, label, mesh))
            .collect();
        log::info!(
            "[gpu] {}x{} {:?}, {} meshes uploaded",
            width,
            height,
            format,
            meshes.iter().flatten().count()
        );

        let instance_capacity = round_up(scene.particles().len() + 256);
        let instance_buffer = create_instance_buffer(&device, instance_capacity);
        let [r, g, b] = BACKGROUND;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            batches: (0..meshes.len()).map(|_| Vec::new()).collect(),
            meshes,
            instance_buffer,
            instance_capacity,
            staging: Vec::new(),
            stars: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: srgb_to_linear(r),
                g: srgb_to_linear(g),
                b: srgb_to_linear(b),
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    /// Configure the surface and depth target for the current size again.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        let (_tex, view) = helpers::create_depth_texture(
            &self.device,
            "depth",
            self.config.width,
            self.config.height,
            DEPTH_FORMAT,
        );
        self.depth_view = view;
    }

    /// Group everything visible by mesh: scene-graph draws, one sparkle per
    /// sparkle point, then one star per particle.
    fn batch(&mut self, scene: &Scene, out: &FrameOutput) {
        for b in &mut self.batches {
            b.clear();
        }
        let mut push = |mesh: MeshId, raw: InstanceRaw| {
            if let Some(b) = self.batches.get_mut(mesh.0) {
                b.push(raw);
            }
        };
        for d in &out.draws {
            push(d.mesh, InstanceRaw::new(d.model, &d.material));
        }
        let sparkle = Material::unlit(SPARKLE_PINK).with_opacity(SPARKLE_OPACITY);
        let size = Vec3::splat(scene.sparkles().size());
        for p in scene.sparkles().positions() {
            let model = Mat4::from_scale_rotation_translation(size, glam::Quat::IDENTITY, *p);
            push(scene.sparkle_mesh(), InstanceRaw::new(model, &sparkle));
        }
        let star = Material::unlit(STAR_WHITE).with_opacity(STAR_OPACITY);
        if out.particles_dirty || self.stars.len() != scene.particles().len() {
            self.stars.clear();
            self.stars.extend(
                scene
                    .particles()
                    .positions()
                    .map(|p| InstanceRaw::new(Mat4::from_translation(p), &star)),
            );
        }
        if let Some(b) = self.batches.get_mut(scene.star_mesh().0) {
            b.extend_from_slice(&self.stars);
        }
    }

    pub fn render(&mut self, scene: &Scene, out: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        self.batch(scene, out);

        // Flatten batches into one upload and remember each mesh's range.
        self.staging.clear();
        let mut ranges = Vec::with_capacity(self.batches.len());
        for (i, b) in self.batches.iter().enumerate() {
            let start = self.staging.len() as u32;
            self.staging.extend_from_slice(b);
            ranges.push((i, start..self.staging.len() as u32));
        }
        if self.staging.len() > self.instance_capacity {
            self.instance_capacity = round_up(self.staging.len());
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("[gpu] instance buffer grown to {}", self.instance_capacity);
        }
        if !self.staging.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.staging),
            );
        }
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&pack_uniforms(out)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, range) in ranges {
                if range.is_empty() {
                    continue;
                }
                let Some(Some(mesh)) = self.meshes.get(i) else {
                    continue;
                };
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, range);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn round_up(n: usize) -> usize {
    n.div_ceil(INSTANCE_CHUNK).max(1) * INSTANCE_CHUNK
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instances"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
