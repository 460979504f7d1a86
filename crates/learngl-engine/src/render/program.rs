use std::num::NonZeroU64;

use crate::paint::Color;

use super::shader::{BuildStatus, Compiled, ProgramSource, ShaderBackend, ShaderStage, StageSource};
use super::Vertex;

/// Size of the per-program color uniform (`vec4<f32>`).
const COLOR_UNIFORM_SIZE: u64 = std::mem::size_of::<Color>() as u64;

/// A compiled WGSL stage.
///
/// A stage that failed to compile has neither a module nor an entry point.
pub struct WgpuStage {
    module: Option<wgpu::ShaderModule>,
    ir: Option<naga::Module>,
    entry_point: Option<String>,
}

impl WgpuStage {
    fn invalid() -> Self {
        Self { module: None, ir: None, entry_point: None }
    }
}

/// GPU resources of one linked program.
struct ProgramBinding {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// A linked program: render pipeline + its color uniform.
///
/// A program whose link failed keeps its name but owns no GPU objects; draws
/// through it are skipped.
pub struct GpuProgram {
    name: String,
    binding: Option<ProgramBinding>,
}

impl GpuProgram {
    fn unusable(name: &str) -> Self {
        Self { name: name.to_string(), binding: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_usable(&self) -> bool {
        self.binding.is_some()
    }

    /// Writes the color uniform. Takes effect for draws submitted afterwards.
    pub fn set_color(&self, queue: &wgpu::Queue, color: Color) {
        if let Some(b) = &self.binding {
            queue.write_buffer(&b.uniform_buffer, 0, bytemuck::bytes_of(&color));
        }
    }

    /// Binds pipeline + uniform group on `rpass`. Returns false if unusable.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(b) = &self.binding else { return false };
        rpass.set_pipeline(&b.pipeline);
        rpass.set_bind_group(0, &b.bind_group, &[]);
        true
    }
}

/// `ShaderBackend` creating wgpu pipelines for a given surface format.
///
/// WGSL is run through naga first so compile errors come back as diagnostics
/// instead of device validation errors.
pub struct WgpuShaderBackend<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
}

impl<'a> WgpuShaderBackend<'a> {
    pub fn new(device: &'a wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self { device, surface_format }
    }

    fn create_binding(
        &self,
        program: &ProgramSource<'_>,
        vs: (&wgpu::ShaderModule, &str),
        fs: (&wgpu::ShaderModule, &str),
    ) -> ProgramBinding {
        let label = program.name;

        let bind_group_layout =
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(label),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: NonZeroU64::new(COLOR_UNIFORM_SIZE),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            self.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(label),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: vs.0,
                entry_point: Some(vs.1),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: fs.0,
                entry_point: Some(fs.1),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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

            // Depth testing is never enabled.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(program.uniform),
            size: COLOR_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        ProgramBinding { pipeline, uniform_buffer, bind_group }
    }
}

impl ShaderBackend for WgpuShaderBackend<'_> {
    type Stage = WgpuStage;
    type Program = GpuProgram;

    fn compile_stage(&mut self, source: &StageSource<'_>) -> Compiled<WgpuStage> {
        let (ir, entry_point) = match check_wgsl(source.code, source.stage) {
            Ok(v) => v,
            Err(diag) => return Compiled::failed(WgpuStage::invalid(), diag),
        };

        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.code.into()),
        });

        Compiled::ok(WgpuStage {
            module: Some(module),
            ir: Some(ir),
            entry_point: Some(entry_point),
        })
    }

    fn link_program(
        &mut self,
        program: &ProgramSource<'_>,
        vertex: &Compiled<WgpuStage>,
        fragment: &Compiled<WgpuStage>,
    ) -> Compiled<GpuProgram> {
        let Some(vs) = linkable(vertex) else {
            return Compiled::failed(GpuProgram::unusable(program.name), "vertex stage is not compiled");
        };
        let Some(fs) = linkable(fragment) else {
            return Compiled::failed(
                GpuProgram::unusable(program.name),
                format!("fragment stage `{}` is not compiled", program.fragment.label),
            );
        };

        let declared = fragment
            .object
            .ir
            .as_ref()
            .is_some_and(|ir| declares_color_uniform(ir, program.uniform));
        if !declared {
            return Compiled::failed(
                GpuProgram::unusable(program.name),
                format!(
                    "uniform `{}` is not declared at @group(0) @binding(0) in `{}`",
                    program.uniform, program.fragment.label
                ),
            );
        }

        let binding = self.create_binding(program, vs, fs);
        Compiled::ok(GpuProgram {
            name: program.name.to_string(),
            binding: Some(binding),
        })
    }
}

/// Compiles `source` on the CPU only, without a device.
pub fn check_stage(source: &StageSource<'_>) -> BuildStatus {
    match check_wgsl(source.code, source.stage) {
        Ok(_) => BuildStatus::Ok,
        Err(diag) => BuildStatus::Failed(diag),
    }
}

/// Like `check_stage` for the fragment stage, plus the uniform lookup done at link.
pub fn check_program(program: &ProgramSource<'_>) -> BuildStatus {
    match check_wgsl(program.fragment.code, program.fragment.stage) {
        Ok((ir, _)) if declares_color_uniform(&ir, program.uniform) => BuildStatus::Ok,
        Ok(_) => BuildStatus::Failed(format!("uniform `{}` is not declared", program.uniform)),
        Err(diag) => BuildStatus::Failed(diag),
    }
}

fn linkable(c: &Compiled<WgpuStage>) -> Option<(&wgpu::ShaderModule, &str)> {
    if !c.is_ok() {
        return None;
    }
    Some((c.object.module.as_ref()?, c.object.entry_point.as_deref()?))
}

/// Parses and validates WGSL, returning the IR and the entry point for `stage`.
fn check_wgsl(code: &str, stage: ShaderStage) -> Result<(naga::Module, String), String> {
    let module = naga::front::wgsl::parse_str(code).map_err(|e| e.emit_to_string(code))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| e.emit_to_string(code))?;

    let wanted = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == wanted)
        .map(|ep| ep.name.clone())
        .ok_or_else(|| format!("no {stage} entry point"))?;

    Ok((module, entry_point))
}

/// Whether `ir` declares `var<uniform> <name>` at group 0, binding 0.
fn declares_color_uniform(ir: &naga::Module, name: &str) -> bool {
    ir.global_variables.iter().any(|(_, gv)| {
        gv.name.as_deref() == Some(name)
            && gv.space == naga::AddressSpace::Uniform
            && gv.binding == Some(naga::ResourceBinding { group: 0, binding: 0 })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "
        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(pos, 1.0);
        }
    ";

    const FS: &str = "
        @group(0) @binding(0) var<uniform> tint: vec4<f32>;

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return tint;
        }
    ";

    #[test]
    fn valid_stages_report_their_entry_point() {
        let (_, ep) = check_wgsl(VS, ShaderStage::Vertex).unwrap();
        assert_eq!(ep, "vs_main");

        let (_, ep) = check_wgsl(FS, ShaderStage::Fragment).unwrap();
        assert_eq!(ep, "fs_main");
    }

    #[test]
    fn syntax_error_yields_diagnostic_text() {
        let broken = "@vertex fn vs_main( -> @builtin(position) vec4<f32> { }";
        let diag = check_wgsl(broken, ShaderStage::Vertex).unwrap_err();
        assert!(!diag.is_empty());
    }

    #[test]
    fn wrong_stage_is_rejected() {
        let diag = check_wgsl(FS, ShaderStage::Vertex).unwrap_err();
        assert_eq!(diag, "no vertex entry point");
    }

    #[test]
    fn uniform_lookup_is_by_name() {
        let (ir, _) = check_wgsl(FS, ShaderStage::Fragment).unwrap();
        assert!(declares_color_uniform(&ir, "tint"));
        assert!(!declares_color_uniform(&ir, "orange"));
    }

    #[test]
    fn color_uniform_is_one_vec4() {
        assert_eq!(COLOR_UNIFORM_SIZE, 16);
    }
}
