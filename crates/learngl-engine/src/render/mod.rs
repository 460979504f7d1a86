//! GPU rendering subsystem.
//!
//! Shader builds, mesh upload, and the ordered draw list driven by the render loop.
//!
//! Convention:
//! - geometry is given directly in normalized device coordinates
//! - every program owns one `vec4<f32>` color uniform at group 0, binding 0

mod ctx;
mod draw;
mod mesh;
mod program;
mod shader;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use draw::{plan_frame, DrawCall, DrawItem, DrawSet};
pub use mesh::{GpuMesh, Mesh};
pub use program::{check_program, check_stage, GpuProgram, WgpuShaderBackend, WgpuStage};
pub use shader::{
    build_programs, BuildStatus, Compiled, FailurePolicy, ProgramSource, ShaderBackend,
    ShaderError, ShaderStage, ShaderTable, StageSource,
};
pub use vertex::Vertex;
