use anyhow::{Context, Result};

use learngl_engine::core::{App, AppControl, FrameCtx, StartCtx};
use learngl_engine::render::{build_programs, DrawSet, FailurePolicy, GpuMesh, WgpuShaderBackend};

use crate::pulse::oscillate;
use crate::scene;

/// Two pulsing triangles, each drawn with its own program.
pub struct TrianglesApp {
    policy: FailurePolicy,
    draw_set: Option<DrawSet>,
}

impl TrianglesApp {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy, draw_set: None }
    }
}

impl App for TrianglesApp {
    fn on_start(&mut self, ctx: &StartCtx<'_, '_>) -> Result<()> {
        let rctx = ctx.render_ctx();

        let mut backend = WgpuShaderBackend::new(rctx.device, rctx.surface_format);
        let programs = build_programs(&mut backend, &scene::shader_table(), self.policy)
            .context("shader programs failed to build")?
            .into_iter()
            .map(|p| p.object)
            .collect();

        let meshes = scene::meshes()
            .iter()
            .map(|m| GpuMesh::upload(rctx.device, m))
            .collect();

        self.draw_set = Some(DrawSet::new(programs, meshes, scene::draw_items())?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(set) = &self.draw_set else {
            return AppControl::Exit;
        };

        let calls = set.plan(oscillate(ctx.time.elapsed));

        ctx.render(scene::CLEAR_COLOR, |rctx, target| {
            set.encode(rctx.queue, target.pass, &calls);
        })
    }

    fn on_exit(&mut self) {
        if let Some(set) = self.draw_set.take() {
            set.release();
        }
    }
}
