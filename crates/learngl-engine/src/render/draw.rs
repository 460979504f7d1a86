use anyhow::{ensure, Result};

use crate::paint::Color;

use super::{GpuMesh, GpuProgram};

/// One fixed (mesh, program, uniform) pairing.
///
/// `color` maps the frame's shared intensity to the program's uniform value.
/// A program should appear in at most one item: its uniform is written once per
/// frame, before any draw is executed.
#[derive(Debug, Copy, Clone)]
pub struct DrawItem {
    pub mesh: usize,
    pub program: usize,
    pub color: fn(f32) -> Color,
}

/// One draw issued for a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub program: usize,
    pub mesh: usize,
    pub color: Color,
    pub vertex_count: u32,
}

/// Expands `items` into this frame's draw calls, in list order.
///
/// Every item sees the same `intensity`. Items whose program is unusable are
/// skipped.
pub fn plan_frame(
    items: &[DrawItem],
    intensity: f32,
    program_usable: impl Fn(usize) -> bool,
    vertex_count: impl Fn(usize) -> u32,
) -> Vec<DrawCall> {
    items
        .iter()
        .filter(|item| program_usable(item.program))
        .map(|item| DrawCall {
            program: item.program,
            mesh: item.mesh,
            color: (item.color)(intensity),
            vertex_count: vertex_count(item.mesh),
        })
        .collect()
}

/// Programs, meshes and their ordered pairings.
///
/// Owns every GPU resource the demo draws with.
pub struct DrawSet {
    programs: Vec<GpuProgram>,
    meshes: Vec<GpuMesh>,
    items: Vec<DrawItem>,
}

impl DrawSet {
    pub fn new(programs: Vec<GpuProgram>, meshes: Vec<GpuMesh>, items: Vec<DrawItem>) -> Result<Self> {
        for (i, item) in items.iter().enumerate() {
            ensure!(item.program < programs.len(), "draw item {i}: no program #{}", item.program);
            ensure!(item.mesh < meshes.len(), "draw item {i}: no mesh #{}", item.mesh);
        }

        for p in programs.iter().filter(|p| !p.is_usable()) {
            log::warn!("program `{}` is unusable; its draws are skipped", p.name());
        }

        Ok(Self { programs, meshes, items })
    }

    pub fn plan(&self, intensity: f32) -> Vec<DrawCall> {
        plan_frame(
            &self.items,
            intensity,
            |p| self.programs[p].is_usable(),
            |m| self.meshes[m].vertex_count(),
        )
    }

    /// Writes uniforms and records the draws of `calls` into `rpass`.
    pub fn encode(&self, queue: &wgpu::Queue, rpass: &mut wgpu::RenderPass<'_>, calls: &[DrawCall]) {
        for call in calls {
            let program = &self.programs[call.program];
            let mesh = &self.meshes[call.mesh];

            program.set_color(queue, call.color);
            if !program.bind(rpass) {
                continue;
            }
            rpass.set_vertex_buffer(0, mesh.buffer().slice(..));
            rpass.draw(0..call.vertex_count, 0..1);
        }
    }

    /// Releases meshes, then programs.
    pub fn release(self) {
        let Self { programs, meshes, items } = self;
        drop(items);
        drop(meshes);
        drop(programs);
        log::debug!("draw set released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(c: f32) -> Color {
        Color::new(c, 0.0, 0.0, 1.0)
    }

    fn half_green(c: f32) -> Color {
        Color::new(0.0, c / 2.0, 0.0, 1.0)
    }

    fn items() -> Vec<DrawItem> {
        vec![
            DrawItem { mesh: 0, program: 0, color: red },
            DrawItem { mesh: 1, program: 1, color: half_green },
        ]
    }

    #[test]
    fn one_call_per_item_in_order_with_shared_intensity() {
        let calls = plan_frame(&items(), 0.8, |_| true, |_| 3);

        assert_eq!(
            calls,
            vec![
                DrawCall { program: 0, mesh: 0, color: Color::new(0.8, 0.0, 0.0, 1.0), vertex_count: 3 },
                DrawCall { program: 1, mesh: 1, color: Color::new(0.0, 0.4, 0.0, 1.0), vertex_count: 3 },
            ]
        );
    }

    #[test]
    fn unusable_programs_are_skipped() {
        let calls = plan_frame(&items(), 0.5, |p| p != 0, |_| 3);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, 1);
    }

    #[test]
    fn adding_an_item_adds_a_draw() {
        let mut list = items();
        list.push(DrawItem { mesh: 2, program: 0, color: red });

        let calls = plan_frame(&list, 1.0, |_| true, |m| if m == 2 { 6 } else { 3 });
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].vertex_count, 6);
    }

    #[test]
    fn out_of_range_item_is_rejected() {
        let err = DrawSet::new(Vec::new(), Vec::new(), items()).err().unwrap();
        assert!(err.to_string().contains("no program #0"));
    }
}
