//! Static scene data: the two triangles, their shader programs and the pairing
//! between them.

use learngl_engine::paint::Color;
use learngl_engine::render::{
    DrawItem, Mesh, ProgramSource, ShaderStage, ShaderTable, StageSource, Vertex,
};

use crate::pulse;

pub const CLEAR_COLOR: Color = Color::opaque(0.9, 0.3, 0.3);

pub const TRIANGLE_LEFT: [Vertex; 3] = [
    Vertex::new(-0.5, 0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(-0.1, 0.0, 0.0),
];

pub const TRIANGLE_RIGHT: [Vertex; 3] = [
    Vertex::new(0.5, 0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(0.1, 0.0, 0.0),
];

const VERTEX_SHADER: &str = include_str!("shaders/triangle.vert.wgsl");
const ORANGE_SHADER: &str = include_str!("shaders/orange.frag.wgsl");
const YELLOW_SHADER: &str = include_str!("shaders/yellow.frag.wgsl");

pub const ORANGE: usize = 0;
pub const YELLOW: usize = 1;

/// Shader sources. Program order here is the index order used by `draw_items`.
pub fn shader_table() -> ShaderTable<'static> {
    ShaderTable {
        vertex: StageSource {
            label: "triangle.vert",
            stage: ShaderStage::Vertex,
            code: VERTEX_SHADER,
        },
        programs: vec![
            ProgramSource {
                name: "orange",
                fragment: StageSource {
                    label: "orange.frag",
                    stage: ShaderStage::Fragment,
                    code: ORANGE_SHADER,
                },
                uniform: "orange",
            },
            ProgramSource {
                name: "yellow",
                fragment: StageSource {
                    label: "yellow.frag",
                    stage: ShaderStage::Fragment,
                    code: YELLOW_SHADER,
                },
                uniform: "yellow",
            },
        ],
    }
}

pub fn meshes() -> Vec<Mesh> {
    vec![
        Mesh::new("triangle left", &TRIANGLE_LEFT),
        Mesh::new("triangle right", &TRIANGLE_RIGHT),
    ]
}

/// Left triangle in orange, then right triangle in yellow.
pub fn draw_items() -> Vec<DrawItem> {
    vec![
        DrawItem { mesh: 0, program: ORANGE, color: pulse::orange },
        DrawItem { mesh: 1, program: YELLOW, color: pulse::yellow },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use learngl_engine::render::{check_program, check_stage, plan_frame, BuildStatus};

    #[test]
    fn shaders_compile_and_expose_their_uniforms() {
        let table = shader_table();

        assert_eq!(check_stage(&table.vertex), BuildStatus::Ok);
        for program in &table.programs {
            assert_eq!(check_stage(&program.fragment), BuildStatus::Ok, "{}", program.name);
            assert_eq!(check_program(program), BuildStatus::Ok, "{}", program.name);
        }
    }

    #[test]
    fn program_order_matches_indices() {
        let table = shader_table();
        assert_eq!(table.programs[ORANGE].name, "orange");
        assert_eq!(table.programs[YELLOW].name, "yellow");
    }

    #[test]
    fn uniform_names_are_not_swapped() {
        let mut table = shader_table();
        table.programs[ORANGE].uniform = "yellow";
        assert!(!check_program(&table.programs[ORANGE]).is_ok());
    }

    #[test]
    fn triangles_mirror_each_other_and_stay_in_clip_space() {
        for (l, r) in TRIANGLE_LEFT.iter().zip(&TRIANGLE_RIGHT) {
            assert_eq!(l.position[0], -r.position[0]);
            assert_eq!(l.position[1], r.position[1]);
        }
        for v in TRIANGLE_LEFT.iter().chain(&TRIANGLE_RIGHT) {
            assert!(v.position.iter().all(|c| (-1.0..=1.0).contains(c)));
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn frame_draws_left_orange_then_right_yellow() {
        let items = draw_items();
        let meshes = meshes();
        let calls = plan_frame(&items, 0.5, |_| true, |m| meshes[m].vertex_count());

        assert_eq!(calls.len(), 2);
        assert_eq!((calls[0].mesh, calls[0].program), (0, ORANGE));
        assert_eq!((calls[1].mesh, calls[1].program), (1, YELLOW));
        assert_eq!(calls[0].color, pulse::orange(0.5));
        assert_eq!(calls[1].color, Color::new(0.5, 0.5, 0.0, 1.0));
        assert!(calls.iter().all(|c| c.vertex_count == 3));
    }

    #[test]
    fn clear_color_is_opaque_red() {
        assert_eq!(CLEAR_COLOR, Color::new(0.9, 0.3, 0.3, 1.0));
    }
}
