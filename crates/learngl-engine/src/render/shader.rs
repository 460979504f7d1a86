//! Shader sources and the program build procedure.
//!
//! The procedure is backend-agnostic: it compiles one shared vertex stage, then for
//! each program compiles a fragment stage and links it against the vertex stage.
//! Stage objects are transient and released as soon as linking is done; program
//! objects are returned to the caller.

use std::fmt;

/// Pipeline stage of a shader source.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// One stage's source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StageSource<'a> {
    pub label: &'a str,
    pub stage: ShaderStage,
    pub code: &'a str,
}

/// One program to link: its fragment stage plus the name of the color uniform it
/// exposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramSource<'a> {
    pub name: &'a str,
    pub fragment: StageSource<'a>,
    pub uniform: &'a str,
}

/// Named, immutable table of shader sources.
///
/// All programs share `vertex`.
#[derive(Debug, Clone)]
pub struct ShaderTable<'a> {
    pub vertex: StageSource<'a>,
    pub programs: Vec<ProgramSource<'a>>,
}

/// Outcome of a compile or link step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Ok,
    /// Failed, with the backend's diagnostic text.
    Failed(String),
}

impl BuildStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, BuildStatus::Ok)
    }
}

/// A backend object together with the status of the step that produced it.
///
/// Failed steps still produce an object so later steps can be attempted against
/// it (see `FailurePolicy::Degrade`).
#[derive(Debug)]
pub struct Compiled<T> {
    pub object: T,
    pub status: BuildStatus,
}

impl<T> Compiled<T> {
    pub fn ok(object: T) -> Self {
        Self { object, status: BuildStatus::Ok }
    }

    pub fn failed(object: T, log: impl Into<String>) -> Self {
        Self { object, status: BuildStatus::Failed(log.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Shader build failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Compile {
        label: String,
        stage: ShaderStage,
        log: String,
    },
    Link {
        program: String,
        log: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { label, stage, log } => {
                write!(f, "{stage} shader `{label}` failed to compile:\n{log}")
            }
            ShaderError::Link { program, log } => {
                write!(f, "program `{program}` failed to link:\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// What `build_programs` does when a step fails.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Stop at the first failure; nothing is drawn.
    #[default]
    FailFast,
    /// Log, keep linking, and hand back programs marked unusable.
    Degrade,
}

/// Compile/link seam between the build procedure and a graphics backend.
pub trait ShaderBackend {
    type Stage;
    type Program;

    fn compile_stage(&mut self, source: &StageSource<'_>) -> Compiled<Self::Stage>;

    fn link_program(
        &mut self,
        program: &ProgramSource<'_>,
        vertex: &Compiled<Self::Stage>,
        fragment: &Compiled<Self::Stage>,
    ) -> Compiled<Self::Program>;

    /// Releases a stage object once no more programs will link against it.
    fn release_stage(&mut self, stage: Self::Stage) {
        drop(stage);
    }
}

/// Compiles and links every program of `table`, in table order.
///
/// Every failure is logged. Under `FailFast` the first one is returned as an error;
/// under `Degrade` all programs are linked regardless and returned with their
/// statuses.
pub fn build_programs<B: ShaderBackend>(
    backend: &mut B,
    table: &ShaderTable<'_>,
    policy: FailurePolicy,
) -> Result<Vec<Compiled<B::Program>>, ShaderError> {
    let vertex = backend.compile_stage(&table.vertex);
    if let BuildStatus::Failed(diag) = &vertex.status {
        let err = ShaderError::Compile {
            label: table.vertex.label.to_string(),
            stage: table.vertex.stage,
            log: diag.clone(),
        };
        log::error!("{err}");
        if policy == FailurePolicy::FailFast {
            backend.release_stage(vertex.object);
            return Err(err);
        }
    }

    let mut programs = Vec::with_capacity(table.programs.len());
    let mut failure = None;

    for source in &table.programs {
        let fragment = backend.compile_stage(&source.fragment);
        if let BuildStatus::Failed(diag) = &fragment.status {
            let err = ShaderError::Compile {
                label: source.fragment.label.to_string(),
                stage: source.fragment.stage,
                log: diag.clone(),
            };
            log::error!("{err}");
            if policy == FailurePolicy::FailFast {
                failure = Some(err);
                backend.release_stage(fragment.object);
                break;
            }
        }

        let program = backend.link_program(source, &vertex, &fragment);
        backend.release_stage(fragment.object);

        if let BuildStatus::Failed(diag) = &program.status {
            let err = ShaderError::Link {
                program: source.name.to_string(),
                log: diag.clone(),
            };
            log::error!("{err}");
            if policy == FailurePolicy::FailFast {
                failure = Some(err);
                break;
            }
        } else {
            log::debug!("program `{}` linked", source.name);
        }

        programs.push(program);
    }

    backend.release_stage(vertex.object);

    match failure {
        Some(err) => Err(err),
        None => Ok(programs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call; fails the stages/programs whose label is listed.
    #[derive(Default)]
    struct RecordingBackend {
        fail_compile: Vec<&'static str>,
        fail_link: Vec<&'static str>,
        calls: Vec<String>,
    }

    impl ShaderBackend for RecordingBackend {
        type Stage = String;
        type Program = String;

        fn compile_stage(&mut self, source: &StageSource<'_>) -> Compiled<String> {
            self.calls.push(format!("compile {}", source.label));
            if self.fail_compile.iter().any(|l| *l == source.label) {
                Compiled::failed(source.label.to_string(), "syntax error")
            } else {
                Compiled::ok(source.label.to_string())
            }
        }

        fn link_program(
            &mut self,
            program: &ProgramSource<'_>,
            vertex: &Compiled<String>,
            fragment: &Compiled<String>,
        ) -> Compiled<String> {
            self.calls.push(format!("link {} {}+{}", program.name, vertex.object, fragment.object));
            if self.fail_link.iter().any(|l| *l == program.name) || !vertex.is_ok() || !fragment.is_ok() {
                Compiled::failed(program.name.to_string(), "link error")
            } else {
                Compiled::ok(program.name.to_string())
            }
        }

        fn release_stage(&mut self, stage: String) {
            self.calls.push(format!("release {stage}"));
        }
    }

    fn table() -> ShaderTable<'static> {
        let frag = |label| StageSource { label, stage: ShaderStage::Fragment, code: "" };
        ShaderTable {
            vertex: StageSource { label: "vs", stage: ShaderStage::Vertex, code: "" },
            programs: vec![
                ProgramSource { name: "orange", fragment: frag("fs_orange"), uniform: "orange" },
                ProgramSource { name: "yellow", fragment: frag("fs_yellow"), uniform: "yellow" },
            ],
        }
    }

    #[test]
    fn shares_vertex_stage_and_releases_stages_after_linking() {
        let mut backend = RecordingBackend::default();
        let programs = build_programs(&mut backend, &table(), FailurePolicy::FailFast).unwrap();

        assert_eq!(programs.len(), 2);
        assert!(programs.iter().all(Compiled::is_ok));
        assert_eq!(
            backend.calls,
            vec![
                "compile vs",
                "compile fs_orange",
                "link orange vs+fs_orange",
                "release fs_orange",
                "compile fs_yellow",
                "link yellow vs+fs_yellow",
                "release fs_yellow",
                "release vs",
            ]
        );
    }

    #[test]
    fn fail_fast_aborts_before_any_link_on_vertex_failure() {
        let mut backend = RecordingBackend { fail_compile: vec!["vs"], ..Default::default() };
        let err = build_programs(&mut backend, &table(), FailurePolicy::FailFast).unwrap_err();

        assert!(matches!(
            err,
            ShaderError::Compile { ref label, stage: ShaderStage::Vertex, .. } if label == "vs"
        ));
        assert!(!backend.calls.iter().any(|c| c.starts_with("link")));
        assert_eq!(backend.calls.last().map(String::as_str), Some("release vs"));
    }

    #[test]
    fn degrade_still_links_both_programs_on_vertex_failure() {
        let mut backend = RecordingBackend { fail_compile: vec!["vs"], ..Default::default() };
        let programs = build_programs(&mut backend, &table(), FailurePolicy::Degrade).unwrap();

        assert_eq!(programs.len(), 2);
        assert!(programs.iter().all(|p| !p.is_ok()));
        let links: Vec<_> = backend.calls.iter().filter(|c| c.starts_with("link")).collect();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn fail_fast_reports_link_failure_and_stops() {
        let mut backend = RecordingBackend { fail_link: vec!["orange"], ..Default::default() };
        let err = build_programs(&mut backend, &table(), FailurePolicy::FailFast).unwrap_err();

        assert_eq!(err, ShaderError::Link { program: "orange".into(), log: "link error".into() });
        assert!(!backend.calls.iter().any(|c| c == "compile fs_yellow"));
        assert_eq!(backend.calls.last().map(String::as_str), Some("release vs"));
    }

    #[test]
    fn degrade_keeps_healthy_programs_usable() {
        let mut backend = RecordingBackend { fail_compile: vec!["fs_orange"], ..Default::default() };
        let programs = build_programs(&mut backend, &table(), FailurePolicy::Degrade).unwrap();

        assert!(!programs[0].is_ok());
        assert!(programs[1].is_ok());
    }

    #[test]
    fn error_display_carries_diagnostic() {
        let err = ShaderError::Compile {
            label: "vs".into(),
            stage: ShaderStage::Vertex,
            log: "expected `;`".into(),
        };
        assert_eq!(err.to_string(), "vertex shader `vs` failed to compile:\nexpected `;`");
    }
}
