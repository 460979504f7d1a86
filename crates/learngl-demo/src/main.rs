mod app;
mod pulse;
mod scene;

use learngl_engine::device::GpuInit;
use learngl_engine::logging::{init_logging, LoggingConfig};
use learngl_engine::render::FailurePolicy;
use learngl_engine::window::{Runtime, RuntimeConfig};

use crate::app::TrianglesApp;

fn main() {
    init_logging(LoggingConfig::default());

    // Uniform colors are written as-is, like a default GL framebuffer.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..Default::default()
    };

    let app = TrianglesApp::new(FailurePolicy::FailFast);

    if let Err(e) = Runtime::run(RuntimeConfig::default(), gpu_init, app) {
        log::error!("{e:#}");
        std::process::exit(-1);
    }
}
