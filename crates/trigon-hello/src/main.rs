use anyhow::Result;

use trigon_engine::gpu::GpuConfig;
use trigon_engine::logging::{self, LogConfig};
use trigon_engine::window::{Runtime, WindowConfig};

fn main() {
    logging::init(&LogConfig::default());

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(-1);
    }
}

fn run() -> Result<()> {
    Runtime::run(
        WindowConfig {
            title: "trigon".to_string(),
            width: 800,
            height: 600,
        },
        GpuConfig::default(),
    )
}
