use std::process::ExitCode;

use tracing::{error, info};

fn main() -> ExitCode {
    let cfg = match server::load_config_and_logging() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("server: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "server", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "todo service starting"
    );

    match rt.block_on(server::serve(cfg)) {
        Ok(()) => {
            info!(service = "server", event = "stop", pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server returned error");
            ExitCode::FAILURE
        }
    }
}
