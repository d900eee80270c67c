//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, local storage and the catalog the way a host shell does.
//! - Run the startup health probe alongside startup and wait a bounded time for its
//!   outcome before exiting, then flush the log sink.
//! - Print a deterministic summary for quick local sanity checks.

use devhub_core::{
    report_health, AppContext, Catalog, Clock, CoreConfig, HealthError, HealthProbe,
    MemoryBackend, PathPage, SqliteBackend, StorageBackend, SystemClock, ToolsPage,
};
use log::warn;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound on how long `main` waits for the probe before exiting.
const HEALTH_WAIT: Duration = Duration::from_secs(6);

/// `GET <backend>/api/` status probe.
struct HttpHealthProbe {
    endpoint: String,
}

impl HealthProbe for HttpHealthProbe {
    fn probe(&self) -> Result<String, HealthError> {
        let response = ureq::get(&self.endpoint)
            .timeout(HEALTH_TIMEOUT)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => HealthError::Status(code),
                ureq::Error::Transport(transport) => HealthError::Transport(transport.to_string()),
            })?;
        response
            .into_string()
            .map_err(|err| HealthError::Transport(err.to_string()))
    }
}

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    if let Err(err) = devhub_core::init_logging_from_config(&config) {
        eprintln!("devhub logging disabled: {err}");
    }

    // Runs alongside startup; the outcome is only logged.
    let health = config
        .health_endpoint()
        .map(|endpoint| spawn_health_probe(HttpHealthProbe { endpoint }));

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let catalog = match load_catalog(&config, clock.now_ms()) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("devhub catalog error: {err}");
            devhub_core::flush_logging();
            return ExitCode::FAILURE;
        }
    };

    let backend: Box<dyn StorageBackend> = match config.storage_db_path() {
        Some(path) => match open_sqlite(&path) {
            Ok(backend) => Box::new(backend),
            Err(err) => {
                warn!("event=storage_open module=cli status=fallback error={err}");
                Box::new(MemoryBackend::new())
            }
        },
        None => Box::new(MemoryBackend::new()),
    };

    let ctx = AppContext::new(backend, catalog, clock)
        .with_search_debounce_ms(config.search_debounce_ms);

    println!("devhub_core ping={}", devhub_core::ping());
    println!("devhub_core version={}", devhub_core::core_version());
    println!("theme={}", ctx.theme().as_str());
    println!(
        "catalog articles={} tools={} steps={} channels={}",
        ctx.catalog().articles().len(),
        ctx.catalog().tools().len(),
        ctx.catalog().path().len(),
        ctx.catalog().channels().len()
    );

    let tools = ToolsPage::mount(&ctx);
    println!("tool_categories={}", tools.categories().join(","));
    tools.unmount();

    let path = PathPage::mount(&ctx);
    let progress = path.progress();
    println!(
        "path_progress={}/{} ({}%)",
        progress.completed, progress.total, progress.percent
    );
    path.unmount();

    if let Some(done) = health {
        if done.recv_timeout(HEALTH_WAIT).is_err() {
            warn!("event=health_check module=cli status=abandoned");
        }
    }
    devhub_core::flush_logging();

    ExitCode::SUCCESS
}

fn spawn_health_probe(probe: impl HealthProbe + Send + 'static) -> mpsc::Receiver<bool> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let healthy = report_health(&probe);
        // The receiver is gone once main stopped waiting.
        let _ = sender.send(healthy);
    });
    receiver
}

fn open_sqlite(path: &Path) -> Result<SqliteBackend, String> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|err| format!("cannot create `{}`: {err}", dir.display()))?;
    }
    SqliteBackend::open(path).map_err(|err| err.to_string())
}

fn load_catalog(config: &CoreConfig, now_ms: i64) -> Result<Catalog, String> {
    let Some(path) = config.catalog_path.as_ref() else {
        return Ok(Catalog::builtin(now_ms));
    };
    let document = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
    Catalog::from_json(&document).map_err(|err| err.to_string())
}
