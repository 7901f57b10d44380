use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};
use std::time::Duration;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const UPKEEP_PERIOD: Duration = Duration::from_secs(5);

/// Install the process-wide recorder for self-metrics and store its handle.
///
/// Safe to call more than once; only the first call installs a recorder
/// and starts its upkeep thread.
pub fn init_metrics() {
    HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if let Err(err) = metrics::set_global_recorder(recorder) {
            tracing::warn!("Self-metrics recorder not installed: {err}");
        }
        if let Err(err) = spawn_upkeep(handle.clone(), UPKEEP_PERIOD) {
            tracing::warn!("Self-metrics upkeep not started: {err}");
        }
        handle
    });
}

/// Drain histogram samples periodically so they do not pile up between
/// scrapes.
fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> std::io::Result<JoinHandle<()>> {
    // ---
    thread::Builder::new()
        .name("self-metrics-upkeep".to_string())
        .spawn(move || loop {
            thread::sleep(period);
            handle.run_upkeep();
        })
}

/// Render the current self-metrics in Prometheus text format.
pub fn render_metrics() -> String {
    HANDLE.get().map(PrometheusHandle::render).unwrap_or_default()
}
