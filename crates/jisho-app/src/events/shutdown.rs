use tokio_util::sync::CancellationToken;

/// Tear down the gateway connection and let the process exit.
/// Sessions die with the process.
pub fn handle_shutdown(cancel: &CancellationToken) {
    tracing::info!("Shutdown command received");
    cancel.cancel();
}
