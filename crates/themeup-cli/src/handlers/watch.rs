//! Watch command handler.
//!
//! Runs the poller until Ctrl+C (or SIGTERM). On unix, SIGHUP asks for a
//! check the same way a page becoming visible would.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::presentation::OutputMode;

/// Execute the watch command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let poller = ctx.core().poller();
    let (triggers, receiver) = mpsc::channel(8);
    let cancel = CancellationToken::new();

    if ctx.output() == OutputMode::Text {
        println!(
            "Watching {} channel every {}s (Ctrl+C to stop)",
            poller.channel(),
            poller.interval().as_secs()
        );
    }

    let runner = tokio::spawn({
        let cancel = cancel.clone();
        async move { poller.run(receiver, cancel).await }
    });

    #[cfg(unix)]
    let forwarder = forward_hangups(triggers.clone(), cancel.clone())?;

    shutdown_signal().await?;
    info!("Shutdown requested");
    cancel.cancel();
    drop(triggers);

    #[cfg(unix)]
    forwarder.await?;
    runner.await?;
    Ok(())
}

/// Wait for Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Turn each SIGHUP into a visibility-change trigger.
#[cfg(unix)]
fn forward_hangups(
    triggers: mpsc::Sender<themeup_core::PollTrigger>,
    cancel: CancellationToken,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    debug!("SIGHUP received, requesting check");
                    if triggers.send(themeup_core::PollTrigger::VisibilityChange).await.is_err() {
                        break;
                    }
                }
            }
        }
    }))
}
