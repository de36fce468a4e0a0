// ~10 Hz key polling loop with an unconditional safe-pose shutdown
// Note: the poll timeout is the tick rate, a pose goes out every tick even with no key pressed

use std::future::Future;
use std::io;

use tracing::{error, info, warn};

// local imports
use crate::config::{Args, FRAME_ID, POLL_TIMEOUT};
use crate::error::TeleopError;
use crate::keys::{CONTROLS, KeySource, TerminalKeys};
use crate::messages::PoseStamped;
use crate::publisher::PoseSink;
use crate::teleop::{Control, Teleop};

pub async fn run(args: Args) -> Result<(), TeleopError> {
    let config = match &args.zenoh_config {
        Some(path) => {
            info!("Loading Zenoh config from {}", path.display());
            zenoh::Config::from_file(path)?
        }
        None => zenoh::Config::default(),
    };

    info!("Opening Zenoh session...");
    let session = zenoh::open(config).await?;
    let publisher = session.declare_publisher(args.topic.as_str()).await?;

    info!("Publishing to: {}", args.topic);
    info!("Controls: {}", CONTROLS);

    let mut teleop = Teleop::new();
    drive(TerminalKeys::open, &publisher, &mut teleop, shutdown_signal()).await
}

/// Open the key source, run the loop until it quits, faults or `shutdown`
/// resolves, then send the safe pose and release the keys (restoring the
/// terminal). The safe pose also goes out when the keys fail to open. The
/// first error, if any, is returned after cleanup.
pub async fn drive<O, K, P, S>(
    open_keys: O,
    sink: &P,
    teleop: &mut Teleop,
    shutdown: S,
) -> Result<(), TeleopError>
where
    O: FnOnce() -> io::Result<K>,
    K: KeySource,
    P: PoseSink,
    S: Future<Output = ()>,
{
    let mut keys = match open_keys() {
        Ok(keys) => keys,
        Err(e) => {
            error!("Failed to open keyboard input: {}", e);
            // Nothing to restore, the terminal was never switched
            let _ = publish_safe_pose(sink, teleop).await;
            return Err(e.into());
        }
    };

    let result = tokio::select! {
        biased;
        () = shutdown => {
            info!("Shutdown signal received");
            Ok(())
        }
        res = control_loop(&mut keys, sink, teleop) => res,
    };

    if let Err(e) = &result {
        error!("Teleop loop failed: {}", e);
    }

    // 1. Safe pose, whatever ended the loop
    let safe = publish_safe_pose(sink, teleop).await;

    // 2. Terminal back to its original mode
    drop(keys);

    result.and(safe)
}

async fn publish_safe_pose<P: PoseSink>(
    sink: &P,
    teleop: &mut Teleop,
) -> Result<(), TeleopError> {
    let safe = sink.publish(&PoseStamped::safe(FRAME_ID)).await;
    match &safe {
        Ok(()) => info!("Published safe pose"),
        Err(e) => error!("Failed to publish safe pose: {}", e),
    }
    teleop.reset();
    safe
}

async fn control_loop<K: KeySource, P: PoseSink>(
    keys: &mut K,
    sink: &P,
    teleop: &mut Teleop,
) -> Result<(), TeleopError> {
    loop {
        let key = keys.next_key(POLL_TIMEOUT).await?;
        if teleop.handle(key) == Control::Quit {
            info!("Interrupt key pressed, stopping");
            return Ok(());
        }
        sink.publish(&teleop.pose_message(FRAME_ID)).await?;
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
