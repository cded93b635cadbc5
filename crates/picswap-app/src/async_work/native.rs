//! Background work on a shared thread fed through a channel.
use std::{
    sync::{OnceLock, mpsc},
    thread,
    time::Duration,
};

use super::{WorkError, WorkRequest, WorkResponse};

struct WorkRequestEnvelope {
    request: WorkRequest,
    response_tx: mpsc::Sender<WorkResponse>,
}

// Shared worker thread sender reused across requests. `None` if spawning failed.
static WORKER_SENDER: OnceLock<Option<mpsc::Sender<WorkRequestEnvelope>>> = OnceLock::new();

/// A handle for polling background work completion.
pub(crate) struct WorkHandle {
    receiver: mpsc::Receiver<WorkResponse>,
}

impl std::fmt::Debug for WorkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkHandle").finish()
    }
}

impl WorkHandle {
    /// Attempts to poll for a completed response.
    pub(crate) fn poll(&mut self) -> Result<Option<WorkResponse>, WorkError> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkError::WorkerDisconnected),
        }
    }

    /// Polls every `tick` until the response arrives, calling `on_tick` while
    /// it is still pending.
    pub(crate) fn wait(
        mut self,
        tick: Duration,
        mut on_tick: impl FnMut(),
    ) -> Result<WorkResponse, WorkError> {
        loop {
            if let Some(response) = self.poll()? {
                return Ok(response);
            }
            on_tick();
            thread::sleep(tick);
        }
    }
}

fn worker_sender() -> Result<&'static mpsc::Sender<WorkRequestEnvelope>, WorkError> {
    WORKER_SENDER
        .get_or_init(|| {
            let (tx, rx) = mpsc::channel::<WorkRequestEnvelope>();
            let spawned = thread::Builder::new()
                .name("picswap-worker".to_owned())
                .spawn(move || {
                    while let Ok(envelope) = rx.recv() {
                        let response = envelope.request.handle_catching_panics();
                        let _ = envelope.response_tx.send(response);
                    }
                });
            match spawned {
                Ok(_) => Some(tx),
                Err(err) => {
                    log::error!("cannot spawn background worker: {err}");
                    None
                }
            }
        })
        .as_ref()
        .ok_or(WorkError::WorkerSpawnFailed)
}

/// Starts the shared worker thread without sending a request.
pub(crate) fn warm_up() -> Result<(), WorkError> {
    worker_sender().map(|_| ())
}

/// Enqueues a background task on the shared worker thread and returns a handle
/// for polling completion.
pub(crate) fn enqueue(request: WorkRequest) -> Result<WorkHandle, WorkError> {
    let worker_tx = worker_sender()?;

    let (response_tx, response_rx) = mpsc::channel();
    worker_tx
        .send(WorkRequestEnvelope {
            request,
            response_tx,
        })
        .map_err(|_| WorkError::WorkerDisconnected)?;

    Ok(WorkHandle {
        receiver: response_rx,
    })
}
