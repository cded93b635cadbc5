//! Background work that must not stall the command loop.
//!
//! Requests are handled one at a time on a shared worker thread. The caller
//! gets a [`WorkHandle`](native::WorkHandle) back immediately and polls it
//! between other work.

use std::{
    panic::{self, AssertUnwindSafe},
    time::Duration,
};

use picswap_image::{ImageDescriptor, ImageLoader, ImageSource as _, LoadedImage, Offline, TcpProbe};

mod native;

pub(crate) use self::native::{enqueue, warm_up};

/// A request that can be offloaded to the background worker.
#[derive(Debug, Clone)]
pub(crate) enum WorkRequest {
    /// Fetch a puzzle image, substituting the default image on failure.
    LoadImage {
        descriptor: ImageDescriptor,
        offline: bool,
        timeout: Duration,
    },
}

/// A response produced by background work.
#[derive(Debug)]
pub(crate) enum WorkResponse {
    /// The image to cut into tiles.
    ImageReady(LoadedImage),
}

/// Errors that can occur while scheduling or receiving background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WorkError {
    /// The worker thread could not be started.
    #[display("failed to start the background worker")]
    WorkerSpawnFailed,
    /// The background channel was disconnected unexpectedly.
    #[display("background worker disconnected")]
    WorkerDisconnected,
}

impl WorkRequest {
    /// Handles a request and produces the corresponding response.
    #[must_use]
    pub(crate) fn handle(self) -> WorkResponse {
        match self {
            Self::LoadImage {
                descriptor,
                offline,
                timeout,
            } => {
                let loaded = if offline {
                    ImageLoader::with_timeout(Offline, timeout).fetch_image(&descriptor)
                } else {
                    ImageLoader::with_timeout(TcpProbe::default(), timeout).fetch_image(&descriptor)
                };
                WorkResponse::ImageReady(loaded)
            }
        }
    }

    /// Like [`handle`](Self::handle), but a panic while handling still yields a
    /// response, so the worker thread survives it.
    #[must_use]
    pub(crate) fn handle_catching_panics(self) -> WorkResponse {
        recover(|| self.handle())
    }
}

fn recover(work: impl FnOnce() -> WorkResponse) -> WorkResponse {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|_| {
        log::error!("background work panicked, answering with the default image");
        WorkResponse::ImageReady(LoadedImage::fallback())
    })
}
