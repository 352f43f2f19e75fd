//! # Blob Availability Signal
//!
//! A single-fire completion signal shared between a cache entry and whoever
//! is waiting on its blobs. The entry owns the [`AvailabilityResolver`];
//! block inputs carry [`AvailabilityHandle`]s.
//!
//! Backed by a `tokio::sync::watch` channel holding `Option<BlockInputBlobs>`:
//! `None` until resolved, `Some` forever after. Dropping the resolver before
//! it fires (eviction) wakes every waiter with [`AvailabilityError::Dropped`].

use super::block_input::BlockInputBlobs;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// The cache entry went away before all blobs arrived.
    #[error("block input evicted before its blobs became available")]
    Dropped,
}

/// Create a connected resolver/handle pair.
pub fn availability_channel() -> (AvailabilityResolver, AvailabilityHandle) {
    let (tx, rx) = watch::channel(None);
    (AvailabilityResolver { tx }, AvailabilityHandle { rx })
}

/// Resolving side. Fires at most once.
#[derive(Debug)]
pub struct AvailabilityResolver {
    tx: watch::Sender<Option<BlockInputBlobs>>,
}

impl AvailabilityResolver {
    /// Publish the complete blob set.
    ///
    /// Returns `true` only for the call that actually resolved the signal;
    /// later calls leave the first value in place.
    pub fn resolve(&self, blobs: BlockInputBlobs) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(blobs);
            true
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// A new waiter on this signal.
    pub fn handle(&self) -> AvailabilityHandle {
        AvailabilityHandle {
            rx: self.tx.subscribe(),
        }
    }
}

/// Waiting side. Cheap to clone; every clone observes the same resolution.
#[derive(Debug, Clone)]
pub struct AvailabilityHandle {
    rx: watch::Receiver<Option<BlockInputBlobs>>,
}

impl AvailabilityHandle {
    /// Wait until the blobs are available.
    ///
    /// Returns immediately if already resolved, even when the resolver has
    /// since been dropped.
    pub async fn wait(mut self) -> Result<BlockInputBlobs, AvailabilityError> {
        let blobs = self
            .rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| AvailabilityError::Dropped)?
            .clone();
        blobs.ok_or(AvailabilityError::Dropped)
    }

    /// The resolved blobs, if the signal has fired.
    pub fn try_get(&self) -> Option<BlockInputBlobs> {
        self.rx.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.rx.borrow().is_some()
    }
}
