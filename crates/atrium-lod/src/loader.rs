//! Background decoding of display source images.
//!
//! The frame loop submits requests with [`AssetLoader::request`] and collects
//! finished loads each frame with [`AssetLoader::drain`]; it never waits on
//! the worker.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::cache::TextureKey;
use crate::error::AssetError;

/// A finished load, successful or not.
#[derive(Debug)]
pub struct LoadResult {
    pub key: TextureKey,
    pub outcome: Result<RgbaImage, AssetError>,
}

/// Read and decode an image file into RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::ZeroDimensions {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(image)
}

/// Single worker thread that decodes images off the frame loop.
///
/// Teardown abandons queued loads: the worker checks a shared cancel flag
/// before each decode, so [`shutdown`](Self::shutdown) waits for at most the
/// load already in progress.
pub struct AssetLoader {
    request_sender: Option<Sender<TextureKey>>,
    request_queue: Receiver<TextureKey>,
    result_receiver: Receiver<LoadResult>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl AssetLoader {
    /// Spawn the worker.
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<TextureKey>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));

        let worker_queue = request_rx.clone();
        let worker_cancelled = Arc::clone(&cancelled);
        let worker = std::thread::spawn(move || {
            while let Ok(key) = worker_queue.recv() {
                if worker_cancelled.load(Ordering::Acquire) {
                    break;
                }
                let outcome = load_image(&key.source);
                debug!(
                    id = %key.id,
                    source = %key.source.display(),
                    ok = outcome.is_ok(),
                    "asset load finished"
                );
                if result_tx.send(LoadResult { key, outcome }).is_err() {
                    break;
                }
            }
        });

        Self {
            request_sender: Some(request_tx),
            request_queue: request_rx,
            result_receiver: result_rx,
            cancelled,
            worker: Some(worker),
        }
    }

    /// Queue a load. Fails only if the loader has been shut down.
    pub fn request(&self, key: TextureKey) -> Result<(), AssetError> {
        let sender = self.request_sender.as_ref().ok_or(AssetError::LoaderGone)?;
        sender.send(key).map_err(|_| AssetError::LoaderGone)
    }

    /// Collect every load finished since the last call, without blocking.
    pub fn drain(&self) -> Vec<LoadResult> {
        self.result_receiver.try_iter().collect()
    }

    /// Requests not yet picked up by the worker.
    pub fn queued(&self) -> usize {
        self.request_queue.len()
    }

    /// Drop every queued request the worker has not started. A load already
    /// in progress still delivers its result. Returns the number dropped.
    pub fn discard_queued(&self) -> usize {
        let dropped = self.request_queue.try_iter().count();
        if dropped > 0 {
            debug!(dropped, "queued asset loads discarded");
        }
        dropped
    }

    /// Stop accepting requests, abandon queued loads, and join the worker.
    pub fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.request_sender.take();
        self.discard_queued();
        if let Some(handle) = self.worker.take()
            && handle.join().is_err()
        {
            warn!("asset loader worker panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        self.request_sender.is_some()
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}
