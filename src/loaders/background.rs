use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::gltf::{load_model, ModelData};
use crate::environment::{load_hdri, HdriImage};

/// Runs a slow load on a worker thread so the window stays responsive.
/// The render loop polls it once per frame.
pub struct BackgroundLoad<T> {
    what: &'static str,
    receiver: Option<Receiver<Result<T>>>,
}

pub type ModelLoader = BackgroundLoad<ModelData>;
pub type HdriLoader = BackgroundLoad<HdriImage>;

impl<T: Send + 'static> BackgroundLoad<T> {
    pub fn spawn(what: &'static str, job: impl FnOnce() -> Result<T> + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            sender.send(job()).ok();
        });

        Self {
            what,
            receiver: Some(receiver),
        }
    }

    /// Take the load result if it is ready. Yields a result at most once.
    pub fn poll(&mut self) -> Option<Result<T>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(anyhow!("{} loader thread exited without a result", self.what)))
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}

impl ModelLoader {
    pub fn model(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn("Model", move || load_model(&path))
    }
}

impl HdriLoader {
    /// Fetch and decode an HDRI no larger than `max_dimension` texels per side
    pub fn hdri(source: impl Into<String>, max_dimension: u32) -> Self {
        let source = source.into();
        Self::spawn("HDRI", move || load_hdri(&source, max_dimension))
    }
}
