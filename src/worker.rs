use crate::backend::TranslationBackend;
use crate::controller::Submission;
use crate::error::TranslateError;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

/// A finished request on its way back to the UI thread.
#[derive(Debug)]
pub struct Outcome {
    pub ticket: u64,
    pub result: Result<String, TranslateError>,
}

/// Runs backend calls on a tokio runtime and queues their outcomes for the UI thread.
pub struct Dispatcher {
    rt: tokio::runtime::Runtime,
    backend: Arc<dyn TranslationBackend>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> anyhow::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("translingua-net")
            .enable_all()
            .build()?;
        let (tx, rx) = crossbeam_channel::unbounded();
        Ok(Self { rt, backend, tx, rx })
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.rt.handle().clone()
    }

    /// `wake` runs after the outcome is queued, e.g. to repaint the window.
    pub fn dispatch<W>(&self, sub: Submission, wake: W)
    where
        W: Fn() + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = backend.translate(&sub.request).await;
            if tx.send(Outcome { ticket: sub.ticket, result }).is_err() {
                log::warn!("UI gone; dropping outcome for request #{}", sub.ticket);
                return;
            }
            wake();
        });
    }

    /// Everything that finished since the last call.
    pub fn drain(&self) -> Vec<Outcome> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Outcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}
