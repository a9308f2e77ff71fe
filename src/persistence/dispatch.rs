//! Fire-and-forget submission
//!
//! Native: a worker thread owns the store and drains a channel.
//! Web: each write is deferred onto the browser's task queue.

use super::SubmitError;
use super::records::Submission;
use super::store::ResultStore;

/// A submission the store rejected, kept for retry or telemetry
#[derive(Debug)]
pub struct SubmissionFailure {
    pub submission: Submission,
    pub error: SubmitError,
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread::{self, JoinHandle};

    use super::*;

    pub struct Dispatcher<S> {
        tx: Option<Sender<Submission>>,
        failures: Receiver<SubmissionFailure>,
        worker: Option<JoinHandle<S>>,
    }

    impl<S: ResultStore + Send + 'static> Dispatcher<S> {
        /// Start the worker that owns `store`
        pub fn start(store: S) -> Self {
            let (tx, rx) = mpsc::channel::<Submission>();
            let (fail_tx, failures) = mpsc::channel::<SubmissionFailure>();
            let worker = thread::Builder::new()
                .name("result-dispatch".to_string())
                .spawn(move || run_worker(store, rx, fail_tx));
            let worker = match worker {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::warn!("Result worker failed to start, results will be dropped: {e}");
                    None
                }
            };
            Self {
                tx: Some(tx),
                failures,
                worker,
            }
        }

        /// Queue a submission. Never blocks.
        pub fn submit(&self, submission: Submission) -> Result<(), SubmitError> {
            let tx = self.tx.as_ref().ok_or(SubmitError::Disconnected)?;
            if self.worker.is_none() {
                return Err(SubmitError::Disconnected);
            }
            tx.send(submission).map_err(|_| SubmitError::Disconnected)
        }

        /// Failures reported by the worker since the last call
        pub fn drain_failures(&self) -> Vec<SubmissionFailure> {
            self.failures.try_iter().collect()
        }

        /// Flush the queue, stop the worker and hand back the store along
        /// with any failures not yet drained
        pub fn shutdown(mut self) -> (Option<S>, Vec<SubmissionFailure>) {
            self.tx.take();
            let store = self.worker.take().and_then(|w| w.join().ok());
            (store, self.drain_failures())
        }
    }

    fn run_worker<S: ResultStore>(
        mut store: S,
        rx: Receiver<Submission>,
        failures: Sender<SubmissionFailure>,
    ) -> S {
        while let Ok(submission) = rx.recv() {
            if let Err(error) = store.submit(&submission) {
                log::warn!("Result submission failed: {error}");
                let _ = failures.send(SubmissionFailure { submission, error });
            }
        }
        store
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    pub struct Dispatcher<S> {
        store: Rc<RefCell<S>>,
        failures: Rc<RefCell<Vec<SubmissionFailure>>>,
    }

    impl<S: ResultStore + 'static> Dispatcher<S> {
        pub fn start(store: S) -> Self {
            Self {
                store: Rc::new(RefCell::new(store)),
                failures: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Queue a submission. Never blocks.
        pub fn submit(&self, submission: Submission) -> Result<(), SubmitError> {
            let store = Rc::clone(&self.store);
            let failures = Rc::clone(&self.failures);
            wasm_bindgen_futures::spawn_local(async move {
                let result = store.borrow_mut().submit(&submission);
                if let Err(error) = result {
                    log::warn!("Result submission failed: {error}");
                    failures
                        .borrow_mut()
                        .push(SubmissionFailure { submission, error });
                }
            });
            Ok(())
        }

        pub fn drain_failures(&self) -> Vec<SubmissionFailure> {
            std::mem::take(&mut *self.failures.borrow_mut())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::Dispatcher;
#[cfg(target_arch = "wasm32")]
pub use web::Dispatcher;
