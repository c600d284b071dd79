//! Background execution of file reads and prediction requests.
//!
//! Each job runs on its own short-lived thread and reports exactly one
//! [`WorkerEvent`] over an mpsc channel. The UI thread drains the channel
//! every frame and feeds the events into the [`Session`], which drops any
//! whose ticket is no longer current.

use crate::client::{Prediction, Predictor};
use crate::error::{LoadError, SubmitError};
use crate::selection::{ImageSource, LoadedImage, SelectedImage};
use crate::session::{Session, Ticket};
use std::sync::{Arc, mpsc};
use std::time::Duration;

#[derive(Debug)]
pub enum WorkerEvent {
    ImageLoaded {
        ticket: Ticket,
        result: Result<LoadedImage, LoadError>,
    },
    PredictionFinished {
        ticket: Ticket,
        result: Result<Prediction, SubmitError>,
    },
}

pub struct Worker {
    predictor: Arc<dyn Predictor>,
    tx: mpsc::Sender<WorkerEvent>,
    rx: mpsc::Receiver<WorkerEvent>,
    pending: usize,
}

impl Worker {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            predictor,
            tx,
            rx,
            pending: 0,
        }
    }

    /// Swap the backend used for future requests; running ones keep theirs.
    pub fn set_predictor(&mut self, predictor: Arc<dyn Predictor>) {
        self.predictor = predictor;
    }

    /// Jobs started but not yet received back.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn load_image(&mut self, ticket: Ticket, source: ImageSource) {
        let tx = self.tx.clone();
        self.pending += 1;
        tracing::debug!(ticket, source = %source.display_name(), "Reading image");
        std::thread::spawn(move || {
            let result = source.load();
            // Receiver gone means the app is shutting down.
            let _ = tx.send(WorkerEvent::ImageLoaded { ticket, result });
        });
    }

    pub fn predict(&mut self, ticket: Ticket, image: SelectedImage) {
        let tx = self.tx.clone();
        let predictor = Arc::clone(&self.predictor);
        self.pending += 1;
        std::thread::spawn(move || {
            let result = predictor.predict(&image);
            let _ = tx.send(WorkerEvent::PredictionFinished { ticket, result });
        });
    }

    /// Non-blocking: every event that has arrived so far.
    pub fn poll(&mut self) -> Vec<WorkerEvent> {
        let events: Vec<WorkerEvent> = self.rx.try_iter().collect();
        self.pending = self.pending.saturating_sub(events.len());
        events
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<WorkerEvent> {
        let event = self.rx.recv_timeout(timeout).ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(event)
    }

    /// Poll and apply everything to `session`. Returns how many events were
    /// accepted; stale ones are not counted.
    pub fn drain_into(&mut self, session: &mut Session) -> usize {
        let mut accepted = 0;
        for event in self.poll() {
            if apply(session, event) {
                accepted += 1;
            }
        }
        accepted
    }
}

/// Feed one event into the session.
pub fn apply(session: &mut Session, event: WorkerEvent) -> bool {
    match event {
        WorkerEvent::ImageLoaded { ticket, result } => session.finish_selection(ticket, result),
        WorkerEvent::PredictionFinished { ticket, result } => session.finish_submit(ticket, result),
    }
}
