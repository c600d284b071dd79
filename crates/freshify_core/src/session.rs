//! Single owner of the UI-facing state: selection, request lifecycle, result
//! and pending alert.
//!
//! Every background operation is tagged with a [`Ticket`]. Only the most
//! recently issued ticket is accepted; starting a new selection, clearing the
//! image or cancelling makes older results stale, so overlapping reads and
//! requests resolve to whichever was started last.

use crate::client::Prediction;
use crate::error::{LoadError, SubmitError};
use crate::selection::{LoadedImage, SelectedImage};
use crate::verdict::Verdict;

pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A file is being read and decoded.
    Selecting { ticket: Ticket },
    /// A prediction request is outstanding.
    Submitting { ticket: Ticket },
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct Session {
    phase: Phase,
    image: Option<LoadedImage>,
    prediction: Option<Prediction>,
    modal_open: bool,
    dragging: bool,
    alert: Option<String>,
    last_selection_failed: bool,
    last_ticket: Ticket,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            image: None,
            prediction: None,
            modal_open: false,
            dragging: false,
            alert: None,
            last_selection_failed: false,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Last successful prediction; survives closing the modal.
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.prediction.as_ref().map(|p| Verdict::classify(&p.label))
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, Phase::Selecting { .. })
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.is_loading() && !self.is_selecting()
    }

    /// Whether the most recently applied read failed; the previous image,
    /// if any, is still the selected one.
    pub fn last_selection_failed(&self) -> bool {
        self.last_selection_failed
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Start acquiring a new image. Supersedes any in-flight read or request.
    pub fn begin_selection(&mut self) -> Ticket {
        if let Phase::Submitting { ticket } = self.phase {
            tracing::info!(ticket, "New selection supersedes outstanding request");
        }
        let ticket = self.issue_ticket();
        self.phase = Phase::Selecting { ticket };
        tracing::debug!(ticket, "Selection started");
        ticket
    }

    /// Apply a finished read. Returns `false` when the result was stale.
    /// On failure the previous image, if any, stays selected.
    pub fn finish_selection(
        &mut self,
        ticket: Ticket,
        result: Result<LoadedImage, LoadError>,
    ) -> bool {
        if self.phase != (Phase::Selecting { ticket }) {
            tracing::debug!(ticket, "Dropping stale image read");
            return false;
        }
        self.phase = Phase::Idle;
        self.last_selection_failed = result.is_err();
        match result {
            Ok(loaded) => {
                tracing::info!(
                    file = %loaded.image.file_name,
                    width = loaded.preview.width,
                    height = loaded.preview.height,
                    "Image selected"
                );
                self.image = Some(loaded);
            }
            Err(e) => {
                tracing::warn!("Image could not be loaded: {e}");
                self.alert = Some(e.alert_message());
            }
        }
        true
    }

    /// Remove the preview. Any read or request still running becomes stale.
    pub fn clear_image(&mut self) {
        self.image = None;
        if matches!(
            self.phase,
            Phase::Selecting { .. } | Phase::Submitting { .. }
        ) {
            self.phase = Phase::Idle;
        }
    }

    /// Enter the loading phase and hand out the image to send.
    pub fn begin_submit(&mut self) -> Result<(Ticket, SelectedImage), SubmitError> {
        if self.is_loading() || self.is_selecting() {
            return Err(SubmitError::Busy);
        }
        let Some(image) = self.image.as_ref().map(|l| l.image.clone()) else {
            self.alert = Some(SubmitError::NoImage.alert_message());
            return Err(SubmitError::NoImage);
        };
        let ticket = self.issue_ticket();
        self.phase = Phase::Submitting { ticket };
        Ok((ticket, image))
    }

    /// Apply a finished request. Returns `false` when the result was stale.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<Prediction, SubmitError>,
    ) -> bool {
        if self.phase != (Phase::Submitting { ticket }) {
            tracing::debug!(ticket, "Dropping stale prediction response");
            return false;
        }
        match result {
            Ok(prediction) => {
                tracing::info!(label = %prediction.label, "Prediction received");
                self.prediction = Some(prediction);
                self.modal_open = true;
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                tracing::warn!("Prediction failed: {e}");
                self.alert = Some(e.alert_message());
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// Abandon the outstanding request; its response will be ignored.
    pub fn cancel_submit(&mut self) {
        if let Phase::Submitting { ticket } = self.phase {
            tracing::info!(ticket, "Prediction request cancelled");
            self.phase = Phase::Idle;
        }
    }

    /// Hide the result. The prediction and preview are kept.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERIC_ALERT, NO_IMAGE_ALERT};
    use crate::selection::Preview;

    fn loaded(name: &str) -> LoadedImage {
        LoadedImage {
            image: SelectedImage::from_bytes(name, vec![1u8, 2, 3]),
            preview: Preview {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            },
        }
    }

    fn prediction(label: &str) -> Prediction {
        Prediction {
            label: label.to_string(),
            image_path: None,
        }
    }

    fn session_with_image() -> Session {
        let mut session = Session::new();
        let t = session.begin_selection();
        assert!(session.finish_selection(t, Ok(loaded("apple.jpg"))));
        session
    }

    #[test]
    fn submit_without_image_alerts_and_sends_nothing() {
        let mut session = Session::new();
        assert!(matches!(session.begin_submit(), Err(SubmitError::NoImage)));
        assert_eq!(session.take_alert().as_deref(), Some(NO_IMAGE_ALERT));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.can_submit());
    }

    #[test]
    fn fresh_prediction_opens_modal() {
        let mut session = session_with_image();
        let (ticket, image) = session.begin_submit().unwrap();
        assert_eq!(image.file_name, "apple.jpg");
        assert!(session.is_loading());
        assert!(!session.can_submit());

        assert!(session.finish_submit(ticket, Ok(prediction("Fresh Apple"))));
        assert!(session.modal_open());
        assert_eq!(session.phase(), Phase::Succeeded);
        assert_eq!(session.verdict(), Some(Verdict::Fresh));
        assert_eq!(session.prediction().unwrap().label, "Fresh Apple");
        assert!(session.can_submit());
    }

    #[test]
    fn server_error_alerts_and_keeps_modal_closed() {
        let mut session = session_with_image();
        let (ticket, _) = session.begin_submit().unwrap();
        let err = SubmitError::Server {
            status: 400,
            message: "invalid image".into(),
        };
        assert!(session.finish_submit(ticket, Err(err)));
        assert_eq!(session.take_alert().as_deref(), Some("Error: invalid image"));
        assert!(!session.modal_open());
        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.can_submit());
    }

    #[test]
    fn parse_failure_uses_generic_alert() {
        let mut session = session_with_image();
        let (ticket, _) = session.begin_submit().unwrap();
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        session.finish_submit(ticket, Err(SubmitError::Parse { status: 200, source }));
        assert_eq!(session.alert(), Some(GENERIC_ALERT));
    }

    #[test]
    fn second_submit_while_loading_is_busy() {
        let mut session = session_with_image();
        session.begin_submit().unwrap();
        assert!(matches!(session.begin_submit(), Err(SubmitError::Busy)));
        assert!(session.alert().is_none());
    }

    #[test]
    fn clearing_preview_disables_submit_until_new_file() {
        let mut session = session_with_image();
        assert!(session.can_submit());
        session.clear_image();
        assert!(!session.can_submit());

        let t = session.begin_selection();
        assert!(!session.can_submit());
        session.finish_selection(t, Ok(loaded("pear.png")));
        assert!(session.can_submit());
        assert!(!session.last_selection_failed());
    }

    #[test]
    fn only_latest_read_is_applied() {
        let mut session = Session::new();
        let first = session.begin_selection();
        let second = session.begin_selection();
        assert!(session.finish_selection(second, Ok(loaded("second.png"))));
        assert!(!session.finish_selection(first, Ok(loaded("first.png"))));
        assert_eq!(session.image().unwrap().image.file_name, "second.png");
    }

    #[test]
    fn clearing_invalidates_pending_read() {
        let mut session = Session::new();
        let t = session.begin_selection();
        session.clear_image();
        assert!(!session.finish_selection(t, Ok(loaded("late.png"))));
        assert!(session.image().is_none());
    }

    #[test]
    fn failed_read_keeps_previous_image() {
        let mut session = session_with_image();
        let t = session.begin_selection();
        let err = LoadError::Io {
            path: "gone.jpg".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        session.finish_selection(t, Err(err));
        assert!(session.alert().is_some());
        assert!(session.last_selection_failed());
        assert_eq!(session.image().unwrap().image.file_name, "apple.jpg");
        assert!(session.can_submit());
    }

    #[test]
    fn cancelled_request_result_is_ignored() {
        let mut session = session_with_image();
        let (ticket, _) = session.begin_submit().unwrap();
        session.cancel_submit();
        assert!(session.can_submit());
        assert!(!session.finish_submit(ticket, Ok(prediction("Fresh"))));
        assert!(!session.modal_open());
        assert!(session.prediction().is_none());
    }

    #[test]
    fn new_selection_supersedes_request() {
        let mut session = session_with_image();
        let (ticket, _) = session.begin_submit().unwrap();
        let read = session.begin_selection();
        assert!(!session.finish_submit(ticket, Ok(prediction("Fresh"))));
        assert!(session.finish_selection(read, Ok(loaded("next.jpg"))));
        assert!(session.can_submit());
    }

    #[test]
    fn closing_modal_keeps_result_and_preview() {
        let mut session = session_with_image();
        let (ticket, _) = session.begin_submit().unwrap();
        session.finish_submit(ticket, Ok(prediction("Rotten Banana")));
        session.close_modal();
        assert!(!session.modal_open());
        assert_eq!(session.verdict(), Some(Verdict::Spoiled));
        assert!(session.image().is_some());
    }

    #[test]
    fn prior_result_persists_until_overwritten() {
        let mut session = session_with_image();
        let (t1, _) = session.begin_submit().unwrap();
        session.finish_submit(t1, Ok(prediction("Fresh Apple")));
        session.close_modal();

        let (t2, _) = session.begin_submit().unwrap();
        assert_eq!(session.prediction().unwrap().label, "Fresh Apple");
        session.finish_submit(
            t2,
            Err(SubmitError::Server {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert_eq!(session.prediction().unwrap().label, "Fresh Apple");
        assert!(!session.modal_open());
    }
}
