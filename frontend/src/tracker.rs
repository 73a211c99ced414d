/// Ties prediction requests to the image they were made for.
///
/// Every selected or cleared image bumps a sequence number. A request is
/// tagged with the number current when it started, so a response that comes
/// back after the image changed can be recognised and dropped.
#[derive(Debug, Default)]
pub struct PredictionTracker {
    image_seq: u64,
    in_flight: Option<u64>,
    queued: bool,
}

/// What to do once a request has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The response belongs to the image on screen.
    pub apply: bool,
    /// A predict was asked for while this request ran; start it now.
    pub run_queued: bool,
}

impl PredictionTracker {
    pub fn image_changed(&mut self) {
        self.image_seq += 1;
        self.queued = false;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a request for the current image and returns its tag. Returns
    /// `None` while another request is running; if that one was for an
    /// earlier image, the predict is queued instead of dropped.
    pub fn begin(&mut self) -> Option<u64> {
        match self.in_flight {
            Some(tag) => {
                if tag != self.image_seq {
                    self.queued = true;
                }
                None
            }
            None => {
                self.in_flight = Some(self.image_seq);
                self.queued = false;
                Some(self.image_seq)
            }
        }
    }

    pub fn finish(&mut self, tag: u64) -> Completion {
        if self.in_flight != Some(tag) {
            return Completion {
                apply: false,
                run_queued: false,
            };
        }
        self.in_flight = None;
        Completion {
            apply: tag == self.image_seq,
            run_queued: std::mem::take(&mut self.queued),
        }
    }
}
