use tracing::debug;

use crate::audio::WavResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SlotKind {
    /// The user's main generation. The previous result stays playable until
    /// its replacement is ready.
    Main,
    /// Voice preview. Starting a new preview stops the current one at once.
    Preview,
}

/// Issued when a request starts; only the newest ticket may install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Installed { url: String },
    /// A newer request started first; the result was released unseen.
    Superseded,
}

/// Exclusive owner of at most one active [`WavResource`]. Replacing the
/// resource always releases the previous one.
#[derive(Debug)]
pub struct AudioSlot {
    kind: SlotKind,
    generation: u64,
    active: Option<WavResource>,
}

impl AudioSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            generation: 0,
            active: None,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Start a request, superseding any request still in flight.
    pub fn begin(&mut self) -> SlotTicket {
        self.generation += 1;
        if self.kind == SlotKind::Preview {
            self.release();
        }
        SlotTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: SlotTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn install(&mut self, ticket: SlotTicket, resource: WavResource) -> SlotOutcome {
        if !self.is_current(ticket) {
            debug!(slot = %self.kind, url = resource.url(), "Dropping superseded audio");
            resource.release();
            return SlotOutcome::Superseded;
        }

        let url = resource.url().to_string();
        if let Some(previous) = self.active.replace(resource) {
            debug!(slot = %self.kind, url = previous.url(), "Releasing replaced audio");
            previous.release();
        }
        SlotOutcome::Installed { url }
    }

    /// Release the active resource. Requests in flight may still install.
    pub fn release(&mut self) {
        if let Some(previous) = self.active.take() {
            previous.release();
        }
    }

    /// Release the active resource and discard any request in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.release();
    }

    pub fn active(&self) -> Option<&WavResource> {
        self.active.as_ref()
    }
}
