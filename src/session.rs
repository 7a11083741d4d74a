//! Caller-side selection state.
//!
//! The conversion core is stateless; this is the state a front end keeps
//! around it: which image is selected, whether its preview is being converted,
//! and the preview once it arrives.
//!
//! # Stale results
//!
//! Conversions are not aborted when the user removes or replaces the image.
//! Instead every selection gets a fresh [`SelectionId`], pending work carries
//! the id it started under, and results whose id no longer matches the
//! current selection are dropped on arrival.
//!
//! ```text
//! select ──▶ begin_preview ──▶ (convert) ──▶ finish_preview
//!   │                                          │
//!   └── remove / select again ──▶ id changes ──┴──▶ Discarded
//! ```

use crate::convert::ConvertError;
use crate::types::{EncodedResult, SourceImage};
use std::sync::Arc;

/// Identity of one selection. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionId(u64);

#[derive(Debug)]
enum PreviewState {
    Idle,
    InFlight,
    Ready(Arc<EncodedResult>),
}

#[derive(Debug)]
struct Selection {
    id: SelectionId,
    source: Arc<SourceImage>,
    preview: PreviewState,
}

/// Permission to run one preview conversion.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    id: SelectionId,
    source: Arc<SourceImage>,
}

impl PreviewTicket {
    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn source(&self) -> Arc<SourceImage> {
        Arc::clone(&self.source)
    }
}

/// What happened to a finished preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    Attached,
    Failed,
    Discarded,
}

#[derive(Debug)]
pub struct Session {
    next_id: u64,
    current: Option<Selection>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            current: None,
        }
    }

    /// Make `source` the current image. Any previous preview is dropped.
    pub fn select(&mut self, source: SourceImage) -> SelectionId {
        let id = SelectionId(self.next_id);
        self.next_id += 1;
        tracing::debug!(?id, file = source.name(), "selected");
        self.current = Some(Selection {
            id,
            source: Arc::new(source),
            preview: PreviewState::Idle,
        });
        id
    }

    /// Clear the selection. In-flight results for it will be discarded.
    pub fn remove(&mut self) {
        if let Some(selection) = self.current.take() {
            tracing::debug!(id = ?selection.id, "removed");
        }
    }

    pub fn current_id(&self) -> Option<SelectionId> {
        self.current.as_ref().map(|s| s.id)
    }

    pub fn source(&self) -> Option<Arc<SourceImage>> {
        self.current.as_ref().map(|s| Arc::clone(&s.source))
    }

    /// Start the preview conversion.
    ///
    /// `None` when nothing is selected, a preview is already converting, or
    /// the preview already exists.
    pub fn begin_preview(&mut self) -> Option<PreviewTicket> {
        let selection = self.current.as_mut()?;
        if !matches!(selection.preview, PreviewState::Idle) {
            return None;
        }
        selection.preview = PreviewState::InFlight;
        Some(PreviewTicket {
            id: selection.id,
            source: Arc::clone(&selection.source),
        })
    }

    /// Deliver a preview result.
    ///
    /// A result for a selection that is no longer current is dropped. A
    /// failure puts the selection back where it was before the conversion.
    pub fn finish_preview(
        &mut self,
        ticket: PreviewTicket,
        result: Result<EncodedResult, ConvertError>,
    ) -> PreviewOutcome {
        let Some(selection) = self.current.as_mut().filter(|s| s.id == ticket.id) else {
            tracing::debug!(id = ?ticket.id, "discarding preview for stale selection");
            return PreviewOutcome::Discarded;
        };

        match result {
            Ok(encoded) => {
                selection.preview = PreviewState::Ready(Arc::new(encoded));
                PreviewOutcome::Attached
            }
            Err(e) => {
                tracing::warn!(file = selection.source.name(), "preview conversion failed: {e}");
                selection.preview = PreviewState::Idle;
                PreviewOutcome::Failed
            }
        }
    }

    pub fn preview(&self) -> Option<Arc<EncodedResult>> {
        match &self.current.as_ref()?.preview {
            PreviewState::Ready(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    pub fn is_converting(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| matches!(s.preview, PreviewState::InFlight))
    }

    /// Sized downloads are offered once the preview exists.
    pub fn can_download(&self) -> bool {
        self.preview().is_some()
    }

    /// Filter a sized-download result through the current selection.
    ///
    /// Returns the result only if `id` is still the current selection.
    pub fn accept_download(
        &self,
        id: SelectionId,
        result: EncodedResult,
    ) -> Option<EncodedResult> {
        if self.current_id() == Some(id) {
            Some(result)
        } else {
            tracing::debug!(?id, size = %result.target, "discarding download for stale selection");
            None
        }
    }
}
