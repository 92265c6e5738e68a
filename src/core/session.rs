// src/core/session.rs — Session record and its state machine
//
//   Idle ──upload──▶ Analyzing ──ok──▶ GeneratingImage ──ok──▶ Result
//                        │                    │
//                        └──fail──▶ Error ◀───┘
//
// Upload is also accepted from Result and Error (it starts a fresh cycle).
// Reset returns to Idle from anywhere. Fields are private so only these
// transitions can change them.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::types::{GeneratedImage, OutfitAnalysis, SourceImage};
use crate::infra::errors::ChicLensError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Idle,
    Analyzing,
    GeneratingImage,
    Result,
    Error,
}

impl SessionState {
    /// States from which a new upload may start.
    pub fn accepts_upload(self) -> bool {
        matches!(
            self,
            SessionState::Idle | SessionState::Result | SessionState::Error
        )
    }

    /// A remote call is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, SessionState::Analyzing | SessionState::GeneratingImage)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Analyzing => "ANALYZING",
            SessionState::GeneratingImage => "GENERATING_IMAGE",
            SessionState::Result => "RESULT",
            SessionState::Error => "ERROR",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    cycle_id: Option<Uuid>,
    state: SessionState,
    source_image: Option<SourceImage>,
    analysis: Option<OutfitAnalysis>,
    recreated_image: Option<GeneratedImage>,
    error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            cycle_id: None,
            state: SessionState::Idle,
            source_image: None,
            analysis: None,
            recreated_image: None,
            error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Identifier of the current upload cycle, for log correlation.
    pub fn cycle_id(&self) -> Option<Uuid> {
        self.cycle_id
    }

    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source_image.as_ref()
    }

    /// Set once analysis succeeded; stays visible if synthesis later fails.
    pub fn analysis(&self) -> Option<&OutfitAnalysis> {
        self.analysis.as_ref()
    }

    pub fn recreated_image(&self) -> Option<&GeneratedImage> {
        self.recreated_image.as_ref()
    }

    /// User-facing message, only present in `Error`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The completed analysis and image. Only readable in `Result`.
    pub fn result(&self) -> Option<(&OutfitAnalysis, &GeneratedImage)> {
        if self.state != SessionState::Result {
            return None;
        }
        self.analysis.as_ref().zip(self.recreated_image.as_ref())
    }

    fn ensure(
        &self,
        allowed: impl Fn(SessionState) -> bool,
        event: &'static str,
    ) -> Result<(), ChicLensError> {
        if allowed(self.state) {
            Ok(())
        } else {
            Err(ChicLensError::InvalidTransition {
                from: self.state,
                event,
            })
        }
    }

    /// Idle | Result | Error → Analyzing. Discards everything from the previous cycle.
    pub(crate) fn begin_analysis(&mut self, image: SourceImage) -> Result<(), ChicLensError> {
        self.ensure(SessionState::accepts_upload, "upload")?;
        *self = Self {
            cycle_id: Some(Uuid::new_v4()),
            state: SessionState::Analyzing,
            source_image: Some(image),
            analysis: None,
            recreated_image: None,
            error: None,
        };
        Ok(())
    }

    /// Analyzing → GeneratingImage.
    pub(crate) fn complete_analysis(
        &mut self,
        analysis: OutfitAnalysis,
    ) -> Result<(), ChicLensError> {
        self.ensure(|s| s == SessionState::Analyzing, "store analysis")?;
        self.analysis = Some(analysis);
        self.state = SessionState::GeneratingImage;
        Ok(())
    }

    /// GeneratingImage → Result.
    pub(crate) fn complete_synthesis(
        &mut self,
        image: GeneratedImage,
    ) -> Result<(), ChicLensError> {
        self.ensure(|s| s == SessionState::GeneratingImage, "store image")?;
        self.recreated_image = Some(image);
        self.state = SessionState::Result;
        Ok(())
    }

    /// Analyzing | GeneratingImage → Error. Keeps what was already stored.
    pub(crate) fn fail(&mut self, message: impl Into<String>) -> Result<(), ChicLensError> {
        self.ensure(SessionState::is_busy, "record failure")?;
        self.error = Some(message.into());
        self.state = SessionState::Error;
        Ok(())
    }

    /// Any → Idle.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}
