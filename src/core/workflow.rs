// src/core/workflow.rs — Drives one upload cycle through the two remote calls
//
// Analysis and synthesis run strictly in sequence; synthesis consumes the
// analysis' recreation prompt. Remote failures end the cycle in `Error` and
// are not returned as `Err`: only a rejected transition is.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::download;
use super::session::{Session, SessionState};
use super::types::SourceImage;
use crate::infra::errors::ChicLensError;
use crate::provider::{ImageSynthesizer, OutfitAnalyzer};

/// Message shown for any failed cycle. Causes are logged, not displayed.
pub const FAILURE_MESSAGE: &str =
    "We couldn't analyze this image. Make sure the garments are clearly visible and try again.";

type Observer = Box<dyn Fn(&Session) + Send + Sync>;

pub struct Workflow {
    analyzer: Arc<dyn OutfitAnalyzer>,
    synthesizer: Arc<dyn ImageSynthesizer>,
    observer: Option<Observer>,
}

impl Workflow {
    pub fn new(analyzer: Arc<dyn OutfitAnalyzer>, synthesizer: Arc<dyn ImageSynthesizer>) -> Self {
        Self {
            analyzer,
            synthesizer,
            observer: None,
        }
    }

    /// Call `observer` with the session after every transition.
    pub fn with_observer(mut self, observer: impl Fn(&Session) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn notify(&self, session: &Session) {
        if let Some(ref observer) = self.observer {
            observer(session);
        }
    }

    /// Start a cycle for `image` and run it to `Result` or `Error`.
    ///
    /// Fails only when the session is mid-cycle; the session is then untouched.
    pub async fn upload(
        &self,
        session: &mut Session,
        image: SourceImage,
    ) -> Result<SessionState, ChicLensError> {
        session.begin_analysis(image.clone())?;
        let cycle = session.cycle_id().map(|id| id.to_string()).unwrap_or_default();
        tracing::info!(
            cycle = %cycle,
            mime_type = image.mime_type(),
            bytes = image.bytes().len(),
            "Analyzing outfit"
        );
        self.notify(session);

        let analysis = match self.analyzer.analyze(&image).await {
            Ok(analysis) => analysis,
            Err(e) => return self.fail(session, &cycle, e),
        };
        let prompt = analysis.recreation_prompt.clone();
        session.complete_analysis(analysis)?;
        tracing::info!(cycle = %cycle, "Analysis complete, generating flat-lay image");
        self.notify(session);

        let generated = match self.synthesizer.synthesize(&prompt).await {
            Ok(generated) => generated,
            Err(e) => return self.fail(session, &cycle, e),
        };
        session.complete_synthesis(generated)?;
        tracing::info!(cycle = %cycle, "Flat-lay image ready");
        self.notify(session);

        Ok(session.state())
    }

    fn fail(
        &self,
        session: &mut Session,
        cycle: &str,
        error: ChicLensError,
    ) -> Result<SessionState, ChicLensError> {
        tracing::warn!(cycle = %cycle, stage = %session.state(), "Cycle failed: {}", error);
        session.fail(FAILURE_MESSAGE)?;
        self.notify(session);
        Ok(session.state())
    }

    /// Discard the session and return to `Idle`.
    pub fn reset(&self, session: &mut Session) {
        session.reset();
        tracing::debug!("Session reset");
        self.notify(session);
    }

    /// Write the generated image to `target` (a file, or a directory to place a
    /// timestamped file in). Does not change the session.
    pub async fn download(
        &self,
        session: &Session,
        target: &Path,
    ) -> Result<PathBuf, ChicLensError> {
        download::save_image(session, target).await
    }

    /// Write the generated image into `dir` under a timestamped name,
    /// creating the directory if it does not exist yet.
    pub async fn download_into(
        &self,
        session: &Session,
        dir: &Path,
    ) -> Result<PathBuf, ChicLensError> {
        download::save_into_dir(session, dir).await
    }
}
