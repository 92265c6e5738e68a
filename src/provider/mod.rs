// src/provider/mod.rs — Remote model clients

pub mod google;

use async_trait::async_trait;

use crate::core::types::{GeneratedImage, OutfitAnalysis, SourceImage};
use crate::infra::errors::ChicLensError;

/// Vision-language analysis of an outfit photo.
///
/// Every failure, whatever its cause, is reported as
/// [`ChicLensError::AnalysisFailed`]; a partial analysis is never returned.
#[async_trait]
pub trait OutfitAnalyzer: Send + Sync {
    async fn analyze(&self, image: &SourceImage) -> Result<OutfitAnalysis, ChicLensError>;
}

/// Flat-lay image generation from a recreation prompt.
///
/// Implementations apply the flat-lay template themselves; callers pass the
/// bare recreation prompt. Failures are [`ChicLensError::SynthesisFailed`].
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    async fn synthesize(&self, prompt: &str) -> Result<GeneratedImage, ChicLensError>;
}
