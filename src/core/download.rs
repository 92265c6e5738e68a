// src/core/download.rs — Export of the generated flat-lay image

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use super::session::Session;
use super::types::GeneratedImage;
use crate::infra::errors::ChicLensError;

/// `chiclens-lookbook-{unix millis}.{ext}`
pub fn lookbook_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("chiclens-lookbook-{}.{}", now.timestamp_millis(), extension)
}

/// Write the session's generated image bytes to disk.
///
/// `target` names a directory when it already is one or ends with a path
/// separator; the image then gets a timestamped file name inside it.
/// Anything else is the file path itself.
pub async fn save_image(session: &Session, target: &Path) -> Result<PathBuf, ChicLensError> {
    let is_dir = names_directory(target)
        || tokio::fs::metadata(target)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
    if is_dir {
        save_into_dir(session, target).await
    } else {
        let image = session.recreated_image().ok_or(ChicLensError::NoImage)?;
        write_image(image, target.to_path_buf()).await
    }
}

/// Write the generated image into `dir` under a timestamped name, creating
/// `dir` first if needed.
pub async fn save_into_dir(session: &Session, dir: &Path) -> Result<PathBuf, ChicLensError> {
    let image = session.recreated_image().ok_or(ChicLensError::NoImage)?;
    let path = dir.join(lookbook_file_name(Utc::now(), image.extension()));
    write_image(image, path).await
}

fn names_directory(target: &Path) -> bool {
    target
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
}

async fn write_image(image: &GeneratedImage, path: PathBuf) -> Result<PathBuf, ChicLensError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &image.data).await?;

    tracing::info!(path = %path.display(), bytes = image.data.len(), "Saved lookbook image");
    Ok(path)
}
