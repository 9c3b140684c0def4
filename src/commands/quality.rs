/// Quality validation commands
///
/// Async entry points for a UI shell. The pipeline itself is synchronous and
/// CPU-bound, so each call runs it on the blocking pool and the caller's
/// executor stays responsive while "Validating image..." is shown.
use crate::config::ValidationConfig;
use crate::quality::{QualityReport, QualityValidator};
use crate::source::{FrameSource, ImageFileSource};
use crate::types::Frame;
use std::path::PathBuf;
use std::time::Instant;

/// Validate a frame the caller already decoded
pub async fn validate_provided_frame(
    frame: Frame,
    config: Option<ValidationConfig>,
) -> Result<QualityReport, String> {
    let validator = validator_for(config)?;

    tokio::task::spawn_blocking(move || validator.validate_frame(&frame))
        .await
        .map_err(|e| format!("Validation task failed: {}", e))
}

/// Decode an image file, then validate it
pub async fn validate_image_file(
    path: PathBuf,
    config: Option<ValidationConfig>,
) -> Result<QualityReport, String> {
    log::info!("Validating image file {:?}", path);
    let validator = validator_for(config)?;

    tokio::task::spawn_blocking(move || {
        let frame = ImageFileSource::new(path)
            .next_frame()
            .map_err(|e| e.to_string())?;
        Ok(validator.validate_frame(&frame))
    })
    .await
    .map_err(|e| format!("Validation task failed: {}", e))?
}

/// Validate independent frames concurrently; reports keep input order
pub async fn validate_frames(
    frames: Vec<Frame>,
    config: Option<ValidationConfig>,
) -> Result<Vec<QualityReport>, String> {
    let validator = validator_for(config)?;
    let start = Instant::now();
    let count = frames.len();

    let handles: Vec<_> = frames
        .into_iter()
        .map(|frame| {
            let validator = validator.clone();
            tokio::task::spawn_blocking(move || validator.validate_frame(&frame))
        })
        .collect();

    let mut reports = Vec::with_capacity(count);
    for handle in handles {
        reports.push(
            handle
                .await
                .map_err(|e| format!("Validation task failed: {}", e))?,
        );
    }

    log::info!(
        "Validated {} frames in {}ms, {} accepted",
        count,
        start.elapsed().as_millis(),
        reports.iter().filter(|r| r.result.is_accepted()).count()
    );
    Ok(reports)
}

/// Get the default validation thresholds
pub async fn get_default_config() -> Result<ValidationConfig, String> {
    Ok(ValidationConfig::default())
}

/// Check a configuration without applying it
pub async fn check_config(config: ValidationConfig) -> Result<(), String> {
    config.validate()
}

fn validator_for(config: Option<ValidationConfig>) -> Result<QualityValidator, String> {
    let config = config.unwrap_or_default();
    config.validate()?;
    Ok(QualityValidator::new(config))
}
