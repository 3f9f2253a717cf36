//! Error types for camera construction and rendering.

use thiserror::Error;

/// A single problem found while validating a camera or target area.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("location is missing")]
    MissingLocation,

    #[error("direction is missing")]
    MissingDirection,

    #[error("forward and up vectors must be non-zero")]
    ZeroDirection,

    #[error("forward and up vectors are not orthogonal (dot = {0})")]
    NotOrthogonal(f64),

    #[error("view plane size is missing")]
    MissingSize,

    #[error("view plane width must be positive, got {0}")]
    NonPositiveWidth(f64),

    #[error("view plane height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("view plane distance is missing")]
    MissingDistance,

    #[error("view plane distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("grid density must be positive")]
    ZeroDensity,

    #[error("anti-aliasing density must be positive")]
    ZeroAntiAliasing,

    #[error("progress interval must be between 0 and 100, got {0}")]
    ProgressInterval(f64),

    #[error("ray tracer is missing")]
    MissingRayTracer,

    #[error("pixel sink is missing")]
    MissingPixelSink,
}

/// Errors raised by the camera and target area builders.
///
/// Validation runs once, at `build()`, and reports every issue found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Invalid camera configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl CameraError {
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            CameraError::Invalid(issues) => issues,
        }
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image of {width}x{height} pixels cannot be encoded")]
    ImageSize { width: usize, height: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_lists_every_issue() {
        let err = CameraError::Invalid(vec![
            ConfigIssue::MissingLocation,
            ConfigIssue::NonPositiveWidth(-1.0),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid camera configuration: location is missing; view plane width must be positive, got -1"
        );
        assert_eq!(err.issues().len(), 2);
    }
}
