//! Construction errors for surfaces.

use lumen_math::MathError;
use thiserror::Error;

/// Errors that can occur while constructing a surface.
///
/// Every constructor validates its input eagerly; a surface that exists is
/// always well formed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("A polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("Vertex {index} coincides with the previous vertex")]
    CoincidentVertices { index: usize },

    #[error("Vertex {index} is collinear with the two vertices before it")]
    CollinearVertices { index: usize },

    #[error("Vertex {index} does not lie in the polygon's plane")]
    NonCoplanarVertices { index: usize },

    #[error("Polygon is not convex or its vertices are out of order at vertex {index}")]
    NonConvex { index: usize },

    #[error("Radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Height must be positive, got {0}")]
    NonPositiveHeight(f64),
}
