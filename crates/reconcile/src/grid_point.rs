//! Target locations for reconciliation.

use crate::location::Location;

/// A watershed segment the reconciler produces estimates for.
#[derive(Debug, Clone)]
pub struct GridPoint {
    id: String,
    location: Location,
}

impl GridPoint {
    /// Creates a grid point.
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }

    /// Segment identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Segment location.
    pub fn location(&self) -> &Location {
        &self.location
    }
}
