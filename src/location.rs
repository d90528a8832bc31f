//! Device location, consumed once at startup to place the camera.

use crate::{core::geo::Coordinate, MapError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Why a granted location request still produced no fix
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("no location fix available")]
    NoFix,
    #[error("location service error: {0}")]
    Service(String),
}

/// Terminal outcome of a failed startup location attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    PermissionDenied,
    LocationUnavailable,
}

impl LocationFailure {
    pub fn of(error: &MapError) -> Option<Self> {
        match error {
            MapError::PermissionDenied => Some(Self::PermissionDenied),
            MapError::LocationUnavailable(_) => Some(Self::LocationUnavailable),
            _ => None,
        }
    }
}

/// The platform location service. Each method is called at most once per
/// initialization attempt; nothing is retried.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

/// Provider with a fixed answer, for hosts without a location service and
/// for tests
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    permission: PermissionStatus,
    result: Result<Coordinate, LocationError>,
}

impl StaticLocationProvider {
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            result: Ok(coordinate),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            result: Err(LocationError::Service("permission denied".to_string())),
        }
    }

    pub fn failing(error: LocationError) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            result: Err(error),
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        self.result.clone()
    }
}
