//! The container record.

use serde::{Deserialize, Serialize};

use crate::{ContainerNumber, GridPoint, SimDate, TransportType};

/// One scheduled container.  Immutable once loaded; entities move it around
/// by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub number:         ContainerNumber,
    pub arrival_type:   TransportType,
    pub arrival_date:   SimDate,
    pub departure_type: TransportType,
    pub departure_date: SimDate,
    /// Slot the container occupies on its arrival transporter.
    pub spawn:          GridPoint,
}
