//! Automated guided vehicles.

use ct_core::{AgvId, Container, ContainerNumber, CraneRef, MessageId, Position, TransportType, TransporterId};

/// Where an AGV is in its current job.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgvStage {
    Idle,
    /// Driving empty to the crane that will load it.
    ToPickup,
    /// CRANE in flight putting a container on the AGV.
    Loading,
    /// Loaded, but no destination crane was free yet.
    AwaitingCrane,
    /// Driving loaded to the destination crane.
    Hauling,
    /// CRANE in flight taking the container off.
    Unloading,
}

impl AgvStage {
    pub fn as_str(self) -> &'static str {
        match self {
            AgvStage::Idle          => "idle",
            AgvStage::ToPickup      => "to_pickup",
            AgvStage::Loading       => "loading",
            AgvStage::AwaitingCrane => "awaiting_crane",
            AgvStage::Hauling       => "hauling",
            AgvStage::Unloading     => "unloading",
        }
    }
}

/// Which half of the container's trip a job covers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Leg {
    /// Arrival transporter → storage.
    Inbound,
    /// Storage → departure transporter.
    Outbound,
}

/// One container move assigned to an AGV.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Job {
    pub container:   ContainerNumber,
    pub transporter: TransporterId,
    pub leg:         Leg,
    /// Crane that lifts the container onto the AGV.
    pub source:      CraneRef,
    /// Crane that takes it off; unknown until one is free.
    pub destination: Option<CraneRef>,
}

#[derive(Debug, Clone)]
pub struct Agv {
    pub id:                 AgvId,
    pub position:           Position,
    pub container:          Option<Container>,
    pub stage:              AgvStage,
    /// Transport type of the transporter it last worked for.
    pub last_served:        Option<TransportType>,
    pub processing_message: Option<MessageId>,
    pub job:                Option<Job>,
}

impl Agv {
    pub fn new(id: AgvId, position: Position) -> Self {
        Self {
            id,
            position,
            container: None,
            stage: AgvStage::Idle,
            last_served: None,
            processing_message: None,
            job: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stage == AgvStage::Idle && self.processing_message.is_none() && self.job.is_none()
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Start `job` for a transporter of type `served`.
    pub fn assign(&mut self, job: Job, served: TransportType) {
        self.job = Some(job);
        self.stage = AgvStage::ToPickup;
        self.last_served = Some(served);
    }

    /// Drop the job and any container reference, back to idle.  Returns the
    /// container it was carrying.
    pub fn release(&mut self) -> Option<Container> {
        self.job = None;
        self.stage = AgvStage::Idle;
        self.processing_message = None;
        self.container.take()
    }
}
