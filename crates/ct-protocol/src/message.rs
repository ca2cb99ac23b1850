//! Outbound message variants.
//!
//! Each variant carries everything the client needs to render the change,
//! plus enough context for the acknowledgement handler to resume the
//! pipeline without any side lists.

use ct_core::{AgvId, Container, CraneId, CraneRef, Position, SimDate, TransportType, TransporterId};
use ct_routing::Route;

/// Kind of a crane hand-over.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CraneOperation {
    TransporterToAgv,
    AgvToStorage,
    StorageToAgv,
    AgvToTransporter,
}

impl CraneOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            CraneOperation::TransporterToAgv => "TransporterToAgv",
            CraneOperation::AgvToStorage     => "AgvToStorage",
            CraneOperation::StorageToAgv     => "StorageToAgv",
            CraneOperation::AgvToTransporter => "AgvToTransporter",
        }
    }

    /// `true` if the container enters or leaves the yard.
    pub fn touches_storage(self) -> bool {
        matches!(self, CraneOperation::AgvToStorage | CraneOperation::StorageToAgv)
    }
}

/// The entity whose in-flight message id is cleared on acknowledgement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Processor {
    Transporter(TransporterId),
    Crane(CraneRef),
    Agv(AgvId),
    /// Controller-wide messages (SPEED).
    Controller,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MessageKind {
    Create,
    Arrive,
    Speed,
    Move,
    Crane,
    Depart,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Create,
        MessageKind::Arrive,
        MessageKind::Speed,
        MessageKind::Move,
        MessageKind::Crane,
        MessageKind::Depart,
    ];

    /// Element name on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            MessageKind::Create => "Create",
            MessageKind::Arrive => "Arrive",
            MessageKind::Speed  => "Speed",
            MessageKind::Move   => "Move",
            MessageKind::Crane  => "Crane",
            MessageKind::Depart => "Depart",
        }
    }

    /// Recognise the variant of an encoded line.
    pub fn detect(line: &str) -> Option<MessageKind> {
        Self::ALL.into_iter().find(|k| line.contains(&format!("<{}>", k.tag())))
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tag().to_ascii_uppercase())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Create {
        transporter: TransporterId,
        kind:        TransportType,
        containers:  Vec<Container>,
    },
    Arrive {
        transporter: TransporterId,
        kind:        TransportType,
        depot:       usize,
    },
    Speed {
        speed: f32,
        date:  SimDate,
    },
    Move {
        agv:   AgvId,
        from:  Position,
        route: Route,
        crane: CraneRef,
    },
    Crane {
        crane:       CraneRef,
        operation:   CraneOperation,
        transporter: Option<TransporterId>,
        agv:         Option<AgvId>,
        container:   Option<Container>,
        storage:     Option<CraneId>,
    },
    Depart {
        transporter: TransporterId,
    },
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Create { .. } => MessageKind::Create,
            Message::Arrive { .. } => MessageKind::Arrive,
            Message::Speed { .. }  => MessageKind::Speed,
            Message::Move { .. }   => MessageKind::Move,
            Message::Crane { .. }  => MessageKind::Crane,
            Message::Depart { .. } => MessageKind::Depart,
        }
    }

    pub fn processor(&self) -> Processor {
        match self {
            Message::Create { transporter, .. }
            | Message::Arrive { transporter, .. }
            | Message::Depart { transporter } => Processor::Transporter(*transporter),
            Message::Speed { .. }             => Processor::Controller,
            Message::Move { agv, .. }         => Processor::Agv(*agv),
            Message::Crane { crane, .. }      => Processor::Crane(*crane),
        }
    }
}
