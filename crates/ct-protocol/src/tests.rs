//! Unit tests for ct-protocol.

use ct_core::{
    AgvId, Container, ContainerNumber, CraneId, CraneKind, CraneRef, GridPoint, MessageId, Position,
    SimDate, TransportType, TransporterId,
};

fn container() -> Container {
    Container {
        number:         ContainerNumber(42),
        arrival_type:   TransportType::Sea,
        arrival_date:   SimDate::from_ymd_hms(2004, 12, 1, 0, 10, 0).unwrap(),
        departure_type: TransportType::Rail,
        departure_date: SimDate::from_ymd_hms(2004, 12, 3, 8, 0, 0).unwrap(),
        spawn:          GridPoint::new(1, 2, 3),
    }
}

// ── Pool ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool {
    use super::*;
    use crate::{Message, MessagePool, ProtocolError, Processor};

    fn depart(n: u32) -> Message {
        Message::Depart { transporter: TransporterId(n) }
    }

    #[test]
    fn ids_strictly_increase() {
        let mut pool = MessagePool::new();
        let (a, _) = pool.send(depart(0));
        let (b, _) = pool.send(depart(1));
        let (c, _) = pool.send(depart(2));
        assert!(a < b && b < c);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn acknowledge_at_most_once() {
        let mut pool = MessagePool::new();
        let (id, _) = pool.send(depart(3));
        assert_eq!(pool.acknowledge(id), Ok(depart(3)));
        assert_eq!(pool.acknowledge(id), Err(ProtocolError::UnknownMessageId(id)));
        assert!(pool.is_empty());
    }

    #[test]
    fn unknown_id_leaves_others_alone() {
        let mut pool = MessagePool::new();
        let (id, _) = pool.send(depart(0));
        assert!(pool.acknowledge(MessageId(999)).is_err());
        assert!(pool.contains(id));
    }

    #[test]
    fn ids_not_reused_after_ack() {
        let mut pool = MessagePool::new();
        let (a, _) = pool.send(depart(0));
        pool.acknowledge(a).unwrap();
        let (b, _) = pool.send(depart(0));
        assert_ne!(a, b);
    }

    #[test]
    fn processor_of_each_variant() {
        let crane = CraneRef::new(CraneKind::TruckCrane, CraneId(1));
        assert_eq!(depart(5).processor(), Processor::Transporter(TransporterId(5)));
        assert_eq!(
            Message::Speed { speed: 1.0, date: SimDate::default() }.processor(),
            Processor::Controller
        );
        let crane_msg = Message::Crane {
            crane,
            operation:   crate::CraneOperation::TransporterToAgv,
            transporter: None,
            agv:         None,
            container:   None,
            storage:     None,
        };
        assert_eq!(crane_msg.processor(), Processor::Crane(crane));
    }
}

// ── Wire encoding ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use super::*;
    use ct_routing::Route;

    use crate::{encode, tag_value, CraneOperation, Message, MessageKind};

    #[test]
    fn depart_line() {
        let line = encode(MessageId(7), &Message::Depart { transporter: TransporterId(3) });
        assert_eq!(line, "<id>7</id><Depart><transporterId>3</transporterId></Depart>");
    }

    #[test]
    fn arrive_line() {
        let line = encode(
            MessageId(2),
            &Message::Arrive { transporter: TransporterId(0), kind: TransportType::Road, depot: 4 },
        );
        assert_eq!(
            line,
            "<id>2</id><Arrive><transporterId>0</transporterId>\
             <transporterType>vrachtauto</transporterType><depotIndex>4</depotIndex></Arrive>"
        );
    }

    #[test]
    fn create_carries_container_blocks() {
        let line = encode(
            MessageId(1),
            &Message::Create {
                transporter: TransporterId(9),
                kind:        TransportType::Sea,
                containers:  vec![container()],
            },
        );
        assert!(line.starts_with("<id>1</id><Create><Transporter><identifier>9</identifier><type>zeeschip</type>"));
        assert!(line.contains("<Container><number>42</number><arrivalType>zeeschip</arrivalType>"));
        assert!(line.contains("<departureDate>2004-12-03 08:00:00</departureDate>"));
        assert!(line.contains("<spawnX>1</spawnX><spawnY>2</spawnY><spawnZ>3</spawnZ>"));
        assert!(line.ends_with("</Transporter></Create>"));
    }

    #[test]
    fn speed_line() {
        let line = encode(
            MessageId(1),
            &Message::Speed { speed: 2.5, date: SimDate::from_ymd_hms(2004, 12, 1, 0, 0, 0).unwrap() },
        );
        assert_eq!(line, "<id>1</id><Speed><speed>2.5</speed><date>2004-12-01 00:00:00</date></Speed>");
    }

    #[test]
    fn move_line() {
        let line = encode(
            MessageId(11),
            &Message::Move {
                agv:   AgvId(4),
                from:  Position::new(0.0, 300.0),
                route: Route::from_letters("A,C,E").unwrap(),
                crane: CraneRef::new(CraneKind::StorageCrane, CraneId(2)),
            },
        );
        assert_eq!(tag_value(&line, "route"), Some("A,C,E"));
        assert_eq!(tag_value(&line, "agvId"), Some("4"));
        assert_eq!(tag_value(&line, "currentY"), Some("300"));
        assert_eq!(tag_value(&line, "endLocationType"), Some("StorageCrane"));
        assert_eq!(tag_value(&line, "endLocationId"), Some("2"));
    }

    #[test]
    fn crane_optional_fields() {
        let bare = encode(
            MessageId(3),
            &Message::Crane {
                crane:       CraneRef::new(CraneKind::DockingCraneSea, CraneId(0)),
                operation:   CraneOperation::TransporterToAgv,
                transporter: None,
                agv:         None,
                container:   None,
                storage:     None,
            },
        );
        assert_eq!(
            bare,
            "<id>3</id><Crane><craneId>0</craneId><craneType>DockingCrane</craneType>\
             <operation>TransporterToAgv</operation></Crane>"
        );

        let full = encode(
            MessageId(4),
            &Message::Crane {
                crane:       CraneRef::new(CraneKind::StorageCrane, CraneId(1)),
                operation:   CraneOperation::AgvToStorage,
                transporter: Some(TransporterId(8)),
                agv:         Some(AgvId(2)),
                container:   Some(container()),
                storage:     Some(CraneId(1)),
            },
        );
        assert_eq!(tag_value(&full, "transporterId"), Some("8"));
        assert_eq!(tag_value(&full, "storageId"), Some("1"));
        assert!(full.contains("<Container>"));
    }

    #[test]
    fn detect_kind() {
        let line = encode(MessageId(7), &Message::Depart { transporter: TransporterId(3) });
        assert_eq!(MessageKind::detect(&line), Some(MessageKind::Depart));
        assert_eq!(MessageKind::detect("<id>1</id>"), None);
    }
}

// ── Acknowledgement parsing ───────────────────────────────────────────────────

#[cfg(test)]
mod ack {
    use super::*;
    use crate::{parse_ack, ProtocolError};

    #[test]
    fn plain_id() {
        assert_eq!(parse_ack("<id>17</id>"), Ok(MessageId(17)));
    }

    #[test]
    fn id_inside_echoed_payload() {
        assert_eq!(parse_ack("<id>3</id><Depart><transporterId>1</transporterId></Depart>"), Ok(MessageId(3)));
        assert_eq!(parse_ack("  <id> 5 </id>\r"), Ok(MessageId(5)));
    }

    #[test]
    fn malformed_payloads() {
        for bad in ["", "hello", "<id></id>", "<id>x</id>", "<id>-1</id>", "<id>1</id><id>2</id>", "<id>4"] {
            assert!(
                matches!(parse_ack(bad), Err(ProtocolError::MalformedAcknowledgement { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
