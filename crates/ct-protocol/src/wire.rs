//! Line encoding.
//!
//! One message per line, simple tag-delimited markup, no attributes and no
//! escaping (every value is a number, a date, or a fixed label):
//!
//! ```text
//! <id>7</id><Depart><transporterId>3</transporterId></Depart>
//! ```
//!
//! Acknowledgements use the same markup; the only field read back is the
//! single `<id>` tag.

use std::fmt::Write;

use ct_core::{Container, MessageId};

use crate::{Message, ProtocolError, ProtocolResult};

const ID_OPEN:  &str = "<id>";
const ID_CLOSE: &str = "</id>";

/// Encode `message` under correlation id `id`, without a line terminator.
pub fn encode(id: MessageId, message: &Message) -> String {
    let mut out = String::with_capacity(128);
    // Writing into a String cannot fail.
    let _ = write_message(&mut out, id, message);
    out
}

fn write_message(out: &mut String, id: MessageId, message: &Message) -> std::fmt::Result {
    write!(out, "{ID_OPEN}{id}{ID_CLOSE}")?;
    let tag = message.kind().tag();
    write!(out, "<{tag}>")?;

    match message {
        Message::Create { transporter, kind, containers } => {
            write!(
                out,
                "<Transporter><identifier>{transporter}</identifier><type>{}</type>",
                kind.wire_label()
            )?;
            for c in containers {
                write_container(out, c)?;
            }
            out.push_str("</Transporter>");
        }
        Message::Arrive { transporter, kind, depot } => {
            write!(
                out,
                "<transporterId>{transporter}</transporterId>\
                 <transporterType>{}</transporterType>\
                 <depotIndex>{depot}</depotIndex>",
                kind.wire_label()
            )?;
        }
        Message::Speed { speed, date } => {
            write!(out, "<speed>{speed}</speed><date>{date}</date>")?;
        }
        Message::Move { agv, from, route, crane } => {
            write!(
                out,
                "<agvId>{agv}</agvId><currentX>{}</currentX><currentY>{}</currentY>\
                 <route>{}</route><endLocationType>{}</endLocationType>\
                 <endLocationId>{}</endLocationId>",
                from.x,
                from.y,
                route.letters(),
                crane.kind.wire_label(),
                crane.id
            )?;
        }
        Message::Crane { crane, operation, transporter, agv, container, storage } => {
            write!(
                out,
                "<craneId>{}</craneId><craneType>{}</craneType><operation>{}</operation>",
                crane.id,
                crane.kind.wire_label(),
                operation.as_str()
            )?;
            if let Some(t) = transporter {
                write!(out, "<transporterId>{t}</transporterId>")?;
            }
            if let Some(a) = agv {
                write!(out, "<agvId>{a}</agvId>")?;
            }
            if let Some(c) = container {
                write_container(out, c)?;
            }
            if let Some(s) = storage {
                write!(out, "<storageId>{s}</storageId>")?;
            }
        }
        Message::Depart { transporter } => {
            write!(out, "<transporterId>{transporter}</transporterId>")?;
        }
    }

    write!(out, "</{tag}>")
}

fn write_container(out: &mut String, c: &Container) -> std::fmt::Result {
    write!(
        out,
        "<Container><number>{}</number><arrivalType>{}</arrivalType>\
         <departureType>{}</departureType><arrivalDate>{}</arrivalDate>\
         <departureDate>{}</departureDate><spawnX>{}</spawnX><spawnY>{}</spawnY>\
         <spawnZ>{}</spawnZ></Container>",
        c.number,
        c.arrival_type.wire_label(),
        c.departure_type.wire_label(),
        c.arrival_date,
        c.departure_date,
        c.spawn.x,
        c.spawn.y,
        c.spawn.z
    )
}

/// Extract the correlation id from an acknowledgement.
///
/// The payload must contain exactly one `<id>..</id>` element whose content
/// parses as an unsigned integer.
pub fn parse_ack(payload: &str) -> ProtocolResult<MessageId> {
    let malformed = |reason| ProtocolError::MalformedAcknowledgement { reason, payload: payload.to_owned() };

    let opens = payload.matches(ID_OPEN).count();
    match opens {
        0 => return Err(malformed("missing <id> tag")),
        1 => {}
        _ => return Err(malformed("more than one <id> tag")),
    }
    if payload.matches(ID_CLOSE).count() != 1 {
        return Err(malformed("unterminated <id> tag"));
    }

    let value = tag_value(payload, "id").ok_or_else(|| malformed("unterminated <id> tag"))?;
    value
        .trim()
        .parse::<u64>()
        .map(MessageId)
        .map_err(|_| malformed("id is not an integer"))
}

/// Content of the first `<tag>..</tag>` element in `line`.
pub fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = line.find(&open)? + open.len();
    let len = line[start..].find(&close)?;
    Some(&line[start..start + len])
}
