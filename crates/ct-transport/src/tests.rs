//! Unit tests for ct-transport.

// ── Loopback ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loopback {
    use crate::{LoopbackTransport, Transport, TransportError};

    #[test]
    fn outbound_in_order() {
        let t = LoopbackTransport::new();
        for i in 0..5 {
            t.enqueue_outbound(format!("line {i}")).unwrap();
        }
        let lines = t.drain_outbound();
        assert_eq!(lines, (0..5).map(|i| format!("line {i}")).collect::<Vec<_>>());
        assert!(t.drain_outbound().is_empty());
    }

    #[test]
    fn clones_share_queues() {
        let controller_side = LoopbackTransport::new();
        let client_side = controller_side.clone();

        client_side.push_inbound("<id>1</id>");
        assert_eq!(controller_side.poll_inbound().as_deref(), Some("<id>1</id>"));
        assert!(controller_side.poll_inbound().is_none());

        controller_side.enqueue_outbound("hello".into()).unwrap();
        assert_eq!(client_side.drain_outbound(), vec!["hello".to_owned()]);
    }

    #[test]
    fn disconnect_closes_outbound() {
        let t = LoopbackTransport::new();
        assert!(t.is_connected());
        t.disconnect();
        assert!(!t.is_connected());
        assert!(matches!(t.enqueue_outbound("x".into()), Err(TransportError::Closed)));
    }
}

// ── TCP ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tcp {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpStream;
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::{TcpTransport, Transport, TransportError};

    fn poll_until<T>(timeout: Duration, mut f: impl FnMut() -> Option<T>) -> Option<T> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(v) = f() {
                return Some(v);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn round_trip_lines() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();

        // Queued before the client exists; must still arrive first.
        transport.enqueue_outbound("<id>1</id><Depart><transporterId>0</transporterId></Depart>".into()).unwrap();

        let client = TcpStream::connect(transport.local_addr()).unwrap();
        assert!(transport.wait_for_client(Duration::from_secs(5)).is_some());
        assert!(transport.is_connected());

        transport.enqueue_outbound("second".into()).unwrap();

        let mut reader = BufReader::new(client.try_clone().unwrap());
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert!(line.starts_with("<id>1</id><Depart>"));
        line.clear();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line.trim_end(), "second");

        let mut writer = client;
        writer.write_all(b"<id>1</id>\n\n<id>2</id>\n").unwrap();
        let first = poll_until(Duration::from_secs(5), || transport.poll_inbound());
        let second = poll_until(Duration::from_secs(5), || transport.poll_inbound());
        assert_eq!(first.as_deref(), Some("<id>1</id>"));
        assert_eq!(second.as_deref(), Some("<id>2</id>"));
    }

    #[test]
    fn invalid_utf8_line_keeps_session() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(transport.local_addr()).unwrap();
        assert!(transport.wait_for_client(Duration::from_secs(5)).is_some());

        client.write_all(b"<id>\xff\xfe</id>\n<id>1</id>\n").unwrap();
        let garbled = poll_until(Duration::from_secs(5), || transport.poll_inbound());
        let valid = poll_until(Duration::from_secs(5), || transport.poll_inbound());

        assert_eq!(garbled.as_deref(), Some("<id>\u{FFFD}\u{FFFD}</id>"));
        assert_eq!(valid.as_deref(), Some("<id>1</id>"));
        assert!(transport.is_connected());
    }

    #[test]
    fn client_hangup_disconnects() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        let client = TcpStream::connect(transport.local_addr()).unwrap();
        assert!(transport.wait_for_client(Duration::from_secs(5)).is_some());

        drop(client);
        let gone = poll_until(Duration::from_secs(5), || (!transport.is_connected()).then_some(()));
        assert!(gone.is_some());
    }

    #[test]
    fn no_client_times_out() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        assert!(transport.wait_for_client(Duration::from_millis(100)).is_none());
        assert!(!transport.is_connected());
    }

    #[test]
    fn shutdown_rejects_outbound() {
        let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
        transport.shutdown();
        transport.shutdown();
        assert!(matches!(transport.enqueue_outbound("x".into()), Err(TransportError::Closed)));
    }

    #[test]
    fn bind_error_names_address() {
        let first = TcpTransport::bind("127.0.0.1:0").unwrap();
        let addr = first.local_addr().to_string();
        match TcpTransport::bind(&addr) {
            Err(TransportError::Bind { addr: reported, .. }) => assert_eq!(reported, addr),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("second bind on {addr} should fail"),
        }
    }
}
