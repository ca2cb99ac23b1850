//! TCP transport: one client, one line per message.
//!
//! Three threads, none of which ever sees a parsed message:
//!
//! | Thread        | Job                                                     |
//! |---------------|---------------------------------------------------------|
//! | `ct-listen`   | accepts the first client, then starts the other two     |
//! | `ct-reader`   | splits the socket into lines, pushes them inbound       |
//! | `ct-writer`   | drains the outbound FIFO onto the socket, in order      |
//!
//! Lines queued before the client connects are held and sent once it does.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info, warn};

use crate::{Transport, TransportError, TransportResult};

const ACCEPT_POLL: Duration = Duration::from_millis(50);
const WRITER_POLL: Duration = Duration::from_millis(100);

#[derive(Default)]
struct Shared {
    connected: AtomicBool,
    stopping:  AtomicBool,
    stream:    Mutex<Option<TcpStream>>,
}

pub struct TcpTransport {
    local_addr:  SocketAddr,
    inbound_rx:  Receiver<String>,
    outbound_tx: Sender<String>,
    accepted_rx: Receiver<SocketAddr>,
    shared:      Arc<Shared>,
}

impl TcpTransport {
    /// Listen on `addr` and start accepting in the background.
    pub fn bind(addr: &str) -> TransportResult<Self> {
        let listener = TcpListener::bind(addr)
            .map_err(|source| TransportError::Bind { addr: addr.to_owned(), source })?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        let (inbound_tx, inbound_rx) = unbounded::<String>();
        let (outbound_tx, outbound_rx) = unbounded::<String>();
        let (accepted_tx, accepted_rx) = unbounded::<SocketAddr>();
        let shared = Arc::new(Shared::default());

        let listener_shared = Arc::clone(&shared);
        thread::Builder::new().name("ct-listen".into()).spawn(move || {
            accept_one(listener, listener_shared, inbound_tx, outbound_rx, accepted_tx)
        })?;

        info!(%local_addr, "waiting for client");
        Ok(Self { local_addr, inbound_rx, outbound_tx, accepted_rx, shared })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Block until a client connects or `timeout` passes.  Startup only.
    pub fn wait_for_client(&self, timeout: Duration) -> Option<SocketAddr> {
        self.accepted_rx.recv_timeout(timeout).ok()
    }
}

impl Transport for TcpTransport {
    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    fn enqueue_outbound(&self, line: String) -> TransportResult<()> {
        if self.shared.stopping.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.outbound_tx.send(line).map_err(|_| TransportError::Closed)
    }

    fn poll_inbound(&self) -> Option<String> {
        self.inbound_rx.try_recv().ok()
    }

    fn shutdown(&self) {
        if self.shared.stopping.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.connected.store(false, Ordering::SeqCst);
        if let Ok(mut guard) = self.shared.stream.lock() {
            if let Some(stream) = guard.take() {
                let _ = stream.shutdown(Shutdown::Both);
            }
        }
        info!(local_addr = %self.local_addr, "transport shut down");
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── Threads ───────────────────────────────────────────────────────────────────

fn accept_one(
    listener:    TcpListener,
    shared:      Arc<Shared>,
    inbound_tx:  Sender<String>,
    outbound_rx: Receiver<String>,
    accepted_tx: Sender<SocketAddr>,
) {
    while !shared.stopping.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => {
                info!(%peer, "client connected");
                if let Err(err) = start_session(stream, &shared, inbound_tx, outbound_rx) {
                    warn!(%peer, error = %err, "cannot start client session");
                    return;
                }
                let _ = accepted_tx.send(peer);
                return;
            }
            Err(ref err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL);
            }
            Err(err) => {
                warn!(error = %err, "accept failed");
                thread::sleep(ACCEPT_POLL * 4);
            }
        }
    }
}

fn start_session(
    stream:      TcpStream,
    shared:      &Arc<Shared>,
    inbound_tx:  Sender<String>,
    outbound_rx: Receiver<String>,
) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_nodelay(true)?;
    let reader_stream = stream.try_clone()?;
    let writer_stream = stream.try_clone()?;

    if let Ok(mut guard) = shared.stream.lock() {
        *guard = Some(stream);
    }
    shared.connected.store(true, Ordering::SeqCst);

    let reader_shared = Arc::clone(shared);
    thread::Builder::new()
        .name("ct-reader".into())
        .spawn(move || read_lines(reader_stream, reader_shared, inbound_tx))?;

    let writer_shared = Arc::clone(shared);
    thread::Builder::new()
        .name("ct-writer".into())
        .spawn(move || write_lines(writer_stream, writer_shared, outbound_rx))?;

    Ok(())
}

fn read_lines(stream: TcpStream, shared: Arc<Shared>, inbound_tx: Sender<String>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                info!("client disconnected");
                break;
            }
            Ok(_) => {
                // Invalid UTF-8 still reaches the parser, which rejects it.
                let line = String::from_utf8_lossy(&buf);
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                debug!(line = trimmed, "received");
                if inbound_tx.send(trimmed.to_owned()).is_err() {
                    break;
                }
            }
            Err(err) => {
                if !shared.stopping.load(Ordering::SeqCst) {
                    warn!(error = %err, "read failed");
                }
                break;
            }
        }
    }
    shared.connected.store(false, Ordering::SeqCst);
}

fn write_lines(mut stream: TcpStream, shared: Arc<Shared>, outbound_rx: Receiver<String>) {
    loop {
        match outbound_rx.recv_timeout(WRITER_POLL) {
            Ok(line) => {
                let result = stream
                    .write_all(line.as_bytes())
                    .and_then(|()| stream.write_all(b"\n"))
                    .and_then(|()| stream.flush());
                if let Err(err) = result {
                    if !shared.stopping.load(Ordering::SeqCst) {
                        warn!(error = %err, "write failed");
                    }
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if shared.stopping.load(Ordering::SeqCst) || !shared.connected.load(Ordering::SeqCst) {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    shared.connected.store(false, Ordering::SeqCst);
}
