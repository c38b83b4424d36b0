//! Sockets that notice a cancelled context.
//!
//! # Design
//! ureq performs the whole exchange on the calling thread. While
//! [`Transport::execute`](crate::Transport::execute) runs for an agent, the
//! context's cancel flag is installed in a thread local. The connector in
//! this module dials TCP itself and blocks on the socket in slices of at
//! most [`POLL`], checking the flag between slices, so a cancel from another
//! thread ends a stalled read or write within one slice. The whole wait is
//! still bounded by ureq's own timeout for the step.
//!
//! DNS resolution and the TCP handshake are not sliced. They are bounded by
//! the deadline, and the flag is checked as soon as each returns.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::trace;
use ureq::config::Config;
use ureq::unversioned::resolver::DefaultResolver;
use ureq::unversioned::transport::{
    Buffers, ConnectProxyConnector, ConnectionDetails, Connector, Either, LazyBuffers, NextTimeout,
    RustlsConnector, Transport,
};
use ureq::{Agent, Timeout};

/// Longest a socket call blocks before the cancel flag is checked again.
pub const POLL: Duration = Duration::from_millis(50);

/// An agent whose exchanges stop when the calling context is cancelled.
/// Plain HTTP, CONNECT proxies and rustls TLS are supported.
pub fn cancellable_agent(config: Config) -> Agent {
    let connector = ()
        .chain(ConnectProxyConnector::default())
        .chain(SocketConnector)
        .chain(RustlsConnector::default());
    Agent::with_parts(config, connector, DefaultResolver::default())
}

thread_local! {
    static ACTIVE: RefCell<Option<Arc<AtomicBool>>> = const { RefCell::new(None) };
}

/// Installs a cancel flag on the current thread for one exchange.
pub(crate) struct Exchange {
    previous: Option<Arc<AtomicBool>>,
}

impl Exchange {
    pub(crate) fn enter(flag: Arc<AtomicBool>) -> Exchange {
        let previous = ACTIVE.with(|active| active.replace(Some(flag)));
        Exchange { previous }
    }
}

impl Drop for Exchange {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|active| active.replace(previous));
    }
}

fn cancel_requested() -> bool {
    ACTIVE.with(|active| {
        active
            .borrow()
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Acquire))
    })
}

fn cancelled() -> ureq::Error {
    io::Error::new(io::ErrorKind::Interrupted, "request cancelled").into()
}

/// The time budget of one blocking step, handed out in slices.
struct Wait {
    until: Option<Instant>,
    reason: Timeout,
}

impl Wait {
    fn new(timeout: NextTimeout) -> Wait {
        Wait {
            until: timeout
                .not_zero()
                .and_then(|after| Instant::now().checked_add(*after)),
            reason: timeout.reason,
        }
    }

    /// Length of the next blocking slice, or why there is none.
    fn slice(&self) -> Result<Duration, ureq::Error> {
        if cancel_requested() {
            return Err(cancelled());
        }
        let Some(until) = self.until else {
            return Ok(POLL);
        };
        let left = until.saturating_duration_since(Instant::now());
        if left.is_zero() {
            Err(ureq::Error::Timeout(self.reason))
        } else {
            Ok(left.min(POLL))
        }
    }
}

/// A socket call that returned only because its slice ran out.
fn slice_ended(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

/// Opens plain TCP connections. Passes through a connection an earlier
/// connector already made.
#[derive(Debug)]
struct SocketConnector;

impl<In: Transport> Connector<In> for SocketConnector {
    type Out = Either<In, Socket>;

    fn connect(
        &self,
        details: &ConnectionDetails,
        chained: Option<In>,
    ) -> Result<Option<Self::Out>, ureq::Error> {
        if let Some(transport) = chained {
            return Ok(Some(Either::A(transport)));
        }

        let stream = dial(details)?;
        if cancel_requested() {
            return Err(cancelled());
        }
        let config = details.config;
        Ok(Some(Either::B(Socket {
            stream,
            buffers: LazyBuffers::new(config.input_buffer_size(), config.output_buffer_size()),
            read_timeout: None,
            write_timeout: None,
        })))
    }
}

fn dial(details: &ConnectionDetails) -> Result<TcpStream, ureq::Error> {
    let timeout = details.timeout.not_zero().map(|after| *after);
    let mut last = None;

    for addr in &details.addrs {
        if cancel_requested() {
            return Err(cancelled());
        }
        let attempt = match timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => {
                if details.config.no_delay() {
                    stream.set_nodelay(true)?;
                }
                trace!("connected to {addr}");
                return Ok(stream);
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                return Err(ureq::Error::Timeout(details.timeout.reason));
            }
            Err(err) => {
                trace!("connect to {addr} failed: {err}");
                last = Some(err);
            }
        }
    }

    let err = last.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::ConnectionRefused, "no address to connect to")
    });
    Err(err.into())
}

/// A TCP transport that blocks in slices.
struct Socket {
    stream: TcpStream,
    buffers: LazyBuffers,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Socket {
    fn read_slice(&mut self, slice: Duration) -> io::Result<()> {
        if self.read_timeout != Some(slice) {
            self.stream.set_read_timeout(Some(slice))?;
            self.read_timeout = Some(slice);
        }
        Ok(())
    }

    fn write_slice(&mut self, slice: Duration) -> io::Result<()> {
        if self.write_timeout != Some(slice) {
            self.stream.set_write_timeout(Some(slice))?;
            self.write_timeout = Some(slice);
        }
        Ok(())
    }
}

impl Transport for Socket {
    fn buffers(&mut self) -> &mut dyn Buffers {
        &mut self.buffers
    }

    fn transmit_output(&mut self, amount: usize, timeout: NextTimeout) -> Result<(), ureq::Error> {
        let wait = Wait::new(timeout);
        let mut sent = 0;
        while sent < amount {
            self.write_slice(wait.slice()?)?;
            match self.stream.write(&self.buffers.output()[sent..amount]) {
                Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero).into()),
                Ok(written) => sent += written,
                Err(err) if slice_ended(&err) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn await_input(&mut self, timeout: NextTimeout) -> Result<bool, ureq::Error> {
        let wait = Wait::new(timeout);
        loop {
            self.read_slice(wait.slice()?)?;
            match self.stream.read(self.buffers.input_append_buf()) {
                Ok(amount) => {
                    self.buffers.input_appended(amount);
                    return Ok(amount > 0);
                }
                Err(err) if slice_ended(&err) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn is_open(&mut self) -> bool {
        still_open(&mut self.stream).unwrap_or(false)
    }
}

/// An idle pooled socket is open when a non-blocking read would block.
fn still_open(stream: &mut TcpStream) -> io::Result<bool> {
    stream.set_nonblocking(true)?;
    let mut byte = [0];
    let open = matches!(stream.read(&mut byte), Err(err) if err.kind() == io::ErrorKind::WouldBlock);
    stream.set_nonblocking(false)?;
    Ok(open)
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("peer", &self.stream.peer_addr().ok())
            .finish_non_exhaustive()
    }
}
