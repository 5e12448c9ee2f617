//! Single-use response body stream.
//!
//! A [`Body`] is a cheap, cloneable handle to one underlying reader. Every
//! clone points at the same stream, so a response and any copies derived
//! from it through [`HttpResponse::new_builder`](crate::net::HttpResponse::new_builder)
//! share the body just like they share the bytes on the wire.
//!
//! The reader itself can only be handed out once. [`Body::take`] moves it to
//! the first caller, who then owns it and closes it by dropping it. Any later
//! caller gets `None`. The body is never buffered or rewound by this type.
use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::NetError;
use crate::net::config::BodyConfig;

type BoxedReader = Box<dyn Read + Send + 'static>;

enum BodyState {
    Unread(BoxedReader),
    Taken,
}

#[derive(Clone)]
pub struct Body {
    state: Arc<Mutex<BodyState>>,
}

impl Body {
    /// Wraps a reader. Ownership of the reader moves into the body.
    pub fn new<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(BodyState::Unread(Box::new(reader)))),
        }
    }

    pub fn empty() -> Self {
        Self::new(io::empty())
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    // The state is a plain enum swap, so a panic while holding the lock
    // cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, BodyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands the reader to the caller. Returns `None` once the stream has
    /// already been taken by anyone holding a handle to this body.
    pub fn take(&self) -> Option<BoxedReader> {
        let mut guard = self.lock();
        match std::mem::replace(&mut *guard, BodyState::Taken) {
            BodyState::Unread(reader) => Some(reader),
            BodyState::Taken => {
                log::warn!("Body: stream requested after it was already consumed");
                None
            }
        }
    }

    /// True when the reader has been taken.
    pub fn is_consumed(&self) -> bool {
        matches!(*self.lock(), BodyState::Taken)
    }

    /// Takes the reader and drains it into memory.
    pub fn read_to_end(&self, config: &BodyConfig) -> Result<Vec<u8>, NetError> {
        let mut reader = self.take().ok_or(NetError::BodyConsumed)?;

        let mut buf = Vec::new();
        let mut chunk = vec![0u8; config.read_chunk_size.max(1)];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if let Some(limit) = config.max_body_bytes {
                if (buf.len() + n) as u64 > limit {
                    return Err(NetError::BodyTooLarge { limit });
                }
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        log::trace!("Body: read {} bytes", buf.len());
        Ok(buf)
    }

    /// Whether both handles refer to the same underlying stream.
    pub fn ptr_eq(a: &Body, b: &Body) -> bool {
        Arc::ptr_eq(&a.state, &b.state)
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        Body::ptr_eq(self, other)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_consumed() { "consumed" } else { "unread" };
        f.debug_struct("Body").field("state", &state).finish()
    }
}
