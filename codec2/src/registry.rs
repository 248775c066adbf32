//! Handle-based session registry.
//!
//! The registry is the caller-facing surface for hosts that hold sessions by
//! an opaque integer rather than by value. Each session sits behind its own
//! lock, so calls against one handle are serialized while calls against
//! different handles run in parallel.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::engine::Engine;
use crate::error::{Codec2Error, Result};
use crate::geometry::FrameGeometry;
use crate::session::Session;
use crate::source::PcmSource;

/// Opaque handle to a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle(NonZeroU64);

impl SessionHandle {
    /// Returns the raw handle value.
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Rebuilds a handle from a raw value. Zero is never a valid handle.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Slot<E> = Arc<Mutex<Session<E>>>;

/// Table of live sessions sharing one engine.
pub struct Registry<E: Engine + Clone> {
    engine: E,
    next: AtomicU64,
    sessions: RwLock<HashMap<SessionHandle, Slot<E>>>,
}

impl<E: Engine + Clone> Registry<E> {
    /// Creates an empty registry.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            next: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a session for a mode ordinal and returns its handle.
    pub fn create_session(&self, ordinal: i32) -> Result<SessionHandle> {
        let session = Session::open_ordinal(self.engine.clone(), ordinal)?;
        let handle = SessionHandle(
            NonZeroU64::MIN.saturating_add(self.next.fetch_add(1, Ordering::Relaxed)),
        );

        self.sessions
            .write()
            .insert(handle, Arc::new(Mutex::new(session)));
        debug!(handle = %handle, ordinal, "codec2: session registered");
        Ok(handle)
    }

    /// Removes and closes a session.
    ///
    /// Returns false, touching nothing, if the handle is unknown or was
    /// already destroyed. A call already in flight on the session finishes
    /// before the state is released; calls racing the removal see `Closed`.
    pub fn destroy_session(&self, handle: SessionHandle) -> bool {
        let Some(slot) = self.sessions.write().remove(&handle) else {
            return false;
        };
        let mut session = slot.lock();
        if session.close().is_err() {
            return false;
        }
        debug!(handle = %handle, "codec2: session destroyed");
        true
    }

    /// Returns the frame geometry of a session.
    pub fn geometry(&self, handle: SessionHandle) -> Result<FrameGeometry> {
        Ok(self.slot(handle)?.lock().geometry())
    }

    /// Encodes little-endian PCM bytes with the session.
    pub fn encode(&self, handle: SessionHandle, pcm: &[u8]) -> Result<Vec<u8>> {
        let slot = self.slot(handle)?;
        let mut session = slot.lock();
        session.encode_source(PcmSource::from_le_bytes(pcm))
    }

    /// Decodes concatenated frames into little-endian PCM bytes.
    pub fn decode(&self, handle: SessionHandle, frames: &[u8]) -> Result<Vec<u8>> {
        let slot = self.slot(handle)?;
        let mut session = slot.lock();
        session.decode_to_le_bytes(frames)
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Returns the shared engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn slot(&self, handle: SessionHandle) -> Result<Slot<E>> {
        self.sessions
            .read()
            .get(&handle)
            .cloned()
            .ok_or(Codec2Error::UnknownSession(handle))
    }
}

impl<E: Engine + Clone> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("sessions", &self.len())
            .finish()
    }
}
