//! Split tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! partitioning semantics.

use crate::query::{Query, SortDirection};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// SplitTraceSink
///

pub trait SplitTraceSink: Send + Sync {
    fn on_event(&self, event: SplitTraceEvent);
}

///
/// SplitErrorClass
///
/// Stable classification labels carried by trace error events.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitErrorClass {
    InvalidArgument,
    Unsupported,
    StoreUnavailable,
    Invariant,
}

impl fmt::Display for SplitErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::Unsupported => "unsupported",
            Self::StoreUnavailable => "store_unavailable",
            Self::Invariant => "invariant",
        };
        write!(f, "{label}")
    }
}

///
/// SplitTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitTraceEvent {
    Start {
        fingerprint: SplitFingerprint,
        requested: u32,
    },
    BoundResolved {
        fingerprint: SplitFingerprint,
        direction: SortDirection,
        found: bool,
    },
    Finish {
        fingerprint: SplitFingerprint,
        boundaries: u32,
        shards: u32,
    },
    Error {
        fingerprint: SplitFingerprint,
        class: SplitErrorClass,
    },
}

///
/// SplitFingerprint
///
/// Stable identity for one split request. Hashes the query identity
/// inputs, never the store contents, so repeated requests correlate.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SplitFingerprint([u8; 32]);

impl SplitFingerprint {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

///
/// SplitScope
///

pub(crate) struct SplitScope {
    sink: &'static dyn SplitTraceSink,
    fingerprint: SplitFingerprint,
}

impl SplitScope {
    pub(crate) fn start(
        sink: Option<&'static dyn SplitTraceSink>,
        query: &Query,
        property: &str,
        requested: u32,
    ) -> Option<Self> {
        let sink = sink?;
        let fingerprint = split_fingerprint(query, property, requested);
        sink.on_event(SplitTraceEvent::Start {
            fingerprint,
            requested,
        });

        Some(Self { sink, fingerprint })
    }

    pub(crate) fn bound_resolved(&self, direction: SortDirection, found: bool) {
        self.sink.on_event(SplitTraceEvent::BoundResolved {
            fingerprint: self.fingerprint,
            direction,
            found,
        });
    }

    pub(crate) fn finish(self, boundaries: u32, shards: u32) {
        self.sink.on_event(SplitTraceEvent::Finish {
            fingerprint: self.fingerprint,
            boundaries,
            shards,
        });
    }

    pub(crate) fn error(self, class: SplitErrorClass) {
        self.sink.on_event(SplitTraceEvent::Error {
            fingerprint: self.fingerprint,
            class,
        });
    }
}

fn split_fingerprint(query: &Query, property: &str, requested: u32) -> SplitFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"splitfp:v1");
    write_str(&mut hasher, &query.kind);
    match &query.namespace {
        Some(namespace) => {
            hasher.update([1u8]);
            write_str(&mut hasher, namespace);
        }
        None => {
            hasher.update([0u8]);
        }
    }
    write_str(&mut hasher, property);
    hasher.update(requested.to_be_bytes());

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    SplitFingerprint::from_bytes(out)
}

fn write_str(hasher: &mut Sha256, value: &str) {
    let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(value.as_bytes());
}

///
/// TESTS
///
