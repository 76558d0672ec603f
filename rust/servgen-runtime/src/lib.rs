#![deny(unsafe_code)]

//! The runtime contract that servgen-generated code is written against.
//!
//! Generated headers call into an external RPC runtime; this crate pins down
//! the parts of that contract the generator has to agree with:
//!
//! - [`RequestId::combine`]: how a (service id, method id) pair becomes the
//!   scalar request id the client stamps on outbound envelopes.
//! - [`NOT_IMPLEMENTED`]: the status every generated default method body
//!   replies with.
//! - [`AdmissionGate`]: the counting limiter behind the generated `safe`
//!   call variants.

mod envelope;
pub use envelope::*;

mod gate;
pub use gate::*;

use servgen_schema::{MethodId, ServiceId};

/// Status set by generated default method bodies. Follows HTTP: 501 means
/// "Not Implemented".
pub const NOT_IMPLEMENTED: u32 = 501;

/// Combined request identifier carried on outbound envelopes.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Clone, Copy)]
#[repr(transparent)]
pub struct RequestId(pub u32);

impl RequestId {
    /// Combine service and method ids with XOR.
    ///
    /// Order-insensitive and not collision-free: distinct pairs can share a
    /// request id. See [`RequestId::collisions`].
    pub fn combine(service_id: ServiceId, method_id: MethodId) -> Self {
        Self(service_id.0 ^ method_id.0)
    }

    /// Find groups of (service, method) pairs that combine to the same
    /// request id. Each returned entry lists every colliding pair, in input
    /// order. Pairs are compared by value, so a repeated pair collides with
    /// itself.
    pub fn collisions<I>(pairs: I) -> Vec<(RequestId, Vec<(ServiceId, MethodId)>)>
    where
        I: IntoIterator<Item = (ServiceId, MethodId)>,
    {
        let mut groups: Vec<(RequestId, Vec<(ServiceId, MethodId)>)> = Vec::new();
        for (service_id, method_id) in pairs {
            let id = Self::combine(service_id, method_id);
            match groups.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, members)) => members.push((service_id, method_id)),
                None => groups.push((id, vec![(service_id, method_id)])),
            }
        }
        groups.retain(|(_, members)| members.len() > 1);
        groups
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
