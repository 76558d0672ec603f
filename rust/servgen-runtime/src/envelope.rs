use servgen_schema::{MethodId, ServiceId};

use crate::{NOT_IMPLEMENTED, RequestId};

/// Outbound message as seen by generated code: a status and a request id.
///
/// Payload bytes belong to the wire layer and are not modelled here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    status: u32,
    request_id: Option<RequestId>,
}

impl Envelope {
    /// The reply a generated default method body resolves with.
    pub fn not_implemented() -> Self {
        let mut e = Self::default();
        e.set_status(NOT_IMPLEMENTED);
        e
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    pub fn set_status(&mut self, status: u32) {
        self.status = status;
    }

    pub fn request_id(&self) -> Option<RequestId> {
        self.request_id
    }

    /// Mirror of the generated `e.set_request_id(service, method)` call.
    pub fn set_request_id(&mut self, service_id: ServiceId, method_id: MethodId) {
        self.request_id = Some(RequestId::combine(service_id, method_id));
    }
}
