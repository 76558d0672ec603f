use crate::{MethodId, ServiceId};

/// Descriptor for one RPC service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service name (e.g., "Greeter").
    name: String,

    /// Service id as supplied by the parser.
    service_id: ServiceId,

    /// All methods in declaration order.
    methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, service_id: u32) -> Self {
        Self {
            name: name.into(),
            service_id: ServiceId(service_id),
            methods: Vec::new(),
        }
    }

    /// Append a method. The method records this service's name and id so it
    /// can answer lookups without a reference back to its parent.
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method_id: u32,
        input_type_name: impl Into<String>,
        output_type_name: impl Into<String>,
    ) -> Self {
        self.methods.push(MethodDescriptor {
            name: name.into(),
            method_id: MethodId(method_id),
            input_type_name: input_type_name.into(),
            output_type_name: output_type_name.into(),
            service_id: self.service_id,
            service_name: self.name.clone(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Method at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= method_count()`.
    pub fn method(&self, index: usize) -> &MethodDescriptor {
        &self.methods[index]
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Look up a method descriptor by method ID.
    pub fn by_id(&self, method_id: MethodId) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.method_id == method_id)
    }
}

/// Descriptor for a single RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    method_id: MethodId,
    input_type_name: String,
    output_type_name: String,

    // Copied from the owning service.
    service_id: ServiceId,
    service_name: String,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method_id(&self) -> MethodId {
        self.method_id
    }

    /// Fully qualified name of the request message type.
    pub fn input_type_name(&self) -> &str {
        &self.input_type_name
    }

    /// Fully qualified name of the response message type.
    pub fn output_type_name(&self) -> &str {
        &self.output_type_name
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
