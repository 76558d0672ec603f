#![deny(unsafe_code)]

//! Descriptor model for servgen.
//!
//! A [`FileDescriptor`] is the root of a read-only tree:
//!
//! ```text
//! FileDescriptor ─┬─ ServiceDescriptor ─┬─ MethodDescriptor
//!                 │                     └─ MethodDescriptor
//!                 └─ ServiceDescriptor ── ...
//! ```
//!
//! The tree is built once by whatever parsed the IDL, then only borrowed by
//! the code generator. Ids are taken as given: uniqueness of service ids
//! across a program and method ids within a service is the parser's job.
//!
//! ```
//! use servgen_schema::{FileDescriptor, ServiceDescriptor};
//!
//! let file = FileDescriptor::new("demo/greeter.fbs", "demo.v1").with_service(
//!     ServiceDescriptor::new("Greeter", 0x1234)
//!         .with_method("SayHello", 0x42, "HelloRequest", "HelloReply"),
//! );
//!
//! assert_eq!(file.filename_without_path(), "greeter.fbs");
//! assert_eq!(file.filename_without_ext(), "demo/greeter");
//! assert_eq!(file.package_parts(), vec!["demo", "v1"]);
//! assert_eq!(file.service(0).method(0).service_name(), "Greeter");
//! ```

mod services;
pub use services::*;

macro_rules! declare_u32_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Clone, Copy)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

declare_u32_id!(
    /// Numeric service identifier, typically `crc32(service_name)` computed upstream.
    ServiceId
);

declare_u32_id!(
    /// Numeric method identifier, typically `crc32(method_name)` computed upstream.
    MethodId
);

/// A parsed IDL file: the unit of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    filename: String,
    filename_without_path: String,
    filename_without_ext: String,
    package: String,
    services: Vec<ServiceDescriptor>,
}

impl FileDescriptor {
    /// Create a file descriptor. The path-less and extension-less forms of
    /// `filename` are derived here once.
    pub fn new(filename: impl Into<String>, package: impl Into<String>) -> Self {
        let filename = filename.into();
        let filename_without_path = match filename.rfind('/') {
            Some(slash) => filename[slash + 1..].to_string(),
            None => filename.clone(),
        };
        let filename_without_ext = strip_extension(&filename).to_string();

        Self {
            filename,
            filename_without_path,
            filename_without_ext,
            package: package.into(),
            services: Vec::new(),
        }
    }

    /// Append a service, keeping declaration order.
    pub fn with_service(mut self, service: ServiceDescriptor) -> Self {
        self.services.push(service);
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn filename_without_path(&self) -> &str {
        &self.filename_without_path
    }

    pub fn filename_without_ext(&self) -> &str {
        &self.filename_without_ext
    }

    /// Dot-delimited package, possibly empty.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Package segments in declared order. Empty when the package is empty.
    pub fn package_parts(&self) -> Vec<&str> {
        if self.package.is_empty() {
            return Vec::new();
        }
        self.package.split('.').collect()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Service at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= service_count()`.
    pub fn service(&self, index: usize) -> &ServiceDescriptor {
        &self.services[index]
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }
}

/// Remove the final `.ext` of the last path component, if any.
fn strip_extension(filename: &str) -> &str {
    let start = filename.rfind('/').map_or(0, |slash| slash + 1);
    match filename[start..].rfind('.') {
        Some(dot) if dot > 0 => &filename[..start + dot],
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_path_and_extension_forms() {
        let file = FileDescriptor::new("idl/rpc/demo_service.fbs", "");
        assert_eq!(file.filename(), "idl/rpc/demo_service.fbs");
        assert_eq!(file.filename_without_path(), "demo_service.fbs");
        assert_eq!(file.filename_without_ext(), "idl/rpc/demo_service");
    }

    #[test]
    fn extension_only_stripped_from_last_component() {
        let file = FileDescriptor::new("v1.2/schema", "");
        assert_eq!(file.filename_without_ext(), "v1.2/schema");
        assert_eq!(file.filename_without_path(), "schema");

        let dotfile = FileDescriptor::new(".hidden", "");
        assert_eq!(dotfile.filename_without_ext(), ".hidden");
    }

    #[test]
    fn package_parts_keep_declared_order() {
        let file = FileDescriptor::new("a.fbs", "a.b.c");
        assert_eq!(file.package_parts(), vec!["a", "b", "c"]);

        let empty = FileDescriptor::new("a.fbs", "");
        assert!(empty.package_parts().is_empty());
    }

    #[test]
    fn services_keep_declaration_order() {
        let file = FileDescriptor::new("a.fbs", "")
            .with_service(ServiceDescriptor::new("Zeta", 2))
            .with_service(ServiceDescriptor::new("Alpha", 1));

        assert_eq!(file.service_count(), 2);
        assert_eq!(file.service(0).name(), "Zeta");
        assert_eq!(file.service(1).name(), "Alpha");
    }

    #[test]
    fn id_display_is_decimal() {
        assert_eq!(ServiceId(0xdead).to_string(), "57005");
        assert_eq!(MethodId::from(7).to_string(), "7");
    }
}
