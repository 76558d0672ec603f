use crate::naming::NamingConvention;
use crate::template::Template;

/// Options for header generation.
///
/// Passed explicitly to every stage; generation reads nothing else.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Wrap every generated class in this extra namespace.
    pub services_namespace: Option<String>,

    /// Prefix for generated framework includes. A trailing `/` is added if
    /// missing.
    pub search_path: Option<String>,

    /// Use `#include <...>` when true, `#include "..."` otherwise.
    pub use_system_headers: bool,

    /// Suffix of the companion message header, appended to the input
    /// filename without its extension.
    pub message_header_ext: String,

    /// Spaces per indentation level.
    pub indent_width: usize,

    /// Spelling for derived identifiers (client class, `safe` variants).
    /// `None` infers it from each name.
    pub naming: Option<NamingConvention>,

    /// Replaces the two-line "generated file" banner.
    ///
    /// Available variables: `filename`, `filename_base` (without extension)
    /// and `filename_identifier` (the include-guard token).
    pub banner: Option<Template>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            services_namespace: None,
            search_path: None,
            use_system_headers: true,
            message_header_ext: "_generated.h".to_string(),
            indent_width: 2,
            naming: None,
            banner: None,
        }
    }
}

impl CodegenOptions {
    pub fn with_services_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.services_namespace = Some(namespace.into());
        self
    }

    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn with_system_headers(mut self, enabled: bool) -> Self {
        self.use_system_headers = enabled;
        self
    }

    pub fn with_message_header_ext(mut self, ext: impl Into<String>) -> Self {
        self.message_header_ext = ext.into();
        self
    }

    pub fn with_indent_width(mut self, spaces: usize) -> Self {
        self.indent_width = spaces;
        self
    }

    pub fn with_naming(mut self, convention: NamingConvention) -> Self {
        self.naming = Some(convention);
        self
    }

    pub fn with_banner(mut self, banner: Template) -> Self {
        self.banner = Some(banner);
        self
    }

    /// Namespace to wrap classes in, ignoring an empty string.
    pub(crate) fn services_namespace(&self) -> Option<&str> {
        self.services_namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Search path to prefix includes with, ignoring an empty string.
    pub(crate) fn search_path(&self) -> Option<&str> {
        self.search_path.as_deref().filter(|p| !p.is_empty())
    }
}
