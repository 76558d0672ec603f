#![deny(unsafe_code)]

//! Header generation for servgen RPC services.
//!
//! This crate consumes a [`FileDescriptor`] produced by an IDL parser and
//! emits one C++ header per file containing, for each service:
//!
//! - a server base class with name/id accessors, a dispatch table and a
//!   default body for every method that replies `501 Not Implemented`;
//! - a client class with a direct call per method plus a `safe` variant
//!   that goes through the client's admission gate.
//!
//! # Usage: In Your build.rs
//!
//! ```ignore
//! let file = my_idl::parse("idl/greeter.fbs")?;
//! let header = servgen_codegen::targets::cpp::generate_file(&file, &CodegenOptions::default())?;
//! std::fs::write(out_dir.join("greeter_rpc.h"), header)?;
//! ```
//!
//! # The Pipeline
//!
//! ```text
//! prologue → includes/namespace open → server classes → client classes → namespace close/epilogue
//! ```
//!
//! Each stage renders through its own [`Printer`] and the results are
//! concatenated in that fixed order. Generation is synchronous and
//! deterministic: the same descriptor and options always produce the same
//! bytes.

mod error;
pub mod naming;
mod options;
pub mod printer;
mod render;
pub mod targets;
pub mod template;

pub use error::GenerateError;
pub use naming::NamingConvention;
pub use options::CodegenOptions;
pub use printer::Printer;
pub use servgen_schema::FileDescriptor;
pub use template::{Template, Vars};
