//! C++ header generation.
//!
//! [`generate_file`] runs five stages, each with its own printer, and
//! concatenates their output:
//!
//! 1. prologue: banner, source comment, include guard open, message header
//! 2. framework includes and package namespaces (declared order)
//! 3. server classes, one per service
//! 4. client classes, one per service
//! 5. package namespaces closed (reverse order), include guard close
//!
//! A file without services still gets stages 1, 2 and 5.

mod client;
mod server;

use servgen_runtime::RequestId;
use servgen_schema::FileDescriptor;

use crate::naming::file_name_identifier;
use crate::printer::Printer;
use crate::render::guard_macro;
use crate::template::Vars;
use crate::{CodegenOptions, GenerateError, pr_writeln};

/// Headers every generated file includes, in this order.
const FRAMEWORK_HEADERS: &[&str] = &[
    "experimental/optional",
    "rpc/rpc_service.h",
    "rpc/rpc_client.h",
    "rpc/rpc_recv_typed_context.h",
    "platform/log.h",
];

/// Generate the complete header for `file`.
pub fn generate_file(
    file: &FileDescriptor,
    options: &CodegenOptions,
) -> Result<String, GenerateError> {
    tracing::debug!(file = file.filename(), services = file.service_count(), "generating header");
    report_request_id_collisions(file);

    let mut out = String::new();
    out.push_str(&header_prologue(file, options)?);
    out.push_str(&header_includes(file, options)?);
    out.push_str(&header_servers(file, options)?);
    out.push_str(&header_clients(file, options)?);
    out.push_str(&header_epilogue(file, options)?);
    Ok(out)
}

/// Generate one header per file, in input order.
pub fn generate_files(
    files: &[FileDescriptor],
    options: &CodegenOptions,
) -> Result<Vec<String>, GenerateError> {
    files.iter().map(|file| generate_file(file, options)).collect()
}

fn printer<'a>(output: &'a mut String, options: &CodegenOptions) -> Printer<&'a mut String> {
    Printer::with_indent_spaces(output, options.indent_width)
}

fn header_prologue(file: &FileDescriptor, options: &CodegenOptions) -> Result<String, GenerateError> {
    tracing::debug!("header prologue");
    let identifier = file_name_identifier(file.filename_without_path());
    let guard = guard_macro(&identifier);

    let mut output = String::new();
    {
        let mut p = printer(&mut output, options);

        match &options.banner {
            Some(banner) => {
                let vars = Vars::new()
                    .with("filename", file.filename())
                    .with("filename_base", file.filename_without_ext())
                    .with("filename_identifier", identifier.as_str());
                p.print(banner, &vars)?;
            }
            None => {
                p.writeln("// Generated by servgen.")?;
                p.writeln("// Any local changes WILL BE LOST.")?;
            }
        }
        pr_writeln!(p, "// source: {}", file.filename())?;
        p.writeln("#pragma once")?;
        pr_writeln!(p, "#ifndef {guard}")?;
        pr_writeln!(p, "#define {guard}")?;
        p.blank_line()?;
        p.blank_line()?;
        p.writeln("// support library string type")?;
        p.writeln("#include <core/sstring.hh>")?;
        p.blank_line()?;
        pr_writeln!(
            p,
            "#include \"{}{}\"",
            file.filename_without_ext(),
            options.message_header_ext
        )?;
        p.blank_line()?;
    }
    Ok(output)
}

fn print_includes(
    p: &mut Printer<&mut String>,
    headers: &[&str],
    options: &CodegenOptions,
) -> Result<(), GenerateError> {
    let (mut left, right) = if options.use_system_headers {
        (String::from("<"), '>')
    } else {
        (String::from("\""), '"')
    };
    if let Some(search_path) = options.search_path() {
        left.push_str(search_path);
        if !search_path.ends_with('/') {
            left.push('/');
        }
    }

    for header in headers {
        pr_writeln!(p, "#include {left}{header}{right}")?;
    }
    Ok(())
}

fn header_includes(file: &FileDescriptor, options: &CodegenOptions) -> Result<String, GenerateError> {
    tracing::debug!("header includes");
    let mut output = String::new();
    {
        let mut p = printer(&mut output, options);
        print_includes(&mut p, FRAMEWORK_HEADERS, options)?;
        p.blank_line()?;

        let parts = file.package_parts();
        if !parts.is_empty() {
            for part in &parts {
                pr_writeln!(p, "namespace {part} {{")?;
            }
            p.blank_line()?;
        }
    }
    Ok(output)
}

fn header_servers(file: &FileDescriptor, options: &CodegenOptions) -> Result<String, GenerateError> {
    tracing::debug!("header servers");
    let mut output = String::new();
    {
        let mut p = printer(&mut output, options);

        if let Some(namespace) = options.services_namespace() {
            p.blank_line()?;
            pr_writeln!(p, "namespace {namespace} {{")?;
            p.blank_line()?;
        }

        for service in file.services() {
            server::print_service(&mut p, service)?;
            p.blank_line()?;
        }
    }
    Ok(output)
}

fn header_clients(file: &FileDescriptor, options: &CodegenOptions) -> Result<String, GenerateError> {
    tracing::debug!("header clients");
    let mut output = String::new();
    {
        let mut p = printer(&mut output, options);

        for service in file.services() {
            client::print_client(&mut p, service, options)?;
            p.blank_line()?;
        }

        if let Some(namespace) = options.services_namespace() {
            pr_writeln!(p, "}}  // namespace {namespace}")?;
            p.blank_line()?;
        }
    }
    Ok(output)
}

fn header_epilogue(file: &FileDescriptor, options: &CodegenOptions) -> Result<String, GenerateError> {
    tracing::debug!("header epilogue");
    let guard = guard_macro(&file_name_identifier(file.filename_without_path()));

    let mut output = String::new();
    {
        let mut p = printer(&mut output, options);

        let parts = file.package_parts();
        if !parts.is_empty() {
            for part in parts.iter().rev() {
                pr_writeln!(p, "}}  // namespace {part}")?;
            }
            p.blank_line()?;
        }

        p.blank_line()?;
        pr_writeln!(p, "#endif  // {guard}")?;
    }
    Ok(output)
}

/// Warn about (service, method) pairs whose combined request id is shared
/// with another pair in the same file. The runtime cannot tell them apart.
fn report_request_id_collisions(file: &FileDescriptor) {
    let pairs = file
        .services()
        .iter()
        .flat_map(|s| s.methods())
        .map(|m| (m.service_id(), m.method_id()));

    for (request_id, members) in RequestId::collisions(pairs) {
        let members = members
            .iter()
            .map(|(service_id, method_id)| format!("{service_id}^{method_id}"))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(
            file = file.filename(),
            %request_id,
            %members,
            "request id collision"
        );
    }
}
