//! C++ client class generation.
//!
//! Every method gets two calls: the direct one, which stamps the request id
//! and sends, and a `safe` one that takes a unit from the client's `limit_`
//! semaphore first and gives it back once the direct call settles.

use std::fmt;

use servgen_runtime::RequestId;
use servgen_schema::{MethodDescriptor, ServiceDescriptor};

use crate::naming::{postfix_token, safe_method_name};
use crate::printer::Printer;
use crate::render::crc_note;
use crate::{CodegenOptions, GenerateError, pr_writeln};

/// Generate the client class for `service`.
pub(super) fn print_client<W: fmt::Write>(
    p: &mut Printer<W>,
    service: &ServiceDescriptor,
    options: &CodegenOptions,
) -> Result<(), GenerateError> {
    tracing::debug!(service = service.name(), "client class");
    let client_name = postfix_token(service.name(), "client", options.naming)?;

    pr_writeln!(p, "class {client_name}: public rpc::rpc_client {{")?;
    p.writeln(" public:")?;
    {
        let _indent = p.indent();
        pr_writeln!(p, "{client_name}(ipv4_addr server_addr)")?;
        p.writeln(":rpc::rpc_client(std::move(server_addr)) {}")?;
    }
    p.blank_line()?;
    {
        let _indent = p.indent();
        for method in service.methods() {
            print_direct_method(p, method)?;
            print_safe_method(p, method, options)?;
        }
    }
    pr_writeln!(p, "}}; // end of rpc client: {client_name}")?;
    Ok(())
}

fn print_direct_method<W: fmt::Write>(
    p: &mut Printer<W>,
    method: &MethodDescriptor,
) -> fmt::Result {
    tracing::debug!(method = method.name(), "direct call");
    let service_id = method.service_id();
    let method_id = method.method_id();
    let out_type = method.output_type_name();

    pr_writeln!(
        p,
        "/// RequestID: {service_id} ^ {method_id} == {}",
        RequestId::combine(service_id, method_id)
    )?;
    pr_writeln!(p, "/// ServiceID: {}", crc_note(service_id, method.service_name()))?;
    pr_writeln!(p, "/// MethodID:  {}", crc_note(method_id, method.name()))?;
    pr_writeln!(p, "future<rpc::rpc_recv_typed_context<{out_type}>>")?;
    p.block(&format!("{}(rpc::rpc_envelope e)", method.name()), |p| {
        pr_writeln!(p, "e.set_request_id({service_id}, {method_id});")?;
        pr_writeln!(p, "return send<{out_type}>(std::move(e), false);")
    })
}

/// Admission-limited variant. `limit_` is the per-client semaphore provided
/// by `rpc::rpc_client`; `finally` releases on success and failure alike.
fn print_safe_method<W: fmt::Write>(
    p: &mut Printer<W>,
    method: &MethodDescriptor,
    options: &CodegenOptions,
) -> fmt::Result {
    tracing::debug!(method = method.name(), "safe call");
    let safe_name = safe_method_name(method.name(), options.naming);

    pr_writeln!(
        p,
        "future<rpc::rpc_recv_typed_context<{}>>",
        method.output_type_name()
    )?;
    p.block(&format!("{safe_name}(rpc::rpc_envelope e)"), |p| {
        p.writeln("return limit_.wait(1).then([this, e=std::move(e)]() mutable {")?;
        {
            let _then = p.indent();
            pr_writeln!(
                p,
                "return this->{}(std::move(e)).finally([this](){{",
                method.name()
            )?;
            {
                let _finally = p.indent();
                p.writeln("limit_.signal(1);")?;
            }
            p.writeln("});")?;
        }
        p.writeln("});")
    })
}
