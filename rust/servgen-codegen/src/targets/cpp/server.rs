//! C++ server base class generation.
//!
//! Emits, per service: name and id accessors, the dispatch table built by
//! `methods()`, and an overridable default body for every method.

use std::fmt;

use servgen_runtime::NOT_IMPLEMENTED;
use servgen_schema::{MethodDescriptor, ServiceDescriptor};

use crate::printer::Printer;
use crate::render::crc_note;
use crate::{GenerateError, pr_writeln};

/// Generate the server base class for `service`.
pub(super) fn print_service<W: fmt::Write>(
    p: &mut Printer<W>,
    service: &ServiceDescriptor,
) -> Result<(), GenerateError> {
    tracing::debug!(service = service.name(), "server class");
    let name = service.name();

    pr_writeln!(p, "class {name}: public rpc::rpc_service {{")?;
    p.writeln(" public:")?;
    {
        let _indent = p.indent();

        p.block("virtual const char *service_name() const override final", |p| {
            pr_writeln!(p, "return \"{name}\";")
        })?;

        pr_writeln!(p, "/// ServiceID: {}", crc_note(service.service_id(), name))?;
        p.block("virtual uint32_t service_id() const override final", |p| {
            pr_writeln!(p, "return {};", service.service_id())
        })?;

        print_dispatch_table(p, service)?;

        for method in service.methods() {
            print_default_method(p, method)?;
        }
    }
    pr_writeln!(p, "}}; // end of service: {name}")?;
    Ok(())
}

/// `methods()`: one (name, id, adapter) handle per method, in declaration
/// order. The adapter turns the untyped receive context into the method's
/// typed context and returns the method's future as is.
fn print_dispatch_table<W: fmt::Write>(
    p: &mut Printer<W>,
    service: &ServiceDescriptor,
) -> fmt::Result {
    p.block(
        "virtual std::vector<rpc::rpc_service_method_handle> methods() override final",
        |p| {
            p.writeln("std::vector<rpc::rpc_service_method_handle> handles;")?;
            for method in service.methods() {
                let method_name = method.name();
                let method_id = method.method_id();

                pr_writeln!(p, "// MethodID: {}", crc_note(method_id, method_name))?;
                p.writeln("handles.emplace_back(")?;
                let _args = p.indent();
                pr_writeln!(p, "\"{method_name}\", {method_id},")?;
                p.writeln("[this](rpc::rpc_recv_context c) -> future<rpc::rpc_envelope> {")?;
                {
                    let _body = p.indent();
                    pr_writeln!(
                        p,
                        "using t = rpc::rpc_recv_typed_context<{}>;",
                        method.input_type_name()
                    )?;
                    pr_writeln!(p, "return {method_name}(t(std::move(c)));")?;
                }
                p.writeln("});")?;
            }
            p.writeln("return handles;")
        },
    )
}

/// Default body: reply with an empty envelope carrying 501.
fn print_default_method<W: fmt::Write>(
    p: &mut Printer<W>,
    method: &MethodDescriptor,
) -> fmt::Result {
    tracing::debug!(method = method.name(), "default method body");

    p.writeln("virtual future<rpc::rpc_envelope>")?;
    let header = format!(
        "{}(rpc::rpc_recv_typed_context<{}> &&rec)",
        method.name(),
        method.input_type_name()
    );
    p.block(&header, |p| {
        pr_writeln!(p, "// Output type: {}", method.output_type_name())?;
        p.writeln("rpc::rpc_envelope e(nullptr);")?;
        p.writeln("// Helpful for clients to set the status.")?;
        p.writeln("// Typically follows HTTP style. Not imposed by the runtime.")?;
        pr_writeln!(p, "e.set_status({NOT_IMPLEMENTED}); // Not implemented")?;
        p.writeln("return make_ready_future<rpc::rpc_envelope>(std::move(e));")
    })
}
