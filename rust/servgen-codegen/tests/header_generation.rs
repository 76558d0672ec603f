use servgen_codegen::targets::cpp;
use servgen_codegen::{CodegenOptions, GenerateError, Template};
use servgen_schema::{FileDescriptor, ServiceDescriptor};

fn greeter_file() -> FileDescriptor {
    FileDescriptor::new("demo/greeter.fbs", "demo.v1").with_service(
        ServiceDescriptor::new("Greeter", 123).with_method(
            "SayHello",
            456,
            "HelloRequest",
            "HelloReply",
        ),
    )
}

fn storage_file() -> FileDescriptor {
    FileDescriptor::new("idl/storage.fbs", "a.b.c")
        .with_service(
            ServiceDescriptor::new("Storage", 1000)
                .with_method("Get", 11, "GetRequest", "GetReply")
                .with_method("Put", 12, "PutRequest", "PutReply")
                .with_method("Delete", 13, "DeleteRequest", "DeleteReply"),
        )
        .with_service(
            ServiceDescriptor::new("admin", 2000)
                .with_method("ping", 21, "PingRequest", "PingReply")
                .with_method("Stats", 22, "StatsRequest", "StatsReply"),
        )
}

const GREETER_HEADER: &str = r#"// Generated by servgen.
// Any local changes WILL BE LOST.
// source: demo/greeter.fbs
#pragma once
#ifndef SERVGEN_GREETER_2eFBS_INCLUDED
#define SERVGEN_GREETER_2eFBS_INCLUDED


// support library string type
#include <core/sstring.hh>

#include "demo/greeter_generated.h"

#include <experimental/optional>
#include <rpc/rpc_service.h>
#include <rpc/rpc_client.h>
#include <rpc/rpc_recv_typed_context.h>
#include <platform/log.h>

namespace demo {
namespace v1 {

class Greeter: public rpc::rpc_service {
 public:
  virtual const char *service_name() const override final {
    return "Greeter";
  }
  /// ServiceID: 123 == crc32("Greeter")
  virtual uint32_t service_id() const override final {
    return 123;
  }
  virtual std::vector<rpc::rpc_service_method_handle> methods() override final {
    std::vector<rpc::rpc_service_method_handle> handles;
    // MethodID: 456 == crc32("SayHello")
    handles.emplace_back(
      "SayHello", 456,
      [this](rpc::rpc_recv_context c) -> future<rpc::rpc_envelope> {
        using t = rpc::rpc_recv_typed_context<HelloRequest>;
        return SayHello(t(std::move(c)));
      });
    return handles;
  }
  virtual future<rpc::rpc_envelope>
  SayHello(rpc::rpc_recv_typed_context<HelloRequest> &&rec) {
    // Output type: HelloReply
    rpc::rpc_envelope e(nullptr);
    // Helpful for clients to set the status.
    // Typically follows HTTP style. Not imposed by the runtime.
    e.set_status(501); // Not implemented
    return make_ready_future<rpc::rpc_envelope>(std::move(e));
  }
}; // end of service: Greeter

class GreeterClient: public rpc::rpc_client {
 public:
  GreeterClient(ipv4_addr server_addr)
  :rpc::rpc_client(std::move(server_addr)) {}

  /// RequestID: 123 ^ 456 == 435
  /// ServiceID: 123 == crc32("Greeter")
  /// MethodID:  456 == crc32("SayHello")
  future<rpc::rpc_recv_typed_context<HelloReply>>
  SayHello(rpc::rpc_envelope e) {
    e.set_request_id(123, 456);
    return send<HelloReply>(std::move(e), false);
  }
  future<rpc::rpc_recv_typed_context<HelloReply>>
  SafeSayHello(rpc::rpc_envelope e) {
    return limit_.wait(1).then([this, e=std::move(e)]() mutable {
      return this->SayHello(std::move(e)).finally([this](){
        limit_.signal(1);
      });
    });
  }
}; // end of rpc client: GreeterClient

}  // namespace v1
}  // namespace demo


#endif  // SERVGEN_GREETER_2eFBS_INCLUDED
"#;

#[test]
fn golden_greeter_header() {
    let out = cpp::generate_file(&greeter_file(), &CodegenOptions::default()).unwrap();
    assert_eq!(out, GREETER_HEADER);
}

#[test]
fn generation_is_deterministic() {
    let options = CodegenOptions::default();
    let first = cpp::generate_file(&storage_file(), &options).unwrap();
    for _ in 0..5 {
        assert_eq!(cpp::generate_file(&storage_file(), &options).unwrap(), first);
    }
}

#[test]
fn one_server_and_client_per_service() {
    let out = cpp::generate_file(&storage_file(), &CodegenOptions::default()).unwrap();

    // 2 services, 5 methods
    assert_eq!(out.matches(": public rpc::rpc_service {").count(), 2);
    assert_eq!(out.matches(": public rpc::rpc_client {").count(), 2);
    assert_eq!(out.matches("handles.emplace_back(").count(), 5);
    assert_eq!(out.matches("(rpc::rpc_envelope e) {").count(), 10);
    assert_eq!(out.matches("limit_.wait(1)").count(), 5);
    assert_eq!(out.matches("e.set_status(501);").count(), 5);

    assert!(out.contains("class StorageClient: public rpc::rpc_client {"));
    assert!(out.contains("class admin_client: public rpc::rpc_client {"));
    assert!(out.contains("  safe_ping(rpc::rpc_envelope e) {"));
    assert!(out.contains("  SafeStats(rpc::rpc_envelope e) {"));
}

#[test]
fn all_servers_precede_all_clients() {
    let out = cpp::generate_file(&storage_file(), &CodegenOptions::default()).unwrap();

    let storage_server = out.find("class Storage: ").unwrap();
    let admin_server = out.find("class admin: ").unwrap();
    let storage_client = out.find("class StorageClient: ").unwrap();
    let admin_client = out.find("class admin_client: ").unwrap();
    assert!(storage_server < admin_server);
    assert!(admin_server < storage_client);
    assert!(storage_client < admin_client);
}

#[test]
fn dispatch_entries_in_declaration_order() {
    let out = cpp::generate_file(&storage_file(), &CodegenOptions::default()).unwrap();

    let positions: Vec<usize> = ["\"Get\", 11,", "\"Put\", 12,", "\"Delete\", 13,", "\"ping\", 21,", "\"Stats\", 22,"]
        .iter()
        .map(|entry| out.find(entry).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn namespaces_open_in_order_and_close_in_reverse() {
    let out = cpp::generate_file(&storage_file(), &CodegenOptions::default()).unwrap();

    assert!(out.contains("namespace a {\nnamespace b {\nnamespace c {\n"));
    assert!(out.contains("}  // namespace c\n}  // namespace b\n}  // namespace a\n"));
    let open = out.find("namespace a {").unwrap();
    let first_class = out.find("class Storage: ").unwrap();
    let close = out.find("}  // namespace c").unwrap();
    assert!(open < first_class && first_class < close);
}

#[test]
fn file_without_services_keeps_the_shell() {
    let file = FileDescriptor::new("empty.fbs", "x");
    let out = cpp::generate_file(&file, &CodegenOptions::default()).unwrap();

    assert!(out.starts_with("// Generated by servgen.\n"));
    assert!(out.contains("#ifndef SERVGEN_EMPTY_2eFBS_INCLUDED\n"));
    assert!(out.contains("#include <rpc/rpc_service.h>\n"));
    assert!(out.contains("namespace x {\n"));
    assert!(out.ends_with("}  // namespace x\n\n\n#endif  // SERVGEN_EMPTY_2eFBS_INCLUDED\n"));
    assert!(!out.contains("class "));
}

#[test]
fn empty_package_opens_no_namespace() {
    let file = FileDescriptor::new("flat.fbs", "")
        .with_service(ServiceDescriptor::new("Flat", 1).with_method("Go", 2, "In", "Out"));
    let out = cpp::generate_file(&file, &CodegenOptions::default()).unwrap();

    assert!(!out.contains("namespace"));
    assert!(out.contains("}; // end of rpc client: FlatClient\n\n\n#endif"));
}

#[test]
fn services_namespace_wraps_classes_inside_package() {
    let options = CodegenOptions::default().with_services_namespace("rpcgen");
    let out = cpp::generate_file(&greeter_file(), &options).unwrap();

    assert!(out.contains("namespace v1 {\n\n\nnamespace rpcgen {\n\nclass Greeter: "));
    assert!(out.contains(
        "}; // end of rpc client: GreeterClient\n\n}  // namespace rpcgen\n\n}  // namespace v1\n"
    ));
}

#[test]
fn indent_width_is_configurable() {
    let options = CodegenOptions::default().with_indent_width(4);
    let out = cpp::generate_file(&greeter_file(), &options).unwrap();

    assert!(out.contains("\n    virtual const char *service_name() const override final {\n        return \"Greeter\";\n"));
}

#[test]
fn custom_banner_with_unknown_variable_fails() {
    let banner = Template::parse("// built from $missing$\n").unwrap();
    let options = CodegenOptions::default().with_banner(banner);

    let err = cpp::generate_file(&greeter_file(), &options).unwrap_err();
    assert_eq!(
        err,
        GenerateError::UnknownVariable {
            name: "missing".into()
        }
    );
    assert_eq!(err.to_string(), "template variable `missing` is not defined");
}

#[test]
fn generate_files_keeps_input_order() {
    let outputs =
        cpp::generate_files(&[storage_file(), greeter_file()], &CodegenOptions::default()).unwrap();

    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].contains("// source: idl/storage.fbs\n"));
    assert!(outputs[1].contains("// source: demo/greeter.fbs\n"));
}

#[test]
fn colliding_request_ids_still_generate() {
    // 1 ^ 3 == 3 ^ 1: the pipeline warns but emits both services.
    let file = FileDescriptor::new("c.fbs", "")
        .with_service(ServiceDescriptor::new("A", 1).with_method("X", 3, "In", "Out"))
        .with_service(ServiceDescriptor::new("B", 3).with_method("Y", 1, "In", "Out"));
    let out = cpp::generate_file(&file, &CodegenOptions::default()).unwrap();

    assert!(out.contains("/// RequestID: 1 ^ 3 == 2\n"));
    assert!(out.contains("/// RequestID: 3 ^ 1 == 2\n"));
}
