//! Host-side helpers layered over the runtime: introspective function stubs
//! and console output.

use std::fmt::Write as _;

use crate::{
    diagnostics::Result,
    registry::FunctionMetadata,
    runtime::Runtime,
    value::Value,
};

/// Registers a stub that does not execute `body`; calling it returns a text
/// report of the arguments it received followed by the body.
pub fn define_function(
    runtime: &mut Runtime,
    name: &str,
    parameter_names: &[&str],
    return_type: &str,
    documentation: &str,
    body: &str,
) {
    let metadata = FunctionMetadata::new(name, parameter_names)
        .with_return_type(return_type)
        .with_documentation(documentation);
    let body = body.to_string();
    runtime.register_function(name, metadata, move |_runtime: &mut Runtime, args: &[Value]| {
        describe_call(args, &body)
    });
}

pub fn define_simple_function(
    runtime: &mut Runtime,
    name: &str,
    parameter_name: &str,
    return_type: &str,
    documentation: &str,
    body: &str,
) {
    define_function(
        runtime,
        name,
        &[parameter_name],
        return_type,
        documentation,
        body,
    );
}

/// Arguments render with `Display`, so a `Bool` reads `true`/`false`.
fn describe_call(args: &[Value], body: &str) -> Result<Value> {
    let mut report = format!("Executing function with {} parameters\n", args.len());
    for (idx, arg) in args.iter().enumerate() {
        let _ = writeln!(report, "Parameter {idx}: {arg}");
    }
    report.push_str("Function body: ");
    report.push_str(body);
    Ok(Value::string(report))
}

pub fn log(message: &str) {
    println!("{message}");
}

pub fn error(message: &str) {
    eprintln!("Error: {message}");
}
