//! Erlang code generation modules.

pub mod header;
pub mod module;

pub use header::HeaderGenerator;
pub use module::ModuleGenerator;

/// Comment block opening every generated file.
#[must_use]
pub fn banner(package: &str) -> String {
    format!("%%% Generated from protobuf package {package}.\n%%% DO NOT EDIT.\n")
}

/// Renders `-export_type([...]).` for zero-arity types.
pub(crate) fn export_types<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let items: Vec<String> = names
        .into_iter()
        .map(|name| format!("  {}/0", erlproto_schema::naming::quote_atom(name)))
        .collect();

    if items.is_empty() {
        "-export_type([]).\n".to_string()
    } else {
        format!("-export_type([\n{}\n]).\n", items.join(",\n"))
    }
}
