//! Request validation.
//!
//! A generation run covers exactly one protobuf package living in one
//! directory. These checks run before collection so that a misconfigured
//! request fails without building any model.

use crate::error::{ResultExt, SchemaError};
use prost_types::{DescriptorProto, FileDescriptorProto};

/// Package and directory shared by the files requested for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTarget {
    /// Protobuf package.
    pub package: String,
    /// Directory of the proto files, `.` for root-level files.
    pub directory: String,
}

/// Returns the descriptors of the files requested for generation, in request
/// order.
///
/// # Errors
/// Returns `SchemaError::Config` if nothing is requested or a requested file
/// has no descriptor.
pub fn select_input_files<'a>(
    files_to_generate: &[String],
    proto_files: &'a [FileDescriptorProto],
) -> Result<Vec<&'a FileDescriptorProto>, SchemaError> {
    if files_to_generate.is_empty() {
        return Err(SchemaError::config("no files to generate"));
    }

    files_to_generate
        .iter()
        .map(|name| {
            proto_files
                .iter()
                .find(|fd| fd.name() == name)
                .ok_or_else(|| SchemaError::config(format!("no descriptor for file '{name}'")))
        })
        .collect()
}

/// Checks that all input files share one non-empty package and one
/// directory.
///
/// # Errors
/// Returns `SchemaError::Config` naming the two conflicting values, or the
/// file when the package is empty.
pub fn validate_package(files: &[&FileDescriptorProto]) -> Result<PackageTarget, SchemaError> {
    let Some(first) = files.first() else {
        return Err(SchemaError::config("no files to generate"));
    };

    let package = first.package().to_string();
    let directory = proto_directory(first.name()).to_string();

    for fd in &files[1..] {
        if fd.package() != package {
            return Err(SchemaError::config(format!(
                "cannot process multiple files with different proto packages: '{}' and '{}'",
                package,
                fd.package()
            )));
        }

        let dir = proto_directory(fd.name());
        if dir != directory {
            return Err(SchemaError::config(format!(
                "cannot process multiple files from different directories: '{directory}' and '{dir}'"
            )));
        }
    }

    if package.is_empty() {
        return Err(SchemaError::config(format!(
            "file '{}' declares no package, which names the generated module",
            first.name()
        )));
    }

    Ok(PackageTarget { package, directory })
}

/// Rejects `extend` declarations in the given files.
///
/// # Errors
/// Returns `SchemaError::Unsupported` for the first extension found.
pub fn reject_extensions(files: &[&FileDescriptorProto]) -> Result<(), SchemaError> {
    for fd in files {
        check_extensions(&fd.extension, None)
            .and_then(|()| {
                fd.message_type
                    .iter()
                    .try_for_each(|d| check_message_extensions(d, d.name()))
            })
            .context_with(|| format!("in file {} of package {}", fd.name(), fd.package()))?;
    }
    Ok(())
}

/// Rejects fields with an explicit `[default = ...]` in the given files.
///
/// Only requested files are checked: imported files such as
/// `google/protobuf/descriptor.proto` may declare defaults.
///
/// # Errors
/// Returns `SchemaError::Unsupported` for the first such field.
pub fn reject_default_values(files: &[&FileDescriptorProto]) -> Result<(), SchemaError> {
    for fd in files {
        fd.message_type
            .iter()
            .try_for_each(|d| check_message_defaults(d, d.name()))
            .context_with(|| format!("in file {} of package {}", fd.name(), fd.package()))?;
    }
    Ok(())
}

fn check_message_defaults(d: &DescriptorProto, full_name: &str) -> Result<(), SchemaError> {
    if let Some(field) = d.field.iter().find(|f| f.default_value.is_some()) {
        return Err(SchemaError::unsupported(
            "default value for field",
            format!("{full_name}.{}", field.name()),
        ));
    }
    for nested in &d.nested_type {
        check_message_defaults(nested, &format!("{full_name}.{}", nested.name()))?;
    }
    Ok(())
}

fn check_message_extensions(d: &DescriptorProto, full_name: &str) -> Result<(), SchemaError> {
    check_extensions(&d.extension, Some(full_name))?;
    for nested in &d.nested_type {
        check_message_extensions(nested, &format!("{full_name}.{}", nested.name()))?;
    }
    Ok(())
}

fn check_extensions(
    extensions: &[prost_types::FieldDescriptorProto],
    scope: Option<&str>,
) -> Result<(), SchemaError> {
    match (extensions.first(), scope) {
        (None, _) => Ok(()),
        (Some(ext), None) => Err(SchemaError::unsupported("extension field", ext.name())),
        (Some(ext), Some(scope)) => Err(SchemaError::unsupported(
            "extension field",
            format!("{scope}.{}", ext.name()),
        )),
    }
}

/// Returns the directory part of a proto path, `.` if there is none.
#[must_use]
pub fn proto_directory(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}
