//! `protoc-gen-erlproto`: reads a `CodeGeneratorRequest` on stdin and writes
//! the `CodeGeneratorResponse` on stdout.

use anyhow::Context;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("cannot read code generator request")?;

    let output = erlproto::plugin::run(&input)?;
    tracing::debug!("response of {} bytes", output.len());

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output)
        .and_then(|()| stdout.flush())
        .context("cannot write code generator response")?;

    Ok(())
}
