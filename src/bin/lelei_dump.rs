//! Parse XML protocol definitions and print the resulting AST.
//!
//! Usage:
//!   lelei_dump [OPTIONS] [FILE.xml ...]
//!   lelei_dump < file.xml
//!
//! Every file is parsed even when an earlier one fails; the exit code is 1 if any failed.
//!
//! Options:
//!   --debug, -d  Print the AST with `{:#?}` instead of the tree view
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `lelei=info`).

use lelei::dump::format_document;
use lelei::{parse, ParseError};
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
enum OutputStyle {
    Tree,
    Debug,
}

/// Parse one source and print it; returns false on failure.
fn dump(label: &str, src: &str, style: OutputStyle) -> bool {
    match parse(src) {
        Ok(doc) => {
            tracing::info!(
                source = label,
                proto = %doc.proto.proto_name,
                fields = doc.structure.fields.len(),
                "parsed"
            );
            match style {
                OutputStyle::Tree => {
                    println!("{}:", label);
                    print!("{}", format_document(&doc));
                }
                OutputStyle::Debug => println!("{}: {:#?}", label, doc),
            }
            true
        }
        Err(e) => {
            let kind = match &e {
                ParseError::Structural(_) => "structural",
                ParseError::Value(_) => "value",
            };
            tracing::debug!(source = label, kind, "parse failed");
            eprintln!("{}: {}", label, e);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lelei=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let style = if let Some(pos) = args.iter().position(|a| a == "--debug" || a == "-d") {
        args.remove(pos);
        OutputStyle::Debug
    } else {
        OutputStyle::Tree
    };

    let mut failed = 0usize;
    if args.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        if !dump("<stdin>", &src, style) {
            failed += 1;
        }
    } else {
        for path in &args {
            let path = Path::new(path);
            let src = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    failed += 1;
                    continue;
                }
            };
            if !dump(&path.display().to_string(), &src, style) {
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("lelei_dump: {} document(s) failed", failed);
        std::process::exit(1);
    }
    Ok(())
}
