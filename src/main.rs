//! Paged-Doc CLI (for inspecting documents)
//! The main interface is through WASM bindings.
//!
//! Usage: paged-doc <document.html> [options.json]
//!
//! Prints the visual descriptor of every page as JSON. Set `RUST_LOG=warn`
//! to see attribute diagnostics.

use paged_doc::{PageEditor, PaginationOptions};
use std::process::ExitCode;

fn run(doc_path: &str, options_path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(doc_path)?;
    let options = match options_path {
        Some(path) => PaginationOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => PaginationOptions::default(),
    };

    let editor = PageEditor::from_html(&html, options)?;
    log::info!("Loaded {} with {} pages", doc_path, editor.page_count());

    Ok(serde_json::to_string_pretty(&editor.page_visuals())?)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(doc_path) = args.get(1) else {
        eprintln!("Usage: paged-doc <document.html> [options.json]");
        return ExitCode::FAILURE;
    };

    match run(doc_path, args.get(2).map(String::as_str)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
