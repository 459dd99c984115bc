//! Local markdown <-> ADF conversion

use std::io::Read;
use std::path::PathBuf;

use jiramcp_core::adf::{markdown_to_adf, render_adf};

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "adf")]
#[command(about = "Convert between markdown and Atlassian Document Format")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Convert markdown to ADF JSON
    #[clap(name = "convert")]
    Convert(ConvertOptions),

    /// Render ADF JSON as readable text
    #[clap(name = "render")]
    Render(RenderOptions),
}

#[derive(Debug, clap::Args)]
pub struct ConvertOptions {
    /// Markdown file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Print compact JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, clap::Args)]
pub struct RenderOptions {
    /// ADF JSON file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .wrap_err("Failed to read stdin")?;
            Ok(input)
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Convert(options) => {
            let markdown = read_input(options.file.as_ref())?;
            let document = markdown_to_adf(&markdown);

            if global.verbose {
                eprintln!(
                    "Converted {} bytes of markdown into {} top-level blocks",
                    markdown.len(),
                    document.content.len()
                );
            }

            let output = if options.compact {
                serde_json::to_string(&document)?
            } else {
                serde_json::to_string_pretty(&document)?
            };
            println!("{output}");
        }
        Commands::Render(options) => {
            let input = read_input(options.file.as_ref())?;
            let value: serde_json::Value =
                serde_json::from_str(&input).wrap_err("Input is not valid JSON")?;

            match render_adf(&value) {
                Some(text) => println!("{text}"),
                None if global.verbose => eprintln!("Document has no text content"),
                None => {}
            }
        }
    }

    Ok(())
}
