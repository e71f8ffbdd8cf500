use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use abnt_docx::{Document, Error, ExportOptions, render, structure};

#[derive(Parser)]
#[command(
    name = "abnt-docx",
    version,
    about = "Number, paginate and export block-based academic documents as ABNT-formatted DOCX"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the document as a .docx file.
    Export(ExportArgs),
    /// Print the numbered table of contents with estimated pages.
    Toc {
        /// Document JSON.
        input: PathBuf,
        /// Print the entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Report missing metadata and skipped heading levels.
    Check {
        /// Document JSON.
        input: PathBuf,
        /// Check for an export without the title page; advisors are then optional.
        #[arg(long)]
        no_title_page: bool,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Document JSON.
    input: PathBuf,

    /// Output file or directory (default: <title>.docx in the current directory).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Skip the title page; advisors are then optional.
    #[arg(long)]
    no_title_page: bool,

    /// Insert a SUMÁRIO page before the body.
    #[arg(long)]
    toc: bool,

    /// Leave the body header without a page number.
    #[arg(long)]
    no_page_numbers: bool,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            with_title_page: !self.no_title_page,
            include_table_of_contents: self.toc,
            page_numbers: !self.no_page_numbers,
            ..ExportOptions::default()
        }
    }
}

fn load(input: &Path) -> Result<Document, Error> {
    let json = std::fs::read_to_string(input).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {e}", input.display())))
    })?;
    Document::from_json(&json)
}

fn export(args: &ExportArgs) -> Result<(), Error> {
    let document = load(&args.input)?;
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = abnt_docx::export_to_path(&document, &args.options(), &output)?;
    println!("Exported {}", path.display());
    Ok(())
}

fn toc(input: &Path, json: bool) -> Result<(), Error> {
    let document = load(input)?;
    let structure = structure::synthesize_with(
        &document.blocks,
        &ExportOptions::default().pagination(),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&structure.table_of_contents)?);
        return Ok(());
    }
    for entry in &structure.table_of_contents {
        let indent = "  ".repeat(usize::from(entry.level.get() - 1));
        println!("{indent}{} {} .... {}", entry.numbering, entry.title.trim(), entry.page);
    }
    Ok(())
}

fn check(input: &Path, no_title_page: bool) -> Result<bool, Error> {
    let document = load(input)?;
    let options = ExportOptions {
        with_title_page: !no_title_page,
        ..ExportOptions::default()
    };
    let structure = structure::synthesize_with(&document.blocks, &options.pagination());

    let mut ok = true;
    if let Err(e) = render::validate(&document.metadata, &options) {
        println!("{e}");
        ok = false;
    }
    for warning in abnt_docx::validate_hierarchy(&structure.blocks) {
        println!("warning: {warning}");
    }
    if ok {
        println!(
            "{} blocks, {} table of contents entries",
            structure.blocks.len(),
            structure.table_of_contents.len()
        );
    }
    Ok(ok)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Export(args) => export(args).map(|()| true),
        Command::Toc { input, json } => toc(input, *json).map(|()| true),
        Command::Check { input, no_title_page } => check(input, *no_title_page),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
