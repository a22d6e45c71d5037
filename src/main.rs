//! # chatarchive CLI
//!
//! Command-line interface for the chatarchive library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::{info, warn};

use chatarchive::ArchiveError;
use chatarchive::cli::Args;
use chatarchive::core::{ArchiveDocument, OutputConfig, SourceInfo};
use chatarchive::format::{OutputFormat, write_to_format};
use chatarchive::parser::Parser;
use chatarchive::parsers::WhatsAppParser;

fn main() {
    let args = <Args as ClapParser>::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_level()),
    )
    .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ArchiveError> {
    let total_start = Instant::now();
    let config = args.archive_config()?;
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    info!("chatarchive v{}", env!("CARGO_PKG_VERSION"));
    info!("input: {}", args.input);
    info!("output: {} ({})", output_path, format);

    let parser = WhatsAppParser::with_config(config.parser.clone())?;
    info!("parsing {} export...", parser.name());
    let parse_start = Instant::now();
    let input = Path::new(&args.input);
    let messages = parser.parse(input)?;
    info!(
        "found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if messages.is_empty() {
        warn!("{} contains no messages", args.input);
    }

    let doc = ArchiveDocument::build(SourceInfo::from_path(input), messages, &config);
    info!(
        "{} groups, {} senders, {} attachments",
        doc.stats.group_count,
        doc.stats.sender_count,
        doc.stats.media.attachments()
    );

    let write_start = Instant::now();
    write_to_format(&doc, &output_path, format, &OutputConfig::new())?;
    info!("written in {:.2}s", write_start.elapsed().as_secs_f64());

    print_summary(&doc, &output_path, total_start.elapsed().as_secs_f64());
    Ok(())
}

fn print_summary(doc: &ArchiveDocument, output_path: &str, seconds: f64) {
    let stats = &doc.stats;

    println!("Done! Output saved to {}", output_path);
    println!();
    println!("Summary:");
    println!("   Messages:  {}", stats.message_count);
    println!("   Groups:    {}", stats.group_count);
    println!("   Senders:   {}", stats.sender_count);
    println!("   System:    {}", stats.system_message_count);
    println!(
        "   Media:     {} images, {} audio, {} video, {} files, {} locations, {} missed calls",
        stats.media.image,
        stats.media.audio,
        stats.media.video,
        stats.media.generic_file,
        stats.media.location_share,
        stats.media.missed_call
    );
    println!("   Time:      {:.2}s", seconds);
}
