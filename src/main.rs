//! # wa2mm CLI
//!
//! Command-line interface for the wa2mm library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;

use wa2mm::ConvertError;
use wa2mm::cli::Args;
use wa2mm::config::{ConvertConfig, parse_mappings};
use wa2mm::emitter::JsonlEmitter;
use wa2mm::maps::{EmojiMap, PhoneMap, UserMap};
use wa2mm::parser::TranscriptParser;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ConvertError> {
    let total_start = Instant::now();
    let args = Args::parse();

    // Print header
    println!("📦 wa2mm v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:    {}", args.input);
    println!("💾 Output:   {}", args.output);
    println!("🏷️  Target:   {}/{}", args.team, args.channel);
    if let Some(ref dir) = args.media_dir {
        println!("🖼️  Media:    {}", dir);
    }
    println!();

    let config =
        ConvertConfig::new(&args.team, &args.channel)?.with_max_message_length(args.max_length);

    // Build identity maps up front; conversion reads them only.
    let mut users = UserMap::new();
    for (name, username) in parse_mappings(&args.users) {
        users.add(name, username);
    }
    let mut phones = PhoneMap::new();
    for (phone, username) in parse_mappings(&args.phones) {
        phones.add(phone, username);
    }
    let mut emojis = EmojiMap::new();
    for (emoji, shortcode) in parse_mappings(&args.emojis) {
        emojis.add(emoji, shortcode);
    }
    println!(
        "🗺️  Mappings: {} users, {} phones, {} emoji",
        users.count(),
        phones.count(),
        emojis.count()
    );

    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let posts = TranscriptParser::new().parse(Path::new(&args.input))?;
    println!(
        "   Found {} posts ({:.2}s)",
        posts.len(),
        parse_start.elapsed().as_secs_f64()
    );

    println!("🔀 Converting...");
    let convert_start = Instant::now();
    let conversion = JsonlEmitter::new(&config).emit(&posts, &users, &phones, &emojis)?;
    println!(
        "   Emitted {} records ({:.2}s)",
        conversion.records.len(),
        convert_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing JSONL...");
    fs::write(&args.output, conversion.to_jsonl()?)?;

    if let Some(ref dir) = args.media_dir {
        let missing = conversion.missing_media(Path::new(dir));
        if !missing.is_empty() {
            println!();
            println!("⚠️  {} referenced media file(s) missing from {}:", missing.len(), dir);
            for path in &missing {
                println!("   {}", path);
            }
        }
    }

    let report = &conversion.report;
    if !report.is_clean() {
        println!();
        println!("⚠️  {} identity lookup(s) fell back:", report.misses.len());
        for miss in &report.misses {
            println!("   {}", miss);
        }
    }

    println!();
    println!("✅ Done! Output saved to {}", args.output);
    println!();
    println!("📊 Summary:");
    println!("   Posts:      {}", report.posts);
    println!("   Fragments:  {}", report.fragments);
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
