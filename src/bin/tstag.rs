//! tstag CLI — hex record <-> JSON conversion.

use clap::{Args, Parser, Subcommand};
use std::io::{IsTerminal, Read};
use std::process;
use tracing_subscriber::EnvFilter;
use tstag::{CodecOptions, Entries, Record, TagValue};

#[derive(Parser)]
#[command(name = "tstag", about = "Decode/encode TSTag binary records (hex <-> JSON)")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a hex record to JSON
    Decode(DecodeArgs),
    /// Encode a JSON record to hex
    Encode(InputArgs),
    /// Decode, re-encode and report whether the input is canonical
    Check(DecodeArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Inline input (hex for decode/check, JSON for encode)
    #[arg(conflicts_with = "input")]
    data: Option<String>,

    /// Input file (- for stdin)
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Args)]
struct DecodeArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Pretty-printed JSON output
    #[arg(long)]
    pretty: bool,

    /// Reject varints longer than 64 bits instead of truncating them
    #[arg(long)]
    strict: bool,

    /// Maximum declared text length in bytes
    #[arg(long)]
    max_text_length: Option<u32>,
}

impl DecodeArgs {
    fn to_options(&self) -> CodecOptions {
        let mut opts = CodecOptions::default();
        opts.set_strict(self.strict);
        opts.set_max_text_length(self.max_text_length);
        opts
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Fehler: {e}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Decode(args) => run_decode(args),
        Command::Encode(args) => run_encode(args),
        Command::Check(args) => run_check(args),
    }
}

fn read_input(args: &InputArgs) -> Result<String, String> {
    if let Some(data) = &args.data {
        return Ok(data.clone());
    }
    match args.input.as_deref() {
        Some("-") | None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Lese von stdin (Ctrl+D zum Beenden)...");
            }
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Lesefehler (stdin): {e}"))?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("Lesefehler '{path}': {e}")),
    }
}

fn read_hex_input(args: &InputArgs) -> Result<Vec<u8>, String> {
    let text = read_input(args)?;
    tstag::hex::decode(&text).map_err(|e| e.to_string())
}

fn run_decode(args: DecodeArgs) -> Result<(), String> {
    let bytes = read_hex_input(&args.source)?;
    let record = tstag::decode_with_options(&bytes, args.to_options()).map_err(|e| e.to_string())?;
    if record.is_empty() {
        log::info!("input decoded to an empty record");
    }
    let json = tstag::json::to_json_string(&record, args.pretty).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn run_encode(args: InputArgs) -> Result<(), String> {
    let text = read_input(&args)?;
    let record = tstag::json::from_json_str(&text).map_err(|e| e.to_string())?;
    let bytes = tstag::encode(&record).map_err(|e| e.to_string())?;
    println!("{}", tstag::hex::encode(&bytes));
    Ok(())
}

fn run_check(args: DecodeArgs) -> Result<(), String> {
    let bytes = read_hex_input(&args.source)?;
    let options = args.to_options();

    // Ein Durchlauf: Eintraege ausgeben und dabei den Record aufbauen (last write wins).
    let mut record = Record::new();
    for entry in Entries::with_options(&bytes, options) {
        let (index, value) = entry.map_err(|e| e.to_string())?;
        println!("Index {index} Type: {} Value: {}", value.tag_type().code(), display_value(&value));
        if record.insert(index, value).is_some() {
            log::info!("index {index} repeated, later entry wins");
        }
    }

    let encoded = tstag::encode(&record).map_err(|e| e.to_string())?;
    let input_hex = tstag::hex::encode(&bytes);
    let output_hex = tstag::hex::encode(&encoded);
    println!("Hex:");
    println!("{output_hex}");
    if input_hex == output_hex {
        println!("Equal: yes");
        Ok(())
    } else {
        println!("Equal: no");
        Err("Eingabe ist nicht kanonisch (Re-Encode weicht ab)".into())
    }
}

fn display_value(value: &TagValue) -> String {
    match value {
        TagValue::Integer(v) => v.to_string(),
        TagValue::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) => format!("{s:?}"),
            Err(_) => format!("0x{}", tstag::hex::encode(bytes)),
        },
    }
}
