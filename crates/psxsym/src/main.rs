use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use psxsym_core::symbols::{FileHeader, SymbolReader};
use psxsym_core::{listing, Declarations, Result as SymResult, SymError, SymFile, Symbol};
use psxsym_utils::{debug, info, init_logging_with_config, LogConfig, LogFormat, LogLevel};

/// Dump PlayStation MND symbol tables and recover C declarations from them.
#[derive(Parser, Debug)]
#[command(name = "psxsym")]
#[command(version)]
#[command(about = "Dump PlayStation MND symbol tables and recover C declarations from them", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, value_parser = LogLevel::from_str)]
    log_level: Option<LogLevel>,

    /// Log format: pretty or json (overrides PSXSYM_LOG_FORMAT)
    #[arg(long, global = true, value_parser = LogFormat::from_str)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Print every record, one per line
    Dump(Input),
    /// Print the struct, union, enum, typedef and global declarations
    Decls(Input),
}

#[derive(Args, Debug)]
struct Input
{
    /// Path to the .SYM file
    file: PathBuf,
    /// Input is a bare record stream without the MND header
    #[arg(long, default_value_t = false)]
    raw: bool,
}

fn main()
{
    let cli = Cli::parse();

    let mut config = LogConfig::from_env();
    if let Some(level) = cli.log_level {
        config = config.with_level(level);
    }
    if let Some(format) = cli.log_format {
        config = config.with_format(format);
    }
    let _guard = match init_logging_with_config(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    // Record errors already name the record index and offset.
    if let Err(e) = run_command(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Commands) -> SymResult<()>
{
    match command {
        Commands::Dump(input) => {
            let (symbols, result) = decode(&input.file, input.raw)?;
            let mut out = String::new();
            // Writing into a String cannot fail.
            let _ = listing::dump(&symbols, &mut out);
            emit(&out)?;
            result
        }
        Commands::Decls(input) => {
            let (symbols, result) = decode(&input.file, input.raw)?;
            let decls = Declarations::from_symbols(&symbols);
            info!(
                types = decls.types.len(),
                typedefs = decls.typedefs.len(),
                variables = decls.variables.len(),
                "collected declarations"
            );
            let mut out = String::new();
            let _ = listing::declarations(&decls, &mut out);
            emit(&out)?;
            result
        }
    }
}

/// Decode as many records as possible.
///
/// Header and I/O errors fail outright. A record error is returned alongside
/// the symbols decoded before it, so the caller can still print them.
fn decode(path: &Path, raw: bool) -> SymResult<(Vec<Symbol>, SymResult<()>)>
{
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), raw, "read input");

    let reader = if raw {
        SymbolReader::new(&data)
    } else {
        let header = FileHeader::parse(&data)?;
        info!(version = header.version, unit = header.unit, "symbol file header");
        SymFile::records(&data)?
    };

    let mut symbols = Vec::new();
    for symbol in reader {
        match symbol {
            Ok(symbol) => symbols.push(symbol),
            Err(err) => {
                info!(symbols = symbols.len(), "decoding stopped early");
                return Ok((symbols, Err(err)));
            }
        }
    }
    info!(symbols = symbols.len(), "decoded symbol table");
    Ok((symbols, Ok(())))
}

fn emit(text: &str) -> SymResult<()>
{
    let mut stdout = io::stdout().lock();
    match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(SymError::from),
    }
}
