//! Command-line driver for the Cusp toolchain.
//!
//! `translate` lowers a source file to a `.curp` operation list, `execute`
//! runs a compiled program on the simulated machine, and `generate-schema`
//! dumps the JSON Schema of the compiled-program format. All file handling
//! and JSON serialization lives here; the library crates never touch disk.

mod schema;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::debug;

use cvm::constants::DATA_MEMORY_SIZE;
use cvm::operations::Operation;
use cvm::{ControlUnit, DataPath, Word};

#[derive(Debug, Parser)]
#[command(name = "cex", version, about = "Translate and execute Cusp programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate a Cusp source file into a compiled operation list
    Translate {
        /// Path to the source file
        source: PathBuf,
        /// Path for the compiled output (defaults to the source with .curp)
        output: Option<PathBuf>,
        /// Also save the parsed symbols next to the source, with .cpar
        #[arg(long)]
        save_parsed: bool,
    },
    /// Run a compiled program on the simulated machine
    Execute {
        /// Path to the compiled program
        program: PathBuf,
        /// File whose characters feed the input device
        input: Option<PathBuf>,
        /// Path for the decoded output (defaults to stdout)
        output: Option<PathBuf>,
        /// Save the execution log next to the program, with .clog
        #[arg(long)]
        save_log: bool,
    },
    /// Write the JSON Schema of the compiled-program format
    GenerateSchema {
        /// Output path (defaults to docs/operation-schema.json)
        path: Option<PathBuf>,
    },
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Parse(cusp::ParseError),
    Translation(cusp::TranslationFailure),
    Json(serde_json::Error, PathBuf),
    Execution(cvm::ExecutionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error, path) => {
                write!(f, "Accessing \"{}\" failed: {}", path.display(), error)
            }
            Error::Parse(error) => write!(f, "Parsing error occurred: {}", error),
            Error::Translation(failure) => write!(f, "{}", failure),
            Error::Json(error, path) => {
                write!(f, "Bad JSON in \"{}\": {}", path.display(), error)
            }
            Error::Execution(error) => write!(f, "Execution error occurred: {}", error),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Translate {
            source,
            output,
            save_parsed,
        } => translate(&source, output, save_parsed),
        Command::Execute {
            program,
            input,
            output,
            save_log,
        } => execute(&program, input, output, save_log),
        Command::GenerateSchema { path } => generate_schema(path),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let text =
        serde_json::to_string_pretty(value).map_err(|error| Error::Json(error, path.to_owned()))?;
    fs::write(path, text).map_err(|error| Error::Io(error, path.to_owned()))
}

fn translate(source: &Path, output: Option<PathBuf>, save_parsed: bool) -> Result<(), Error> {
    let code =
        fs::read_to_string(source).map_err(|error| Error::Io(error, source.to_owned()))?;

    let symbols = cusp::parse(&code).map_err(Error::Parse)?;
    println!("Parsing successful");

    if save_parsed {
        let parsed_path = source.with_extension("cpar");
        write_json(&parsed_path, &symbols)?;
        println!("Parsing result saved to {}", parsed_path.display());
    }

    let operations = cusp::translate_symbols(symbols).map_err(Error::Translation)?;
    debug!("translated {} operations", operations.len());

    let output_path = output.unwrap_or_else(|| source.with_extension("curp"));
    write_json(&output_path, &operations)?;
    println!("Compilation successful");
    println!("Result has been saved to {}", output_path.display());
    Ok(())
}

fn execute(
    program: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    save_log: bool,
) -> Result<(), Error> {
    let text =
        fs::read_to_string(program).map_err(|error| Error::Io(error, program.to_owned()))?;
    let operations: Vec<Operation> =
        serde_json::from_str(&text).map_err(|error| Error::Json(error, program.to_owned()))?;

    let input_data: Vec<Word> = match &input {
        Some(path) => fs::read_to_string(path)
            .map_err(|error| Error::Io(error, path.clone()))?
            .chars()
            .map(|character| character as Word)
            .collect(),
        None => Vec::new(),
    };

    let mut control = ControlUnit::new(DataPath::new(DATA_MEMORY_SIZE, operations, input_data));
    let outcome = control.run();
    debug!("executed {} cycles", control.log().len().saturating_sub(1));

    // The log of a failed run always ends with the crashing cycle; keep it
    // around even without the flag.
    if save_log || outcome.is_err() {
        write_json(&program.with_extension("clog"), &control.log())?;
    }
    outcome.map_err(Error::Execution)?;

    let decoded: String = control
        .data_path()
        .output()
        .iter()
        .map(|&value| {
            std::char::from_u32(value as u32).unwrap_or(std::char::REPLACEMENT_CHARACTER)
        })
        .collect();

    match output {
        Some(path) => {
            fs::write(&path, decoded).map_err(|error| Error::Io(error, path.clone()))?;
            println!("Output has been saved to {}", path.display());
        }
        None => print!("{}", decoded),
    }
    Ok(())
}

fn generate_schema(path: Option<PathBuf>) -> Result<(), Error> {
    let path = path.unwrap_or_else(|| PathBuf::from("docs/operation-schema.json"));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|error| Error::Io(error, parent.to_owned()))?;
        }
    }
    write_json(&path, &schema::operation_schema())?;
    println!("Schema has been saved to {}", path.display());
    Ok(())
}
