//! CLI entry point for the avr-sim binary.
//!
//! Loads a raw program-memory image, runs the machine to its halt loop,
//! and prints the register and stack dumps to stdout.

use std::env;
use std::error::Error;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process;

use simulator_core::{Machine, NullPeripheral, Simulator, UsiShifter};

const HELP_TEXT: &str = "Usage: avr-sim <image> [--usi] [--help]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    image: PathBuf,
    usi: bool,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut image: Option<PathBuf> = None;
    let mut usi = false;

    for arg in args {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }

        if arg == "--usi" {
            usi = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if image.is_some() {
            return Err(String::from("multiple image paths provided"));
        }
        image = Some(PathBuf::from(arg));
    }

    let image = image.ok_or_else(|| String::from("missing image path"))?;
    Ok(ParseResult::Args(CliArgs { image, usi }))
}

fn run(args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let simulator = Simulator::new()?;
    let mut machine = Machine::new();
    machine.load_image_from_file(&args.image)?;

    if args.usi {
        let mut shifter = UsiShifter::new(io::stdout());
        simulator.run_until_halt(&mut machine, &mut shifter);
    } else {
        simulator.run_until_halt(&mut machine, &mut NullPeripheral);
    }

    print!("{}", machine.dump_registers());
    print!("{}", machine.dump_stack());
    Ok(())
}

fn main() {
    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
        }
        Ok(ParseResult::Args(args)) => {
            if let Err(error) = run(&args) {
                eprintln!("error: {error}");
                process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            process::exit(1);
        }
    }
}
