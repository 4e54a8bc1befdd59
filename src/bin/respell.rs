//! Respell CLI entry point.

use std::env;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    word: Option<String>,
    file: Option<PathBuf>,
    print_ast: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--ast" => config.print_ast = true,
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("unknown option: {arg}").into());
            }
            value if config.word.is_none() => config.word = Some(value.to_string()),
            value if config.file.is_none() => config.file = Some(PathBuf::from(value)),
            value => {
                return Err(format!("unexpected argument: {value}").into());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("respell {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(word) = config.word else {
        return Err("missing required <WORD> argument (try --help)".into());
    };

    let source = match &config.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if config.print_ast {
        let program = respell_rename::rename_program(&source, &word)?;
        println!("{program:#?}");
    } else {
        let output = respell_rename::rename(&source, &word)?;
        println!("{output}");
    }

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mRespell\x1b[0m - Collision-free variable respelling

\x1b[1mUSAGE:\x1b[0m
    respell [OPTIONS] <WORD> [FILE]

\x1b[1mARGUMENTS:\x1b[0m
    <WORD>    Word to spell with the program's local variable names
    [FILE]    Source file to rework (reads stdin when omitted)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    --ast            Print the renamed syntax tree instead of source text

\x1b[1mEXAMPLES:\x1b[0m
    respell isogram analytics.js     Rename analytics.js locals to spell \"isogram\"
    respell xyz < snippet.js         Read from stdin
    respell --ast word script.js     Inspect the mutated tree

For more information, visit https://github.com/respell-tools/respell"
    );
}
