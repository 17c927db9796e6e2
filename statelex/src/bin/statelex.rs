use clap::Parser as ClapParser;
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    process,
};

use log::info;
use statelex::{LexerConfig, Token, lisp::LispLexer};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to tokenize in order
    #[arg(required = false, help = "Input files, stdin when none are given")]
    files: Vec<PathBuf>,

    /// Lex on a background thread
    #[arg(long, help = "Run the lexer on its own thread")]
    threaded: bool,

    /// Capacity of the buffered reader, in bytes
    #[arg(long, default_value_t = LexerConfig::default().read_buffer_size)]
    read_buffer: usize,
}

/// Print tokens until the end of the stream. Returns false on a lex error.
fn print_tokens(name: &str, tokens: impl Iterator<Item = Token>) -> bool {
    for token in tokens {
        match token.err() {
            Some(err) if err.is_eof() => {
                println!("Done reading {}!", name);
                return true;
            }
            Some(err) => {
                eprintln!("error: {}: {}", name, err);
                return false;
            }
            None => println!("{}", token),
        }
    }
    true
}

fn run(name: &str, reader: Box<dyn Read + Send>, cli: &Cli) -> bool {
    let config = LexerConfig {
        read_buffer_size: cli.read_buffer,
        ..Default::default()
    };
    let lexer = LispLexer::with_config(reader, config);
    if cli.threaded {
        print_tokens(name, lexer.into_inner().spawn())
    } else {
        print_tokens(name, lexer)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.files.is_empty() {
        if !run("stdin", Box::new(io::stdin()), &cli) {
            process::exit(1);
        }
        return;
    }

    for path in &cli.files {
        let name = path.display().to_string();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("Error reading file '{}': {}", name, err);
                process::exit(1);
            }
        };
        info!("tokenizing {}", name);
        if !run(&name, Box::new(file), &cli) {
            process::exit(1);
        }
    }
}
