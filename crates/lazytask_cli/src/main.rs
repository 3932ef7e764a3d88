//! Interactive shell for the LazyTask assistant.
//!
//! # Responsibility
//! - Read command lines from stdin and print core responses.
//! - Keep all command semantics inside `lazytask_core`.

use clap::Parser;
use lazytask_core::{core_version, default_log_level, init_logging, LineFileStore, Session};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Single-user task-tracking assistant.
#[derive(Parser, Debug)]
#[command(name = "lazytask", version, about = "Single-user task-tracking assistant")]
struct Cli {
    /// Backing file for persisted tasks.
    #[arg(long, env = "LAZYTASK_DATA_PATH", default_value = "data/tasks.txt")]
    data_file: PathBuf,

    /// Directory for rolling log files; file logging is off when absent.
    #[arg(long, env = "LAZYTASK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level for file logs.
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("Warning: file logging is disabled ({err}).");
        }
    }
    info!(
        "event=app_start module=cli status=ok core_version={}",
        core_version()
    );

    let (mut session, load_notice) = Session::start(LineFileStore::new(cli.data_file));
    if let Some(notice) = load_notice {
        println!("{notice}");
    }

    println!("Hello! I'm LazyTask.");
    println!("What can I do for you?");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("Failed to read input: {err}");
                break;
            }
        }

        let response = session.process_command(&line);
        println!("{}", response.text);
        if response.exit {
            break;
        }
    }
}
