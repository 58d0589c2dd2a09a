//! ictkv Interactive Shell
//!
//! Menu-driven client holding one session open for its whole run.

use std::io::{self, BufRead, Lines, Write};

use clap::Parser;
use ictkv::protocol::{decode_value, encode_command, Command};
use ictkv::table::{Field, MAX_FIELD_LEN};
use ictkv::{Config, Engine, OverflowPolicy, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// ictkv Shell
#[derive(Parser, Debug)]
#[command(name = "ictkv-shell")]
#[command(about = "Interactive client for the ictkv device")]
#[command(version)]
struct Args {
    /// Device name used in log lines
    #[arg(short, long, default_value = "ictredis")]
    device: String,

    /// Number of table slots
    #[arg(short, long, default_value = "50")]
    capacity: usize,

    /// Behavior of PUSH on a full table (reset, reject, evict-oldest)
    #[arg(short, long, default_value = "reset")]
    overflow: OverflowPolicy,
}

fn main() {
    // Logs go to stderr so they don't interleave with the menu
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ictkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .device_name(&args.device)
        .capacity(args.capacity)
        .overflow_policy(args.overflow)
        .build();

    let engine = match Engine::new(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to create engine: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = match engine.open() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open the device: {}", e);
            std::process::exit(1);
        }
    };
    println!("Opened {} device successfully", args.device);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(action) = prompt(&mut lines, "Choose an action: ") else {
            break;
        };

        match action.trim() {
            "1" => {
                let Some((key, value)) = prompt_key_value(&mut lines) else { continue };
                send(&mut session, Command::Push { key, value }, "Written successfully");
            }
            "2" => {
                let Some(key) = prompt_field(&mut lines, "Enter the key you want to read: ") else {
                    continue;
                };
                lookup(&mut session, key);
            }
            "3" => {
                let Some((key, value)) = prompt_key_value(&mut lines) else { continue };
                send(&mut session, Command::Edit { key, value }, "Edited successfully");
            }
            "4" => {
                let Some(key) = prompt_field(&mut lines, "Enter the key you want to delete: ") else {
                    continue;
                };
                send(&mut session, Command::Delete { key }, "Deleted successfully");
            }
            "5" => {
                if session.is_empty() {
                    println!("(empty)");
                }
                for (index, entry) in session.entries().enumerate() {
                    println!("{:>2}: {} = {}", index, entry.key, entry.value);
                }
            }
            "6" => break,
            _ => println!("Invalid action"),
        }
    }

    println!("Exit");
    session.close();
}

fn print_menu() {
    println!();
    println!("+==================================================+");
    println!("| 1. Write a key-value                             |");
    println!("| 2. Read a key                                    |");
    println!("| 3. Edit a key                                    |");
    println!("| 4. Delete a key                                  |");
    println!("| 5. List entries                                  |");
    println!("| 6. Exit                                          |");
    println!("+==================================================+");
}

/// Print `message` and read one line; `None` at end of input
fn prompt<B: BufRead>(lines: &mut Lines<B>, message: &str) -> Option<String> {
    print!("{}", message);
    if let Err(e) = io::stdout().flush() {
        tracing::warn!("Failed to flush prompt: {}", e);
    }
    lines.next().and_then(|line| line.ok())
}

fn prompt_field<B: BufRead>(lines: &mut Lines<B>, message: &str) -> Option<Field> {
    let text = prompt(lines, message)?;
    match Field::new(text.trim().as_bytes()) {
        Ok(field) => Some(field),
        Err(e) => {
            println!("Invalid input: {}", e);
            None
        }
    }
}

fn prompt_key_value<B: BufRead>(lines: &mut Lines<B>) -> Option<(Field, Field)> {
    let key = prompt_field(lines, "Enter key: ")?;
    let value = prompt_field(lines, "Enter value: ")?;
    Some((key, value))
}

/// Write a non-GET command and report the outcome
fn send(session: &mut Session<'_>, command: Command, success: &str) {
    let request = encode_command(&command);
    if session.write(&request) == 0 {
        println!("Rejected by the device");
    } else {
        println!("{}", success);
    }
}

/// Write a GET for `key` and read back the value
fn lookup(session: &mut Session<'_>, key: Field) {
    let request = encode_command(&Command::Get { key });
    if session.write(&request) == 0 {
        println!("Rejected by the device");
        return;
    }

    let mut buffer = [0u8; MAX_FIELD_LEN + 1];
    match session.read(&mut buffer) {
        Ok(1) => {
            let value = decode_value(&buffer).unwrap_or_default();
            println!("Read: {}", String::from_utf8_lossy(value));
        }
        Ok(_) => println!("Key not found"),
        Err(e) => println!("Failed to read the message from the device: {}", e),
    }
}
