//! Interactive console notebook over the same notes directory the server uses.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use workbench::config::Config;
use workbench::notes::NoteStore;
use workbench::StoreError;

const RULE_WIDTH: usize = 60;

fn print_menu() {
    println!("\nNotebook");
    println!("{}", "=".repeat(30));
    println!("1. New note");
    println!("2. List notes");
    println!("3. Show note");
    println!("0. Quit");
    println!("{}", "=".repeat(30));
}

/// Prompt and read one line. `None` on end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn new_note(notes: &mut NoteStore, input: &mut impl BufRead) -> Result<(), StoreError> {
    println!("\nNew note");
    let Some(title) = prompt(input, "Title: ")? else {
        return Ok(());
    };
    println!("Content (finish with an empty line):\n");

    let mut lines = Vec::new();
    while let Some(line) = prompt(input, "")? {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    let note = notes.create(&title, &lines.join("\n"))?;
    println!("\nSaved! ID: {}", note.id);
    Ok(())
}

fn list_notes(notes: &NoteStore) {
    let all = notes.list();
    println!("\nNotes:");
    println!("{}", "-".repeat(RULE_WIDTH));
    if all.is_empty() {
        println!("No notes yet");
    } else {
        println!("{:<38} {:<20} {}", "ID", "Created", "Title");
        println!("{}", "-".repeat(RULE_WIDTH));
        for note in all {
            println!(
                "{:<38} {:<20} {}",
                note.id,
                note.created_at.format("%Y-%m-%d %H:%M:%S"),
                note.title
            );
        }
    }
    println!("{}", "-".repeat(RULE_WIDTH));
}

fn show_note(notes: &NoteStore, input: &mut impl BufRead) -> Result<(), StoreError> {
    let Some(id) = prompt(input, "Note ID: ")? else {
        return Ok(());
    };

    match notes.get(id.trim())? {
        Some(full) => {
            println!("\n{}", "-".repeat(RULE_WIDTH));
            println!("Title: {}", full.note.title);
            println!("Created: {}", full.note.created_at.format("%Y-%m-%d %H:%M:%S"));
            println!("{}", "-".repeat(RULE_WIDTH));
            println!("{}", full.content);
            println!("{}", "-".repeat(RULE_WIDTH));
        }
        None => println!("Note not found!"),
    }
    Ok(())
}

fn run(notes: &mut NoteStore) -> Result<(), StoreError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Choose [0-3]: ")? else {
            break;
        };

        match choice.trim() {
            "1" => new_note(notes, &mut input)?,
            "2" => list_notes(notes),
            "3" => show_note(notes, &mut input)?,
            "0" => break,
            _ => println!("Invalid choice, try again!"),
        }
    }

    println!("Bye!");
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    let mut notes = match NoteStore::open(config.notes_dir()) {
        Ok(n) => n,
        Err(e) => {
            log::error!("Failed to open {}: {}", config.notes_dir().display(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut notes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Notebook error: {}", e);
            ExitCode::FAILURE
        }
    }
}
