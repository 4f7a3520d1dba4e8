use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use log::{info, warn};

use paceline_core::race::Race;
use paceline_core::registry::RaceRegistry;
use paceline_core::GLOBAL_CONFIG;

mod commands;
mod storage;

use commands::Command;
use storage::FileStorage;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut storage = FileStorage::new(GLOBAL_CONFIG.storage_path.clone());
    let mut registry = RaceRegistry::new();
    if !registry.load(&storage)? {
        info!("no stored races found, starting empty");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_console(&mut input, &mut registry, &mut storage)?;

    registry.store(&mut storage)?;
    Ok(())
}

fn run_console(
    input: &mut impl BufRead,
    registry: &mut RaceRegistry,
    storage: &mut FileStorage,
) -> Result<()> {
    let mut current: Option<String> = registry.names().into_iter().next();

    loop {
        prompt(current.as_deref());
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                warn!("{}", message);
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Help => help(),
            Command::LoadCsv => {
                println!("paste roster CSV, end with a single `.` line:");
                let text = read_block(input)?;
                if let Err(e) = load_roster(registry, current.as_deref(), &text) {
                    warn!("{}", e);
                }
            }
            command => {
                if let Err(e) = apply(command, registry, &mut current, storage) {
                    warn!("{}", e);
                }
            }
        }
    }
}

fn read_block(input: &mut impl BufRead) -> Result<String> {
    let mut text = String::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim() == "." {
            return Ok(text);
        }
        text.push_str(&line);
    }
}

fn load_roster(registry: &mut RaceRegistry, current: Option<&str>, csv: &str) -> Result<()> {
    let name = current.ok_or_else(|| anyhow!("no race selected"))?;
    let race = registry
        .race_mut(name)
        .ok_or_else(|| anyhow!("no race named {:?}", name))?;
    race.load_csv(csv)?;
    info!("roster replaced for {:?}", name);
    Ok(())
}

fn current_race<'a>(
    registry: &'a mut RaceRegistry,
    current: &Option<String>,
) -> Result<&'a mut Race> {
    let name = current
        .as_deref()
        .ok_or_else(|| anyhow!("no race selected; use `new <name>` or `race <name>`"))?;
    registry
        .race_mut(name)
        .ok_or_else(|| anyhow!("no race named {:?}", name))
}

fn apply(
    command: Command,
    registry: &mut RaceRegistry,
    current: &mut Option<String>,
    storage: &mut FileStorage,
) -> Result<()> {
    match command {
        Command::NewRace(name) => {
            let race = registry.add_race(&name)?;
            race.add_some_racers(10);
            *current = Some(name);
        }
        Command::SelectRace(name) => {
            if registry.race(&name).is_none() {
                return Err(anyhow!("no race named {:?}", name));
            }
            *current = Some(name);
        }
        Command::ListRaces => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Command::Save => registry.store(storage)?,
        Command::AddSome(n) => current_race(registry, current)?.add_some_racers(n),
        Command::Start => {
            let race = current_race(registry, current)?;
            race.start();
            info!("race {:?} started", race.name);
        }
        Command::Checkpoint(bib) => {
            let race = current_race(registry, current)?;
            if race.has_checkpointed(bib) {
                return Err(anyhow!(
                    "bib {} already checkpointed; `undo {}` first",
                    bib,
                    bib
                ));
            }
            race.checkpoint(bib)?;
            info!("checkpointed {}", bib);
            if race.is_tracked(bib)? {
                println!("Splits for {}:", race.start_list().name(bib)?);
                println!("{}", race.format_splits(bib, None)?);
            }
        }
        Command::Undo(bib) => {
            current_race(registry, current)?.undo_checkpoint(bib);
            info!("undid {}", bib);
        }
        Command::Track(bib) => current_race(registry, current)?.track(bib)?,
        Command::Splits(bib) => {
            println!("{}", current_race(registry, current)?.format_splits(bib, None)?)
        }
        Command::ShowCsv => println!("{}", current_race(registry, current)?.to_csv()),
        Command::Reset => current_race(registry, current)?.reset(),
        // handled by the console loop before apply is reached
        Command::Quit | Command::Help | Command::LoadCsv => {}
    }
    Ok(())
}

fn prompt(current: Option<&str>) {
    match current {
        Some(name) => print!("{}> ", name),
        None => print!("> "),
    }
    let _ = io::stdout().flush();
}

fn help() {
    println!(
        "commands:\n  \
         new <name>     create a race with ten placeholder racers\n  \
         race <name>    switch to a race\n  \
         races          list race names\n  \
         add <n>        bulk-add placeholder racers\n  \
         start          mark the gun time\n  \
         <bib>          checkpoint a racer\n  \
         undo <bib>     remove a checkpoint\n  \
         track <bib>    show splits whenever this racer checkpoints\n  \
         splits <bib>   show splits around a racer\n  \
         csv            print the roster\n  \
         load           replace the roster from pasted CSV\n  \
         reset          clear all checkpoints\n  \
         save           persist rosters\n  \
         quit           save and exit"
    );
}
