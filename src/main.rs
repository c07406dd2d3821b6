use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;

use cli::Cli;
use cli::commands::{Commands, DynamicCommands, NpcArgs, ObjectArgs, SetCommands};
use spawnedit::config::Config;
use spawnedit::domain::{
    Direction, DynamicEntry, DynamicNpc, NpcPlacement, ObjectPlacement, Record, SpawnEntry, Tile,
};
use spawnedit::editor::SpawnEditor;
use spawnedit::storage::LoadSummary;

fn setup_logging(level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spawnedit")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("spawnedit.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        if let Some(level) = level {
            builder.parse_filters(level);
        }
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let mut editor = SpawnEditor::new(config.clone());
    let summary = editor.refresh().context("Failed to load spawn files")?;
    if cli.is_verbose() {
        print_summary("spawns", editor.spawns().path(), &summary.spawns);
        print_summary("dynamic", editor.dynamics().path(), &summary.dynamics);
        println!(
            "{} {} object names, {} npc names",
            "names:".cyan(),
            summary.object_names,
            summary.npc_names
        );
    }

    match &cli.command {
        None => handle_list_command(&editor, None),
        Some(Commands::List { plane }) => handle_list_command(&editor, *plane),
        Some(Commands::At { tile }) => handle_at_command(&editor, *tile),
        Some(Commands::Search { query }) => handle_search_command(&editor, query),
        Some(Commands::Set { command }) => handle_set_command(&mut editor, command),
        Some(Commands::Delete { tile }) => handle_delete_command(&mut editor, *tile),
        Some(Commands::Dynamic { command }) => handle_dynamic_command(&mut editor, command),
        Some(Commands::Export { output }) => handle_export_command(&editor, output),
    }
}

fn print_summary(label: &str, path: &Path, summary: &LoadSummary) {
    println!("{} {} ({})", format!("{}:", label).cyan(), summary, path.display());
    if summary.unindexed() > 0 {
        println!(
            "  {} {} records can only be edited by a full rewrite",
            "warning:".yellow(),
            summary.unindexed()
        );
    }
}

fn describe(editor: &SpawnEditor, record: &Record) -> String {
    match editor.name_of(record) {
        Some(name) => format!("{} ({})", record, name),
        None => record.to_string(),
    }
}

fn handle_list_command(editor: &SpawnEditor, plane: Option<i32>) -> Result<()> {
    info!("Listing records - plane: {:?}", plane);
    let project = editor.spawns().project();
    let spawns: Vec<&SpawnEntry> = match plane {
        Some(z) => project.entries_at_plane(z),
        None => project.iter().collect(),
    };
    let dynamics: Vec<&DynamicEntry> = match plane {
        Some(z) => editor.dynamics().entries_at_plane(z),
        None => editor.dynamics().entries().iter().collect(),
    };

    println!("{}", "spawns.json".green().bold());
    for entry in spawns {
        println!("  {}", describe(editor, &Record::Spawn(*entry)));
    }

    println!("{}", "dynamic npcs".green().bold());
    for entry in dynamics {
        println!("  {}", describe(editor, &Record::Dynamic(entry.clone())));
    }
    Ok(())
}

fn handle_at_command(editor: &SpawnEditor, tile: Tile) -> Result<()> {
    info!("Selecting at {}", tile);
    editor.check_bounds(tile);
    match editor.select_at(tile) {
        Some(record) => {
            if record.tile() != tile {
                println!("{} nearest on this column is {}", "note:".yellow(), record.tile());
            }
            println!("{}", describe(editor, &record));
        }
        None => println!("{} {}", "Nothing at".yellow(), tile),
    }
    Ok(())
}

fn handle_search_command(editor: &SpawnEditor, query: &str) -> Result<()> {
    info!("Searching for: {}", query);
    let hits = editor.search(query);
    if hits.is_empty() {
        println!("{} {}", "No matches for".yellow(), query);
    }
    for hit in hits {
        println!("{}", hit);
    }
    Ok(())
}

fn object_placement(args: &ObjectArgs) -> ObjectPlacement {
    ObjectPlacement::new(args.id)
        .with_type(args.object_type)
        .with_rotation(args.rotation)
}

fn npc_placement(args: &NpcArgs) -> NpcPlacement {
    NpcPlacement {
        id: args.id,
        walk_radius: args.walk_radius,
        aggressive: args.aggressive,
        direction: Direction::parse_lenient(&args.direction),
    }
}

fn handle_set_command(editor: &mut SpawnEditor, command: &SetCommands) -> Result<()> {
    let entry = match command {
        SetCommands::Object(args) => SpawnEntry::SpawnObject {
            tile: args.tile,
            object: object_placement(args),
        },
        SetCommands::OverObject(args) => SpawnEntry::SpawnOverObject {
            tile: args.tile,
            object: object_placement(args),
        },
        SetCommands::Npc(args) => SpawnEntry::SpawnNpc {
            tile: args.tile,
            npc: npc_placement(args),
        },
        SetCommands::DeleteObject { tile } => SpawnEntry::DeleteObject { tile: *tile },
    };
    info!("Setting {}", entry);
    editor.check_bounds(entry.tile());

    let replaced = editor.spawns().project().contains_key(&entry.key());
    editor
        .spawns_mut()
        .upsert(entry)
        .context(format!("Failed to save {}", entry))?;

    let verb = if replaced { "Replaced:" } else { "Added:" };
    println!("{} {}", verb.green(), describe(editor, &Record::Spawn(entry)));
    Ok(())
}

fn handle_delete_command(editor: &mut SpawnEditor, tile: Tile) -> Result<()> {
    info!("Deleting at {}", tile);
    match editor.delete_at(tile).context(format!("Failed to delete at {}", tile))? {
        Some(record) => println!("{} {}", "Deleted:".green(), record),
        None => println!("{} {}", "Nothing at".yellow(), tile),
    }
    Ok(())
}

fn handle_dynamic_command(editor: &mut SpawnEditor, command: &DynamicCommands) -> Result<()> {
    info!("Handling dynamic command: {:?}", command);
    match command {
        DynamicCommands::Add { id, tile } => {
            editor.check_bounds(*tile);
            let npc = DynamicNpc::new(*id, *tile);
            let handle = editor.dynamics_mut().create(npc.clone()).context("Failed to add dynamic NPC")?;
            info!("Created dynamic NPC as {}", handle);
            println!("{} dynamic_npc {}", "Added:".green(), npc);
        }
        DynamicCommands::Move { from, to, id } => {
            editor.check_bounds(*to);
            let entry = editor
                .dynamics()
                .find_best_for_click(*from)
                .cloned()
                .ok_or_else(|| eyre!("No dynamic NPC at {}", from))?;
            let npc = DynamicNpc::new(id.unwrap_or(entry.npc.npc_id), *to);
            editor
                .dynamics_mut()
                .update(entry.handle, npc.clone())
                .context("Failed to move dynamic NPC")?;
            println!("{} {} -> {}", "Moved:".green(), entry.npc, npc);
        }
        DynamicCommands::Delete { tile } => {
            let entry = editor
                .dynamics()
                .find_best_for_click(*tile)
                .cloned()
                .ok_or_else(|| eyre!("No dynamic NPC at {}", tile))?;
            editor
                .dynamics_mut()
                .delete(entry.handle)
                .context("Failed to delete dynamic NPC")?;
            println!("{} dynamic_npc {}", "Deleted:".green(), entry.npc);
        }
        DynamicCommands::List => {
            for entry in editor.dynamics().entries() {
                println!("{}", describe(editor, &Record::Dynamic(entry.clone())));
            }
        }
    }
    Ok(())
}

fn handle_export_command(editor: &SpawnEditor, output: &Path) -> Result<()> {
    info!("Exporting to {}", output.display());
    editor
        .spawns()
        .export(output)
        .context(format!("Failed to export to {}", output.display()))?;
    println!(
        "{} {} records to {}",
        "Exported".green(),
        editor.spawns().project().len(),
        output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(loaded.config.log_level.as_deref()).context("Failed to setup logging")?;
    loaded.log();

    run_application(&cli, &loaded.config).context("Application failed")?;

    Ok(())
}
