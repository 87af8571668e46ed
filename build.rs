//! Compiles the RON game data under `data/` into postcard blobs and perfect-hash
//! name indices, so the library never parses text at runtime.

use schema::{MoveRecord, TrainerRecord};
use std::collections::HashSet;
use std::env;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_TEAM_SIZE: usize = 6;
const MAX_MOVES: usize = 4;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=data/moves.ron");
    println!("cargo:rerun-if-changed=data/trainers.ron");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let data_dir = Path::new("data");

    let moves: Vec<MoveRecord> = ron::from_str(&fs::read_to_string(data_dir.join("moves.ron"))?)?;
    validate_moves(&moves)?;

    let trainers: Vec<TrainerRecord> =
        ron::from_str(&fs::read_to_string(data_dir.join("trainers.ron"))?)?;
    validate_trainers(&trainers, &moves)?;

    fs::write(out_dir.join("moves.bin"), postcard::to_allocvec(&moves)?)?;
    fs::write(out_dir.join("trainers.bin"), postcard::to_allocvec(&trainers)?)?;

    let mut move_index = phf_codegen::Map::new();
    for (position, record) in moves.iter().enumerate() {
        move_index.entry(record.name.as_str(), &position.to_string());
    }

    let mut trainer_index = phf_codegen::Map::new();
    for (position, record) in trainers.iter().enumerate() {
        trainer_index.entry(record.id.as_str(), &position.to_string());
    }

    let mut generated = fs::File::create(out_dir.join("generated_data.rs"))?;
    writeln!(
        generated,
        "static MOVE_TABLE_BYTES: &[u8] = include_bytes!(concat!(env!(\"OUT_DIR\"), \"/moves.bin\"));"
    )?;
    writeln!(
        generated,
        "static TRAINER_TABLE_BYTES: &[u8] = include_bytes!(concat!(env!(\"OUT_DIR\"), \"/trainers.bin\"));"
    )?;
    writeln!(
        generated,
        "static MOVE_INDEX: phf::Map<&'static str, usize> = {};",
        move_index.build()
    )?;
    writeln!(
        generated,
        "static TRAINER_INDEX: phf::Map<&'static str, usize> = {};",
        trainer_index.build()
    )?;

    Ok(())
}

fn validate_moves(moves: &[MoveRecord]) -> Result<(), Box<dyn Error>> {
    let mut seen = HashSet::new();
    for record in moves {
        if !seen.insert(record.name.as_str()) {
            return Err(format!("duplicate move '{}'", record.name).into());
        }
        if record.name != record.name.to_lowercase() || record.name.contains(' ') {
            return Err(format!("move key '{}' must be lowercase and hyphenated", record.name).into());
        }
        if record.pp == 0 {
            return Err(format!("move '{}' has no PP", record.name).into());
        }
        if matches!(record.accuracy, Some(accuracy) if accuracy > 100) {
            return Err(format!("move '{}' has accuracy above 100", record.name).into());
        }
    }
    if !seen.contains("tackle") {
        return Err("move table must contain the fallback move 'tackle'".into());
    }
    Ok(())
}

fn validate_trainers(trainers: &[TrainerRecord], moves: &[MoveRecord]) -> Result<(), Box<dyn Error>> {
    let known: HashSet<&str> = moves.iter().map(|m| m.name.as_str()).collect();
    let mut ids = HashSet::new();
    for trainer in trainers {
        if !ids.insert(trainer.id.as_str()) {
            return Err(format!("duplicate trainer id '{}'", trainer.id).into());
        }
        if trainer.team.is_empty() || trainer.team.len() > MAX_TEAM_SIZE {
            return Err(format!("trainer '{}' has {} team members", trainer.id, trainer.team.len()).into());
        }
        for member in &trainer.team {
            if member.types.is_empty() || member.types.len() > 2 {
                return Err(format!("{} of '{}' must have one or two types", member.name, trainer.id).into());
            }
            if member.level == 0 || member.level > 100 {
                return Err(format!("{} of '{}' has level {}", member.name, trainer.id, member.level).into());
            }
            if member.moves.len() > MAX_MOVES {
                return Err(format!("{} of '{}' knows more than {} moves", member.name, trainer.id, MAX_MOVES).into());
            }
            if let Some(unknown) = member.moves.iter().find(|m| !known.contains(m.as_str())) {
                return Err(format!("{} of '{}' uses unknown move '{}'", member.name, trainer.id, unknown).into());
            }
        }
    }
    Ok(())
}
