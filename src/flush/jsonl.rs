use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::World;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush the world state to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 5 files:
/// - `countries.jsonl` — one Country per line
/// - `wars.jsonl` — one War per line, active and historical
/// - `directors.jsonl` — one ResearchDirector per line
/// - `facilities.jsonl` — one ResearchFacility per line
/// - `stocks.jsonl` — one ArmsStock per line
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("countries.jsonl"),
        world.countries.values(),
    )?;
    write_jsonl(&output_dir.join("wars.jsonl"), world.wars.values())?;
    write_jsonl(
        &output_dir.join("directors.jsonl"),
        world.directors.values(),
    )?;
    write_jsonl(
        &output_dir.join("facilities.jsonl"),
        world.facilities.values(),
    )?;
    write_jsonl(&output_dir.join("stocks.jsonl"), world.stocks.values())?;

    Ok(())
}
