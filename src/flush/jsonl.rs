use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::journal::JournalLedger;
use crate::model::{Character, GameWorld, MapLayout, MapPointData};

/// A local map without its rosters; characters go to their own file.
#[derive(Serialize)]
struct MapRow<'a> {
    index: usize,
    name: &'a str,
    size: (f64, f64),
    layout: &'a MapLayout,
    points_data: &'a [MapPointData],
}

#[derive(Serialize)]
struct CharacterRow<'a> {
    map_index: usize,
    point_index: usize,
    #[serde(flatten)]
    character: &'a Character,
}

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush a generated world and the journal ledger to the given output
/// directory.
///
/// Creates the output directory if it does not exist. Writes 4 files:
/// - `overworld.json`: the overworld map as a single document
/// - `maps.jsonl`: one local map per line (layout and points, no rosters)
/// - `characters.jsonl`: one character per line, tagged with map and point
/// - `journal.jsonl`: ledger records in append order
pub fn flush_to_jsonl(world: &GameWorld, ledger: &JournalLedger, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut writer = BufWriter::new(File::create(output_dir.join("overworld.json"))?);
    serde_json::to_writer(&mut writer, &world.overworld)?;
    writer.flush()?;

    write_jsonl(
        &output_dir.join("maps.jsonl"),
        world.maps.iter().enumerate().map(|(index, map)| MapRow {
            index,
            name: &map.name,
            size: map.size,
            layout: &map.layout,
            points_data: &map.points_data,
        }),
    )?;
    write_jsonl(
        &output_dir.join("characters.jsonl"),
        world.characters().map(|(location, character)| CharacterRow {
            map_index: location.map_index,
            point_index: location.point_index,
            character,
        }),
    )?;
    write_jsonl(&output_dir.join("journal.jsonl"), ledger.records().iter())?;

    tracing::info!(dir = %output_dir.display(), "world flushed");
    Ok(())
}
