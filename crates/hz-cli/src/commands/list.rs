use comfy_table::{ContentArrangement, Table};
use hz_mechanics::CharacterLedger;

use super::Context;
use crate::store;

pub fn run(ctx: &Context) -> Result<(), String> {
    let roster = store::load(&ctx.roster)?;

    if ctx.json {
        let rows: Vec<serde_json::Value> = roster
            .iter()
            .map(|c| serde_json::json!({ "id": c.id.0, "name": c.name }))
            .collect();
        let json = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    if roster.is_empty() {
        println!("  No characters yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name", "Hits", "Stunts", "Stash", "XP", "Gear", "Drive", "Danger",
    ]);

    for character in roster.iter() {
        let ledger = CharacterLedger::from_character(character);
        table.add_row(vec![
            character.name.clone(),
            ledger.hits.to_string(),
            ledger.stunt_points.to_string(),
            ledger.stash.to_string(),
            ledger.experience.to_string(),
            ledger.gear_rolls.to_string(),
            ledger.drive.to_string(),
            ledger.danger_pool_size().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", roster.len());

    Ok(())
}
