use colored::Colorize;
use hz_core::ItemKind;
use hz_mechanics::{Advance, CharacterLedger, DriveBox, available_advances};

use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let character = super::load_character(ctx, name)?;
    let ledger = CharacterLedger::from_character(&character);

    if ctx.json {
        let json = serde_json::json!({
            "id": character.id.0,
            "name": character.name,
            "ledger": ledger.to_data(),
            "items": character.items,
            "danger": ledger.danger_pool_size(),
        });
        let text = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "  {} [{}]",
        character.name.bold(),
        character.id.to_string().dimmed()
    );
    println!();

    let hits = if ledger.hits.is_full() {
        ledger.hits.to_string().red().bold().to_string()
    } else {
        ledger.hits.to_string()
    };
    println!("  hits:        {hits}");
    println!("  stunts:      {}", ledger.stunt_points);
    println!("  stash:       {}", ledger.stash);
    println!("  experience:  {}", ledger.experience);
    println!("  gear rolls:  {}", ledger.gear_rolls);
    println!(
        "  drive:       {} ({} ticked, {} crossed)",
        ledger.drive,
        ledger.drive.ticked(),
        ledger.drive.count(DriveBox::Crossed)
    );

    let conditions: Vec<&str> = ledger.conditions.active().map(|c| c.key()).collect();
    if !conditions.is_empty() {
        println!("  conditions:  {}", conditions.join(", "));
    }

    let traumas: Vec<(usize, &String)> = ledger
        .traumas
        .lines()
        .iter()
        .enumerate()
        .filter(|(line, _)| ledger.traumas.is_filled(*line))
        .collect();
    if !traumas.is_empty() {
        println!("  {}", "traumas:".dimmed());
        for (line, text) in traumas {
            println!("    {}. {text}", line + 1);
        }
    }
    println!("  danger dice: {}", ledger.danger_pool_size());

    for kind in [ItemKind::Gear, ItemKind::SpecialGear] {
        let items: Vec<String> = character
            .items_of(kind)
            .map(|item| {
                if item.tags.is_empty() {
                    item.name.clone()
                } else {
                    format!("{} ({})", item.name, item.tags.join(", "))
                }
            })
            .collect();
        if !items.is_empty() {
            println!("  {kind}: {}", items.join("; "));
        }
    }

    let advances = available_advances(&ledger);
    if !advances.is_empty() {
        let names: Vec<String> = advances.iter().map(Advance::to_string).collect();
        println!();
        println!("  {} {}", "can advance:".dimmed(), names.join(", "));
    }

    Ok(())
}
