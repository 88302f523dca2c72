use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hz_core::{Item, ItemKind};

use super::Context;

pub fn add(
    ctx: &Context,
    name: &str,
    item: &str,
    special: bool,
    tags: Vec<String>,
) -> Result<(), String> {
    let item = if special {
        Item::special(item.trim(), tags).map_err(|e| e.to_string())?
    } else {
        Item::gear(item.trim())
    };
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.add_item(id, item)
    })?;
    Ok(())
}

pub fn remove(ctx: &Context, name: &str, item: &str) -> Result<(), String> {
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.remove_item(id, item)
    })?;
    Ok(())
}

pub fn list(ctx: &Context, name: &str) -> Result<(), String> {
    let character = super::load_character(ctx, name)?;

    if ctx.json {
        let json = serde_json::to_string_pretty(&character.items).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    if character.items.is_empty() {
        println!("  {} carries nothing.", character.name.bold());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Kind", "Tags"]);
    for kind in [ItemKind::Gear, ItemKind::SpecialGear] {
        for item in character.items_of(kind) {
            let tags = if item.tags.is_empty() {
                "-".to_string()
            } else {
                item.tags.join(", ")
            };
            table.add_row(vec![item.name.clone(), kind.to_string(), tags]);
        }
    }

    println!("{table}");
    println!();
    println!(
        "  gear {}/{}, special gear {}/{}",
        character.item_count(ItemKind::Gear),
        ItemKind::Gear.capacity(),
        character.item_count(ItemKind::SpecialGear),
        ItemKind::SpecialGear.capacity()
    );
    Ok(())
}
