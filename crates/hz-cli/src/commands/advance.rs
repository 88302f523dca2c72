use colored::Colorize;
use hz_mechanics::{Advance, CharacterLedger, SheetAction, available_advances};

use super::Context;

pub fn run(ctx: &Context, name: &str, choice: Option<&str>) -> Result<(), String> {
    let Some(choice) = choice else {
        return list(ctx, name);
    };
    let advance = Advance::parse(choice).ok_or_else(|| {
        format!("unknown advance \"{choice}\" (expected trademark, edge, hits, or stunts)")
    })?;

    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.apply(id, SheetAction::Advance(advance))
    })?;
    Ok(())
}

fn list(ctx: &Context, name: &str) -> Result<(), String> {
    let character = super::load_character(ctx, name)?;
    let ledger = CharacterLedger::from_character(&character);
    let options = available_advances(&ledger);

    if ctx.json {
        let json = serde_json::to_string(&options).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "  {} has {} experience",
        character.name.bold(),
        ledger.experience
    );
    if options.is_empty() {
        println!("  No advances available.");
    } else {
        let names: Vec<String> = options.iter().map(Advance::to_string).collect();
        println!("  Available: {}", names.join(", "));
    }
    Ok(())
}
