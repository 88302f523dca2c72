use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let created = super::at_table(ctx, |table| {
        let id = table.create_character(name)?;
        Ok(table.roster().get(id).cloned())
    })?;

    if let Some(character) = created.flatten() {
        if ctx.json {
            let json = serde_json::to_string_pretty(&character).map_err(|e| e.to_string())?;
            println!("{json}");
        } else {
            println!(
                "  Created {} {}",
                character.name.bold(),
                format!("({})", character.id).dimmed()
            );
        }
    }
    Ok(())
}
