use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let deleted = super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.delete_character(id)
    })?;

    if let Some(character) = deleted {
        if ctx.json {
            println!("{}", serde_json::json!({ "deleted": character.name }));
        } else {
            println!("  Deleted {}", character.name.bold());
        }
    }
    Ok(())
}
