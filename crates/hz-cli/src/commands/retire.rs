use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.retire(id)
    })?;
    Ok(())
}
