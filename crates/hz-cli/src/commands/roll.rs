use super::Context;

pub fn run(ctx: &Context, name: &str, action: usize, danger: Option<usize>) -> Result<(), String> {
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        match danger {
            Some(danger) => table.roll_pools(id, action, danger),
            None => table.roll_action(id, action),
        }
    })?;
    Ok(())
}
