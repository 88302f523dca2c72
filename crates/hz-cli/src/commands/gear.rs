use hz_mechanics::{GearRollRequest, SheetAction};

use super::Context;

pub fn reset(ctx: &Context, name: &str) -> Result<(), String> {
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.apply(id, SheetAction::ResetGearRolls)
    })?;
    Ok(())
}

pub fn spend(ctx: &Context, name: &str, cost: u32) -> Result<(), String> {
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.apply(id, SheetAction::SpendGearRolls(cost))
    })?;
    Ok(())
}

pub fn roll(
    ctx: &Context,
    name: &str,
    target: Option<u32>,
    item: Option<&str>,
    modifier: i32,
    stash: u32,
) -> Result<(), String> {
    let Some(target) = target else {
        let item = item.ok_or("either --target or --item is required")?;
        super::at_table(ctx, |table| {
            let id = table.id_of(name)?;
            table.gear_roll_for_item(id, item, modifier, stash)
        })?;
        return Ok(());
    };

    let request = GearRollRequest::new(target)
        .with_modifier(modifier)
        .with_stash_bonus(stash);
    super::at_table(ctx, |table| {
        let id = table.id_of(name)?;
        table.gear_roll(id, request)
    })?;
    Ok(())
}
