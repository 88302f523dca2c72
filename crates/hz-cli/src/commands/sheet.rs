//! Ledger commands: each one is a single [`SheetAction`].

use hz_mechanics::{CharacterLedger, Condition, LeverageUse, MechResult, SheetAction};

use super::{CliTable, Context};

/// Apply the action built from the character's current ledger.
fn apply_with(
    ctx: &Context,
    name: &str,
    action: impl FnOnce(&CharacterLedger) -> SheetAction,
) -> Result<(), String> {
    super::at_table(ctx, |table: &mut CliTable| -> MechResult<()> {
        let id = table.id_of(name)?;
        let action = action(&table.ledger(id)?);
        table.apply(id, action)?;
        Ok(())
    })?;
    Ok(())
}

fn apply(ctx: &Context, name: &str, action: SheetAction) -> Result<(), String> {
    apply_with(ctx, name, |_| action)
}

pub fn hit(ctx: &Context, name: &str, box_number: Option<usize>) -> Result<(), String> {
    match box_number {
        Some(n) => apply(ctx, name, SheetAction::TakeHit(super::index_from_one(n, "box")?)),
        None => apply_with(ctx, name, |ledger| {
            SheetAction::TakeHit(ledger.hits.value as usize)
        }),
    }
}

pub fn rest(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::Rest)
}

pub fn use_stunt(ctx: &Context, name: &str, point: Option<usize>) -> Result<(), String> {
    match point {
        Some(n) => apply(ctx, name, SheetAction::UseStunt(super::index_from_one(n, "point")?)),
        None => apply_with(ctx, name, |ledger| {
            SheetAction::UseStunt(ledger.stunt_points.value.saturating_sub(1) as usize)
        }),
    }
}

pub fn refresh_stunts(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::RefreshStunts)
}

pub fn bonus_stunt(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::BonusStunt)
}

pub fn gain_leverage(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::GainLeverage)
}

pub fn bonus_leverage(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::BonusLeverage)
}

pub fn spend_leverage(ctx: &Context, name: &str, on: &str) -> Result<(), String> {
    let used_for = LeverageUse::parse(on)
        .ok_or_else(|| format!("unknown leverage use \"{on}\" (expected doc, dream, or train)"))?;
    apply(ctx, name, SheetAction::SpendLeverage(used_for))
}

pub fn mark_experience(ctx: &Context, name: &str) -> Result<(), String> {
    apply(ctx, name, SheetAction::MarkExperience)
}

pub fn condition(ctx: &Context, name: &str, condition: &str, on: bool) -> Result<(), String> {
    let parsed = Condition::parse(condition).ok_or_else(|| {
        let known: Vec<&str> = Condition::ALL.iter().map(|c| c.key()).collect();
        format!(
            "unknown condition \"{condition}\" (expected one of: {})",
            known.join(", ")
        )
    })?;
    apply(ctx, name, SheetAction::SetCondition(parsed, on))
}

pub fn drive(ctx: &Context, name: &str, box_number: usize) -> Result<(), String> {
    apply(
        ctx,
        name,
        SheetAction::ToggleDrive(super::index_from_one(box_number, "box")?),
    )
}

pub fn trauma(ctx: &Context, name: &str, line: usize, text: &str) -> Result<(), String> {
    apply(
        ctx,
        name,
        SheetAction::SetTrauma(super::index_from_one(line, "line")?, text.trim().to_string()),
    )
}
