pub mod advance;
pub mod delete;
pub mod gear;
pub mod item;
pub mod list;
pub mod new;
pub mod retire;
pub mod roll;
pub mod sheet;
pub mod show;

use std::path::PathBuf;

use hz_core::Character;
use hz_mechanics::{MechError, MechResult, RandomDice, ScriptedDice, Table, TableConfig};

use crate::notifier::CliNotifier;
use crate::store;

/// Everything a command needs from the command line and config file.
pub struct Context {
    pub roster: PathBuf,
    pub table: TableConfig,
    pub json: bool,
}

/// The table every mutating command runs against.
pub type CliTable = Table<ScriptedDice<RandomDice>, CliNotifier>;

/// Load the roster, run `op` at a table, and save the roster if it succeeded.
///
/// Rejections were already announced as warnings, so they are not errors
/// here: the command returns `Ok(None)` and the roster is left untouched.
fn at_table<T>(
    ctx: &Context,
    op: impl FnOnce(&mut CliTable) -> MechResult<T>,
) -> Result<Option<T>, String> {
    let roster = store::load(&ctx.roster)?;
    let mut table = Table::new(roster, ctx.table.dice(), CliNotifier::new(ctx.json));
    let result = op(&mut table);
    let (roster, notifier) = table.into_parts();

    match result {
        Ok(value) => {
            store::save(&ctx.roster, &roster)?;
            notifier.finish()?;
            Ok(Some(value))
        }
        Err(MechError::Rejected(_)) => {
            notifier.finish()?;
            Ok(None)
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Load the roster and look a character up by name.
fn load_character(ctx: &Context, name: &str) -> Result<Character, String> {
    store::load(&ctx.roster)?
        .find_by_name(name)
        .cloned()
        .ok_or_else(|| format!("no character named \"{name}\""))
}

/// Convert a one-based number from the command line to an index.
fn index_from_one(number: usize, what: &str) -> Result<usize, String> {
    number
        .checked_sub(1)
        .ok_or_else(|| format!("{what} numbers start at 1"))
}
