use clap::{Args, Subcommand};

use crate::domain::board::{GroupBy, SortBy};
use crate::error::AppResult;
use crate::prefs::{PreferenceStore, ViewPreferences};

#[derive(Args, Debug, Clone)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PrefsCommand {
    /// Show the stored view preferences.
    Show,
    /// Set and persist both view preferences.
    Set {
        /// Grouping mode: status, priority, or user.
        grouping: String,
        /// Sorting mode: priority or title.
        sorting: String,
    },
}

pub fn run(command: PrefsCommand) -> AppResult<()> {
    let store = PreferenceStore::open()?;
    match command {
        PrefsCommand::Show => run_show(&store),
        PrefsCommand::Set { grouping, sorting } => run_set(&store, &grouping, &sorting),
    }
}

fn run_show(store: &PreferenceStore) -> AppResult<()> {
    let prefs = store.load();
    println!("Preferences file: {}", store.file_path().display());
    println!("Grouping: {}", prefs.group_by);
    println!("Ordering: {}", prefs.sort_by);
    Ok(())
}

fn run_set(store: &PreferenceStore, grouping: &str, sorting: &str) -> AppResult<()> {
    let group_by: GroupBy = grouping.parse()?;
    let sort_by: SortBy = sorting.parse()?;

    store.save(ViewPreferences { group_by, sort_by });
    println!("Grouping set to {group_by}, ordering set to {sort_by}.");
    Ok(())
}
