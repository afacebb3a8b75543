use crate::domain::board::{ColumnLabel, group, label_for, sort};
use crate::domain::ticket::Ticket;
use crate::domain::user::User;
use crate::prefs::ViewPreferences;

/// Render model for one board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: ColumnLabel,
    pub tickets: Vec<Ticket>,
}

/// One full grouping/sorting/labeling pass: partition tickets per the active
/// grouping mode, order each bucket per the active sorting mode, and resolve
/// each bucket's header label.
pub fn build_columns(
    tickets: &[Ticket],
    users: &[User],
    prefs: &ViewPreferences,
) -> Vec<Column> {
    group(tickets, prefs.group_by)
        .into_iter()
        .map(|(key, bucket)| Column {
            label: label_for(&key, users),
            tickets: sort(&bucket, prefs.sort_by),
        })
        .collect()
}
