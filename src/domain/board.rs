use std::fmt;
use std::str::FromStr;

use crate::domain::ticket::{CANONICAL_STATUSES, PRIORITY_LADDER, Priority, Status, Ticket};
use crate::domain::user::{User, avatar_color};
use crate::error::AppError;

/// Fixed assignee columns for user grouping. Tickets owned by any other id
/// stay off the user board entirely.
pub const BOARD_USER_IDS: [&str; 5] = ["usr-1", "usr-2", "usr-3", "usr-4", "usr-5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Status,
    Priority,
    User,
}

pub const VALID_GROUPINGS: &[&str] = &["status", "priority", "user"];

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Status => "status",
            GroupBy::Priority => "priority",
            GroupBy::User => "user",
        }
    }

    pub fn next(self) -> Self {
        match self {
            GroupBy::Status => GroupBy::Priority,
            GroupBy::Priority => GroupBy::User,
            GroupBy::User => GroupBy::Status,
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(GroupBy::Status),
            "priority" => Ok(GroupBy::Priority),
            "user" => Ok(GroupBy::User),
            other => Err(AppError::Configuration(format!(
                "invalid grouping mode '{other}' (expected one of: {})",
                VALID_GROUPINGS.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Priority,
    Title,
}

pub const VALID_SORTINGS: &[&str] = &["priority", "title"];

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Priority => "priority",
            SortBy::Title => "title",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortBy::Priority => SortBy::Title,
            SortBy::Title => SortBy::Priority,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            other => Err(AppError::Configuration(format!(
                "invalid sorting mode '{other}' (expected one of: {})",
                VALID_SORTINGS.join(", ")
            ))),
        }
    }
}

/// Identity of one bucket under the active grouping mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketKey {
    Status(Status),
    Priority(u8),
    User(String),
}

/// Partition tickets into the fixed bucket set of the given mode.
///
/// Buckets come back in enumeration order and are always all present, empty
/// or not. A ticket whose status, priority code, or owning user falls outside
/// the fixed key set lands in no bucket; relative input order is preserved
/// inside each bucket.
pub fn group(tickets: &[Ticket], mode: GroupBy) -> Vec<(BucketKey, Vec<Ticket>)> {
    match mode {
        GroupBy::Status => CANONICAL_STATUSES
            .iter()
            .map(|status| {
                let bucket = tickets
                    .iter()
                    .filter(|ticket| ticket.status == status.as_str())
                    .cloned()
                    .collect();
                (BucketKey::Status(*status), bucket)
            })
            .collect(),
        GroupBy::Priority => PRIORITY_LADDER
            .iter()
            .map(|priority| {
                let code = priority.as_code();
                let bucket = tickets
                    .iter()
                    .filter(|ticket| ticket.priority == code)
                    .cloned()
                    .collect();
                (BucketKey::Priority(code), bucket)
            })
            .collect(),
        GroupBy::User => BOARD_USER_IDS
            .iter()
            .map(|id| {
                let bucket = tickets
                    .iter()
                    .filter(|ticket| ticket.user_id.as_deref() == Some(*id))
                    .cloned()
                    .collect();
                (BucketKey::User((*id).to_string()), bucket)
            })
            .collect(),
    }
}

/// Order a bucket's tickets per the active sorting mode, leaving the input
/// untouched. Ties keep their relative input order.
pub fn sort(tickets: &[Ticket], mode: SortBy) -> Vec<Ticket> {
    let mut sorted = tickets.to_vec();
    match mode {
        SortBy::Priority => sorted.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortBy::Title => {
            sorted.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
    sorted
}

/// What a column header shows for one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabel {
    pub glyph: Option<&'static str>,
    pub avatar: Option<Avatar>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub initials: String,
    pub color: (u8, u8, u8),
}

/// Resolve a bucket key to its display label.
///
/// Status buckets show the status name; priority buckets the fixed
/// glyph/text pair for the normalized code; user buckets an avatar plus the
/// user's name. An id without a matching user falls back to `?` initials and
/// the raw id.
pub fn label_for(key: &BucketKey, users: &[User]) -> ColumnLabel {
    match key {
        BucketKey::Status(status) => ColumnLabel {
            glyph: None,
            avatar: None,
            text: status.as_str().to_string(),
        },
        BucketKey::Priority(code) => {
            let priority = Priority::from_code(*code).unwrap_or(Priority::NoPriority);
            ColumnLabel {
                glyph: Some(priority.glyph()),
                avatar: None,
                text: priority.label().to_string(),
            }
        }
        BucketKey::User(id) => match users.iter().find(|user| user.id == *id) {
            Some(user) => ColumnLabel {
                glyph: None,
                avatar: Some(Avatar {
                    initials: user.initials(),
                    color: avatar_color(&user.id),
                }),
                text: user.name.clone(),
            },
            None => ColumnLabel {
                glyph: None,
                avatar: Some(Avatar {
                    initials: "?".to_string(),
                    color: avatar_color(id),
                }),
                text: id.clone(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, title: &str, status: &str, priority: u8, user_id: Option<&str>) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            priority,
            user_id: user_id.map(str::to_string),
            tag: Vec::new(),
        }
    }

    fn sample_tickets() -> Vec<Ticket> {
        vec![
            ticket("cam-1", "Refactor login", "Todo", 4, Some("usr-1")),
            ticket("cam-2", "Fix avatar clipping", "In progress", 2, Some("usr-2")),
            ticket("cam-3", "Ship onboarding", "Todo", 0, Some("usr-9")),
            ticket("cam-4", "Archive old boards", "Triage", 3, Some("usr-1")),
            ticket("cam-5", "Write release notes", "Done", 4, None),
        ]
    }

    #[test]
    fn groups_by_status_in_fixed_column_order() {
        let tickets = sample_tickets();
        let buckets = group(&tickets, GroupBy::Status);

        let keys: Vec<_> = buckets.iter().map(|(key, _)| key.clone()).collect();
        assert_eq!(
            keys,
            CANONICAL_STATUSES
                .iter()
                .map(|s| BucketKey::Status(*s))
                .collect::<Vec<_>>()
        );

        let todo = &buckets[1].1;
        assert_eq!(
            todo.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["cam-1", "cam-3"]
        );
        assert!(buckets[0].1.is_empty());
    }

    #[test]
    fn unrecognized_status_lands_in_no_bucket() {
        let tickets = sample_tickets();
        let buckets = group(&tickets, GroupBy::Status);
        let total: usize = buckets.iter().map(|(_, bucket)| bucket.len()).sum();
        // "Triage" is not a board column.
        assert_eq!(total, tickets.len() - 1);
    }

    #[test]
    fn groups_by_priority_with_zero_bucket_present() {
        let tickets = sample_tickets();
        let buckets = group(&tickets, GroupBy::Priority);

        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].0, BucketKey::Priority(0));
        assert_eq!(buckets[0].1.len(), 1);
        assert_eq!(buckets[0].1[0].id, "cam-3");
        assert_eq!(buckets[4].1.len(), 2);
        assert!(buckets[1].1.is_empty());
    }

    #[test]
    fn unrecognized_status_still_groups_by_priority_and_user() {
        let tickets = sample_tickets();

        let by_priority = group(&tickets, GroupBy::Priority);
        assert!(by_priority[3].1.iter().any(|t| t.id == "cam-4"));

        let by_user = group(&tickets, GroupBy::User);
        assert!(by_user[0].1.iter().any(|t| t.id == "cam-4"));
    }

    #[test]
    fn out_of_range_priority_lands_in_no_bucket() {
        let tickets = vec![ticket("cam-9", "Odd one", "Todo", 7, Some("usr-1"))];
        let buckets = group(&tickets, GroupBy::Priority);
        assert!(buckets.iter().all(|(_, bucket)| bucket.is_empty()));
    }

    #[test]
    fn groups_by_user_over_fixed_id_list() {
        let tickets = sample_tickets();
        let buckets = group(&tickets, GroupBy::User);

        let keys: Vec<_> = buckets
            .iter()
            .map(|(key, _)| match key {
                BucketKey::User(id) => id.clone(),
                other => panic!("unexpected key {other:?}"),
            })
            .collect();
        assert_eq!(keys, BOARD_USER_IDS);

        assert_eq!(buckets[0].1.len(), 2);
        assert_eq!(buckets[1].1.len(), 1);
        // usr-9 and unassigned tickets are dropped.
        let total: usize = buckets.iter().map(|(_, bucket)| bucket.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn sorts_by_priority_descending_and_stable() {
        let tickets = vec![
            ticket("cam-1", "B", "Todo", 3, None),
            ticket("cam-2", "A", "Todo", 4, None),
            ticket("cam-3", "C", "Todo", 3, None),
        ];
        let sorted = sort(&tickets, SortBy::Priority);
        assert_eq!(
            sorted.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["cam-2", "cam-1", "cam-3"]
        );
        // Input order untouched.
        assert_eq!(tickets[0].id, "cam-1");
    }

    #[test]
    fn sorts_by_title_case_insensitively_and_stable() {
        let tickets = vec![
            ticket("cam-1", "beta task", "Todo", 0, None),
            ticket("cam-2", "Alpha task", "Todo", 0, None),
            ticket("cam-3", "Beta task", "Todo", 0, None),
        ];
        let sorted = sort(&tickets, SortBy::Title);
        assert_eq!(
            sorted.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["cam-2", "cam-1", "cam-3"]
        );
    }

    #[test]
    fn grouping_twice_yields_identical_output() {
        let tickets = sample_tickets();
        assert_eq!(
            group(&tickets, GroupBy::Status),
            group(&tickets, GroupBy::Status)
        );
        assert_eq!(sort(&tickets, SortBy::Title), sort(&tickets, SortBy::Title));
    }

    #[test]
    fn parses_and_cycles_modes() {
        assert_eq!("user".parse::<GroupBy>().unwrap(), GroupBy::User);
        assert_eq!(" Priority ".parse::<GroupBy>().unwrap(), GroupBy::Priority);
        assert!("assignee".parse::<GroupBy>().is_err());
        assert_eq!("title".parse::<SortBy>().unwrap(), SortBy::Title);
        assert!("due-date".parse::<SortBy>().is_err());

        assert_eq!(GroupBy::Status.next(), GroupBy::Priority);
        assert_eq!(GroupBy::User.next(), GroupBy::Status);
        assert_eq!(SortBy::Title.next(), SortBy::Priority);
    }

    #[test]
    fn labels_status_buckets_with_the_status_name() {
        let label = label_for(&BucketKey::Status(Status::InProgress), &[]);
        assert_eq!(label.text, "In progress");
        assert!(label.glyph.is_none());
        assert!(label.avatar.is_none());
    }

    #[test]
    fn labels_priority_buckets_with_normalized_names() {
        let label = label_for(&BucketKey::Priority(1), &[]);
        assert_eq!(label.text, "Urgent");
        assert!(label.glyph.is_some());
        assert_eq!(label_for(&BucketKey::Priority(0), &[]).text, "No Priority");
        assert_eq!(label_for(&BucketKey::Priority(4), &[]).text, "High");
    }

    #[test]
    fn labels_user_buckets_with_avatar_and_name() {
        let users = vec![User {
            id: "usr-2".to_string(),
            name: "Anoop sharma".to_string(),
        }];
        let label = label_for(&BucketKey::User("usr-2".to_string()), &users);
        assert_eq!(label.text, "Anoop sharma");
        let avatar = label.avatar.expect("user label carries an avatar");
        assert_eq!(avatar.initials, "AS");
        assert_eq!(avatar.color, avatar_color("usr-2"));
    }

    #[test]
    fn unknown_user_id_gets_placeholder_label() {
        let label = label_for(&BucketKey::User("usr-4".to_string()), &[]);
        assert_eq!(label.text, "usr-4");
        assert_eq!(label.avatar.expect("placeholder avatar").initials, "?");
    }
}
