//! Column constraint tags.
//!
//! sqlpp11 expresses insert/update restrictions and nullability as tag
//! types listed after the value type in `make_traits<...>`. They are
//! derived here from the catalog's nullability flag and default text.

use std::fmt;

use crate::schema::ColumnDescriptor;

/// A structural tag attached to a column declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnTag {
    /// The server assigns the value; inserts must not set it.
    MustNotInsert,
    /// The value must not be changed by updates.
    MustNotUpdate,
    /// Inserts must provide a value.
    RequireInsert,
    /// The column accepts NULL.
    CanBeNull,
}

impl ColumnTag {
    /// Returns the qualified sqlpp11 tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MustNotInsert => "sqlpp::tag::must_not_insert",
            Self::MustNotUpdate => "sqlpp::tag::must_not_update",
            Self::RequireInsert => "sqlpp::tag::require_insert",
            Self::CanBeNull => "sqlpp::tag::can_be_null",
        }
    }
}

impl fmt::Display for ColumnTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of [`ColumnTag`]s.
///
/// Iteration yields tags in insertion order, which is what keeps the
/// emitted `make_traits` list textually stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTagSet {
    tags: Vec<ColumnTag>,
}

impl ColumnTagSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Adds a tag unless it is already present.
    pub fn insert(&mut self, tag: ColumnTag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Returns whether the set contains `tag`.
    #[must_use]
    pub fn contains(&self, tag: ColumnTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnTag> + '_ {
        self.tags.iter().copied()
    }
}

impl FromIterator<ColumnTag> for ColumnTagSet {
    fn from_iter<I: IntoIterator<Item = ColumnTag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Derives the constraint tags for a column.
///
/// Rules, applied in order:
///
/// 1. A default containing `nextval` and the sequence name
///    `<table>_<column>_seq` marks the column auto-incrementing:
///    `must_not_insert`, `must_not_update`.
/// 2. NOT NULL without a default: `require_insert`.
/// 3. Nullable: `can_be_null`.
///
/// Rule 1 needs a default and rule 2 needs none, so they never both fire.
#[must_use]
pub fn derive_tags(column: &ColumnDescriptor) -> ColumnTagSet {
    let mut tags = ColumnTagSet::new();

    if is_autoincrement(column) {
        tags.insert(ColumnTag::MustNotInsert);
        tags.insert(ColumnTag::MustNotUpdate);
    }

    if !column.nullable && !column.has_default() {
        tags.insert(ColumnTag::RequireInsert);
    }

    if column.nullable {
        tags.insert(ColumnTag::CanBeNull);
    }

    tags
}

/// Returns whether the column default draws from the column's own sequence.
fn is_autoincrement(column: &ColumnDescriptor) -> bool {
    let Some(default) = column.default_expr.as_deref() else {
        return false;
    };
    let sequence = format!("{}_{}_seq", column.table, column.name);
    default.contains("nextval") && default.contains(&sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableRef;

    fn column(table: &str, name: &str) -> ColumnDescriptor {
        ColumnDescriptor::new(&TableRef::new("public", table), name, 1, "integer")
    }

    fn tags(column: &ColumnDescriptor) -> Vec<ColumnTag> {
        derive_tags(column).iter().collect()
    }

    #[test]
    fn test_serial_column() {
        let id = column("orders", "id").default_expr("nextval('orders_id_seq'::regclass)");
        assert_eq!(
            tags(&id),
            vec![ColumnTag::MustNotInsert, ColumnTag::MustNotUpdate]
        );
    }

    #[test]
    fn test_shared_sequence_is_not_autoincrement() {
        let id = column("orders", "id").default_expr("nextval('global_id_seq'::regclass)");
        let set = derive_tags(&id);
        assert!(!set.contains(ColumnTag::MustNotInsert));
        assert!(!set.contains(ColumnTag::MustNotUpdate));
        // It still has a default, so inserts may omit it.
        assert!(set.is_empty());
    }

    #[test]
    fn test_sequence_name_without_nextval() {
        let id = column("orders", "id").default_expr("'orders_id_seq'");
        assert!(derive_tags(&id).is_empty());
    }

    #[test]
    fn test_not_null_without_default_requires_insert() {
        let email = column("users", "email");
        let set = derive_tags(&email);
        assert!(set.contains(ColumnTag::RequireInsert));
        assert!(!set.contains(ColumnTag::CanBeNull));
    }

    #[test]
    fn test_empty_default_requires_insert() {
        let email = column("users", "email").default_expr("");
        assert_eq!(tags(&email), vec![ColumnTag::RequireInsert]);
    }

    #[test]
    fn test_not_null_with_default() {
        let created = column("users", "created_at").default_expr("now()");
        assert!(derive_tags(&created).is_empty());
    }

    #[test]
    fn test_nullable_regardless_of_default() {
        let bio = column("users", "bio").nullable();
        assert_eq!(tags(&bio), vec![ColumnTag::CanBeNull]);

        let bio = column("users", "bio").nullable().default_expr("''::text");
        assert_eq!(tags(&bio), vec![ColumnTag::CanBeNull]);
    }

    #[test]
    fn test_nullable_serial_keeps_rule_order() {
        let id = column("orders", "id")
            .nullable()
            .default_expr("nextval('orders_id_seq'::regclass)");
        assert_eq!(
            tags(&id),
            vec![
                ColumnTag::MustNotInsert,
                ColumnTag::MustNotUpdate,
                ColumnTag::CanBeNull
            ]
        );
    }

    #[test]
    fn test_tag_set_ignores_duplicates() {
        let set: ColumnTagSet = [ColumnTag::CanBeNull, ColumnTag::CanBeNull]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }
}
