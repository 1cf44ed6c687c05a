//! Canonical table catalog
//!
//! The fixed target data model every export must conform to. The
//! downstream importer understands exactly these tables; column order
//! here is the order canonical columns appear in export headers, so it
//! must not be rearranged.

/// One table in the canonical catalog: a name plus its typed columns in
/// significant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalTable {
    name: &'static str,
    columns: &'static [(&'static str, &'static str)],
}

impl CanonicalTable {
    /// Table name, the unique key into the catalog.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Columns as `(name, type label)` pairs in catalog order.
    pub fn columns(&self) -> &'static [(&'static str, &'static str)] {
        self.columns
    }

    /// Type label for a column, if the column is canonical.
    pub fn column_type(&self, column: &str) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, type_label)| *type_label)
    }

    /// True when `column` belongs to this table.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_type(column).is_some()
    }
}

/// The canonical export catalog.
///
/// Pure static data, constructed at compile time; there is no mutation
/// API. An unknown table name is a caller error surfaced by the export
/// session, not by this catalog.
pub struct CanonicalSchema;

static TABLES: &[CanonicalTable] = &[
    CanonicalTable {
        name: "Activity",
        columns: &[
            ("ActivityUserID", "int"),
            ("RegardingUserID", "int"),
            ("Story", "text"),
            ("InsertUserID", "int"),
            ("DateInserted", "datetime"),
        ],
    },
    CanonicalTable {
        name: "Category",
        columns: &[
            ("CategoryID", "int"),
            ("Name", "varchar(30)"),
            ("Description", "varchar(250)"),
            ("ParentCategoryID", "int"),
            ("DateInserted", "datetime"),
            ("InsertUserID", "int"),
            ("DateUpdated", "datetime"),
            ("UpdateUserID", "int"),
        ],
    },
    CanonicalTable {
        name: "Comment",
        columns: &[
            ("CommentID", "int"),
            ("DiscussionID", "int"),
            ("DateInserted", "datetime"),
            ("InsertUserID", "int"),
            ("DateUpdated", "datetime"),
            ("UpdateUserID", "int"),
            ("Format", "varchar(20)"),
            ("Body", "text"),
            ("Score", "float"),
        ],
    },
    CanonicalTable {
        name: "Conversation",
        columns: &[
            ("ConversationID", "int"),
            ("FirstMessageID", "int"),
            ("DateInserted", "datetime"),
            ("InsertUserID", "int"),
            ("DateUpdated", "datetime"),
            ("UpdateUserID", "int"),
        ],
    },
    CanonicalTable {
        name: "ConversationMessage",
        columns: &[
            ("MessageID", "int"),
            ("ConversationID", "int"),
            ("Body", "text"),
            ("InsertUserID", "int"),
            ("DateInserted", "datetime"),
        ],
    },
    CanonicalTable {
        name: "Discussion",
        columns: &[
            ("DiscussionID", "int"),
            ("Name", "varchar(100)"),
            ("Body", "text"),
            ("CategoryID", "int"),
            ("DateInserted", "datetime"),
            ("InsertUserID", "int"),
            ("DateUpdated", "datetime"),
            ("UpdateUserID", "int"),
            ("Score", "float"),
            ("Closed", "tinyint"),
            ("Announce", "tinyint"),
        ],
    },
    CanonicalTable {
        name: "Role",
        columns: &[
            ("RoleID", "int"),
            ("Name", "varchar(100)"),
            ("Description", "varchar(200)"),
            ("CanSession", "tinyint"),
        ],
    },
    CanonicalTable {
        name: "User",
        columns: &[
            ("UserID", "int"),
            ("Name", "varchar(20)"),
            ("Email", "varchar(200)"),
            ("Password", "varbinary(34)"),
            ("Score", "float"),
            ("InviteUserID", "int"),
            ("HourOffset", "int"),
            ("CountDiscussions", "int"),
            ("CountComments", "int"),
            ("PhotoPath", "varchar(255)"),
            ("DateOfBirth", "datetime"),
            ("DateFirstVisit", "datetime"),
            ("DateLastActive", "datetime"),
            ("DateInserted", "datetime"),
            ("DateUpdated", "datetime"),
        ],
    },
    CanonicalTable {
        name: "UserConversation",
        columns: &[
            ("UserID", "int"),
            ("ConversationID", "int"),
            ("LastMessageID", "int"),
        ],
    },
    CanonicalTable {
        name: "UserDiscussion",
        columns: &[
            ("UserID", "int"),
            ("DiscussionID", "int"),
            ("Bookmarked", "tinyint"),
            ("DateLastViewed", "datetime"),
            ("CountComments", "int"),
        ],
    },
    CanonicalTable {
        name: "UserMeta",
        columns: &[
            ("UserID", "int"),
            ("Name", "varchar(255)"),
            ("Value", "text"),
        ],
    },
    CanonicalTable {
        name: "UserRole",
        columns: &[("UserID", "int"), ("RoleID", "int")],
    },
];

impl CanonicalSchema {
    /// All canonical tables in catalog order.
    pub fn tables() -> &'static [CanonicalTable] {
        TABLES
    }

    /// Looks up a table by name.
    pub fn get(name: &str) -> Option<&'static CanonicalTable> {
        TABLES.iter().find(|table| table.name == name)
    }

    /// Table names in catalog order.
    pub fn table_names() -> impl Iterator<Item = &'static str> {
        TABLES.iter().map(|table| table.name)
    }
}
