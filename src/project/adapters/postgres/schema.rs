//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Unique project name.
        #[max_length = 30]
        name -> Varchar,
        /// Project description.
        #[max_length = 150]
        description -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
