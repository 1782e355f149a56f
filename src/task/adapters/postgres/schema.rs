//! Diesel schema for task persistence.

diesel::table! {
    /// Task records. `project_id` references `projects.id` with
    /// `ON DELETE CASCADE`.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 30]
        title -> Varchar,
        /// Task description.
        #[max_length = 150]
        description -> Varchar,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Timestamp of the last transition to done.
        closed_at -> Nullable<Timestamptz>,
        /// Optimistic-concurrency revision.
        revision -> Int8,
    }
}
