//! Diesel schema for the project and task tables consumed by the importer.

diesel::table! {
    /// Projects keyed by local repository path.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Local repository path, unique across projects.
        repo_path -> Text,
        /// Free-form project metadata.
        metadata -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, including those imported from merged pull requests.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Owning project.
        project_id -> Uuid,
        /// Completion timestamp for finished tasks.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Free-form task metadata; imported tasks carry `pr_number`.
        metadata -> Jsonb,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
