//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Short description.
        description -> Text,
        /// Optional long description.
        long_description -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp, defaulted by the database.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}
