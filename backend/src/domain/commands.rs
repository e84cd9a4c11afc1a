//! Command and result types for the domain services.

pub mod child {
    use crate::domain::models::child::{ActiveChild, Child};

    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        pub birthdate: String, // ISO 8601 date format (YYYY-MM-DD)
    }

    #[derive(Debug, Clone)]
    pub struct CreateChildResult {
        pub child: Child,
    }

    #[derive(Debug, Clone)]
    pub struct GetChildCommand {
        pub child_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetChildResult {
        pub child: Option<Child>,
    }

    #[derive(Debug, Clone)]
    pub struct ListChildrenResult {
        pub children: Vec<Child>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateChildCommand {
        pub child_id: String,
        pub name: Option<String>,
        pub birthdate: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateChildResult {
        pub child: Child,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteChildCommand {
        pub child_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteChildResult {
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct SetActiveChildCommand {
        pub child_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct SetActiveChildResult {
        pub child: Child,
    }

    #[derive(Debug, Clone)]
    pub struct GetActiveChildResult {
        pub active_child: ActiveChild,
    }
}

pub mod reading {
    use chrono::NaiveDate;

    use crate::domain::models::reading::Reading;

    #[derive(Debug, Clone)]
    pub struct ComputeReadingCommand {
        pub child_id: String,
        /// Reference date for age calculation and the is_current flags
        pub today: NaiveDate,
    }

    #[derive(Debug, Clone)]
    pub struct ComputeReadingResult {
        pub reading: Reading,
    }

    #[derive(Debug, Clone)]
    pub struct SaveReadingCommand {
        pub child_id: String,
        pub today: NaiveDate,
    }

    #[derive(Debug, Clone)]
    pub struct SaveReadingResult {
        pub reading: Reading,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListReadingsCommand {
        pub child_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListReadingsResult {
        pub readings: Vec<Reading>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteReadingCommand {
        pub reading_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteReadingResult {
        pub success_message: String,
    }
}
