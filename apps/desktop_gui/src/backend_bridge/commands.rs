//! Backend commands queued from UI to backend worker.

use shared::domain::SearchQuery;

pub enum BackendCommand {
    Search { query: SearchQuery },
    Locate { at_startup: bool },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Search { .. } => "search",
            BackendCommand::Locate { .. } => "locate",
        }
    }
}
