pub use pawgrove_core::{AgentKind, EntityId, Species};
pub mod agent {
    pub use pawgrove_core::agent::*;
}
pub mod animal {
    pub use pawgrove_core::animal::*;
}
pub mod config {
    pub use pawgrove_core::config::*;
}
pub mod events {
    pub use pawgrove_core::events::*;
}
pub mod grid {
    pub use pawgrove_core::grid::*;
}
pub mod snapshot {
    pub use pawgrove_core::snapshot::*;
}
pub mod species {
    pub use pawgrove_core::species::*;
}
pub mod world {
    pub use pawgrove_core::world::*;
}

pub mod history;
