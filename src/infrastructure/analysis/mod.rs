mod crew;
mod crew_engine;
mod scaffold_engine;

pub use crew::{AgentRole, CrewTask, TASKS};
pub use crew_engine::CrewAnalysisEngine;
pub use scaffold_engine::ScaffoldAnalysisEngine;
