pub mod debate;
pub mod error;
pub mod participants;
pub mod portfolio;
pub mod projection;
pub mod screening;
pub mod simulation;

pub use error::ToolkitError;
pub use participants::{Evaluation, Participant};
pub use debate::{
    DebateCoordinator,
    DebateError,
};
pub use portfolio::{
    AssetAllocation,
    AssetClassStats,
    PortfolioStats,
};
pub use projection::{
    ContributionPhase,
    ProjectionOutcome,
    ProjectionPlan,
    ScenarioKind,
};
pub use screening::{
    screen,
    ScreeningResult,
    StockRecord,
    Tier1Criteria,
};
pub use simulation::{
    MonteCarloSimulator,
    SimulationConfig,
    SimulationSummary,
};
