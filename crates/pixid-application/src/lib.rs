pub mod orchestrator;
pub mod view;

pub use orchestrator::InteractionOrchestrator;
pub use view::SessionView;
