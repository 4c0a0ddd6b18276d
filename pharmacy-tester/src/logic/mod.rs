pub mod harness;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use harness::TesterAssets;
pub use scenarios::{Scenario, ScenarioName};
pub use tester::*;
