pub mod category;
pub mod change;
pub mod error;
pub mod mcp_api;
pub mod model;
pub mod pulse;
pub mod recommendation;
pub mod reporter;
pub mod screen;
pub mod tally;
