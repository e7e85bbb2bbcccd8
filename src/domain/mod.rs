pub mod outputs;
pub mod schema;
pub mod types;

pub use schema::{OutputSchema, SchemaError, SchemaRegistry};
pub use types::{ChatTurn, CompletionResult, ToolSelection, TurnRole};
