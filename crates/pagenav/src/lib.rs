//! Script-driven front end for `page_nav`: load an HTML file, replay keys,
//! report where each one landed.

pub mod config;
pub mod replay;
pub mod script;

pub use config::PagenavConfig;
pub use replay::{StepReport, replay};
pub use script::{KeySpec, ScriptKey, parse_script, parse_token};
