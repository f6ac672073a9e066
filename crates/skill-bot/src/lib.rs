//! Chat skills for the Mode network explorer and memecoin launches.

pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod reply;
pub mod skills;

pub use bot::Bot;
pub use command::{Command, FromParams, MissingParams, ParamValue, Params};
pub use error::{AppError, AppResult};
pub use registry::{ParamKind, ParamSpec, SkillDescriptor, SkillRegistry};
pub use reply::{HandlerResult, Responder, SignalResponder};
