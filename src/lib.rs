pub mod cli;
pub mod command;
pub mod config;
pub mod doctor;
pub mod engine;
pub mod error;
pub mod invoker;
pub mod preview;
pub mod report;
pub mod request;
pub mod status;
pub mod util;

pub use error::{ConvertError, ERROR_MARKER};
pub use invoker::{build_args, Invoker};
pub use request::{ConversionRequest, Theme};
