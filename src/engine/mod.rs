pub mod external;
pub mod types;

use crate::error::ConvertError;
use std::ffi::OsString;
use std::path::Path;

pub use types::{Invocation, ProcessOutput};

/// Something that can run the pdf2html program with a given argument list.
pub trait Converter {
    fn program(&self) -> &Path;
    fn is_installed(&self) -> bool;
    fn run(&self, args: &[OsString]) -> Result<ProcessOutput, ConvertError>;
}
