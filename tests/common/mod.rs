#![allow(dead_code)]

use pdf2html_front::{
    engine::{Converter, ProcessOutput},
    ConvertError,
};
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Stand-in for pdf2html that records every argument list it receives.
pub struct FakeConverter {
    pub program: PathBuf,
    pub reply: ProcessOutput,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl FakeConverter {
    pub fn ok(stdout: &str) -> Self {
        Self::with(ProcessOutput {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        })
    }

    pub fn failing(code: i32, stdout: &str, stderr: &str) -> Self {
        Self::with(ProcessOutput {
            code: Some(code),
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
        })
    }

    fn with(reply: ProcessOutput) -> Self {
        Self {
            program: PathBuf::from("/opt/pdf2html/pdf2html"),
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Converter for FakeConverter {
    fn program(&self) -> &Path {
        &self.program
    }

    fn is_installed(&self) -> bool {
        true
    }

    fn run(&self, args: &[OsString]) -> Result<ProcessOutput, ConvertError> {
        self.calls.borrow_mut().push(
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        );
        Ok(self.reply.clone())
    }
}
