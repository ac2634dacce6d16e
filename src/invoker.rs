use crate::{
    config::Config,
    engine::{Converter, Invocation},
    error::ConvertError,
    preview,
    report::ConversionReport,
    request::ConversionRequest,
    status::{Status, StatusSink},
    util::now_rfc3339,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Arguments for pdf2html, source path first.
pub fn build_args(req: &ConversionRequest, pass_default_theme: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![req.source.clone().into_os_string()];
    if !req.output_dir.is_empty() {
        args.push("-o".into());
        args.push(req.output_dir.clone().into());
    }
    if req.body_only {
        args.push("--body-only".into());
    }
    if req.no_toc {
        args.push("--no-toc".into());
    }
    if pass_default_theme || !req.theme.is_default() {
        args.push("--theme".into());
        args.push(req.theme.as_str().into());
    }
    if req.batch {
        args.push("--batch".into());
    }
    args
}

pub struct Invoker<C: Converter> {
    cfg: Config,
    converter: C,
}

impl<C: Converter> Invoker<C> {
    pub fn new(cfg: &Config, converter: C) -> Self {
        Self {
            cfg: cfg.clone(),
            converter,
        }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn invocation(&self, req: &ConversionRequest) -> Invocation {
        Invocation {
            program: self.converter.program().to_path_buf(),
            args: build_args(req, self.cfg.converter.pass_default_theme),
        }
    }

    /// Runs pdf2html once and returns its stdout verbatim on exit status zero.
    pub fn invoke(&self, req: &ConversionRequest) -> Result<String, ConvertError> {
        if req.batch && !req.source.is_dir() {
            return Err(ConvertError::FolderNotFound {
                path: req.source.display().to_string(),
            });
        }

        let inv = self.invocation(req);
        info!("pdf2html {:?}", inv.args_lossy());
        let out = self.converter.run(&inv.args)?;
        if !out.success {
            return Err(ConvertError::Failed {
                program: inv.program,
                code: out.code,
                diagnostic: out.diagnostic(),
            });
        }
        debug!("pdf2html stdout: {} bytes", out.stdout.len());
        Ok(out.stdout)
    }

    pub fn run(&self, req: &ConversionRequest, sink: &mut dyn StatusSink) -> ConversionReport {
        if req.batch {
            self.convert_folder(req, sink)
        } else {
            self.convert_file(req, sink)
        }
    }

    pub fn convert_file(&self, req: &ConversionRequest, sink: &mut dyn StatusSink) -> ConversionReport {
        let mut report = self.start_report(req);
        if req.source.as_os_str().is_empty() {
            return fail(report, ConvertError::NoInput, sink);
        }

        sink.emit(Status::Reading);
        let stdout = match self.invoke(req) {
            Ok(stdout) => stdout,
            Err(err) => return fail(report, err, sink),
        };
        report.ok = true;
        report.stdout = Some(stdout);

        let found = preview::locate_output(&self.cfg, &req.output_dir, &req.source)
            .and_then(|path| preview::read_preview(&self.cfg, &path));
        match found {
            Ok(pv) => {
                let mut message = format!(
                    "✅ Conversion complete!\n\n📄 Output: `{}`\n📊 File size: {:.1} KB",
                    pv.path.display(),
                    pv.size_kb()
                );
                if self.cfg.preview.enabled {
                    message.push_str("\n\nPreview will appear below...");
                }
                sink.emit(Status::Completed {
                    message: message.clone(),
                });
                if pv.truncated {
                    let note = format!("preview truncated to {} bytes", pv.content.len());
                    sink.emit(Status::Warning {
                        message: note.clone(),
                    });
                    report.warnings.push(note);
                }
                if self.cfg.preview.enabled {
                    sink.emit(Status::Preview {
                        path: pv.path.clone(),
                        content: pv.content,
                    });
                }
                report.message = message;
                report.output_file = Some(pv.path);
            }
            Err(err) => {
                warn!("preview unavailable: {err}");
                let expected = preview::candidate_paths(&self.cfg, &req.output_dir, &req.source);
                let message = match expected.first() {
                    Some(path) => format!(
                        "✅ Conversion complete!\n\n📄 Expected output: `{}`",
                        path.display()
                    ),
                    None => "✅ Conversion complete!".to_string(),
                };
                sink.emit(Status::Completed {
                    message: message.clone(),
                });
                let note = format!("Could not read preview: {err}");
                sink.emit(Status::Warning {
                    message: note.clone(),
                });
                report.message = message;
                report.warnings.push(note);
            }
        }

        report.finished = now_rfc3339();
        report
    }

    pub fn convert_folder(&self, req: &ConversionRequest, sink: &mut dyn StatusSink) -> ConversionReport {
        let folder = req.source.to_string_lossy().trim().to_string();
        let req = ConversionRequest {
            source: PathBuf::from(&folder),
            batch: true,
            ..req.clone()
        };
        let mut report = self.start_report(&req);

        if folder.is_empty() {
            return fail(report, ConvertError::NoFolder, sink);
        }
        if !req.source.is_dir() {
            return fail(report, ConvertError::FolderNotFound { path: folder }, sink);
        }

        sink.emit(Status::Scanning);
        let pdf_count = match count_pdfs(&req.source) {
            Ok(n) => n,
            Err(source) => {
                return fail(report, ConvertError::FolderUnreadable { path: folder, source }, sink);
            }
        };
        report.pdf_count = Some(pdf_count);
        sink.emit(Status::Found { pdf_count });
        sink.emit(Status::Starting);

        let stdout = match self.invoke(&req) {
            Ok(stdout) => stdout,
            Err(err) => return fail(report, err, sink),
        };

        let out = req.output_dir.trim_end_matches('/');
        let index = Path::new(if out.is_empty() { "." } else { out }).join("index.html");
        let message = format!(
            "✅ Batch conversion complete!\n\n📁 Folder: {folder}\n📊 Processed: {pdf_count} files\n📁 Output: {}\n\nYou can now deploy this directory to Vercel.",
            index.display()
        );
        sink.emit(Status::Completed {
            message: message.clone(),
        });

        report.ok = true;
        report.stdout = Some(stdout);
        report.message = message;
        report.output_file = Some(index);
        report.finished = now_rfc3339();
        report
    }

    fn start_report(&self, req: &ConversionRequest) -> ConversionReport {
        let now = now_rfc3339();
        ConversionReport {
            ok: false,
            batch: req.batch,
            source: req.source.clone(),
            output_dir: req.output_dir.clone(),
            args: self.invocation(req).args_lossy(),
            message: String::new(),
            stdout: None,
            output_file: None,
            pdf_count: None,
            warnings: Vec::new(),
            started: now.clone(),
            finished: now,
        }
    }
}

fn fail(mut report: ConversionReport, err: ConvertError, sink: &mut dyn StatusSink) -> ConversionReport {
    let message = err.user_message();
    warn!("conversion failed: {err}");
    sink.emit(Status::Failed {
        message: message.clone(),
    });
    report.ok = false;
    report.message = message;
    report.finished = now_rfc3339();
    report
}

/// Counts direct children with a `.pdf` extension, any case.
pub fn count_pdfs(folder: &Path) -> std::io::Result<usize> {
    let mut n = 0;
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            n += 1;
        }
    }
    Ok(n)
}
