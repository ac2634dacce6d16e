use pdf2html_front::{build_args, ConversionRequest, Theme};

fn args(req: &ConversionRequest, pass_default_theme: bool) -> Vec<String> {
    build_args(req, pass_default_theme)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn count(args: &[String], token: &str) -> usize {
    args.iter().filter(|a| *a == token).count()
}

#[test]
fn body_only_with_default_theme() {
    let req = ConversionRequest::new("doc.pdf", "output/").body_only(true);
    assert_eq!(args(&req, false), vec!["doc.pdf", "-o", "output/", "--body-only"]);
}

#[test]
fn source_is_first_positional() {
    let req = ConversionRequest::new("/data/in/report.pdf", "site/")
        .no_toc(true)
        .theme(Theme::Minimal);
    let a = args(&req, false);
    assert_eq!(a[0], "/data/in/report.pdf");
}

#[test]
fn flags_appear_once_each() {
    let base = ConversionRequest::new("doc.pdf", "output/");

    let neither = args(&base, false);
    assert_eq!(count(&neither, "--body-only"), 0);
    assert_eq!(count(&neither, "--no-toc"), 0);

    let both = args(&base.clone().body_only(true).no_toc(true), false);
    assert_eq!(count(&both, "--body-only"), 1);
    assert_eq!(count(&both, "--no-toc"), 1);
    assert_eq!(both.len(), neither.len() + 2);
}

#[test]
fn non_default_theme_is_passed() {
    let req = ConversionRequest::new("doc.pdf", "output/").theme(Theme::Minimal);
    assert_eq!(
        args(&req, false),
        vec!["doc.pdf", "-o", "output/", "--theme", "minimal"]
    );
}

#[test]
fn default_theme_passed_when_configured() {
    let req = ConversionRequest::new("doc.pdf", "output/");
    assert_eq!(
        args(&req, true),
        vec!["doc.pdf", "-o", "output/", "--theme", "modern"]
    );
}

#[test]
fn empty_output_dir_omits_flag() {
    let req = ConversionRequest::new("doc.pdf", "");
    assert_eq!(args(&req, false), vec!["doc.pdf"]);
}

#[test]
fn batch_appends_flag_last() {
    let req = ConversionRequest::new("pdfs", "output/")
        .body_only(true)
        .theme(Theme::Minimal)
        .batch(true);
    assert_eq!(
        args(&req, false),
        vec!["pdfs", "-o", "output/", "--body-only", "--theme", "minimal", "--batch"]
    );
}

#[test]
fn theme_names_match_the_cli_flag_values() {
    assert_eq!(Theme::Minimal.to_string(), "minimal");
    assert_eq!(Theme::default().to_string(), "modern");
    assert!(Theme::Modern.is_default());
    assert!(!Theme::Minimal.is_default());
}
