//! Parsers for the analyzer's textual output.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::OnceLock;

use pltsync_diagnostics::{DiagnosticRecord, Location};
use regex::Regex;

/// Kind tag given to every record parsed from check output.
pub const WARNING_KIND: &str = "warning";

/// Banner preceding the file list in `--plt_info` output.
const PLT_INFO_BANNER: &str = "includes the following files:";

/// Matches `<file>:<line>[:<col>]: <message>`.
fn warning_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<file>[^\s:][^:]*):(?P<line>\d+)(?::\d+)?: (?P<msg>.*)$")
            .expect("warning pattern is valid")
    })
}

/// Parses check output into records, in output order.
///
/// A record starts at every `file:line:` line; continuation lines that follow
/// are appended to its message. Progress banners and blank lines are
/// ignored.
pub fn parse_warnings(output: &str) -> Vec<DiagnosticRecord> {
    let mut records = Vec::new();
    let mut current: Option<(Location, String)> = None;

    for line in output.lines() {
        if let Some(caps) = warning_line().captures(line) {
            if let Some((loc, msg)) = current.take() {
                records.push(finish(loc, msg));
            }
            let Ok(line_no) = caps["line"].parse::<u32>() else {
                continue;
            };
            current = Some((
                Location::new(&caps["file"], line_no),
                caps["msg"].trim_end().to_string(),
            ));
        } else if is_continuation(line) {
            if let Some((_, msg)) = current.as_mut() {
                msg.push('\n');
                msg.push_str(line.trim());
            }
        } else if let Some((loc, msg)) = current.take() {
            records.push(finish(loc, msg));
        }
    }

    if let Some((loc, msg)) = current {
        records.push(finish(loc, msg));
    }
    records
}

/// Continuation lines are indented by at least two columns; progress
/// banners use a single leading space.
fn is_continuation(line: &str) -> bool {
    (line.starts_with("  ") || line.starts_with('\t')) && !line.trim().is_empty()
}

fn finish(location: Location, message: String) -> DiagnosticRecord {
    DiagnosticRecord::new(WARNING_KIND, location, serde_json::Value::String(message))
}

/// Extracts the recorded file list from `--plt_info` output.
///
/// Returns `None` if the banner is missing. Every double-quoted string
/// after the banner is a file path.
pub fn parse_plt_info(output: &str) -> Option<BTreeSet<PathBuf>> {
    let start = output.find(PLT_INFO_BANNER)? + PLT_INFO_BANNER.len();
    Some(
        quoted_strings(&output[start..])
            .into_iter()
            .map(PathBuf::from)
            .collect(),
    )
}

/// Collects the contents of double-quoted strings, honoring backslash escapes.
fn quoted_strings(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '"' {
            continue;
        }
        let mut s = String::new();
        while let Some(c) = chars.next() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        s.push(escaped);
                    }
                }
                _ => s.push(c),
            }
        }
        out.push(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHECK_OUTPUT: &str = "\
  Proceeding with analysis...
/home/u/app/src/foo.erl:12:1: Function bar/0 has no local return
/home/u/app/src/foo.erl:20: The pattern
          'ok' can never match the type
          'error'
/home/u/app/src/baz.erl:3:5: Call to missing or unexported function x:y/0
 done in 0m1.2s
done (warnings were emitted)
";

    #[test]
    fn parses_records_in_order() {
        let recs = parse_warnings(CHECK_OUTPUT);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].location, Location::new("/home/u/app/src/foo.erl", 12));
        assert_eq!(recs[0].payload, json!("Function bar/0 has no local return"));
        assert_eq!(recs[1].location.line, 20);
        assert_eq!(
            recs[1].payload,
            json!("The pattern\n'ok' can never match the type\n'error'")
        );
        assert_eq!(recs[2].location.file, "/home/u/app/src/baz.erl");
        assert!(recs.iter().all(|r| r.kind == WARNING_KIND));
    }

    #[test]
    fn trailing_banner_is_not_a_continuation() {
        let recs = parse_warnings(CHECK_OUTPUT);
        let msg = recs[2].payload.as_str().unwrap();
        assert!(!msg.contains("done"));
    }

    #[test]
    fn no_warnings() {
        let out = "  Checking whether the PLT app.plt is up-to-date... yes\n done (passed successfully)\n";
        assert!(parse_warnings(out).is_empty());
    }

    #[test]
    fn relative_file_names() {
        let recs = parse_warnings("foo.erl:7: Guard test can never succeed\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].location, Location::new("foo.erl", 7));
    }

    #[test]
    fn plt_info_file_list() {
        let out = "\
The PLT /tmp/app.plt includes the following files:
[\"/proj/ebin/a.beam\",\"/proj/ebin/b.beam\",
 \"/proj/ebin/c.beam\"]
";
        let files = parse_plt_info(out).unwrap();
        let expected: BTreeSet<PathBuf> = ["/proj/ebin/a.beam", "/proj/ebin/b.beam", "/proj/ebin/c.beam"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn plt_info_empty_list() {
        let out = "The PLT /tmp/app.plt includes the following files:\n[]\n";
        assert!(parse_plt_info(out).unwrap().is_empty());
    }

    #[test]
    fn plt_info_missing_banner() {
        assert!(parse_plt_info("dialyzer: Could not find the PLT\n").is_none());
    }

    #[test]
    fn quoted_escapes() {
        assert_eq!(
            quoted_strings(r#"["a\"b", "c\\d"]"#),
            vec!["a\"b".to_string(), "c\\d".to_string()]
        );
    }
}
