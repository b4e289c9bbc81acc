//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
///
/// Lines present on only one side are shown too, so a truncated render
/// still produces a useful diff.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let mut exp = expected.lines();
    let mut act = actual.lines();
    let mut line = 0;
    loop {
        line += 1;
        match (exp.next(), act.next()) {
            (None, None) => break,
            (Some(e), Some(a)) if e == a => {}
            (e, a) => {
                out.push_str(&format!("@@ line {line} @@\n"));
                if let Some(e) = e {
                    out.push_str(&format!("-{e}\n"));
                }
                if let Some(a) = a {
                    out.push_str(&format!("+{a}\n"));
                }
            }
        }
    }
    // Same lines, different trailing bytes (e.g. newline).
    if !out.contains("@@") {
        out.push_str(&format!("@@ bytes @@\n-{expected:?}\n+{actual:?}\n"));
    }
    out
}
