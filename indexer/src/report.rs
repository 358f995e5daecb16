use std::io::Write;

/// Destination for user-facing CLI output.
pub trait Reporter: Send + Sync {
    fn report(&self, line: &str);
}

/// Writes each line to stdout.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Render find results, highest count first, ties by title.
pub fn report_hits(reporter: &dyn Reporter, hits: &std::collections::HashMap<String, usize>) {
    if hits.is_empty() {
        reporter.report("No entries");
        return;
    }
    let mut rows: Vec<(&String, &usize)> = hits.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    reporter.report("Entries:");
    for (title, count) in rows {
        reporter.report(&format!("{title}; entries: {count}"));
    }
}
