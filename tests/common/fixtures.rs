//! Static log corpora used across harnesses.

/// One line per classifier outcome, in `Severity::ALL` order.
pub const CORPUS_ONE_EACH: &[&str] = &[
    "2024-01-15 10:00:00 INFO  Starting application version 2.4.1",
    "2024-01-15 10:00:01 WARN  Disk usage at 92% on /dev/sda1",
    "2024-01-15 10:00:02 ERRO  Failed to connect to database after 3 retries",
    "2024-01-15 10:00:03 DEBU  Cache miss key=user:42",
    "2024-01-15 10:00:04 FATA  Out of memory",
    "GET /api/v1/users 200 47ms",
];

/// Lines that trip the token priority order or look like levels but are not.
pub const CORPUS_TRICKY: &[&str] = &[
    // Both tokens; INFO is checked first.
    "WARN retry scheduled, INFO follows",
    // Long forms contain the short tokens.
    "ERROR: NullPointerException at App.handle(App.java:42)",
    "DEBUG o.s.w.s.DispatcherServlet - Initializing",
    "FATAL panic: index out of bounds",
    // Case matters.
    "info: lowercase is not a level",
    "Warning: mixed case is not a level",
    // Token embedded in a word still counts.
    "xINFOx",
];

/// Login scenario used by the text + severity filter tests.
pub const CORPUS_LOGIN: &[&str] = &["INFO login ok", "ERRO login failed"];

/// `n` synthetic lines cycling through every classifier outcome.
pub fn corpus_high_volume(n: usize) -> String {
    const TOKENS: [&str; 6] = ["INFO", "WARN", "ERRO", "DEBU", "FATA", "----"];
    let mut out = String::with_capacity(n * 64);
    for i in 0..n {
        out.push_str(&format!(
            "2024-01-15 10:{:02}:{:02} {} request {} served by worker-{}\n",
            (i / 60) % 60,
            i % 60,
            TOKENS[i % TOKENS.len()],
            i,
            i % 8
        ));
    }
    out
}
