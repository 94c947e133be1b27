//! Path selection and failover.

/// Path used when a lane has no candidates of its own.
pub const DEFAULT_PATH: &str = "Primary link";

/// Pick the primary path uniformly from `paths` using one uniform draw.
///
/// The index is `floor(unit * len)`, clamped to the last entry so a draw of
/// exactly 1.0 cannot overrun. An empty list resolves to [`DEFAULT_PATH`].
pub fn choose_primary(paths: &[String], unit: f64) -> &str {
    if paths.is_empty() {
        return DEFAULT_PATH;
    }
    let idx = ((unit.max(0.0) * paths.len() as f64) as usize).min(paths.len() - 1);
    &paths[idx]
}

/// First candidate that differs from `primary`.
///
/// A single-path lane has no distinct fallback; the primary is returned and
/// a retransmit renders as `"A → A"`.
pub fn choose_fallback<'a>(paths: &'a [String], primary: &'a str) -> &'a str {
    paths
        .iter()
        .map(String::as_str)
        .find(|p| *p != primary)
        .unwrap_or(primary)
}

/// Display form of a failover.
pub fn render_failover(primary: &str, fallback: &str) -> String {
    format!("{primary} → {fallback}")
}
