use rbundle_select::Candidate;

use crate::model::Manifest;

/// Render the human-readable `index.md` for a bundle.
///
/// Header entries each carry their own trailing newline before the lines are
/// joined, so they are separated by blank lines while the numbered file list
/// stays tight. Ages come from `selected` unrounded; the manifest copy is
/// already rounded to two places.
#[must_use]
pub fn render_index(manifest: &Manifest, slug: &str, selected: &[Candidate]) -> String {
    let query = if manifest.query.is_empty() {
        "(none)"
    } else {
        manifest.query.as_str()
    };

    let mut lines = vec![
        format!("# NotebookLM bundle: {slug}\n"),
        format!("- Created: {}\n", manifest.created_at),
        format!("- Query: `{query}`\n"),
        format!("- Window: last {} days\n", manifest.days),
        format!("- Files: {}\n", selected.len()),
        "\n## Files\n".to_string(),
    ];

    lines.extend(selected.iter().enumerate().map(|(i, c)| {
        format!(
            "{}. `{}` ← `{}` (hits={}, ageDays={:.1})",
            i + 1,
            c.out_name,
            c.relative,
            c.hits,
            c.age_days
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
