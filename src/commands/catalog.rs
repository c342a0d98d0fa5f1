//! Implementation of the `flipflop catalog` command.

use super::Context;
use flipflop::error::Result;

/// List categories and subcategories with the number of items visible
/// under the selected classifications.
pub fn cmd_catalog(ctx: &Context) -> Result<String> {
    let catalog = ctx.load_catalog()?;
    let filter = ctx.filter();

    let classes: Vec<&str> = filter.iter().map(|c| c.as_str()).collect();
    let mut lines = vec![format!(
        "{} snippets, showing {}",
        catalog.len(),
        if classes.is_empty() {
            "nothing".to_string()
        } else {
            classes.join(", ")
        }
    )];

    for category in catalog.categories() {
        let visible = catalog.items_for(category, None, &filter).len();
        lines.push(format!("{} ({})", category, visible));
        for sub in catalog.subcategories(category) {
            let visible = catalog.items_for(category, Some(sub), &filter).len();
            lines.push(format!("  {} ({})", sub, visible));
        }
    }

    if !catalog.load_warnings().is_empty() {
        lines.push(format!("{} entries skipped", catalog.load_warnings().len()));
    }
    Ok(lines.join("\n"))
}
