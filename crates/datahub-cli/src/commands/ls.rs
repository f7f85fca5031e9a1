//! One-shot container listing.

use clap::Args;

use datahub_browser::{HierarchyBrowser, Route};
use datahub_core::AppError;

use super::Context;
use crate::output::{self, ChildRow, OutputFormat};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Route of the container, e.g. `collection/<id>/folder/<id>`
    pub route: String,
}

/// Execute `ls`
pub async fn execute(args: &LsArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    let route: Route = args.route.parse()?;
    let browser = HierarchyBrowser::open_route(
        ctx.api.clone(),
        ctx.session.clone(),
        &route,
        ctx.page_size(),
    )
    .await?;
    let view = browser.view();

    match format {
        OutputFormat::Json => output::print_json(&view),
        OutputFormat::Table => {
            output::print_breadcrumb(&view.breadcrumb);
            let mut rows: Vec<ChildRow> = view.folders.iter().map(ChildRow::from).collect();
            if let Some(items) = &view.items {
                rows.extend(items.iter().map(ChildRow::from));
            }
            if view.empty {
                println!("This {} is empty.", view.container.kind);
            } else {
                output::print_list(&rows, format);
            }
            if view.more_folders || view.more_items {
                println!("(more entries available)");
            }
        }
    }
    Ok(())
}
