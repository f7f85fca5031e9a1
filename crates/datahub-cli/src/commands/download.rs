//! Download request synthesis for checked children.

use clap::Args;

use datahub_browser::{HierarchyBrowser, Route};
use datahub_core::AppError;

use super::Context;

/// Arguments for `download-url`
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Route of the container
    pub route: String,
    /// Names of the children to download; the whole container when empty
    pub names: Vec<String>,
}

/// Execute `download-url`
pub async fn execute(args: &DownloadArgs, ctx: &Context) -> Result<(), AppError> {
    let route: Route = args.route.parse()?;
    let mut browser = HierarchyBrowser::open_route(
        ctx.api.clone(),
        ctx.session.clone(),
        &route,
        ctx.page_size(),
    )
    .await?;

    let form = if args.names.is_empty() {
        browser.download_container()
    } else {
        for name in &args.names {
            browser.check_by_name(name, true)?;
        }
        browser.download_checked()?
    };
    println!("{}", form.to_url()?);
    Ok(())
}
