//! Navigation links.

use clap::Args;

use datahub_browser::GlobalNav;
use datahub_core::AppError;

use super::Context;
use crate::output::{self, NavRow, OutputFormat};

/// Arguments for `nav`
#[derive(Debug, Args)]
pub struct NavArgs {
    /// Route to mark active
    #[arg(short, long, default_value = "collections")]
    pub active: String,
}

/// Execute `nav`
pub async fn execute(args: &NavArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    let mut nav = GlobalNav::new(ctx.session.bus(), ctx.config.ui.nav_items.clone());
    nav.set_admin(ctx.session.is_admin());
    let view = nav.render(&args.active);
    let rows: Vec<NavRow> = view.entries.iter().map(NavRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
