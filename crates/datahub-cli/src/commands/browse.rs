//! Interactive hierarchy browser shell.

use std::str::FromStr;

use clap::Args;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

use datahub_browser::{ConfirmPrompt, GlobalNav, HierarchyBrowser, Route};
use datahub_core::AppError;
use datahub_core::error::ErrorKind;
use datahub_core::events::UiEvent;

use super::Context;
use crate::output::{self, ChildRow, MetaRow, NavRow, OutputFormat};

/// Arguments for `browse`
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Route to start at, e.g. `collection/<id>` or `folder/<id>`
    pub route: String,
}

/// Metadata shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// Show metadata
    Show,
    /// Add a key
    Add {
        /// New key
        key: String,
        /// Value text
        value: String,
    },
    /// Change a key and its value
    Edit {
        /// Existing key
        old: String,
        /// Key after the edit
        new: String,
        /// Value text
        value: String,
    },
    /// Remove a key
    Remove {
        /// Key
        key: String,
    },
}

/// One line typed into the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the current container
    List,
    /// Descend into a child folder
    Enter(String),
    /// Go up one level
    Up,
    /// Jump to a breadcrumb
    Crumb(usize),
    /// Tick checkboxes by name
    Check(Vec<String>),
    /// Clear checkboxes by name
    Uncheck(Vec<String>),
    /// Tick every checkbox
    All,
    /// Clear every checkbox
    None,
    /// Load the next page of children
    More,
    /// Pick the checked resources
    Pick,
    /// Discard picked resources
    Clear,
    /// Move picked resources here
    Move,
    /// Copy picked resources here
    Copy,
    /// Delete checked resources
    Delete,
    /// Delete the current folder
    DeleteFolder,
    /// Create a folder
    MakeFolder(String),
    /// Create an item
    MakeItem(String),
    /// Rename the current folder
    Edit(String),
    /// Print a download request
    Download,
    /// Metadata commands
    Meta(MetaCommand),
    /// Open an item page
    Open(String),
    /// Show navigation links
    Nav,
    /// Log in
    Login(String),
    /// Log out
    Logout,
    /// Show help
    Help,
    /// Leave the shell
    Quit,
}

fn rest(words: &[&str]) -> Result<String, AppError> {
    let text = words.join(" ");
    if text.is_empty() {
        Err(AppError::validation("A name is required"))
    } else {
        Ok(text)
    }
}

fn names(words: &[&str]) -> Result<Vec<String>, AppError> {
    if words.is_empty() {
        return Err(AppError::validation("At least one name is required"));
    }
    Ok(words.iter().map(|w| w.to_string()).collect())
}

impl FromStr for MetaCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            [] => Ok(Self::Show),
            ["add", key, value @ ..] => Ok(Self::Add {
                key: key.to_string(),
                value: value.join(" "),
            }),
            ["edit", old, new, value @ ..] => Ok(Self::Edit {
                old: old.to_string(),
                new: new.to_string(),
                value: value.join(" "),
            }),
            ["rm", key] => Ok(Self::Remove {
                key: key.to_string(),
            }),
            _ => Err(AppError::validation(
                "Usage: meta | meta add <key> <value> | meta edit <old> <new> <value> | meta rm <key>",
            )),
        }
    }
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (command, tail) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let words: Vec<&str> = tail.split_whitespace().collect();
        match command {
            "ls" => Ok(Self::List),
            "cd" if words == [".."] => Ok(Self::Up),
            "cd" => Ok(Self::Enter(rest(&words)?)),
            "up" => Ok(Self::Up),
            "crumb" => {
                let index = rest(&words)?
                    .parse()
                    .map_err(|_| AppError::validation("Usage: crumb <index>"))?;
                Ok(Self::Crumb(index))
            }
            "check" => Ok(Self::Check(names(&words)?)),
            "uncheck" => Ok(Self::Uncheck(names(&words)?)),
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            "more" => Ok(Self::More),
            "pick" => Ok(Self::Pick),
            "clear" => Ok(Self::Clear),
            "mv" => Ok(Self::Move),
            "cp" => Ok(Self::Copy),
            "rm" => Ok(Self::Delete),
            "rmdir" => Ok(Self::DeleteFolder),
            "mkdir" => Ok(Self::MakeFolder(rest(&words)?)),
            "mkitem" => Ok(Self::MakeItem(rest(&words)?)),
            "edit" => Ok(Self::Edit(rest(&words)?)),
            "download" => Ok(Self::Download),
            "meta" => Ok(Self::Meta(tail.parse()?)),
            "open" => Ok(Self::Open(rest(&words)?)),
            "nav" => Ok(Self::Nav),
            "login" => Ok(Self::Login(rest(&words)?)),
            "logout" => Ok(Self::Logout),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(AppError::validation(format!(
                "Unknown command '{other}'. Type 'help' for a list."
            ))),
        }
    }
}

const HELP: &str = "\
ls                      show the current container
cd <name> | cd ..       enter a child folder | go up
up                      go up one level
crumb <index>           jump to a breadcrumb
check/uncheck <name>..  tick or clear checkboxes
all | none              tick or clear every checkbox
more                    load more children
pick | clear            pick checked resources | discard picked
mv | cp                 move or copy picked resources here
rm                      delete checked resources
rmdir                   delete the current folder
mkdir <name>            create a folder
mkitem <name>           create an item
edit <name>             rename the current folder
download                print the download request
meta [add|edit|rm ..]   show or change folder metadata
open <item>             open an item
nav                     show navigation links
login <user> | logout   change the signed-in user
quit                    leave the shell";

/// The running shell: one browser, one navigation component, one alert
/// subscription.
struct Shell<'a> {
    ctx: &'a Context,
    browser: HierarchyBrowser,
    nav: GlobalNav,
    alerts: broadcast::Receiver<UiEvent>,
}

impl Shell<'_> {
    fn drain_alerts(&mut self) {
        loop {
            match self.alerts.try_recv() {
                Ok(UiEvent::Alert(alert)) => output::print_alert(&alert),
                Ok(UiEvent::HierarchyRoute { route }) => debug!(%route, "Route changed"),
                Ok(_) => {}
                Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        self.browser.sync_events();
        self.nav.sync();
    }

    fn confirm<A>(&self, prompt: &ConfirmPrompt<A>) -> Result<(), AppError> {
        let answer = dialoguer::Confirm::new()
            .with_prompt(format!("{} [{}]", prompt.text, prompt.yes_text))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        accept(answer)
    }

    fn show(&self) {
        let view = self.browser.view();
        output::print_breadcrumb(&view.breadcrumb);
        let mut rows: Vec<ChildRow> = view.folders.iter().map(ChildRow::from).collect();
        if let Some(items) = &view.items {
            rows.extend(items.iter().map(ChildRow::from));
        }
        if view.empty {
            println!("This {} is empty.", view.container.kind);
        } else {
            output::print_list(&rows, OutputFormat::Table);
        }
        if view.more_folders || view.more_items {
            println!("(type 'more' to load more)");
        }
        let menu = &view.menu;
        if menu.checked_count() > 0 {
            output::print_kv("Checked", &menu.checked_count().to_string());
        }
        if menu.picked_count > 0 {
            output::print_kv("Picked", &menu.picked_desc);
            output::print_kv(
                "Picked actions",
                match (menu.picked_move_allowed, menu.picked_copy_allowed) {
                    (true, _) => "mv, cp",
                    (false, true) => "cp",
                    (false, false) => "none here",
                },
            );
        }
    }

    fn show_metadata(&self) {
        match self.browser.metadata() {
            Some(panel) => {
                let rows: Vec<MetaRow> = panel.view().fields.iter().map(MetaRow::from).collect();
                output::print_list(&rows, OutputFormat::Table);
            }
            None => output::print_warning("Only folders carry metadata here"),
        }
    }

    fn child_folder(&self, name: &str) -> Result<datahub_core::types::ResourceId, AppError> {
        self.browser
            .folders()
            .find_by_name(name)
            .map(|f| f.id.clone())
            .ok_or_else(|| AppError::not_found(format!("No folder named {name} here")))
    }

    fn meta_position(&self, key: &str) -> Result<usize, AppError> {
        self.browser
            .metadata()
            .and_then(|m| m.position(key))
            .ok_or_else(|| AppError::not_found(format!("No metadata key {key}")))
    }

    /// Run one command. Returns `false` when the shell should exit.
    async fn run(&mut self, command: ShellCommand) -> Result<bool, AppError> {
        match command {
            ShellCommand::List => self.show(),
            ShellCommand::Enter(name) => {
                let id = self.child_folder(&name)?;
                self.browser.descend(&id).await?;
                self.show();
            }
            ShellCommand::Up => {
                self.browser.ascend().await?;
                self.show();
            }
            ShellCommand::Crumb(index) => {
                self.browser.breadcrumb_clicked(index).await?;
                self.show();
            }
            ShellCommand::Check(names) => {
                for name in names {
                    self.browser.check_by_name(&name, true)?;
                }
            }
            ShellCommand::Uncheck(names) => {
                for name in names {
                    self.browser.check_by_name(&name, false)?;
                }
            }
            ShellCommand::All => self.browser.check_all(true),
            ShellCommand::None => self.browser.check_all(false),
            ShellCommand::More => {
                let mut loaded = 0;
                if self.browser.folders().has_more() {
                    loaded += self.browser.show_more_folders().await?;
                }
                if self.browser.items().is_some_and(|i| i.has_more()) {
                    loaded += self.browser.show_more_items().await?;
                }
                println!("Loaded {loaded} more.");
            }
            ShellCommand::Pick => {
                self.browser.pick_checked()?;
            }
            ShellCommand::Clear => self.browser.clear_picked(true),
            ShellCommand::Move => self.browser.move_picked().await?,
            ShellCommand::Copy => self.browser.copy_picked().await?,
            ShellCommand::Delete => {
                let prompt = self.browser.request_delete_checked()?;
                self.confirm(&prompt)?;
                self.browser.confirm(prompt).await?;
                self.show();
            }
            ShellCommand::DeleteFolder => {
                let prompt = self.browser.request_delete_container()?;
                self.confirm(&prompt)?;
                self.browser.confirm(prompt).await?;
                self.show();
            }
            ShellCommand::MakeFolder(name) => {
                let folder = self.browser.create_folder(&name, "").await?;
                output::print_success(&format!("Created folder {}", folder.name));
            }
            ShellCommand::MakeItem(name) => {
                let item = self.browser.create_item(&name, "").await?;
                output::print_success(&format!("Created item {}", item.name));
            }
            ShellCommand::Edit(name) => {
                let description = match self.browser.current().as_folder() {
                    Some(folder) => folder.description.clone(),
                    None => String::new(),
                };
                self.browser.edit_container(&name, &description).await?;
            }
            ShellCommand::Download => {
                let form = if self.browser.menu().can_download() {
                    self.browser.download_checked()?
                } else {
                    self.browser.download_container()
                };
                println!("{} {}", form.method, form.to_url()?);
            }
            ShellCommand::Meta(meta) => self.run_meta(meta).await?,
            ShellCommand::Open(name) => {
                let id = self
                    .browser
                    .items()
                    .and_then(|items| items.find_by_name(&name))
                    .map(|i| i.id.clone())
                    .ok_or_else(|| AppError::not_found(format!("No item named {name} here")))?;
                let route = self.browser.item_clicked(&id)?;
                println!("{route}");
                return Ok(false);
            }
            ShellCommand::Nav => {
                let route = self.browser.route();
                self.nav.render(route.section());
                let rows: Vec<NavRow> = self.nav.view().entries.iter().map(NavRow::from).collect();
                output::print_list(&rows, OutputFormat::Table);
            }
            ShellCommand::Login(login) => {
                let password = super::prompt_password()?;
                self.ctx.log_in(&login, &password).await?;
            }
            ShellCommand::Logout => self.ctx.log_out().await?,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn run_meta(&mut self, command: MetaCommand) -> Result<(), AppError> {
        match command {
            MetaCommand::Show => {}
            MetaCommand::Add { key, value } => {
                let index = self.browser.add_metadata_field()?;
                if let Err(e) = self.browser.save_metadata_field(index, &key, &value).await {
                    self.browser.cancel_metadata_field(index)?;
                    return Err(e);
                }
            }
            MetaCommand::Edit { old, new, value } => {
                let index = self.meta_position(&old)?;
                self.browser.edit_metadata_field(index)?;
                if let Err(e) = self.browser.save_metadata_field(index, &new, &value).await {
                    self.browser.cancel_metadata_field(index)?;
                    return Err(e);
                }
            }
            MetaCommand::Remove { key } => {
                let index = self.meta_position(&key)?;
                let prompt = self.browser.request_delete_metadata(index)?;
                self.confirm(&prompt)?;
                self.browser.confirm_metadata(prompt).await?;
            }
        }
        self.show_metadata();
        Ok(())
    }
}

/// A declined confirmation aborts the command without an alert.
fn accept(answer: bool) -> Result<(), AppError> {
    if answer {
        Ok(())
    } else {
        Err(AppError::cancelled("Cancelled."))
    }
}

/// Execute `browse`
pub async fn execute(args: &BrowseArgs, ctx: &Context) -> Result<(), AppError> {
    let route: Route = args.route.parse()?;
    let alerts = ctx.session.bus().subscribe();
    let mut nav = GlobalNav::new(ctx.session.bus(), ctx.config.ui.nav_items.clone());
    nav.set_admin(ctx.session.is_admin());
    let browser = HierarchyBrowser::open_route(
        ctx.api.clone(),
        ctx.session.clone(),
        &route,
        ctx.page_size(),
    )
    .await?;

    let mut shell = Shell {
        ctx,
        browser,
        nav,
        alerts,
    };
    shell.show();

    loop {
        let prompt = shell.browser.route().to_string();
        let line: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match line.parse::<ShellCommand>() {
            Ok(command) => shell.run(command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.kind == ErrorKind::Cancelled => debug!("Command cancelled"),
            Err(e) => ctx.session.report(&e),
        }
        shell.drain_alerts();
    }
    Ok(())
}
