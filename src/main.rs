//! Command-line client for the college search backend.
//!
//! # Usage
//!
//! ```bash
//! # One-shot search (falls back to bundled data if the backend is down)
//! college-search search --state California --sort rating
//!
//! # Look up one college
//! college-search details "Stanford"
//!
//! # Backend maintenance
//! college-search health
//! college-search setup --yes
//!
//! # Export the matching colleges as CSV
//! college-search export --state Texas --out ./exports
//!
//! # Preferences
//! college-search favorites toggle "Rice University"
//! college-search dark-mode on
//!
//! # Line-oriented search form
//! college-search interactive
//! ```
//!
//! # Environment Variables
//!
//! See the `config` module; a `.env` file in the working directory is loaded
//! first.

use college_search::application::services::export_service::export_csv;
use college_search::application::services::{Origin, Resolution};
use college_search::application::session::{Action, NoticeKind, SearchSession, Status};
use college_search::bootstrap::{build_state, init_tracing};
use college_search::config;
use college_search::domain::entities::{COMPARE_CAPACITY, College, SearchParams};
use college_search::domain::fields::SearchField;
use college_search::domain::projection::{
    Page, ResultStats, SortKey, compute_stats, project, sort_colleges,
};
use college_search::domain::query::build_query;
use college_search::domain::repositories::CollegeSource;
use college_search::state::AppState;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Search colleges, compare them and export results.
#[derive(Parser)]
#[command(name = "college-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Never contact the backend; answer from bundled data
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search colleges
    Search {
        #[command(flatten)]
        fields: FieldArgs,

        /// Sort key: name, year, city, state or rating
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Page to show (12 colleges per page)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one college by name
    Details {
        /// College name (or part of it)
        name: String,
    },

    /// Check the backend and its database
    Health,

    /// Ask the backend to insert its sample colleges
    Setup {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Export matching colleges as CSV
    Export {
        #[command(flatten)]
        fields: FieldArgs,

        /// Sort key: name, year, city, state or rating
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Target directory (default: EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage favorite colleges
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show or change dark mode
    DarkMode {
        #[arg(value_enum)]
        mode: Option<Switch>,
    },

    /// Interactive search form
    Interactive,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List,

    /// Add or remove a favorite
    Toggle {
        /// Exact college name
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
    Toggle,
}

/// Search form fields. Values are passed through as typed.
#[derive(Args, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    facility: Option<String>,
    /// public or private
    #[arg(long = "type", value_name = "TYPE")]
    college_type: Option<String>,
    #[arg(long)]
    min_year: Option<String>,
    #[arg(long)]
    max_year: Option<String>,
    #[arg(long)]
    min_rating: Option<String>,
}

impl FieldArgs {
    fn to_params(&self) -> SearchParams {
        [
            (SearchField::Name, &self.name),
            (SearchField::City, &self.city),
            (SearchField::Year, &self.year),
            (SearchField::State, &self.state),
            (SearchField::Facility, &self.facility),
            (SearchField::CollegeType, &self.college_type),
            (SearchField::MinYear, &self.min_year),
            (SearchField::MaxYear, &self.max_year),
            (SearchField::MinRating, &self.min_rating),
        ]
        .into_iter()
        .fold(SearchParams::new(), |params, (field, value)| match value {
            Some(v) => params.with(field, v.as_str()),
            None => params,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env().context("Invalid configuration")?;
    if cli.offline {
        config.offline = true;
    }
    init_tracing(&config)?;

    let state = build_state(config).await?;
    let theme = Theme::new(state.preferences.dark_mode().await);

    match cli.command {
        Commands::Search { fields, sort, page } => {
            handle_search(&state, &theme, fields.to_params(), sort, page).await?
        }
        Commands::Details { name } => handle_details(&state, &theme, &name).await?,
        Commands::Health => handle_health(&state, &theme).await?,
        Commands::Setup { yes } => handle_setup(&state, &theme, yes).await?,
        Commands::Export { fields, sort, out } => {
            handle_export(&state, &theme, fields.to_params(), sort, out).await?
        }
        Commands::Favorites { action } => handle_favorites(&state, &theme, action).await?,
        Commands::DarkMode { mode } => handle_dark_mode(&state, mode).await?,
        Commands::Interactive => run_interactive(&state).await?,
    }

    Ok(())
}

/// Output colors; dark mode uses the bright palette.
struct Theme {
    dark: bool,
}

impl Theme {
    fn new(dark: bool) -> Self {
        Self { dark }
    }

    fn heading(&self, text: &str) -> ColoredString {
        if self.dark {
            text.bright_white().bold()
        } else {
            text.blue().bold()
        }
    }

    fn accent(&self, text: &str) -> ColoredString {
        if self.dark {
            text.bright_cyan()
        } else {
            text.cyan()
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        text.bright_black()
    }
}

async fn resolve_params(state: &AppState, params: &SearchParams) -> Result<Resolution> {
    let query = build_query(params);
    if query.is_empty() {
        anyhow::bail!("Enter at least one search field (see --help)");
    }
    Ok(state.search.resolve(&query).await)
}

async fn handle_search(
    state: &AppState,
    theme: &Theme,
    params: SearchParams,
    sort: SortKey,
    page: usize,
) -> Result<()> {
    let resolution = resolve_params(state, &params).await?;

    if resolution.origin == Origin::Fallback {
        print_fallback_notice(resolution.cause.as_ref().map(|e| e.to_string()));
    }

    if resolution.colleges.is_empty() {
        println!("{}", "No colleges found".yellow());
        return Ok(());
    }

    let favorites: BTreeSet<String> = state.preferences.favorites().await.into_iter().collect();
    let stats = compute_stats(&resolution.colleges);
    print_stats(theme, &stats);
    print_page(theme, &project(&resolution.colleges, sort, page), &favorites);
    Ok(())
}

async fn handle_details(state: &AppState, theme: &Theme, name: &str) -> Result<()> {
    match state.search.college_details(name).await {
        Ok(college) => {
            let favorite = state.preferences.is_favorite(&college.name).await;
            print_college(theme, &college, favorite);
            Ok(())
        }
        Err(e) => {
            println!("{}", e.to_string().yellow());
            Ok(())
        }
    }
}

async fn handle_health(state: &AppState, theme: &Theme) -> Result<()> {
    println!("{}", theme.heading("🩺 Backend Health"));
    println!();

    match state.search.check_connectivity().await {
        Ok(status) => {
            println!("  Database: {}", status.database.green());
            println!("  Colleges: {}", status.college_count.to_string().bold());
            Ok(())
        }
        Err(e) => {
            println!("  {}", e.to_string().red());
            Err(anyhow::anyhow!(e)).context("Backend is not healthy")
        }
    }
}

async fn handle_setup(state: &AppState, theme: &Theme, skip_confirm: bool) -> Result<()> {
    println!("{}", theme.heading("🌱 Seed Sample Data"));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Insert the sample colleges into the backend database?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let report = state
        .search
        .seed_sample_data()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed sample data: {}", e))?;

    println!(
        "{} {} colleges inserted",
        "✅".green(),
        report.inserted_count.to_string().bold()
    );
    Ok(())
}

async fn handle_export(
    state: &AppState,
    theme: &Theme,
    params: SearchParams,
    sort: SortKey,
    out: Option<PathBuf>,
) -> Result<()> {
    let resolution = resolve_params(state, &params).await?;
    if resolution.origin == Origin::Fallback {
        print_fallback_notice(resolution.cause.as_ref().map(|e| e.to_string()));
    }

    let colleges = sort_colleges(&resolution.colleges, sort);
    let dir = out.unwrap_or_else(|| state.config.export_dir.clone());
    export_to(theme, &colleges, dir).await
}

async fn export_to(theme: &Theme, colleges: &[College], dir: PathBuf) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match export_csv(colleges, &dir, today).await {
        Ok(path) => {
            println!(
                "{} Exported {} colleges to {}",
                "✅".green(),
                colleges.len(),
                theme.accent(&path.display().to_string())
            );
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Export failed: {}", e)),
    }
}

async fn handle_favorites(state: &AppState, theme: &Theme, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            println!("{}", theme.heading("⭐ Favorites"));
            println!();

            let favorites = state.preferences.favorites().await;
            if favorites.is_empty() {
                println!("{}", "  No favorites yet".yellow());
                return Ok(());
            }
            for name in &favorites {
                println!("  {}", theme.accent(name));
            }
            println!();
            println!("  Total: {}", favorites.len().to_string().bold());
        }
        FavoritesAction::Toggle { name } => {
            let added = state
                .preferences
                .toggle_favorite(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to update favorites: {}", e))?;
            if added {
                println!("{} {} added to favorites", "⭐".yellow(), name.trim().cyan());
            } else {
                println!("{} removed from favorites", name.trim().cyan());
            }
        }
    }
    Ok(())
}

async fn handle_dark_mode(state: &AppState, mode: Option<Switch>) -> Result<()> {
    let prefs = &state.preferences;
    let enabled = match mode {
        None => prefs.dark_mode().await,
        Some(Switch::On) => prefs.set_dark_mode(true).await?,
        Some(Switch::Off) => prefs.set_dark_mode(false).await?,
        Some(Switch::Toggle) => prefs.toggle_dark_mode().await?,
    };
    println!("Dark mode: {}", if enabled { "on".bold() } else { "off".normal() });
    Ok(())
}

fn print_fallback_notice(cause: Option<String>) {
    let message = match cause {
        Some(cause) => format!("⚠️  Backend unavailable ({cause}), showing local results"),
        None => "⚠️  Showing local results".to_string(),
    };
    eprintln!("{}", message.yellow());
}

fn print_stats(theme: &Theme, stats: &ResultStats) {
    let avg_year = stats
        .average_year
        .map(|y| format!("{y:.0}"))
        .unwrap_or_else(|| "-".to_string());
    let avg_rating = stats
        .average_rating
        .map(|r| format!("{r:.2}"))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{}  total {}  avg. founded {}  states {}  avg. rating {}",
        theme.heading("📊"),
        stats.total.to_string().bold(),
        avg_year,
        stats.distinct_states,
        avg_rating
    );
    println!();
}

fn print_page(theme: &Theme, page: &Page, favorites: &BTreeSet<String>) {
    if page.items.is_empty() {
        println!(
            "{}",
            format!("Page {} is past the last page ({})", page.page, page.total_pages).yellow()
        );
        return;
    }

    println!(
        "  {:<2} {:<40} {:<6} {:<20} {:<15} {:<6}",
        "",
        "Name".bold(),
        "Year".bold(),
        "City".bold(),
        "State".bold(),
        "Rating".bold()
    );
    println!("  {}", theme.muted(&"─".repeat(92)));

    for college in &page.items {
        let star = if favorites.contains(&college.name) { "★" } else { " " };
        let rating = college
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<2} {:<40} {:<6} {:<20} {:<15} {:<6}",
            star.yellow(),
            theme.accent(&college.name),
            college.year_founded,
            college.city,
            college.state,
            rating
        );
    }

    println!();
    let mut footer = format!(
        "  Page {} of {} ({} colleges)",
        page.page.to_string().bold(),
        page.total_pages,
        page.total_items
    );
    let hints = page_hints(page);
    if !hints.is_empty() {
        footer.push_str(&format!("  {}", theme.muted(&hints.join(" / "))));
    }
    println!("{footer}");
}

/// Navigation commands that lead somewhere from `page`.
fn page_hints(page: &Page) -> Vec<&'static str> {
    [(page.has_previous(), "prev"), (page.has_next(), "next")]
        .into_iter()
        .filter_map(|(available, hint)| available.then_some(hint))
        .collect()
}

fn print_college(theme: &Theme, college: &College, favorite: bool) {
    let title = if favorite {
        format!("★ {}", college.name)
    } else {
        college.name.clone()
    };
    println!("{}", theme.heading(&title));
    println!("  Founded:    {}", college.year_founded);
    println!("  Location:   {}, {}", college.city, college.state);
    if let Some(t) = college.college_type {
        println!("  Type:       {}", t);
    }
    if let Some(r) = college.rating {
        println!("  Rating:     {:.1}", r);
    }
    if let Some(e) = college.enrollment {
        println!("  Enrollment: {}", e);
    }
    if let Some(t) = college.tuition {
        println!("  Tuition:    ${}", t);
    }
    if let Some(a) = college.acceptance_rate {
        println!("  Acceptance: {:.1}%", a);
    }
    let facilities: Vec<&str> = college.facility_list().collect();
    if !facilities.is_empty() {
        println!("  Facilities: {}", facilities.join(", "));
    }
}

fn print_comparison(theme: &Theme, colleges: &[College]) {
    if colleges.is_empty() {
        println!("{}", "  Nothing selected for comparison".yellow());
        return;
    }

    println!("{}", theme.heading("⚖️  Compare"));
    let cell = |f: &dyn Fn(&College) -> String| {
        colleges
            .iter()
            .map(|c| format!("{:<28}", f(c)))
            .collect::<String>()
    };
    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("  {:<12}{}", "", theme.accent(&cell(&|c| c.name.clone())));
    println!("  {:<12}{}", "Founded", cell(&|c| c.year_founded.to_string()));
    println!("  {:<12}{}", "City", cell(&|c| c.city.clone()));
    println!("  {:<12}{}", "State", cell(&|c| c.state.clone()));
    println!(
        "  {:<12}{}",
        "Type",
        cell(&|c| opt(c.college_type.map(|t| t.to_string())))
    );
    println!(
        "  {:<12}{}",
        "Rating",
        cell(&|c| opt(c.rating.map(|r| format!("{r:.1}"))))
    );
    println!(
        "  {:<12}{}",
        "Enrollment",
        cell(&|c| opt(c.enrollment.map(|e| e.to_string())))
    );
    println!(
        "  {:<12}{}",
        "Tuition",
        cell(&|c| opt(c.tuition.map(|t| format!("${t}"))))
    );
}

/// One line typed into the interactive form.
#[derive(Debug, PartialEq)]
enum Command {
    Set(SearchField, String),
    Sort(SortKey),
    Page(usize),
    Next,
    Prev,
    CompareAdd(String),
    CompareRemove(String),
    CompareClear,
    CompareShow,
    Favorite(String),
    Details(String),
    Export,
    DarkMode,
    Clear,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();

    if let Some((key, value)) = line.split_once('=') {
        let field = key.trim().parse::<SearchField>()?;
        return Ok(Command::Set(field, value.to_string()));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "sort" => rest.parse().map(Command::Sort),
        "page" => rest
            .parse()
            .map(Command::Page)
            .map_err(|_| format!("'{rest}' is not a page number")),
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "compare" => {
            let (sub, name) = match rest.split_once(char::is_whitespace) {
                Some((sub, name)) => (sub, name.trim()),
                None => (rest, ""),
            };
            match (sub, name) {
                ("", _) => Ok(Command::CompareShow),
                ("clear", _) => Ok(Command::CompareClear),
                ("add", name) if !name.is_empty() => Ok(Command::CompareAdd(name.to_string())),
                ("remove", name) if !name.is_empty() => {
                    Ok(Command::CompareRemove(name.to_string()))
                }
                _ => Err("usage: compare [add NAME | remove NAME | clear]".to_string()),
            }
        }
        "fav" if !rest.is_empty() => Ok(Command::Favorite(rest.to_string())),
        "details" if !rest.is_empty() => Ok(Command::Details(rest.to_string())),
        "export" => Ok(Command::Export),
        "dark" => Ok(Command::DarkMode),
        "clear" => Ok(Command::Clear),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(format!("Unknown command '{line}' (type 'help')")),
    }
}

fn print_help() {
    println!("  {}  set a search field (empty value clears it)", "field=value".bold());
    for field in SearchField::all() {
        let descriptor = field.descriptor();
        println!("      {:<12} {}", descriptor.key, descriptor.label);
    }
    println!("  {}  name | year | city | state | rating", "sort KEY".bold());
    println!("  {}  go to page N; {} / {}", "page N".bold(), "next".bold(), "prev".bold());
    println!(
        "  {}  up to {} colleges",
        "compare [add NAME | remove NAME | clear]".bold(),
        COMPARE_CAPACITY
    );
    println!("  {}  toggle a favorite", "fav NAME".bold());
    println!("  {}  show one college", "details NAME".bold());
    println!("  {}  write the results as CSV", "export".bold());
    println!("  {}  toggle dark mode", "dark".bold());
    println!("  {}  reset the form", "clear".bold());
    println!("  {}", "quit".bold());
}

/// Finds a college from the current results by (partial) name.
fn pick_college(results: &[College], name: &str) -> Option<College> {
    let needle = name.to_lowercase();
    results
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .or_else(|| {
            results
                .iter()
                .find(|c| c.name.to_lowercase().contains(&needle))
        })
        .cloned()
}

fn render_session(
    theme: &Theme,
    session: &SearchSession<dyn CollegeSource>,
    favorites: &BTreeSet<String>,
) {
    let view = session.state();

    if let Some(notice) = &view.notice {
        match notice.kind {
            NoticeKind::Info => println!("{}", format!("ℹ️  {}", notice.message).yellow()),
            NoticeKind::Error => println!("{}", format!("❌ {}", notice.message).red()),
        }
    }

    match view.status {
        Status::Idle => println!("{}", theme.muted("Type field=value to search")),
        Status::Loading => println!("{}", theme.muted("Loading...")),
        Status::NoResults => println!("{}", "No colleges found".yellow()),
        Status::Failed => {}
        Status::Results => {
            print_stats(theme, &view.stats());
            print_page(theme, &view.page_view(), favorites);
        }
    }

    if !view.compare.is_empty() {
        let names: Vec<&str> = view.compare.members().iter().map(|c| c.name.as_str()).collect();
        println!(
            "  {} {}/{}: {}",
            "Comparing".bold(),
            view.compare.len(),
            COMPARE_CAPACITY,
            names.join(", ")
        );
    }
}

async fn run_interactive(state: &AppState) -> Result<()> {
    state.config.print_summary();

    let mut theme = Theme::new(state.preferences.dark_mode().await);
    let mut session = state.session();

    println!("{}", theme.heading("🎓 College Search"));
    println!("{}", theme.muted("Type 'help' for commands"));
    println!();

    loop {
        let line: String = Input::new()
            .with_prompt("search")
            .allow_empty(true)
            .interact_text()?;

        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        session.dispatch(Action::DismissNotice);

        match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::Set(field, value) => session.dispatch(Action::SetField(field, value)),
            Command::Sort(key) => session.dispatch(Action::SetSort(key)),
            Command::Page(n) => session.dispatch(Action::SetPage(n)),
            Command::Next => session.dispatch(Action::NextPage),
            Command::Prev => session.dispatch(Action::PrevPage),
            Command::Clear => session.dispatch(Action::ClearForm),
            Command::CompareAdd(name) => match pick_college(&session.state().results, &name) {
                Some(college) => session.dispatch(Action::CompareAdd(college)),
                None => println!("{}", format!("'{name}' is not in the current results").red()),
            },
            Command::CompareRemove(name) => session.dispatch(Action::CompareRemove(name)),
            Command::CompareClear => session.dispatch(Action::CompareClear),
            Command::CompareShow => {
                print_comparison(&theme, session.state().compare.members());
                continue;
            }
            Command::Favorite(name) => {
                let name = pick_college(&session.state().results, &name)
                    .map(|c| c.name)
                    .unwrap_or(name);
                match state.preferences.toggle_favorite(&name).await {
                    Ok(true) => println!("{} {} added to favorites", "⭐".yellow(), name.cyan()),
                    Ok(false) => println!("{} removed from favorites", name.cyan()),
                    Err(e) => println!("{}", e.to_string().red()),
                }
                continue;
            }
            Command::Details(name) => {
                handle_details(state, &theme, &name).await?;
                continue;
            }
            Command::Export => {
                let colleges = session.state().sorted_results();
                if let Err(e) =
                    export_to(&theme, &colleges, state.config.export_dir.clone()).await
                {
                    println!("{}", e.to_string().red());
                }
                continue;
            }
            Command::DarkMode => {
                match state.preferences.toggle_dark_mode().await {
                    Ok(dark) => theme = Theme::new(dark),
                    Err(e) => println!("{}", e.to_string().red()),
                }
                continue;
            }
        }

        session.settle().await;

        let favorites: BTreeSet<String> =
            state.preferences.favorites().await.into_iter().collect();
        render_session(&theme, &session, &favorites);
        println!();
    }

    println!("{}", theme.muted("Bye"));
    Ok(())
}
