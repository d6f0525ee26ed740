//! CLI Command Handlers
//!
//! Each handler builds the controller for its screen, drives it the way the
//! interactive client would (first page, then `load_more` while scrolling),
//! and prints the resulting state. Handlers take CLI args and Output, return
//! ExitCode.

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::api::{CcloudClient, CcloudError};
use crate::browse::home::HomeSection;
use crate::browse::{
    CountryCatalog, HomeFeed, ListController, ListState, MovieCatalog, PageSource,
    SearchController, SeriesCatalog,
};
use crate::cli::{
    CountryCmd, ExitCode, HomeCmd, HomeRow, InfoCmd, InitCmd, ListCmd, Output, PageResponse,
    SearchCmd,
};
use crate::config::Config;
use crate::eligibility::TitleEligibility;
use crate::models::{Country, FilterType, Genre, Source, Titled};

/// Client and eligibility policy shared by the handlers
pub struct Context {
    pub client: Arc<CcloudClient>,
    pub eligibility: Arc<dyn TitleEligibility>,
}

impl Context {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: Arc::new(config.client()?),
            eligibility: config.eligibility(),
        })
    }
}

// =============================================================================
// Listing Commands
// =============================================================================

pub async fn movies_cmd(cmd: ListCmd, ctx: &Context, output: &Output) -> ExitCode {
    let controller = ListController::new(MovieCatalog::new(ctx.client.clone()), ctx.eligibility.clone())
        .with_filter(cmd.sort.into());
    output.info(format!("Loading movies ({})...", FilterType::from(cmd.sort)));
    browse_list(&controller, cmd, output).await
}

pub async fn series_cmd(cmd: ListCmd, ctx: &Context, output: &Output) -> ExitCode {
    let controller = ListController::new(SeriesCatalog::new(ctx.client.clone()), ctx.eligibility.clone())
        .with_filter(cmd.sort.into());
    output.info(format!("Loading series ({})...", FilterType::from(cmd.sort)));
    browse_list(&controller, cmd, output).await
}

async fn browse_list<S>(controller: &ListController<S>, cmd: ListCmd, output: &Output) -> ExitCode
where
    S: PageSource,
    S::Item: Serialize + Display,
{
    // Selecting the genre resets to page 0, which doubles as the first load
    controller.select_genre(cmd.genre).await;
    paginate(controller, cmd.pages).await;
    report(controller.snapshot(), cmd.limit, output)
}

pub async fn country_cmd(cmd: CountryCmd, ctx: &Context, output: &Output) -> ExitCode {
    let country = match ctx.client.countries().await {
        Ok(countries) => countries
            .into_iter()
            .find(|c| c.id == cmd.id)
            .unwrap_or_else(|| unnamed_country(cmd.id)),
        Err(e) => {
            output.info(format!("Country directory unavailable: {}", e));
            unnamed_country(cmd.id)
        }
    };

    let controller = ListController::new(
        CountryCatalog::new(ctx.client.clone(), country),
        ctx.eligibility.clone(),
    )
    .with_filter(cmd.sort.into());
    output.info(format!(
        "Loading titles from {}...",
        controller.source().country_name()
    ));

    controller.refresh().await;
    paginate(&controller, cmd.pages).await;
    report(controller.snapshot(), cmd.limit, output)
}

fn unnamed_country(id: u32) -> Country {
    Country {
        id,
        title: format!("Country #{}", id),
        image: None,
    }
}

/// Keep requesting pages until `pages` are loaded or the list runs dry
async fn paginate<S: PageSource>(controller: &ListController<S>, pages: u32) {
    for _ in 1..pages {
        if !controller.load_more().await {
            break;
        }
    }
}

fn report<T: Serialize + Display>(state: ListState<T>, limit: Option<usize>, output: &Output) -> ExitCode {
    if let Some(msg) = state.error_message {
        if state.items.is_empty() {
            return output.error(msg, ExitCode::NetworkError);
        }
        output.info(format!("Stopped early: {}", msg));
    }

    let mut items = state.items;
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    if items.is_empty() {
        return output.error("No titles found", ExitCode::NoResults);
    }

    let result = if output.json {
        output.print(PageResponse {
            page: state.current_page,
            can_load_more: state.can_load_more,
            items,
        })
    } else {
        output.print_lines(&items)
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, ctx: &Context, output: &Output) -> ExitCode {
    let controller = SearchController::new((*ctx.client).clone(), ctx.eligibility.clone());

    output.info(format!("Searching for: {}", cmd.query));
    controller.update_query(cmd.query);
    controller.trigger_search().await;

    let state = controller.snapshot();
    if let Some(msg) = state.error_message {
        return output.error(format!("Search failed: {}", msg), ExitCode::NetworkError);
    }
    if !state.has_searched {
        return output.error("Search query is empty", ExitCode::InvalidArgs);
    }
    if state.is_empty_result() {
        return output.error("No titles found", ExitCode::NoResults);
    }

    let mut results = state.results;
    results.truncate(cmd.limit);

    match output.print_lines(&results) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, ctx: &Context, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    let printed = if cmd.series {
        match ctx.client.serie(cmd.id).await {
            Ok(series) => print_details(
                output,
                &series,
                &series.description,
                &series.genres,
                &series.country,
                &[],
            ),
            Err(e) => return lookup_failed(e, output),
        }
    } else {
        match ctx.client.movie(cmd.id).await {
            Ok(movie) => print_details(
                output,
                &movie,
                &movie.description,
                &movie.genres,
                &movie.country,
                &movie.sources,
            ),
            Err(e) => return lookup_failed(e, output),
        }
    };

    match printed {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn lookup_failed(e: anyhow::Error, output: &Output) -> ExitCode {
    match e.downcast_ref::<CcloudError>() {
        Some(CcloudError::NotFound) => output.error("Title not found", ExitCode::NoResults),
        _ => output.error(format!("Lookup failed: {}", e), ExitCode::NetworkError),
    }
}

fn print_details<T: Serialize + Display>(
    output: &Output,
    title: &T,
    description: &str,
    genres: &[Genre],
    countries: &[Country],
    sources: &[Source],
) -> anyhow::Result<()> {
    if output.json {
        return output.print(title);
    }

    println!("{}", title);
    if !description.is_empty() {
        println!("\n{}\n", description);
    }
    if !genres.is_empty() {
        let names: Vec<&str> = genres.iter().map(|g| g.title.as_str()).collect();
        println!("Genres:    {}", names.join(", "));
    }
    if !countries.is_empty() {
        let names: Vec<&str> = countries.iter().map(|c| c.title.as_str()).collect();
        println!("Countries: {}", names.join(", "));
    }
    for source in sources {
        println!("  {}", source);
    }
    Ok(())
}

// =============================================================================
// Home Command
// =============================================================================

pub async fn home_cmd(cmd: HomeCmd, ctx: &Context, output: &Output) -> ExitCode {
    let feed = HomeFeed::from_client(ctx.client.clone(), ctx.eligibility.clone());
    output.info("Loading home rows...");
    feed.load_all().await;

    let mut movie_rows = Vec::new();
    let mut series_rows = Vec::new();
    for section in HomeSection::ALL {
        if let Some(row) = feed.movie_row(section) {
            movie_rows.push(home_row(section, row.snapshot(), cmd.limit));
        } else if let Some(row) = feed.series_row(section) {
            series_rows.push(home_row(section, row.snapshot(), cmd.limit));
        }
    }

    if movie_rows.iter().all(|r| r.error.is_some()) && series_rows.iter().all(|r| r.error.is_some()) {
        let msg = movie_rows
            .iter()
            .find_map(|r| r.error.clone())
            .unwrap_or_else(|| "Home rows unavailable".to_string());
        return output.error(msg, ExitCode::NetworkError);
    }

    if output.json {
        #[derive(Serialize)]
        struct HomeResponse<M: Serialize, S: Serialize> {
            movies: Vec<HomeRow<M>>,
            series: Vec<HomeRow<S>>,
        }
        return match output.print(HomeResponse {
            movies: movie_rows,
            series: series_rows,
        }) {
            Ok(()) => ExitCode::Success,
            Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
        };
    }

    print_rows(&movie_rows);
    print_rows(&series_rows);
    ExitCode::Success
}

fn home_row<T: Serialize>(section: HomeSection, state: ListState<T>, limit: usize) -> HomeRow<T> {
    let mut items = state.items;
    items.truncate(limit);
    HomeRow {
        title: section.title(),
        error: state.error_message,
        items,
    }
}

fn print_rows<T: Serialize + Titled>(rows: &[HomeRow<T>]) {
    for row in rows {
        println!("== {}", row.title);
        match &row.error {
            Some(e) => println!("   (failed: {})", e),
            None => {
                for item in &row.items {
                    println!("   {}", item.title());
                }
            }
        }
    }
}

// =============================================================================
// Directory Commands
// =============================================================================

pub async fn genres_cmd(ctx: &Context, output: &Output) -> ExitCode {
    let controller = ListController::new(MovieCatalog::new(ctx.client.clone()), ctx.eligibility.clone());
    controller.load_genres().await;

    let state = controller.snapshot();
    if let Some(msg) = state.error_message {
        return output.error(format!("Genre fetch failed: {}", msg), ExitCode::NetworkError);
    }
    match output.print_lines(&state.genres) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

pub async fn countries_cmd(ctx: &Context, output: &Output) -> ExitCode {
    match ctx.client.countries().await {
        Ok(countries) => match output.print_lines(&countries) {
            Ok(()) => ExitCode::Success,
            Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
        },
        Err(e) => output.error(
            format!("Country fetch failed: {}", e),
            ExitCode::NetworkError,
        ),
    }
}

// =============================================================================
// Init Command
// =============================================================================

/// Write a config file to `path`, or to the default location
pub fn init_cmd(cmd: &InitCmd, path: Option<&Path>, output: &Output) -> ExitCode {
    let config = Config {
        base_url: cmd.base_url.clone(),
        api_key: Some(cmd.api_key.clone()),
        title_filter: cmd.title_filter.into(),
        request_timeout_secs: None,
    };

    let saved = match path {
        Some(path) => config.save_to(path).map(|()| path.to_path_buf()),
        None => config.save(),
    };

    match saved {
        Ok(path) => {
            output.info(format!("Wrote {}", path.display()));
            ExitCode::Success
        }
        Err(e) => output.error(format!("Failed to write config: {:#}", e), ExitCode::Error),
    }
}
