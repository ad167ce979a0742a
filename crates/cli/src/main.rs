use anyhow::{Context, Result, bail};
use catalog::{Genre, Movie, MovieId};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use query_engine::{Query, SortKey};
use session::{
    CatalogSource, LiveSource, MockSource, Profile, RatingEntry, Session, SessionState, View,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::{TimeWindow, TmdbClient};

/// Marquee - movie discovery from the terminal
#[derive(Parser)]
#[command(name = "marquee")]
#[command(
    about = "Browse, search and rate movies from bundled fixtures or TMDB",
    long_about = None
)]
struct Cli {
    /// Serve the bundled (or --fixtures) catalog
    #[arg(long, conflicts_with = "live")]
    mock: bool,

    /// Query TMDB (needs TMDB_API_KEY and TMDB_BASE_URL)
    #[arg(long)]
    live: bool,

    /// JSON fixture file to use instead of the bundled catalog
    #[arg(long, env = "MARQUEE_FIXTURES")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Ratings and watchlist entries applied before the command runs
#[derive(Args, Default)]
struct SessionArgs {
    /// Add a movie to the watchlist (repeatable)
    #[arg(long = "watch", value_name = "ID")]
    watch: Vec<MovieId>,

    /// Rate a movie 1 to 5 stars (repeatable)
    #[arg(long = "rate", value_name = "ID=STARS")]
    rate: Vec<RatingEntry>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recommended and trending lists
    Home {
        /// Movies per list
        #[arg(long, default_value = "12")]
        limit: usize,

        /// Trending window for --live: day or week
        #[arg(long, default_value = "week")]
        window: TimeWindow,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Search and filter the catalog
    Browse {
        /// Text matched against titles and genre names
        #[arg(short, long, default_value = "")]
        query: String,

        /// Genre filter, any of which may match (repeatable)
        #[arg(short, long = "genre", value_name = "GENRE")]
        genres: Vec<Genre>,

        /// rating, popularity or year (all descending)
        #[arg(short, long)]
        sort: Option<SortKey>,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show everything known about one movie
    Details { id: MovieId },

    /// Movies similar to one movie
    Similar { id: MovieId },

    /// One of the TMDB lists
    List {
        #[arg(value_enum)]
        kind: ListKind,

        #[arg(long, default_value = "1")]
        page: u32,

        /// Trending window: day or week
        #[arg(long, default_value = "week")]
        window: TimeWindow,
    },

    /// List the genres and their TMDB codes
    Genres,

    /// Watchlist, ratings and favorite genres
    Profile {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Popular,
    TopRated,
    Trending,
    NowPlaying,
    Upcoming,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Genres = cli.command {
        print_genres();
        return Ok(());
    }

    let backend = Backend::open(&cli)?;

    match cli.command {
        Commands::Home {
            limit,
            window,
            session,
        } => handle_home(&backend, limit, window, &session).await?,
        Commands::Browse {
            query,
            genres,
            sort,
            session,
        } => {
            let mut query = Query::new().with_text(query).with_genres(genres);
            query.sort = sort;
            handle_browse(&backend, query, &session).await?
        }
        Commands::Details { id } => handle_details(&backend, id).await?,
        Commands::Similar { id } => handle_similar(&backend, id).await?,
        Commands::List { kind, page, window } => {
            handle_list(&backend, kind, page, window).await?
        }
        Commands::Profile { session } => handle_profile(&backend, &session).await?,
        Commands::Genres => {}
    }

    Ok(())
}

/// The catalog source picked on the command line
struct Backend {
    source: Arc<dyn CatalogSource>,
    client: Option<TmdbClient>,
}

impl Backend {
    fn open(cli: &Cli) -> Result<Self> {
        if cli.live && !cli.mock {
            let client = TmdbClient::from_env().context("Failed to configure TMDB client")?;
            if !client.is_configured() {
                println!(
                    "{} TMDB_API_KEY or TMDB_BASE_URL is not set, results will be empty",
                    "!".yellow()
                );
            }
            return Ok(Self {
                source: Arc::new(LiveSource::new(client.clone())),
                client: Some(client),
            });
        }

        let start = Instant::now();
        let source = match &cli.fixtures {
            Some(path) => {
                let catalog = catalog::load_fixtures(path)
                    .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
                MockSource::new(Arc::new(catalog))
            }
            None => MockSource::with_default_fixtures()?,
        };
        println!(
            "{} Loaded {} movies in {:?}",
            "✓".green(),
            source.catalog().len(),
            start.elapsed()
        );

        Ok(Self {
            source: Arc::new(source),
            client: None,
        })
    }

    fn session(&self, args: &SessionArgs) -> Session {
        self.session_with(Arc::clone(&self.source), args)
    }

    fn session_with(&self, source: Arc<dyn CatalogSource>, args: &SessionArgs) -> Session {
        let mut session = Session::new(source);
        for entry in &args.rate {
            session.rate(entry.id, entry.stars);
        }
        for &id in &args.watch {
            session.add_to_watchlist(id);
        }
        session
    }
}

/// Handle the 'home' command
async fn handle_home(
    backend: &Backend,
    limit: usize,
    window: TimeWindow,
    args: &SessionArgs,
) -> Result<()> {
    let source: Arc<dyn CatalogSource> = match &backend.client {
        Some(client) => Arc::new(LiveSource::new(client.clone()).with_window(window)),
        None => Arc::clone(&backend.source),
    };
    let mut session = backend.session_with(source, args).with_home_limit(limit);
    session.navigate(View::Home).await;

    let feed = session.state().home.clone().unwrap_or_default();
    print_movies("Recommended for you", &feed.recommended, session.state());
    println!();
    print_movies("Trending now", &feed.trending, session.state());
    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(backend: &Backend, query: Query, args: &SessionArgs) -> Result<()> {
    let mut session = backend.session(args);
    let results = session.browse(query.clone()).await;

    let mut title = String::from("Results");
    if query.has_text() {
        title.push_str(&format!(" for '{}'", query.text));
    }
    if query.has_genres() {
        let genres: Vec<&str> = query.genres.iter().map(|g| g.name()).collect();
        title.push_str(&format!(" in {}", genres.join(" | ")));
    }
    if let Some(key) = query.sort {
        title.push_str(&format!(" by {}", key));
    }

    print_movies(&title, &results, session.state());
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(backend: &Backend, id: MovieId) -> Result<()> {
    let Some(movie) = backend.source.details(id).await? else {
        bail!("Movie {} not found", id);
    };
    print_details(&movie);
    Ok(())
}

/// Handle the 'similar' command
async fn handle_similar(backend: &Backend, id: MovieId) -> Result<()> {
    let movies = backend.source.similar(id).await?;
    print_movies(&format!("Similar to movie {}", id), &movies, &SessionState::new());
    Ok(())
}

/// Handle the 'list' command
async fn handle_list(
    backend: &Backend,
    kind: ListKind,
    page: u32,
    window: TimeWindow,
) -> Result<()> {
    let Some(client) = &backend.client else {
        bail!("The list command needs --live");
    };

    let (title, movies) = match kind {
        ListKind::Popular => ("Popular", client.popular(page).await),
        ListKind::TopRated => ("Top rated", client.top_rated(page).await),
        ListKind::Trending => ("Trending", client.trending(window).await),
        ListKind::NowPlaying => ("Now playing", client.now_playing(page).await),
        ListKind::Upcoming => ("Upcoming", client.upcoming(page).await),
    };

    print_movies(title, &movies, &SessionState::new());
    Ok(())
}

/// Handle the 'profile' command
async fn handle_profile(backend: &Backend, args: &SessionArgs) -> Result<()> {
    let mut session = backend.session(args);
    session.navigate(View::Profile).await;
    let profile = session.profile().await?;
    print_profile(&profile, session.state());
    Ok(())
}

fn print_genres() {
    println!("{}", "Genres:".bold().blue());
    for genre in Genre::ALL {
        println!("  {:<16} {}", genre.name(), genre.code().to_string().dimmed());
    }
}

fn print_movies(title: &str, movies: &[Movie], state: &SessionState) {
    println!("{}", format!("{}:", title).bold().blue());
    if movies.is_empty() {
        println!("  {}", "No movies found".dimmed());
        return;
    }

    for (rank, movie) in movies.iter().enumerate() {
        let year = movie
            .year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let rating = movie
            .rating
            .map(|r| format!(" - {:.1}", r))
            .unwrap_or_default();

        let mut marks = String::new();
        if let Some(stars) = state.rating(movie.id) {
            marks.push_str(&format!(" {}", format!("★ {}", stars).yellow()));
        }
        if state.is_watchlisted(movie.id) {
            marks.push_str(&format!(" {}", "[watchlist]".magenta()));
        }

        println!(
            "{}. {}{} [{}]{} {}{}",
            (rank + 1).to_string().green(),
            movie.title,
            year,
            movie.genre_names(),
            rating,
            format!("#{}", movie.id).dimmed(),
            marks
        );
    }
}

fn print_details(movie: &Movie) {
    let year = movie.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    println!("{}", format!("{}{}", movie.title, year).bold().blue());

    println!("{}Genres: {}", "• ".green(), movie.genre_names());
    if let Some(rating) = movie.rating {
        let votes = movie
            .vote_count
            .map(|v| format!(" ({} votes)", v))
            .unwrap_or_default();
        println!("{}Rating: {:.1}{}", "• ".green(), rating, votes);
    }
    if let Some(runtime) = movie.runtime {
        println!("{}Runtime: {}h {:02}m", "• ".green(), runtime / 60, runtime % 60);
    }
    if let Some(date) = &movie.release_date {
        println!("{}Released: {}", "• ".green(), date);
    }
    if let Some(popularity) = movie.popularity {
        println!("{}Popularity: {:.1}", "• ".cyan(), popularity);
    }
    if let Some(poster) = &movie.poster_url {
        println!("{}Poster: {}", "• ".cyan(), poster);
    }
    if let Some(backdrop) = &movie.backdrop_url {
        println!("{}Backdrop: {}", "• ".cyan(), backdrop);
    }
    if let Some(overview) = &movie.overview {
        println!();
        println!("{}", overview);
    }
}

fn print_profile(profile: &Profile, state: &SessionState) {
    println!("{}", "Profile:".bold().blue());
    println!("{}Movies rated: {}", "• ".green(), profile.rated_count);
    println!("{}Watchlist: {}", "• ".green(), profile.watchlist.len());

    let favorites: Vec<&str> = profile.top_genres(3).map(|g| g.name()).collect();
    if favorites.is_empty() {
        println!("{}Favorite genres: {}", "• ".cyan(), "none yet".dimmed());
    } else {
        println!("{}Favorite genres: {}", "• ".cyan(), favorites.join(", "));
    }
    println!();
    print_movies("Your watchlist", &profile.watchlist, state);
}
