//! CLI Command Tests
//!
//! Tests for argument parsing and for the command handlers against a mocked
//! TMDB server and a temporary data directory. Covers JSON output format,
//! exit codes, and input validation.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use flixtui::cli::{
        BrowsePage, Cli, Command, ContinueAction, ExitCode as CliExitCode, MaturityArg,
        MediaTypeFilter, OpenerChoice, ProfilesAction, TrendingWindow, WatchlistAction,
    };
    use flixtui::models::MediaType;

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from([
            "flixtui",
            "search",
            "batman",
            "--limit",
            "10",
            "-t",
            "movie",
            "--year-from",
            "2020",
            "--year-to",
            "2024",
        ]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "batman");
                assert_eq!(cmd.limit, 10);
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Movie));
                assert_eq!(cmd.year_from, Some(2020));
                assert_eq!(cmd.year_to, Some(2024));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_home_defaults_and_pages() {
        let cli = Cli::parse_from(["flixtui", "home"]);
        match cli.command {
            Some(Command::Home(cmd)) => {
                assert_eq!(cmd.page, BrowsePage::Home);
                assert_eq!(cmd.limit, 10);
            }
            _ => panic!("Expected Home command"),
        }

        let cli = Cli::parse_from(["flixtui", "h", "--page", "new", "-l", "3"]);
        match cli.command {
            Some(Command::Home(cmd)) => {
                assert_eq!(cmd.page, BrowsePage::New);
                assert_eq!(cmd.limit, 3);
            }
            _ => panic!("Expected Home command"),
        }
    }

    #[test]
    fn test_trending_command() {
        let cli = Cli::parse_from(["flixtui", "trending", "-w", "day", "-t", "tv"]);
        match cli.command {
            Some(Command::Trending(cmd)) => {
                assert_eq!(cmd.window, TrendingWindow::Day);
                assert_eq!(cmd.limit, 20);
                assert_eq!(cmd.scope().as_str(), "tv");
            }
            _ => panic!("Expected Trending command"),
        }
    }

    #[test]
    fn test_listing_page_range() {
        assert!(Cli::try_parse_from(["flixtui", "popular", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["flixtui", "top-rated", "--page", "501"]).is_err());
        let cli = Cli::parse_from(["flixtui", "now-playing", "-t", "tv"]);
        match cli.command {
            Some(Command::NowPlaying(cmd)) => {
                assert_eq!(cmd.media_type, MediaTypeFilter::Tv);
                assert_eq!(cmd.page, 1);
            }
            _ => panic!("Expected NowPlaying command"),
        }
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["flixtui", "info", "1396", "-t", "tv"]);
        match cli.command {
            Some(Command::Info(cmd)) => {
                assert_eq!(cmd.title.id, 1396);
                assert_eq!(cmd.title.media_type(), MediaType::Tv);
            }
            _ => panic!("Expected Info command"),
        }
        assert!(Cli::try_parse_from(["flixtui", "info", "tt0111161"]).is_err());
    }

    #[test]
    fn test_trailer_opener() {
        let cli = Cli::parse_from(["flixtui", "trailer", "603", "--open", "--with", "mpv"]);
        match cli.command {
            Some(Command::Trailer(cmd)) => {
                assert!(cmd.open);
                assert_eq!(cmd.with, OpenerChoice::Mpv);
                assert_eq!(cmd.title.media_type(), MediaType::Movie);
            }
            _ => panic!("Expected Trailer command"),
        }
    }

    #[test]
    fn test_profile_commands() {
        let cli = Cli::parse_from([
            "flixtui", "profiles", "add", "Junior", "--kids", "--avatar", "#46d369",
        ]);
        match cli.command {
            Some(Command::Profiles(cmd)) => match cmd.action {
                ProfilesAction::Add {
                    name,
                    avatar,
                    kids,
                    maturity,
                } => {
                    assert_eq!(name, "Junior");
                    assert_eq!(avatar.as_deref(), Some("#46d369"));
                    assert!(kids);
                    assert_eq!(maturity, MaturityArg::R);
                }
                _ => panic!("Expected Add"),
            },
            _ => panic!("Expected Profiles command"),
        }

        let cli = Cli::parse_from(["flixtui", "p", "update", "Junior", "--maturity", "pg-13"]);
        match cli.command {
            Some(Command::Profiles(cmd)) => match cmd.action {
                ProfilesAction::Update { maturity, .. } => {
                    assert_eq!(maturity, Some(MaturityArg::Pg13));
                }
                _ => panic!("Expected Update"),
            },
            _ => panic!("Expected Profiles command"),
        }
    }

    #[test]
    fn test_kids_profile_rejects_maturity() {
        assert!(Cli::try_parse_from([
            "flixtui", "profiles", "add", "Junior", "--kids", "--maturity", "pg-13",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["flixtui", "profiles", "add", "Teen", "--maturity", "pg-13"])
            .is_ok());
    }

    #[test]
    fn test_related_title_parsing() {
        let cli = Cli::parse_from(["flixtui", "recs", "1396", "-t", "tv", "-l", "5"]);
        match cli.command {
            Some(Command::Recommended(cmd)) => {
                assert_eq!(cmd.title.id, 1396);
                assert_eq!(cmd.title.media_type(), MediaType::Tv);
                assert_eq!(cmd.limit, 5);
            }
            _ => panic!("Expected Recommended command"),
        }

        let cli = Cli::parse_from(["flixtui", "credits", "603"]);
        match cli.command {
            Some(Command::Credits(cmd)) => {
                assert_eq!(cmd.title.media_type(), MediaType::Movie);
                assert_eq!(cmd.limit, 10);
            }
            _ => panic!("Expected Credits command"),
        }

        assert!(matches!(
            Cli::parse_from(["flixtui", "similar", "603"]).command,
            Some(Command::Similar(_))
        ));
        assert!(matches!(
            Cli::parse_from(["flixtui", "videos", "603"]).command,
            Some(Command::Videos(_))
        ));
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["flixtui", "config"]);
        match cli.command {
            Some(Command::Config(cmd)) => assert!(!cmd.has_changes()),
            _ => panic!("Expected Config command"),
        }

        let cli = Cli::parse_from(["flixtui", "config", "--region", "GB", "--include-adult", "true"]);
        match cli.command {
            Some(Command::Config(cmd)) => {
                assert!(cmd.has_changes());
                assert_eq!(cmd.region.as_deref(), Some("GB"));
                assert_eq!(cmd.include_adult, Some(true));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_library_commands() {
        let cli = Cli::parse_from(["flixtui", "wl", "rm", "1396", "-t", "tv"]);
        match cli.command {
            Some(Command::Watchlist(cmd)) => match cmd.action {
                WatchlistAction::Remove(title) => assert_eq!(title.id, 1396),
                _ => panic!("Expected Remove"),
            },
            _ => panic!("Expected Watchlist command"),
        }

        let cli = Cli::parse_from(["flixtui", "continue", "update", "603", "-p", "45"]);
        match cli.command {
            Some(Command::ContinueWatching(cmd)) => match cmd.action {
                ContinueAction::Update {
                    title,
                    progress,
                    timestamp,
                } => {
                    assert_eq!(title.id, 603);
                    assert_eq!(progress, 45);
                    assert_eq!(timestamp, 0);
                }
                _ => panic!("Expected Update"),
            },
            _ => panic!("Expected ContinueWatching command"),
        }

        assert!(Cli::try_parse_from(["flixtui", "cw", "update", "603", "-p", "101"]).is_err());
    }

    #[test]
    fn test_watch_positions() {
        let parse = |pos: &str| match Cli::parse_from(["flixtui", "watch", "603", "-p", pos]).command
        {
            Some(Command::Watch(cmd)) => cmd.position_secs(),
            _ => panic!("Expected Watch command"),
        };
        assert_eq!(parse("90"), Some(90));
        assert_eq!(parse("12:30"), Some(750));
        assert_eq!(parse("1:02:03"), Some(3723));
        assert_eq!(parse("soon"), None);
    }

    #[test]
    fn test_command_aliases() {
        for (alias, expected) in [("s", "search"), ("i", "info")] {
            let cli = Cli::parse_from(["flixtui", alias, "42"]);
            let name = match cli.command {
                Some(Command::Search(_)) => "search",
                Some(Command::Info(_)) => "info",
                _ => "other",
            };
            assert_eq!(name, expected);
        }
        let cli = Cli::parse_from(["flixtui", "whoami"]);
        assert!(matches!(cli.command, Some(Command::Whoami)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(CliExitCode::Success), 0);
        assert_eq!(i32::from(CliExitCode::Error), 1);
        assert_eq!(i32::from(CliExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(CliExitCode::NetworkError), 3);
        assert_eq!(i32::from(CliExitCode::NotFound), 4);
        assert_eq!(i32::from(CliExitCode::NotAuthenticated), 5);
    }
}

// =============================================================================
// JSON Output Tests
// =============================================================================

mod json_output {
    use flixtui::cli::{ExitCode, JsonOutput, StatusOk, WatchResponse};

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success(vec!["a", "b"]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
        assert!(json.get("error").is_none());
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_json_output_error() {
        let output = JsonOutput::<()>::error_msg("Not signed in", ExitCode::NotAuthenticated);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["error"], "Not signed in");
        assert_eq!(json["exit_code"], 5);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_status_ok_format() {
        let json = serde_json::to_string(&StatusOk::default()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_watch_response_fields() {
        let response = WatchResponse {
            title: "Fight Club".into(),
            position: 3000,
            duration: 6000,
            progress: 50,
            recorded: true,
            watch_url: "https://www.youtube.com/watch?v=qtRKdVHc-cE".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["progress"], 50);
        assert_eq!(json["recorded"], true);
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod commands {
    use clap::Parser;
    use flixtui::cli::{Cli, Command, ExitCode, GenresCmd, MediaTypeFilter, Output};
    use flixtui::commands::{self, CommandContext};
    use flixtui::config::Config;
    use flixtui::models::MediaType;
    use flixtui::store::Store;
    use mockito::{Matcher, Server};
    use tempfile::TempDir;

    const FIGHT_CLUB: &str = r#"{
        "id": 550,
        "title": "Fight Club",
        "release_date": "1999-10-15",
        "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
        "runtime": 100,
        "genres": [{"id": 18, "name": "Drama"}],
        "videos": {"results": [
            {"id": "v1", "key": "qtRKdVHc-cE", "name": "Trailer", "site": "YouTube", "type": "Trailer", "official": true}
        ]}
    }"#;

    const NO_TRAILER: &str = r#"{
        "id": 551,
        "title": "Obscure Film",
        "runtime": 90,
        "videos": {"results": []}
    }"#;

    fn context(dir: &TempDir, url: String) -> CommandContext {
        let config = Config {
            tmdb_api_key: Some("test_key".into()),
            ..Default::default()
        };
        CommandContext::new(config, dir.path()).with_base_url(url)
    }

    fn output() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    /// Parse and dispatch a command line the way the binary does
    async fn run(args: &[&str], ctx: &CommandContext) -> ExitCode {
        let cli = Cli::try_parse_from(std::iter::once("flixtui").chain(args.iter().copied()))
            .expect("valid command line");
        let out = output();
        match cli.command.expect("subcommand") {
            Command::Popular(cmd) => commands::popular_cmd(cmd, ctx, &out).await,
            Command::Discover(cmd) => commands::discover_cmd(cmd, ctx, &out).await,
            Command::Search(cmd) => commands::search_cmd(cmd, ctx, &out).await,
            Command::Info(cmd) => commands::info_cmd(cmd, ctx, &out).await,
            Command::Trailer(cmd) => commands::trailer_cmd(cmd, ctx, &out).await,
            Command::Videos(cmd) => commands::videos_cmd(cmd, ctx, &out).await,
            Command::Credits(cmd) => commands::credits_cmd(cmd, ctx, &out).await,
            Command::Similar(cmd) => commands::similar_cmd(cmd, ctx, &out).await,
            Command::Recommended(cmd) => commands::recommended_cmd(cmd, ctx, &out).await,
            Command::Config(cmd) => commands::config_cmd(cmd, ctx, &out),
            Command::Signup(cmd) => commands::signup_cmd(cmd, ctx, &out),
            Command::Signin(cmd) => commands::signin_cmd(cmd, ctx, &out),
            Command::Signout(cmd) => commands::signout_cmd(cmd, ctx, &out),
            Command::Whoami => commands::whoami_cmd(ctx, &out),
            Command::Profiles(cmd) => commands::profiles_cmd(cmd, ctx, &out),
            Command::Watchlist(cmd) => commands::watchlist_cmd(cmd, ctx, &out).await,
            Command::ContinueWatching(cmd) => commands::continue_cmd(cmd, ctx, &out).await,
            Command::Watch(cmd) => commands::watch_cmd(cmd, ctx, &out).await,
            other => panic!("not exercised here: {:?}", other),
        }
    }

    #[test]
    fn test_builtin_genres_need_no_server() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::new(Config::default(), dir.path());
        let cmd = GenresCmd {
            media_type: MediaTypeFilter::Tv,
            remote: false,
        };
        let code = tokio_test::block_on(commands::genres_cmd(cmd, &ctx, &output()));
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_unknown_genre_is_invalid_args() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9".into());
        assert_eq!(run(&["discover", "polka"], &ctx).await, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_api_failures_map_to_exit_codes() {
        let mut server = Server::new_async().await;
        let _missing = server
            .mock("GET", "/movie/999")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;
        let _down = server
            .mock("GET", "/movie/popular")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let _bad_key = server
            .mock("GET", "/search/multi")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());
        assert_eq!(run(&["info", "999"], &ctx).await, ExitCode::NotFound);
        assert_eq!(run(&["popular"], &ctx).await, ExitCode::NetworkError);
        assert_eq!(run(&["search", "dune"], &ctx).await, ExitCode::Error);
    }

    #[tokio::test]
    async fn test_search_by_media_type_uses_typed_endpoint() {
        let mut server = Server::new_async().await;
        let movies = server
            .mock("GET", "/search/movie")
            .match_query(Matcher::UrlEncoded("query".into(), "dune".into()))
            .with_status(200)
            .with_body(r#"{"results": [{"id": 438631, "title": "Dune", "release_date": "2021-09-15"}], "total_results": 1}"#)
            .create_async()
            .await;
        let shows = server
            .mock("GET", "/search/tv")
            .match_query(Matcher::UrlEncoded("query".into(), "dune".into()))
            .with_status(200)
            .with_body(r#"{"results": [{"id": 90228, "name": "Dune: Prophecy"}], "total_results": 1}"#)
            .create_async()
            .await;
        let multi = server
            .mock("GET", "/search/multi")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());
        assert_eq!(run(&["search", "dune", "-t", "movie"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["search", "dune", "-t", "tv"], &ctx).await, ExitCode::Success);

        movies.assert_async().await;
        shows.assert_async().await;
        multi.assert_async().await;
    }

    #[tokio::test]
    async fn test_related_title_commands() {
        let mut server = Server::new_async().await;
        let similar = server
            .mock("GET", "/movie/603/similar")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [{"id": 604, "title": "The Matrix Reloaded"}]}"#)
            .create_async()
            .await;
        let recommended = server
            .mock("GET", "/tv/1396/recommendations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [{"id": 60059, "name": "Better Call Saul"}]}"#)
            .create_async()
            .await;
        let credits = server
            .mock("GET", "/movie/603/credits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"cast": [{"id": 6384, "name": "Keanu Reeves", "character": "Neo", "order": 0}], "crew": []}"#)
            .create_async()
            .await;
        let videos = server
            .mock("GET", "/movie/603/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [{"id": "v1", "key": "vKQi3bBA1y8", "name": "Trailer", "site": "YouTube", "type": "Trailer"}]}"#)
            .create_async()
            .await;
        let _gone = server
            .mock("GET", "/movie/999/similar")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());
        assert_eq!(run(&["similar", "603"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["recommended", "1396", "-t", "tv"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["credits", "603"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["videos", "603"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["similar", "999"], &ctx).await, ExitCode::NotFound);

        similar.assert_async().await;
        recommended.assert_async().await;
        credits.assert_async().await;
        videos.assert_async().await;
    }

    #[tokio::test]
    async fn test_config_command_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let ctx = context(&dir, "http://127.0.0.1:9".into());
        assert_eq!(run(&["config"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["config", "--region", "gb"], &ctx).await, ExitCode::Error);

        let ctx = ctx.with_config_path(Some(path.clone()));
        assert_eq!(
            run(&["config", "--language", "es-ES", "--region", "gb"], &ctx).await,
            ExitCode::Success
        );
        let saved = Config::load_from(&path);
        assert_eq!(saved.tmdb_api_key.as_deref(), Some("test_key"));
        assert_eq!(saved.language.as_deref(), Some("es-ES"));
        assert_eq!(saved.region.as_deref(), Some("GB"));
    }

    #[tokio::test]
    async fn test_kids_toggle_sets_maturity() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9".into());
        run(&["signup", "ada@example.com", "Ada"], &ctx).await;
        run(&["profiles", "add", "Junior", "--kids"], &ctx).await;

        let maturity = || {
            let store = Store::open(dir.path());
            let junior = store.user.profiles().iter().find(|p| p.name == "Junior").cloned().unwrap();
            (junior.is_kids, junior.maturity_level.label())
        };
        assert_eq!(maturity(), (true, "PG"));

        assert_eq!(
            run(&["profiles", "update", "Junior", "--kids", "true", "--maturity", "r"], &ctx).await,
            ExitCode::InvalidArgs
        );
        assert_eq!(
            run(&["profiles", "update", "Junior", "--kids", "false"], &ctx).await,
            ExitCode::Success
        );
        assert_eq!(maturity(), (false, "R"));

        assert_eq!(
            run(&["profiles", "update", "Junior", "--kids", "false", "--maturity", "pg-13"], &ctx)
                .await,
            ExitCode::Success
        );
        assert_eq!(maturity(), (false, "PG-13"));
    }

    #[tokio::test]
    async fn test_discover_by_genre_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/discover/tv")
            .match_query(Matcher::UrlEncoded("with_genres".into(), "18".into()))
            .with_status(200)
            .with_body(r#"{"results": [{"id": 1396, "name": "Breaking Bad"}]}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());
        assert_eq!(run(&["discover", "drama", "-t", "tv"], &ctx).await, ExitCode::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_account_lifecycle() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9".into());

        assert_eq!(run(&["whoami"], &ctx).await, ExitCode::NotAuthenticated);
        assert_eq!(run(&["signin", "ada@example.com"], &ctx).await, ExitCode::NotAuthenticated);
        assert_eq!(run(&["signup", " ", "Ada"], &ctx).await, ExitCode::InvalidArgs);

        assert_eq!(run(&["signup", "ada@example.com", "Ada"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["whoami"], &ctx).await, ExitCode::Success);

        assert_eq!(run(&["signout"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["signin", "bob@example.com"], &ctx).await, ExitCode::NotAuthenticated);
        assert_eq!(run(&["signin", "ada@example.com"], &ctx).await, ExitCode::Success);

        let store = Store::open(dir.path());
        assert!(store.is_authenticated());
        assert_eq!(store.active_profile().map(|p| p.name.as_str()), Some("Ada"));
    }

    #[tokio::test]
    async fn test_profile_management() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9".into());

        assert_eq!(run(&["profiles", "list"], &ctx).await, ExitCode::NotAuthenticated);
        run(&["signup", "ada@example.com", "Ada"], &ctx).await;

        assert_eq!(run(&["profiles", "add", "Junior", "--kids"], &ctx).await, ExitCode::Success);
        assert_eq!(
            run(&["profiles", "add", "Bad", "--avatar", "red"], &ctx).await,
            ExitCode::InvalidArgs
        );
        for name in ["Cy", "Di", "Ed"] {
            assert_eq!(run(&["profiles", "add", name], &ctx).await, ExitCode::Success);
        }
        assert_eq!(run(&["profiles", "add", "Fay"], &ctx).await, ExitCode::Error);

        assert_eq!(run(&["profiles", "switch", "junior"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["profiles", "switch", "nobody"], &ctx).await, ExitCode::NotFound);

        let store = Store::open(dir.path());
        assert_eq!(store.user.profiles().len(), 5);
        let active = store.active_profile().unwrap();
        assert_eq!(active.name, "Junior");
        assert!(active.is_kids);
        assert_eq!(active.maturity_level.label(), "PG");

        for name in ["Cy", "Di", "Ed", "Junior"] {
            assert_eq!(run(&["profiles", "delete", name], &ctx).await, ExitCode::Success);
        }
        assert_eq!(run(&["profiles", "delete", "Ada"], &ctx).await, ExitCode::Error);
    }

    #[tokio::test]
    async fn test_watchlist_commands() {
        let mut server = Server::new_async().await;
        let details = server
            .mock("GET", "/movie/550")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(FIGHT_CLUB)
            .expect(1)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());

        assert_eq!(run(&["watchlist", "list"], &ctx).await, ExitCode::NotAuthenticated);
        run(&["signup", "ada@example.com", "Ada"], &ctx).await;

        assert_eq!(run(&["watchlist", "add", "550"], &ctx).await, ExitCode::Success);
        // Already saved: no second lookup
        assert_eq!(run(&["watchlist", "add", "550"], &ctx).await, ExitCode::Success);
        details.assert_async().await;

        let store = Store::open(dir.path());
        assert_eq!(store.watchlist.items.len(), 1);
        assert_eq!(store.watchlist.items[0].title, "Fight Club");

        assert_eq!(run(&["watchlist", "rm", "550", "-t", "tv"], &ctx).await, ExitCode::NotFound);
        assert_eq!(run(&["watchlist", "rm", "550"], &ctx).await, ExitCode::Success);
        assert!(Store::open(dir.path()).watchlist.items.is_empty());
    }

    #[tokio::test]
    async fn test_watch_records_progress() {
        let mut server = Server::new_async().await;
        let _details = server
            .mock("GET", "/movie/550")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(FIGHT_CLUB)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());

        assert_eq!(run(&["info", "550"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["watch", "550", "-p", "50:00"], &ctx).await, ExitCode::Success);
        let store = Store::open(dir.path());
        let item = store.continue_watching_item(550, MediaType::Movie).unwrap();
        assert_eq!(item.progress, 50);
        assert_eq!(item.timestamp, 3000);

        assert_eq!(run(&["watch", "550", "-p", "later"], &ctx).await, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_watch_without_trailer() {
        let mut server = Server::new_async().await;
        let _details = server
            .mock("GET", "/movie/551")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(NO_TRAILER)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());

        assert_eq!(run(&["watch", "551", "-p", "60"], &ctx).await, ExitCode::NotFound);
        assert_eq!(run(&["trailer", "551"], &ctx).await, ExitCode::NotFound);
        assert!(Store::open(dir.path()).continue_watching.items.is_empty());
    }

    #[tokio::test]
    async fn test_continue_watching_commands() {
        let mut server = Server::new_async().await;
        let _details = server
            .mock("GET", "/movie/550")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(FIGHT_CLUB)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, server.url());
        run(&["signup", "ada@example.com", "Ada"], &ctx).await;

        assert_eq!(
            run(&["continue", "update", "550", "-p", "80", "--timestamp", "4800"], &ctx).await,
            ExitCode::Success
        );
        assert_eq!(
            Store::open(dir.path())
                .continue_watching_item(550, MediaType::Movie)
                .map(|i| i.progress),
            Some(80)
        );

        assert_eq!(run(&["continue", "rm", "550"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["continue", "rm", "550"], &ctx).await, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_signout_clear_data() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9".into());
        run(&["signup", "ada@example.com", "Ada"], &ctx).await;

        assert_eq!(run(&["signout", "--clear-data"], &ctx).await, ExitCode::Success);
        assert_eq!(run(&["signin", "ada@example.com"], &ctx).await, ExitCode::NotAuthenticated);
    }
}
