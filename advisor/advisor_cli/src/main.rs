use std::path::PathBuf;

use advisor_recommender::{
    parse_interests, AdvisorConfig, AdvisorRuntime, Course, RecommendationRequest,
    RecommenderTelemetry,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use shared_logging::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "advisor", version, about = "Elective course advisor")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// JSON-lines log file, overriding the configured one.
    #[arg(long, global = true)]
    log: Option<PathBuf>,
    /// Log debug records as well.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommends electives and a study plan.
    Recommend(RecommendArgs),
    /// Lists catalog courses.
    Catalog {
        /// Case-insensitive program filter.
        #[arg(long)]
        program: Option<String>,
        /// Only list electives.
        #[arg(long)]
        electives_only: bool,
    },
    /// Prints the effective configuration.
    Config,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Free-text description of education and experience.
    #[arg(long, default_value = "")]
    background: String,
    /// Interest; repeat the flag or pass a comma separated list.
    #[arg(long = "interest")]
    interests: Vec<String>,
    /// Case-insensitive program filter.
    #[arg(long)]
    program: Option<String>,
    /// Maximum number of recommendations.
    #[arg(long)]
    limit: Option<usize>,
    /// Study plan horizon in terms.
    #[arg(long)]
    horizon: Option<u32>,
    /// Leave the study plan out of the report.
    #[arg(long)]
    no_plan: bool,
    /// Print the full outcome as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AdvisorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.log {
        config.logging.path = Some(path);
    }
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Commands::Catalog {
            program,
            electives_only,
        } => {
            let runtime = build_runtime(&config)?;
            let catalog = runtime.catalog();
            for course in select_courses(catalog.courses(), program.as_deref(), electives_only) {
                println!("{}", catalog_line(course));
            }
            Ok(())
        }
        Commands::Recommend(args) => {
            let runtime = build_runtime(&config)?;
            let json = args.json;
            let request = build_request(&config, args);
            let outcome = runtime.recommend(&request);
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.report);
            }
            Ok(())
        }
    }
}

fn build_runtime(config: &AdvisorConfig) -> Result<AdvisorRuntime> {
    let telemetry = match &config.logging.path {
        Some(path) => Some(
            RecommenderTelemetry::builder("advisor")
                .log_path(path)
                .min_level(config.logging.level)
                .build()
                .with_context(|| format!("opening log {}", path.display()))?,
        ),
        None => None,
    };
    Ok(AdvisorRuntime::from_config(config, telemetry))
}

fn build_request(config: &AdvisorConfig, args: RecommendArgs) -> RecommendationRequest {
    let interests: Vec<String> = args
        .interests
        .iter()
        .flat_map(|raw| parse_interests(raw))
        .collect();
    let mut request =
        RecommendationRequest::from_config(config, args.background).with_interests(interests);
    if let Some(program) = args.program.filter(|p| !p.trim().is_empty()) {
        request = request.with_program(program);
    }
    if let Some(limit) = args.limit.filter(|limit| *limit > 0) {
        request = request.with_limit(limit);
    }
    if let Some(horizon) = args.horizon.filter(|horizon| *horizon > 0) {
        request = request.with_horizon(horizon);
    }
    if args.no_plan {
        request = request.without_plan();
    }
    request
}

fn select_courses<'a>(
    courses: &'a [Course],
    program: Option<&'a str>,
    electives_only: bool,
) -> impl Iterator<Item = &'a Course> {
    courses
        .iter()
        .filter(move |course| !electives_only || course.kind.is_elective())
        .filter(move |course| program.is_none_or(|filter| course.in_program(filter)))
}

fn catalog_line(course: &Course) -> String {
    format!(
        "{} | term {} | {} | {} cr | {}",
        course.program, course.term, course.kind, course.credits, course.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_recommender::Catalog;
    use std::fs;
    use tempfile::tempdir;

    fn recommend_args(argv: &[&str]) -> RecommendArgs {
        let mut full = vec!["advisor", "recommend"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Recommend(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn request_merges_flags_with_config_defaults() {
        let config = AdvisorConfig::default();
        let args = recommend_args(&[
            "--background",
            "Python developer",
            "--interest",
            "NLP, computer vision",
            "--interest",
            "MLOps",
            "--limit",
            "3",
            "--no-plan",
        ]);
        let request = build_request(&config, args);
        assert_eq!(request.interests, vec!["NLP", "computer vision", "MLOps"]);
        assert_eq!(request.limit, 3);
        assert_eq!(request.horizon, 4);
        assert!(!request.include_plan);
        assert!(request.program.is_none());
    }

    #[test]
    fn zero_overrides_keep_config_values() {
        let mut config = AdvisorConfig::default();
        config.recommend.program = Some("AI Product".into());
        let request = build_request(
            &config,
            recommend_args(&["--limit", "0", "--horizon", "0", "--program", " "]),
        );
        assert_eq!(request.limit, 5);
        assert_eq!(request.horizon, 4);
        assert_eq!(request.program.as_deref(), Some("AI Product"));
    }

    #[test]
    fn catalog_selection_filters() {
        let catalog = Catalog::seed();
        let electives: Vec<_> = select_courses(catalog.courses(), Some("product"), true).collect();
        assert_eq!(electives.len(), 1);
        assert_eq!(
            catalog_line(electives[0]),
            "AI Product | term 2 | elective | 2 cr | AI Ethics"
        );
        assert_eq!(select_courses(catalog.courses(), None, false).count(), 12);
    }

    #[test]
    fn runtime_logs_to_configured_file() {
        let dir = tempdir().unwrap();
        let mut config = AdvisorConfig::default();
        config.data_dir = dir.path().to_path_buf();
        config.logging.path = Some(dir.path().join("advisor.log"));
        let runtime = build_runtime(&config).unwrap();
        assert_eq!(runtime.catalog().len(), 12);
        let content = fs::read_to_string(dir.path().join("advisor.log")).unwrap();
        assert!(content.contains("advisor.catalog.seed_fallback"));
    }
}
