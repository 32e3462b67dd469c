use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{RecommendedVacancy, Snapshot, UserId, Vacancy};
use engine::{RecommendConfig, Recommender, calculate_age, vacancies_in_exam_window};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// VacancyRecs - Job vacancy recommendation engine
#[derive(Parser)]
#[command(name = "vacancy-recs")]
#[command(about = "Vacancy recommendations from hybrid collaborative + content filtering", long_about = None)]
struct Cli {
    /// Path to the snapshot data directory
    #[arg(short, long, default_value = "data/snapshot")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get vacancy recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Maximum number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Emit results as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show a user's profile and rating history
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// List vacancies whose exam date falls inside a window
    ExamWindow {
        /// Window start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Window end date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Show snapshot counts
    Stats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading snapshot from {}...", cli.data_dir.display());
    let start = Instant::now();
    let snapshot = Arc::new(
        Snapshot::load_from_files(&cli.data_dir)
            .context("Failed to load snapshot")?,
    );
    println!("{} Loaded snapshot in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend { user_id, limit, json } => {
            handle_recommend(snapshot, user_id, limit, json)?
        }
        Commands::User { user_id } => handle_user(snapshot, user_id)?,
        Commands::ExamWindow { start, end } => handle_exam_window(snapshot, start, end),
        Commands::Stats => handle_stats(snapshot),
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    snapshot: Arc<Snapshot>,
    user_id: UserId,
    limit: usize,
    json: bool,
) -> Result<()> {
    // Check if the user exists so "unknown user" is a hard CLI error
    // rather than an empty page.
    let _user = snapshot
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let config = RecommendConfig::new().with_max_results(limit);
    let recommender = Recommender::with_config(snapshot, config);
    let recommendations = recommender.recommend(user_id);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(&recommendations);
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(snapshot: Arc<Snapshot>, user_id: UserId) -> Result<()> {
    let user = snapshot
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;
    let ratings = snapshot.get_user_ratings(user_id);

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    println!("{}Name: {}", "• ".green(), user.full_name);
    match user.date_of_birth {
        Some(dob) => {
            let age = calculate_age(dob, Utc::now().date_naive());
            println!("{}Date of birth: {} (age {})", "• ".green(), dob, age);
        }
        None => println!("{}Date of birth: not set", "• ".green()),
    }
    println!(
        "{}Minimum qualification: {}",
        "• ".green(),
        user.minimum_qualification.as_deref().unwrap_or("not set")
    );

    let num_ratings = ratings.len();
    let avg_rating = if num_ratings > 0 {
        let total: i32 = ratings.iter().map(|r| r.rating).sum();
        total as f64 / num_ratings as f64
    } else {
        0.0
    };
    println!("{}Number of ratings: {}", "• ".cyan(), num_ratings);
    println!("{}Average rating: {:.2}", "• ".cyan(), avg_rating);

    let mut top_rated: Vec<_> = ratings.iter().collect();
    top_rated.sort_by(|a, b| b.rating.cmp(&a.rating));
    println!("Top rated vacancies:");
    for rating in top_rated.iter().take(5) {
        if let Some(vacancy) = snapshot.get_vacancy(rating.vacancy_id) {
            println!("  - {} (Rating: {})", vacancy.topic, rating.rating);
        }
    }
    Ok(())
}

/// Handle the 'exam-window' command
fn handle_exam_window(snapshot: Arc<Snapshot>, start: NaiveDate, end: NaiveDate) {
    let vacancies: Vec<Vacancy> = snapshot.all_vacancies().cloned().collect();
    let selected = vacancies_in_exam_window(&vacancies, Some(start), Some(end));

    println!(
        "{}",
        format!("Vacancies with exams between {} and {}:", start, end)
            .bold()
            .blue()
    );
    if selected.is_empty() {
        println!("  (none)");
        return;
    }
    for vacancy in &selected {
        // Every selected vacancy has an exam date by construction
        let exam = vacancy
            .exam_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "  {} {} (exam {}, posted {})",
            vacancy.id.to_string().green(),
            vacancy.topic,
            exam,
            vacancy.posted_date
        );
    }
}

/// Handle the 'stats' command
fn handle_stats(snapshot: Arc<Snapshot>) {
    let (users, vacancies, ratings) = snapshot.counts();
    println!("{}", "Snapshot:".bold().blue());
    println!("{}Users: {}", "• ".green(), users);
    println!("{}Vacancies: {}", "• ".green(), vacancies);
    println!("{}Ratings: {}", "• ".green(), ratings);
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[RecommendedVacancy]) {
    println!("{}", "Vacancy Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  (no recommendations — rate some vacancies or complete your profile)");
        return;
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        let exam = rec
            .exam_date
            .map(|d| format!(", exam {}", d))
            .unwrap_or_default();
        println!(
            "{}. {} (posted {}{})",
            (rank + 1).to_string().green(),
            rec.topic.bold(),
            rec.posted_date,
            exam
        );
        if let Some(poster) = &rec.posted_by {
            println!("   Posted by: {}", poster);
        }
        println!("   Apply: {}", rec.application_link);
    }
}
