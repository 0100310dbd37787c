use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use fittrack_core::stats::GoalProgress;
use fittrack_core::{
    CatalogSource, Difficulty, KeyValueStore, PlanFilter, SetLog, WorkoutSession, WorkoutStore,
};

use super::OutputFormat;

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Browse workout plans
    Plans {
        /// Match against plan name or description
        #[arg(long, short)]
        search: Option<String>,

        /// Only plans in this category
        #[arg(long)]
        category: Option<String>,

        /// Only plans of this difficulty (beginner, intermediate, advanced)
        #[arg(long)]
        difficulty: Option<String>,

        /// Only favourite plans
        #[arg(long)]
        favorites: bool,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a plan with its exercises
    Show {
        /// Plan ID or name
        plan: String,
    },

    /// Start a session for a plan
    Start {
        /// Plan ID or name
        plan: String,
    },

    /// Show the session in progress
    Current,

    /// Record a set for an exercise of the session in progress
    LogSet {
        /// Exercise ID
        exercise: String,

        #[arg(long, short)]
        reps: u32,

        /// Weight used
        #[arg(long, short)]
        weight: Option<f64>,

        /// Duration in seconds
        #[arg(long, short)]
        duration: Option<u32>,
    },

    /// Finish the session in progress and add it to history
    Complete {
        /// Session length in minutes (defaults to elapsed time)
        #[arg(long, short)]
        duration: Option<u32>,
    },

    /// Discard the session in progress
    Cancel,

    /// View completed sessions
    History {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Show only the most recent N sessions
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Toggle a plan as favourite
    Favorite {
        /// Plan ID or name
        plan: String,
    },

    /// Show or set the weekly workout goal (1-14)
    Goal {
        /// New goal
        value: Option<String>,
    },

    /// Dashboard statistics
    Stats {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl WorkoutCommand {
    pub async fn run<S, C>(
        &self,
        store: &mut WorkoutStore<S, C>,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        S: KeyValueStore,
        C: CatalogSource,
    {
        store.load_all().await;

        match &self.command {
            WorkoutSubcommand::Plans {
                search,
                category,
                difficulty,
                favorites,
                format,
            } => {
                let filter = PlanFilter {
                    query: search.clone(),
                    category: category.clone(),
                    difficulty: difficulty
                        .as_deref()
                        .map(str::parse::<Difficulty>)
                        .transpose()?,
                };
                let plans: Vec<_> = store
                    .filter_plans(&filter)
                    .into_iter()
                    .filter(|p| !favorites || store.is_favorite(&p.id))
                    .collect();

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
                    OutputFormat::Text => {
                        if plans.is_empty() {
                            println!("No workout plans match.");
                            return Ok(());
                        }
                        println!(
                            "{:<4} {:<24} {:<12} {:<13} {:>5}",
                            "ID", "NAME", "CATEGORY", "DIFFICULTY", "MIN"
                        );
                        for plan in &plans {
                            let star = if store.is_favorite(&plan.id) { " *" } else { "" };
                            println!(
                                "{:<4} {:<24} {:<12} {:<13} {:>5}{}",
                                plan.id,
                                plan.name,
                                plan.category,
                                plan.difficulty.to_string(),
                                plan.duration,
                                star
                            );
                        }
                        println!("\nCategories: {}", store.categories().join(", "));
                    }
                }
            }

            WorkoutSubcommand::Show { plan } => {
                let plan = store
                    .find_plan(plan)
                    .ok_or_else(|| format!("Workout plan not found: {}", plan))?;
                println!("{}", plan);
            }

            WorkoutSubcommand::Start { plan } => {
                let plan_id = store
                    .find_plan(plan)
                    .map(|p| p.id.clone())
                    .ok_or_else(|| format!("Workout plan not found: {}", plan))?;
                if let Some(current) = store.current_workout() {
                    tracing::warn!("Replacing unfinished session {}", current.id);
                }
                let session = store.start_workout(&plan_id, Utc::now()).await?;
                println!("Started workout (session {})", session.id);
                println!("Log sets with 'fittrack workout log-set <exercise> --reps N'.");
            }

            WorkoutSubcommand::Current => match store.current_workout() {
                Some(session) => print_session(store, session),
                None => println!("No workout in progress."),
            },

            WorkoutSubcommand::LogSet {
                exercise,
                reps,
                weight,
                duration,
            } => {
                let mut set = SetLog::reps(*reps);
                if let Some(w) = weight {
                    set = set.with_weight(*w);
                }
                if let Some(d) = duration {
                    set = set.with_duration(*d);
                }
                let session = store.log_set(exercise, set).await?;
                println!("Logged set ({} total this session)", session.total_sets());
            }

            WorkoutSubcommand::Complete { duration } => {
                let session = store.finish_current(*duration, Utc::now()).await?;
                println!(
                    "Workout complete: {} set(s) in {} min",
                    session.total_sets(),
                    session.duration
                );
                let progress = store.goal_progress(Utc::now());
                print_goal_progress(&progress);
            }

            WorkoutSubcommand::Cancel => {
                store.cancel_workout().await?;
                println!("Workout discarded.");
            }

            WorkoutSubcommand::History { format, limit } => {
                let mut sessions: Vec<&WorkoutSession> = store.history().iter().collect();
                sessions.sort_by(|a, b| b.date.cmp(&a.date));
                if let Some(n) = limit {
                    sessions.truncate(*n);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&sessions)?)
                    }
                    OutputFormat::Text => {
                        if sessions.is_empty() {
                            println!("No workouts logged yet.");
                            return Ok(());
                        }
                        for session in &sessions {
                            let name = store
                                .plan(&session.plan_id)
                                .map(|p| p.name.as_str())
                                .unwrap_or("Unknown plan");
                            println!(
                                "{}  {:<24} {:>3} min  {} set(s){}",
                                session.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                                name,
                                session.duration,
                                session.total_sets(),
                                if session.completed { "" } else { " (incomplete)" }
                            );
                        }
                        println!("\nTotal: {} session(s)", store.history().len());
                    }
                }
            }

            WorkoutSubcommand::Favorite { plan } => {
                let (plan_id, name) = store
                    .find_plan(plan)
                    .map(|p| (p.id.clone(), p.name.clone()))
                    .ok_or_else(|| format!("Workout plan not found: {}", plan))?;
                if store.toggle_favorite(&plan_id).await? {
                    println!("Added '{}' to favorites", name);
                } else {
                    println!("Removed '{}' from favorites", name);
                }
            }

            WorkoutSubcommand::Goal { value } => {
                if let Some(v) = value {
                    let goal = store.set_weekly_goal(v).await?;
                    println!("Weekly goal updated to {} workouts!", goal);
                } else {
                    println!("Weekly goal: {} workouts", store.weekly_goal());
                }
                print_goal_progress(&store.goal_progress(Utc::now()));
            }

            WorkoutSubcommand::Stats { format } => {
                let now = Utc::now();
                let stats = store.stats(now);
                match format {
                    OutputFormat::Json => {
                        let body = serde_json::json!({
                            "stats": stats,
                            "goal": store.goal_progress(now),
                        });
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    }
                    OutputFormat::Text => {
                        println!("This week:   {} workout(s)", stats.this_week);
                        println!("This month:  {} workout(s)", stats.this_month);
                        println!(
                            "Total:       {} session(s), {} completed",
                            stats.total, stats.completed
                        );
                        println!("Streak:      {} day(s)", stats.streak);
                        println!("Avg time:    {} min", stats.average_duration);
                        println!();
                        print_goal_progress(&store.goal_progress(now));
                    }
                }
            }
        }

        Ok(())
    }
}

fn print_session<S, C>(store: &WorkoutStore<S, C>, session: &WorkoutSession)
where
    S: KeyValueStore,
    C: CatalogSource,
{
    let plan = store.plan(&session.plan_id);
    println!(
        "{} (started {})",
        plan.map(|p| p.name.as_str()).unwrap_or("Unknown plan"),
        session.date.with_timezone(&Local).format("%H:%M")
    );
    for log in &session.exercises {
        let name = plan
            .and_then(|p| p.exercise(&log.exercise_id))
            .map(|e| e.name.as_str())
            .unwrap_or("?");
        println!("  [{}] {:<16} {} set(s)", log.exercise_id, name, log.sets.len());
        for (i, set) in log.sets.iter().enumerate() {
            let mut line = format!("      {}. {} reps", i + 1, set.reps);
            if let Some(w) = set.weight {
                line.push_str(&format!(" @ {}", w));
            }
            if let Some(d) = set.duration {
                line.push_str(&format!(" for {}s", d));
            }
            println!("{}", line);
        }
    }
}

fn print_goal_progress(progress: &GoalProgress) {
    println!(
        "This week's goal: {}/{} workouts ({}%)",
        progress.done, progress.goal, progress.percent
    );
    if progress.remaining > 0 {
        println!("{} more to reach your goal!", progress.remaining);
    } else {
        println!("Goal reached!");
    }
}
