use clap::{Args, Subcommand};
use fittrack_core::{KeyValueStore, ReflectionStore};

use super::OutputFormat;

#[derive(Args)]
pub struct ReflectionCommand {
    #[command(subcommand)]
    pub command: ReflectionSubcommand,
}

#[derive(Subcommand)]
pub enum ReflectionSubcommand {
    /// Write a new reflection
    Add {
        #[arg(long, short)]
        title: String,

        #[arg(long, short)]
        content: String,
    },

    /// List reflections, newest first
    List {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one reflection in full
    Show {
        /// Position in the list (1 = newest)
        number: usize,
    },
}

impl ReflectionCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        store: &mut ReflectionStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ReflectionSubcommand::Add { title, content } => {
                store
                    .add(title, content)
                    .await
                    .map_err(|e| format!("Could not save the reflection: {}", e))?;
                println!("Reflection saved ({} total)", store.len());
            }

            ReflectionSubcommand::List { format } => {
                store.load().await;
                let reflections = store.list();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&reflections)?)
                    }
                    OutputFormat::Text => {
                        if reflections.is_empty() {
                            println!("No reflections yet.");
                        }
                        for (i, reflection) in reflections.iter().enumerate() {
                            println!("{}. {}", i + 1, reflection.title);
                            println!("   {}", preview(&reflection.content, 60));
                        }
                    }
                }
            }

            ReflectionSubcommand::Show { number } => {
                store.load().await;
                let reflection = number
                    .checked_sub(1)
                    .and_then(|i| store.get(i))
                    .ok_or_else(|| format!("No reflection #{}", number))?;
                println!("{}", reflection.title);
                println!("{}", "=".repeat(reflection.title.chars().count()));
                println!("{}", reflection.content);
            }
        }

        Ok(())
    }
}

/// First line of `text`, cut to `max` characters.
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
