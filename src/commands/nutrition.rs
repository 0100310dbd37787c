use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use fittrack_core::{CatalogSource, KeyValueStore, MealType, NutritionGoals, NutritionStore};

use super::{parse_date, OutputFormat};

#[derive(Args)]
pub struct NutritionCommand {
    #[command(subcommand)]
    pub command: NutritionSubcommand,
}

#[derive(Subcommand)]
pub enum NutritionSubcommand {
    /// Browse the food catalog
    Foods {
        /// Match against food name
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Log a food for a meal
    Log {
        /// Food ID or name
        food: String,

        /// Number of servings
        #[arg(long, short, default_value_t = 1.0)]
        quantity: f64,

        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,
    },

    /// Add water intake for today
    Water {
        /// Amount in millilitres
        amount: u32,
    },

    /// Daily nutrition overview
    Summary {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show or update daily nutrition goals
    Goals {
        /// kcal
        #[arg(long)]
        calories: Option<u32>,

        /// grams
        #[arg(long)]
        protein: Option<u32>,

        /// grams
        #[arg(long)]
        carbs: Option<u32>,

        /// grams
        #[arg(long)]
        fat: Option<u32>,

        /// millilitres
        #[arg(long)]
        water: Option<u32>,
    },
}

impl NutritionCommand {
    pub async fn run<S, C>(
        &self,
        store: &mut NutritionStore<S, C>,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        S: KeyValueStore,
        C: CatalogSource,
    {
        store.load_all().await;

        match &self.command {
            NutritionSubcommand::Foods { search, format } => {
                let foods = store.search_foods(search.as_deref().unwrap_or(""));
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&foods)?),
                    OutputFormat::Text => {
                        if foods.is_empty() {
                            println!("No foods match.");
                        }
                        for food in foods {
                            println!("[{}] {}", food.id, food);
                        }
                    }
                }
            }

            NutritionSubcommand::Log {
                food,
                quantity,
                meal_type,
            } => {
                let meal_type: MealType = meal_type.parse()?;
                let (food_id, name) = store
                    .find_food(food)
                    .map(|f| (f.id.clone(), f.name.clone()))
                    .ok_or_else(|| format!("Food not found: {}", food))?;

                store
                    .add_meal_entry(&food_id, *quantity, meal_type, Utc::now())
                    .await?;
                println!("Added {} x{} to {}", name, quantity, meal_type);
            }

            NutritionSubcommand::Water { amount } => {
                let today = Local::now().date_naive();
                let total = store.add_water_intake(today, *amount).await?;
                println!("Water today: {} / {} ml", total, store.goals().water);
            }

            NutritionSubcommand::Summary { date, format } => {
                let day = match date {
                    Some(d) => parse_date(d)?,
                    None => Local::now().date_naive(),
                };
                let totals = store.daily_totals(day);
                let water = store.water_on(day);
                let goals = store.goals();

                match format {
                    OutputFormat::Json => {
                        let body = serde_json::json!({
                            "date": day,
                            "totals": totals,
                            "water": water,
                            "goals": goals,
                            "entries": store.entries_on(day),
                        });
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    }
                    OutputFormat::Text => {
                        let header = format!("Nutrition for {}", day);
                        println!("{}", header);
                        println!("{}", "-".repeat(header.len()));
                        print_macro("Calories", totals.calories, goals.calories, "kcal");
                        print_macro("Protein", totals.protein, goals.protein, "g");
                        print_macro("Carbs", totals.carbs, goals.carbs, "g");
                        print_macro("Fat", totals.fat, goals.fat, "g");
                        println!("{:<10} {:>5} / {} ml", "Water", water, goals.water);

                        for meal_type in MealType::ALL {
                            let entries = store.entries_for(day, meal_type);
                            if entries.is_empty() {
                                continue;
                            }
                            println!(
                                "\n{} ({} kcal)",
                                meal_type.label(),
                                store.meal_calories(day, meal_type).round()
                            );
                            for entry in entries {
                                let name = store
                                    .food(&entry.food_id)
                                    .map(|f| f.name.as_str())
                                    .unwrap_or("Unknown food");
                                println!("  - {} x{}", name, entry.quantity);
                            }
                        }
                    }
                }
            }

            NutritionSubcommand::Goals {
                calories,
                protein,
                carbs,
                fat,
                water,
            } => {
                let current = store.goals().clone();
                let updated = NutritionGoals {
                    calories: calories.unwrap_or(current.calories),
                    protein: protein.unwrap_or(current.protein),
                    carbs: carbs.unwrap_or(current.carbs),
                    fat: fat.unwrap_or(current.fat),
                    water: water.unwrap_or(current.water),
                };

                let goals = if updated != current {
                    let goals = store.update_nutrition_goals(updated).await?;
                    println!("Goals updated successfully!");
                    goals
                } else {
                    store.goals()
                };
                println!("Calories: {} kcal", goals.calories);
                println!("Protein:  {} g", goals.protein);
                println!("Carbs:    {} g", goals.carbs);
                println!("Fat:      {} g", goals.fat);
                println!("Water:    {} ml", goals.water);
            }
        }

        Ok(())
    }
}

fn print_macro(name: &str, current: f64, goal: u32, unit: &str) {
    println!("{:<10} {:>5} / {} {}", name, current.round(), goal, unit);
}
