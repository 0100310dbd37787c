use clap::{Args, Subcommand};
use fittrack_core::{AuthStore, KeyValueStore, User};

use super::OutputFormat;

#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand)]
pub enum AuthSubcommand {
    /// Sign in with an email address
    Login {
        email: String,

        /// Password (accepted as given)
        #[arg(long, short)]
        password: String,
    },

    /// Create an account
    Signup {
        email: String,

        #[arg(long, short)]
        password: String,

        /// Display name
        #[arg(long, short)]
        name: String,
    },

    /// Continue as a guest
    Guest,

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit the display name or email
    Update {
        #[arg(long, short)]
        name: Option<String>,

        #[arg(long, short)]
        email: Option<String>,
    },
}

impl AuthCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        store: &mut AuthStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        store.load_user().await;

        match &self.command {
            AuthSubcommand::Login { email, password } => {
                let user = store.login(email, password).await?;
                println!("Welcome back, {}!", user.name);
            }
            AuthSubcommand::Signup {
                email,
                password,
                name,
            } => {
                let user = store.sign_up(email, password, name).await?;
                println!("Account created. Welcome, {}!", user.name);
            }
            AuthSubcommand::Guest => {
                let user = store.login_as_guest().await?;
                println!("Signed in as {}", user.name);
            }
            AuthSubcommand::Logout => {
                if !store.is_authenticated() {
                    println!("Not signed in.");
                    return Ok(());
                }
                store.logout().await?;
                println!("Signed out.");
            }
            AuthSubcommand::Whoami { format } => match (store.user(), format) {
                (None, _) => {
                    println!("Not signed in. Use 'fittrack auth login' or 'fittrack auth guest'.")
                }
                (Some(user), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(user)?)
                }
                (Some(user), OutputFormat::Text) => print_user(user),
            },
            AuthSubcommand::Update { name, email } => {
                if name.is_none() && email.is_none() {
                    return Err("Nothing to update. Pass --name and/or --email.".into());
                }
                let user = store
                    .update_profile(name.as_deref(), email.as_deref())
                    .await?;
                println!("Profile updated:");
                print_user(user);
            }
        }

        Ok(())
    }
}

fn print_user(user: &User) {
    println!("  Name:  {}", user.name);
    println!("  Email: {}", user.email);
    if user.is_guest {
        println!("  (guest account)");
    }
}
