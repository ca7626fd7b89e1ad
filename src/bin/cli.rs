use anyhow::Context;
use campus::cli::create_superuser;
use campus_db::init_db_pool;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Campus CLI - Administrative tools for the Campus API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new superuser account
    CreateSuperuser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await?;

    match cli.command {
        Commands::CreateSuperuser {
            email,
            full_name,
            password,
        } => handle_create_superuser(&pool, email, full_name, password).await,
    }
}

async fn handle_create_superuser(
    pool: &sqlx::PgPool,
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let full_name = match full_name {
        Some(name) => Some(name),
        None => {
            let name: String = Input::new()
                .with_prompt("Full name (optional)")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read full name")?;
            Some(name).filter(|n| !n.trim().is_empty())
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    match create_superuser(pool, &email, &password, full_name).await {
        Ok(user) => {
            println!("\n✅ Superuser created successfully!");
            println!("   Email: {}", user.email);
            println!("   ID: {}", user.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating superuser: {}", e.error);
            std::process::exit(1);
        }
    }
}
