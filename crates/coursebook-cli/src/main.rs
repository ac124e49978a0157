use anyhow::Context;
use clap::{Parser, Subcommand};
use coursebook_cli::seeder::{self, SeedConfig};
use coursebook_config::{DatabaseConfig, PasswordConfig};
use coursebook_db::{PgStore, init_db_pool, run_migrations};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursebook-cli")]
#[command(about = "Coursebook CLI - Administrative tools for Coursebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a student account
    CreateStudent {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake students, courses and enrollments
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "20")]
        students: usize,

        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "8")]
        courses: usize,

        /// Maximum number of courses each student is enrolled in
        #[arg(short = 'n', long, default_value = "3")]
        enrollments: usize,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_config = DatabaseConfig::from_env();
    let database_url = database_config
        .url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = init_db_pool(database_url, database_config.max_connections)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateStudent {
            username,
            email,
            password,
        } => {
            run_migrations(&pool).await?;
            handle_create_student(PgStore::new(pool), username, email, password).await
        }
        Commands::Seed {
            students,
            courses,
            enrollments,
        } => {
            run_migrations(&pool).await?;
            let config = SeedConfig {
                students,
                courses,
                enrollments_per_student: enrollments,
            };
            let store = PgStore::new(pool);
            seeder::seed_all(&store, &store, config, PasswordConfig::from_env().bcrypt_cost)
                .await?;
            println!("   Seeded students log in with password '{}'", seeder::SEED_PASSWORD);
            Ok(())
        }
        Commands::Migrate => {
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_student(
    store: PgStore,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => Some(email),
        None => {
            let email: String = Input::new()
                .with_prompt("Email address (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(email).filter(|e| !e.trim().is_empty())
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let student = seeder::create_student(
        &store,
        &username,
        email,
        &password,
        PasswordConfig::from_env().bcrypt_cost,
    )
    .await?;

    println!("\n✅ Student created successfully!");
    println!("   Id: {}", student.id);
    println!("   Username: {}", student.username);
    if let Some(email) = &student.email {
        println!("   Email: {}", email);
    }

    Ok(())
}
