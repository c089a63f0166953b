use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use edubook::cli::create_user;
use edubook::cli::seeder::{SEED_PASSWORD, SeedConfig, seed};
use edubook_config::DatabaseConfig;
use edubook_db::{PgStore, init_db_pool, run_migrations};
use edubook_models::UserRole;

#[derive(Parser)]
#[command(name = "edubook-cli")]
#[command(about = "EduBook CLI - Administrative tools for the EduBook API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account with its profile
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name shown on courses and enrollments
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Either student or instructor
        #[arg(short = 'r', long)]
        role: Option<UserRole>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake instructors, students, courses and enrollments
    Seed {
        #[arg(long, default_value = "3")]
        instructors: usize,

        #[arg(long, default_value = "10")]
        students: usize,

        /// Courses created by each instructor
        #[arg(long, default_value = "2")]
        courses: usize,

        /// Courses each student enrolls in
        #[arg(long, default_value = "2")]
        enrollments: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await.context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
        Commands::CreateUser {
            email,
            full_name,
            role,
            password,
        } => {
            let store = PgStore::new(pool);
            handle_create_user(&store, email, full_name, role, password).await?;
        }
        Commands::Seed {
            instructors,
            students,
            courses,
            enrollments,
        } => {
            let store = PgStore::new(pool);
            let summary = seed(
                &store,
                SeedConfig {
                    instructors,
                    students,
                    courses_per_instructor: courses,
                    enrollments_per_student: enrollments,
                },
            )
            .await
            .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e.error))?;

            println!("\n🌱 Seeding complete");
            println!("   Instructors: {}", summary.instructors);
            println!("   Students: {}", summary.students);
            println!("   Courses: {}", summary.courses);
            println!("   Enrollments: {}", summary.enrollments);
            println!("   Password for every account: {}", SEED_PASSWORD);
        }
    }

    Ok(())
}

async fn handle_create_user(
    store: &PgStore,
    email: Option<String>,
    full_name: Option<String>,
    role: Option<UserRole>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let full_name = match full_name {
        Some(full_name) => full_name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let roles = [UserRole::Student, UserRole::Instructor];
            let selected = Select::new()
                .with_prompt("Role")
                .items(&roles)
                .default(0)
                .interact()?;
            roles[selected]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = create_user(store, &email, &password, &full_name, role)
        .await
        .map_err(|e| anyhow::anyhow!("Error creating user: {}", e.error))?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.full_name);
    println!("   Role: {}", user.role);

    Ok(())
}
