use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use schoolhub_cli::admin::{NewPrivilegedUser, create_privileged_user};
use schoolhub_cli::seeder::{self, SeedConfig, StaffCounts};
use schoolhub_config::DatabaseConfig;
use schoolhub_db::{PgPool, init_db_pool, run_migrations};
use schoolhub_models::{Gender, UserRole};

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrivilegedRole {
    Headmaster,
    Manager,
}

impl From<PrivilegedRole> for UserRole {
    fn from(role: PrivilegedRole) -> Self {
        match role {
            PrivilegedRole::Headmaster => UserRole::Headmaster,
            PrivilegedRole::Manager => UserRole::Manager,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a headmaster (or manager) account
    CreateHeadmaster {
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Phone number, e.g. +254712345678
        #[arg(long)]
        phone: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        #[arg(long, value_enum, default_value = "headmaster")]
        role: PrivilegedRole,
    },
    /// Seed the database with fake staff, parents and students
    Seed {
        #[arg(long, default_value = "12")]
        teachers: usize,

        #[arg(long, default_value = "2")]
        librarians: usize,

        #[arg(long, default_value = "2")]
        bursars: usize,

        #[arg(long, default_value = "40")]
        parents: usize,

        #[arg(short = 's', long, default_value = "200")]
        students: usize,
    },
    /// Delete seeded users (keeps headmasters and managers)
    ClearSeed,
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    Ok(pool)
}

fn prompt_text(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn prompt_gender() -> anyhow::Result<Gender> {
    let options = [Gender::Female, Gender::Male, Gender::Other];
    let labels = ["female", "male", "other"];
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(options[selection])
}

async fn handle_create_headmaster(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    role: PrivilegedRole,
) -> anyhow::Result<()> {
    let first_name = prompt_text(first_name, "First name")?;
    let last_name = prompt_text(last_name, "Last name")?;
    let email = prompt_text(email, "Email address")?;
    let phone = prompt_text(phone, "Phone number")?;
    let gender = prompt_gender()?;

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let new_user = NewPrivilegedUser {
        first_name,
        last_name,
        email,
        phone,
        gender,
        role: role.into(),
        password,
    };

    let user_id = create_privileged_user(pool, &new_user).await?;

    println!("\n✅ {} account created", new_user.role);
    println!("   ID: {}", user_id);
    println!("   Email: {}", new_user.email);
    println!("   Name: {} {}", new_user.first_name, new_user.last_name);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await?;

    match cli.command {
        Commands::CreateHeadmaster {
            first_name,
            last_name,
            email,
            phone,
            password,
            role,
        } => {
            handle_create_headmaster(&pool, first_name, last_name, email, phone, password, role)
                .await?
        }
        Commands::Seed {
            teachers,
            librarians,
            bursars,
            parents,
            students,
        } => {
            let config = SeedConfig::default()
                .with_staff(StaffCounts {
                    teachers,
                    librarians,
                    bursars,
                })
                .with_parents(parents)
                .with_students(students);
            seeder::seed_all(&pool, config).await?;
        }
        Commands::ClearSeed => {
            seeder::clear_all(&pool).await?;
        }
    }

    Ok(())
}
