use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use pei_cli::{admin, seeder};
use pei_core::get_permissions;
use pei_core::permissions::Role;

#[derive(Parser)]
#[command(name = "pei-cli")]
#[command(about = "PEI CLI - Administrative tools for the PEI backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an Administrador account
    CreateAdmin {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake schools and students
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "3")]
        schools: usize,

        /// Number of students per school
        #[arg(long, default_value = "20")]
        students: usize,
    },
    /// Print the capability set resolved for a role
    Permissions {
        /// Role name, e.g. "Profissional". Unknown roles resolve to the Família set.
        role: String,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // The only command that does not need a database.
    if let Commands::Permissions { role } = &cli.command {
        return print_permissions(role);
    }

    let pool = pei_db::init_db_pool(5).await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::Seed { schools, students } => {
            let ids = seeder::seed_schools(&pool, schools).await?;
            let ids = if ids.is_empty() {
                seeder::existing_school_ids(&pool).await?
            } else {
                ids
            };
            seeder::seed_students(&pool, &ids, students).await?;
            println!("\nSeeding complete.");
            Ok(())
        }
        Commands::Migrate => {
            pei_db::run_migrations(&pool).await?;
            println!("Migrations applied.");
            Ok(())
        }
        Commands::Permissions { .. } => Ok(()),
    }
}

fn print_permissions(role: &str) -> anyhow::Result<()> {
    if !Role::parse(role).is_recognized() {
        eprintln!("Unrecognized role {role:?}, showing the Família set");
    }
    let json = serde_json::to_string_pretty(&get_permissions(role))
        .context("Failed to serialize permissions")?;
    println!("{json}");
    Ok(())
}

async fn handle_create_admin(
    pool: &pei_db::PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let id = admin::create_admin(pool, &name, &email, &password).await?;
    println!("\nAdministrador created.");
    println!("   Id: {id}");
    println!("   Email: {email}");
    Ok(())
}
