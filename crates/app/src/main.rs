//! Bazaar Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use bazaar_app::{
    database,
    domain::users::{PgUserDirectory, models::SellerProfile},
};

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar admin CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance.
    Db(DbCommand),

    /// Local-development user management.
    User(UserCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create any missing tables and indexes.
    Init(InitDbArgs),
}

#[derive(Debug, Args)]
struct InitDbArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Seed a user row for local development.
    Seed(SeedUserArgs),
}

#[derive(Debug, Args)]
struct SeedUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Init(args),
        }) => init_db(args).await,
        Commands::User(UserCommand {
            command: UserSubcommand::Seed(args),
        }) => seed_user(args).await,
    }
}

async fn init_db(args: InitDbArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::ensure_schema(&pool)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema is up to date");

    Ok(())
}

async fn seed_user(args: SeedUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let uuid = args.user_uuid.unwrap_or_else(Uuid::now_v7);

    let profile = SellerProfile {
        uuid: uuid.into(),
        name: args.name,
        email: args.email,
    };

    PgUserDirectory::new(pool)
        .seed_user(&profile)
        .await
        .map_err(|error| format!("failed to seed user: {error}"))?;

    println!("user_uuid: {}", profile.uuid);
    println!("name: {}", profile.name);
    println!("email: {}", profile.email);

    Ok(())
}
