use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use skillswap_cli::accounts::{self, non_empty, parse_list};
use skillswap_cli::seeder::{self, SeedConfig};
use skillswap_db::{PgPool, init_db_pool, run_migrations};
use skillswap_models::{SignupDto, SocialLinks};

#[derive(Parser)]
#[command(name = "skillswap-cli")]
#[command(about = "SkillSwap CLI - Administrative tools for SkillSwap", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Instagram handle
        #[arg(long)]
        instagram: Option<String>,

        /// Telegram handle
        #[arg(long)]
        telegram: Option<String>,

        /// Twitter handle
        #[arg(long)]
        twitter: Option<String>,

        /// Comma-separated skills the user can teach
        #[arg(long)]
        offers: Option<String>,

        /// Comma-separated skills the user wants to learn
        #[arg(long)]
        wants: Option<String>,

        /// Short bio
        #[arg(long)]
        bio: Option<String>,
    },
    /// Seed the database with fake users and swap requests
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,

        /// Number of swap requests each user sends
        #[arg(short = 'r', long, default_value = "2")]
        requests: usize,
    },
    /// Seed only users
    SeedUsers {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "50")]
        users: usize,
    },
    /// Clear all seeded users and their swap requests
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateUser {
            name,
            email,
            password,
            phone,
            instagram,
            telegram,
            twitter,
            offers,
            wants,
            bio,
        } => {
            let answers = CreateUserArgs {
                name,
                email,
                password,
                phone,
                social_links: SocialLinks {
                    instagram,
                    telegram,
                    twitter,
                },
                offers,
                wants,
                bio,
            };
            handle_create_user(&pool, answers).await
        }
        Commands::Seed { users, requests } => handle_seed(&pool, users, requests).await,
        Commands::SeedUsers { users } => handle_seed_users(&pool, users).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {:#}", e);
            std::process::exit(1);
        }
    }
}

struct CreateUserArgs {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
    social_links: SocialLinks,
    offers: Option<String>,
    wants: Option<String>,
    bio: Option<String>,
}

/// Fills in whatever the flags left out.
fn prompt_signup(args: CreateUserArgs) -> Result<SignupDto, dialoguer::Error> {
    let name = match args.name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match args.email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let mut phone = args.phone;
    let mut social_links = args.social_links;
    if phone.is_none() && !social_links.has_any() {
        println!("A phone number or at least one social handle is required.");
        phone = non_empty(
            Input::new()
                .with_prompt("Phone (optional)")
                .allow_empty(true)
                .interact_text()?,
        );
        if phone.is_none() {
            social_links.instagram = non_empty(
                Input::new()
                    .with_prompt("Instagram handle (optional)")
                    .allow_empty(true)
                    .interact_text()?,
            );
        }
    }

    let offers = match args.offers {
        Some(offers) => offers,
        None => Input::new()
            .with_prompt("Skills offered (comma-separated)")
            .allow_empty(true)
            .interact_text()?,
    };

    let wants = match args.wants {
        Some(wants) => wants,
        None => Input::new()
            .with_prompt("Skills wanted (comma-separated)")
            .allow_empty(true)
            .interact_text()?,
    };

    Ok(SignupDto {
        name,
        email,
        password,
        phone,
        social_links: Some(social_links),
        skills_offered: parse_list(&offers),
        skills_wanted: parse_list(&wants),
        bio: args.bio.and_then(non_empty),
    })
}

async fn handle_create_user(pool: &PgPool, args: CreateUserArgs) {
    let dto = match prompt_signup(args) {
        Ok(dto) => dto,
        Err(e) => {
            eprintln!("\n❌ Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let email = dto.email.trim().to_lowercase();
    let name = dto.name.trim().to_string();

    match accounts::create_user(pool, dto).await {
        Ok(user_id) => {
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user_id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, users: usize, requests: usize) {
    let config = SeedConfig::new(users).with_requests_per_user(requests);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_seed_users(pool: &PgPool, users: usize) {
    match seeder::seed_users_only(pool, users).await {
        Ok(ids) => {
            println!("✅ Created {} users", ids.len());
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding users: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
