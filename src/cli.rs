//! Command-line screens over the state containers

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use storefront_client::api::{CatalogItem, DirectoryEntry, Identity, NewDirectoryEntry};
use storefront_client::store::products::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use storefront_client::AppState;

/// Avatar given to users created from the directory screen
const DEFAULT_NEW_USER_AVATAR: &str = "https://picsum.photos/800";

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Browse the storefront catalog and manage its users")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    Products {
        #[arg(long, default_value_t = DEFAULT_OFFSET)]
        offset: u32,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Sign in and show the profile
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in to it
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Manage users (requires signing in)
    Users {
        #[command(flatten)]
        session: SessionArgs,
        #[command(subcommand)]
        command: UserCommands,
    },
}

/// Credentials used to sign in before user management
#[derive(clap::Args)]
struct SessionArgs {
    #[arg(long, env = "STOREFRONT_EMAIL", global = true)]
    email: Option<String>,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all users
    List,
    /// Create a user and show the refreshed list
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "user-email")]
        user_email: String,
        #[arg(long = "user-password")]
        user_password: String,
        #[arg(long, default_value = DEFAULT_NEW_USER_AVATAR)]
        avatar: String,
    },
    /// Delete a user by id
    Delete { id: i64 },
}

pub async fn run(cli: Cli, state: &AppState) -> Result<()> {
    match cli.command {
        Commands::Products { offset, limit } => {
            state.products.fetch_products(offset, limit).await?;
            print_products(&state.products.snapshot().data);
        }
        Commands::Login { email, password } => {
            let identity = state.auth.login(&email, &password).await?;
            print_identity(&identity);
        }
        Commands::Signup { email, password, name } => {
            let identity = state.auth.signup(&email, &password, &name).await?;
            print_identity(&identity);
        }
        Commands::Users { session, command } => {
            sign_in(state, session).await?;
            run_users(state, command).await?;
        }
    }
    Ok(())
}

/// User screens are only reachable with a signed-in identity
async fn sign_in(state: &AppState, session: SessionArgs) -> Result<()> {
    let (Some(email), Some(password)) = (session.email, session.password) else {
        bail!("user management requires signing in: pass --email and --password");
    };
    state.auth.login(&email, &password).await?;
    Ok(())
}

async fn run_users(state: &AppState, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List => {
            state.users.fetch_users().await?;
        }
        UserCommands::Create {
            name,
            user_email,
            user_password,
            avatar,
        } => {
            if [&name, &user_email, &user_password]
                .iter()
                .any(|field| field.trim().is_empty())
            {
                bail!("Please fill all fields");
            }
            let user = NewDirectoryEntry {
                email: user_email,
                password: user_password,
                name,
                avatar,
            };
            state.users.create_user(&user).await?;
        }
        UserCommands::Delete { id } => {
            state.users.fetch_users().await?;
            state.users.delete_user(id).await?;
        }
    }

    print_users(&state.users.snapshot().data);
    Ok(())
}

fn print_identity(identity: &Identity) {
    println!("Signed in as {} <{}>", identity.name, identity.email);
    println!("  id:     {}", identity.id);
    println!("  role:   {}", identity.role);
    println!("  avatar: {}", identity.avatar);
}

fn print_products(items: &[CatalogItem]) {
    if items.is_empty() {
        println!("No products.");
        return;
    }
    for item in items {
        println!(
            "#{:<5} {:<40} ${:>9.2}  [{}]",
            item.id, item.title, item.price, item.category.name
        );
    }
}

fn print_users(users: &[DirectoryEntry]) {
    println!("{}", directory_summary(users));
    for user in users {
        println!("#{:<5} {:<24} {:<32} {}", user.id, user.name, user.email, user.role);
    }
}

/// Header line of the user screen: total, admin and customer counts
fn directory_summary(users: &[DirectoryEntry]) -> String {
    let count_role = |role: &str| users.iter().filter(|user| user.role == role).count();
    format!(
        "Total Users: {}  Admins: {}  Customers: {}",
        users.len(),
        count_role("admin"),
        count_role("customer")
    )
}
