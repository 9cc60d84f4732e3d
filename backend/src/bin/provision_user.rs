//! Create an active user account so sign-in has something to resolve.
//!
//! The password is read from standard input so it never appears in shell
//! history or the process list:
//!
//! ```text
//! printf '%s' "$PASSWORD" | provision-user --username ops@example.com --application console
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Read};

use clap::Parser;
use color_eyre::eyre::{Context, Report, Result, eyre};
use delivery_service::domain::ports::{CredentialHasher, UserRepository};
use delivery_service::domain::{Application, NewUserAccount, Username};
use delivery_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use delivery_service::outbound::security::Sha256CredentialHasher;
use tokio::runtime::Builder;
use zeroize::Zeroizing;

const DATABASE_URL_ENV: &str = "DELIVERY_DATABASE_URL";

/// `provision-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "provision-user",
    about = "Insert an active user account with a hashed password read from stdin",
    version
)]
struct CliArgs {
    /// Sign-in name; must be an email address.
    #[arg(long, value_name = "email")]
    username: String,
    /// Client application the account belongs to.
    #[arg(long, value_name = "name")]
    application: String,
    /// Operator recorded as the creator.
    #[arg(long = "created-by", value_name = "name", default_value = "provision-user")]
    created_by: String,
    /// Database connection URL. Falls back to `DELIVERY_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let password = read_password(io::stdin())?;
    let account = build_account(&args, &password, &Sha256CredentialHasher::default())?;
    let database_url = resolve_database_url(args.database_url)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async move {
        let pool = DbPool::new(PoolConfig::new(&database_url))
            .await
            .wrap_err("create database pool")?;
        let id = DieselUserRepository::new(pool)
            .insert(&account)
            .await
            .wrap_err_with(|| format!("insert user {}", account.username))?;
        println!("provisioned user {} with id {id}", account.username);
        Ok::<(), Report>(())
    })
}

fn read_password(mut input: impl Read) -> Result<Zeroizing<String>> {
    let mut raw = Zeroizing::new(String::new());
    input
        .read_to_string(&mut raw)
        .wrap_err("read password from stdin")?;
    let password = Zeroizing::new(raw.trim_end_matches(['\r', '\n']).to_owned());
    if password.is_empty() {
        return Err(eyre!("password must not be empty"));
    }
    Ok(password)
}

fn build_account(
    args: &CliArgs,
    password: &str,
    hasher: &dyn CredentialHasher,
) -> Result<NewUserAccount> {
    let username = Username::new(&args.username).wrap_err("invalid --username")?;
    let application = Application::new(&args.application).wrap_err("invalid --application")?;
    let password_hash = hasher.hash(password).wrap_err("hash password")?;
    Ok(NewUserAccount {
        username,
        application,
        password_hash,
        created_by: args.created_by.clone(),
    })
}

fn resolve_database_url(flag: Option<String>) -> Result<String> {
    flag.or_else(|| env::var(DATABASE_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("pass --database-url or set {DATABASE_URL_ENV}"))
}
