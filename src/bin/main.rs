use anyhow::Error;
use churchtools::{Config, FinanceIndex, PersonIndex, Session, TokenPolicy};
use std::path::PathBuf;
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args.command);

    let config = Config::new(&args.host, &args.username, &args.password)
        .trust_bundle(&args.ca_bundle)
        .token_policy(args.token_policy);
    let session = Session::login(config).await?;

    log::info!(
        "Logged in to {} (ChurchTools {}) as person {}",
        session.credentials().hostname(),
        session.server_info().version,
        session.person_id()
    );

    match args.command {
        Command::Info => {
            let info = session.server_info();
            log::info!("Version: {}, build: {}", info.version, info.build);
        },
        Command::Persons => {
            let persons = PersonIndex::new(session.persons().await?);
            for person in persons.iter() {
                log::info!(
                    "{}: {} {}",
                    person.id,
                    person.first_name,
                    person.last_name
                );
            }
            log::info!("{} persons", persons.len());
        },
        Command::Relationships { person_id } => {
            for relationship in session.relationships(person_id).await? {
                log::info!(
                    "{} => {}",
                    relationship.relationship_name,
                    relationship.relative.title
                );
            }
        },
        Command::Clients => {
            for client in session.finance_clients().await? {
                log::info!("{}: {}", client.id, client.name);
            }
        },
        Command::Periods => {
            let clients = session.finance_clients().await?;
            let periods = session.finance_periods().await?;
            let index = FinanceIndex::new(clients, periods)?;

            for period in index.periods() {
                let client = index
                    .client_of(period)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                log::info!(
                    "{}: {} to {} ({}){}",
                    period.id,
                    period.start_date,
                    period.end_date,
                    client,
                    if period.is_closed { ", closed" } else { "" }
                );
            }
        },
        Command::Accounts {
            accounting_period_id,
        } => {
            for account in
                session.finance_accounts(accounting_period_id).await?
            {
                log::info!(
                    "{} {} => {}",
                    account.number,
                    account.name,
                    account.balance
                );
            }
        },
    }

    Ok(())
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(long = "host", help = "The ChurchTools server's hostname")]
    host: String,
    #[structopt(short = "u", long = "username", help = "Your username")]
    username: String,
    #[structopt(short = "p", long = "password", help = "Your password")]
    password: String,
    #[structopt(
        long = "ca-bundle",
        default_value = "/etc/ssl/certs/ca-certificates.crt",
        parse(from_os_str),
        help = "The CA certificates to trust"
    )]
    ca_bundle: PathBuf,
    #[structopt(
        long = "token-policy",
        default_value = "always",
        help = "When to request a login token (always, when-no-cookie, never)"
    )]
    token_policy: TokenPolicy,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Show the server's version")]
    Info,
    #[structopt(about = "List every person")]
    Persons,
    #[structopt(about = "List a person's relationships")]
    Relationships { person_id: u64 },
    #[structopt(about = "List the finance clients")]
    Clients,
    #[structopt(about = "List the accounting periods")]
    Periods,
    #[structopt(about = "List the accounts in an accounting period")]
    Accounts { accounting_period_id: u64 },
}
