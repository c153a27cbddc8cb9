//! Mailboxctl - command-line interface for the mailbox.org admin API

mod render;

use clap::{Parser, Subcommand};
use colored::Colorize;
use mailboxctl_sdk::{
    ClientConfig, ClientError, DomainAddRequest, MailAddRequest, MailBackupImportRequest,
    MailRegisterRequest, MailboxClient, SpamProtectSettings, DEFAULT_API_URL,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mailboxctl")]
#[command(about = "mailbox.org admin API client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Admin API endpoint
    #[arg(long, env = "MAILBOX_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Auth file location (default: ~/.mailboxctl/auth.yml, or
    /// MAILBOXCTL_AUTH_FILE)
    #[arg(long)]
    auth_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and cache the session locally
    Auth {
        /// Login identifier (mail address)
        user: String,
        /// Password
        pass: String,
    },

    /// Log out and delete the cached session
    Deauth,

    /// Create a sub-account
    AccountAdd {
        account: String,
        password: String,
        plan: String,
        #[arg(default_value = "")]
        memo: String,
    },

    /// Delete the authenticated account
    AccountDel,

    /// Show the authenticated account
    AccountGet,

    /// List preferences of the authenticated account
    AccountList,

    /// Set one preference of the authenticated account
    AccountSet { preference: String, value: String },

    /// List context ids and their domains
    ContextList,

    /// Add a domain to the authenticated account
    DomainAdd {
        domain: String,
        password: String,
        /// Attach the domain to an existing context id
        #[arg(long)]
        context_id: Option<String>,
        /// Ask the API to create a fresh context id
        #[arg(long)]
        create_new_context_id: bool,
        #[arg(long)]
        memo: Option<String>,
    },

    /// Set capabilities of a domain
    DomainCapabilitiesSet {
        domain: String,
        #[arg(required = true)]
        capabilities: Vec<String>,
    },

    /// Delete a domain
    DomainDel { domain: String },

    /// Show a domain
    DomainGet { domain: String },

    /// List domains of the authenticated account
    DomainList {
        /// Substring filter on the domain name
        #[arg(long)]
        filter: Option<String>,
    },

    /// Set one preference of a domain
    DomainSet {
        domain: String,
        preference: String,
        value: String,
    },

    /// Ping the API (unauthenticated echo)
    HelloWorld,

    /// Ping the API (authenticated echo)
    HelloInnerworld,

    /// Create a mailbox
    MailAdd {
        mail: String,
        password: String,
        plan: String,
        first_name: String,
        last_name: String,
        /// Keep a copy in the inbox when forwarding
        #[arg(long)]
        inboxsave: bool,
        /// Forward address, repeatable
        #[arg(long = "forward")]
        forwards: Vec<String>,
    },

    /// Restore mails from a backup
    MailBackupImport {
        mail: String,
        id: String,
        time: String,
        filter: String,
    },

    /// List available backups of a mailbox
    MailBackupList { mail: String },

    /// Add an address to a mailbox blacklist
    MailBlacklistAdd { mail: String, address: String },

    /// Remove an address from a mailbox blacklist
    MailBlacklistDel { mail: String, address: String },

    /// List blacklist entries of a mailbox
    MailBlacklistList { mail: String },

    /// Delete a mailbox
    MailDel { mail: String },

    /// Show a mailbox
    MailGet { mail: String },

    /// List mailboxes of a domain
    MailList { domain: String },

    /// Register a mailbox with an invitation token
    MailRegister {
        token: String,
        mail: String,
        password: String,
        first_name: String,
        last_name: String,
        lang: String,
        #[arg(long)]
        alternate_mail: Option<String>,
    },

    /// Set one preference of a mailbox
    MailSet {
        mail: String,
        preference: String,
        value: String,
    },

    /// Show spam protection settings of a mailbox
    MailSpamprotectGet { mail: String },

    /// Set spam protection settings of a mailbox
    MailSpamprotectSet {
        mail: String,
        #[arg(long)]
        greylist: bool,
        #[arg(long)]
        smtp_plausibility: bool,
        #[arg(long)]
        rbl: bool,
        #[arg(long)]
        bypass_banned_checks: bool,
        /// Spam score above which mails are tagged
        #[arg(long, default_value = "5.0")]
        tag2level: f64,
        /// Behavior above the kill threshold (e.g. reject)
        #[arg(long, default_value = "reject")]
        killevel: String,
        #[arg(long, default_value = "")]
        route_to: String,
    },

    /// Search accounts, domains and mail addresses
    Search { query: String },

    /// Check whether the current ACLs allow administrating the account
    TestAccountallowed,

    /// Check whether the current ACLs allow administrating a domain
    TestDomainallowed { domain: String },

    /// Validate a value against a server-side type
    UtilsValidator {
        value: String,
        #[arg(value_name = "TYPE")]
        kind: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("mailboxctl=warn"))
        .expect("failed to create env filter");
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().without_time())
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig {
        api_url: cli.api_url.clone(),
        ..ClientConfig::default()
    };
    if let Some(path) = cli.auth_file.clone() {
        config.auth_file = path;
    }

    if let Err(error) = run(cli, config).await {
        report_error(&error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), ClientError> {
    let client = MailboxClient::new(config)?;

    match cli.command {
        Commands::Auth { user, pass } => {
            client.authenticate(&user, &pass).await?;
            println!("\n{}", "Authentication successful.".green().bold());
        }

        Commands::Deauth => {
            let logged_out = client.deauthenticate().await?;
            if logged_out {
                println!("{}", "Successfully logged out.".green());
            } else {
                println!("{}", "Logout unsuccessful.".yellow());
            }
            println!("Existing auth info deleted.");
        }

        Commands::AccountAdd {
            account,
            password,
            plan,
            memo,
        } => {
            let payload = client.account_add(&account, &password, &plan, &memo).await?;
            render::object(&payload);
        }

        Commands::AccountDel => {
            let payload = client.account_del().await?;
            render::outcome(&payload, "Successfully deleted account.", "Deletion failed.");
        }

        Commands::AccountGet => {
            let account = client.current_account()?;
            let payload = client.account_get().await?;
            println!("\nListing account for {}:", account.bold());
            render::object(&payload);
        }

        Commands::AccountList => {
            let account = client.current_account()?;
            let payload = client.account_list().await?;
            println!("\nAccount preferences for {}", account.bold());
            render::object(&payload);
        }

        Commands::AccountSet { preference, value } => {
            let account = client.current_account()?;
            let payload = client.account_set(&preference, &value).await?;
            println!("\nAccount preference set for {}", account.bold());
            render::object(&payload);
        }

        Commands::ContextList => {
            let payload = client.context_list().await?;
            render::context_list(&payload);
        }

        Commands::DomainAdd {
            domain,
            password,
            context_id,
            create_new_context_id,
            memo,
        } => {
            let payload = client
                .domain_add(DomainAddRequest {
                    domain,
                    password,
                    context_id,
                    create_new_context_id,
                    memo,
                })
                .await?;
            render::object(&payload);
        }

        Commands::DomainCapabilitiesSet {
            domain,
            capabilities,
        } => {
            let payload = client.domain_capabilities_set(&domain, &capabilities).await?;
            render::outcome(
                &payload,
                "Domain capabilities were set.",
                "Domain capabilities weren't set.",
            );
        }

        Commands::DomainDel { domain } => {
            let payload = client.domain_del(&domain).await?;
            render::outcome(&payload, "Domain was deleted.", "Domain deletion failed.");
        }

        Commands::DomainGet { domain } => {
            let payload = client.domain_get(&domain).await?;
            println!("\nListing domain:");
            render::object(&payload);
        }

        Commands::DomainList { filter } => {
            let payload = client.domain_list(filter.as_deref()).await?;
            println!("\nListing domains:");
            render::domain_table(&payload);
        }

        Commands::DomainSet {
            domain,
            preference,
            value,
        } => {
            let payload = client.domain_set(&domain, &preference, &value).await?;
            println!("\nListing domain for {}:", domain.bold());
            render::object(&payload);
        }

        Commands::HelloWorld => {
            let payload = client.hello_world().await?;
            println!("{}", render::display_value(&payload));
        }

        Commands::HelloInnerworld => {
            let payload = client.hello_innerworld().await?;
            println!("{}", render::display_value(&payload));
        }

        Commands::MailAdd {
            mail,
            password,
            plan,
            first_name,
            last_name,
            inboxsave,
            forwards,
        } => {
            let payload = client
                .mail_add(MailAddRequest {
                    mail: mail.clone(),
                    password,
                    plan,
                    first_name,
                    last_name,
                    inboxsave,
                    forwards,
                })
                .await?;
            println!("\nCreated mail for {}:", mail.bold());
            render::object(&payload);
        }

        Commands::MailBackupImport {
            mail,
            id,
            time,
            filter,
        } => {
            let payload = client
                .mail_backup_import(MailBackupImportRequest {
                    mail,
                    id,
                    time,
                    filter,
                })
                .await?;
            println!("\nImport executed.");
            println!("\nListing all existing e-mail backups:");
            render::object(&payload);
        }

        Commands::MailBackupList { mail } => {
            let payload = client.mail_backup_list(&mail).await?;
            println!("\nListing all existing e-mail backups:");
            render::object(&payload);
        }

        Commands::MailBlacklistAdd { mail, address } => {
            let payload = client.mail_blacklist_add(&mail, &address).await?;
            println!("\nAdded {} to the blacklist of {}.", address.bold(), mail.bold());
            println!("\nListing blacklist entries:");
            render::object(&payload);
        }

        Commands::MailBlacklistDel { mail, address } => {
            let payload = client.mail_blacklist_del(&mail, &address).await?;
            println!("\nRemoved {} from the blacklist of {}.", address.bold(), mail.bold());
            println!("\nListing blacklist entries:");
            render::object(&payload);
        }

        Commands::MailBlacklistList { mail } => {
            let payload = client.mail_blacklist_list(&mail).await?;
            println!("\nListing blacklisted mails:");
            render::lines(&payload);
        }

        Commands::MailDel { mail } => {
            let payload = client.mail_del(&mail).await?;
            println!("\nMail deleted? {}", render::display_value(&payload));
        }

        Commands::MailGet { mail } => {
            let payload = client.mail_get(&mail).await?;
            println!("\nMail info for {}", mail.bold());
            render::object(&payload);
        }

        Commands::MailList { domain } => {
            let payload = client.mail_list(&domain).await?;
            println!("\nListing mails:");
            render::mail_table(&payload);
        }

        Commands::MailRegister {
            token,
            mail,
            password,
            first_name,
            last_name,
            lang,
            alternate_mail,
        } => {
            let payload = client
                .mail_register(MailRegisterRequest {
                    token,
                    mail,
                    password,
                    alternate_mail,
                    first_name,
                    last_name,
                    lang,
                })
                .await?;
            render::outcome(&payload, "Mail created.", "Mail not created (reason unknown).");
        }

        Commands::MailSet {
            mail,
            preference,
            value,
        } => {
            let payload = client.mail_set(&mail, &preference, &value).await?;
            println!("\nMail preference set for {}", mail.bold());
            render::object(&payload);
        }

        Commands::MailSpamprotectGet { mail } => {
            let payload = client.mail_spamprotect_get(&mail).await?;
            println!("\nMail spam protection info for {}", mail.bold());
            render::object(&payload);
        }

        Commands::MailSpamprotectSet {
            mail,
            greylist,
            smtp_plausibility,
            rbl,
            bypass_banned_checks,
            tag2level,
            killevel,
            route_to,
        } => {
            let payload = client
                .mail_spamprotect_set(
                    &mail,
                    SpamProtectSettings {
                        greylist,
                        smtp_plausibility,
                        rbl,
                        bypass_banned_checks,
                        tag2level,
                        killevel,
                        route_to,
                    },
                )
                .await?;
            println!("\nMail spam protection set for {}", mail.bold());
            render::object(&payload);
        }

        Commands::Search { query } => {
            let payload = client.search(&query).await?;
            println!(
                "\nSearching for term '{}' within accounts, domains and emails:",
                query.bold()
            );
            render::search_results(&payload);
        }

        Commands::TestAccountallowed => {
            let payload = client.test_accountallowed().await?;
            println!(
                "Account can be administrated using the current ACLs? {}",
                render::display_value(&payload)
            );
        }

        Commands::TestDomainallowed { domain } => {
            let payload = client.test_domainallowed(&domain).await?;
            println!(
                "Domain can be administrated using the current ACLs? {}",
                render::display_value(&payload)
            );
        }

        Commands::UtilsValidator { value, kind } => {
            let payload = client.utils_validator(&value, &kind).await?;
            println!("Tested value is valid? {}", render::display_value(&payload));
        }
    }

    Ok(())
}

fn report_error(error: &ClientError) {
    match error {
        ClientError::Rpc {
            code,
            message,
            data,
        } => {
            eprintln!("\n{}", "The API responded with the following error".red().bold());
            eprintln!("-----------------------------------------------------------");
            eprintln!("Code: {code}");
            eprintln!("Message: {message}");
            eprintln!("Data:\n{}", render::display_value(data));
        }
        other => eprintln!("{} {other}", "Error:".red().bold()),
    }
}
