use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};

use tanit::{RootConfig, RootError, Wallet};
use tanit_cred::{create_demo_cin_claims, create_demo_pid_claims, CredentialClaims};
use tanit_oid4vp::{demo_bank_kyc_request_uri, demo_cin_check_request_uri};
use tanit_proof::decode::decode_sd_jwt;

/// Tanit ID: SD-JWT-VC holder wallet with OpenID4VP presentation.
#[derive(Parser, Debug)]
#[command(name = "tanit", version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Pid,
    Cin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Verifier {
    Bank,
    Gov,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the default configuration file
    Init,

    /// Issue the demo credential and print the compact SD-JWT
    Issue {
        #[arg(long, value_enum, default_value = "pid")]
        kind: Kind,
    },

    /// Print a demo openid4vp:// authorization request
    Request {
        #[arg(long, value_enum, default_value = "bank")]
        kind: Verifier,
    },

    /// Decode an SD-JWT without verifying it
    Decode {
        /// Compact SD-JWT or presentation
        sd_jwt: String,
    },

    /// Issue, receive a demo request, approve, and verify the presentation
    Journey {
        #[arg(long, value_enum, default_value = "pid")]
        kind: Kind,

        /// Claim to withhold from the presentation (repeatable)
        #[arg(long)]
        deselect: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("tanit=debug,tanit_proof=debug,tanit_oid4vp=debug,tanit_cred=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tanit=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_path(path: Option<&PathBuf>) -> PathBuf {
    path.cloned().unwrap_or_else(RootConfig::default_config_path)
}

fn load_config(path: Option<&PathBuf>) -> Result<RootConfig, RootError> {
    RootConfig::load(&config_path(path))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RootError> {
    match cli.command {
        Commands::Init => cmd_init(cli.config.as_ref()),
        Commands::Issue { kind } => cmd_issue(cli.config.as_ref(), kind),
        Commands::Request { kind } => cmd_request(kind),
        Commands::Decode { sd_jwt } => cmd_decode(&sd_jwt),
        Commands::Journey { kind, deselect } => cmd_journey(cli.config.as_ref(), kind, &deselect),
    }
}

fn demo_claims(kind: Kind) -> CredentialClaims {
    match kind {
        Kind::Pid => create_demo_pid_claims().into(),
        Kind::Cin => create_demo_cin_claims().into(),
    }
}

fn cmd_init(path: Option<&PathBuf>) -> Result<(), RootError> {
    let config = load_config(path)?;
    let save_path = config_path(path);
    config.save(&save_path)?;

    println!("Tanit configuration written.");
    println!("  Issuer:   {}", config.issuer.url);
    println!("  Validity: {} days", config.issuer.validity_days);
    println!("  Config:   {}", save_path.display());
    Ok(())
}

fn cmd_issue(path: Option<&PathBuf>, kind: Kind) -> Result<(), RootError> {
    let wallet = Wallet::from_config(&load_config(path)?)?;
    let raw = wallet.engine().issue(&demo_claims(kind))?;
    info!(kind = ?kind, "issued demo credential");
    println!("{}", raw);
    Ok(())
}

fn cmd_request(kind: Verifier) -> Result<(), RootError> {
    let uri = match kind {
        Verifier::Bank => demo_bank_kyc_request_uri()?,
        Verifier::Gov => demo_cin_check_request_uri()?,
    };
    println!("{}", uri);
    Ok(())
}

fn cmd_decode(sd_jwt: &str) -> Result<(), RootError> {
    let decoded = decode_sd_jwt(sd_jwt.trim())?;
    let vct = decoded
        .payload
        .get("vct")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    // Only a full credential rebuilds; a pruned presentation lacks fields.
    let validation = match CredentialClaims::from_vct_claims(vct, &decoded.payload) {
        Ok(claims) => Some(claims.validate()),
        Err(e) => {
            warn!("not validating claims: {}", e);
            None
        }
    };

    let output = serde_json::json!({
        "decoded": decoded,
        "validation": validation,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_journey(
    path: Option<&PathBuf>,
    kind: Kind,
    deselect: &[String],
) -> Result<(), RootError> {
    let mut wallet = Wallet::from_config(&load_config(path)?)?;

    let uri = match kind {
        Kind::Pid => {
            wallet.load_demo_pid_credential()?;
            demo_bank_kyc_request_uri()?
        }
        Kind::Cin => {
            wallet.load_demo_cin_credential()?;
            demo_cin_check_request_uri()?
        }
    };

    wallet.handle_authorization_request(&uri)?;
    let (nonce, audience) = match wallet.session().current_request() {
        Some(request) => (request.nonce.clone(), request.client_id.clone()),
        None => return Err(RootError::NoActiveRequest),
    };
    for field in deselect {
        wallet.update_selected_field(field, false);
    }
    if let Some(consent) = wallet.session().consent() {
        info!(
            verifier = %consent.verifier_name,
            disclosing = ?consent.selected_paths(),
            "holder approved"
        );
    }

    let response = wallet.submit_presentation()?;
    let verified = wallet
        .engine()
        .verify_key_binding(&response.vp_token, &nonce, &audience);

    let output = serde_json::json!({
        "response": response,
        "verification": verified,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
