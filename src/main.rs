use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use pwtoken::{Hasher, KdfParams};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Args)]
struct ScryptArgs {
    /// scrypt cost factor N, a power of two (default: 16384)
    #[arg(long = "scrypt-n", global = true, env = "PWTOKEN_SCRYPT_N")]
    n: Option<u64>,

    /// scrypt block size r (default: 8)
    #[arg(long = "scrypt-r", global = true, env = "PWTOKEN_SCRYPT_R")]
    r: Option<u32>,

    /// scrypt parallelism p (default: 1)
    #[arg(long = "scrypt-p", global = true, env = "PWTOKEN_SCRYPT_P")]
    p: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-len", global = true, env = "PWTOKEN_KEY_LEN")]
    key_len: Option<usize>,

    /// Salt length in bytes (default: 18)
    #[arg(long = "salt-len", global = true, env = "PWTOKEN_SALT_LEN")]
    salt_len: Option<usize>,
}

impl ScryptArgs {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        let default = KdfParams::default();

        KdfParams::new(
            self.n.unwrap_or(default.n()),
            self.r.unwrap_or(default.r()),
            self.p.unwrap_or(default.p()),
            self.key_len.unwrap_or(default.key_len()),
            self.salt_len.unwrap_or(default.salt_len()),
        )
        .context("invalid scrypt parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "pwtoken")]
#[command(
    version,
    about = "Hash passwords into scrypt tokens and verify passwords against them."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", env = "PWTOKEN_LOG")]
    log_level: String,

    #[command(flatten)]
    scrypt: ScryptArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a new password and prints the token
    Hash,

    /// Checks a password against a token
    #[command(arg_required_else_help = true)]
    Verify { token: String },

    /// Shows the active parameter set
    Info {
        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct InfoReport<'a> {
    params: &'a KdfParams,
    version_header: &'a str,
    memory_bytes: Option<u64>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(&args.log_level);

    let kdf = args.scrypt.to_kdf_params()?;
    let hasher = Hasher::new(kdf).context("scrypt parameters rejected")?;
    tracing::debug!(header = hasher.version_header(), "using parameter set");

    match args.command {
        Commands::Hash => {
            let password = auth::read_new_password_with_confirmation()?;
            let token = hasher.hash(password.as_bytes())?;
            println!("{token}");
        }
        Commands::Verify { token } => {
            let password = auth::read_password()?;
            match hasher.verify(password.as_bytes(), &token) {
                Ok(true) => println!("ok"),
                Ok(false) => bail!("authentication failed"),
                Err(e) if e.is_authentication_failure() => {
                    tracing::debug!(error = %e, "token or password rejected");
                    bail!("authentication failed");
                }
                Err(e) => return Err(e).context("verification could not run"),
            }
        }
        Commands::Info { json } => {
            let params = hasher.params();
            let info = InfoReport {
                params,
                version_header: hasher.version_header(),
                memory_bytes: params.memory_cost(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("scrypt N={} r={} p={}", params.n(), params.r(), params.p());
                println!("key length:     {} bytes", params.key_len());
                println!("salt length:    {} bytes", params.salt_len());
                if let Some(mem) = info.memory_bytes {
                    println!("memory:         {} KiB per derivation", mem / 1024);
                }
                println!("version header: {}", info.version_header);
            }
        }
    }

    Ok(())
}
