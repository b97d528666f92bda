//! Command-line interface for `tokenaes`.

#![forbid(unsafe_code)]

mod logger;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tokenaes_core::{decrypt_block, encrypt_block, expand_key, KeySize, RoundKeys};
use tokenaes_modes::{
    aes_cbc_decrypt_padded, aes_cbc_encrypt_padded, aes_decrypt_text, aes_encrypt_text,
    cbc_decrypt, cbc_encrypt, cfb_decrypt, cfb_encrypt, ctr_apply, ecb_decrypt, ecb_encrypt,
    pkcs7_pad, pkcs7_unpad, Counter, DEFAULT_NONCE_LEN,
};

/// AES engine for obfuscated page tokens.
#[derive(Parser)]
#[command(
    name = "tokenaes",
    version,
    author,
    about = "AES-128/192/256 with ECB, CBC, CFB, CTR and the password text codec"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Electronic codebook with PKCS#7 padding.
    Ecb,
    /// Cipher block chaining with PKCS#7 padding.
    Cbc,
    /// 128-bit cipher feedback, no padding.
    Cfb,
    /// Counter mode, no padding.
    Ctr,
}

#[derive(Args)]
struct KeyArgs {
    /// AES key as 32, 48 or 64 hex characters.
    #[arg(
        long,
        value_name = "HEX",
        conflicts_with = "schedule",
        required_unless_present = "schedule"
    )]
    key_hex: Option<String>,
    /// Serialized round-key schedule written by `expand`.
    #[arg(long, value_name = "FILE")]
    schedule: Option<PathBuf>,
}

#[derive(Args)]
struct CipherArgs {
    /// Chaining mode.
    #[arg(long, value_enum, default_value_t = Mode::Cbc)]
    mode: Mode,
    #[command(flatten)]
    key: KeyArgs,
    /// IV (CBC, 16 bytes) or nonce (CTR, up to 16 bytes) as hex.
    #[arg(long, value_name = "HEX")]
    iv_hex: Option<String>,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a key and write its round-key schedule.
    Expand {
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Output path for the serialized schedule.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Encrypt a file.
    Enc(CipherArgs),
    /// Decrypt a file.
    Dec(CipherArgs),
    /// Encrypt a file into a base64 text payload.
    EncryptText {
        /// Password the working key is derived from.
        #[arg(long)]
        password: String,
        /// Key size in bits (128 or 256).
        #[arg(long, default_value_t = 128)]
        key_bits: u32,
        /// Plaintext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Optional RNG seed for a reproducible nonce.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode a base64 text payload.
    DecryptText {
        /// Password the working key is derived from.
        #[arg(long)]
        password: String,
        /// Key size in bits (128 or 256).
        #[arg(long, default_value_t = 128)]
        key_bits: u32,
        /// Base64 payload.
        #[arg(long, value_name = "BASE64")]
        data: String,
        /// Write plaintext here instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Round-trip random inputs through every key size and mode.
    Check {
        /// Number of random samples per key size.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: generate a key and IV, encrypt a message, decrypt it back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    match cli.command {
        Commands::Expand { key_hex, out } => cmd_expand(&key_hex, &out),
        Commands::Enc(args) => cmd_cipher(&args, true),
        Commands::Dec(args) => cmd_cipher(&args, false),
        Commands::EncryptText {
            password,
            key_bits,
            input,
            seed,
        } => cmd_encrypt_text(&password, key_bits, &input, seed),
        Commands::DecryptText {
            password,
            key_bits,
            data,
            output,
        } => cmd_decrypt_text(&password, key_bits, &data, output.as_deref()),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_expand(key_hex: &str, out: &Path) -> Result<()> {
    let round_keys = parse_key_hex(key_hex)?;
    let bytes = bincode::serialize(&round_keys).context("serialize schedule")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    info!(
        "wrote {} schedule ({} words) to {}",
        round_keys.key_size(),
        round_keys.len_words(),
        out.display()
    );
    Ok(())
}

fn cmd_cipher(args: &CipherArgs, encrypt: bool) -> Result<()> {
    let round_keys = load_round_keys(&args.key)?;
    let iv = parse_iv(args.mode, args.iv_hex.as_deref())?;
    let data =
        fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;

    let output = match (args.mode, encrypt) {
        (Mode::Ecb, true) => ecb_encrypt(&pkcs7_pad(&data), &round_keys)?,
        (Mode::Ecb, false) => {
            let plain = ecb_decrypt(&data, &round_keys)?;
            pkcs7_unpad(&plain)?.to_vec()
        }
        (Mode::Cbc, true) => cbc_encrypt(&pkcs7_pad(&data), &round_keys, &iv)?,
        (Mode::Cbc, false) => {
            let plain = cbc_decrypt(&data, &round_keys, &iv)?;
            pkcs7_unpad(&plain)?.to_vec()
        }
        (Mode::Cfb, true) => cfb_encrypt(&data, &round_keys, &iv)?,
        (Mode::Cfb, false) => cfb_decrypt(&data, &round_keys, &iv)?,
        (Mode::Ctr, _) => ctr_apply(&data, &round_keys, &mut Counter::new(&iv)?),
    };

    fs::write(&args.output, &output)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        "{} {} bytes -> {} bytes ({:?}, {})",
        if encrypt { "encrypted" } else { "decrypted" },
        data.len(),
        output.len(),
        args.mode,
        round_keys.key_size()
    );
    Ok(())
}

fn cmd_encrypt_text(password: &str, key_bits: u32, input: &Path, seed: Option<u64>) -> Result<()> {
    let plaintext = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let mut rng = seeded_rng(seed);
    let mut nonce = [0u8; DEFAULT_NONCE_LEN];
    rng.fill_bytes(&mut nonce);
    let encoded = aes_encrypt_text(&plaintext, password, key_bits, &nonce)
        .context("encrypt text payload")?;
    println!("{encoded}");
    Ok(())
}

fn cmd_decrypt_text(
    password: &str,
    key_bits: u32,
    data: &str,
    output: Option<&Path>,
) -> Result<()> {
    let plaintext =
        aes_decrypt_text(data, password, key_bits).context("decrypt text payload")?;
    match output {
        Some(path) => {
            fs::write(path, &plaintext).with_context(|| format!("write {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&plaintext).context("write stdout")?;
            stdout.write_all(b"\n").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);

    for size in KeySize::ALL {
        for _ in 0..samples {
            let mut key = vec![0u8; size.key_bytes()];
            let mut iv = [0u8; 16];
            let mut block = [0u8; 16];
            let mut data = vec![0u8; (rng.next_u32() % 256) as usize];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);
            rng.fill_bytes(&mut block);
            rng.fill_bytes(&mut data);
            let round_keys = expand_key(&key)?;

            if round_keys.len_words() != size.schedule_words() {
                bail!("{size}: schedule has {} words", round_keys.len_words());
            }
            if decrypt_block(&encrypt_block(&block, &round_keys), &round_keys) != block {
                bail!("{size}: block round trip failed");
            }
            let ct = aes_cbc_encrypt_padded(&data, &key, &iv)?;
            if aes_cbc_decrypt_padded(&ct, &key, &iv)? != data {
                bail!("{size}: CBC round trip failed");
            }
            let ct = cfb_encrypt(&data, &round_keys, &iv)?;
            if cfb_decrypt(&ct, &round_keys, &iv)? != data {
                bail!("{size}: CFB round trip failed");
            }
            let ct = ctr_apply(&data, &round_keys, &mut Counter::from_block(iv));
            if ctr_apply(&ct, &round_keys, &mut Counter::from_block(iv)) != data {
                bail!("{size}: CTR round trip failed");
            }
        }
        debug!("{size}: {samples} samples passed");
    }
    println!("ok: {} samples per key size", samples);
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);

    let message = b"Secret message goes here";
    let ciphertext = aes_cbc_encrypt_padded(message, &key, &iv)?;
    let decrypted = aes_cbc_decrypt_padded(&ciphertext, &key, &iv)?;

    println!("demo key: {}", hex::encode(key));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<RoundKeys> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    expand_key(&bytes).context("AES key must be 16, 24 or 32 bytes (32, 48 or 64 hex characters)")
}

fn load_round_keys(args: &KeyArgs) -> Result<RoundKeys> {
    match (&args.key_hex, &args.schedule) {
        (Some(key_hex), _) => parse_key_hex(key_hex),
        (None, Some(path)) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            bincode::deserialize(&bytes).context("deserialize schedule")
        }
        (None, None) => bail!("either --key-hex or --schedule is required"),
    }
}

fn parse_iv(mode: Mode, iv_hex: Option<&str>) -> Result<Vec<u8>> {
    let iv = match iv_hex {
        Some(s) => hex::decode(s.trim()).context("decode IV hex")?,
        None if mode == Mode::Ecb => return Ok(Vec::new()),
        None => bail!("--iv-hex is required for {mode:?} mode"),
    };
    match mode {
        Mode::Ecb => bail!("ECB mode takes no IV"),
        Mode::Cbc | Mode::Cfb if iv.len() != 16 => {
            bail!("{mode:?} IV must be 16 bytes (32 hex characters)")
        }
        Mode::Ctr if iv.len() > 16 => bail!("CTR nonce must be at most 16 bytes"),
        _ => Ok(iv),
    }
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => ChaCha20Rng::from_entropy(),
    }
}
