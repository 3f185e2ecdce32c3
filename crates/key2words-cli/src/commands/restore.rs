//! `key2words restore <words>...`.

use clap::Args;
use key2words_keys::key_file::write_key_pair;
use key2words_keys::restore::restore_key;
use key2words_types::Result;
use zeroize::Zeroizing;

use crate::output;
use crate::GlobalOpts;

#[derive(Args)]
pub struct RestoreArgs {
    /// The mnemonic, as one quoted argument or one word per argument.
    #[arg(required = true, num_args = 1.., value_name = "WORDS")]
    pub words: Vec<String>,
}

pub fn run(args: RestoreArgs, opts: &GlobalOpts) -> Result<()> {
    let phrase = Zeroizing::new(args.words.join(" "));
    let key = restore_key(&phrase)?;
    let written = write_key_pair(&opts.config, &key)?;

    let private_key = written.private_key.display().to_string();
    let public_key = written.public_key.display().to_string();

    if opts.json {
        output::print_json(&serde_json::json!({
            "status": "ok",
            "format": opts.config.private_key_format.to_string(),
            "private_key": private_key,
            "public_key": public_key,
        }));
    } else {
        output::print_success("Private key successfully restored!");
        output::print_kv("Private key saved to", &private_key);
        output::print_kv("Public key saved to", &public_key);
    }
    Ok(())
}
