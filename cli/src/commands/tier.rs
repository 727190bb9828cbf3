use scanctx_core::api::{ContextBuilder, ContextConfig};

use super::cli::{OutputFormat, TierArgs};
use crate::error::CliError;

/// Exit status 2 when the check is not registered in any tier.
pub fn run(cfg: &ContextConfig, args: &TierArgs, format: OutputFormat) -> Result<i32, CliError> {
    let built = ContextBuilder::new(cfg).build()?;
    let tier = built.descriptor.policy().tier_of(&args.check);

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "check": args.check,
                "found": tier.is_some(),
                "tier": tier,
            }))?
        ),
        OutputFormat::Text => match tier {
            Some(t) => println!("{}: {t}", args.check),
            None => println!("{}: not found", args.check),
        },
    }

    Ok(if tier.is_some() { 0 } else { 2 })
}
