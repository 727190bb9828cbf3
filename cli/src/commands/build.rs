use scanctx_core::api::{ContextBuilder, ContextConfig, ContextReport};

use super::cli::{BuildArgs, OutputFormat};
use crate::error::CliError;

pub async fn run(cfg: &ContextConfig, args: &BuildArgs, format: OutputFormat) -> Result<i32, CliError> {
    let result = ContextBuilder::new(cfg).build();

    match format {
        OutputFormat::Json => println!("{}", ContextReport::from_result(&result).to_json_pretty()?),
        OutputFormat::Text => match &result {
            Ok(built) => {
                print!("{}", built.summary.format_text());
                for issue in &built.issues {
                    println!("! {issue}");
                }
            }
            Err(e) => eprintln!("scan context build failed: {e}"),
        },
    }

    let built = match result {
        Ok(built) => built,
        Err(_) => return Ok(1),
    };

    if args.handoff {
        match scanctx_plugins::factory::build_handoff(cfg) {
            Some(sink) => {
                sink.hand_off(&built.descriptor)
                    .await
                    .map_err(|source| CliError::Handoff {
                        name: sink.name().to_string(),
                        source,
                    })?;
            }
            None => {
                tracing::warn!(target: "scanctx.handoff", "--handoff given but [handoff] provider is none");
            }
        }
    }

    Ok(0)
}
