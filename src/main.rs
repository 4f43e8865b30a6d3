use anyhow::Result;
use clap::Parser;
use userdesk::{cli, context_factory, Args};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut cfg = context_factory::load_config(&args)?;
    context_factory::apply_cli_overrides(&mut cfg, &args);

    // Validate configuration
    if let Err(errors) = cfg.validate() {
        for err in &errors {
            eprintln!("Config error {}", err);
        }
        return Err(anyhow::anyhow!(
            "Configuration has {} validation error(s)",
            errors.len()
        ));
    }

    let ctx = context_factory::build_context(args, cfg)?;

    match ctx.args.exec.clone() {
        Some(command) => cli::run_once(&ctx, &command),
        None => cli::run_repl(ctx),
    }
}
