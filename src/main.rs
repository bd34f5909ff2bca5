// portsweep - find hosts with an open TCP port across IPv4 /24 subnets.
//
// Usage: portsweep [--debug] TIMEOUT PORT SUBNET...
//
//   portsweep 0.5 80 10.60.3.0/24
//   portsweep 0.5 8090 $(for i in $(seq 1 32); do echo 10.60.$i.0/24; done)

use portsweep::cli::Args;
use portsweep::scanner::run_scan;
use portsweep::{logging, output};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let program = program_name();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&program, e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Args::try_parse_args(std::env::args_os())?.into_settings()?;
    logging::init(logging::level_for(settings.debug))?;

    let job = settings.job_config();
    if settings.debug {
        output::print_info(&format!(
            "probing {} hosts on port {} (timeout {})",
            job.targets.len(),
            settings.port,
            settings.timeout
        ));
    }

    let prober = Arc::new(settings.prober());
    let report = run_scan(prober, job).await?;

    output::print_results(&report, settings.output)?;
    Ok(())
}

/// Basename of argv[0], for error lines.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
