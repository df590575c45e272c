use host2ptr::cli::{EmitArgs, parse_or_usage};
use host2ptr::logging::setup_logging;
use host2ptr::task::run_task;
use host2ptr::task::zone::GenerateZoneFilesTask;
use host2ptr::AppConfig;

fn main() -> anyhow::Result<()> {
    let args: EmitArgs = parse_or_usage();

    setup_logging(args.verbose);

    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    run_task(&GenerateZoneFilesTask::new(config, args.record_file.clone()))
}
