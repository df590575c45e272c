use host2ptr::cli::{ConvertArgs, parse_or_usage};
use host2ptr::logging::setup_logging;
use host2ptr::task::convert::ConvertHostTableTask;
use host2ptr::task::run_task;
use host2ptr::AppConfig;

fn main() -> anyhow::Result<()> {
    let args: ConvertArgs = parse_or_usage();

    setup_logging(args.verbose);

    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    let task = ConvertHostTableTask::new(config, args.host_table.clone())
        .with_network_listing(args.network.clone());

    run_task(&task)
}
