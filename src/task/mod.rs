pub mod convert;
pub mod zone;

use anyhow::Context;
use tracing::info;

pub trait Task {
    fn name(&self) -> &str;
    fn run(&self) -> anyhow::Result<()>;
}

pub fn run_task(task: &dyn Task) -> anyhow::Result<()> {
    info!("Running task: {}", task.name());

    task.run()
        .with_context(|| format!("Task '{}' failed", task.name()))?;

    info!("Successfully completed task: {}", task.name());

    Ok(())
}
