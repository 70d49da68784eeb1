use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub async fn run(&self) -> Result<String> {
        let mut monitor = RunMonitor::new(self.monitor_enabled);
        tracing::info!("Starting prospect ingestion...");

        let table = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} prospects ({} columns)",
            table.records.len(),
            table.headers.len()
        );
        monitor.finish_phase("extract");

        let transformed = self.pipeline.transform(table).await?;
        tracing::info!("Transformed {} prospects", transformed.table.records.len());
        monitor.finish_phase("transform");

        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        monitor.finish_phase("load");

        monitor.log_final_stats();
        Ok(output_path)
    }
}
