use {
    anyhow::{Context, Result},
    async_trait::async_trait,
    model::apr::AprMap,
    std::path::PathBuf,
    tokio::io::AsyncWriteExt,
};

/// Destination of computed APRs.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait AprSink: Send + Sync {
    async fn store(&self, aprs: &AprMap) -> Result<()>;
}

/// Writes APRs as a JSON object to a file, or to stdout when no file is
/// configured.
pub struct JsonSink {
    output: Option<PathBuf>,
}

impl JsonSink {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

#[async_trait]
impl AprSink for JsonSink {
    async fn store(&self, aprs: &AprMap) -> Result<()> {
        let mut json = serde_json::to_vec_pretty(aprs).context("failed to serialize APRs")?;
        json.push(b'\n');
        match &self.output {
            Some(path) => tokio::fs::write(path, &json)
                .await
                .with_context(|| format!("failed to write APRs to {}", path.display())),
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(&json).await?;
                stdout.flush().await.context("failed to write APRs to stdout")
            }
        }
    }
}
