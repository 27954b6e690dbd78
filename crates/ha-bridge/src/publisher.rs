//! Discovery publishers
//!
//! The MQTT transport lives outside this binary; a publisher here writes each
//! message as one JSON line for whatever forwards it to the broker.

use anyhow::{Context, Result};
use async_trait::async_trait;
use ha_discovery::DiscoveryMessage;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Sink for rendered discovery messages
#[async_trait]
pub trait DiscoveryPublisher: Send + Sync {
    async fn publish(&self, message: &DiscoveryMessage) -> Result<()>;

    /// Called once after a sweep
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Writes `{"topic": ..., "payload": ..., "retain": ...}` lines
pub struct JsonLinesPublisher<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesPublisher<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> DiscoveryPublisher for JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, message: &DiscoveryMessage) -> Result<()> {
        let mut line = serde_json::to_vec(message).context("Failed to serialize message")?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .with_context(|| format!("Failed to write message for {}", message.topic))
    }

    async fn flush(&self) -> Result<()> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_json_lines() {
        let publisher = JsonLinesPublisher::new(Vec::new());
        let messages = [
            DiscoveryMessage {
                topic: "homeassistant/sensor/1/a/config".to_string(),
                payload: r#"{"unique_id":"a"}"#.to_string(),
                retain: true,
            },
            DiscoveryMessage {
                topic: "homeassistant/sensor/1/b/config".to_string(),
                payload: String::new(),
                retain: true,
            },
        ];
        for message in &messages {
            publisher.publish(message).await.unwrap();
        }
        publisher.flush().await.unwrap();

        let out = String::from_utf8(publisher.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({
                    "topic": "homeassistant/sensor/1/a/config",
                    "payload": "{\"unique_id\":\"a\"}",
                    "retain": true
                }),
                json!({
                    "topic": "homeassistant/sensor/1/b/config",
                    "payload": "",
                    "retain": true
                }),
            ]
        );
    }
}
