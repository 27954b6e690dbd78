//! One discovery sweep over a set of inclusion report files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ha_config::DiscoveryMode;
use ha_discovery::{DiscoveryMessage, DiscoveryPayload, Translator};
use ha_inclusion::{parse_reports, InclusionReport};
use ha_mqtt_schema::OriginInfo;
use tracing::{debug, info, warn};

use crate::publisher::DiscoveryPublisher;

/// What a sweep publishes and where
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub discovery_prefix: String,
    pub mode: DiscoveryMode,
    pub origin: OriginInfo,
    /// Clear the devices' discovery topics instead of announcing them
    pub remove: bool,
    /// Components carry an availability topic that the sweep must mark online
    pub availability: bool,
}

impl SweepPlan {
    /// Messages announcing (or clearing) one device
    pub fn messages(&self, payload: &DiscoveryPayload) -> Result<Vec<DiscoveryMessage>> {
        let prefix = self.discovery_prefix.as_str();
        let mut messages = match (self.mode, self.remove) {
            (DiscoveryMode::Component, false) => payload.component_messages(prefix)?,
            (DiscoveryMode::Device, false) => vec![payload.device_message(prefix, &self.origin)?],
            (DiscoveryMode::Component, true) => payload.removal_messages(prefix),
            (DiscoveryMode::Device, true) => vec![payload.device_removal_message(prefix)],
        };
        if self.availability {
            messages.push(if self.remove {
                payload.availability_removal_message()
            } else {
                payload.availability_message()
            });
        }
        Ok(messages)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub devices: usize,
    pub components: usize,
    pub messages: usize,
    /// Report files that could not be read or parsed
    pub failed_files: Vec<PathBuf>,
}

/// Translate every report in `files` and publish the resulting messages.
///
/// A file that cannot be read or parsed is logged and skipped; the rest of
/// the sweep continues. Publisher errors abort the sweep.
pub async fn run_sweep(
    files: &[PathBuf],
    translator: &Translator,
    plan: &SweepPlan,
    publisher: &dyn DiscoveryPublisher,
) -> Result<SweepSummary> {
    let mut summary = SweepSummary::default();

    for file in files {
        let reports = match read_reports(file).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!("Skipping {}: {:#}", file.display(), e);
                summary.failed_files.push(file.clone());
                continue;
            }
        };

        for report in &reports {
            let payload = translator.translate(report);
            if payload.is_empty() && !plan.remove {
                debug!("Device {} has no translatable services", payload.device_id);
                continue;
            }

            for message in plan.messages(&payload)? {
                publisher.publish(&message).await?;
                summary.messages += 1;
            }
            summary.devices += 1;
            summary.components += payload.len();
        }
    }

    publisher.flush().await?;
    info!(
        devices = summary.devices,
        components = summary.components,
        messages = summary.messages,
        failed = summary.failed_files.len(),
        "Discovery sweep finished"
    );
    Ok(summary)
}

async fn read_reports(file: &Path) -> Result<Vec<InclusionReport>> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let reports = parse_reports(&content)?;
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<DiscoveryMessage>>,
    }

    impl Recorder {
        fn topics(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.topic.clone())
                .collect()
        }
    }

    #[async_trait]
    impl DiscoveryPublisher for Recorder {
        async fn publish(&self, message: &DiscoveryMessage) -> Result<()> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    const REPORT: &str = r#"{
        "address": "12",
        "product_name": "Wind vane",
        "services": [
            { "name": "sensor_direct", "address": "12/direct", "props": { "sup_units": ["°"] } },
            { "name": "battery", "address": "12/battery" },
            { "name": "dev_sys", "address": "12/sys" }
        ]
    }"#;

    fn plan(mode: DiscoveryMode, remove: bool) -> SweepPlan {
        SweepPlan {
            availability: false,
            discovery_prefix: "homeassistant".to_string(),
            mode,
            origin: OriginInfo {
                name: "fimp-ha".to_string(),
                sw_version: None,
                support_url: None,
            },
            remove,
        }
    }

    fn write_reports(dir: &TempDir) -> Vec<PathBuf> {
        let good = dir.path().join("vane.json");
        fs::write(&good, REPORT).unwrap();
        let bad = dir.path().join("broken.json");
        fs::write(&bad, "{ not json").unwrap();
        let empty = dir.path().join("clock.json");
        fs::write(&empty, r#"{"address": "13", "services": [{"name": "time", "address": "13/t"}]}"#)
            .unwrap();
        vec![good, bad, empty, dir.path().join("missing.json")]
    }

    #[tokio::test]
    async fn test_component_sweep() {
        let dir = TempDir::new().unwrap();
        let files = write_reports(&dir);
        let recorder = Recorder::default();

        let summary = run_sweep(
            &files,
            &Translator::default(),
            &plan(DiscoveryMode::Component, false),
            &recorder,
        )
        .await
        .unwrap();

        assert_eq!(summary.devices, 1);
        assert_eq!(summary.components, 2);
        assert_eq!(summary.messages, 2);
        assert_eq!(summary.failed_files, vec![files[1].clone(), files[3].clone()]);
        assert_eq!(
            recorder.topics(),
            vec![
                "homeassistant/sensor/12/12_direct/config",
                "homeassistant/sensor/12/12_battery/config",
            ]
        );
    }

    #[tokio::test]
    async fn test_device_sweep() {
        let dir = TempDir::new().unwrap();
        let files = write_reports(&dir);
        let recorder = Recorder::default();

        run_sweep(
            &files[..1],
            &Translator::default(),
            &plan(DiscoveryMode::Device, false),
            &recorder,
        )
        .await
        .unwrap();

        let messages = recorder.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, "homeassistant/device/12/config");
        let body: serde_json::Value = serde_json::from_str(&messages[0].payload).unwrap();
        assert_eq!(body["o"]["name"], "fimp-ha");
        assert_eq!(body["cmps"].as_object().map(|c| c.len()), Some(2));
    }

    #[tokio::test]
    async fn test_removal_sweep() {
        let dir = TempDir::new().unwrap();
        let files = write_reports(&dir);

        let recorder = Recorder::default();
        let summary = run_sweep(
            &files,
            &Translator::default(),
            &plan(DiscoveryMode::Component, true),
            &recorder,
        )
        .await
        .unwrap();
        assert_eq!(summary.messages, 2);
        assert!(recorder.messages.lock().unwrap().iter().all(|m| m.is_removal()));

        let recorder = Recorder::default();
        run_sweep(
            &files,
            &Translator::default(),
            &plan(DiscoveryMode::Device, true),
            &recorder,
        )
        .await
        .unwrap();
        assert_eq!(
            recorder.topics(),
            vec![
                "homeassistant/device/12/config",
                "homeassistant/device/13/config",
            ]
        );
    }

    #[tokio::test]
    async fn test_devices_marked_online() {
        let dir = TempDir::new().unwrap();
        let files = write_reports(&dir);
        let plan = SweepPlan {
            availability: true,
            ..plan(DiscoveryMode::Component, false)
        };

        let recorder = Recorder::default();
        let summary = run_sweep(&files, &Translator::default(), &plan, &recorder)
            .await
            .unwrap();
        assert_eq!(summary.messages, 3);
        {
            let messages = recorder.messages.lock().unwrap();
            let last = messages.last().unwrap();
            assert_eq!(last.topic, "fimp-ha/12/availability");
            assert_eq!(last.payload, ha_discovery::PAYLOAD_ONLINE);
            assert!(last.retain);
        }

        let plan = SweepPlan {
            remove: true,
            ..plan
        };
        let recorder = Recorder::default();
        run_sweep(&files[..1], &Translator::default(), &plan, &recorder)
            .await
            .unwrap();
        let messages = recorder.messages.lock().unwrap();
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.is_removal()));
        assert_eq!(messages[2].topic, "fimp-ha/12/availability");
    }
}
