//! The translation entry point

use ha_inclusion::InclusionReport;
use tracing::{debug, trace};

use crate::builders::{build_service, BuildContext};
use crate::identity::DeviceIdentity;
use crate::merge::{merge, DiscoveryPayload};
use crate::settings::TranslationSettings;

/// Translates inclusion reports with a fixed set of settings
///
/// Holds no state between calls, so one translator can serve any number of
/// devices, concurrently or not.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    settings: TranslationSettings,
}

impl Translator {
    pub fn new(settings: TranslationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TranslationSettings {
        &self.settings
    }

    /// Translate one report into its device's discovery payload.
    ///
    /// Never fails: services that cannot be translated contribute nothing.
    pub fn translate(&self, report: &InclusionReport) -> DiscoveryPayload {
        let identity = DeviceIdentity::from_report(report, &self.settings);
        let ctx = BuildContext::new(&identity, &self.settings);

        let components = report.services.iter().flat_map(|service| {
            let built = build_service(service, &ctx);
            if built.is_empty() {
                trace!(service = %service.name, "Service yields no components");
            }
            built
        });

        let payload = merge(&identity, components);
        debug!(
            device_id = %payload.device_id,
            services = report.services.len(),
            components = payload.len(),
            "Translated inclusion report"
        );
        payload
    }
}

/// Translate with default settings
pub fn translate(report: &InclusionReport) -> DiscoveryPayload {
    Translator::default().translate(report)
}
