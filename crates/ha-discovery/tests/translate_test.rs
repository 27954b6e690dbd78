//! End-to-end translation of hub inclusion reports

mod common;

use common::{load_report, load_reports};
use ha_discovery::{translate, TranslationSettings, Translator};
use ha_inclusion::{keys, InclusionReport, Props, Service};
use ha_mqtt_schema::{ComponentConfig, OriginInfo, Platform};
use serde_json::{json, Value};

const DIRECTION: &str = "/rt:dev/rn:zw/ad:1/sv:sensor_direct/ad:17_0";
const THERMOSTAT: &str = "/rt:dev/rn:zw/ad:1/sv:thermostat/ad:31_0";

fn component_json(component: &ComponentConfig) -> Value {
    component.to_component_json().expect("component serializes")
}

#[test]
fn test_weather_station() {
    let report = load_report("weather_station.json");
    let payload = translate(&report);

    // dev_sys has no platform and the humidity sensor has no address
    let ids: Vec<&str> = payload.components.keys().map(String::as_str).collect();
    assert_eq!(
        ids,
        vec![
            DIRECTION,
            "/rt:dev/rn:zw/ad:1/sv:sensor_wind/ad:17_0",
            "/rt:dev/rn:zw/ad:1/sv:sensor_temp/ad:17_0",
            "/rt:dev/rn:zw/ad:1/sv:battery/ad:17_0",
        ]
    );

    let direction = component_json(&payload.components[DIRECTION]);
    assert_eq!(
        direction,
        json!({
            "unique_id": DIRECTION,
            "name": "Wind direction",
            "availability_topic": "fimp-ha/17/availability",
            "device": {
                "identifiers": ["hub_17"],
                "name": "Wind and rain station",
                "manufacturer": "398",
                "model": "3",
                "model_id": "zw_398_3_1",
                "hw_version": "1",
                "sw_version": "2.4",
                "via_device": "hub"
            },
            "state_topic": "fimp-ha/17/state",
            "value_template": format!("{{{{ value_json['{DIRECTION}'].sensor }}}}"),
            "device_class": "wind_direction",
            "unit_of_measurement": "°"
        })
    );

    let wind = component_json(&payload.components[1]);
    assert_eq!(wind["unit_of_measurement"], "km/h");
    assert_eq!(wind["state_class"], "measurement");

    let temperature = component_json(&payload.components[2]);
    assert_eq!(temperature["unit_of_measurement"], "°C");
}

#[test]
fn test_direction_round_trip() {
    let report = InclusionReport::new("dev1").with_service(
        Service::new("sensor_direct", "dev1/sensor1")
            .with_props(Props::new().with(keys::SUP_UNITS, vec!["°"])),
    );
    let payload = translate(&report);
    let body = component_json(&payload.components["dev1/sensor1"]);

    assert_eq!(body["unit_of_measurement"], "°");
    assert_eq!(body["device_class"], "wind_direction");
    assert_eq!(body["value_template"], "{{ value_json['dev1/sensor1'].sensor }}");
}

#[test]
fn test_direction_without_units_falls_back() {
    let report = InclusionReport::new("dev1")
        .with_service(Service::new("sensor_direct", "dev1/sensor1"))
        .with_service(
            Service::new("sensor_direct", "dev1/sensor2")
                .with_props(Props::new().with(keys::SUP_UNITS, vec!["rad"])),
        );
    let payload = translate(&report);

    for component in payload.iter() {
        assert_eq!(component_json(component)["unit_of_measurement"], "°");
    }
}

#[test]
fn test_empty_address_skipped() {
    let report = InclusionReport::new("5")
        .with_service(Service::new("sensor_temp", ""))
        .with_service(Service::new("sensor_temp", "   "));
    assert!(translate(&report).is_empty());
}

#[test]
fn test_unique_id_is_service_address() {
    let report = load_report("weather_station.json");
    for (unique_id, component) in &translate(&report).components {
        assert_eq!(component.unique_id(), unique_id);
        assert!(report
            .services
            .iter()
            .any(|s| s.address.as_deref() == Some(unique_id.as_str())));
    }
}

#[test]
fn test_translation_is_deterministic() {
    for fixture in ["weather_station.json", "thermostat.json", "duplicate_address.json"] {
        for report in load_reports(fixture) {
            let first = serde_json::to_string(&translate(&report)).unwrap();
            let second = serde_json::to_string(&translate(&report)).unwrap();
            assert_eq!(first, second, "{fixture}");
        }
    }
}

#[test]
fn test_thermostat() {
    let payload = translate(&load_report("thermostat.json"));

    // the disabled switch is skipped
    assert_eq!(payload.len(), 3);
    let platforms: Vec<Platform> = payload.iter().map(ComponentConfig::platform).collect();
    assert_eq!(
        platforms,
        vec![Platform::Climate, Platform::Select, Platform::Sensor]
    );

    let climate = component_json(&payload.components[THERMOSTAT]);
    assert_eq!(
        climate["modes"],
        json!(["off", "heat", "cool", "heat_cool", "dry", "fan_only"])
    );
    assert_eq!(climate["min_temp"], 10.0);
    assert_eq!(climate["max_temp"], 30.0);
    assert_eq!(climate["temp_step"], 0.5);
    assert_eq!(climate["temperature_unit"], "C");
    assert_eq!(climate["mode_command_topic"], "fimp-ha/31/command");
    assert_eq!(
        climate["mode_state_template"],
        format!(
            "{{{{ {{'auto_changeover': 'heat_cool', 'dry_air': 'dry', 'fan': 'fan_only'}}\
             .get(value_json['{THERMOSTAT}'].mode, value_json['{THERMOSTAT}'].mode) }}}}"
        )
    );
    assert_eq!(
        climate["temperature_command_template"],
        format!(
            r#"{{"address": "{THERMOSTAT}", "cmd": "cmd.setpoint.set", "val": {{"type": "heat", "temp": "{{{{ value }}}}", "unit": "C"}}}}"#
        )
    );
    assert_eq!(climate["action_topic"], "fimp-ha/31/state");
    assert!(climate.get("fan_modes").is_none());

    let fan = component_json(&payload.components[format!("{THERMOSTAT}_fan_mode").as_str()]);
    assert_eq!(fan["options"], json!(["auto_low", "low", "high"]));
    assert_eq!(fan["command_topic"], "fimp-ha/31/command");
}

#[test]
fn test_collision_keeps_later_service() {
    let reports = load_reports("duplicate_address.json");
    assert_eq!(reports.len(), 2);

    let payload = translate(&reports[0]);
    assert_eq!(payload.len(), 2);

    let shared = "/rt:dev/rn:zw/ad:1/sv:x/ad:44_0";
    let body = component_json(&payload.components[shared]);
    assert_eq!(body["device_class"], "power");
    assert_eq!(body["unit_of_measurement"], "W");

    let ids: Vec<&str> = payload.components.keys().map(String::as_str).collect();
    assert_eq!(
        ids,
        vec!["/rt:dev/rn:zw/ad:1/sv:out_bin_switch/ad:44_0", shared]
    );
}

#[test]
fn test_unmapped_service_yields_nothing() {
    let reports = load_reports("duplicate_address.json");
    let payload = translate(&reports[1]);
    assert!(payload.is_empty());
    assert!(payload.component_messages("homeassistant").unwrap().is_empty());
}

#[test]
fn test_every_component_validates() {
    for fixture in ["weather_station.json", "thermostat.json", "duplicate_address.json"] {
        for report in load_reports(fixture) {
            for component in translate(&report).iter() {
                assert!(component.validate().is_ok(), "{}", component.unique_id());
            }
        }
    }
}

#[test]
fn test_messages_with_custom_settings() {
    let translator = Translator::new(TranslationSettings {
        hub_id: "attic".to_string(),
        qos: 1,
        availability: false,
        ..Default::default()
    });
    let payload = translator.translate(&load_report("weather_station.json"));

    let messages = payload.component_messages("homeassistant").unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(
        messages[0].topic,
        "homeassistant/sensor/17/rt_dev_rn_zw_ad_1_sv_sensor_direct_ad_17_0/config"
    );
    let body: Value = serde_json::from_str(&messages[0].payload).unwrap();
    assert_eq!(body["qos"], 1);
    assert!(body.get("availability_topic").is_none());
    assert_eq!(body["device"]["identifiers"], json!(["attic_17"]));

    let origin = OriginInfo {
        name: "fimp-ha".to_string(),
        sw_version: None,
        support_url: None,
    };
    let device = payload.device_message("homeassistant", &origin).unwrap();
    let body: Value = serde_json::from_str(&device.payload).unwrap();
    assert_eq!(body["cmps"].as_object().map(|c| c.len()), Some(4));
    assert_eq!(body["cmps"][DIRECTION]["platform"], "sensor");
}
