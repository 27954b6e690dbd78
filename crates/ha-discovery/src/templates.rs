//! Home Assistant template snippets
//!
//! State payloads are JSON objects keyed by service address, each value an
//! object holding the reading under a platform-specific field. Commands go
//! out as `{"address": ..., "cmd": ..., "val": ...}` on the device command
//! topic. Every builder goes through these helpers so both sides agree.

/// Command value rendered as a JSON number
pub(crate) const VAL_NUMBER: &str = "{{ value }}";

/// Command value rendered as a JSON string
pub(crate) const VAL_TEXT: &str = "{{ value | tojson }}";

/// Command value rendered as a JSON bool from Home Assistant's ON/OFF payload
pub(crate) const VAL_ON_OFF: &str = "{{ 'true' if value == 'ON' else 'false' }}";

/// Single-quoted Jinja string literal
fn jinja_str(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Jinja dict literal `{'from': 'to', ...}`
fn jinja_map(pairs: &[(&str, &str)]) -> String {
    let entries: Vec<String> = pairs
        .iter()
        .map(|(from, to)| format!("{}: {}", jinja_str(from), jinja_str(to)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// `value_json['<address>'].<field>`
fn state_ref(address: &str, field: &str) -> String {
    format!("value_json[{}].{field}", jinja_str(address))
}

/// Template extracting one field of one service from a state payload
pub(crate) fn state_template(address: &str, field: &str) -> String {
    format!("{{{{ {} }}}}", state_ref(address, field))
}

/// Template extracting one field and translating it through `pairs`;
/// values without an entry pass through unchanged
pub(crate) fn mapped_state_template(address: &str, field: &str, pairs: &[(&str, &str)]) -> String {
    let value = state_ref(address, field);
    format!("{{{{ {}.get({value}, {value}) }}}}", jinja_map(pairs))
}

/// Command value translated through `pairs`, rendered as a JSON string
pub(crate) fn mapped_text_value(pairs: &[(&str, &str)]) -> String {
    format!("{{{{ {}.get(value, value) | tojson }}}}", jinja_map(pairs))
}

/// Template mapping a boolean field to `ON`/`OFF`
pub(crate) fn on_off_template(address: &str, field: &str) -> String {
    format!("{{{{ 'ON' if {} else 'OFF' }}}}", state_ref(address, field))
}

/// Template rendering a hub command for one service
pub(crate) fn command_template(address: &str, cmd: &str, val: &str) -> String {
    let address = serde_json::Value::String(address.to_string());
    format!(r#"{{"address": {address}, "cmd": "{cmd}", "val": {val}}}"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_template() {
        assert_eq!(
            state_template("dev1/sensor1", "sensor"),
            "{{ value_json['dev1/sensor1'].sensor }}"
        );
    }

    #[test]
    fn test_state_template_escapes_quotes() {
        assert_eq!(
            state_template("it's", "mode"),
            r"{{ value_json['it\'s'].mode }}"
        );
    }

    #[test]
    fn test_on_off_template() {
        assert_eq!(
            on_off_template("a/1", "presence"),
            "{{ 'ON' if value_json['a/1'].presence else 'OFF' }}"
        );
    }

    #[test]
    fn test_command_template() {
        assert_eq!(
            command_template("a/1", "cmd.setpoint.set", VAL_NUMBER),
            r#"{"address": "a/1", "cmd": "cmd.setpoint.set", "val": {{ value }}}"#
        );
        assert_eq!(
            command_template("say \"hi\"", "cmd.mode.set", VAL_TEXT),
            r#"{"address": "say \"hi\"", "cmd": "cmd.mode.set", "val": {{ value | tojson }}}"#
        );
    }

    #[test]
    fn test_mapped_state_template() {
        assert_eq!(
            mapped_state_template("th/1", "mode", &[("auto_changeover", "heat_cool")]),
            "{{ {'auto_changeover': 'heat_cool'}.get(value_json['th/1'].mode, value_json['th/1'].mode) }}"
        );
    }

    #[test]
    fn test_mapped_text_value() {
        assert_eq!(
            mapped_text_value(&[("heat_cool", "auto_changeover"), ("it's", "x")]),
            r"{{ {'heat_cool': 'auto_changeover', 'it\'s': 'x'}.get(value, value) | tojson }}"
        );
    }
}
