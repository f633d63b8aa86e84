//! `shapeforge set`: drive an instance of a synthesized type.
//!
//! Assignments are applied in command-line order. A subscriber records every
//! change notification, which is printed before the final property values.

use anyhow::Result;
use serde::Serialize;
use shapeforge_core::{GeneratedInstance, NotifyPropertyChanged, PropertyChanged};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::error::HelpfulError;
use super::output::{print_json, print_table};

#[derive(Debug)]
pub struct SetArgs {
    pub schema: PathBuf,
    pub assignments: Vec<String>,
    pub json: bool,
    pub propagate: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Notification {
    property: String,
    value: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct PropertyValue {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    value: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct SetOutput {
    class_name: String,
    notifications: Vec<Notification>,
    values: Vec<PropertyValue>,
}

/// Split `NAME=VALUE` at the first `=`. The value may be empty or contain
/// further `=` characters; the name may not be blank.
pub fn parse_assignment(raw: &str) -> Result<(String, String), HelpfulError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| HelpfulError::invalid_assignment(raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(HelpfulError::invalid_assignment(raw));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn run(args: SetArgs) -> Result<()> {
    let assignments = args
        .assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let ty = super::synthesize(&args.schema, args.propagate)?;
    let mut instance = ty.instantiate();

    let seen: Arc<Mutex<Vec<Notification>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    instance.subscribe(move |source: &GeneratedInstance, event: &PropertyChanged| {
        let value = source
            .get(&event.property_name)
            .map(|v| v.to_json())
            .unwrap_or(serde_json::Value::Null);
        if let Ok(mut seen) = recorder.lock() {
            seen.push(Notification {
                property: event.property_name.clone(),
                value,
            });
        }
    });

    for (name, raw) in &assignments {
        let property = ty.property(name).ok_or_else(|| {
            HelpfulError::unknown_property(ty.class_name(), name, &ty.property_names())
        })?;
        let value = property
            .data_type()
            .parse_value(raw)
            .map_err(|err| HelpfulError::invalid_value(name, &err.to_string()))?;
        debug!("Assigning {}.{} = {}", ty.class_name(), name, value);
        instance
            .set(name, value)
            .map_err(|err| HelpfulError::invalid_value(name, &err.to_string()))?;
    }

    let notifications = seen
        .lock()
        .map(|seen| seen.clone())
        .unwrap_or_default();
    let values = instance
        .values()
        .into_iter()
        .map(|(name, value)| PropertyValue {
            name: name.to_string(),
            data_type: ty
                .property(name)
                .map(|p| p.data_type().to_string())
                .unwrap_or_default(),
            value: value.to_json(),
        })
        .collect::<Vec<_>>();

    if args.json {
        return print_json(&SetOutput {
            class_name: ty.class_name().to_string(),
            notifications,
            values,
        });
    }

    for notification in &notifications {
        println!("changed: {} = {}", notification.property, notification.value);
    }
    if !notifications.is_empty() {
        println!();
    }

    let rows = values
        .into_iter()
        .map(|v| vec![v.name, v.data_type, v.value.to_string()])
        .collect();
    print_table(&["Property", "Type", "Value"], rows);

    Ok(())
}
