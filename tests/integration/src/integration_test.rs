//! End-to-end tests for the settings helpers
//!
//! These exercise the complete flow: JSON file and environment sources ->
//! configuration tree -> typed accessors, binding and reload.

use appsettings::{
    ConfigurationBuilder, bind, get_array_value, get_hash_set_value, get_value, global, load,
    reload, to_dictionary,
};
use appsettings_test_utils::{SecretStore, SettingsDir};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Service {
    name: String,
    port: u16,
    enabled: bool,
    start_day: DayOfWeek,
    tags: Vec<String>,
    limits: HashMap<String, Option<u32>>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}

#[test]
fn test_fixture_file_end_to_end() {
    init_tracing();
    let dir = SettingsDir::new();
    let path = dir.copy_fixture("appsettings.json");

    let config = load::from_json_file(&path).unwrap();

    assert_eq!(get_value::<String>(&config, "ValueSettingA").unwrap().as_deref(), Some("Value1"));
    assert_eq!(
        to_dictionary::<String>(&config, "sectionb").unwrap().unwrap()["ValueSettingZ"],
        Some("ValueZ".to_string())
    );
    assert_eq!(
        get_array_value::<String>(&config, "SectionC:ArraySetting1").unwrap().unwrap().len(),
        3
    );
    assert_eq!(get_value::<DayOfWeek>(&config, "Service:StartDay").unwrap(), Some(DayOfWeek::Monday));

    let tags = get_hash_set_value::<String>(&config, "Service:Tags").unwrap().unwrap();
    assert_eq!(tags, HashSet::from(["a".to_string(), "b".to_string()]));

    let limits = to_dictionary::<u32>(&config, "Service:Limits").unwrap().unwrap();
    assert_eq!(limits.get("Read"), Some(&Some(100)));
    assert_eq!(limits.get("Delete"), Some(&None));
}

#[test]
fn test_bind_service_section() {
    init_tracing();
    let dir = SettingsDir::new();
    let path = dir.copy_fixture("appsettings.json");
    let config = load::from_json_file(&path).unwrap();

    let service: Service = bind(&config, "service").unwrap().unwrap();

    assert_eq!(
        service,
        Service {
            name: "orders".to_string(),
            port: 8080,
            enabled: true,
            start_day: DayOfWeek::Monday,
            tags: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            limits: HashMap::from([
                ("Read".to_string(), Some(100)),
                ("Write".to_string(), Some(10)),
                ("Delete".to_string(), None),
            ]),
        }
    );
    assert_eq!(bind::<Service>(&config, "Missing").unwrap(), None);
}

#[test]
fn test_environment_overrides_file() {
    init_tracing();
    let dir = SettingsDir::new();
    let path = dir.copy_fixture("appsettings.json");

    temp_env::with_vars(
        [
            ("E2ETEST_Service__Port", Some("9090")),
            ("E2ETEST_Service__Tags__3", Some("c")),
        ],
        || {
            let mut config = ConfigurationBuilder::new()
                .add_json_file(&path)
                .add_environment("E2ETEST_")
                .build()
                .unwrap();

            assert_eq!(get_value::<u16>(&config, "Service:Port").unwrap(), Some(9090));
            assert_eq!(
                get_hash_set_value::<String>(&config, "Service:Tags").unwrap().unwrap().len(),
                3
            );

            temp_env::with_var("E2ETEST_Service__Port", Some("7070"), || {
                reload(&mut config).unwrap();
            });
            assert_eq!(get_value::<u16>(&config, "Service:Port").unwrap(), Some(7070));
            assert_eq!(config.get("service:name"), Some("orders"));
        },
    );
}

#[test]
fn test_global_settings_with_secret_store() {
    init_tracing();
    let dir = SettingsDir::new();
    let path = dir.copy_fixture("appsettings.json");
    let store = SecretStore::new().with_secret("Service:ApiKey", "k1");

    let config = ConfigurationBuilder::new()
        .add_json_file(&path)
        .add(store.clone())
        .build()
        .unwrap();
    global::set(config);

    let api_key = |config: &appsettings::Configuration| {
        get_value::<String>(config, "service:apikey").unwrap()
    };
    assert_eq!(api_key(&global::get().unwrap()).as_deref(), Some("k1"));

    store.put("Service:ApiKey", "k2");
    assert!(global::reload().unwrap());
    assert_eq!(api_key(&global::get().unwrap()).as_deref(), Some("k2"));
    assert_eq!(store.loads(), 2);

    global::clear();
}
