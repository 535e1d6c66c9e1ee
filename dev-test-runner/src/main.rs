//! Generates and writes schemas for a handful of demo domain types.
//!
//! Usage: `cargo run -p dev-test-runner -- [target-dir]`
use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use jsonschema_gen::{GeneratorSettings, SchemaWriter, describe_enum, describe_object};
use serde::Serialize;
use serde_json::{Value, json};

// ————————————————————————————————————————————————————————————————————————————
// DOMAIN TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Car {
    make: String,
    model: String,
    year: Option<i32>,
    color: CarColor,
    car_type: Option<CarType>,
    car_engine: Option<Engine>,
}

#[derive(Serialize)]
#[allow(dead_code)]
enum CarColor { White, Black, Red, Green }

#[derive(Serialize)]
#[allow(dead_code)]
enum CarType { Sports, Suv, Family }

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Engine {
    #[serde(rename = "Type")]
    kind: Option<String>,
    horsepower: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Person {
    id: uuid::Uuid,
    name: String,
    email_address: String,
    birthday: Option<NaiveDate>,
    created_date: DateTime<Utc>,
    homepage: Option<url::Url>,
    tags: Vec<String>,
    shipping_address: Option<Address>,
    attributes: HashMap<String, Value>,
    scores: HashMap<String, f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Address {
    street: String,
    city: String,
    zip_code: String,
}

describe_object!(Car {
    "Make": String,
    "Model": String,
    "Year": Option<i32>,
    "Color": CarColor,
    "CarType": Option<CarType>,
    "CarEngine": Option<Engine>,
});

describe_enum!(CarColor { White, Black, Red, Green });
describe_enum!(CarType { Sports, Suv, Family });

describe_object!(Engine {
    "Type": Option<String>,
    "Horsepower": i32,
});

describe_object!(Person {
    "Id": uuid::Uuid,
    "Name": String,
    "EmailAddress": String,
    "Birthday": Option<NaiveDate>,
    "CreatedDate": DateTime<Utc>,
    "Homepage": Option<url::Url>,
    "Tags": Vec<String>,
    "ShippingAddress": Option<Address>,
    "Attributes": HashMap<String, Value>,
    "Scores": HashMap<String, f64>,
});

describe_object!(Address {
    "Street": String,
    "City": String,
    "ZipCode": String,
});

// ————————————————————————————————————————————————————————————————————————————
// RUNNER
// ————————————————————————————————————————————————————————————————————————————

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = GeneratorSettings {
        target_dir: std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("jsonschema-gen-dev")),
        ..GeneratorSettings::default()
    };
    settings.validate()?;
    std::fs::create_dir_all(&settings.target_dir)
        .with_context(|| format!("failed to create {}", settings.target_dir.display()))?;

    let writer = SchemaWriter::new(&settings);

    let car = Car {
        make: "Ford".into(),
        model: "Focus".into(),
        year: Some(2020),
        color: CarColor::Red,
        car_type: None,
        car_engine: Some(Engine { kind: Some("I4".into()), horsepower: 160 }),
    };

    let mut attributes = HashMap::new();
    attributes.insert("name".to_string(), json!("eli"));
    attributes.insert("age".to_string(), json!(50));

    let person = Person {
        id: uuid::Uuid::nil(),
        name: "Eli".into(),
        email_address: "eli@example.com".into(),
        birthday: NaiveDate::from_ymd_opt(1974, 5, 1),
        created_date: Utc::now(),
        homepage: url::Url::parse("https://example.com/eli").ok(),
        tags: vec!["home".into(), "green".into()],
        shipping_address: Some(Address {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            zip_code: "12345".into(),
        }),
        attributes,
        scores: HashMap::new(),
    };

    let written = [
        writer.generate_and_write(Some(&car))?,
        writer.generate_and_write(Some(&person))?,
        writer.generate_and_write(Some(&HashMap::<String, Value>::new()))?,
        writer.generate_and_write::<Car>(None)?,
    ];

    for schema in &written {
        tracing::info!(path = %schema.path.display(), "schema written");
        println!("{}\n{}\n", schema.path.display(), schema.text);
    }
    Ok(())
}
