use std::{fs::File, io::Read, path::Path};

use datatest_stable::Result;
use fluent_json::{Flags, Options};
use serde::Deserialize;

#[derive(Deserialize)]
struct TestOptions {
    #[serde(rename = "maxDepth")]
    max_depth: Option<usize>,
    pretty: Option<bool>,
    #[serde(rename = "escapeUnicode")]
    escape_unicode: Option<bool>,
}

impl TestOptions {
    fn to_options(&self) -> Options {
        let mut opts = Options::default();

        if let Some(max_depth) = self.max_depth {
            opts.max_depth = max_depth;
        }

        if self.pretty == Some(true) {
            opts.flags |= Flags::PRETTY_PRINT;
        }

        if self.escape_unicode == Some(true) {
            opts.flags |= Flags::ESCAPE_UNICODE;
        }

        opts
    }
}

#[derive(Deserialize)]
struct DecodeTest {
    name: String,
    input: String,
    #[serde(default)]
    expected: Option<serde_json::Value>,
    #[serde(rename = "shouldError", default)]
    should_error: bool,
    options: Option<TestOptions>,
}

#[derive(Deserialize)]
struct EncodeTest {
    name: String,
    input: serde_json::Value,
    #[serde(default)]
    expected: Option<String>,
    #[serde(rename = "shouldError", default)]
    should_error: bool,
    options: Option<TestOptions>,
}

#[derive(Deserialize)]
#[serde(bound = "T: serde::de::DeserializeOwned")]
struct Fixture<T: serde::de::DeserializeOwned> {
    tests: Vec<T>,
}

fn test_decode_fixture(path: &Path) -> Result<()> {
    let mut file = File::open(path)?;
    let mut json_string = String::new();
    file.read_to_string(&mut json_string)?;

    let fixture: Fixture<DecodeTest> = serde_json::from_str(&json_string)?;

    for test in fixture.tests {
        let result = if let Some(ref options) = test.options {
            fluent_json::from_str_with_options(&test.input, options.to_options())
        } else {
            fluent_json::from_str(&test.input)
        };

        if test.should_error {
            assert!(
                result.is_err(),
                "expected error but got success: fixture: {}",
                test.name
            );
        } else {
            let output: serde_json::Value =
                result.expect(&format!("decode failed: fixture: {}", test.name));
            assert_eq!(
                Some(output),
                test.expected,
                "result does not match expected: {}",
                test.name
            );
        }
    }

    Ok(())
}

fn test_encode_fixture(path: &Path) -> Result<()> {
    let mut file = File::open(path)?;
    let mut json_string = String::new();
    file.read_to_string(&mut json_string)?;

    let fixture: Fixture<EncodeTest> = serde_json::from_str(&json_string)?;

    for test in fixture.tests {
        let result = if let Some(ref options) = test.options {
            fluent_json::to_string_with_options(&test.input, options.to_options())
        } else {
            fluent_json::to_string(&test.input)
        };

        if test.should_error {
            assert!(
                result.is_err(),
                "expected error but got success: fixture: {}",
                test.name
            );
        } else {
            let output = result.expect(&format!("encode failed: fixture: {}", test.name));
            assert_eq!(
                Some(output),
                test.expected,
                "result does not match expected: {}",
                test.name
            );
        }
    }

    Ok(())
}

datatest_stable::harness! {
    { test = test_encode_fixture, root = "tests/fixtures/encode", pattern = r"^.*\.json$" },
    { test = test_decode_fixture, root = "tests/fixtures/decode", pattern = r"^.*\.json$" },
}
