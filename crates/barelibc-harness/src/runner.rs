//! Test execution engine.

use crate::config::RenderMode;
use crate::diff;
use crate::execute::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs a fixture set under one concrete render mode.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (`Device` or `Buffer`).
    pub mode: RenderMode,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: RenderMode) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all admitted fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| self.mode.admits(&case.mode))
            .map(|case| {
                let (passed, actual, diff) = self.execute_case(case);
                let case_name = if RenderMode::from_str_loose(&case.mode) == RenderMode::Both {
                    format!("{} [{}]", case.name, self.mode)
                } else {
                    case.name.clone()
                };
                VerificationResult {
                    case_name,
                    family: fixture_set.family.clone(),
                    function: case.function.clone(),
                    mode: self.mode.as_str().to_string(),
                    spec_section: case.spec_section.clone(),
                    passed,
                    expected: case.expected_output.clone(),
                    actual,
                    diff,
                }
            })
            .collect()
    }

    fn execute_case(&self, case: &FixtureCase) -> (bool, String, Option<String>) {
        match execute_fixture_case(&case.function, &case.inputs, self.mode) {
            Ok(run) => {
                let output_ok = run.output == case.expected_output;
                let return_ok = case.expected_return.is_none_or(|want| want == run.ret);

                let mut notes = Vec::new();
                if !output_ok {
                    notes.push(diff::render_diff(&case.expected_output, &run.output));
                }
                if let Some(want) = case.expected_return.filter(|_| !return_ok) {
                    notes.push(format!("return mismatch: expected={want}, actual={}", run.ret));
                }
                let diff_out = (!notes.is_empty()).then(|| notes.join("\n"));
                (output_ok && return_ok, run.output, diff_out)
            }
            Err(err) => {
                let actual = format!("error:{err}");
                let diff_out = Some(diff::render_diff(&case.expected_output, &actual));
                // A case may expect the call to be rejected.
                (actual == case.expected_output, actual, diff_out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(json: &str) -> FixtureSet {
        FixtureSet::from_json(json).expect("valid fixture json")
    }

    #[test]
    fn buffer_runner_skips_device_only_cases() {
        let set = fixture(
            r#"{
                "version":"v1",
                "family":"stdio/printf",
                "captured_at":"2026-10-01T00:00:00Z",
                "cases":[
                    {"name":"trunc","function":"snprintf","spec_section":"C11 7.21.6.5","inputs":{"format":"%d-%s","args":["d:12","s:ok"],"capacity":4},"expected_output":"12-","expected_return":5,"mode":"buffer"},
                    {"name":"fd","function":"fprintf","spec_section":"C11 7.21.6.1","inputs":{"format":"%x","args":["x:255"]},"expected_output":"ff","expected_return":2,"mode":"device"}
                ]
            }"#,
        );
        let results = TestRunner::new("smoke", RenderMode::Buffer).run(&set);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].diff);
        assert_eq!(results[0].case_name, "trunc");
    }

    #[test]
    fn both_mode_case_is_named_per_mode() {
        let set = fixture(
            r#"{
                "version":"v1",
                "family":"stdio/printf",
                "captured_at":"2026-10-01T00:00:00Z",
                "cases":[
                    {"name":"mixed","function":"vformat","spec_section":"C11 7.21.6.1","inputs":{"format":"%s=%d","args":["s:n","d:-4"]},"expected_output":"n=-4","expected_return":4}
                ]
            }"#,
        );
        for mode in RenderMode::Both.expand() {
            let results = TestRunner::new("both", *mode).run(&set);
            assert_eq!(results.len(), 1);
            assert!(results[0].passed, "{:?}", results[0].diff);
            assert_eq!(results[0].case_name, format!("mixed [{mode}]"));
        }
    }

    #[test]
    fn return_mismatch_fails_with_note() {
        let set = fixture(
            r#"{
                "version":"v1",
                "family":"stdlib/itoa",
                "captured_at":"2026-10-01T00:00:00Z",
                "cases":[
                    {"name":"len","function":"itoa","spec_section":"K&R 3.6","inputs":{"value":-1},"expected_output":"-1","expected_return":3}
                ]
            }"#,
        );
        let results = TestRunner::new("ret", RenderMode::Buffer).run(&set);
        assert!(!results[0].passed);
        let diff = results[0].diff.as_deref().unwrap_or_default();
        assert!(diff.contains("return mismatch: expected=3, actual=2"));
    }

    #[test]
    fn expected_rejection_passes() {
        let set = fixture(
            r#"{
                "version":"v1",
                "family":"stdio/printf",
                "captured_at":"2026-10-01T00:00:00Z",
                "cases":[
                    {"name":"missing","function":"vformat","spec_section":"arg check","inputs":{"format":"%d"},"expected_output":"error:format rejected arguments: %d (argument 0) has no matching argument","mode":"buffer"}
                ]
            }"#,
        );
        let results = TestRunner::new("reject", RenderMode::Buffer).run(&set);
        assert!(results[0].passed, "{:?}", results[0].actual);
    }
}
