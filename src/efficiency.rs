//! Efficiency of the V2L chain
//!
//! The system efficiency is the ratio of the nominal load to the power drawn
//! from the HV battery. The component efficiency removes the parasitic
//! no-load consumption (the calibration offset) from the measured power first.

use serde::Serialize;
use std::collections::BTreeMap;

/// Role of a test in the efficiency chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestRole {
    /// point of the efficiency curves
    Curve,
    /// isolated point drawn over the curves
    Overlay,
}

/// A known test: file name pattern, nominal load and calibration offset
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    /// substring identifying the test in the file name
    pub pattern: String,
    /// chart label
    pub label: String,
    /// nominal load [kW]
    pub nominal_kw: f64,
    /// parasitic consumption subtracted for the component efficiency [kW]
    pub offset_kw: f64,
    pub role: TestRole,
}
impl TestRecord {
    pub fn new<S: Into<String>>(pattern: S, nominal_kw: f64, offset_kw: f64) -> Self {
        let pattern: String = pattern.into();
        let label = pattern.replace("- eff ", "");
        Self {
            pattern,
            label,
            nominal_kw,
            offset_kw,
            role: TestRole::Curve,
        }
    }
    /// Draws the test as an isolated point, labelled `label`
    pub fn overlay<S: Into<String>>(self, label: S) -> Self {
        Self {
            label: label.into(),
            role: TestRole::Overlay,
            ..self
        }
    }
    pub fn is_overlay(&self) -> bool {
        self.role == TestRole::Overlay
    }
}

/// Returns the first test whose pattern is found in `file_name`
///
/// Tests are tried in order, so a pattern that contains another one
/// (e.g. "500W - 20" and "500W") must come first.
pub fn match_test<'a>(tests: &'a [TestRecord], file_name: &str) -> Option<&'a TestRecord> {
    tests.iter().find(|test| file_name.contains(&test.pattern))
}

/// System efficiency [%]
pub fn raw_efficiency(nominal_kw: f64, measured_kw: f64) -> f64 {
    100. * nominal_kw / measured_kw
}

/// Component efficiency [%]
///
/// Returns 0 when the measured power does not exceed the offset.
pub fn corrected_efficiency(nominal_kw: f64, measured_kw: f64, offset_kw: f64) -> f64 {
    let denominator = measured_kw - offset_kw;
    if denominator > 0. {
        100. * nominal_kw / denominator
    } else {
        0.
    }
}

/// Efficiencies of one test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyPoint {
    pub test: String,
    pub label: String,
    pub nominal_kw: f64,
    pub mean_kw: f64,
    pub system: f64,
    pub component: f64,
}
impl EfficiencyPoint {
    pub fn new(test: &TestRecord, mean_kw: f64) -> Self {
        Self {
            test: test.pattern.clone(),
            label: test.label.clone(),
            nominal_kw: test.nominal_kw,
            mean_kw,
            system: raw_efficiency(test.nominal_kw, mean_kw),
            component: corrected_efficiency(test.nominal_kw, mean_kw, test.offset_kw),
        }
    }
}

/// System and component efficiency curves, in test order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EfficiencyCurve {
    pub points: Vec<EfficiencyPoint>,
    pub overlay: Option<EfficiencyPoint>,
}
impl EfficiencyCurve {
    /// Builds the curves from the mean power [kW] measured per test pattern
    ///
    /// Tests without a measurement are left out.
    pub fn build(tests: &[TestRecord], mean_power: &BTreeMap<String, f64>) -> Self {
        let mut curve = Self::default();
        for test in tests {
            let Some(&mean_kw) = mean_power.get(&test.pattern) else {
                continue;
            };
            let point = EfficiencyPoint::new(test, mean_kw);
            log::info!(
                "Test: {} | nominal: {} kW | system: {:.2}% | component: {:.2}%",
                test.pattern,
                test.nominal_kw,
                point.system,
                point.component
            );
            match test.role {
                TestRole::Curve => curve.points.push(point),
                TestRole::Overlay => curve.overlay = Some(point),
            }
        }
        curve
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }
    pub fn system(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.system).collect()
    }
    pub fn component(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.component).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tests() -> Vec<TestRecord> {
        vec![
            TestRecord::new("- eff 100W", 0.1, 0.23874 / 0.95),
            TestRecord::new("- eff 500W - 20", 0.5, 0.15857 / 0.95).overlay("500W"),
            TestRecord::new("- eff 500W", 0.5, 0.23877 / 0.95),
            TestRecord::new("- eff 1000W", 1., 0.25),
        ]
    }

    #[test]
    fn corrected_is_zero_below_offset() {
        assert_eq!(corrected_efficiency(1., 0.25, 0.25), 0.);
        assert_eq!(corrected_efficiency(1., 0.1, 0.25), 0.);
        assert_relative_eq!(
            corrected_efficiency(1., 1.0, 0.25),
            100. / 0.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn raw() {
        assert_relative_eq!(raw_efficiency(1., 1.0), 100.);
        assert_relative_eq!(raw_efficiency(0.5, 0.625), 80.);
    }

    #[test]
    fn longest_pattern_first() {
        let tests = tests();
        let test = match_test(&tests, "2024-10-30 - eff 500W - 20.xlsx").unwrap();
        assert!(test.is_overlay());
        let test = match_test(&tests, "2024-10-30 - eff 500W.xlsx").unwrap();
        assert_eq!(test.label, "500W");
        assert!(!test.is_overlay());
        assert!(match_test(&tests, "3h test.xlsx").is_none());
    }

    #[test]
    fn curve_keeps_test_order() {
        let tests = tests();
        let mean_power: BTreeMap<String, f64> = [
            ("- eff 1000W".to_string(), 1.0),
            ("- eff 500W - 20".to_string(), 0.8),
            ("- eff 100W".to_string(), 0.4),
        ]
        .into_iter()
        .collect();
        let curve = EfficiencyCurve::build(&tests, &mean_power);
        assert_eq!(curve.labels(), vec!["100W", "1000W"]);
        assert_relative_eq!(curve.system()[1], 100.);
        assert_relative_eq!(curve.component()[1], 133.333_333, epsilon = 1e-5);
        let overlay = curve.overlay.unwrap();
        assert_relative_eq!(overlay.system, 62.5);
        assert_relative_eq!(
            overlay.component,
            50. / (0.8 - 0.15857 / 0.95),
            epsilon = 1e-9
        );
    }
}
