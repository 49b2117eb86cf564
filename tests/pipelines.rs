mod common;

use approx::assert_relative_eq;
use calamine::{open_workbook_auto, Data, Reader};
use common::*;
use v2l_charts::{
    batch::BatchError,
    config::{
        ComparisonConfig, DcdcConfig, EfficiencyConfig, EtasConfig, HarmonicsConfig, ObdConfig,
        WaveformConfig,
    },
    pipelines::{comparison, dcdc, efficiency, etas, harmonics, obd, waveform},
    Error, TestRecord,
};

// OBD columns: time D, SOC K, power L, voltage N, current O, temperature Y
const D: u16 = 3;
const K: u16 = 10;
const L: u16 = 11;
const N: u16 = 13;
const O: u16 = 14;
const Y: u16 = 24;

#[test]
fn efficiency_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![
        vec![10., 5.0],
        vec![25., -1.0],
        vec![100., -1.1],
        vec![170., -0.9],
        vec![171., 5.0],
    ];
    write_workbook(
        &dir.path().join("KONA - eff 1000W.xlsx"),
        &[obd_sheet(&[D, L], &rows)],
    );
    write_workbook(
        &dir.path().join("KONA - idle.xlsx"),
        &[obd_sheet(&[D, L], &rows)],
    );
    let config = EfficiencyConfig {
        tests: vec![TestRecord::new("- eff 1000W", 1., 0.25)],
        ..Default::default()
    }
    .with_input(dir.path())
    .with_output(dir.path());

    let report = efficiency::run(&config).unwrap();
    assert_eq!(report.processed, vec!["KONA - eff 1000W.xlsx"]);
    assert_eq!(report.skipped.len(), 1);

    let charts = config.charts_dir();
    assert!(charts.join(efficiency::CHART).is_file());
    let mut rdr = csv::Reader::from_path(charts.join(efficiency::RESULTS)).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    let value = |name: &str| records[0][column(name)].parse::<f64>().unwrap();
    assert_relative_eq!(value("mean_kw"), 1.0, epsilon = 1e-12);
    assert_relative_eq!(value("system"), 100.0, epsilon = 1e-9);
    assert_relative_eq!(value("component"), 100. / 0.75, epsilon = 1e-9);
}

#[test]
fn efficiency_reruns_give_the_same_results() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![vec![25., -1.0], vec![100., -1.1], vec![170., -0.9]];
    write_workbook(
        &dir.path().join("KONA - eff 1000W.xlsx"),
        &[obd_sheet(&[D, L], &rows)],
    );
    let config = EfficiencyConfig {
        tests: vec![TestRecord::new("- eff 1000W", 1., 0.25)],
        ..Default::default()
    }
    .with_input(dir.path())
    .with_output(dir.path());
    let results = config.charts_dir().join(efficiency::RESULTS);

    efficiency::run(&config).unwrap();
    let first = std::fs::read(&results).unwrap();
    efficiency::run(&config).unwrap();
    let second = std::fs::read(&results).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn efficiency_skips_a_corrupt_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![vec![25., -1.0], vec![100., -1.1], vec![170., -0.9]];
    write_workbook(
        &dir.path().join("KONA - eff 1000W.xlsx"),
        &[obd_sheet(&[D, L], &rows)],
    );
    std::fs::write(dir.path().join("X - eff 500W.xlsx"), b"not a spreadsheet").unwrap();
    let config = EfficiencyConfig {
        tests: vec![
            TestRecord::new("- eff 500W", 0.5, 0.),
            TestRecord::new("- eff 1000W", 1., 0.25),
        ],
        ..Default::default()
    }
    .with_input(dir.path())
    .with_output(dir.path());

    let report = efficiency::run(&config).unwrap();
    assert_eq!(report.processed, vec!["KONA - eff 1000W.xlsx"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "X - eff 500W.xlsx");
    assert!(config.charts_dir().join(efficiency::CHART).is_file());
}

#[test]
fn efficiency_needs_its_input_folder() {
    let config = EfficiencyConfig::default().with_input("no/such/folder");
    assert!(matches!(
        efficiency::run(&config),
        Err(Error::Batch(BatchError::MissingInput(_)))
    ));
}

#[test]
fn obd_signals_and_endurance() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<Vec<f64>> = (0..20)
        .map(|i| {
            let t = i as f64;
            vec![t, 80. - 0.1 * t, -1. - 0.01 * t, 350. - 0.2 * t, 3. + 0.02 * t, 25. + 0.3 * t]
        })
        .collect();
    let name = "20F4-10-31 - 3h test.xlsx";
    write_workbook(&dir.path().join(name), &[obd_sheet(&[D, K, L, N, O, Y], &rows)]);
    let config = ObdConfig {
        endurance: Some(name.to_string()),
        ..Default::default()
    }
    .with_input(dir.path())
    .with_output(dir.path());

    let report = obd::run(&config).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.processed.len(), 2);
    let charts = config.charts_dir();
    assert!(charts.join(format!("{}_chart_1.png", name)).is_file());
    assert!(charts.join(format!("{}_chart_3.png", name)).is_file());
    assert!(charts.join("20F4-10-31 - 3h test_endurance.png").is_file());
}

#[test]
fn etas_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etas.xlsx");
    let rows: Vec<Vec<f64>> = (0..10)
        .map(|i| {
            let t = 0.1 * i as f64;
            vec![t, 40. + t, 35. + t, 8. + t, 0., 13.5]
        })
        .collect();
    write_workbook(
        &input,
        &[etas_sheet("3kW", 6, &rows), etas_sheet("Empty", 6, &[])],
    );
    let config = EtasConfig::default()
        .with_input(&input)
        .with_output(dir.path().join("signals"));

    let report = etas::run(&config).unwrap();
    assert_eq!(report.processed, vec!["3kW"]);
    assert_eq!(report.skipped.len(), 1);
    for chart in ["chart_1.png", "chart_2.png", "chart_3.png"] {
        assert!(config.output.join("3kW").join(chart).is_file());
    }
}

#[test]
fn etas_blank_spare_channel() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etas.xlsx");
    let rows: Vec<Vec<f64>> = (0..10)
        .map(|i| {
            let t = 0.1 * i as f64;
            vec![t, 40. + t, 35. + t, 8. + t, 13.5]
        })
        .collect();
    // column E (ADS1_CH4) left empty
    let sheet = Sheet::new("3kW")
        .text(0, 0, "ETAS measurement")
        .text(1, 0, "3kW")
        .text(2, 0, "Time")
        .rows(3, &[0, 1, 2, 3, 5], &rows);
    write_workbook(&input, &[sheet]);
    let config = EtasConfig::default()
        .with_input(&input)
        .with_output(dir.path().join("signals"));

    let report = etas::run(&config).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.processed, vec!["3kW"]);
    assert!(config.output.join("3kW").join("chart_3.png").is_file());
}

#[test]
fn dcdc_window() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pot.xlsx");
    let steady: Vec<Vec<f64>> = (140..=180)
        .map(|t| vec![t as f64, 100., 14., 1400.])
        .collect();
    let early: Vec<Vec<f64>> = (0..10).map(|t| vec![t as f64, 100., 14., 1400.]).collect();
    write_workbook(
        &input,
        &[etas_sheet("Run1", 4, &steady), etas_sheet("Run2", 4, &early)],
    );
    let config = DcdcConfig::default()
        .with_input(&input)
        .with_output(dir.path().join("Pot_DCDC"));

    let report = dcdc::run(&config).unwrap();
    assert_eq!(report.processed, vec!["Run1"]);
    assert_eq!(report.skipped[0].0, "Run2");
    assert!(config.output.join("Run1.png").is_file());
    assert!(!config.output.join("Run2.png").exists());
}

fn harmonics_csv(active: f64, apparent: f64) -> String {
    let config = HarmonicsConfig::default();
    let fields = harmonics::fields(&config);
    let mut csv = fields.join(",");
    csv.push('\n');
    for t in 0..5 {
        let row: Vec<String> = fields
            .iter()
            .map(|field| match field.as_str() {
                "Time" => t.to_string(),
                "AveUrms1" => "230".into(),
                "AveIrms1" => "4.3".into(),
                "AveP1" => format!("{}", active * (0.9 + 0.02 * t as f64)),
                "AveS1" => format!("{}", apparent),
                "AvePF1" => "0.8".into(),
                _ => "0.4".into(),
            })
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

#[test]
fn harmonics_charts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("csv");
    std::fs::create_dir(&input).unwrap();
    write_text(&input.join("run_1.csv"), &harmonics_csv(800., 1000.));
    // active power above the apparent one: no vector diagram
    write_text(&input.join("run_2.csv"), &harmonics_csv(1200., 1000.));
    let config = HarmonicsConfig::default()
        .with_input(&input)
        .with_output(dir.path().join("charts"));

    let report = harmonics::run(&config).unwrap();
    assert!(report.is_complete());
    let run_1 = config.output.join("run_1");
    for chart in [
        "AveU_I.png",
        "AveP_S_Q_PF.png",
        "MaxU.png",
        "MaxU1_Group1.png",
        "MaxU1_Group2.png",
        harmonics::PHASOR_CHART,
    ] {
        assert!(run_1.join(chart).is_file(), "{} is missing", chart);
    }
    let run_2 = config.output.join("run_2");
    assert!(run_2.join("AveU_I.png").is_file());
    assert!(!run_2.join(harmonics::PHASOR_CHART).exists());
}

#[test]
fn waveform_charts_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let samples: String = (0..200)
        .map(|i| {
            let phase = i as f64 * std::f64::consts::PI / 50.;
            if i == 7 {
                "overload,1.0\n".to_string()
            } else {
                format!("{},{}\n", 325. * phase.sin(), 14. * (phase - 0.3).sin())
            }
        })
        .collect();
    write_text(&dir.path().join("wave.csv"), &samples);
    let config = WaveformConfig::default()
        .with_input(dir.path())
        .with_output(dir.path());

    let report = waveform::run(&config).unwrap();
    assert!(report.is_complete());
    let main_dir = dir.path().join("wave");
    for chart in ["voltage_wave.png", "current_wave.png", "combined_waveform.png"] {
        assert!(main_dir.join(waveform::IMAGE_DIR).join(chart).is_file());
    }

    let mut workbook = open_workbook_auto(main_dir.join(waveform::SORTED_FILE)).unwrap();
    let range = workbook.worksheet_range("Sorted_Data").unwrap();
    let first = range.get_value((1, 0)).unwrap();
    assert!(matches!(first, Data::Float(v) if (*v - 325.).abs() < 1e-6));
    // the non-numeric sample sorts last
    let (last_row, _) = range.end().unwrap();
    assert_eq!(last_row, 200);
    assert!(matches!(range.get_value((last_row, 0)), None | Some(Data::Empty)));
    assert!(matches!(range.get_value((last_row, 1)), Some(Data::Float(v)) if *v == 1.0));
}

#[test]
fn efficiency_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("comparison.xlsx");
    let sheet = Sheet::new("Sheet1")
        .text(0, 0, "Point")
        .text(0, 1, "Power")
        .text(0, 2, "KONA")
        .text(0, 3, "G")
        .rows(
            1,
            &[0, 1, 2, 3],
            &[
                vec![1., 0.5, 0.80, 0.78],
                vec![2., 1.0, 0.86, 0.84],
                vec![3., 1.5, 0.89, 0.87],
                vec![4., 2.0, 0.90, 0.30],
                vec![5., 2.5, 0.91, 0.89],
            ],
        );
    write_workbook(&input, &[sheet]);
    let config = ComparisonConfig::default()
        .with_input(&input)
        .with_output(dir.path());

    let report = comparison::run(&config).unwrap();
    assert!(report.is_complete());
    assert!(config.charts_dir().join(comparison::CHART).is_file());
}
